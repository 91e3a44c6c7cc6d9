//! Tunable progression parameters.
//!
//! Loaded from the `progression` section of `posturemon-config.yaml`;
//! every field falls back to the built-in game constants.

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::error::ProgressionError;

/// Level curve, pet gauge, and streak parameters.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ProgressionConfig {
    /// XP needed to go from level 1 to level 2 (default: 100).
    pub base_xp_per_level: u64,

    /// Growth factor applied to each further level (default: 1.2).
    pub xp_scaling_factor: Decimal,

    /// Happiness gained per completed quest (default: 15).
    pub happiness_gain_quest: u32,

    /// Energy gained per completed break (default: 20).
    pub energy_gain_break: u32,

    /// Happiness gained per feeding (default: 10).
    pub happiness_gain_feed: u32,

    /// Happiness the pet is set to on level-up (default: 100).
    pub level_up_happiness: u32,

    /// Highest reachable level (default: 100).
    pub max_level: u32,

    /// Hours of good posture in one UTC day that count toward the streak
    /// (default: 4).
    pub streak_threshold_hours: u32,

    /// Days that may be skipped without breaking the streak (default: 1).
    pub streak_grace_days: u32,
}

impl Default for ProgressionConfig {
    fn default() -> Self {
        Self {
            base_xp_per_level: 100,
            xp_scaling_factor: Decimal::new(12, 1),
            happiness_gain_quest: 15,
            energy_gain_break: 20,
            happiness_gain_feed: 10,
            level_up_happiness: 100,
            max_level: 100,
            streak_threshold_hours: 4,
            streak_grace_days: 1,
        }
    }
}

impl ProgressionConfig {
    /// Reject values that cannot produce a monotonic level curve.
    pub fn validate(&self) -> Result<(), ProgressionError> {
        if self.base_xp_per_level == 0 {
            return Err(ProgressionError::InvalidConfig {
                reason: String::from("base_xp_per_level must be positive"),
            });
        }
        if self.xp_scaling_factor < Decimal::ONE {
            return Err(ProgressionError::InvalidConfig {
                reason: format!(
                    "xp_scaling_factor must be at least 1, got {}",
                    self.xp_scaling_factor
                ),
            });
        }
        if self.max_level == 0 {
            return Err(ProgressionError::InvalidConfig {
                reason: String::from("max_level must be at least 1"),
            });
        }
        Ok(())
    }

    /// The good-posture threshold in milliseconds.
    pub fn streak_threshold_ms(&self) -> u64 {
        u64::from(self.streak_threshold_hours).saturating_mul(3_600_000)
    }
}

#[cfg(test)]
mod tests {
    use rust_decimal_macros::dec;

    use super::*;

    #[test]
    fn defaults_are_valid() {
        let config = ProgressionConfig::default();
        assert!(config.validate().is_ok());
        assert_eq!(config.xp_scaling_factor, dec!(1.2));
        assert_eq!(config.streak_threshold_ms(), 14_400_000);
    }

    #[test]
    fn shrinking_curve_rejected() {
        let config = ProgressionConfig {
            xp_scaling_factor: dec!(0.9),
            ..ProgressionConfig::default()
        };
        assert!(matches!(
            config.validate(),
            Err(ProgressionError::InvalidConfig { .. })
        ));
    }

    #[test]
    fn zero_base_rejected() {
        let config = ProgressionConfig {
            base_xp_per_level: 0,
            ..ProgressionConfig::default()
        };
        assert!(config.validate().is_err());
    }

    #[test]
    fn partial_json_keeps_defaults() {
        let config: Result<ProgressionConfig, _> =
            serde_json::from_str(r#"{"max_level": 50, "xp_scaling_factor": "1.5"}"#);
        assert!(config.is_ok());
        let config = config.unwrap_or_default();
        assert_eq!(config.max_level, 50);
        assert_eq!(config.xp_scaling_factor, dec!(1.5));
        assert_eq!(config.base_xp_per_level, 100);
    }
}
