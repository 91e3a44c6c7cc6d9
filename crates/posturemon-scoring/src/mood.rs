//! Pet mood derived from the current posture score.
//!
//! Mood carries no memory: each new score maps to a mood through a fixed
//! threshold table. [`PetMood::Sleeping`] is never produced here; it is
//! reserved for readings with no person in frame.

use posturemon_types::{PetMood, PostureScore, PostureStatus};
use serde::{Deserialize, Serialize};

/// Lower score bounds (inclusive) for each mood.
///
/// Scores below `worried` map to [`PetMood::Sad`].
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct MoodThresholds {
    /// Minimum score for a cheerful pet (default: 85).
    pub cheerful: f64,
    /// Minimum score for a happy pet (default: 70).
    pub happy: f64,
    /// Minimum score for a neutral pet (default: 50).
    pub neutral: f64,
    /// Minimum score for a worried pet (default: 30).
    pub worried: f64,
}

impl Default for MoodThresholds {
    fn default() -> Self {
        Self {
            cheerful: 85.0,
            happy: 70.0,
            neutral: 50.0,
            worried: 30.0,
        }
    }
}

impl MoodThresholds {
    /// Mood for a raw score. Scores outside `[0, 100]` are clamped; `NaN`
    /// yields [`PetMood::Neutral`].
    pub fn mood_for(&self, score: f64) -> PetMood {
        if score.is_nan() {
            return PetMood::Neutral;
        }
        let score = score.clamp(0.0, 100.0);
        if score >= self.cheerful {
            PetMood::Cheerful
        } else if score >= self.happy {
            PetMood::Happy
        } else if score >= self.neutral {
            PetMood::Neutral
        } else if score >= self.worried {
            PetMood::Worried
        } else {
            PetMood::Sad
        }
    }

    /// Mood for a full score. An [`PostureStatus::Unknown`] status
    /// (uncalibrated detector) keeps the pet neutral.
    pub fn mood_for_posture(&self, score: &PostureScore) -> PetMood {
        if score.status == PostureStatus::Unknown {
            return PetMood::Neutral;
        }
        self.mood_for(score.overall)
    }
}

/// Mood for a raw score using the default thresholds.
pub fn mood_from_score(score: f64) -> PetMood {
    MoodThresholds::default().mood_for(score)
}

/// Mood for a full score using the default thresholds.
pub fn mood_for_score(score: &PostureScore) -> PetMood {
    MoodThresholds::default().mood_for_posture(score)
}
