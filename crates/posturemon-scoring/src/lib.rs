//! Posture scoring for the Posturemon progression engine.
//!
//! Turns the detector's label and distance into a [`PostureScore`], maps
//! scores to pet moods, and keeps a bounded history of recent readings.
//!
//! # Modules
//!
//! - [`metrics`] -- Numeric helpers (clamping, statistics, smoothing)
//! - [`score`] -- Label/distance to score, status, and alerts
//! - [`mood`] -- Score to pet mood
//! - [`history`] -- Bounded snapshot ring and summaries
//! - [`config`] -- Tunable scoring parameters
//!
//! [`PostureScore`]: posturemon_types::PostureScore

pub mod config;
pub mod history;
pub mod metrics;
pub mod mood;
pub mod score;

pub use config::ScoringConfig;
pub use history::{HistorySummary, MAX_HISTORY_POINTS, PostureHistory};
pub use mood::{MoodThresholds, mood_for_score, mood_from_score};
pub use score::{alerts_for_label, score_from_signal, status_from_label};
