//! Quests for the Posturemon progression engine.
//!
//! # Modules
//!
//! - [`catalog`] -- Read-only quest definitions and the stock set
//! - [`rewards`] -- XP calculation with multipliers and flat bonuses
//! - [`eligibility`] -- Level and prerequisite gates
//! - [`recommend`] -- Next-quest suggestion
//! - [`log`] -- Per-user completion history
//! - [`session`] -- The quest currently being played
//! - [`error`] -- Error types

pub mod catalog;
pub mod eligibility;
pub mod error;
pub mod log;
pub mod recommend;
pub mod rewards;
pub mod session;

pub use catalog::QuestCatalog;
pub use eligibility::{can_start_quest, check_requirements};
pub use error::QuestError;
pub use log::QuestLog;
pub use recommend::next_quest;
pub use rewards::{RewardConfig, RewardOptions, calculate_quest_xp};
pub use session::{QuestSession, phase_passes};
