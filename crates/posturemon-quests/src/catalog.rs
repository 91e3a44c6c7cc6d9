//! The quest catalog.
//!
//! A catalog is an ordered, read-only set of [`QuestDefinition`]s with
//! unique ids. [`QuestCatalog::builtin`] holds the five stock quests.

use std::collections::BTreeSet;

use posturemon_types::{
    BonusType, QuestBonus, QuestDefinition, QuestDifficulty, QuestId, QuestPhase, QuestRewards,
    QuestType,
};
use rust_decimal::Decimal;

use crate::error::QuestError;

// ---------------------------------------------------------------------------
// Constants
// ---------------------------------------------------------------------------

/// Base XP of the stock micro-break quest.
pub const QUEST_BASE_XP: u32 = 50;

/// Id of the stock 60-second reset.
pub const MICRO_BREAK: &str = "micro-break";
/// Id of the stock two-minute breathing exercise.
pub const BREATHING: &str = "breathing";
/// Id of the stock neck stretch.
pub const NECK_RELIEF: &str = "neck-relief";
/// Id of the stock shoulder stretch.
pub const SHOULDER_OPENERS: &str = "shoulder-openers";
/// Id of the stock five-minute routine.
pub const FULL_RESET: &str = "full-reset";

/// Ordered quest definitions with unique ids.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct QuestCatalog {
    quests: Vec<QuestDefinition>,
}

impl QuestCatalog {
    /// Build a catalog, rejecting duplicate ids.
    pub fn from_definitions(quests: Vec<QuestDefinition>) -> Result<Self, QuestError> {
        let mut seen = BTreeSet::new();
        for quest in &quests {
            if !seen.insert(quest.quest_id.clone()) {
                return Err(QuestError::DuplicateQuest(quest.quest_id.clone()));
            }
        }
        Ok(Self { quests })
    }

    /// The stock quests.
    pub fn builtin() -> Self {
        Self {
            quests: builtin_quests(),
        }
    }

    /// Look up a quest by id.
    pub fn get(&self, quest_id: &QuestId) -> Option<&QuestDefinition> {
        self.quests.iter().find(|q| &q.quest_id == quest_id)
    }

    /// Look up a quest by slug.
    pub fn get_str(&self, slug: &str) -> Option<&QuestDefinition> {
        self.quests.iter().find(|q| q.quest_id.as_str() == slug)
    }

    /// Every quest in catalog order.
    pub fn all(&self) -> &[QuestDefinition] {
        &self.quests
    }

    /// Quests of one difficulty.
    pub fn by_difficulty(&self, difficulty: QuestDifficulty) -> Vec<&QuestDefinition> {
        self.quests
            .iter()
            .filter(|q| q.difficulty == difficulty)
            .collect()
    }

    /// Quests of one type.
    pub fn by_type(&self, quest_type: QuestType) -> Vec<&QuestDefinition> {
        self.quests
            .iter()
            .filter(|q| q.quest_type == quest_type)
            .collect()
    }

    /// Quests flagged as recommended.
    pub fn recommended(&self) -> Vec<&QuestDefinition> {
        self.quests.iter().filter(|q| q.recommended).collect()
    }

    /// Number of quests.
    pub fn len(&self) -> usize {
        self.quests.len()
    }

    /// Whether the catalog is empty.
    pub fn is_empty(&self) -> bool {
        self.quests.is_empty()
    }
}

impl Default for QuestCatalog {
    fn default() -> Self {
        Self::builtin()
    }
}

// ---------------------------------------------------------------------------
// Stock quests
// ---------------------------------------------------------------------------

fn phase(
    phase_id: &str,
    name: &str,
    description: &str,
    duration_secs: u32,
    instructions: &[&str],
    success_message: &str,
) -> QuestPhase {
    QuestPhase {
        phase_id: String::from(phase_id),
        name: String::from(name),
        description: String::from(description),
        duration_secs,
        instructions: instructions.iter().map(|s| String::from(*s)).collect(),
        validation: None,
        success_message: String::from(success_message),
    }
}

fn rewards(xp: u32) -> QuestRewards {
    QuestRewards {
        xp,
        happiness: None,
        energy: None,
        bonus: None,
        pet_unlocks: Vec::new(),
    }
}

struct Header<'a> {
    id: &'a str,
    quest_type: QuestType,
    title: &'a str,
    description: &'a str,
    difficulty: QuestDifficulty,
    duration_secs: u32,
    recommended: bool,
}

fn quest(header: &Header<'_>, phases: Vec<QuestPhase>, rewards: QuestRewards) -> QuestDefinition {
    QuestDefinition {
        quest_id: QuestId::new(header.id),
        quest_type: header.quest_type,
        title: String::from(header.title),
        description: String::from(header.description),
        difficulty: header.difficulty,
        duration_secs: header.duration_secs,
        phases,
        rewards,
        requirements: None,
        recommended: header.recommended,
    }
}

fn builtin_quests() -> Vec<QuestDefinition> {
    vec![
        quest(
            &Header {
                id: MICRO_BREAK,
                quest_type: QuestType::MicroBreak,
                title: "Quick Reset",
                description: "A 60-second breathing and shoulder reset",
                difficulty: QuestDifficulty::Easy,
                duration_secs: 60,
                recommended: false,
            },
            vec![
                phase(
                    "breathing",
                    "Box Breathing",
                    "Breathe in, hold, breathe out",
                    30,
                    &[
                        "Breathe in for 4 seconds",
                        "Hold for 4 seconds",
                        "Breathe out for 4 seconds",
                        "Repeat",
                    ],
                    "Great breathing!",
                ),
                phase(
                    "shoulders",
                    "Shoulder Reset",
                    "Roll and stretch your shoulders",
                    30,
                    &[
                        "Roll shoulders backward 5 times",
                        "Roll shoulders forward 5 times",
                        "Stretch neck side to side",
                        "Take a deep breath",
                    ],
                    "Shoulders reset!",
                ),
            ],
            rewards(QUEST_BASE_XP),
        ),
        quest(
            &Header {
                id: BREATHING,
                quest_type: QuestType::Breathing,
                title: "Deep Breathing",
                description: "Extended breathing exercise for focus",
                difficulty: QuestDifficulty::Easy,
                duration_secs: 120,
                recommended: false,
            },
            vec![phase(
                "breathing-1",
                "Box Breathing",
                "2 minutes of focused breathing",
                120,
                &[
                    "Find a comfortable position",
                    "Breathe in for 4 seconds",
                    "Hold for 4 seconds",
                    "Breathe out for 4 seconds",
                    "Hold for 4 seconds",
                    "Repeat",
                ],
                "Excellent breathing!",
            )],
            rewards(40),
        ),
        quest(
            &Header {
                id: NECK_RELIEF,
                quest_type: QuestType::Stretching,
                title: "Neck Relief",
                description: "Gentle neck stretches to relieve tension",
                difficulty: QuestDifficulty::Easy,
                duration_secs: 180,
                recommended: true,
            },
            vec![phase(
                "neck-1",
                "Neck Stretches",
                "Gentle side-to-side stretches",
                180,
                &[
                    "Tilt head to left shoulder, hold 10 seconds",
                    "Tilt head to right shoulder, hold 10 seconds",
                    "Look over left shoulder, hold 10 seconds",
                    "Look over right shoulder, hold 10 seconds",
                    "Roll head gently in circles",
                    "Repeat sequence",
                ],
                "Neck tension relieved!",
            )],
            rewards(45),
        ),
        quest(
            &Header {
                id: SHOULDER_OPENERS,
                quest_type: QuestType::Stretching,
                title: "Shoulder Openers",
                description: "Stretches to open rounded shoulders",
                difficulty: QuestDifficulty::Medium,
                duration_secs: 180,
                recommended: true,
            },
            vec![phase(
                "shoulders-1",
                "Shoulder Stretches",
                "Open up your chest and shoulders",
                180,
                &[
                    "Clasp hands behind back, straighten arms",
                    "Lift arms away from body, hold 15 seconds",
                    "Roll shoulders back 10 times",
                    "Doorway stretch: arms on frame, lean forward",
                    "Hold for 30 seconds",
                    "Rest and repeat",
                ],
                "Shoulders opened!",
            )],
            rewards(55),
        ),
        quest(
            &Header {
                id: FULL_RESET,
                quest_type: QuestType::Movement,
                title: "Full Body Reset",
                description: "Complete 5-minute break with multiple exercises",
                difficulty: QuestDifficulty::Hard,
                duration_secs: 300,
                recommended: false,
            },
            vec![
                phase(
                    "breathing-phase",
                    "Breathing",
                    "Start with deep breathing",
                    60,
                    &["Box breathing for 1 minute"],
                    "Breathing complete!",
                ),
                phase(
                    "neck-phase",
                    "Neck",
                    "Neck stretches",
                    60,
                    &["Gentle neck stretches"],
                    "Neck complete!",
                ),
                phase(
                    "shoulder-phase",
                    "Shoulders",
                    "Shoulder rolls and stretches",
                    60,
                    &["Shoulder exercises"],
                    "Shoulders complete!",
                ),
                phase(
                    "standing-phase",
                    "Standing",
                    "Stand and stretch",
                    60,
                    &["Stand up, reach for the sky", "Side bends", "Gentle twists"],
                    "Standing complete!",
                ),
                phase(
                    "core-phase",
                    "Core",
                    "Gentle core activation",
                    60,
                    &["Seated spinal twists", "Gentle core engagement"],
                    "Core complete!",
                ),
            ],
            QuestRewards {
                bonus: Some(QuestBonus {
                    bonus_type: BonusType::PerfectScore,
                    multiplier: Decimal::new(15, 1),
                }),
                ..rewards(80)
            },
        ),
    ]
}
