//! The achievement catalog.

use std::collections::BTreeSet;

use posturemon_types::{
    AchievementCategory, AchievementDefinition, AchievementId, AchievementRarity,
    AchievementRequirement, AchievementRewards, HourWindow, RequirementType,
};

use crate::error::AchievementError;

/// Hours counted as early morning (before 9 AM UTC).
pub const EARLY_BIRD_WINDOW: HourWindow = HourWindow {
    start_hour: 0,
    end_hour: 9,
};

/// Hours counted as late night (10 PM UTC onward).
pub const NIGHT_OWL_WINDOW: HourWindow = HourWindow {
    start_hour: 22,
    end_hour: 24,
};

/// Ordered achievement definitions with unique ids.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AchievementCatalog {
    definitions: Vec<AchievementDefinition>,
}

impl AchievementCatalog {
    /// Build a catalog, rejecting duplicate ids.
    pub fn from_definitions(
        definitions: Vec<AchievementDefinition>,
    ) -> Result<Self, AchievementError> {
        let mut seen = BTreeSet::new();
        for definition in &definitions {
            if !seen.insert(definition.achievement_id.clone()) {
                return Err(AchievementError::DuplicateAchievement(
                    definition.achievement_id.clone(),
                ));
            }
        }
        Ok(Self { definitions })
    }

    /// The fifteen stock achievements.
    pub fn builtin() -> Self {
        Self {
            definitions: builtin_achievements(),
        }
    }

    /// Look up a definition by id.
    pub fn get(&self, achievement_id: &AchievementId) -> Option<&AchievementDefinition> {
        self.definitions
            .iter()
            .find(|d| &d.achievement_id == achievement_id)
    }

    /// Every definition in catalog order.
    pub fn all(&self) -> &[AchievementDefinition] {
        &self.definitions
    }

    /// Definitions in one category.
    pub fn by_category(&self, category: AchievementCategory) -> Vec<&AchievementDefinition> {
        self.definitions
            .iter()
            .filter(|d| d.category == category)
            .collect()
    }

    /// Number of definitions.
    pub fn len(&self) -> usize {
        self.definitions.len()
    }

    /// Whether the catalog is empty.
    pub fn is_empty(&self) -> bool {
        self.definitions.is_empty()
    }
}

impl Default for AchievementCatalog {
    fn default() -> Self {
        Self::builtin()
    }
}

struct Entry<'a> {
    id: &'a str,
    category: AchievementCategory,
    rarity: AchievementRarity,
    name: &'a str,
    description: &'a str,
    icon: &'a str,
    requirement_type: RequirementType,
    target: u32,
    xp: u32,
}

impl Entry<'_> {
    fn build(&self) -> AchievementDefinition {
        AchievementDefinition {
            achievement_id: AchievementId::new(self.id),
            category: self.category,
            rarity: self.rarity,
            name: String::from(self.name),
            description: String::from(self.description),
            icon: String::from(self.icon),
            requirement: AchievementRequirement {
                requirement_type: self.requirement_type,
                target: self.target,
                window: None,
            },
            rewards: AchievementRewards {
                xp: self.xp,
                ..AchievementRewards::default()
            },
            hidden: false,
            showcase: false,
        }
    }
}

fn showcased(mut definition: AchievementDefinition, unlock: &str) -> AchievementDefinition {
    definition.rewards.pet_unlocks = vec![String::from(unlock)];
    definition.showcase = true;
    definition
}

fn windowed(mut definition: AchievementDefinition, window: HourWindow) -> AchievementDefinition {
    definition.requirement.window = Some(window);
    definition
}

fn hidden(mut definition: AchievementDefinition) -> AchievementDefinition {
    definition.hidden = true;
    definition
}

#[allow(clippy::too_many_lines)] // Flat data table.
fn builtin_achievements() -> Vec<AchievementDefinition> {
    use AchievementCategory as C;
    use AchievementRarity as R;
    use RequirementType as T;

    let mut consistency_king = showcased(
        Entry {
            id: "consistency-king",
            category: C::Streaks,
            rarity: R::Epic,
            name: "Consistency King",
            description: "Achieve a 30-day streak",
            icon: "\u{1f451}",
            requirement_type: T::Streak,
            target: 30,
            xp: 1000,
        }
        .build(),
        "crown-accessory",
    );
    consistency_king.rewards.title = Some(String::from("Posture King"));

    vec![
        Entry {
            id: "first-quest",
            category: C::Quests,
            rarity: R::Common,
            name: "First Quest",
            description: "Complete your first micro-break quest",
            icon: "\u{1f3c6}",
            requirement_type: T::QuestsCompleted,
            target: 1,
            xp: 50,
        }
        .build(),
        windowed(
            Entry {
                id: "early-bird",
                category: C::Special,
                rarity: R::Uncommon,
                name: "Early Bird",
                description: "Complete a quest before 9 AM",
                icon: "\u{1f305}",
                requirement_type: T::QuestTime,
                target: 1,
                xp: 25,
            }
            .build(),
            EARLY_BIRD_WINDOW,
        ),
        Entry {
            id: "3-day-streak",
            category: C::Streaks,
            rarity: R::Common,
            name: "3-Day Streak",
            description: "Maintain good posture for 3 consecutive days",
            icon: "\u{1f525}",
            requirement_type: T::Streak,
            target: 3,
            xp: 100,
        }
        .build(),
        showcased(
            Entry {
                id: "week-warrior",
                category: C::Streaks,
                rarity: R::Rare,
                name: "Week Warrior",
                description: "Maintain a 7-day streak",
                icon: "\u{2b50}",
                requirement_type: T::Streak,
                target: 7,
                xp: 250,
            }
            .build(),
            "rainbow-color",
        ),
        consistency_king,
        Entry {
            id: "quest-novice",
            category: C::Quests,
            rarity: R::Common,
            name: "Quest Novice",
            description: "Complete 10 quests",
            icon: "\u{1f3af}",
            requirement_type: T::QuestsCompleted,
            target: 10,
            xp: 200,
        }
        .build(),
        showcased(
            Entry {
                id: "quest-master",
                category: C::Quests,
                rarity: R::Rare,
                name: "Quest Master",
                description: "Complete 50 quests",
                icon: "\u{2694}\u{fe0f}",
                requirement_type: T::QuestsCompleted,
                target: 50,
                xp: 500,
            }
            .build(),
            "warrior-helmet",
        ),
        showcased(
            Entry {
                id: "centurion",
                category: C::Quests,
                rarity: R::Epic,
                name: "Centurion",
                description: "Complete 100 quests",
                icon: "\u{1f4af}",
                requirement_type: T::QuestsCompleted,
                target: 100,
                xp: 1500,
            }
            .build(),
            "golden-armor",
        ),
        Entry {
            id: "perfect-posture",
            category: C::Posture,
            rarity: R::Rare,
            name: "Perfect Posture",
            description: "Maintain 95+ posture score for 1 hour",
            icon: "\u{2728}",
            requirement_type: T::PerfectHour,
            target: 1,
            xp: 300,
        }
        .build(),
        showcased(
            Entry {
                id: "perfect-day",
                category: C::Posture,
                rarity: R::Epic,
                name: "Perfect Day",
                description: "Average 90+ posture score for an entire day",
                icon: "\u{1f31f}",
                requirement_type: T::PerfectDay,
                target: 1,
                xp: 500,
            }
            .build(),
            "halo",
        ),
        Entry {
            id: "level-5",
            category: C::Milestones,
            rarity: R::Common,
            name: "Rising Star",
            description: "Reach level 5",
            icon: "\u{1f48e}",
            requirement_type: T::Level,
            target: 5,
            xp: 100,
        }
        .build(),
        showcased(
            Entry {
                id: "level-10",
                category: C::Milestones,
                rarity: R::Rare,
                name: "Posture Pro",
                description: "Reach level 10",
                icon: "\u{1f680}",
                requirement_type: T::Level,
                target: 10,
                xp: 250,
            }
            .build(),
            "pro-badge",
        ),
        showcased(
            Entry {
                id: "level-20",
                category: C::Milestones,
                rarity: R::Epic,
                name: "Posture Legend",
                description: "Reach level 20",
                icon: "\u{1f3c5}",
                requirement_type: T::Level,
                target: 20,
                xp: 1000,
            }
            .build(),
            "legendary-aura",
        ),
        hidden(windowed(
            Entry {
                id: "night-owl",
                category: C::Special,
                rarity: R::Uncommon,
                name: "Night Owl",
                description: "Complete a quest after 10 PM",
                icon: "\u{1f989}",
                requirement_type: T::QuestTime,
                target: 1,
                xp: 25,
            }
            .build(),
            NIGHT_OWL_WINDOW,
        )),
        hidden(
            Entry {
                id: "weekend-warrior",
                category: C::Special,
                rarity: R::Rare,
                name: "Weekend Warrior",
                description: "Complete quests on both Saturday and Sunday",
                icon: "\u{1f3d6}\u{fe0f}",
                requirement_type: T::WeekendQuests,
                target: 2,
                xp: 100,
            }
            .build(),
        ),
    ]
}
