//! Quest start gates.

use posturemon_types::{QuestDefinition, QuestId};

use crate::error::QuestError;

/// Whether a player at `player_level` who has completed `completed_ids`
/// may start `quest`.
pub fn can_start_quest(
    quest: &QuestDefinition,
    player_level: u32,
    completed_ids: &[QuestId],
) -> bool {
    check_requirements(quest, player_level, completed_ids).is_ok()
}

/// Like [`can_start_quest`], but names the failing requirement.
pub fn check_requirements(
    quest: &QuestDefinition,
    player_level: u32,
    completed_ids: &[QuestId],
) -> Result<(), QuestError> {
    let Some(requirements) = &quest.requirements else {
        return Ok(());
    };

    if let Some(min_level) = requirements.min_level
        && player_level < min_level
    {
        return Err(QuestError::NotEligible {
            quest_id: quest.quest_id.clone(),
            reason: format!("requires level {min_level}, player is level {player_level}"),
        });
    }

    if let Some(missing) = requirements
        .completed_quests
        .iter()
        .find(|required| !completed_ids.contains(required))
    {
        return Err(QuestError::NotEligible {
            quest_id: quest.quest_id.clone(),
            reason: format!("requires completing {missing} first"),
        });
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use posturemon_types::QuestRequirements;

    use super::*;
    use crate::catalog::{BREATHING, MICRO_BREAK, QuestCatalog};

    fn gated(min_level: Option<u32>, prereqs: &[&str]) -> QuestDefinition {
        let mut quest = QuestCatalog::builtin()
            .get_str(BREATHING)
            .cloned()
            .unwrap_or_else(|| panic!("missing stock quest"));
        quest.requirements = Some(QuestRequirements {
            min_level,
            completed_quests: prereqs.iter().map(|s| QuestId::new(*s)).collect(),
        });
        quest
    }

    #[test]
    fn ungated_quest_is_open() {
        let catalog = QuestCatalog::builtin();
        for quest in catalog.all() {
            assert!(can_start_quest(quest, 1, &[]));
        }
    }

    #[test]
    fn level_gate() {
        let quest = gated(Some(5), &[]);
        assert!(!can_start_quest(&quest, 4, &[]));
        assert!(can_start_quest(&quest, 5, &[]));
    }

    #[test]
    fn prerequisite_gate() {
        let quest = gated(None, &[MICRO_BREAK]);
        assert!(!can_start_quest(&quest, 10, &[]));
        assert!(can_start_quest(&quest, 10, &[QuestId::new(MICRO_BREAK)]));
    }

    #[test]
    fn both_gates_must_pass() {
        let quest = gated(Some(3), &[MICRO_BREAK]);
        assert!(!can_start_quest(&quest, 2, &[QuestId::new(MICRO_BREAK)]));
        assert!(!can_start_quest(&quest, 3, &[]));
        assert!(can_start_quest(&quest, 3, &[QuestId::new(MICRO_BREAK)]));
    }

    #[test]
    fn failure_names_the_reason() {
        let quest = gated(Some(9), &[]);
        let result = check_requirements(&quest, 1, &[]);
        assert!(matches!(
            result,
            Err(QuestError::NotEligible { reason, .. }) if reason.contains("level 9")
        ));
    }
}
