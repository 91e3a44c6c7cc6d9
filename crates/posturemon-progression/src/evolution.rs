//! Pet evolution stages.
//!
//! Evolution is a non-decreasing step function of level:
//!
//! | Stage     | From level | Size |
//! |-----------|-----------:|-----:|
//! | egg       | 1          | 80   |
//! | baby      | 2          | 100  |
//! | juvenile  | 5          | 120  |
//! | adult     | 10         | 140  |
//! | master    | 20         | 160  |
//! | legendary | 35         | 180  |

use posturemon_types::PetEvolution;

/// One row of the evolution table.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct EvolutionStage {
    /// The stage.
    pub evolution: PetEvolution,
    /// Lowest level at which the stage applies.
    pub min_level: u32,
    /// Display size of the pet sprite in pixels.
    pub size: u32,
}

/// Evolution stages ordered by ascending `min_level`.
pub const EVOLUTION_STAGES: [EvolutionStage; 6] = [
    EvolutionStage {
        evolution: PetEvolution::Egg,
        min_level: 1,
        size: 80,
    },
    EvolutionStage {
        evolution: PetEvolution::Baby,
        min_level: 2,
        size: 100,
    },
    EvolutionStage {
        evolution: PetEvolution::Juvenile,
        min_level: 5,
        size: 120,
    },
    EvolutionStage {
        evolution: PetEvolution::Adult,
        min_level: 10,
        size: 140,
    },
    EvolutionStage {
        evolution: PetEvolution::Master,
        min_level: 20,
        size: 160,
    },
    EvolutionStage {
        evolution: PetEvolution::Legendary,
        min_level: 35,
        size: 180,
    },
];

/// The stage for a level. Levels below 1 are treated as level 1.
pub fn evolution_for_level(level: u32) -> PetEvolution {
    stage_for_level(level).evolution
}

/// The full table row for a level.
pub fn stage_for_level(level: u32) -> EvolutionStage {
    EVOLUTION_STAGES
        .iter()
        .rev()
        .find(|stage| level >= stage.min_level)
        .copied()
        .unwrap_or(EVOLUTION_STAGES[0])
}

/// The table row for a stage.
pub fn stage_info(evolution: PetEvolution) -> EvolutionStage {
    EVOLUTION_STAGES
        .iter()
        .find(|stage| stage.evolution == evolution)
        .copied()
        .unwrap_or(EVOLUTION_STAGES[0])
}
