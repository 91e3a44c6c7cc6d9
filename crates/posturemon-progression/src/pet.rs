//! Pet construction and gauge helpers.
//!
//! Gauges (`health`, `happiness`, `energy`) are bounded to
//! `0..=`[`GAUGE_MAX`]; every helper here clamps instead of failing.

use posturemon_types::{PetEvolution, PetId, PetMood, PetState};

use crate::config::ProgressionConfig;

// ---------------------------------------------------------------------------
// Constants
// ---------------------------------------------------------------------------

/// Upper bound of every pet gauge.
pub const GAUGE_MAX: u32 = 100;

/// Name given to a freshly hatched pet.
pub const DEFAULT_PET_NAME: &str = "Posturo";

/// Body color of a freshly hatched pet.
pub const DEFAULT_PET_COLOR: &str = "#8B5CF6";

/// Starting happiness.
pub const INITIAL_HAPPINESS: u32 = 80;

/// Starting health.
pub const INITIAL_HEALTH: u32 = 100;

/// Starting energy.
pub const INITIAL_ENERGY: u32 = 100;

/// A new level-1 egg with default gauges.
pub fn initial_pet(now_ms: i64) -> PetState {
    PetState {
        id: PetId::new(),
        name: String::from(DEFAULT_PET_NAME),
        mood: PetMood::Neutral,
        evolution: PetEvolution::Egg,
        level: 1,
        health: INITIAL_HEALTH,
        happiness: INITIAL_HAPPINESS,
        energy: INITIAL_ENERGY,
        color: String::from(DEFAULT_PET_COLOR),
        interactions: 0,
        last_action_ms: now_ms,
    }
}

/// Add `gain` to a gauge, capped at [`GAUGE_MAX`].
pub fn raise_gauge(current: u32, gain: u32) -> u32 {
    current.saturating_add(gain).min(GAUGE_MAX)
}

/// Clamp a gauge to [`GAUGE_MAX`].
pub fn clamp_gauge(value: u32) -> u32 {
    value.min(GAUGE_MAX)
}

/// Set the pet's mood. Returns the previous mood when it changed.
pub fn set_mood(pet: &mut PetState, mood: PetMood) -> Option<PetMood> {
    if pet.mood == mood {
        return None;
    }
    let previous = pet.mood;
    pet.mood = mood;
    Some(previous)
}

/// Feed the pet: raises happiness and counts the interaction.
pub fn feed(pet: &mut PetState, config: &ProgressionConfig, now_ms: i64) {
    pet.happiness = raise_gauge(pet.happiness, config.happiness_gain_feed);
    pet.interactions = pet.interactions.saturating_add(1);
    pet.last_action_ms = now_ms;
}

/// Bring every gauge back into range.
pub fn clamp_gauges(pet: &mut PetState) {
    pet.health = clamp_gauge(pet.health);
    pet.happiness = clamp_gauge(pet.happiness);
    pet.energy = clamp_gauge(pet.energy);
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn new_pet_is_an_egg() {
        let pet = initial_pet(1_000);
        assert_eq!(pet.name, DEFAULT_PET_NAME);
        assert_eq!(pet.evolution, PetEvolution::Egg);
        assert_eq!(pet.mood, PetMood::Neutral);
        assert_eq!(pet.level, 1);
        assert_eq!(pet.happiness, 80);
        assert_eq!(pet.last_action_ms, 1_000);
    }

    #[test]
    fn gauges_are_capped() {
        assert_eq!(raise_gauge(95, 15), 100);
        assert_eq!(raise_gauge(u32::MAX, 1), 100);
        assert_eq!(raise_gauge(40, 20), 60);
        assert_eq!(clamp_gauge(250), 100);
    }

    #[test]
    fn feeding_raises_happiness() {
        let mut pet = initial_pet(0);
        feed(&mut pet, &ProgressionConfig::default(), 5);
        assert_eq!(pet.happiness, 90);
        assert_eq!(pet.interactions, 1);
        feed(&mut pet, &ProgressionConfig::default(), 6);
        feed(&mut pet, &ProgressionConfig::default(), 7);
        assert_eq!(pet.happiness, 100);
        assert_eq!(pet.interactions, 3);
        assert_eq!(pet.last_action_ms, 7);
    }

    #[test]
    fn mood_change_reports_previous() {
        let mut pet = initial_pet(0);
        assert_eq!(set_mood(&mut pet, PetMood::Neutral), None);
        assert_eq!(set_mood(&mut pet, PetMood::Happy), Some(PetMood::Neutral));
        assert_eq!(pet.mood, PetMood::Happy);
    }

    #[test]
    fn clamp_gauges_repairs_state() {
        let mut pet = initial_pet(0);
        pet.energy = 400;
        pet.health = 101;
        clamp_gauges(&mut pet);
        assert_eq!(pet.energy, 100);
        assert_eq!(pet.health, 100);
    }
}
