//! Equipment, resort, and character data tables
//!
//! Immutable catalogs consumed by index. Cosmetic fields (colors, model
//! assets) belong to the render collaborator; only the numeric gameplay
//! modifiers live here. Out-of-range indices wrap.

use serde::{Deserialize, Serialize};

/// Playable character archetypes
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum CharacterType {
    Snowboarder,
    Skier,
}

impl CharacterType {
    pub fn as_str(&self) -> &'static str {
        match self {
            CharacterType::Snowboarder => "Snowboarder",
            CharacterType::Skier => "Skier",
        }
    }
}

/// Trail difficulty grades
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Difficulty {
    Green,
    Blue,
    Black,
    DoubleBlack,
}

impl Difficulty {
    pub fn as_str(&self) -> &'static str {
        match self {
            Difficulty::Green => "Green Circle",
            Difficulty::Blue => "Blue Square",
            Difficulty::Black => "Black Diamond",
            Difficulty::DoubleBlack => "Double Black",
        }
    }
}

/// A snowboard or pair of skis. All bonuses are multipliers; 1.0 = neutral.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Equipment {
    pub id: &'static str,
    pub name: &'static str,
    pub brand: &'static str,
    /// Multiplier on effective downhill speed
    pub speed_bonus: f32,
    /// Multiplier on the per-swipe lane step
    pub turn_bonus: f32,
    /// Multiplier on awarded trick points
    pub trick_bonus: f32,
}

pub const SNOWBOARDS: [Equipment; 6] = [
    Equipment {
        id: "board_rookie",
        name: "Rookie Rider",
        brand: "Alpine Co.",
        speed_bonus: 1.0,
        turn_bonus: 1.1,
        trick_bonus: 1.0,
    },
    Equipment {
        id: "board_velocity",
        name: "Velocity Pro",
        brand: "ShredTech",
        speed_bonus: 1.15,
        turn_bonus: 0.95,
        trick_bonus: 1.0,
    },
    Equipment {
        id: "board_trickster",
        name: "Trickster 360",
        brand: "FreeStyle Labs",
        speed_bonus: 0.95,
        turn_bonus: 1.05,
        trick_bonus: 1.25,
    },
    Equipment {
        id: "board_stealth",
        name: "Stealth Carbon",
        brand: "Apex",
        speed_bonus: 1.1,
        turn_bonus: 1.1,
        trick_bonus: 1.05,
    },
    Equipment {
        id: "board_retro",
        name: "Retro Cruiser",
        brand: "OldSchool",
        speed_bonus: 1.0,
        turn_bonus: 1.0,
        trick_bonus: 1.1,
    },
    Equipment {
        id: "board_powder",
        name: "Powder Surfer",
        brand: "DeepSnow",
        speed_bonus: 1.05,
        turn_bonus: 1.15,
        trick_bonus: 1.0,
    },
];

pub const SKIS: [Equipment; 6] = [
    Equipment {
        id: "ski_allround",
        name: "All-Mountain 88",
        brand: "Alpine Co.",
        speed_bonus: 1.0,
        turn_bonus: 1.1,
        trick_bonus: 1.0,
    },
    Equipment {
        id: "ski_racer",
        name: "GS Racer",
        brand: "SpeedLine",
        speed_bonus: 1.2,
        turn_bonus: 0.9,
        trick_bonus: 0.9,
    },
    Equipment {
        id: "ski_park",
        name: "Park Twin",
        brand: "FreeStyle Labs",
        speed_bonus: 0.95,
        turn_bonus: 1.05,
        trick_bonus: 1.3,
    },
    Equipment {
        id: "ski_backcountry",
        name: "Backcountry 110",
        brand: "WildPeak",
        speed_bonus: 1.05,
        turn_bonus: 1.15,
        trick_bonus: 1.0,
    },
    Equipment {
        id: "ski_slalom",
        name: "Slalom SL",
        brand: "SpeedLine",
        speed_bonus: 1.05,
        turn_bonus: 1.25,
        trick_bonus: 0.95,
    },
    Equipment {
        id: "ski_powder",
        name: "Fat Boy 120",
        brand: "DeepSnow",
        speed_bonus: 1.0,
        turn_bonus: 1.0,
        trick_bonus: 1.1,
    },
];

/// A resort shapes spawn density, speed, and track width for a whole run.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Resort {
    pub id: &'static str,
    pub name: &'static str,
    pub location: &'static str,
    pub difficulty: Difficulty,
    /// Snowfall particle intensity hint for the renderer
    pub snow_intensity: f32,
    pub speed_multiplier: f32,
    pub obstacle_multiplier: f32,
    /// Track width scale
    pub width_multiplier: f32,
}

pub const RESORTS: [Resort; 6] = [
    Resort {
        id: "alpine_meadows",
        name: "Alpine Meadows",
        location: "Colorado, USA",
        difficulty: Difficulty::Green,
        snow_intensity: 0.8,
        speed_multiplier: 0.85,
        obstacle_multiplier: 0.7,
        width_multiplier: 1.3,
    },
    Resort {
        id: "pine_valley",
        name: "Pine Valley",
        location: "Vermont, USA",
        difficulty: Difficulty::Blue,
        snow_intensity: 1.0,
        speed_multiplier: 1.0,
        obstacle_multiplier: 1.0,
        width_multiplier: 1.0,
    },
    Resort {
        id: "summit_peak",
        name: "Summit Peak",
        location: "Whistler, Canada",
        difficulty: Difficulty::Blue,
        snow_intensity: 1.2,
        speed_multiplier: 1.05,
        obstacle_multiplier: 1.0,
        width_multiplier: 1.1,
    },
    Resort {
        id: "thunder_bowl",
        name: "Thunder Bowl",
        location: "Chamonix, France",
        difficulty: Difficulty::Black,
        snow_intensity: 1.5,
        speed_multiplier: 1.15,
        obstacle_multiplier: 1.3,
        width_multiplier: 0.85,
    },
    Resort {
        id: "glacier_extreme",
        name: "Glacier Extreme",
        location: "Zermatt, Switzerland",
        difficulty: Difficulty::DoubleBlack,
        snow_intensity: 2.0,
        speed_multiplier: 1.3,
        obstacle_multiplier: 1.6,
        width_multiplier: 0.75,
    },
    Resort {
        id: "sakura_slopes",
        name: "Sakura Slopes",
        location: "Niseko, Japan",
        difficulty: Difficulty::Blue,
        snow_intensity: 1.8,
        speed_multiplier: 0.95,
        obstacle_multiplier: 0.9,
        width_multiplier: 1.05,
    },
];

/// Look up a resort by index (wrapping)
pub fn resort(index: usize) -> &'static Resort {
    &RESORTS[index % RESORTS.len()]
}

/// Look up a snowboard by index (wrapping)
pub fn snowboard(index: usize) -> &'static Equipment {
    &SNOWBOARDS[index % SNOWBOARDS.len()]
}

/// Look up a pair of skis by index (wrapping)
pub fn ski(index: usize) -> &'static Equipment {
    &SKIS[index % SKIS.len()]
}

/// The equipment catalog a character draws from
pub fn equipment_for(character: CharacterType, index: usize) -> &'static Equipment {
    match character {
        CharacterType::Snowboarder => snowboard(index),
        CharacterType::Skier => ski(index),
    }
}
