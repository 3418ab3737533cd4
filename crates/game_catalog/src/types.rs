// crates/game_catalog/src/types.rs
use glam::Vec2;
use serde::{Deserialize, Serialize};

use gamedata_core::Indexed;

/// Enemy identity. `Unspecified` is the default and therefore the sentinel:
/// rows carrying it stay in the roster but never enter the lookup map.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum EnemyClass {
    #[default]
    Unspecified,
    Grunt,
    Archer,
    Brute,
}

/// Per-class tuning payload shared by every spawned enemy of the class.
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
pub struct EnemyArchetype {
    pub max_health: f32,
    pub speed: f32,
    pub spawn_offset: Vec2,
}

impl Default for EnemyArchetype {
    fn default() -> Self {
        Self {
            max_health: 100.0,
            speed: 40.0,
            spawn_offset: Vec2::ZERO,
        }
    }
}

/// Authored roster row: one enemy class with its display data and archetype.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct EnemyDef {
    pub class: EnemyClass,
    pub display_name: String,
    pub archetype: EnemyArchetype,
}

impl EnemyDef {
    pub fn new(class: EnemyClass, display_name: &str, archetype: EnemyArchetype) -> Self {
        Self {
            class,
            display_name: display_name.to_string(),
            archetype,
        }
    }
}

impl Indexed for EnemyDef {
    type Index = EnemyClass;

    fn index(&self) -> EnemyClass {
        self.class
    }
}
