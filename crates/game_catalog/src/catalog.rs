// crates/game_catalog/src/catalog.rs
use serde::{Deserialize, Serialize};
use thiserror::Error;

use gamedata_cache::{CacheContext, Instance, InstanceError};
use gamedata_core::{Key, KeyedTable, Registry, RegistryError};

use crate::types::{EnemyArchetype, EnemyClass, EnemyDef};

/// A live enemy built from the catalog. Its archetype payload is shared or
/// private depending on the context policy at spawn time.
pub type Enemy = Instance<EnemyClass, EnemyArchetype>;

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum CatalogError {
    #[error(transparent)]
    Roster(#[from] RegistryError<EnemyClass>),
    #[error(transparent)]
    Spawn(#[from] InstanceError<EnemyClass>),
}

/// Authored game data: the enemy roster plus a score overlay keyed by class.
///
/// Only the ordered sequences are persisted; lookup maps rebuild on the
/// first access after `load`.
#[derive(Clone, Serialize, Deserialize)]
pub struct EnemyCatalog {
    enemies: Registry<EnemyDef>,
    score_values: KeyedTable<EnemyClass, u32>,
}

impl EnemyCatalog {
    pub fn new() -> Self {
        Self {
            enemies: Registry::new(),
            score_values: KeyedTable::new(),
        }
    }

    /// Adds a roster row; the class must not be defined yet.
    pub fn define(&mut self, def: EnemyDef) -> Result<(), CatalogError> {
        self.enemies.add(def)?;
        Ok(())
    }

    pub fn definition(&mut self, class: EnemyClass) -> Result<&EnemyDef, CatalogError> {
        Ok(self.enemies.get(&class)?)
    }

    pub fn enemies(&self) -> &Registry<EnemyDef> {
        &self.enemies
    }

    pub fn enemies_mut(&mut self) -> &mut Registry<EnemyDef> {
        &mut self.enemies
    }

    pub fn set_score(&mut self, class: EnemyClass, score: u32) {
        self.score_values.insert(Key(class), score);
    }

    pub fn score(&mut self, class: EnemyClass) -> u32 {
        self.score_values.try_value(&class).copied().unwrap_or(0)
    }

    /// Registers the class archetype as the canonical template, then builds
    /// a live enemy through the context policy.
    pub fn spawn(
        &mut self,
        context: &mut CacheContext,
        class: EnemyClass,
    ) -> Result<Enemy, CatalogError> {
        let archetype = self.enemies.get(&class)?.archetype;
        let enemy = Instance::new(context, class, Some(&archetype))?;
        Ok(enemy)
    }

    pub fn save(&self) -> Result<Vec<u8>, bincode::Error> {
        bincode::serialize(self)
    }

    pub fn load(bytes: &[u8]) -> Result<Self, bincode::Error> {
        bincode::deserialize(bytes)
    }
}

impl Default for EnemyCatalog {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use glam::Vec2;

    fn sample() -> EnemyCatalog {
        let mut catalog = EnemyCatalog::new();
        catalog
            .define(EnemyDef::new(
                EnemyClass::Grunt,
                "Grunt",
                EnemyArchetype {
                    max_health: 80.0,
                    speed: 55.0,
                    spawn_offset: Vec2::new(0.0, 12.0),
                },
            ))
            .unwrap();
        catalog
            .define(EnemyDef::new(
                EnemyClass::Brute,
                "Brute",
                EnemyArchetype {
                    max_health: 400.0,
                    speed: 15.0,
                    spawn_offset: Vec2::ZERO,
                },
            ))
            .unwrap();
        catalog.set_score(EnemyClass::Grunt, 10);
        catalog.set_score(EnemyClass::Brute, 120);
        catalog
    }

    #[test]
    fn duplicate_definition_is_rejected() {
        let mut catalog = sample();
        let result = catalog.define(EnemyDef::new(
            EnemyClass::Grunt,
            "Grunt again",
            EnemyArchetype::default(),
        ));
        assert!(matches!(
            result,
            Err(CatalogError::Roster(RegistryError::DuplicateIndex(
                EnemyClass::Grunt
            )))
        ));
    }

    #[test]
    fn round_trip_preserves_order_and_rebuilds_lazily() {
        let bytes = sample().save().unwrap();
        let mut loaded = EnemyCatalog::load(&bytes).unwrap();

        // Order of the persisted sequence is intact...
        let names: Vec<_> = loaded
            .enemies()
            .iter()
            .map(|def| def.display_name.clone())
            .collect();
        assert_eq!(names, vec!["Grunt", "Brute"]);

        // ...and the first lookup rebuilds the map that was never persisted.
        assert_eq!(loaded.enemies_mut().rebuild_stats().full, 0);
        assert_eq!(
            loaded.definition(EnemyClass::Brute).unwrap().display_name,
            "Brute"
        );
        assert_eq!(loaded.enemies_mut().rebuild_stats().full, 1);

        assert_eq!(loaded.score(EnemyClass::Brute), 120);
    }

    #[test]
    fn spawns_share_the_class_archetype() {
        let mut catalog = sample();
        let mut context = CacheContext::new();

        let first = catalog.spawn(&mut context, EnemyClass::Grunt).unwrap();
        let second = catalog.spawn(&mut context, EnemyClass::Grunt).unwrap();
        assert!(first.is_shared());
        assert_eq!(first.template(), second.template());

        // Re-tuning the class through the shard reaches every live enemy.
        let buffed = EnemyArchetype {
            max_health: 999.0,
            ..first.template()
        };
        context
            .shard::<EnemyClass, EnemyArchetype>()
            .register_template(EnemyClass::Grunt, &buffed);
        assert_eq!(first.template(), buffed);
        assert_eq!(second.template(), buffed);
    }

    #[test]
    fn spawning_an_undefined_class_fails() {
        let mut catalog = sample();
        let mut context = CacheContext::new();

        let result = catalog.spawn(&mut context, EnemyClass::Archer);
        assert!(matches!(
            result,
            Err(CatalogError::Roster(RegistryError::NotFound(
                EnemyClass::Archer
            )))
        ));
    }
}
