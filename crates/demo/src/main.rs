// crates/demo/src/main.rs
use tracing::info;

use game_catalog::{EnemyArchetype, EnemyCatalog, EnemyClass, EnemyDef};
use gamedata_cache::CacheContext;

fn main() {
    tracing_subscriber::fmt().init();

    let mut catalog = EnemyCatalog::new();
    catalog
        .define(EnemyDef::new(
            EnemyClass::Grunt,
            "Grunt",
            EnemyArchetype {
                max_health: 80.0,
                speed: 55.0,
                ..Default::default()
            },
        ))
        .expect("fresh catalog cannot hold duplicates");
    catalog
        .define(EnemyDef::new(
            EnemyClass::Brute,
            "Brute",
            EnemyArchetype {
                max_health: 400.0,
                speed: 15.0,
                ..Default::default()
            },
        ))
        .expect("fresh catalog cannot hold duplicates");
    catalog.set_score(EnemyClass::Brute, 120);

    let mut context = CacheContext::new();

    // Sharing on (the default): both grunts observe one cached archetype.
    let first = catalog
        .spawn(&mut context, EnemyClass::Grunt)
        .expect("grunt is defined");
    let second = catalog
        .spawn(&mut context, EnemyClass::Grunt)
        .expect("grunt is defined");
    info!(
        shared = first.is_shared(),
        health = f64::from(first.template().max_health),
        "spawned two grunts"
    );
    assert_eq!(first.template(), second.template());

    // Sharing off: each brute owns a private copy of its archetype.
    context.set_sharing_enabled(false);
    let lone = catalog
        .spawn(&mut context, EnemyClass::Brute)
        .expect("brute is defined");
    info!(
        shared = lone.is_shared(),
        score = catalog.score(EnemyClass::Brute),
        "spawned a lone brute"
    );

    context.clear_all();
    info!(shards = context.shard_count(), "cache cleared");
}
