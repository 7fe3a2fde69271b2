//! Entity Spawn Configuration: рецепты, запросы на spawn, уровни

pub mod factory;
pub mod level;

pub use factory::{
    snapped_position, spawn_entity, spawn_requested_entities, SpawnData, SpawnError, SpawnRecipe, SpawnRequest,
    SpritePath,
};
pub use level::{spawn_level, Level, LevelError, LevelSpawn};
