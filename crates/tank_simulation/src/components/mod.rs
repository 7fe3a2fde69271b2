//! ECS Components для игровых entity
//!
//! Организация по доменам:
//! - actor: тип entity, здоровье, hitbox, поворот, коллизии
//!
//! Поведенческие компоненты живут рядом со своими системами:
//! PlayerTank — player, EnemyAi — ai, Projectile/DespawnAfter — combat.

pub mod actor;

// Re-exports для удобного импорта
pub use actor::*;
