//! Combat: стрельба, пули, правила столкновений, эффекты
//!
//! ECS ответственность:
//! - Cooldown выстрелов (ShootTimer)
//! - Полёт пуль и их удаление за ареной
//! - Collision Response Rules: урон, лечение, счёт, game over
//! - Транзиентные эффекты (explosion/heal) с таймером деспавна
//!
//! Хост ответственность: анимации эффектов, звук.

pub mod cooldown;
pub mod effects;
pub mod projectile;
pub mod rules;

// Re-export основных типов
pub use cooldown::ShootTimer;
pub use effects::{despawn_after_timeout, DespawnAfter, VisualEffect};
pub use projectile::{
    bullet_request, despawn_out_of_bounds, move_projectiles, Projectile, ENEMY_MUZZLE_OFFSET, PLAYER_MUZZLE_OFFSET,
};
pub use rules::{apply_collision_rules, CollisionRule, PlayerHit};
