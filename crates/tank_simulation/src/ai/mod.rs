//! AI module: поведение вражеских танков
//!
//! Все случайные решения берутся из DeterministicRng resource,
//! поэтому одинаковый seed даёт одинаковые траектории врагов.

pub mod tank_ai;

pub use tank_ai::{choose_direction, enemy_ai_tick, wants_to_shoot, EnemyAi, MAX_BLOCKED_REACTIONS};
