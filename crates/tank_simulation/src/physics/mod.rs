//! Physics module
//!
//! Без физического движка: AABB-тесты вручную.
//! - movement: пошаговый resolver движения танков
//! - contacts: collision-begin события для правил

pub mod contacts;
pub mod movement;

// Re-export основных типов
pub use contacts::{detect_contacts, ActiveContacts, ContactStarted};
pub use movement::{
    gather_obstacles, resolve_move, steer_and_move, MoveOutcome, ObstacleSet, ENEMY_OBSTACLES,
    PLAYER_OBSTACLES,
};
