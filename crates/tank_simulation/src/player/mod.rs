//! Player control module
//!
//! Танк игрока получает команды от input систем хоста через PlayerAction.
//! AI systems обслуживают только entities с EnemyAi.

pub mod controls;

pub use controls::{apply_player_actions, reset_player_move_flag, PlayerAction, PlayerTank};
