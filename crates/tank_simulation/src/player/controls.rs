//! Player Behavior: движение и стрельба по командам хоста
//!
//! Хост (клавиатура W/S/A/D, стрелки, Space/F) шлёт `PlayerAction` events.
//! Инварианты:
//! - не более одного принятого движения за тик (флаг сбрасывается в начале тика)
//! - стрельба не зависит от флага движения, только от cooldown
//! - после game over все команды отбрасываются

use bevy::prelude::*;
use std::time::Duration;
use crate::combat::{bullet_request, ShootTimer, PLAYER_MUZZLE_OFFSET};
use crate::components::{EntityKind, Heading, Hitbox};
use crate::config::GameConfig;
use crate::direction::Direction;
use crate::game_state::GameStats;
use crate::physics::{gather_obstacles, steer_and_move, PLAYER_OBSTACLES};
use crate::spawn::SpawnRequest;

/// Танк под управлением игрока
#[derive(Component, Debug, Clone, Copy, PartialEq, Reflect)]
#[reflect(Component)]
pub struct PlayerTank {
    /// Текущее направление (в нём летят пули)
    pub direction: Direction,
    /// Движение на этом тике уже принято
    pub moved_this_tick: bool,
    pub shoot_timer: ShootTimer,
}

impl Default for PlayerTank {
    fn default() -> Self {
        Self {
            direction: Direction::Up,
            moved_this_tick: false,
            shoot_timer: ShootTimer::new(),
        }
    }
}

impl PlayerTank {
    /// Принять движение, если на этом тике ещё не двигались
    pub fn try_begin_move(&mut self, direction: Direction) -> bool {
        if self.moved_this_tick {
            return false;
        }
        self.moved_this_tick = true;
        self.direction = direction;
        true
    }
}

/// Команда игрока (от input bindings хоста)
#[derive(Event, Debug, Clone, Copy, PartialEq, Eq)]
pub enum PlayerAction {
    Move(Direction),
    Shoot,
}

/// Система: сброс флага движения в начале тика
pub fn reset_player_move_flag(mut players: Query<&mut PlayerTank>) {
    for mut tank in players.iter_mut() {
        tank.moved_this_tick = false;
    }
}

/// Система: применить накопленные PlayerAction
pub fn apply_player_actions(
    mut actions: EventReader<PlayerAction>,
    mut players: Query<(Entity, &mut PlayerTank, &mut Heading)>,
    mut bodies: Query<(Entity, &EntityKind, &mut Transform, &Hitbox)>,
    stats: Res<GameStats>,
    config: Res<GameConfig>,
    time: Res<Time<Fixed>>,
    mut spawn_requests: EventWriter<SpawnRequest>,
) {
    if stats.game_over {
        actions.clear();
        return;
    }

    let speed = time.delta_secs() * config.tank_speed;
    let now = time.elapsed();
    let cooldown = Duration::from_secs_f32(config.shoot_cooldown);

    for action in actions.read() {
        for (entity, mut tank, mut heading) in players.iter_mut() {
            match *action {
                PlayerAction::Move(direction) => {
                    if !tank.try_begin_move(direction) {
                        continue;
                    }

                    let obstacles = gather_obstacles(entity, PLAYER_OBSTACLES, bodies.iter());
                    let Ok((_, _, mut transform, hitbox)) = bodies.get_mut(entity) else {
                        continue;
                    };
                    steer_and_move(&mut transform, &mut heading, hitbox, direction, speed, &obstacles);
                }

                PlayerAction::Shoot => {
                    let Ok((_, _, transform, hitbox)) = bodies.get(entity) else {
                        continue;
                    };
                    if !tank.shoot_timer.try_fire(now, cooldown) {
                        continue;
                    }

                    let center = hitbox.center(transform.translation.truncate());
                    spawn_requests.write(bullet_request(
                        center,
                        PLAYER_MUZZLE_OFFSET,
                        tank.direction,
                        entity,
                        EntityKind::Player,
                    ));
                }
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_player_starts_facing_up() {
        let tank = PlayerTank::default();
        assert_eq!(tank.direction, Direction::Up);
        assert!(!tank.moved_this_tick);
    }

    #[test]
    fn test_only_first_move_per_tick_accepted() {
        let mut tank = PlayerTank::default();

        assert!(tank.try_begin_move(Direction::Left));
        assert!(!tank.try_begin_move(Direction::Right));
        assert!(!tank.try_begin_move(Direction::Down));
        assert_eq!(tank.direction, Direction::Left);

        tank.moved_this_tick = false;
        assert!(tank.try_begin_move(Direction::Down));
        assert_eq!(tank.direction, Direction::Down);
    }
}
