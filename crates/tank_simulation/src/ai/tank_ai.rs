//! Enemy Behavior: случайное блуждание с анти-downward bias
//!
//! Порядок случайных бросков за тик (детерминизм зависит от него):
//! 1. если едем Up: бросок 0..1000 > 880 → любое направление
//! 2. иначе: бросок 0..1000 > 980 → любое направление кроме Down
//! 3. движение; на каждый блок: 60% выстрел, 30% новое направление
//!    и повторное движение в том же тике
//! 4. бросок 0..1000 > 980 → попытка выстрела

use bevy::prelude::*;
use rand::Rng;
use std::time::Duration;
use crate::combat::{bullet_request, ShootTimer, ENEMY_MUZZLE_OFFSET};
use crate::components::{EntityKind, Heading, Hitbox};
use crate::config::{AiTuning, GameConfig};
use crate::direction::Direction;
use crate::physics::{gather_obstacles, steer_and_move, ENEMY_OBSTACLES};
use crate::spawn::SpawnRequest;
use crate::DeterministicRng;

/// Предел повторных движений после блока за один тик
pub const MAX_BLOCKED_REACTIONS: usize = 8;

/// AI вражеского танка
#[derive(Component, Debug, Clone, Copy, Default, PartialEq, Reflect)]
#[reflect(Component)]
pub struct EnemyAi {
    /// None = ещё не активирован (направление выберется на первом тике)
    pub direction: Option<Direction>,
    pub shoot_timer: ShootTimer,
}

/// Двухуровневая политика смены направления
pub fn choose_direction<R: Rng + ?Sized>(current: Direction, rng: &mut R, tuning: &AiTuning) -> Direction {
    if current == Direction::Up && rng.gen_range(0..1000) > tuning.turn_while_up_threshold {
        Direction::random(rng)
    } else if rng.gen_range(0..1000) > tuning.turn_threshold {
        Direction::random_except(rng, Direction::Down)
    } else {
        current
    }
}

/// Спонтанный выстрел (2%)
pub fn wants_to_shoot<R: Rng + ?Sized>(rng: &mut R, tuning: &AiTuning) -> bool {
    rng.gen_range(0..1000) > tuning.shoot_threshold
}

fn try_shoot(
    ai: &mut EnemyAi,
    entity: Entity,
    center: Vec2,
    now: Duration,
    cooldown: Duration,
    spawn_requests: &mut EventWriter<SpawnRequest>,
) {
    let Some(direction) = ai.direction else {
        return;
    };
    if !ai.shoot_timer.try_fire(now, cooldown) {
        return;
    }

    spawn_requests.write(bullet_request(center, ENEMY_MUZZLE_OFFSET, direction, entity, EntityKind::Enemy));
}

/// Система: тик AI всех врагов (в порядке Entity для детерминизма)
pub fn enemy_ai_tick(
    mut enemies: Query<(Entity, &mut EnemyAi, &mut Heading)>,
    mut bodies: Query<(Entity, &EntityKind, &mut Transform, &Hitbox)>,
    mut rng: ResMut<DeterministicRng>,
    config: Res<GameConfig>,
    time: Res<Time<Fixed>>,
    mut spawn_requests: EventWriter<SpawnRequest>,
) {
    let rng = &mut rng.rng;
    let tuning = &config.ai;
    let speed = time.delta_secs() * config.tank_speed;
    let now = time.elapsed();
    let cooldown = Duration::from_secs_f32(config.shoot_cooldown);

    let mut order: Vec<Entity> = enemies.iter().map(|(entity, _, _)| entity).collect();
    order.sort();

    for entity in order {
        let Ok((_, mut ai, mut heading)) = enemies.get_mut(entity) else {
            continue;
        };

        let current = match ai.direction {
            Some(direction) => direction,
            None => Direction::random(rng),
        };
        let mut direction = choose_direction(current, rng, tuning);
        ai.direction = Some(direction);

        for _ in 0..=MAX_BLOCKED_REACTIONS {
            let obstacles = gather_obstacles(entity, ENEMY_OBSTACLES, bodies.iter());
            let Ok((_, _, mut transform, hitbox)) = bodies.get_mut(entity) else {
                break;
            };

            let outcome = steer_and_move(&mut transform, &mut heading, hitbox, direction, speed, &obstacles);
            if !outcome.blocked {
                break;
            }

            // Реакции на блок независимы друг от друга
            if rng.gen_bool(tuning.blocked_shoot_chance) {
                let center = hitbox.center(transform.translation.truncate());
                try_shoot(&mut ai, entity, center, now, cooldown, &mut spawn_requests);
            }
            if !rng.gen_bool(tuning.blocked_turn_chance) {
                break;
            }
            direction = Direction::random(rng);
            ai.direction = Some(direction);
        }

        if wants_to_shoot(rng, tuning) {
            if let Ok((_, _, transform, hitbox)) = bodies.get(entity) {
                let center = hitbox.center(transform.translation.truncate());
                try_shoot(&mut ai, entity, center, now, cooldown, &mut spawn_requests);
            }
        }
    }
}
