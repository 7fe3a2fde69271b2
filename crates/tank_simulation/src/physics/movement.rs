//! Movement Resolver — пошаговое перемещение танков с проверкой коллизий
//!
//! Алгоритм:
//! - steps = round(speed), каждый шаг — 1 юнит вдоль direction
//! - после шага: overlap-тест против всех препятствий snapshot'а
//! - первый overlap → откат этого шага и стоп
//!
//! Шаг в 1 юнит ограничивает смещение за тик, танк не проскакивает стены.
//! Стоимость: O(steps × obstacles) AABB-тестов на танк за тик.

use bevy::prelude::*;
use crate::components::{EntityKind, Hitbox};
use crate::direction::Direction;

/// Какие типы считаются препятствиями для конкретного mover'а
pub type ObstacleSet = &'static [EntityKind];

/// Игрок упирается во врагов, стены и аптечки
pub const PLAYER_OBSTACLES: ObstacleSet = &[EntityKind::Enemy, EntityKind::Wall, EntityKind::HealthPack];

/// Враг упирается в игрока, стены и аптечки (но не в других врагов)
pub const ENEMY_OBSTACLES: ObstacleSet = &[EntityKind::Player, EntityKind::Wall, EntityKind::HealthPack];

/// Результат одного move вызова
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct MoveOutcome {
    /// Итоговое смещение (сумма принятых шагов)
    pub offset: Vec2,
    /// Сколько шагов принято
    pub steps_taken: u32,
    /// true = упёрлись в препятствие (последний шаг откатили)
    pub blocked: bool,
}

/// Строгий overlap (открытые интервалы): касание рёбрами не блокирует
pub fn boxes_overlap(a: &Rect, b: &Rect) -> bool {
    a.min.x < b.max.x && a.max.x > b.min.x && a.min.y < b.max.y && a.max.y > b.min.y
}

/// Число единичных шагов для скорости за тик
pub fn step_count(speed: f32) -> u32 {
    if speed.is_finite() && speed > 0.0 {
        speed.round() as u32
    } else {
        0
    }
}

/// Пошаговое разрешение движения
///
/// `bounds` — текущий AABB mover'а, `obstacles` — snapshot препятствий
/// (без самого mover'а), снятый в начале вызова.
pub fn resolve_move(bounds: Rect, direction: Direction, speed: f32, obstacles: &[Rect]) -> MoveOutcome {
    let step = direction.vector();
    let steps = step_count(speed);

    let mut offset = Vec2::ZERO;
    let mut steps_taken = 0;

    for _ in 0..steps {
        let candidate = offset + step;
        let moved = Rect::from_corners(bounds.min + candidate, bounds.max + candidate);

        if obstacles.iter().any(|obstacle| boxes_overlap(&moved, obstacle)) {
            // Откат шага = просто не принимаем candidate
            return MoveOutcome { offset, steps_taken, blocked: true };
        }

        offset = candidate;
        steps_taken += 1;
    }

    MoveOutcome { offset, steps_taken, blocked: false }
}

/// Свежий snapshot препятствий для одного move вызова
///
/// Фильтр по `obstacle_kinds`, сам mover исключается.
pub fn gather_obstacles<'a>(
    mover: Entity,
    obstacle_kinds: ObstacleSet,
    candidates: impl IntoIterator<Item = (Entity, &'a EntityKind, &'a Transform, &'a Hitbox)>,
) -> Vec<Rect> {
    candidates
        .into_iter()
        .filter(|(entity, kind, _, _)| *entity != mover && obstacle_kinds.contains(*kind))
        .map(|(_, _, transform, hitbox)| hitbox.bounds(transform.translation.truncate()))
        .collect()
}

/// Применить rotation + move к entity (общая логика игрока и врага)
///
/// Меняет Transform и Heading, возвращает результат resolver'а.
pub fn steer_and_move(
    transform: &mut Transform,
    heading: &mut crate::components::Heading,
    hitbox: &Hitbox,
    direction: Direction,
    speed: f32,
    obstacles: &[Rect],
) -> MoveOutcome {
    heading.degrees = direction.rotation_degrees();

    let bounds = hitbox.bounds(transform.translation.truncate());
    let outcome = resolve_move(bounds, direction, speed, obstacles);
    transform.translation += outcome.offset.extend(0.0);
    outcome
}
