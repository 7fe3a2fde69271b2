//! Детекция контактов (collision begin) между collidable entities
//!
//! Контакт = пересечение AABB по замкнутым интервалам: касание рёбрами
//! тоже контакт. Танк, упёршийся в аптечку, стоит к ней вплотную и
//! должен её подобрать.
//!
//! Событие генерируется только на первом тике контакта. Пока пара
//! продолжает пересекаться, повторных событий нет.

use bevy::prelude::*;
use std::collections::HashSet;
use crate::components::{Collidable, EntityKind, Hitbox};

/// Событие: два entity начали касаться
///
/// Пара каноническая: `a < b` по Entity.
#[derive(Event, Debug, Clone, Copy, PartialEq)]
pub struct ContactStarted {
    pub a: Entity,
    pub a_kind: EntityKind,
    pub b: Entity,
    pub b_kind: EntityKind,
}

/// Пары, находившиеся в контакте на прошлом тике
#[derive(Resource, Debug, Default)]
pub struct ActiveContacts {
    pairs: HashSet<(Entity, Entity)>,
}

impl ActiveContacts {
    pub fn contains(&self, a: Entity, b: Entity) -> bool {
        self.pairs.contains(&canonical_pair(a, b))
    }

    pub fn len(&self) -> usize {
        self.pairs.len()
    }

    pub fn is_empty(&self) -> bool {
        self.pairs.is_empty()
    }
}

pub fn canonical_pair(a: Entity, b: Entity) -> (Entity, Entity) {
    if a <= b {
        (a, b)
    } else {
        (b, a)
    }
}

/// Пересечение по замкнутым интервалам (касание считается)
pub fn boxes_touch(a: &Rect, b: &Rect) -> bool {
    a.min.x <= b.max.x && a.max.x >= b.min.x && a.min.y <= b.max.y && a.max.y >= b.min.y
}

/// Игнорирует ли одна сторона пары другую
fn ignores(collidable: &Collidable, other_kind: EntityKind) -> bool {
    collidable.ignored_kind == Some(other_kind)
}

/// Система: обновить ActiveContacts и выпустить ContactStarted для новых пар
///
/// O(n²) по collidable entities — на арене их десятки.
pub fn detect_contacts(
    bodies: Query<(Entity, &EntityKind, &Transform, &Hitbox, &Collidable)>,
    mut active: ResMut<ActiveContacts>,
    mut started_events: EventWriter<ContactStarted>,
) {
    let snapshot: Vec<(Entity, EntityKind, Rect, Collidable)> = bodies
        .iter()
        .map(|(entity, kind, transform, hitbox, collidable)| {
            (entity, *kind, hitbox.bounds(transform.translation.truncate()), *collidable)
        })
        .collect();

    let mut current = HashSet::new();
    let mut started = Vec::new();

    for (i, (entity_a, kind_a, bounds_a, collidable_a)) in snapshot.iter().enumerate() {
        for (entity_b, kind_b, bounds_b, collidable_b) in snapshot.iter().skip(i + 1) {
            if ignores(collidable_a, *kind_b) || ignores(collidable_b, *kind_a) {
                continue;
            }
            if !boxes_touch(bounds_a, bounds_b) {
                continue;
            }

            let pair = canonical_pair(*entity_a, *entity_b);
            if !active.pairs.contains(&pair) {
                let (a_kind, b_kind) = if pair.0 == *entity_a { (*kind_a, *kind_b) } else { (*kind_b, *kind_a) };
                started.push(ContactStarted { a: pair.0, a_kind, b: pair.1, b_kind });
            }
            current.insert(pair);
        }
    }

    // Детерминированный порядок обработки правил
    started.sort_by_key(|contact| (contact.a, contact.b));
    for contact in started {
        started_events.write(contact);
    }

    active.pairs = current;
}
