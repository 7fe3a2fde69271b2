//! Пули: прямолинейный полёт без sub-steps
//!
//! Пуля не использует Movement Resolver: скорость постоянна (350 u/s),
//! попадания ловит detect_contacts. Вылетевшая за арену пуля удаляется.

use bevy::prelude::*;
use crate::components::{EntityKind, Hitbox};
use crate::config::GameConfig;
use crate::direction::Direction;
use crate::physics::movement::boxes_overlap;
use crate::spawn::{SpawnData, SpawnRecipe, SpawnRequest};

/// Смещение точки вылета пули от центра танка игрока
pub const PLAYER_MUZZLE_OFFSET: Vec2 = Vec2::new(-4.0, -4.5);

/// Смещение точки вылета пули от центра вражеского танка
pub const ENEMY_MUZZLE_OFFSET: Vec2 = Vec2::new(-4.0, -4.0);

/// Запрос на spawn пули из танка
///
/// `center` — центр hitbox стрелка, пуля летит по `direction`
/// и не сталкивается с entities типа `owner_kind`.
pub fn bullet_request(
    center: Vec2,
    muzzle_offset: Vec2,
    direction: Direction,
    owner: Entity,
    owner_kind: EntityKind,
) -> SpawnRequest {
    SpawnRequest::new(
        SpawnRecipe::Bullet,
        SpawnData::at(center + muzzle_offset)
            .with_direction(direction.vector())
            .with_owner(owner, owner_kind),
    )
}

/// Projectile компонент
#[derive(Component, Debug, Clone, Copy, PartialEq, Reflect)]
#[reflect(Component)]
pub struct Projectile {
    /// Скорость (юнитов/сек), direction × bullet_speed
    pub velocity: Vec2,
    /// Кто выстрелил
    pub owner: Entity,
}

/// Система: position += velocity × dt
pub fn move_projectiles(
    mut projectiles: Query<(&Projectile, &mut Transform)>,
    time: Res<Time<Fixed>>,
) {
    let delta = time.delta_secs();

    for (projectile, mut transform) in projectiles.iter_mut() {
        transform.translation += (projectile.velocity * delta).extend(0.0);
    }
}

/// Система: удалить пули, полностью покинувшие арену
pub fn despawn_out_of_bounds(
    mut commands: Commands,
    projectiles: Query<(Entity, &Transform, &Hitbox), With<Projectile>>,
    config: Res<GameConfig>,
) {
    let arena = config.arena_bounds();

    for (entity, transform, hitbox) in projectiles.iter() {
        let bounds = hitbox.bounds(transform.translation.truncate());
        if !boxes_overlap(&bounds, &arena) {
            if let Ok(mut entity_commands) = commands.get_entity(entity) {
                entity_commands.despawn();
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_bullet_inside_arena_overlaps() {
        let arena = GameConfig::default().arena_bounds();
        let hitbox = Hitbox::new(Vec2::new(8.0, 8.0));

        assert!(boxes_overlap(&hitbox.bounds(Vec2::new(100.0, 100.0)), &arena));
        // Частично за краем — ещё на арене
        assert!(boxes_overlap(&hitbox.bounds(Vec2::new(-4.0, 100.0)), &arena));
        // Полностью за краем
        assert!(!boxes_overlap(&hitbox.bounds(Vec2::new(-8.0, 100.0)), &arena));
        assert!(!boxes_overlap(&hitbox.bounds(Vec2::new(100.0, 960.0)), &arena));
    }

    #[test]
    fn test_bullet_request_carries_owner_and_direction() {
        let owner = Entity::from_raw(5);
        let request = bullet_request(
            Vec2::new(116.0, 115.0),
            PLAYER_MUZZLE_OFFSET,
            Direction::Left,
            owner,
            EntityKind::Player,
        );

        assert_eq!(request.recipe, SpawnRecipe::Bullet);
        assert_eq!(request.data.position, Vec2::new(112.0, 110.5));
        assert_eq!(request.data.direction, Some(Vec2::new(-1.0, 0.0)));
        assert_eq!(request.data.owner, Some((owner, EntityKind::Player)));
    }
}
