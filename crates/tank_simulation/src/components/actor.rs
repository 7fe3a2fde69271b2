//! Базовые компоненты entity: тип, здоровье, hitbox, поворот

use bevy::prelude::*;

/// Логический тип entity (ключ для obstacle sets и collision rules)
#[derive(Component, Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Reflect)]
#[reflect(Component)]
pub enum EntityKind {
    Wall,
    Player,
    Enemy,
    Bullet,
    HealthPack,
}

/// Здоровье танка
///
/// Инвариант: 0 ≤ current ≤ max
#[derive(Component, Debug, Clone, Copy, PartialEq, Eq, Reflect)]
#[reflect(Component)]
pub struct Health {
    pub current: u32,
    pub max: u32,
}

impl Health {
    pub fn new(max: u32) -> Self {
        Self { current: max, max }
    }

    pub fn is_zero(&self) -> bool {
        self.current == 0
    }

    pub fn is_full(&self) -> bool {
        self.current >= self.max
    }

    pub fn take_damage(&mut self, amount: u32) {
        self.current = self.current.saturating_sub(amount);
    }

    pub fn heal(&mut self, amount: u32) {
        self.current = self.current.saturating_add(amount).min(self.max);
    }
}

/// Axis-aligned bounding box (размер; позиция — Transform, левый верхний угол)
#[derive(Component, Debug, Clone, Copy, PartialEq, Reflect)]
#[reflect(Component)]
pub struct Hitbox {
    pub size: Vec2,
}

impl Hitbox {
    pub fn new(size: Vec2) -> Self {
        Self { size }
    }

    pub fn bounds(&self, position: Vec2) -> Rect {
        Rect::from_corners(position, position + self.size)
    }

    pub fn center(&self, position: Vec2) -> Vec2 {
        position + self.size / 2.0
    }
}

/// Участвует в детекции контактов
///
/// `ignored_kind` — тип, контакты с которым не регистрируются
/// (пуля игнорирует тип своего владельца).
#[derive(Component, Debug, Clone, Copy, Default, PartialEq, Reflect)]
#[reflect(Component)]
pub struct Collidable {
    pub ignored_kind: Option<EntityKind>,
}

/// Визуальный поворот корпуса (градусы)
#[derive(Component, Debug, Clone, Copy, Default, PartialEq, Reflect)]
#[reflect(Component)]
pub struct Heading {
    pub degrees: f32,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_health_damage_saturates_at_zero() {
        let mut health = Health::new(2);
        health.take_damage(1);
        assert_eq!(health.current, 1);
        health.take_damage(5);
        assert_eq!(health.current, 0);
        assert!(health.is_zero());
    }

    #[test]
    fn test_health_heal_clamped_to_max() {
        let mut health = Health { current: 0, max: 2 };
        health.heal(2);
        assert_eq!(health.current, 2);
        health.heal(1);
        assert_eq!(health.current, 2);
        assert!(health.is_full());
    }

    #[test]
    fn test_hitbox_bounds_from_top_left() {
        let hitbox = Hitbox::new(Vec2::new(32.0, 30.0));
        let bounds = hitbox.bounds(Vec2::new(10.0, 20.0));
        assert_eq!(bounds.min, Vec2::new(10.0, 20.0));
        assert_eq!(bounds.max, Vec2::new(42.0, 50.0));
        assert_eq!(hitbox.center(Vec2::new(10.0, 20.0)), Vec2::new(26.0, 35.0));
    }
}
