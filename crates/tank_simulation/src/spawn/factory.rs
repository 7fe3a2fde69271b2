//! Entity Spawn Configuration
//!
//! Логическое имя spawn'а → фиксированный рецепт компонентов:
//! тип, hitbox, визуал, поведение, здоровье, collidable.
//!
//! | Имя                | Тип        | Hitbox     | Поведение   | HP  | Collidable |
//! |--------------------|------------|------------|-------------|-----|------------|
//! | `wall`             | Wall       | из данных  | —           | —   | да         |
//! | `playerSpawnPoint` | Player     | 32×30      | PlayerTank  | 2/2 | да         |
//! | `enemySpawnPoint`  | Enemy      | 32×30      | EnemyAi     | 2/2 | да         |
//! | `bullet`           | Bullet     | 8×8        | Projectile  | —   | кроме типа владельца |
//! | `explode`          | —          | —          | 0.5s эффект | —   | нет        |
//! | `heal`             | —          | —          | 1.0s эффект | —   | нет        |
//! | `healthpack`       | HealthPack | 32×30      | —           | —   | да         |

use bevy::prelude::*;
use std::str::FromStr;
use crate::ai::EnemyAi;
use crate::combat::{DespawnAfter, Projectile, VisualEffect};
use crate::components::{Collidable, EntityKind, Heading, Health, Hitbox};
use crate::config::GameConfig;
use crate::player::PlayerTank;

/// Рецепт spawn'а
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum SpawnRecipe {
    Wall,
    PlayerSpawnPoint,
    EnemySpawnPoint,
    Bullet,
    Explode,
    Heal,
    HealthPack,
}

impl SpawnRecipe {
    pub fn name(self) -> &'static str {
        match self {
            SpawnRecipe::Wall => "wall",
            SpawnRecipe::PlayerSpawnPoint => "playerSpawnPoint",
            SpawnRecipe::EnemySpawnPoint => "enemySpawnPoint",
            SpawnRecipe::Bullet => "bullet",
            SpawnRecipe::Explode => "explode",
            SpawnRecipe::Heal => "heal",
            SpawnRecipe::HealthPack => "healthpack",
        }
    }
}

impl FromStr for SpawnRecipe {
    type Err = SpawnError;

    fn from_str(name: &str) -> Result<Self, Self::Err> {
        match name {
            "wall" => Ok(SpawnRecipe::Wall),
            "playerSpawnPoint" => Ok(SpawnRecipe::PlayerSpawnPoint),
            "enemySpawnPoint" => Ok(SpawnRecipe::EnemySpawnPoint),
            "bullet" => Ok(SpawnRecipe::Bullet),
            "explode" => Ok(SpawnRecipe::Explode),
            "heal" => Ok(SpawnRecipe::Heal),
            "healthpack" => Ok(SpawnRecipe::HealthPack),
            other => Err(SpawnError::UnknownRecipe(other.to_string())),
        }
    }
}

/// Ошибка сборки entity по рецепту
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SpawnError {
    UnknownRecipe(String),
    MissingField {
        recipe: SpawnRecipe,
        field: &'static str,
    },
}

impl std::fmt::Display for SpawnError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            SpawnError::UnknownRecipe(name) => write!(f, "unknown spawn recipe '{}'", name),
            SpawnError::MissingField { recipe, field } => {
                write!(f, "spawn recipe '{}' requires '{}'", recipe.name(), field)
            }
        }
    }
}

impl std::error::Error for SpawnError {}

/// Входные данные spawn'а
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct SpawnData {
    /// Левый верхний угол
    pub position: Vec2,
    /// Размер (обязателен для wall)
    pub size: Option<Vec2>,
    /// Единичный вектор полёта (обязателен для bullet)
    pub direction: Option<Vec2>,
    /// Владелец пули и его тип (обязателен для bullet)
    pub owner: Option<(Entity, EntityKind)>,
}

impl SpawnData {
    pub fn at(position: Vec2) -> Self {
        Self { position, ..default() }
    }

    pub fn with_size(mut self, size: Vec2) -> Self {
        self.size = Some(size);
        self
    }

    pub fn with_direction(mut self, direction: Vec2) -> Self {
        self.direction = Some(direction);
        self
    }

    pub fn with_owner(mut self, owner: Entity, owner_kind: EntityKind) -> Self {
        self.owner = Some((owner, owner_kind));
        self
    }
}

/// Визуал по умолчанию (путь ассета для хоста-рендерера)
#[derive(Component, Debug, Clone, PartialEq, Reflect)]
#[reflect(Component)]
pub struct SpritePath {
    pub path: String,
}

impl SpritePath {
    pub fn new(path: impl Into<String>) -> Self {
        Self { path: path.into() }
    }
}

/// Event: запрос на spawn (от поведения или collision rule)
#[derive(Event, Debug, Clone, Copy)]
pub struct SpawnRequest {
    pub recipe: SpawnRecipe,
    pub data: SpawnData,
}

impl SpawnRequest {
    pub fn new(recipe: SpawnRecipe, data: SpawnData) -> Self {
        Self { recipe, data }
    }
}

/// Позиция spawn'а с учётом сетки
///
/// Танки двигаются целыми шагами: танки, стены и аптечки стоят в целых
/// координатах, чтобы танк мог встать к аптечке вплотную.
pub fn snapped_position(recipe: SpawnRecipe, position: Vec2) -> Vec2 {
    match recipe {
        SpawnRecipe::Wall
        | SpawnRecipe::PlayerSpawnPoint
        | SpawnRecipe::EnemySpawnPoint
        | SpawnRecipe::HealthPack => position.round(),
        SpawnRecipe::Bullet | SpawnRecipe::Explode | SpawnRecipe::Heal => position,
    }
}

/// Собрать entity по рецепту
///
/// `now` — simulated time (секунды), от него считается срок жизни эффектов.
pub fn spawn_entity(
    commands: &mut Commands,
    config: &GameConfig,
    now: f32,
    recipe: SpawnRecipe,
    data: &SpawnData,
) -> Result<Entity, SpawnError> {
    let transform = Transform::from_translation(snapped_position(recipe, data.position).extend(0.0));

    let entity = match recipe {
        SpawnRecipe::Wall => {
            let size = data.size.ok_or(SpawnError::MissingField { recipe, field: "size" })?;
            commands
                .spawn((transform, EntityKind::Wall, Hitbox::new(size), Collidable::default()))
                .id()
        }

        SpawnRecipe::PlayerSpawnPoint => commands
            .spawn((
                transform,
                EntityKind::Player,
                Hitbox::new(config.tank_size),
                Health::new(config.tank_max_health),
                PlayerTank::default(),
                Heading::default(),
                Collidable::default(),
                SpritePath::new("tanks/greenTank.png"),
            ))
            .id(),

        SpawnRecipe::EnemySpawnPoint => commands
            .spawn((
                transform,
                EntityKind::Enemy,
                Hitbox::new(config.tank_size),
                Health::new(config.tank_max_health),
                EnemyAi::default(),
                Heading::default(),
                Collidable::default(),
                SpritePath::new("tanks/yellowTank.png"),
            ))
            .id(),

        SpawnRecipe::Bullet => {
            let direction = data.direction.ok_or(SpawnError::MissingField { recipe, field: "direction" })?;
            let (owner, owner_kind) = data.owner.ok_or(SpawnError::MissingField { recipe, field: "owner" })?;
            commands
                .spawn((
                    transform,
                    EntityKind::Bullet,
                    Hitbox::new(config.bullet_size),
                    Projectile {
                        velocity: direction.normalize_or_zero() * config.bullet_speed,
                        owner,
                    },
                    Collidable { ignored_kind: Some(owner_kind) },
                    SpritePath::new("bullet/bullet.png"),
                ))
                .id()
        }

        SpawnRecipe::Explode => commands
            .spawn((
                transform,
                VisualEffect::Explosion,
                DespawnAfter { despawn_time: now + config.explode_duration },
                SpritePath::new("animations/explosion.png"),
            ))
            .id(),

        SpawnRecipe::Heal => commands
            .spawn((
                transform,
                VisualEffect::Heal,
                DespawnAfter { despawn_time: now + config.heal_duration },
                SpritePath::new("animations/heal.png"),
            ))
            .id(),

        SpawnRecipe::HealthPack => commands
            .spawn((
                transform,
                EntityKind::HealthPack,
                Hitbox::new(config.health_pack_size),
                Collidable::default(),
                SpritePath::new("items/healthpack.png"),
            ))
            .id(),
    };

    Ok(entity)
}

/// Система: исполнить накопленные SpawnRequest
///
/// Ошибки рецептов логируются, симуляция продолжается.
pub fn spawn_requested_entities(
    mut commands: Commands,
    mut requests: EventReader<SpawnRequest>,
    config: Res<GameConfig>,
    time: Res<Time<Fixed>>,
) {
    let now = time.elapsed_secs();

    for request in requests.read() {
        if let Err(err) = spawn_entity(&mut commands, &config, now, request.recipe, &request.data) {
            crate::logger::log_warning(&format!("SpawnRequest dropped: {}", err));
        }
    }
}
