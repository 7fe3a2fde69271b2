//! Collision Response Rules — пять независимых парных правил
//!
//! | Пара                  | Эффект                    | Итог                                         |
//! |-----------------------|---------------------------|----------------------------------------------|
//! | Bullet × Enemy        | explosion у врага         | пуля удалена, враг −1 HP, при 0: kill, +10   |
//! | Bullet × Player       | explosion у пули          | пуля удалена, игрок −1 HP, при 0: жизнь/смерть |
//! | Bullet × Wall         | explosion у пули          | пуля удалена                                 |
//! | Enemy × HealthPack    | heal у врага              | аптечка удалена, +1 HP если не полное        |
//! | Player × HealthPack   | heal у игрока             | аптечка удалена, +5 score, +1 HP             |
//!
//! Правило, чей участник уже удалён на этом тике, молча пропускается.

use bevy::prelude::*;
use std::collections::HashSet;
use crate::components::{EntityKind, Health, Hitbox};
use crate::config::GameConfig;
use crate::game_state::{GameOutcome, GameOver, GameStats};
use crate::physics::ContactStarted;
use crate::spawn::{SpawnData, SpawnRecipe, SpawnRequest};

/// Правило для пары типов
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum CollisionRule {
    BulletEnemy,
    BulletPlayer,
    BulletWall,
    EnemyHealthPack,
    PlayerHealthPack,
}

impl CollisionRule {
    /// Найти правило для неупорядоченной пары
    ///
    /// Второй элемент = true, если участники пришли в обратном порядке
    /// относительно имени правила (например Enemy, Bullet).
    pub fn for_pair(a: EntityKind, b: EntityKind) -> Option<(Self, bool)> {
        Self::ordered(a, b)
            .map(|rule| (rule, false))
            .or_else(|| Self::ordered(b, a).map(|rule| (rule, true)))
    }

    fn ordered(first: EntityKind, second: EntityKind) -> Option<Self> {
        match (first, second) {
            (EntityKind::Bullet, EntityKind::Enemy) => Some(CollisionRule::BulletEnemy),
            (EntityKind::Bullet, EntityKind::Player) => Some(CollisionRule::BulletPlayer),
            (EntityKind::Bullet, EntityKind::Wall) => Some(CollisionRule::BulletWall),
            (EntityKind::Enemy, EntityKind::HealthPack) => Some(CollisionRule::EnemyHealthPack),
            (EntityKind::Player, EntityKind::HealthPack) => Some(CollisionRule::PlayerHealthPack),
            _ => None,
        }
    }
}

/// Что случилось с игроком после попадания
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PlayerHit {
    /// Потерял HP, жив
    Damaged,
    /// HP упало до 0, списана жизнь, здоровье восстановлено на месте
    Respawned,
    /// Жизней не осталось — игрок уничтожен
    Destroyed,
}

/// Попадание во врага; true = враг уничтожен (счётчики уже обновлены)
pub fn bullet_hits_enemy(health: &mut Health, stats: &mut GameStats, config: &GameConfig) -> bool {
    health.take_damage(1);
    if !health.is_zero() {
        return false;
    }

    stats.add_score(config.kill_score);
    stats.record_enemy_destroyed();
    true
}

/// Попадание в игрока
pub fn bullet_hits_player(health: &mut Health, stats: &mut GameStats, config: &GameConfig) -> PlayerHit {
    health.take_damage(1);
    if !health.is_zero() {
        return PlayerHit::Damaged;
    }

    if stats.lose_life() {
        health.heal(config.respawn_health);
        PlayerHit::Respawned
    } else {
        PlayerHit::Destroyed
    }
}

/// Танк подобрал аптечку (+1 HP, только если не полное)
pub fn pick_up_health(health: &mut Health) {
    if !health.is_full() {
        health.heal(1);
    }
}

/// Позиция визуального эффекта относительно центра источника
pub fn effect_position(center: Vec2, config: &GameConfig) -> Vec2 {
    center + config.effect_offset
}

/// Удалить entity один раз за тик
fn remove(commands: &mut Commands, removed: &mut HashSet<Entity>, entity: Entity) {
    if removed.insert(entity) {
        if let Ok(mut entity_commands) = commands.get_entity(entity) {
            entity_commands.despawn();
        }
    }
}

/// Система: применить правила к ContactStarted этого тика
pub fn apply_collision_rules(
    mut commands: Commands,
    mut contacts: EventReader<ContactStarted>,
    bodies: Query<(&Transform, &Hitbox)>,
    mut healths: Query<&mut Health>,
    mut stats: ResMut<GameStats>,
    config: Res<GameConfig>,
    mut spawn_requests: EventWriter<SpawnRequest>,
    mut game_over_events: EventWriter<GameOver>,
) {
    let mut removed: HashSet<Entity> = HashSet::new();

    for contact in contacts.read() {
        let Some((rule, swapped)) = CollisionRule::for_pair(contact.a_kind, contact.b_kind) else {
            continue;
        };
        let (first, second) = if swapped { (contact.b, contact.a) } else { (contact.a, contact.b) };

        if removed.contains(&first) || removed.contains(&second) {
            continue;
        }

        let center = |entity: Entity| {
            bodies
                .get(entity)
                .ok()
                .map(|(transform, hitbox)| hitbox.center(transform.translation.truncate()))
        };
        let (Some(first_center), Some(second_center)) = (center(first), center(second)) else {
            continue;
        };

        match rule {
            CollisionRule::BulletEnemy => {
                let (bullet, enemy) = (first, second);
                let Ok(mut health) = healths.get_mut(enemy) else {
                    continue;
                };

                spawn_requests.write(SpawnRequest::new(
                    SpawnRecipe::Explode,
                    SpawnData::at(effect_position(second_center, &config)),
                ));
                remove(&mut commands, &mut removed, bullet);

                if bullet_hits_enemy(&mut health, &mut stats, &config) {
                    remove(&mut commands, &mut removed, enemy);
                    crate::logger::log(&format!(
                        "Enemy {:?} destroyed (score: {}, destroyed: {})",
                        enemy, stats.score, stats.destroyed_enemies
                    ));
                }
            }

            CollisionRule::BulletPlayer => {
                let (bullet, player) = (first, second);
                let Ok(mut health) = healths.get_mut(player) else {
                    continue;
                };

                spawn_requests.write(SpawnRequest::new(
                    SpawnRecipe::Explode,
                    SpawnData::at(effect_position(first_center, &config)),
                ));
                remove(&mut commands, &mut removed, bullet);

                match bullet_hits_player(&mut health, &mut stats, &config) {
                    PlayerHit::Damaged => {}
                    PlayerHit::Respawned => {
                        crate::logger::log_info(&format!("Player lost a life ({} left)", stats.lives));
                    }
                    PlayerHit::Destroyed => {
                        remove(&mut commands, &mut removed, player);
                        if stats.finish(GameOutcome::Defeat) {
                            game_over_events.write(GameOver { outcome: GameOutcome::Defeat });
                            crate::logger::log_info(&format!("Player destroyed, game over (score: {})", stats.score));
                        }
                    }
                }
            }

            CollisionRule::BulletWall => {
                spawn_requests.write(SpawnRequest::new(
                    SpawnRecipe::Explode,
                    SpawnData::at(effect_position(first_center, &config)),
                ));
                remove(&mut commands, &mut removed, first);
            }

            CollisionRule::EnemyHealthPack | CollisionRule::PlayerHealthPack => {
                let (tank, pack) = (first, second);
                let Ok(mut health) = healths.get_mut(tank) else {
                    continue;
                };

                spawn_requests.write(SpawnRequest::new(
                    SpawnRecipe::Heal,
                    SpawnData::at(effect_position(first_center, &config)),
                ));
                remove(&mut commands, &mut removed, pack);

                if rule == CollisionRule::PlayerHealthPack {
                    stats.add_score(config.pickup_score);
                }
                pick_up_health(&mut health);
            }
        }
    }
}
