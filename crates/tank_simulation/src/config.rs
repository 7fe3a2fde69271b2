//! Игровые константы и их загрузка
//!
//! Все числа баланса (скорости, кулдауны, очки, вероятности AI) живут в
//! `GameConfig`. Default = оригинальный баланс аркады.

use bevy::prelude::*;
use serde::{Deserialize, Serialize};

/// Ошибка загрузки конфигурации
#[derive(Debug)]
pub enum ConfigError {
    Parse(ron::error::SpannedError),
    Invalid(String),
}

impl From<ron::error::SpannedError> for ConfigError {
    fn from(e: ron::error::SpannedError) -> Self {
        ConfigError::Parse(e)
    }
}

impl std::fmt::Display for ConfigError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ConfigError::Parse(e) => write!(f, "config parse error: {}", e),
            ConfigError::Invalid(reason) => write!(f, "invalid config: {}", reason),
        }
    }
}

impl std::error::Error for ConfigError {}

/// Вероятности AI врагов (порог броска из 1000 / вероятности bool)
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct AiTuning {
    /// Бросок 0..1000 > порога → смена направления, пока едем вверх (~12%)
    pub turn_while_up_threshold: u32,
    /// Бросок 0..1000 > порога → смена направления без Down (~2%)
    pub turn_threshold: u32,
    /// Бросок 0..1000 > порога → попытка выстрела (~2%)
    pub shoot_threshold: u32,
    /// Вероятность выстрела при упоре в препятствие
    pub blocked_shoot_chance: f64,
    /// Вероятность смены направления при упоре в препятствие
    pub blocked_turn_chance: f64,
}

impl Default for AiTuning {
    fn default() -> Self {
        Self {
            turn_while_up_threshold: 880,
            turn_threshold: 980,
            shoot_threshold: 980,
            blocked_shoot_chance: 0.6,
            blocked_turn_chance: 0.3,
        }
    }
}

/// Конфигурация сессии (resource)
#[derive(Resource, Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct GameConfig {
    /// Частота симуляции (тиков в секунду)
    pub tick_hz: f64,
    /// Размер арены (ширина, высота) — за её пределами пули исчезают
    pub arena_size: Vec2,
    /// Скорость танка (юнитов/сек), за тик = round(delta × speed) шагов
    pub tank_speed: f32,
    pub tank_size: Vec2,
    pub tank_max_health: u32,
    pub health_pack_size: Vec2,
    pub bullet_size: Vec2,
    /// Скорость пули (юнитов/сек), прямолинейно, без sub-steps
    pub bullet_speed: f32,
    /// Интервал между выстрелами (секунды)
    pub shoot_cooldown: f32,
    /// Время жизни эффекта взрыва (секунды)
    pub explode_duration: f32,
    /// Время жизни эффекта лечения (секунды)
    pub heal_duration: f32,
    /// Смещение эффекта от центра цели
    pub effect_offset: Vec2,
    pub starting_lives: u32,
    /// Сколько HP возвращается при потере жизни
    pub respawn_health: u32,
    pub kill_score: u32,
    pub pickup_score: u32,
    /// Уничтожено врагов → победа
    pub enemies_to_win: u32,
    pub ai: AiTuning,
}

impl Default for GameConfig {
    fn default() -> Self {
        Self {
            tick_hz: 60.0,
            arena_size: Vec2::new(32.0 * 30.0, 32.0 * 30.0),
            tank_speed: 100.0,
            tank_size: Vec2::new(32.0, 30.0),
            tank_max_health: 2,
            health_pack_size: Vec2::new(32.0, 30.0),
            bullet_size: Vec2::new(8.0, 8.0),
            bullet_speed: 350.0,
            shoot_cooldown: 0.35,
            explode_duration: 0.5,
            heal_duration: 1.0,
            effect_offset: Vec2::new(-32.0, -32.0),
            starting_lives: 3,
            respawn_health: 2,
            kill_score: 10,
            pickup_score: 5,
            enemies_to_win: 6,
            ai: AiTuning::default(),
        }
    }
}

impl GameConfig {
    /// Загрузка из RON (недостающие поля берутся из Default)
    pub fn from_ron(source: &str) -> Result<Self, ConfigError> {
        let config: Self = ron::from_str(source)?;
        config.validate()?;
        Ok(config)
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        if !(self.tick_hz.is_finite() && self.tick_hz > 0.0) {
            return Err(ConfigError::Invalid(format!("tick_hz must be positive, got {}", self.tick_hz)));
        }
        if self.tank_max_health == 0 {
            return Err(ConfigError::Invalid("tank_max_health must be at least 1".to_string()));
        }
        if self.arena_size.min_element() <= 0.0 {
            return Err(ConfigError::Invalid(format!("arena_size must be positive, got {:?}", self.arena_size)));
        }
        for (name, chance) in [
            ("blocked_shoot_chance", self.ai.blocked_shoot_chance),
            ("blocked_turn_chance", self.ai.blocked_turn_chance),
        ] {
            if !(0.0..=1.0).contains(&chance) {
                return Err(ConfigError::Invalid(format!("{} must be within [0, 1], got {}", name, chance)));
            }
        }
        Ok(())
    }

    /// Длительность одного fixed тика
    pub fn tick_duration(&self) -> std::time::Duration {
        std::time::Duration::from_secs_f64(1.0 / self.tick_hz)
    }

    pub fn arena_bounds(&self) -> Rect {
        Rect::from_corners(Vec2::ZERO, self.arena_size)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_balance() {
        let config = GameConfig::default();
        assert_eq!(config.shoot_cooldown, 0.35);
        assert_eq!(config.bullet_speed, 350.0);
        assert_eq!(config.starting_lives, 3);
        assert_eq!(config.enemies_to_win, 6);
        assert_eq!(config.ai.turn_while_up_threshold, 880);
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_from_ron_partial_override() {
        let config = GameConfig::from_ron("(starting_lives: 5, ai: (blocked_turn_chance: 0.5))").unwrap();
        assert_eq!(config.starting_lives, 5);
        assert_eq!(config.ai.blocked_turn_chance, 0.5);
        // Остальное — из Default
        assert_eq!(config.kill_score, 10);
        assert_eq!(config.ai.blocked_shoot_chance, 0.6);
    }

    #[test]
    fn test_from_ron_rejects_bad_probability() {
        let result = GameConfig::from_ron("(ai: (blocked_shoot_chance: 1.5))");
        assert!(matches!(result, Err(ConfigError::Invalid(_))));
    }

    #[test]
    fn test_from_ron_parse_error() {
        let result = GameConfig::from_ron("(starting_lives: \"three\")");
        assert!(matches!(result, Err(ConfigError::Parse(_))));
    }
}
