//! Level: список spawn-точек, который хост получает из своего tile-map парсера
//!
//! Формат RON:
//! ```ron
//! (spawns: [
//!     (recipe: "wall", position: (0.0, 0.0), size: Some((960.0, 24.0))),
//!     (recipe: "playerSpawnPoint", position: (464.0, 900.0)),
//! ])
//! ```

use bevy::prelude::*;
use serde::{Deserialize, Serialize};
use std::path::Path;
use crate::config::GameConfig;
use crate::spawn::factory::{spawn_entity, SpawnData, SpawnError, SpawnRecipe};

/// Error type for level loading
#[derive(Debug)]
pub enum LevelError {
    IoError(std::io::Error),
    ParseError(ron::error::SpannedError),
    ValidationError(String),
}

impl From<std::io::Error> for LevelError {
    fn from(e: std::io::Error) -> Self {
        LevelError::IoError(e)
    }
}

impl From<ron::error::SpannedError> for LevelError {
    fn from(e: ron::error::SpannedError) -> Self {
        LevelError::ParseError(e)
    }
}

impl From<SpawnError> for LevelError {
    fn from(e: SpawnError) -> Self {
        LevelError::ValidationError(e.to_string())
    }
}

impl std::fmt::Display for LevelError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            LevelError::IoError(e) => write!(f, "IO error: {}", e),
            LevelError::ParseError(e) => write!(f, "Parse error: {}", e),
            LevelError::ValidationError(e) => write!(f, "Validation error: {}", e),
        }
    }
}

impl std::error::Error for LevelError {}

/// Одна spawn-точка уровня
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LevelSpawn {
    /// Логическое имя рецепта (`wall`, `enemySpawnPoint`, ...)
    pub recipe: String,
    /// Левый верхний угол
    pub position: Vec2,
    /// Размер (для стен)
    #[serde(default)]
    pub size: Option<Vec2>,
}

impl LevelSpawn {
    pub fn new(recipe: SpawnRecipe, position: Vec2) -> Self {
        Self {
            recipe: recipe.name().to_string(),
            position,
            size: None,
        }
    }

    pub fn wall(position: Vec2, size: Vec2) -> Self {
        Self {
            size: Some(size),
            ..Self::new(SpawnRecipe::Wall, position)
        }
    }

    pub fn spawn_data(&self) -> SpawnData {
        SpawnData {
            position: self.position,
            size: self.size,
            ..default()
        }
    }
}

/// Уровень (resource, потребляется на Startup)
#[derive(Resource, Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Level {
    pub spawns: Vec<LevelSpawn>,
}

impl Level {
    pub fn from_ron(source: &str) -> Result<Self, LevelError> {
        let level: Level = ron::from_str(source)?;
        level.validate()?;
        Ok(level)
    }

    pub fn load<P: AsRef<Path>>(path: P) -> Result<Self, LevelError> {
        let contents = std::fs::read_to_string(path)?;
        Self::from_ron(&contents)
    }

    /// Имена рецептов известны, у стен есть размер, пуль в уровне нет
    pub fn validate(&self) -> Result<(), LevelError> {
        for (index, spawn) in self.spawns.iter().enumerate() {
            let recipe: SpawnRecipe = spawn.recipe.parse()?;

            match recipe {
                SpawnRecipe::Wall if spawn.size.is_none() => {
                    return Err(SpawnError::MissingField { recipe, field: "size" }.into());
                }
                SpawnRecipe::Bullet => {
                    return Err(LevelError::ValidationError(format!(
                        "spawn #{}: bullets are spawned by tanks, not by levels",
                        index
                    )));
                }
                _ => {}
            }

            if !spawn.position.is_finite() {
                return Err(LevelError::ValidationError(format!(
                    "spawn #{}: position must be finite, got {:?}",
                    index, spawn.position
                )));
            }
        }
        Ok(())
    }

    pub fn count(&self, recipe: SpawnRecipe) -> usize {
        self.spawns.iter().filter(|spawn| spawn.recipe == recipe.name()).count()
    }

    /// Демо-арена 960×960: рамка, препятствия, игрок внизу, 6 врагов наверху, 2 аптечки
    pub fn demo() -> Self {
        let mut spawns = vec![
            LevelSpawn::wall(Vec2::new(0.0, 0.0), Vec2::new(960.0, 24.0)),
            LevelSpawn::wall(Vec2::new(0.0, 936.0), Vec2::new(960.0, 24.0)),
            LevelSpawn::wall(Vec2::new(0.0, 24.0), Vec2::new(24.0, 912.0)),
            LevelSpawn::wall(Vec2::new(936.0, 24.0), Vec2::new(24.0, 912.0)),
            LevelSpawn::wall(Vec2::new(200.0, 400.0), Vec2::new(160.0, 24.0)),
            LevelSpawn::wall(Vec2::new(600.0, 400.0), Vec2::new(160.0, 24.0)),
            LevelSpawn::wall(Vec2::new(440.0, 560.0), Vec2::new(80.0, 80.0)),
            LevelSpawn::new(SpawnRecipe::PlayerSpawnPoint, Vec2::new(464.0, 900.0)),
            LevelSpawn::new(SpawnRecipe::HealthPack, Vec2::new(100.0, 600.0)),
            LevelSpawn::new(SpawnRecipe::HealthPack, Vec2::new(820.0, 600.0)),
        ];

        for x in [60.0, 220.0, 380.0, 540.0, 700.0, 860.0] {
            spawns.push(LevelSpawn::new(SpawnRecipe::EnemySpawnPoint, Vec2::new(x, 40.0)));
        }

        Self { spawns }
    }
}

/// Система (Startup): заспавнить entities уровня
pub fn spawn_level(mut commands: Commands, level: Option<Res<Level>>, config: Res<GameConfig>) {
    let Some(level) = level else {
        return;
    };

    let mut spawned = 0;
    for spawn in &level.spawns {
        let result = spawn
            .recipe
            .parse::<SpawnRecipe>()
            .and_then(|recipe| spawn_entity(&mut commands, &config, 0.0, recipe, &spawn.spawn_data()));

        match result {
            Ok(_) => spawned += 1,
            Err(err) => crate::logger::log_warning(&format!("Level spawn '{}' skipped: {}", spawn.recipe, err)),
        }
    }

    crate::logger::log_info(&format!("Level spawned: {} entities", spawned));
}
