//! Process-wide счётчики сессии: score, lives, destroyed enemies, game over
//!
//! Инварианты:
//! - score и destroyed_enemies только растут
//! - lives уменьшается только пока > 0
//! - game_over переходит false → true не более одного раза

use bevy::prelude::*;
use crate::config::GameConfig;

/// Чем закончилась сессия
#[derive(Debug, Clone, Copy, PartialEq, Eq, Reflect)]
pub enum GameOutcome {
    Victory,
    Defeat,
}

/// Счётчики сессии (resource)
#[derive(Resource, Debug, Clone, PartialEq, Eq)]
pub struct GameStats {
    pub score: u32,
    pub lives: u32,
    pub destroyed_enemies: u32,
    pub game_over: bool,
    pub outcome: Option<GameOutcome>,
}

impl GameStats {
    pub fn new(starting_lives: u32) -> Self {
        Self {
            score: 0,
            lives: starting_lives,
            destroyed_enemies: 0,
            game_over: false,
            outcome: None,
        }
    }

    pub fn add_score(&mut self, amount: u32) {
        self.score = self.score.saturating_add(amount);
    }

    /// Списать жизнь; false если жизней уже не было
    pub fn lose_life(&mut self) -> bool {
        if self.lives == 0 {
            return false;
        }
        self.lives -= 1;
        true
    }

    pub fn record_enemy_destroyed(&mut self) {
        self.destroyed_enemies = self.destroyed_enemies.saturating_add(1);
    }

    /// Одноразовый переход в game over; true только при первом вызове
    pub fn finish(&mut self, outcome: GameOutcome) -> bool {
        if self.game_over {
            return false;
        }
        self.game_over = true;
        self.outcome = Some(outcome);
        true
    }
}

impl FromWorld for GameStats {
    fn from_world(world: &mut World) -> Self {
        let lives = world
            .get_resource::<GameConfig>()
            .map(|config| config.starting_lives)
            .unwrap_or(GameConfig::default().starting_lives);
        Self::new(lives)
    }
}

/// Event: сессия закончилась (хост показывает терминальный overlay)
#[derive(Event, Debug, Clone, Copy, PartialEq, Eq)]
pub struct GameOver {
    pub outcome: GameOutcome,
}

/// Наблюдаемые UI счётчики
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Counter {
    Score,
    Lives,
    DestroyedEnemies,
}

/// Event: значение счётчика изменилось (для UI bindings хоста)
#[derive(Event, Debug, Clone, Copy, PartialEq, Eq)]
pub struct CounterChanged {
    pub counter: Counter,
    pub value: u32,
}

/// Система: победа при достижении порога уничтоженных врагов
pub fn check_win_condition(
    mut stats: ResMut<GameStats>,
    config: Res<GameConfig>,
    mut game_over_events: EventWriter<GameOver>,
) {
    if stats.game_over || stats.destroyed_enemies < config.enemies_to_win {
        return;
    }

    if stats.finish(GameOutcome::Victory) {
        game_over_events.write(GameOver { outcome: GameOutcome::Victory });
        crate::logger::log_info(&format!(
            "All {} enemies destroyed, game over (score: {})",
            stats.destroyed_enemies, stats.score
        ));
    }
}

/// Последние опубликованные значения (None = ещё не публиковали)
#[derive(Default)]
pub struct PublishedCounters {
    score: Option<u32>,
    lives: Option<u32>,
    destroyed_enemies: Option<u32>,
}

/// Система: CounterChanged для каждого изменившегося счётчика
///
/// Первый запуск публикует начальные значения, чтобы UI мог инициализироваться.
pub fn publish_counter_changes(
    stats: Res<GameStats>,
    mut published: Local<PublishedCounters>,
    mut changed_events: EventWriter<CounterChanged>,
) {
    let mut publish = |slot: &mut Option<u32>, counter: Counter, value: u32| {
        if *slot != Some(value) {
            *slot = Some(value);
            changed_events.write(CounterChanged { counter, value });
        }
    };

    publish(&mut published.score, Counter::Score, stats.score);
    publish(&mut published.lives, Counter::Lives, stats.lives);
    publish(&mut published.destroyed_enemies, Counter::DestroyedEnemies, stats.destroyed_enemies);
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_new_session_defaults() {
        let stats = GameStats::new(3);
        assert_eq!(stats.lives, 3);
        assert_eq!(stats.score, 0);
        assert!(!stats.game_over);
        assert_eq!(stats.outcome, None);
    }

    #[test]
    fn test_lose_life_stops_at_zero() {
        let mut stats = GameStats::new(1);
        assert!(stats.lose_life());
        assert_eq!(stats.lives, 0);
        assert!(!stats.lose_life());
        assert_eq!(stats.lives, 0);
    }

    #[test]
    fn test_finish_is_one_way() {
        let mut stats = GameStats::new(3);
        assert!(stats.finish(GameOutcome::Defeat));
        assert!(!stats.finish(GameOutcome::Victory));
        assert!(stats.game_over);
        assert_eq!(stats.outcome, Some(GameOutcome::Defeat));
    }

    #[test]
    fn test_win_condition_system() {
        let mut world = World::new();
        world.insert_resource(GameConfig::default());
        world.init_resource::<GameStats>();
        world.init_resource::<Events<GameOver>>();

        let mut schedule = Schedule::default();
        schedule.add_systems(check_win_condition);

        world.resource_mut::<GameStats>().destroyed_enemies = 5;
        schedule.run(&mut world);
        assert!(!world.resource::<GameStats>().game_over);

        world.resource_mut::<GameStats>().destroyed_enemies = 6;
        schedule.run(&mut world);
        schedule.run(&mut world);

        let stats = world.resource::<GameStats>();
        assert!(stats.game_over);
        assert_eq!(stats.outcome, Some(GameOutcome::Victory));
        assert_eq!(world.resource::<Events<GameOver>>().len(), 1);
    }

    #[test]
    fn test_counter_changes_published_once_per_change() {
        let mut world = World::new();
        world.insert_resource(GameStats::new(3));
        world.init_resource::<Events<CounterChanged>>();

        let mut schedule = Schedule::default();
        schedule.add_systems(publish_counter_changes);

        // Первый запуск — начальные значения всех трёх счётчиков
        schedule.run(&mut world);
        assert_eq!(world.resource::<Events<CounterChanged>>().len(), 3);

        // Без изменений — тишина
        schedule.run(&mut world);
        assert_eq!(world.resource::<Events<CounterChanged>>().len(), 3);

        world.resource_mut::<GameStats>().add_score(10);
        schedule.run(&mut world);

        let events = world.resource::<Events<CounterChanged>>();
        let mut cursor = events.get_cursor();
        let last = cursor.read(events).last().copied();
        assert_eq!(last, Some(CounterChanged { counter: Counter::Score, value: 10 }));
        assert_eq!(events.len(), 4);
    }
}
