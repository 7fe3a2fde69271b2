//! Headless симуляция танковой аркады
//!
//! Запускает демо-уровень без рендера: враги ездят и стреляют,
//! игрок стоит на месте и отстреливается вверх.
//!
//! Аргументы: `[level.ron] [config.ron]` (оба опциональны).

use tank_simulation::{
    create_headless_app_with_config, log_error, log_info, GameConfig, GameStats, Level, PlayerAction,
};

fn load_inputs() -> Result<(Level, GameConfig), Box<dyn std::error::Error>> {
    let mut args = std::env::args().skip(1);

    let level = match args.next() {
        Some(path) => Level::load(path)?,
        None => Level::demo(),
    };
    let config = match args.next() {
        Some(path) => GameConfig::from_ron(&std::fs::read_to_string(path)?)?,
        None => GameConfig::default(),
    };

    Ok((level, config))
}

fn main() {
    let seed = 42;

    let (level, config) = match load_inputs() {
        Ok(inputs) => inputs,
        Err(err) => {
            tank_simulation::init_logger();
            log_error(&format!("Failed to load inputs: {}", err));
            std::process::exit(1);
        }
    };

    let mut app = create_headless_app_with_config(seed, config);
    app.insert_resource(level);
    log_info(&format!("Starting tank arcade headless simulation (seed: {})", seed));

    // Запускаем 1000 тиков симуляции
    for tick in 0..1000 {
        app.world_mut().send_event(PlayerAction::Shoot);
        app.update();

        if tick % 100 == 0 {
            let stats = app.world().resource::<GameStats>();
            log_info(&format!(
                "Tick {}: {} entities, score {}, lives {}, destroyed {}",
                tick,
                app.world().entities().len(),
                stats.score,
                stats.lives,
                stats.destroyed_enemies
            ));
        }

        if app.world().resource::<GameStats>().game_over {
            log_info(&format!("Game over at tick {}", tick));
            break;
        }
    }

    let stats = app.world().resource::<GameStats>();
    log_info(&format!("Simulation complete: {:?}", stats));
}
