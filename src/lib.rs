pub mod cards;
pub mod engine;
pub mod player;
pub mod ports;
pub mod session;
pub mod strategy;

/// dimensional analysis types
pub type Chips = i64;
pub type Equity = f64;
pub type Probability = f64;

/// seat identifier, assigned at session start and stable for the game
pub type PlayerId = usize;

// table parameters
pub const MIN_PLAYERS: usize = 2;
pub const MAX_PLAYERS: usize = 10;

// statistics below this many observed hands fall back to standard ranges
pub const MIN_HANDS_STATISTICS_ACCURATE: u32 = 50;

// invalid submissions tolerated before the engine folds a player
pub const MAX_INVALID_ACTIONS: u8 = 3;

// monte carlo sampling
pub const EQUITY_ITERATIONS: usize = 5_000;
pub const MULTIWAY_ITERATIONS: usize = 1_000;

/// initialize logging sinks for the simulator binary
pub fn init(sink: LogSink) {
    let config = simplelog::ConfigBuilder::new()
        .set_location_level(log::LevelFilter::Off)
        .set_target_level(log::LevelFilter::Off)
        .set_thread_level(log::LevelFilter::Off)
        .build();
    match sink {
        LogSink::Null => {}
        LogSink::Quiet => {
            simplelog::TermLogger::init(
                log::LevelFilter::Warn,
                config,
                simplelog::TerminalMode::Mixed,
                simplelog::ColorChoice::Auto,
            )
            .expect("initialize logger");
        }
        LogSink::Console => {
            simplelog::TermLogger::init(
                log::LevelFilter::Info,
                config,
                simplelog::TerminalMode::Mixed,
                simplelog::ColorChoice::Auto,
            )
            .expect("initialize logger");
        }
        LogSink::File(path) => {
            let file = std::fs::File::create(&path).expect("create log file");
            simplelog::WriteLogger::init(log::LevelFilter::Debug, config, file)
                .expect("initialize logger");
        }
    }
}

/// where engine logs end up
pub enum LogSink {
    Console,
    Quiet,
    Null,
    File(String),
}
