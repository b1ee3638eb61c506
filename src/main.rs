use anyhow::Context;
use anyhow::Result;
use anyhow::bail;
use clap::Parser;
use colored::Colorize;
use riverboat::LogSink;
use riverboat::engine::events::ConsoleSink;
use riverboat::engine::events::EventSink;
use riverboat::engine::events::NullSink;
use riverboat::ports::Services;
use riverboat::ports::audit::JsonlAuditStore;
use riverboat::ports::evaluator::BitwiseEvaluationEngine;
use riverboat::ports::randomizer::DefaultRandomizer;
use riverboat::ports::stats_store::JsonStatisticsStore;
use riverboat::ports::stats_store::MemoryStatisticsStore;
use riverboat::ports::stats_store::PlayersStatisticsStore;
use riverboat::session::config::GameData;
use riverboat::session::session::Session;
use riverboat::strategy::profiles::BotProfile;
use std::cell::RefCell;
use std::path::PathBuf;
use std::rc::Rc;

/// bot-only no-limit hold'em simulator: runs hands between the
/// configured profiles and reports the standings.
#[derive(Parser, Debug)]
#[command(name = "riverboat", version)]
struct Args {
    /// number of hands to simulate
    #[arg(long, default_value_t = 100)]
    hands: u64,
    /// seating, repeatable: PROFILE:COUNT
    /// (UltraTight, TightAggressive, LooseAggressive, Maniac)
    #[arg(long = "strategy", value_name = "NAME:COUNT")]
    strategies: Vec<String>,
    /// starting stack per seat
    #[arg(long, default_value_t = 1_000)]
    money: i64,
    /// small blind; the big blind is twice this
    #[arg(long, default_value_t = 10)]
    small_blind: i64,
    /// console, quiet, or null
    #[arg(long, default_value = "console")]
    logger: String,
    /// write the final standings report here
    #[arg(long)]
    output: Option<PathBuf>,
    /// JSON statistics store, persisted across runs
    #[arg(long)]
    database: Option<PathBuf>,
    /// append-only JSONL log of every hand played
    #[arg(long)]
    audit: Option<PathBuf>,
    /// fixed randomizer seed for reproducible runs
    #[arg(long)]
    seed: Option<u64>,
}

fn main() {
    if let Err(error) = run() {
        eprintln!("{:#}", error);
        std::process::exit(1);
    }
}

fn run() -> Result<()> {
    let args = Args::parse();

    let events: Rc<dyn EventSink> = match args.logger.as_str() {
        "console" => {
            riverboat::init(LogSink::Console);
            Rc::new(ConsoleSink)
        }
        "quiet" => {
            riverboat::init(LogSink::Quiet);
            Rc::new(NullSink)
        }
        "null" => Rc::new(NullSink),
        other => bail!("unknown logger {:?}; expected console, quiet or null", other),
    };

    let profiles = parse_seating(&args.strategies)?;
    let stats: Rc<RefCell<dyn PlayersStatisticsStore>> = match &args.database {
        Some(path) => Rc::new(RefCell::new(
            JsonStatisticsStore::open(path)
                .with_context(|| format!("opening statistics store {}", path.display()))?,
        )),
        None => Rc::new(RefCell::new(MemoryStatisticsStore::default())),
    };
    let audit = match &args.audit {
        Some(path) => Some(Rc::new(RefCell::new(
            JsonlAuditStore::open(path)
                .with_context(|| format!("opening audit log {}", path.display()))?,
        ))
            as Rc<RefCell<dyn riverboat::ports::audit::HandAuditStore>>),
        None => None,
    };
    let services = Services {
        evaluator: Rc::new(BitwiseEvaluationEngine),
        randomizer: Rc::new(RefCell::new(match args.seed {
            Some(seed) => DefaultRandomizer::seeded(seed),
            None => DefaultRandomizer::new(),
        })),
        stats,
        audit,
        events,
    };

    let data = GameData {
        max_number_of_players: profiles.len().max(2),
        start_money: args.money,
        first_small_blind: args.small_blind,
        ..Default::default()
    };
    let mut session =
        Session::with_bots(data, profiles, services).context("assembling the session")?;
    let outcomes = session
        .game_mut()
        .run_hands(args.hands)
        .context("running the simulation")?;

    let report = standings_report(&session, outcomes.len());
    println!("{}", report);
    if let Some(path) = &args.output {
        std::fs::write(path, &report)
            .with_context(|| format!("writing report to {}", path.display()))?;
    }
    Ok(())
}

/// "TightAggressive:3" entries into a seat list; defaults to a
/// six-handed mixed table
fn parse_seating(specs: &[String]) -> Result<Vec<BotProfile>> {
    if specs.is_empty() {
        return Ok(vec![
            BotProfile::TightAggressive,
            BotProfile::TightAggressive,
            BotProfile::LooseAggressive,
            BotProfile::LooseAggressive,
            BotProfile::UltraTight,
            BotProfile::Maniac,
        ]);
    }
    let mut seats = Vec::new();
    for spec in specs {
        let (name, count) = spec
            .split_once(':')
            .with_context(|| format!("expected NAME:COUNT, got {:?}", spec))?;
        let profile = BotProfile::from_label(name)
            .with_context(|| format!("unknown strategy {:?}", name))?;
        let count: usize = count
            .parse()
            .with_context(|| format!("bad seat count in {:?}", spec))?;
        seats.extend(std::iter::repeat_n(profile, count));
    }
    if seats.len() < riverboat::MIN_PLAYERS || seats.len() > riverboat::MAX_PLAYERS {
        bail!(
            "seating must total {}..={} players, got {}",
            riverboat::MIN_PLAYERS,
            riverboat::MAX_PLAYERS,
            seats.len()
        );
    }
    Ok(seats)
}

fn standings_report(session: &Session, hands_played: usize) -> String {
    let mut lines = vec![format!("hands played: {}", hands_played)];
    for (rank, (id, row)) in session.game().ranking().standings().iter().enumerate() {
        let line = format!(
            "{:>2}. {:<20} [{}] chips {:>8}  hands won {:>5}",
            rank + 1,
            row.name,
            row.strategy,
            row.chips,
            row.hands_won
        );
        lines.push(if *id == 0 {
            line.as_str().bold().to_string()
        } else {
            line
        });
    }
    lines.join("\n")
}
