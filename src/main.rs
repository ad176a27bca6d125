use std::path::Path;

use instant::Instant;

use mazechase::config::SimConfig;
use mazechase::input::{Key, LatchedInput};
use mazechase::persistence::MemoryStore;
use mazechase::{Game, GameState};

/// Simulation tick length (seconds).
const TICK_RATE: f64 = 1.0 / 60.0;
/// Simulated seconds before the headless run stops.
const SESSION_SECONDS: f64 = 600.0;
/// How often to log throughput (wall seconds).
const STATS_LOG_INTERVAL: f64 = 5.0;
/// Per-tick chance the autopilot presses a new direction.
const TURN_CHANCE: f32 = 0.03;

const DIRECTIONS: [Key; 4] = [Key::Up, Key::Down, Key::Left, Key::Right];

// ---------------------------------------------------------------------------
// Throughput
// ---------------------------------------------------------------------------

/// Simulated time against wall time for the headless run.
struct Throughput {
    started: Instant,
    window_start: Instant,
    simulated: f64,
    window_simulated: f64,
    window_busy: f64,
}

impl Throughput {
    fn new() -> Self {
        let now = Instant::now();
        Self {
            started: now,
            window_start: now,
            simulated: 0.0,
            window_simulated: 0.0,
            window_busy: 0.0,
        }
    }

    fn record(&mut self, simulated: f64, busy: f64) {
        self.simulated += simulated;
        self.window_simulated += simulated;
        self.window_busy += busy;

        let wall = self.window_start.elapsed().as_secs_f64();
        if wall < STATS_LOG_INTERVAL {
            return;
        }
        log::info!(
            "{:.0}x real time | {:.1}% of wall time in tick | {:.0}s simulated",
            self.window_simulated / wall,
            100.0 * self.window_busy / wall,
            self.simulated,
        );
        self.window_start = Instant::now();
        self.window_simulated = 0.0;
        self.window_busy = 0.0;
    }

    fn finish(&self) {
        let wall = self.started.elapsed().as_secs_f64().max(f64::EPSILON);
        log::info!(
            "Simulated {:.1}s in {:.3}s wall ({:.0}x real time)",
            self.simulated,
            wall,
            self.simulated / wall,
        );
    }
}

// ---------------------------------------------------------------------------
// Layout files
// ---------------------------------------------------------------------------

/// One row per non-empty line, one digit per tile. Other characters are
/// separators.
fn read_layout(path: &Path) -> Result<Vec<Vec<u8>>, std::io::Error> {
    let text = std::fs::read_to_string(path)?;
    Ok(text
        .lines()
        .map(|line| {
            line.bytes()
                .filter(u8::is_ascii_digit)
                .map(|b| b - b'0')
                .collect::<Vec<u8>>()
        })
        .filter(|row| !row.is_empty())
        .collect())
}

/// Usage: `mazechase [seed] [layout-file]`
fn run() -> Result<(), Box<dyn std::error::Error>> {
    let mut args = std::env::args().skip(1);
    let seed = args.next().map(|s| s.parse::<u64>()).transpose()?;
    let layout = args.next();

    let mut rng = match seed {
        Some(seed) => fastrand::Rng::with_seed(seed),
        None => fastrand::Rng::new(),
    };
    log::info!("Seed: {}", rng.get_seed());
    let mut autopilot = rng.fork();

    let config = SimConfig::default();
    let store = Box::new(MemoryStore::new());
    let mut game = match layout {
        Some(path) => {
            let rows = read_layout(Path::new(&path))?;
            Game::with_layout(&rows[..], config, store, Box::new(rng))?
        }
        None => Game::new(config, store, Box::new(rng)),
    };

    let mut input = LatchedInput::new();
    let mut throughput = Throughput::new();
    let total_ticks = (SESSION_SECONDS / TICK_RATE) as u64;
    game.start();

    for _ in 0..total_ticks {
        if autopilot.f32() < TURN_CHANCE {
            input.press(DIRECTIONS[autopilot.usize(0..DIRECTIONS.len())]);
        }
        for command in input.drain_commands() {
            game.handle_command(command);
        }

        let started = Instant::now();
        game.tick(TICK_RATE as f32, &input);
        throughput.record(TICK_RATE, started.elapsed().as_secs_f64());

        if game.state() == GameState::GameOver {
            break;
        }
    }
    throughput.finish();

    let ledger = game.ledger();
    log::info!(
        "Session over ({}): score {} | level {} | lives {} | best {}",
        game.state().label(),
        ledger.score(),
        ledger.level(),
        ledger.lives(),
        ledger.best(),
    );
    Ok(())
}

fn main() {
    env_logger::init();
    log::info!("mazechase starting up");

    if let Err(e) = run() {
        log::error!("Fatal error: {e}");
        std::process::exit(1);
    }
}
