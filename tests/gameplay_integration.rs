//! End-to-end sessions driven through `Game::tick`

use std::cell::RefCell;
use std::rc::Rc;

use mazechase::config::SimConfig;
use mazechase::ecs::components::{LifeCycle, Player, Pursuer, PursuerState};
use mazechase::input::Command;
use mazechase::motion::Heading;
use mazechase::persistence::{BestScoreStore, MemoryStore, BEST_SCORE_KEY};
use mazechase::random::ScriptedPicks;
use mazechase::schedule::{Phase, PhaseEntry};
use mazechase::{Game, GameState};

/// Store handle the test keeps a copy of after the game takes ownership.
#[derive(Clone, Default)]
struct SharedStore(Rc<RefCell<MemoryStore>>);

impl BestScoreStore for SharedStore {
    fn load(&self, key: &str) -> Option<u32> {
        self.0.borrow().load(key)
    }

    fn save(&mut self, key: &str, score: u32) {
        self.0.borrow_mut().save(key, score);
    }
}

fn session(rows: &[[u8; 9]], store: SharedStore) -> Game {
    Game::with_layout(
        rows,
        SimConfig::default(),
        Box::new(store),
        Box::new(ScriptedPicks::new(vec![0])),
    )
    .unwrap()
}

/// Tick until the game reaches `state`, or give up after `limit` ticks.
fn run_until(game: &mut Game, state: GameState, heading: Heading, limit: usize) -> bool {
    for _ in 0..limit {
        if game.state() == state {
            return true;
        }
        game.tick(1.0 / 60.0, &heading);
    }
    game.state() == state
}

fn pursuer_state(game: &Game, index: usize) -> PursuerState {
    game.world()
        .get::<&Pursuer>(game.roster()[index])
        .unwrap()
        .state
}

// Corridor with a player start, a pellet behind it and a sealed-off pellet
// so the level never clears by accident. Pursuer A patrols its own corner.
const DUEL: [[u8; 9]; 5] = [
    [1, 1, 1, 1, 1, 1, 1, 1, 1],
    [1, 2, 5, 0, 0, 0, 0, 6, 1],
    [1, 1, 1, 1, 1, 1, 1, 1, 1],
    [1, 1, 1, 1, 2, 1, 1, 1, 1],
    [1, 1, 1, 1, 1, 1, 1, 1, 1],
];

// Power pellet right in front of the player.
const HUNT: [[u8; 9]; 5] = [
    [1, 1, 1, 1, 1, 1, 1, 1, 1],
    [1, 2, 5, 3, 0, 0, 0, 6, 1],
    [1, 1, 1, 1, 1, 1, 1, 1, 1],
    [1, 1, 1, 1, 2, 1, 1, 1, 1],
    [1, 1, 1, 1, 1, 1, 1, 1, 1],
];

// Two pellets, no pursuers.
const SPRINT: [[u8; 9]; 3] = [
    [1, 1, 1, 1, 1, 1, 1, 1, 1],
    [1, 5, 2, 2, 0, 0, 0, 0, 1],
    [1, 1, 1, 1, 1, 1, 1, 1, 1],
];

#[test]
fn clearing_the_maze_completes_the_level_once() {
    let mut game = session(&SPRINT, SharedStore::default());
    game.start();
    assert!(run_until(&mut game, GameState::Playing, Heading::None, 200));

    let mut completions = 0;
    let mut eaten = Vec::new();
    for _ in 0..400 {
        let frame = game.tick(1.0 / 60.0, &Heading::Right);
        eaten.extend(frame.eaten.iter().copied());
        if frame.state_changed && frame.state == "level-complete" {
            completions += 1;
        }
        if game.ledger().level() == 2 {
            break;
        }
    }

    assert_eq!(completions, 1);
    assert_eq!(eaten.len(), 2);
    assert_eq!(game.ledger().score(), 20);
    assert_eq!(game.ledger().level(), 2);
    assert_eq!(game.state(), GameState::Ready);
    assert_eq!(game.maze().remaining_pellets(), 2);
}

#[test]
fn power_pellet_then_capture_scores_250() {
    let mut game = session(&HUNT, SharedStore::default());
    game.start();
    assert!(run_until(&mut game, GameState::Playing, Heading::None, 200));

    let mut frightened = false;
    for _ in 0..600 {
        game.tick(1.0 / 60.0, &Heading::Right);
        if pursuer_state(&game, 0) == PursuerState::Fright {
            frightened = true;
        }
        if game.ledger().score() >= 250 {
            break;
        }
    }

    assert!(frightened);
    assert_eq!(game.ledger().score(), 250);
    assert_eq!(pursuer_state(&game, 0), PursuerState::Captured);
    assert_eq!(game.ledger().lives(), 3);
    assert_eq!(game.state(), GameState::Playing);
    // Captured pursuers only show their eyes.
    assert!(!game.frame().entities[1].body_visible);
}

#[test]
fn three_catches_end_the_game_and_save_the_best() {
    let store = SharedStore::default();
    let mut game = session(&DUEL, store.clone());
    game.start();

    assert!(run_until(&mut game, GameState::DeathSequence, Heading::Left, 2_000));
    // The life goes at the moment of contact.
    assert_eq!(game.ledger().lives(), 2);
    let life = game.world().get::<&Player>(game.player()).unwrap().life;
    assert_eq!(life, LifeCycle::Expiring);

    assert!(run_until(&mut game, GameState::Ready, Heading::Left, 200));
    let life = game.world().get::<&Player>(game.player()).unwrap().life;
    assert_eq!(life, LifeCycle::Active);

    assert!(run_until(&mut game, GameState::GameOver, Heading::Left, 3_000));
    assert_eq!(game.ledger().lives(), 0);
    assert_eq!(game.ledger().score(), 10);
    assert_eq!(store.0.borrow().load(BEST_SCORE_KEY), Some(10));

    game.handle_command(Command::Confirm);
    assert_eq!(game.state(), GameState::Ready);
    assert_eq!(game.ledger().score(), 0);
    assert_eq!(game.ledger().lives(), 3);
    assert_eq!(game.ledger().level(), 1);
    assert_eq!(game.ledger().best(), 10);
    assert_eq!(game.maze().remaining_pellets(), 2);
}

#[test]
fn schedule_switches_to_pursuit_after_seven_seconds() {
    let config = SimConfig {
        schedule: vec![
            PhaseEntry::timed(Phase::Patrol, 7.0),
            PhaseEntry::timed(Phase::Pursuit, 20.0),
        ],
        // Keep the den occupants at home so nothing wanders onto the player.
        den_release_seconds: [0.0, 0.0, 100.0, 100.0],
        ..SimConfig::default()
    };
    let mut game = Game::new(
        config,
        Box::new(MemoryStore::new()),
        Box::new(ScriptedPicks::new(vec![0])),
    );
    game.start();
    for _ in 0..25 {
        game.tick(0.1, &Heading::None);
    }
    assert_eq!(game.state(), GameState::Playing);

    // The tick that began play already counted 0.1s of schedule time.
    for _ in 0..68 {
        game.tick(0.1, &Heading::None);
    }
    assert_eq!(game.phase(), Phase::Patrol);
    game.tick(0.1, &Heading::None);
    assert_eq!(game.phase(), Phase::Pursuit);
    assert_eq!(pursuer_state(&game, 0), PursuerState::Pursuit);
}

#[test]
fn pause_stops_timers_too() {
    let mut game = session(&SPRINT, SharedStore::default());
    game.start();
    for _ in 0..10 {
        game.tick(0.1, &Heading::None);
    }
    // Ready can't be paused; the countdown keeps running.
    game.handle_command(Command::TogglePause);
    assert_eq!(game.state(), GameState::Ready);

    for _ in 0..15 {
        game.tick(0.1, &Heading::None);
    }
    assert_eq!(game.state(), GameState::Playing);
    game.handle_command(Command::TogglePause);
    let clock = game.clock();
    let pending = game.pending_timers();
    for _ in 0..100 {
        game.tick(0.1, &Heading::Right);
    }
    assert_eq!(game.state(), GameState::Paused);
    assert_eq!(game.clock(), clock);
    assert_eq!(game.pending_timers(), pending);
    assert_eq!(game.maze().remaining_pellets(), 2);
}

#[test]
fn huge_and_bogus_deltas_are_clamped() {
    let mut game = session(&SPRINT, SharedStore::default());
    game.start();
    game.tick(f32::NAN, &Heading::None);
    game.tick(-1.0, &Heading::None);
    assert_eq!(game.clock(), 0.0);
    game.tick(10.0, &Heading::None);
    assert!((game.clock() - 0.1).abs() < 1e-6);
}
