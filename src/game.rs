use crate::config::SimConfig;
use crate::ecs::components::{Pursuer, PursuerState};
use crate::ecs::spawn;
use crate::ecs::systems::{self, pursuer, TickContext};
use crate::input::{Command, InputSource};
use crate::ledger::{ScoreLedger, CAPTURE_POINTS, PELLET_POINTS, POWER_PELLET_POINTS};
use crate::maze::{Maze, MazeError, Tile};
use crate::persistence::{BestScoreStore, BEST_SCORE_KEY};
use crate::random::RandomSource;
use crate::render::RenderFrame;
use crate::schedule::{ModeScheduler, Phase};
use crate::timers::{Deferred, DeferredQueue};

/// How often to emit a per-tick trace line (ticks).
const TRACE_INTERVAL: u64 = 60;

/// Top-level session state. Only `Playing` runs the gameplay systems.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GameState {
    Init,
    Ready,
    Playing,
    Paused,
    DeathSequence,
    LevelComplete,
    GameOver,
}

impl GameState {
    pub fn label(self) -> &'static str {
        match self {
            GameState::Init => "init",
            GameState::Ready => "ready",
            GameState::Playing => "playing",
            GameState::Paused => "paused",
            GameState::DeathSequence => "death",
            GameState::LevelComplete => "level-complete",
            GameState::GameOver => "game-over",
        }
    }
}

/// One play session: maze, agents, schedule, score and pending timers.
pub struct Game {
    config: SimConfig,
    /// Untouched layout, copied for every new level.
    template: Maze,
    maze: Maze,
    world: hecs::World,
    player: hecs::Entity,
    roster: Vec<hecs::Entity>,
    schedule: ModeScheduler,
    ledger: ScoreLedger,
    timers: DeferredQueue,
    state: GameState,
    state_changed: bool,
    store: Box<dyn BestScoreStore>,
    rng: Box<dyn RandomSource>,
    /// Simulation seconds. Frozen while paused.
    clock: f64,
    /// Bumped whenever agents go back to their spawn tiles.
    round: u32,
    tick_count: u64,
    frame: RenderFrame,
}

impl Game {
    /// A session on the built-in layout.
    pub fn new(
        config: SimConfig,
        store: Box<dyn BestScoreStore>,
        rng: Box<dyn RandomSource>,
    ) -> Self {
        Self::from_maze(Maze::canonical(), config, store, rng)
    }

    /// A session on a custom layout of tile codes.
    pub fn with_layout<R: AsRef<[u8]>>(
        rows: &[R],
        config: SimConfig,
        store: Box<dyn BestScoreStore>,
        rng: Box<dyn RandomSource>,
    ) -> Result<Self, MazeError> {
        let maze = Maze::from_codes(rows)?;
        Ok(Self::from_maze(maze, config, store, rng))
    }

    fn from_maze(
        template: Maze,
        config: SimConfig,
        store: Box<dyn BestScoreStore>,
        rng: Box<dyn RandomSource>,
    ) -> Self {
        let best = store.load(BEST_SCORE_KEY).unwrap_or(0);
        let schedule = config.phase_schedule();
        let maze = template.clone();
        let mut world = hecs::World::new();
        let player = spawn::spawn_player(&mut world, &maze);
        let roster = spawn::spawn_roster(&mut world, &maze, schedule.phase(), &config);
        log::info!(
            "Session ready: {}x{} maze, {} pellets, best score {}",
            maze.width(),
            maze.height(),
            maze.remaining_pellets(),
            best
        );

        let mut game = Self {
            config,
            template,
            maze,
            world,
            player,
            roster,
            schedule,
            ledger: ScoreLedger::new(best),
            timers: DeferredQueue::new(),
            state: GameState::Init,
            state_changed: true,
            store,
            rng,
            clock: 0.0,
            round: 0,
            tick_count: 0,
            frame: RenderFrame::default(),
        };
        game.refresh_frame();
        game
    }

    // -----------------------------------------------------------------------
    // Lifecycle
    // -----------------------------------------------------------------------

    /// Leave `Init` and begin the first ready countdown.
    pub fn start(&mut self) {
        if self.state != GameState::Init {
            log::debug!("start() ignored in state {}", self.state.label());
            return;
        }
        self.schedule.reset();
        self.enter_ready();
    }

    /// Fresh session after game over: score, lives, level, maze and schedule.
    pub fn restart(&mut self) {
        log::info!("Restarting session");
        self.ledger.reset();
        self.schedule.reset();
        self.timers.clear();
        self.setup_level();
        self.enter_ready();
    }

    fn next_level(&mut self) {
        self.ledger.advance_level();
        log::info!("Level {} begins", self.ledger.level());
        self.timers.clear();
        self.setup_level();
        self.enter_ready();
    }

    /// Refill the maze and respawn every agent.
    fn setup_level(&mut self) {
        self.maze = self.template.clone();
        self.world.clear();
        self.player = spawn::spawn_player(&mut self.world, &self.maze);
        self.roster =
            spawn::spawn_roster(&mut self.world, &self.maze, self.schedule.phase(), &self.config);
        self.round += 1;
    }

    fn reset_positions(&mut self) {
        spawn::reset_positions(&mut self.world, &self.maze, self.schedule.phase(), &self.config);
        self.round += 1;
    }

    fn enter_ready(&mut self) {
        self.set_state(GameState::Ready);
        self.timers
            .schedule(self.clock + self.config.ready_seconds, Deferred::BeginPlay);
    }

    fn set_state(&mut self, state: GameState) {
        if self.state == state {
            return;
        }
        log::info!("Game state: {} -> {}", self.state.label(), state.label());
        self.state = state;
        self.state_changed = true;
    }

    /// Apply a one-shot command from the host.
    pub fn handle_command(&mut self, command: Command) {
        match command {
            Command::TogglePause => match self.state {
                GameState::Playing => self.set_state(GameState::Paused),
                GameState::Paused => self.set_state(GameState::Playing),
                _ => {}
            },
            Command::Confirm => match self.state {
                GameState::GameOver => self.restart(),
                GameState::Init => self.start(),
                _ => {}
            },
        }
    }

    // -----------------------------------------------------------------------
    // Tick
    // -----------------------------------------------------------------------

    /// Advance the session by `dt` seconds of host time.
    pub fn tick(&mut self, dt: f32, input: &dyn InputSource) -> &RenderFrame {
        let dt = self.config.clamp_tick(dt);
        self.tick_count += 1;
        self.frame.eaten.clear();

        if self.state != GameState::Paused {
            self.clock += f64::from(dt);
            self.fire_due();

            if self.state == GameState::Playing {
                self.play(dt, input);
            }
            systems::player::animate_expiring(&mut self.world, dt, &self.config);
        }

        if self.tick_count % TRACE_INTERVAL == 0 {
            log::trace!(
                "tick {} | t={:.2}s | {} | phase {} | score {} | pellets {}",
                self.tick_count,
                self.clock,
                self.state.label(),
                self.schedule.phase().label(),
                self.ledger.score(),
                self.maze.remaining_pellets(),
            );
        }

        self.refresh_frame();
        &self.frame
    }

    fn play(&mut self, dt: f32, input: &dyn InputSource) {
        let phase_change = self.schedule.advance(f64::from(dt));
        let mut ctx = TickContext {
            maze: &mut self.maze,
            config: &self.config,
            phase: self.schedule.phase(),
            phase_change,
            heading: input.current_heading(),
            rng: self.rng.as_mut(),
        };
        let report = systems::tick(&mut self.world, &mut ctx, dt);

        if let Some(eaten) = report.eaten {
            match eaten.kind {
                Tile::Pellet => self.ledger.award(PELLET_POINTS),
                Tile::PowerPellet => {
                    self.ledger.award(POWER_PELLET_POINTS);
                    log::debug!("Power pellet at {}", eaten.tile);
                }
                _ => {}
            }
            self.frame.eaten.push(eaten.tile);
        }

        let expiry = self.clock + self.config.fright_seconds;
        for (entity, serial) in report.frightened {
            self.timers
                .schedule(expiry, Deferred::FrightExpired { entity, serial });
        }

        for _ in &report.contacts.captured {
            self.ledger.award(CAPTURE_POINTS);
        }

        if report.contacts.caught_player {
            let remaining = self.ledger.lose_life();
            log::info!("Player caught, {remaining} lives left");
            self.set_state(GameState::DeathSequence);
            self.timers.schedule(
                self.clock + self.config.death_seconds,
                Deferred::RespawnAfterDeath,
            );
            return;
        }

        if self.maze.is_cleared() {
            log::info!("Level {} cleared", self.ledger.level());
            self.set_state(GameState::LevelComplete);
            self.timers.schedule(
                self.clock + self.config.level_clear_seconds,
                Deferred::AdvanceLevel,
            );
        }
    }

    /// Fire every deferred effect that is due. Effects may schedule further
    /// effects that are already due.
    fn fire_due(&mut self) {
        loop {
            let due = self.timers.drain_due(self.clock);
            if due.is_empty() {
                break;
            }
            for event in due {
                self.fire(event);
            }
        }
    }

    fn fire(&mut self, event: Deferred) {
        match event {
            Deferred::BeginPlay => {
                if self.state == GameState::Ready {
                    self.set_state(GameState::Playing);
                    self.schedule_den_releases();
                }
            }
            Deferred::RespawnAfterDeath => {
                if self.state != GameState::DeathSequence {
                    return;
                }
                if self.ledger.is_game_over() {
                    self.save_best();
                    self.set_state(GameState::GameOver);
                } else {
                    self.reset_positions();
                    self.enter_ready();
                }
            }
            Deferred::AdvanceLevel => {
                if self.state == GameState::LevelComplete {
                    self.next_level();
                }
            }
            Deferred::FrightExpired { entity, serial } => {
                pursuer::expire_fright(
                    &mut self.world,
                    entity,
                    serial,
                    self.schedule.phase(),
                    &self.config,
                );
            }
            Deferred::ReleaseFromDen { entity, round } => {
                if round != self.round {
                    log::debug!("Stale den release for {entity:?} dropped");
                    return;
                }
                pursuer::release_from_den(&mut self.world, entity, &self.config);
            }
        }
    }

    fn schedule_den_releases(&mut self) {
        for &entity in &self.roster {
            let Ok(p) = self.world.get::<&Pursuer>(entity) else {
                continue;
            };
            if p.state != PursuerState::InsideDen {
                continue;
            }
            let due = self.clock + self.config.den_release_for(p.id);
            self.timers.schedule(
                due,
                Deferred::ReleaseFromDen {
                    entity,
                    round: self.round,
                },
            );
        }
    }

    fn save_best(&mut self) {
        if self.ledger.record_best() {
            log::info!("New best score: {}", self.ledger.best());
            self.store.save(BEST_SCORE_KEY, self.ledger.best());
        }
    }

    fn refresh_frame(&mut self) {
        self.frame.score = self.ledger.score();
        self.frame.lives = self.ledger.lives();
        self.frame.level = self.ledger.level();
        self.frame.best = self.ledger.best();
        self.frame.state = self.state.label();
        self.frame.state_changed = std::mem::take(&mut self.state_changed);
        self.frame.pellets_left = self.maze.remaining_pellets();
        self.frame.collect_entities(&self.world);
    }

    // -----------------------------------------------------------------------
    // Accessors
    // -----------------------------------------------------------------------

    pub fn state(&self) -> GameState {
        self.state
    }

    pub fn ledger(&self) -> &ScoreLedger {
        &self.ledger
    }

    pub fn maze(&self) -> &Maze {
        &self.maze
    }

    pub fn world(&self) -> &hecs::World {
        &self.world
    }

    pub fn player(&self) -> hecs::Entity {
        self.player
    }

    /// Pursuer entities in roster order (A, B, C, D).
    pub fn roster(&self) -> &[hecs::Entity] {
        &self.roster
    }

    pub fn phase(&self) -> Phase {
        self.schedule.phase()
    }

    pub fn clock(&self) -> f64 {
        self.clock
    }

    pub fn frame(&self) -> &RenderFrame {
        &self.frame
    }

    pub fn pending_timers(&self) -> usize {
        self.timers.len()
    }

    pub fn config(&self) -> &SimConfig {
        &self.config
    }
}
