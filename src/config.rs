use crate::ecs::components::{PursuerId, PursuerState};
use crate::schedule::{ModeScheduler, PhaseEntry, DEFAULT_SCHEDULE};

/// Player speed in tiles/second.
const PLAYER_SPEED: f32 = 3.0;
/// Pursuer speed while patrolling, pursuing or leaving the den.
const PURSUER_SPEED: f32 = 2.75;
const FRIGHT_SPEED: f32 = 1.5;
/// Captured pursuers race back to the den.
const CAPTURED_SPEED: f32 = 6.0;

const FRIGHT_SECONDS: f64 = 7.0;
/// Ready overlay before play starts.
const READY_SECONDS: f64 = 2.5;
const DEATH_SECONDS: f64 = 1.5;
const LEVEL_CLEAR_SECONDS: f64 = 2.0;
/// Seconds after a round starts before each pursuer leaves the den (A..D).
/// Everyone in the den heads out as soon as play begins.
const DEN_RELEASE_SECONDS: [f64; 4] = [0.0; 4];

/// Largest step a single tick may simulate (absorbs stalls).
const MAX_TICK_SECONDS: f32 = 0.1;
/// Centre-to-centre distance, in tiles, that counts as contact.
const CONTACT_DISTANCE: f32 = 0.8;
/// Blocked player offset decay rate (per second).
const EASE_RATE: f32 = 10.0;
/// How close to a centre the player must be to take a queued turn while stopped.
const TURN_WINDOW: f32 = 0.1;
/// Shy pursuer chases only when farther than this many tiles.
const SHY_RADIUS: f32 = 8.0;
const AMBUSH_LEAD: i32 = 4;
const FLANK_LEAD: i32 = 2;
/// Mouth animation speed (openness per second).
const MOUTH_SPEED: f32 = 3.0;

/// Tuning knobs for one simulation session.
#[derive(Debug, Clone)]
pub struct SimConfig {
    pub player_speed: f32,
    pub pursuer_speed: f32,
    pub fright_speed: f32,
    pub captured_speed: f32,
    pub fright_seconds: f64,
    pub ready_seconds: f64,
    pub death_seconds: f64,
    pub level_clear_seconds: f64,
    pub den_release_seconds: [f64; 4],
    pub max_tick_seconds: f32,
    pub contact_distance: f32,
    pub ease_rate: f32,
    pub turn_window: f32,
    pub shy_radius: f32,
    pub ambush_lead: i32,
    pub flank_lead: i32,
    pub mouth_speed: f32,
    pub schedule: Vec<PhaseEntry>,
}

impl Default for SimConfig {
    fn default() -> Self {
        Self {
            player_speed: PLAYER_SPEED,
            pursuer_speed: PURSUER_SPEED,
            fright_speed: FRIGHT_SPEED,
            captured_speed: CAPTURED_SPEED,
            fright_seconds: FRIGHT_SECONDS,
            ready_seconds: READY_SECONDS,
            death_seconds: DEATH_SECONDS,
            level_clear_seconds: LEVEL_CLEAR_SECONDS,
            den_release_seconds: DEN_RELEASE_SECONDS,
            max_tick_seconds: MAX_TICK_SECONDS,
            contact_distance: CONTACT_DISTANCE,
            ease_rate: EASE_RATE,
            turn_window: TURN_WINDOW,
            shy_radius: SHY_RADIUS,
            ambush_lead: AMBUSH_LEAD,
            flank_lead: FLANK_LEAD,
            mouth_speed: MOUTH_SPEED,
            schedule: DEFAULT_SCHEDULE.to_vec(),
        }
    }
}

impl SimConfig {
    /// Speed a pursuer moves at in the given state.
    pub fn pursuer_speed_for(&self, state: PursuerState) -> f32 {
        match state {
            PursuerState::InsideDen => 0.0,
            PursuerState::Fright => self.fright_speed,
            PursuerState::Captured => self.captured_speed,
            PursuerState::ExitingDen | PursuerState::Patrol | PursuerState::Pursuit => {
                self.pursuer_speed
            }
        }
    }

    pub fn den_release_for(&self, id: PursuerId) -> f64 {
        self.den_release_seconds[id as usize]
    }

    pub fn phase_schedule(&self) -> ModeScheduler {
        ModeScheduler::new(self.schedule.clone())
    }

    /// Clamp a raw frame delta into a safe simulation step.
    pub fn clamp_tick(&self, dt: f32) -> f32 {
        if !dt.is_finite() || dt <= 0.0 {
            0.0
        } else {
            dt.min(self.max_tick_seconds)
        }
    }
}
