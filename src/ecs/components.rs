use glam::IVec2;

use crate::motion::Heading;
use crate::schedule::Phase;

/// Fixed pursuer identities. Each one carries its own targeting personality.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum PursuerId {
    A,
    B,
    C,
    D,
}

impl PursuerId {
    pub const ALL: [PursuerId; 4] = [PursuerId::A, PursuerId::B, PursuerId::C, PursuerId::D];

    pub fn personality(self) -> Personality {
        match self {
            PursuerId::A => Personality::Chaser,
            PursuerId::B => Personality::Ambusher,
            PursuerId::C => Personality::Flanker,
            PursuerId::D => Personality::Shy,
        }
    }

    pub fn label(self) -> &'static str {
        match self {
            PursuerId::A => "A",
            PursuerId::B => "B",
            PursuerId::C => "C",
            PursuerId::D => "D",
        }
    }
}

/// How a pursuer picks its target while in pursuit.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Personality {
    /// Heads straight for the player's tile.
    Chaser,
    /// Aims a few tiles ahead of the player.
    Ambusher,
    /// Doubles the vector from the leader to a point ahead of the player.
    Flanker,
    /// Chases from afar, retreats to its corner up close.
    Shy,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PursuerState {
    InsideDen,
    ExitingDen,
    Patrol,
    Pursuit,
    Fright,
    Captured,
}

impl PursuerState {
    pub fn from_phase(phase: Phase) -> Self {
        match phase {
            Phase::Patrol => PursuerState::Patrol,
            Phase::Pursuit => PursuerState::Pursuit,
        }
    }

    /// Follows the global schedule (not overridden by a local state).
    pub fn is_scheduled(self) -> bool {
        matches!(self, PursuerState::Patrol | PursuerState::Pursuit)
    }

    pub fn label(self) -> &'static str {
        match self {
            PursuerState::InsideDen => "inside-den",
            PursuerState::ExitingDen => "exiting-den",
            PursuerState::Patrol => "patrol",
            PursuerState::Pursuit => "pursuit",
            PursuerState::Fright => "fright",
            PursuerState::Captured => "captured",
        }
    }
}

/// Per-pursuer behaviour record. Position lives in the entity's `MotionBody`.
#[derive(Debug, Clone, Copy)]
pub struct Pursuer {
    pub id: PursuerId,
    pub state: PursuerState,
    /// Patrol target.
    pub home: IVec2,
    pub spawn: IVec2,
    /// Bumped on every fright so stale expiry events can be told apart.
    pub fright_serial: u32,
}

impl Pursuer {
    pub fn body_visible(&self) -> bool {
        self.state != PursuerState::Captured
    }
}

/// Tiles per second.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Speed(pub f32);

/// Pursuer whose position feeds this pursuer's targeting.
#[derive(Debug, Clone, Copy)]
pub struct Leader(pub hecs::Entity);

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LifeCycle {
    Active,
    Expiring,
    Inactive,
}

/// The player-controlled agent.
#[derive(Debug, Clone, Copy)]
pub struct Player {
    /// Buffered turn request, taken at the next tile centre where it fits.
    pub queued: Heading,
    pub life: LifeCycle,
    pub spawn: IVec2,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MouthPhase {
    OpenCycle,
    FullOpen,
}

/// Mouth animation driven by the player's heading and life cycle.
#[derive(Debug, Clone, Copy)]
pub struct Mouth {
    /// 0.0 closed, 1.0 fully open.
    pub openness: f32,
    pub opening: bool,
    pub phase: MouthPhase,
}

impl Default for Mouth {
    fn default() -> Self {
        Self {
            openness: 0.35,
            opening: true,
            phase: MouthPhase::OpenCycle,
        }
    }
}
