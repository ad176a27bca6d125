use glam::Vec2;

use crate::ecs::components::{LifeCycle, Mouth, Player, Pursuer, PursuerId};
use crate::motion::{Heading, MotionBody};

/// Which agent an [`EntityView`] draws.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EntityKind {
    Player,
    Pursuer(PursuerId),
}

/// Per-entity data the presentation layer draws each frame.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct EntityView {
    pub kind: EntityKind,
    /// Centre of the agent in tile units (x right, y down).
    pub position: Vec2,
    pub heading: Heading,
    /// Short state name for styling ("fright", "captured", "expiring", ...).
    pub state: &'static str,
    /// False for captured pursuers: only their eyes are drawn.
    pub body_visible: bool,
    /// Mouth opening for the player, 0.0 for pursuers.
    pub mouth: f32,
}

impl EntityView {
    pub fn from_player(body: &MotionBody, player: &Player, mouth: &Mouth) -> Self {
        let state = match player.life {
            LifeCycle::Active => "active",
            LifeCycle::Expiring => "expiring",
            LifeCycle::Inactive => "inactive",
        };
        Self {
            kind: EntityKind::Player,
            position: body.centre(),
            heading: body.heading,
            state,
            body_visible: true,
            mouth: mouth.openness,
        }
    }

    pub fn from_pursuer(body: &MotionBody, pursuer: &Pursuer) -> Self {
        Self {
            kind: EntityKind::Pursuer(pursuer.id),
            position: body.centre(),
            heading: body.heading,
            state: pursuer.state.label(),
            body_visible: pursuer.body_visible(),
            mouth: 0.0,
        }
    }
}
