pub mod collision;
pub mod player;
pub mod pursuer;
pub mod targeting;

use crate::config::SimConfig;
use crate::maze::{Maze, Tile};
use crate::motion::Heading;
use crate::random::RandomSource;
use crate::schedule::{Phase, PhaseChange};
use collision::{Contacts, Eaten};

/// Shared state the systems read or write during one tick.
pub struct TickContext<'a> {
    pub maze: &'a mut Maze,
    pub config: &'a SimConfig,
    pub phase: Phase,
    /// Set on the tick the schedule moved to a new slot.
    pub phase_change: Option<PhaseChange>,
    /// Latched input heading.
    pub heading: Heading,
    pub rng: &'a mut dyn RandomSource,
}

/// What happened during a tick, for the caller to score and schedule.
#[derive(Debug, Default)]
pub struct TickReport {
    pub eaten: Option<Eaten>,
    /// Pursuers frightened by a power pellet, with their fright serials.
    pub frightened: Vec<(hecs::Entity, u32)>,
    pub contacts: Contacts,
}

/// Run all gameplay systems for one playing tick.
pub fn tick(world: &mut hecs::World, ctx: &mut TickContext, dt: f32) -> TickReport {
    // 1. Schedule reversal + phase propagation
    pursuer::sync_phase(world, ctx.maze, ctx.phase, ctx.phase_change);

    // 2. Input into the player's turn buffer
    player::steer(world, ctx.heading);

    // 3. Player movement
    player::advance(world, ctx.maze, dt, ctx.config);

    // 4. Pursuers see the player's post-move tile
    if let Some(view) = player::view(world) {
        pursuer::advance(world, ctx.maze, view, ctx.phase, dt, ctx.config, &mut *ctx.rng);
    }

    // 5. Pellets
    let eaten = collision::consume(world, ctx.maze);
    let frightened = match eaten {
        Some(Eaten {
            kind: Tile::PowerPellet,
            ..
        }) => pursuer::frighten_all(world, ctx.maze, ctx.config),
        _ => Vec::new(),
    };

    // 6. Player/pursuer contacts
    let contacts = collision::resolve_contacts(world, ctx.config);

    TickReport {
        eaten,
        frightened,
        contacts,
    }
}
