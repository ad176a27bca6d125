use glam::IVec2;

use crate::config::SimConfig;
use crate::ecs::components::{Leader, Pursuer, PursuerState, Speed};
use crate::ecs::systems::targeting::{
    candidate_headings, closest_heading, pursuit_target, TargetInputs,
};
use crate::maze::{Maze, Walker};
use crate::motion::{Heading, MotionBody, Turn};
use crate::random::RandomSource;
use crate::schedule::{Phase, PhaseChange};

/// What pursuers can see of the player this tick.
#[derive(Debug, Clone, Copy)]
pub struct PlayerView {
    pub tile: IVec2,
    pub heading: Heading,
}

/// Per-tick inputs for the decision callback.
struct DecisionContext<'a> {
    maze: &'a Maze,
    config: &'a SimConfig,
    player: PlayerView,
    leader_tile: Option<IVec2>,
    phase: Phase,
}

fn walker_for(state: PursuerState) -> Walker {
    match state {
        PursuerState::ExitingDen | PursuerState::Captured => Walker::PursuerThroughDoor,
        _ => Walker::Pursuer,
    }
}

fn set_state(pursuer: &mut Pursuer, speed: &mut Speed, state: PursuerState, config: &SimConfig) {
    pursuer.state = state;
    speed.0 = config.pursuer_speed_for(state);
}

/// Reverse in place if the tile behind is open.
fn reverse_if_open(body: &mut MotionBody, maze: &Maze, walker: Walker) -> bool {
    let reverse = body.heading.opposite();
    if reverse != Heading::None && maze.can_enter(body.neighbour(reverse), walker) {
        body.heading = reverse;
        true
    } else {
        false
    }
}

/// Put a pursuer back on its spawn tile. Den-row spawns come back in
/// `in_den`, others rejoin the global phase.
pub fn respawn(
    maze: &Maze,
    body: &mut MotionBody,
    pursuer: &mut Pursuer,
    speed: &mut Speed,
    in_den: PursuerState,
    phase: Phase,
    config: &SimConfig,
) {
    *body = MotionBody::at(pursuer.spawn);
    let state = if pursuer.spawn.y == maze.den_centre().y {
        in_den
    } else {
        PursuerState::from_phase(phase)
    };
    set_state(pursuer, speed, state, config);
}

/// Apply the schedule: reverse everyone scheduled when a slot changes, then
/// pull scheduled pursuers onto the current phase.
pub fn sync_phase(world: &mut hecs::World, maze: &Maze, phase: Phase, change: Option<PhaseChange>) {
    for (_, (body, pursuer)) in world.query_mut::<(&mut MotionBody, &mut Pursuer)>() {
        if !pursuer.state.is_scheduled() {
            continue;
        }
        if change.is_some() {
            reverse_if_open(body, maze, Walker::Pursuer);
        }
        pursuer.state = PursuerState::from_phase(phase);
    }
}

/// Frighten every eligible pursuer. Returns (entity, serial) pairs whose
/// expiry the caller must schedule.
pub fn frighten_all(
    world: &mut hecs::World,
    maze: &Maze,
    config: &SimConfig,
) -> Vec<(hecs::Entity, u32)> {
    let mut frightened = Vec::new();
    for (entity, (body, pursuer, speed)) in
        world.query_mut::<(&mut MotionBody, &mut Pursuer, &mut Speed)>()
    {
        if matches!(
            pursuer.state,
            PursuerState::Captured | PursuerState::InsideDen
        ) {
            continue;
        }
        set_state(pursuer, speed, PursuerState::Fright, config);
        reverse_if_open(body, maze, Walker::Pursuer);
        pursuer.fright_serial = pursuer.fright_serial.wrapping_add(1);
        frightened.push((entity, pursuer.fright_serial));
    }
    if !frightened.is_empty() {
        log::debug!("{} pursuers frightened", frightened.len());
    }
    frightened
}

/// Fright window over. Only applies if the pursuer is still frightened by the
/// same power pellet.
pub fn expire_fright(
    world: &mut hecs::World,
    entity: hecs::Entity,
    serial: u32,
    phase: Phase,
    config: &SimConfig,
) -> bool {
    let Ok((pursuer, speed)) = world.query_one_mut::<(&mut Pursuer, &mut Speed)>(entity) else {
        log::debug!("Fright expiry for missing pursuer {entity:?} dropped");
        return false;
    };
    if pursuer.state != PursuerState::Fright || pursuer.fright_serial != serial {
        return false;
    }
    set_state(pursuer, speed, PursuerState::from_phase(phase), config);
    true
}

/// Let a waiting pursuer start its walk out of the den.
pub fn release_from_den(world: &mut hecs::World, entity: hecs::Entity, config: &SimConfig) -> bool {
    let Ok((pursuer, speed)) = world.query_one_mut::<(&mut Pursuer, &mut Speed)>(entity) else {
        log::debug!("Den release for missing pursuer {entity:?} dropped");
        return false;
    };
    if pursuer.state != PursuerState::InsideDen {
        return false;
    }
    set_state(pursuer, speed, PursuerState::ExitingDen, config);
    log::debug!("Pursuer {} leaving the den", pursuer.id.label());
    true
}

/// Straight-line walk from the den to its exit waypoint.
fn exit_heading(tile: IVec2, exit: IVec2) -> Heading {
    if tile.x < exit.x {
        Heading::Right
    } else if tile.x > exit.x {
        Heading::Left
    } else if tile.y > exit.y {
        Heading::Up
    } else {
        Heading::Left
    }
}

/// Decision at a tile centre. Sets `home_reached` when a captured pursuer
/// arrives at the den centre.
fn decide(
    body: &MotionBody,
    pursuer: &mut Pursuer,
    ctx: &DecisionContext,
    rng: &mut dyn RandomSource,
    home_reached: &mut bool,
) -> Turn {
    match pursuer.state {
        PursuerState::InsideDen => return Turn::Go(Heading::None),
        PursuerState::ExitingDen => {
            let exit = ctx.maze.den_exit();
            if body.tile == exit {
                // Speed is shared between exiting and scheduled states.
                pursuer.state = PursuerState::from_phase(ctx.phase);
                return Turn::Go(Heading::Left);
            }
            return Turn::Go(exit_heading(body.tile, exit));
        }
        PursuerState::Captured if body.tile == ctx.maze.den_centre() => {
            *home_reached = true;
            return Turn::Go(Heading::None);
        }
        _ => {}
    }

    let walker = walker_for(pursuer.state);
    let open: Vec<Heading> = Heading::ALL
        .into_iter()
        .filter(|&h| ctx.maze.can_enter(body.neighbour(h), walker))
        .collect();
    let candidates = candidate_headings(&open, body.heading);
    if candidates.is_empty() {
        return Turn::Go(Heading::None);
    }

    if pursuer.state == PursuerState::Fright {
        return Turn::Go(candidates[rng.pick(candidates.len())]);
    }

    let target = match pursuer.state {
        PursuerState::Patrol => pursuer.home,
        PursuerState::Captured => ctx.maze.den_centre(),
        _ => pursuit_target(
            pursuer.id.personality(),
            &TargetInputs {
                player_tile: ctx.player.tile,
                player_heading: ctx.player.heading,
                leader_tile: ctx.leader_tile,
                own_tile: body.tile,
                home: pursuer.home,
            },
            ctx.config,
        ),
    };
    Turn::Go(closest_heading(body.tile, &candidates, target))
}

/// Move every pursuer for one tick.
pub fn advance(
    world: &mut hecs::World,
    maze: &Maze,
    player: PlayerView,
    phase: Phase,
    dt: f32,
    config: &SimConfig,
    rng: &mut dyn RandomSource,
) {
    // Read pass: leader positions before anyone moves.
    let tiles: Vec<(hecs::Entity, IVec2)> = world
        .query::<(&MotionBody, &Pursuer)>()
        .iter()
        .map(|(entity, (body, _))| (entity, body.tile))
        .collect();

    for (_, (body, pursuer, speed, leader)) in
        world.query_mut::<(&mut MotionBody, &mut Pursuer, &mut Speed, Option<&Leader>)>()
    {
        let leader_tile = leader.and_then(|l| {
            tiles
                .iter()
                .find(|(entity, _)| *entity == l.0)
                .map(|(_, tile)| *tile)
        });
        let ctx = DecisionContext {
            maze,
            config,
            player,
            leader_tile,
            phase,
        };

        let mut home_reached = false;
        body.advance(speed.0 * dt, maze, |b| {
            decide(b, pursuer, &ctx, rng, &mut home_reached)
        });

        if home_reached {
            log::debug!("Pursuer {} back in the den", pursuer.id.label());
            respawn(maze, body, pursuer, speed, PursuerState::ExitingDen, phase, config);
        }
    }
}
