use glam::IVec2;

use crate::config::SimConfig;
use crate::ecs::components::*;
use crate::maze::{Maze, Tile};
use crate::motion::{Heading, MotionBody};
use crate::schedule::Phase;

/// Used when a layout has no player start.
const FALLBACK_PLAYER_START: IVec2 = IVec2::new(1, 1);

/// Patrol corner for each pursuer.
pub fn home_corner(id: PursuerId, maze: &Maze) -> IVec2 {
    let (w, h) = (maze.width(), maze.height());
    match id {
        PursuerId::A => IVec2::new(w - 2, 1),
        PursuerId::B => IVec2::new(1, 1),
        PursuerId::C => IVec2::new(w - 2, h - 2),
        PursuerId::D => IVec2::new(1, h - 2),
    }
}

/// Den-row spawns wait inside; everyone else starts on the current phase.
fn initial_state(spawn: IVec2, maze: &Maze, phase: Phase) -> PursuerState {
    if spawn.y == maze.den_centre().y {
        PursuerState::InsideDen
    } else {
        PursuerState::from_phase(phase)
    }
}

/// Spawn the player at the layout's start tile.
pub fn spawn_player(world: &mut hecs::World, maze: &Maze) -> hecs::Entity {
    let start = maze.find(Tile::PlayerStart).unwrap_or_else(|| {
        log::warn!("Layout has no player start, using {FALLBACK_PLAYER_START}");
        FALLBACK_PLAYER_START
    });
    world.spawn((
        MotionBody::at(start),
        Player {
            queued: Heading::None,
            life: LifeCycle::Active,
            spawn: start,
        },
        Mouth::default(),
    ))
}

/// Spawn one pursuer per start tile found in the layout, in roster order.
/// The flanker follows the chaser when both exist.
pub fn spawn_roster(
    world: &mut hecs::World,
    maze: &Maze,
    phase: Phase,
    config: &SimConfig,
) -> Vec<hecs::Entity> {
    let mut roster = Vec::with_capacity(PursuerId::ALL.len());
    let mut chaser = None;

    for id in PursuerId::ALL {
        let Some(spawn) = maze.find(Tile::PursuerStart(id)) else {
            log::warn!("Layout has no start tile for pursuer {}", id.label());
            continue;
        };
        let state = initial_state(spawn, maze, phase);
        let entity = world.spawn((
            MotionBody::at(spawn),
            Pursuer {
                id,
                state,
                home: home_corner(id, maze),
                spawn,
                fright_serial: 0,
            },
            Speed(config.pursuer_speed_for(state)),
        ));
        if id.personality() == Personality::Chaser {
            chaser = Some(entity);
        }
        if id.personality() == Personality::Flanker {
            if let Some(leader) = chaser {
                if let Err(e) = world.insert_one(entity, Leader(leader)) {
                    log::warn!("Could not attach leader to pursuer {}: {e}", id.label());
                }
            }
        }
        roster.push(entity);
    }

    log::info!("Spawned {} pursuers", roster.len());
    roster
}

/// Put the player and every pursuer back on their spawn tiles.
pub fn reset_positions(world: &mut hecs::World, maze: &Maze, phase: Phase, config: &SimConfig) {
    for (_, (body, player, mouth)) in
        world.query_mut::<(&mut MotionBody, &mut Player, &mut Mouth)>()
    {
        *body = MotionBody::at(player.spawn);
        player.queued = Heading::None;
        player.life = LifeCycle::Active;
        *mouth = Mouth::default();
    }
    for (_, (body, pursuer, speed)) in
        world.query_mut::<(&mut MotionBody, &mut Pursuer, &mut Speed)>()
    {
        *body = MotionBody::at(pursuer.spawn);
        pursuer.state = initial_state(pursuer.spawn, maze, phase);
        speed.0 = config.pursuer_speed_for(pursuer.state);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn canonical_roster() {
        let config = SimConfig::default();
        let maze = Maze::canonical();
        let mut world = hecs::World::new();
        let player = spawn_player(&mut world, &maze);
        let roster = spawn_roster(&mut world, &maze, Phase::Patrol, &config);

        assert_eq!(
            world.get::<&MotionBody>(player).unwrap().tile,
            IVec2::new(9, 16)
        );
        assert_eq!(roster.len(), 4);

        let expected = [
            (IVec2::new(10, 12), PursuerState::Patrol, IVec2::new(19, 1)),
            (IVec2::new(9, 10), PursuerState::InsideDen, IVec2::new(1, 1)),
            (IVec2::new(10, 10), PursuerState::InsideDen, IVec2::new(19, 18)),
            (IVec2::new(11, 10), PursuerState::InsideDen, IVec2::new(1, 18)),
        ];
        for (&entity, (spawn, state, home)) in roster.iter().zip(expected) {
            let p = *world.get::<&Pursuer>(entity).unwrap();
            assert_eq!(p.spawn, spawn);
            assert_eq!(p.state, state);
            assert_eq!(p.home, home);
        }

        let leader = world.get::<&Leader>(roster[2]).unwrap().0;
        assert_eq!(leader, roster[0]);
        assert!(world.get::<&Leader>(roster[1]).is_err());
        assert_eq!(world.get::<&Speed>(roster[3]).unwrap().0, 0.0);
    }

    #[test]
    fn missing_starts_are_tolerated() {
        let config = SimConfig::default();
        let maze = Maze::from_codes(&[[1u8, 1, 1], [1, 8, 1], [1, 1, 1]]).unwrap();
        let mut world = hecs::World::new();
        let player = spawn_player(&mut world, &maze);
        let roster = spawn_roster(&mut world, &maze, Phase::Patrol, &config);
        assert_eq!(roster.len(), 1);
        assert!(world.get::<&Leader>(roster[0]).is_err());
        assert_eq!(
            world.get::<&MotionBody>(player).unwrap().tile,
            FALLBACK_PLAYER_START
        );
    }

    #[test]
    fn reset_restores_spawn_state() {
        let config = SimConfig::default();
        let maze = Maze::canonical();
        let mut world = hecs::World::new();
        let player = spawn_player(&mut world, &maze);
        let roster = spawn_roster(&mut world, &maze, Phase::Patrol, &config);

        {
            let mut body = world.get::<&mut MotionBody>(player).unwrap();
            body.tile = IVec2::new(1, 1);
            body.heading = Heading::Left;
        }
        world.get::<&mut Player>(player).unwrap().life = LifeCycle::Inactive;
        world.get::<&mut Pursuer>(roster[1]).unwrap().state = PursuerState::Fright;

        reset_positions(&mut world, &maze, Phase::Pursuit, &config);
        assert_eq!(
            *world.get::<&MotionBody>(player).unwrap(),
            MotionBody::at(IVec2::new(9, 16))
        );
        assert_eq!(world.get::<&Player>(player).unwrap().life, LifeCycle::Active);
        assert_eq!(
            world.get::<&Pursuer>(roster[1]).unwrap().state,
            PursuerState::InsideDen
        );
        assert_eq!(
            world.get::<&Pursuer>(roster[0]).unwrap().state,
            PursuerState::Pursuit
        );
    }
}
