use glam::IVec2;

use crate::config::SimConfig;
use crate::ecs::components::{LifeCycle, Player, Pursuer, PursuerState, Speed};
use crate::maze::{Maze, Tile};
use crate::motion::MotionBody;

/// Something the player ate this tick.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Eaten {
    pub tile: IVec2,
    pub kind: Tile,
}

/// Outcome of the player meeting pursuers this tick.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct Contacts {
    pub captured: Vec<hecs::Entity>,
    pub caught_player: bool,
}

/// Eat the pellet under the active player, if any.
pub fn consume(world: &hecs::World, maze: &mut Maze) -> Option<Eaten> {
    let mut query = world.query::<(&MotionBody, &Player)>();
    let (_, (body, player)) = query.iter().next()?;
    if player.life != LifeCycle::Active {
        return None;
    }
    let kind = maze.consume(body.tile)?;
    log::trace!("Ate {kind:?} at {}", body.tile);
    Some(Eaten {
        tile: body.tile,
        kind,
    })
}

/// Centre-to-centre contact checks in roster order. Every frightened pursuer
/// touching the player is captured; any scheduled one catches the player.
pub fn resolve_contacts(world: &mut hecs::World, config: &SimConfig) -> Contacts {
    let mut contacts = Contacts::default();

    let player_centre = {
        let mut query = world.query::<(&MotionBody, &Player)>();
        match query.iter().next() {
            Some((_, (body, player))) if player.life == LifeCycle::Active => body.centre(),
            _ => return contacts,
        }
    };

    let mut touching: Vec<(hecs::Entity, u8)> = world
        .query::<(&MotionBody, &Pursuer)>()
        .iter()
        .filter(|(_, (body, _))| body.centre().distance(player_centre) < config.contact_distance)
        .map(|(entity, (_, pursuer))| (entity, pursuer.id as u8))
        .collect();
    touching.sort_by_key(|&(_, order)| order);

    for (entity, _) in touching {
        let Ok((pursuer, speed)) = world.query_one_mut::<(&mut Pursuer, &mut Speed)>(entity) else {
            continue;
        };
        match pursuer.state {
            PursuerState::Fright => {
                pursuer.state = PursuerState::Captured;
                speed.0 = config.pursuer_speed_for(PursuerState::Captured);
                log::debug!("Pursuer {} captured", pursuer.id.label());
                contacts.captured.push(entity);
            }
            PursuerState::Patrol | PursuerState::Pursuit => {
                if !contacts.caught_player {
                    log::debug!("Player caught by pursuer {}", pursuer.id.label());
                }
                contacts.caught_player = true;
            }
            PursuerState::InsideDen | PursuerState::ExitingDen | PursuerState::Captured => {}
        }
    }

    if contacts.caught_player {
        super::player::expire(world);
    }
    contacts
}
