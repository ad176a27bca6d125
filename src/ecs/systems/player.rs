use crate::config::SimConfig;
use crate::ecs::components::{LifeCycle, Mouth, MouthPhase, Player};
use crate::ecs::systems::pursuer::PlayerView;
use crate::maze::{Maze, Walker};
use crate::motion::{Heading, MotionBody, Turn};

/// Mouth opening bounds while chomping.
const MOUTH_MAX: f32 = 0.4;
const MOUTH_MIN: f32 = 0.05;
/// The death animation opens at half the chomp rate.
const EXPIRING_RATE: f32 = 0.5;

/// Buffer a turn request. `Heading::None` keeps whatever was queued.
pub fn steer(world: &mut hecs::World, heading: Heading) {
    if heading == Heading::None {
        return;
    }
    for (_, player) in world.query_mut::<&mut Player>() {
        player.queued = heading;
    }
}

/// Where the player is, for pursuer targeting. `None` when no player exists.
pub fn view(world: &hecs::World) -> Option<PlayerView> {
    world
        .query::<(&MotionBody, &Player)>()
        .iter()
        .next()
        .map(|(_, (body, _))| PlayerView {
            tile: body.tile,
            heading: body.heading,
        })
}

/// Choice at a tile centre: the queued turn if it fits, else keep going if
/// possible, else wait at the centre.
fn decide(body: &MotionBody, player: &mut Player, maze: &Maze) -> Turn {
    let queued = player.queued;
    if queued != Heading::None
        && queued != body.heading
        && maze.can_enter(body.neighbour(queued), Walker::Player)
    {
        player.queued = Heading::None;
        return Turn::Go(queued);
    }
    if maze.can_enter(body.neighbour(body.heading), Walker::Player) {
        Turn::Go(body.heading)
    } else {
        Turn::Hold
    }
}

fn move_body(body: &mut MotionBody, player: &mut Player, maze: &Maze, dt: f32, config: &SimConfig) {
    let blocked = body.heading == Heading::None
        || !maze.can_enter(body.neighbour(body.heading), Walker::Player);
    if blocked {
        body.ease_to_centre(config.ease_rate * dt);
        let queued = player.queued;
        if queued != Heading::None
            && queued != body.heading
            && body.is_near_centre(config.turn_window)
            && maze.can_enter(body.neighbour(queued), Walker::Player)
        {
            body.snap_to_centre();
            body.heading = queued;
            player.queued = Heading::None;
        } else {
            return;
        }
    }

    body.advance(config.player_speed * dt, maze, |b| decide(b, player, maze));
}

fn chomp(mouth: &mut Mouth, moving: bool, dt: f32, config: &SimConfig) {
    if !moving {
        mouth.openness = MOUTH_MIN;
        return;
    }
    let step = config.mouth_speed * dt;
    if mouth.opening {
        mouth.openness += step;
        if mouth.openness >= MOUTH_MAX {
            mouth.openness = MOUTH_MAX;
            mouth.opening = false;
        }
    } else {
        mouth.openness -= step;
        if mouth.openness <= MOUTH_MIN {
            mouth.openness = MOUTH_MIN;
            mouth.opening = true;
        }
    }
}

/// Move the active player and animate its mouth.
pub fn advance(world: &mut hecs::World, maze: &Maze, dt: f32, config: &SimConfig) {
    for (_, (body, player, mouth)) in
        world.query_mut::<(&mut MotionBody, &mut Player, &mut Mouth)>()
    {
        if player.life != LifeCycle::Active {
            continue;
        }
        move_body(body, player, maze, dt, config);
        chomp(mouth, body.heading != Heading::None, dt, config);
    }
}

/// Runs in every game state: plays the death animation of an expiring
/// player until the mouth is fully open.
pub fn animate_expiring(world: &mut hecs::World, dt: f32, config: &SimConfig) {
    for (_, (player, mouth)) in world.query_mut::<(&mut Player, &mut Mouth)>() {
        if player.life != LifeCycle::Expiring {
            continue;
        }
        mouth.openness = (mouth.openness + config.mouth_speed * dt * EXPIRING_RATE).min(1.0);
        if mouth.openness >= 1.0 {
            mouth.phase = MouthPhase::FullOpen;
            player.life = LifeCycle::Inactive;
        }
    }
}

/// Caught by a pursuer: freeze in place and start the death animation.
pub fn expire(world: &mut hecs::World) {
    for (_, (body, player)) in world.query_mut::<(&mut MotionBody, &mut Player)>() {
        if player.life == LifeCycle::Active {
            player.life = LifeCycle::Expiring;
            body.heading = Heading::None;
        }
    }
}
