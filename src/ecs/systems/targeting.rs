use glam::IVec2;

use crate::config::SimConfig;
use crate::ecs::components::Personality;
use crate::motion::Heading;

/// Everything a pursuit strategy may look at.
#[derive(Debug, Clone, Copy)]
pub struct TargetInputs {
    pub player_tile: IVec2,
    pub player_heading: Heading,
    /// Leader pursuer's tile, if the leader still exists.
    pub leader_tile: Option<IVec2>,
    pub own_tile: IVec2,
    pub home: IVec2,
}

/// Euclidean distance between two tiles.
pub fn tile_distance(a: IVec2, b: IVec2) -> f32 {
    (a - b).as_vec2().length()
}

fn ahead_of_player(inputs: &TargetInputs, tiles: i32) -> IVec2 {
    inputs.player_tile + inputs.player_heading.delta() * tiles
}

/// Target tile while the colony is in pursuit.
pub fn pursuit_target(personality: Personality, inputs: &TargetInputs, config: &SimConfig) -> IVec2 {
    match personality {
        Personality::Chaser => chaser(inputs),
        Personality::Ambusher => ambusher(inputs, config.ambush_lead),
        Personality::Flanker => flanker(inputs, config.flank_lead),
        Personality::Shy => shy(inputs, config.shy_radius),
    }
}

fn chaser(inputs: &TargetInputs) -> IVec2 {
    inputs.player_tile
}

fn ambusher(inputs: &TargetInputs, lead: i32) -> IVec2 {
    ahead_of_player(inputs, lead)
}

fn flanker(inputs: &TargetInputs, lead: i32) -> IVec2 {
    let Some(leader) = inputs.leader_tile else {
        return inputs.player_tile;
    };
    let pivot = ahead_of_player(inputs, lead);
    leader + (pivot - leader) * 2
}

fn shy(inputs: &TargetInputs, radius: f32) -> IVec2 {
    if tile_distance(inputs.own_tile, inputs.player_tile) > radius {
        inputs.player_tile
    } else {
        inputs.home
    }
}

/// Drop the reverse heading unless it is the only way out.
pub fn candidate_headings(open: &[Heading], current: Heading) -> Vec<Heading> {
    let reverse = current.opposite();
    let forward: Vec<Heading> = open.iter().copied().filter(|&h| h != reverse).collect();
    if forward.is_empty() {
        open.to_vec()
    } else {
        forward
    }
}

/// Candidate whose neighbour tile lies closest to `target`. Ties keep the
/// earlier candidate.
pub fn closest_heading(from: IVec2, candidates: &[Heading], target: IVec2) -> Heading {
    let mut best = Heading::None;
    let mut best_distance = f32::INFINITY;
    for &heading in candidates {
        let d = tile_distance(from + heading.delta(), target);
        if d < best_distance {
            best_distance = d;
            best = heading;
        }
    }
    best
}
