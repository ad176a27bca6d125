use glam::{IVec2, Vec2};

use crate::maze::Maze;

/// Offsets below this snap to the exact centre when easing.
const EASE_SNAP: f32 = 0.01;
/// Distances smaller than this are treated as fully consumed.
const DISTANCE_EPSILON: f32 = 1e-6;

/// Grid-aligned travel direction.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Heading {
    Up,
    Down,
    Left,
    Right,
    #[default]
    None,
}

impl Heading {
    /// Enumeration order used for every tie-break.
    pub const ALL: [Heading; 4] = [Heading::Up, Heading::Down, Heading::Left, Heading::Right];

    pub fn opposite(self) -> Self {
        match self {
            Heading::Up => Heading::Down,
            Heading::Down => Heading::Up,
            Heading::Left => Heading::Right,
            Heading::Right => Heading::Left,
            Heading::None => Heading::None,
        }
    }

    /// One-tile step in grid coordinates (rows grow downward).
    pub fn delta(self) -> IVec2 {
        match self {
            Heading::Up => IVec2::new(0, -1),
            Heading::Down => IVec2::new(0, 1),
            Heading::Left => IVec2::new(-1, 0),
            Heading::Right => IVec2::new(1, 0),
            Heading::None => IVec2::ZERO,
        }
    }

    pub fn is_horizontal(self) -> bool {
        matches!(self, Heading::Left | Heading::Right)
    }

    pub fn label(self) -> &'static str {
        match self {
            Heading::Up => "up",
            Heading::Down => "down",
            Heading::Left => "left",
            Heading::Right => "right",
            Heading::None => "none",
        }
    }
}

/// Answer from a decision callback at a tile centre.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Turn {
    /// Continue along this heading. `Heading::None` stops the body.
    Go(Heading),
    /// Stop for the rest of this tick but keep the current heading.
    Hold,
}

/// Sub-tile position plus heading, shared by the player and every pursuer.
///
/// `offset` is the displacement from the centre of `tile`; both axes stay
/// within [-0.5, 0.5].
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct MotionBody {
    pub tile: IVec2,
    pub offset: Vec2,
    pub heading: Heading,
}

impl MotionBody {
    /// Resting at the centre of `tile`.
    pub fn at(tile: IVec2) -> Self {
        Self {
            tile,
            offset: Vec2::ZERO,
            heading: Heading::None,
        }
    }

    /// Continuous position of the body's centre in tile units.
    pub fn centre(&self) -> Vec2 {
        self.tile.as_vec2() + self.offset + Vec2::splat(0.5)
    }

    /// Tile one step away along `heading`.
    pub fn neighbour(&self, heading: Heading) -> IVec2 {
        self.tile + heading.delta()
    }

    pub fn is_near_centre(&self, window: f32) -> bool {
        self.offset.x.abs() < window && self.offset.y.abs() < window
    }

    pub fn snap_to_centre(&mut self) {
        self.offset = Vec2::ZERO;
    }

    /// Exponential ease of both offsets toward the centre.
    /// `factor` is the fraction of the remaining offset removed this tick.
    pub fn ease_to_centre(&mut self, factor: f32) {
        let factor = factor.clamp(0.0, 1.0);
        self.offset -= self.offset * factor;
        if self.offset.x.abs() < EASE_SNAP {
            self.offset.x = 0.0;
        }
        if self.offset.y.abs() < EASE_SNAP {
            self.offset.y = 0.0;
        }
    }

    /// Signed distance to the tile centre along the heading. Positive when
    /// the centre is still ahead.
    fn distance_to_centre(&self) -> f32 {
        match self.heading {
            Heading::Left => self.offset.x,
            Heading::Right => -self.offset.x,
            Heading::Up => self.offset.y,
            Heading::Down => -self.offset.y,
            Heading::None => 0.0,
        }
    }

    fn shift(&mut self, distance: f32) {
        self.offset += self.heading.delta().as_vec2() * distance;
    }

    fn snap_axis(&mut self) {
        if self.heading.is_horizontal() {
            self.offset.x = 0.0;
        } else {
            self.offset.y = 0.0;
        }
    }

    /// Step onto the neighbouring tile, entering it at its far edge.
    fn roll(&mut self, maze: &Maze) {
        let step = self.heading.delta();
        self.tile += step;
        if self.heading.is_horizontal() {
            self.offset.x = -0.5 * step.x as f32;
        } else {
            self.offset.y = -0.5 * step.y as f32;
        }
        // Only the tunnel row lets a body off the grid horizontally.
        self.tile.x = maze.wrap_column(self.tile.x);
    }

    /// Move `distance` tiles along the current heading.
    ///
    /// `decide` runs whenever the body lands exactly on a tile centre it was
    /// approaching, and once up front if the body is at rest. Returns how many
    /// times it ran.
    pub fn advance<F>(&mut self, distance: f32, maze: &Maze, mut decide: F) -> usize
    where
        F: FnMut(&MotionBody) -> Turn,
    {
        if !distance.is_finite() || distance <= 0.0 {
            return 0;
        }

        let mut remaining = distance;
        let mut decisions = 0;
        let mut asked_at_rest = false;

        while remaining > DISTANCE_EPSILON {
            if self.heading == Heading::None {
                if asked_at_rest {
                    break;
                }
                asked_at_rest = true;
                decisions += 1;
                match decide(self) {
                    Turn::Go(Heading::None) | Turn::Hold => break,
                    Turn::Go(heading) => self.heading = heading,
                }
                continue;
            }

            let to_centre = self.distance_to_centre();
            if to_centre > 0.0 && remaining >= to_centre {
                remaining -= to_centre;
                self.snap_axis();
                decisions += 1;
                match decide(self) {
                    Turn::Go(Heading::None) => {
                        self.heading = Heading::None;
                        break;
                    }
                    Turn::Go(heading) => self.heading = heading,
                    Turn::Hold => break,
                }
                continue;
            }

            if to_centre > 0.0 {
                self.shift(remaining);
                break;
            }

            // Centre is behind us: head for the tile edge.
            let to_edge = 0.5 + to_centre;
            if remaining >= to_edge {
                remaining -= to_edge;
                self.roll(maze);
            } else {
                self.shift(remaining);
                break;
            }
        }

        debug_assert!(
            self.offset.x.abs() <= 0.5 + DISTANCE_EPSILON
                && self.offset.y.abs() <= 0.5 + DISTANCE_EPSILON,
            "offset escaped its tile: {:?}",
            self.offset
        );
        self.offset = self.offset.clamp(Vec2::splat(-0.5), Vec2::splat(0.5));
        decisions
    }
}
