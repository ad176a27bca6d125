pub mod layout;

use glam::IVec2;
use thiserror::Error;

use crate::ecs::components::PursuerId;

/// Row that wraps horizontally. Also the row the den's spawn tiles sit on.
pub const TUNNEL_ROW: i32 = 10;

/// What a single grid cell holds.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Tile {
    Empty,
    Wall,
    Pellet,
    PowerPellet,
    Den,
    PlayerStart,
    PursuerStart(PursuerId),
}

impl Tile {
    pub fn from_code(code: u8) -> Option<Self> {
        Some(match code {
            0 => Tile::Empty,
            1 => Tile::Wall,
            2 => Tile::Pellet,
            3 => Tile::PowerPellet,
            4 => Tile::Den,
            5 => Tile::PlayerStart,
            6 => Tile::PursuerStart(PursuerId::A),
            7 => Tile::PursuerStart(PursuerId::B),
            8 => Tile::PursuerStart(PursuerId::C),
            9 => Tile::PursuerStart(PursuerId::D),
            _ => return None,
        })
    }

    pub fn is_edible(self) -> bool {
        matches!(self, Tile::Pellet | Tile::PowerPellet)
    }
}

/// Who is asking whether a tile can be entered.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Walker {
    Player,
    Pursuer,
    /// A pursuer leaving the den or returning to it; may cross the doorway walls.
    PursuerThroughDoor,
}

#[derive(Debug, Error, PartialEq, Eq)]
pub enum MazeError {
    #[error("layout has no rows")]
    Empty,
    #[error("row {row} has {found} columns, expected {expected}")]
    Ragged {
        row: usize,
        found: usize,
        expected: usize,
    },
    #[error("unknown tile code {code} at column {col}, row {row}")]
    UnknownTile { code: u8, col: usize, row: usize },
}

/// The tile grid for one level. Only `consume` writes to it during play.
#[derive(Debug, Clone)]
pub struct Maze {
    tiles: Vec<Tile>,
    width: i32,
    height: i32,
    pellets_left: usize,
}

impl Maze {
    /// Fresh copy of the one supported level.
    pub fn canonical() -> Self {
        let rows: Vec<&[u8]> = layout::CANONICAL.iter().map(|r| r.as_slice()).collect();
        // The built-in layout is validated by tests.
        Self::from_codes(&rows).unwrap_or_else(|e| unreachable!("canonical layout: {e}"))
    }

    pub fn from_codes<R: AsRef<[u8]>>(rows: &[R]) -> Result<Self, MazeError> {
        let expected = rows.first().ok_or(MazeError::Empty)?.as_ref().len();
        if expected == 0 {
            return Err(MazeError::Empty);
        }

        let mut tiles = Vec::with_capacity(expected * rows.len());
        for (row, codes) in rows.iter().enumerate() {
            let codes = codes.as_ref();
            if codes.len() != expected {
                return Err(MazeError::Ragged {
                    row,
                    found: codes.len(),
                    expected,
                });
            }
            for (col, &code) in codes.iter().enumerate() {
                let tile = Tile::from_code(code).ok_or(MazeError::UnknownTile { code, col, row })?;
                tiles.push(tile);
            }
        }

        let pellets_left = tiles.iter().filter(|t| t.is_edible()).count();
        Ok(Self {
            tiles,
            width: expected as i32,
            height: rows.len() as i32,
            pellets_left,
        })
    }

    pub fn width(&self) -> i32 {
        self.width
    }

    pub fn height(&self) -> i32 {
        self.height
    }

    fn index(&self, col: i32, row: i32) -> Option<usize> {
        if col < 0 || row < 0 || col >= self.width || row >= self.height {
            return None;
        }
        Some((row * self.width + col) as usize)
    }

    /// Tile at a grid coordinate, `None` when off the grid.
    pub fn tile_at(&self, col: i32, row: i32) -> Option<Tile> {
        self.index(col, row).map(|i| self.tiles[i])
    }

    pub fn is_tunnel_row(&self, row: i32) -> bool {
        row == TUNNEL_ROW && row < self.height
    }

    /// Column above the den's centre tile.
    pub fn centre_column(&self) -> i32 {
        self.width / 2
    }

    /// Tile captured pursuers head home to.
    pub fn den_centre(&self) -> IVec2 {
        IVec2::new(self.centre_column(), TUNNEL_ROW)
    }

    /// Waypoint pursuers reach when they have left the den.
    pub fn den_exit(&self) -> IVec2 {
        IVec2::new(self.centre_column(), TUNNEL_ROW - 2)
    }

    /// The three tiles directly above the den row, across its centre columns.
    pub fn is_doorway(&self, col: i32, row: i32) -> bool {
        row == TUNNEL_ROW - 1 && (col - self.centre_column()).abs() <= 1
    }

    pub fn is_walkable(&self, col: i32, row: i32, walker: Walker) -> bool {
        let Some(tile) = self.tile_at(col, row) else {
            // Off-grid is only reachable through the tunnel.
            return self.is_tunnel_row(row);
        };

        match tile {
            Tile::Wall => walker == Walker::PursuerThroughDoor && self.is_doorway(col, row),
            Tile::Den => walker != Walker::Player,
            Tile::Empty
            | Tile::Pellet
            | Tile::PowerPellet
            | Tile::PlayerStart
            | Tile::PursuerStart(_) => true,
        }
    }

    /// Same as [`Maze::is_walkable`] for an `IVec2` tile.
    pub fn can_enter(&self, tile: IVec2, walker: Walker) -> bool {
        self.is_walkable(tile.x, tile.y, walker)
    }

    /// Wrap a column that left the grid back onto the opposite edge.
    pub fn wrap_column(&self, col: i32) -> i32 {
        if col < 0 {
            self.width - 1
        } else if col >= self.width {
            0
        } else {
            col
        }
    }

    /// Eat whatever pellet sits on `tile`. Returns the pellet kind eaten.
    pub fn consume(&mut self, tile: IVec2) -> Option<Tile> {
        let idx = self.index(tile.x, tile.y)?;
        let eaten = self.tiles[idx];
        if !eaten.is_edible() {
            return None;
        }
        self.tiles[idx] = Tile::Empty;
        self.pellets_left -= 1;
        Some(eaten)
    }

    pub fn remaining_pellets(&self) -> usize {
        self.pellets_left
    }

    pub fn is_cleared(&self) -> bool {
        self.pellets_left == 0
    }

    /// Last tile of the given kind in row-major order.
    pub fn find(&self, kind: Tile) -> Option<IVec2> {
        self.tiles
            .iter()
            .rposition(|&t| t == kind)
            .map(|i| IVec2::new(i as i32 % self.width, i as i32 / self.width))
    }
}
