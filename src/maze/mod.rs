pub mod history;
pub mod tile;

use std::fmt;

use thiserror::Error;

pub use history::TileEventHistory;
pub use tile::{TileEvent, TileObserver, TileStatus, mark_path, reset_tiles};

/// Dimensions of a maze in tiles.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Size {
    pub width: usize,
    pub height: usize,
}

impl Size {
    pub const fn new(width: usize, height: usize) -> Self {
        Size { width, height }
    }

    pub fn tile_count(&self) -> usize {
        self.width * self.height
    }
}

impl fmt::Display for Size {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}x{}", self.width, self.height)
    }
}

/// Side of a tile. `Up` points to increasing `y`: row 0 is the bottom row.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Direction {
    Up,
    Right,
    Down,
    Left,
}

impl Direction {
    /// All directions, in the priority order used by the fixed-order solver.
    pub const ALL: [Direction; 4] = [
        Direction::Up,
        Direction::Right,
        Direction::Down,
        Direction::Left,
    ];

    pub fn opposite(self) -> Direction {
        match self {
            Direction::Up => Direction::Down,
            Direction::Right => Direction::Left,
            Direction::Down => Direction::Up,
            Direction::Left => Direction::Right,
        }
    }
}

impl fmt::Display for Direction {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Direction::Up => write!(f, "up"),
            Direction::Right => write!(f, "right"),
            Direction::Down => write!(f, "down"),
            Direction::Left => write!(f, "left"),
        }
    }
}

/// Contract violations. These indicate misuse or an internal bug, never an
/// ordinary outcome such as "no path" or "cancelled".
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum MazeError {
    #[error("invalid maze size {width}x{height}")]
    InvalidSize { width: usize, height: usize },
    #[error("invalid fence reference: tile ({x}, {y}) has no {direction} fence")]
    InvalidFenceReference {
        x: usize,
        y: usize,
        direction: Direction,
    },
    #[error("tile {tile} is outside a maze of {tile_count} tiles")]
    TileOutOfRange { tile: usize, tile_count: usize },
    #[error("unexpected path start {found}, expecting {expected}")]
    UnexpectedPathStart { found: usize, expected: usize },
}

/// A rectangular maze storing two fence bits per tile: its UP fence and its RIGHT fence.
///
/// A tile's DOWN fence is the UP fence of the tile below it and its LEFT fence is the
/// RIGHT fence of the tile on its left, so every interior wall has exactly one bit.
/// Boundary fences are not stored and always read as blocked.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Maze {
    size: Size,
    fences: Box<[u8]>,
}

impl Maze {
    /// Creates a maze with every interior fence open.
    pub fn new(size: Size) -> Result<Self, MazeError> {
        let Size { width, height } = size;
        if width == 0 || height == 0 || (width == 1 && height == 1) {
            return Err(MazeError::InvalidSize { width, height });
        }
        // 2 bits per tile, rounded up to whole bytes
        let storage = width
            .checked_mul(height)
            .and_then(|tiles| tiles.checked_mul(2))
            .ok_or(MazeError::InvalidSize { width, height })?
            .div_ceil(8);
        tracing::trace!("New {} maze with {} bytes of fence storage", size, storage);
        Ok(Maze {
            size,
            fences: vec![0u8; storage].into_boxed_slice(),
        })
    }

    pub fn size(&self) -> Size {
        self.size
    }

    pub fn width(&self) -> usize {
        self.size.width
    }

    pub fn height(&self) -> usize {
        self.size.height
    }

    pub fn tile_count(&self) -> usize {
        self.size.tile_count()
    }

    /// Raw packed fence storage.
    pub fn fences(&self) -> &[u8] {
        &self.fences
    }

    /// Opens every fence.
    pub fn clear(&mut self) {
        self.fences.fill(0);
    }

    /// Blocks every fence. Generators start from this state before carving.
    pub fn block_all(&mut self) {
        self.fences.fill(0xFF);
    }

    /// Whether the fence on side `direction` of tile `(x, y)` is blocked.
    /// Fences on the maze boundary, and tiles outside the grid, are always blocked.
    pub fn is_blocked(&self, x: usize, y: usize, direction: Direction) -> bool {
        match self.fence_bit(x, y, direction) {
            Some(bit) => (self.fences[bit / 8] >> (bit % 8)) & 1 != 0,
            None => true,
        }
    }

    /// Blocks or opens the fence on side `direction` of tile `(x, y)`.
    ///
    /// Fails with [`MazeError::InvalidFenceReference`] when the side lies on the
    /// maze boundary, as there is no such fence to set.
    pub fn set_blocked(
        &mut self,
        x: usize,
        y: usize,
        direction: Direction,
        blocked: bool,
    ) -> Result<(), MazeError> {
        let bit = self
            .fence_bit(x, y, direction)
            .ok_or(MazeError::InvalidFenceReference { x, y, direction })?;
        if blocked {
            self.fences[bit / 8] |= 1 << (bit % 8);
        } else {
            self.fences[bit / 8] &= !(1 << (bit % 8));
        }
        Ok(())
    }

    /// Bit index of the stored fence behind `direction`, or `None` for boundary fences.
    fn fence_bit(&self, x: usize, y: usize, direction: Direction) -> Option<usize> {
        let Size { width, height } = self.size;
        if x >= width || y >= height {
            return None;
        }
        let (x, y, offset) = match direction {
            Direction::Up if y + 1 < height => (x, y, 0),
            Direction::Right if x + 1 < width => (x, y, 1),
            Direction::Down if y > 0 => (x, y - 1, 0),
            Direction::Left if x > 0 => (x - 1, y, 1),
            _ => return None,
        };
        Some((y * width + x) * 2 + offset)
    }

    /// Row-major index of tile `(x, y)`.
    pub fn tile_index(&self, x: usize, y: usize) -> usize {
        y * self.size.width + x
    }

    /// Coordinates `(x, y)` of a tile index.
    pub fn tile_coords(&self, tile: usize) -> (usize, usize) {
        (tile % self.size.width, tile / self.size.width)
    }

    /// Tile adjacent to `tile` in `direction`, ignoring fences. `None` off the grid.
    pub fn neighbor(&self, tile: usize, direction: Direction) -> Option<usize> {
        let Size { width, height } = self.size;
        let (x, y) = self.tile_coords(tile);
        match direction {
            Direction::Up if y + 1 < height => Some(tile + width),
            Direction::Right if x + 1 < width => Some(tile + 1),
            Direction::Down if y > 0 => Some(tile - width),
            Direction::Left if x > 0 => Some(tile - 1),
            _ => None,
        }
    }

    /// Tile adjacent to `tile` in `direction` when the fence between them is open.
    pub fn passage(&self, tile: usize, direction: Direction) -> Option<usize> {
        let (x, y) = self.tile_coords(tile);
        if self.is_blocked(x, y, direction) {
            None
        } else {
            self.neighbor(tile, direction)
        }
    }

    /// Number of open interior fences.
    pub fn open_fence_count(&self) -> usize {
        (0..self.tile_count())
            .map(|tile| {
                let (x, y) = self.tile_coords(tile);
                [Direction::Up, Direction::Right]
                    .into_iter()
                    .filter(|&dir| self.neighbor(tile, dir).is_some() && !self.is_blocked(x, y, dir))
                    .count()
            })
            .sum()
    }

    /// Whether every tile can reach every other tile through open fences.
    pub fn is_fully_connected(&self) -> bool {
        let mut seen = vec![false; self.tile_count()];
        let mut stack = vec![0];
        seen[0] = true;
        let mut reached = 1;
        while let Some(tile) = stack.pop() {
            for dir in Direction::ALL {
                if let Some(next) = self.passage(tile, dir) {
                    if !seen[next] {
                        seen[next] = true;
                        reached += 1;
                        stack.push(next);
                    }
                }
            }
        }
        reached == self.tile_count()
    }
}
