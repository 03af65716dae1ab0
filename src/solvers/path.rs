use crate::maze::MazeError;

/// Marks a tile that is not on the path.
const NOT_ON_PATH: usize = usize::MAX;

/// The current walk of a depth-first solve: a simple path from `start` to
/// `position`, stored as predecessor links so it can shrink one tile at a time.
#[derive(Debug, Clone)]
pub struct Path {
    start: usize,
    /// Predecessor of each tile on the path, [`NOT_ON_PATH`] otherwise.
    /// `start` points to itself.
    previous: Vec<usize>,
    position: usize,
    length: usize,
}

impl Path {
    pub fn new(tile_count: usize, start: usize) -> Self {
        let mut previous = vec![NOT_ON_PATH; tile_count];
        previous[start] = start;
        Path {
            start,
            previous,
            position: start,
            length: 1,
        }
    }

    pub fn start(&self) -> usize {
        self.start
    }

    /// Tile at the head of the path.
    pub fn position(&self) -> usize {
        self.position
    }

    /// Number of tiles on the path, including the start.
    pub fn length(&self) -> usize {
        self.length
    }

    pub fn contains(&self, tile: usize) -> bool {
        self.previous[tile] != NOT_ON_PATH
    }

    /// Extends the path onto `tile`.
    ///
    /// # Panics
    /// If `tile` is already on the path: the path never revisits a tile.
    pub fn move_to(&mut self, tile: usize) {
        assert!(!self.contains(tile), "tile {} was already in path", tile);
        self.previous[tile] = self.position;
        self.position = tile;
        self.length += 1;
    }

    /// Drops the head of the path and returns the new head, or `None` when the
    /// path is back to its start and cannot shrink any further.
    pub fn move_back(&mut self) -> Option<usize> {
        if self.position == self.start {
            return None;
        }
        let from = self.previous[self.position];
        self.previous[self.position] = NOT_ON_PATH;
        self.position = from;
        self.length -= 1;
        Some(from)
    }

    /// Tiles from start to the current position.
    pub fn tiles(&self) -> Result<Vec<usize>, MazeError> {
        let mut tiles = vec![0; self.length];
        let mut tile = self.position;
        for slot in tiles.iter_mut().rev() {
            *slot = tile;
            tile = self.previous[tile];
        }
        if tile != self.start {
            return Err(MazeError::UnexpectedPathStart {
                found: tile,
                expected: self.start,
            });
        }
        Ok(tiles)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_move_and_back() {
        let mut path = Path::new(9, 4);
        assert_eq!(path.length(), 1);
        assert!(path.contains(4));

        path.move_to(5);
        path.move_to(8);
        assert_eq!(path.position(), 8);
        assert_eq!(path.length(), 3);
        assert_eq!(path.tiles(), Ok(vec![4, 5, 8]));

        assert_eq!(path.move_back(), Some(5));
        assert!(!path.contains(8));
        assert_eq!(path.length(), 2);
        path.move_to(2);
        assert_eq!(path.tiles(), Ok(vec![4, 5, 2]));
    }

    #[test]
    fn test_cannot_back_past_start() {
        let mut path = Path::new(4, 0);
        path.move_to(1);
        assert_eq!(path.move_back(), Some(0));
        assert_eq!(path.move_back(), None);
        assert_eq!(path.position(), 0);
        assert_eq!(path.length(), 1);
        assert!(path.contains(0));
    }

    #[test]
    #[should_panic(expected = "already in path")]
    fn test_rejects_revisit() {
        let mut path = Path::new(4, 0);
        path.move_to(1);
        path.move_to(0);
    }
}
