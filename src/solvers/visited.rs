/// Set of tiles a solve has already stepped on, with a constant-time count.
#[derive(Debug, Clone)]
pub struct VisitedTiles {
    visited: Vec<bool>,
    count: usize,
}

impl VisitedTiles {
    pub fn new(tile_count: usize) -> Self {
        VisitedTiles {
            visited: vec![false; tile_count],
            count: 0,
        }
    }

    pub fn count(&self) -> usize {
        self.count
    }

    /// Whether every tile has been visited.
    pub fn is_exhausted(&self) -> bool {
        self.count == self.visited.len()
    }

    pub fn is_visited(&self, tile: usize) -> bool {
        self.visited[tile]
    }

    /// Marks `tile` as visited. Returns `false` if it already was.
    pub fn set_visited(&mut self, tile: usize) -> bool {
        if self.visited[tile] {
            return false;
        }
        self.visited[tile] = true;
        self.count += 1;
        true
    }
}
