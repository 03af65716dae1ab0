use std::collections::VecDeque;

use super::{TileEvent, TileObserver, TileStatus};

/// Bounded record of tile events: keeps the latest `capacity` of them and
/// counts every event ever seen.
pub struct TileEventHistory {
    /// Oldest event at the front, newest at the back.
    kept: VecDeque<TileEvent>,
    capacity: usize,
    total_events: usize,
}

impl TileEventHistory {
    pub fn new(capacity: usize) -> Self {
        TileEventHistory {
            kept: VecDeque::with_capacity(capacity),
            capacity,
            total_events: 0,
        }
    }

    pub fn add_event(&mut self, event: TileEvent) {
        self.total_events += 1;
        if self.capacity == 0 {
            return;
        }
        if self.kept.len() == self.capacity {
            self.kept.pop_front();
        }
        self.kept.push_back(event);
    }

    /// Kept events, most recent first.
    pub fn recent(&self) -> impl Iterator<Item = &TileEvent> {
        self.kept.iter().rev()
    }

    pub fn total_events(&self) -> usize {
        self.total_events
    }
}

impl TileObserver for TileEventHistory {
    fn set_tile_status(&mut self, tile: usize, status: TileStatus) {
        self.add_event(TileEvent { tile, status });
    }
}
