use std::sync::mpsc::{Sender, SyncSender};

/// Display state of a single tile, as reported by solvers.
#[derive(Default, Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum TileStatus {
    /// Untouched tile.
    #[default]
    None,
    /// The tile a solve starts from.
    Start,
    /// The tile a solve is looking for.
    Exit,
    /// Tile on the frontier, or the current position of a depth-first walk.
    Visiting,
    /// Tile that has been expanded.
    Visited,
    /// Dead end: nothing left to explore from this tile.
    Blocked,
    /// Tile on the final path.
    Path,
}

/// A status change for one tile.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TileEvent {
    pub tile: usize,
    pub status: TileStatus,
}

/// Receives tile status changes in the order they happen.
pub trait TileObserver {
    fn set_tile_status(&mut self, tile: usize, status: TileStatus);
}

/// Discards every event.
impl TileObserver for () {
    fn set_tile_status(&mut self, _tile: usize, _status: TileStatus) {}
}

impl TileObserver for Vec<TileEvent> {
    fn set_tile_status(&mut self, tile: usize, status: TileStatus) {
        self.push(TileEvent { tile, status });
    }
}

// A disconnected receiver only means nobody is watching any more.
impl TileObserver for Sender<TileEvent> {
    fn set_tile_status(&mut self, tile: usize, status: TileStatus) {
        let _ = self.send(TileEvent { tile, status });
    }
}

impl TileObserver for SyncSender<TileEvent> {
    fn set_tile_status(&mut self, tile: usize, status: TileStatus) {
        let _ = self.send(TileEvent { tile, status });
    }
}

/// Marks every tile of `path` except its endpoints as [`TileStatus::Path`].
pub fn mark_path(path: &[usize], observer: &mut dyn TileObserver) {
    if let [_, inner @ .., _] = path {
        inner
            .iter()
            .for_each(|&tile| observer.set_tile_status(tile, TileStatus::Path));
    }
}

/// Resets every tile to [`TileStatus::None`], then marks the start and exit tiles.
pub fn reset_tiles(tile_count: usize, start: usize, exit: usize, observer: &mut dyn TileObserver) {
    (0..tile_count)
        .filter(|&tile| tile != start && tile != exit)
        .for_each(|tile| observer.set_tile_status(tile, TileStatus::None));
    observer.set_tile_status(start, TileStatus::Start);
    observer.set_tile_status(exit, TileStatus::Exit);
}
