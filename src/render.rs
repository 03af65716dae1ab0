use std::io::Write;

use crossterm::{
    queue,
    style::{self, Color, StyledContent, Stylize},
};

use crate::maze::{Direction, Maze, TileStatus};

/// Width of one rendered line of the maze, in characters.
pub fn line_width(maze: &Maze) -> usize {
    maze.width() * (TILE_WIDTH + 1) + 1
}

/// The width of each tile when rendered, in character widths.
const TILE_WIDTH: usize = 2;

enum Segment {
    Text(&'static str),
    Tile(usize),
    LineEnd,
}

fn tile_symbol(status: TileStatus) -> StyledContent<&'static str> {
    match status {
        TileStatus::None => "  ".with(Color::Reset),
        TileStatus::Start => "()".with(Color::Green),
        TileStatus::Exit => "[]".with(Color::Red),
        TileStatus::Visiting => "**".with(Color::Cyan),
        TileStatus::Visited => "* ".with(Color::Blue),
        TileStatus::Blocked => "xx".with(Color::DarkGrey),
        TileStatus::Path => "##".with(Color::Yellow),
    }
}

/// Walks the maze top row first, emitting walls and tiles in drawing order.
fn segments<E>(maze: &Maze, mut emit: impl FnMut(Segment) -> Result<(), E>) -> Result<(), E> {
    let top = maze.height() - 1;
    emit(Segment::Text("+"))?;
    for x in 0..maze.width() {
        emit(Segment::Text(if maze.is_blocked(x, top, Direction::Up) {
            "--+"
        } else {
            "  +"
        }))?;
    }
    emit(Segment::LineEnd)?;

    for y in (0..maze.height()).rev() {
        emit(Segment::Text("|"))?;
        for x in 0..maze.width() {
            emit(Segment::Tile(maze.tile_index(x, y)))?;
            emit(Segment::Text(if maze.is_blocked(x, y, Direction::Right) {
                "|"
            } else {
                " "
            }))?;
        }
        emit(Segment::LineEnd)?;

        emit(Segment::Text("+"))?;
        for x in 0..maze.width() {
            emit(Segment::Text(if maze.is_blocked(x, y, Direction::Down) {
                "--+"
            } else {
                "  +"
            }))?;
        }
        emit(Segment::LineEnd)?;
    }
    Ok(())
}

/// Draws `maze` with every tile colored by its status.
/// Tiles missing from `statuses` are drawn empty.
pub fn draw(out: &mut impl Write, maze: &Maze, statuses: &[TileStatus]) -> std::io::Result<()> {
    segments(maze, |segment| match segment {
        Segment::Text(text) => queue!(out, style::Print(text)),
        Segment::Tile(tile) => queue!(
            out,
            style::PrintStyledContent(tile_symbol(
                statuses.get(tile).copied().unwrap_or_default()
            ))
        ),
        Segment::LineEnd => queue!(out, style::Print("\r\n")),
    })?;
    out.flush()
}

/// The walls of `maze` as plain text, one line per row of characters.
pub fn plain(maze: &Maze) -> String {
    let mut text = String::with_capacity((line_width(maze) + 1) * (maze.height() * 2 + 1));
    let _ = segments(maze, |segment| {
        match segment {
            Segment::Text(wall) => text.push_str(wall),
            Segment::Tile(_) => text.push_str("  "),
            Segment::LineEnd => text.push('\n'),
        }
        Ok::<(), std::convert::Infallible>(())
    });
    text
}
