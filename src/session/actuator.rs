//! Render Sinks
//!
//! The session pushes the board to an [`Actuator`] after every visible
//! change. Rendering never fails from the game's point of view: sinks that
//! can fail log and carry on.

use std::io::Write;

use tracing::warn;

use crate::game::element::Element;
use crate::game::grid::Grid;

/// Status shown alongside the board.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct ActuateMeta {
    /// Current score
    pub score: u64,
    /// Game lost
    pub over: bool,
    /// Game won
    pub won: bool,
    /// Best score including this game
    pub best_score: u64,
    /// No further moves will be accepted
    pub terminated: bool,
}

/// Render collaborator.
pub trait Actuator {
    /// Draw the board.
    fn actuate(&mut self, grid: &Grid, meta: &ActuateMeta);

    /// Dismiss any win or loss banner.
    fn continue_game(&mut self);
}

/// Plain-text renderer.
pub struct TerminalActuator<W: Write> {
    out: W,
}

impl<W: Write> TerminalActuator<W> {
    /// Render into `out`.
    pub fn new(out: W) -> Self {
        Self { out }
    }

    /// Recover the writer.
    pub fn into_inner(self) -> W {
        self.out
    }

    fn render(&mut self, grid: &Grid, meta: &ActuateMeta) -> std::io::Result<()> {
        writeln!(self.out)?;
        write!(self.out, "{}", grid)?;
        writeln!(self.out, "Score: {}  Best: {}", meta.score, meta.best_score)?;
        if meta.over {
            writeln!(self.out, "Game over! (r to restart)")?;
        } else if meta.won && meta.terminated {
            writeln!(self.out, "You win! (k to keep playing, r to restart)")?;
        }
        self.out.flush()
    }
}

impl<W: Write> Actuator for TerminalActuator<W> {
    fn actuate(&mut self, grid: &Grid, meta: &ActuateMeta) {
        if let Err(e) = self.render(grid, meta) {
            warn!("Render failed: {}", e);
        }
    }

    fn continue_game(&mut self) {
        // Banners are redrawn with every frame, nothing to clear
    }
}

/// One rendered frame.
#[derive(Clone, Debug, PartialEq)]
pub struct Frame {
    /// Cell values in grid order
    pub cells: Vec<Option<Element>>,
    /// Status at render time
    pub meta: ActuateMeta,
}

/// Headless sink that keeps every frame it is given.
#[derive(Clone, Debug, Default)]
pub struct RecordingActuator {
    /// Frames, oldest first
    pub frames: Vec<Frame>,
    /// Times the banner was dismissed
    pub continues: u32,
}

impl RecordingActuator {
    /// Empty recorder.
    pub fn new() -> Self {
        Self::default()
    }

    /// Most recent frame.
    pub fn last(&self) -> Option<&Frame> {
        self.frames.last()
    }
}

impl Actuator for RecordingActuator {
    fn actuate(&mut self, grid: &Grid, meta: &ActuateMeta) {
        let cells = grid.each_cell().map(|(_, tile)| tile.map(|t| t.value)).collect();
        self.frames.push(Frame { cells, meta: *meta });
    }

    fn continue_game(&mut self) {
        self.continues += 1;
    }
}
