//! Run-trace events and their line-oriented rendering.
//! This module exists so the run loop can record decisions as data and defer
//! all formatting. It does not own when events fire.

use std::fmt;
use std::fs::File;
use std::io::{self, BufWriter, Write};
use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::types::{Coord, Terrain};

/// One observable decision made during a run, in the order it happened.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum TraceEvent {
    /// An objective offered terrain options and this one won the trial.
    OptionChosen { option: Terrain },
    /// A reveal invalidated the committed route mid-walk.
    RouteBlocked,
    /// The navigator stepped onto this cell.
    MovedTo { coord: Coord },
    /// The 1-based objective was reached.
    ObjectiveReached { index: usize },
}

impl fmt::Display for TraceEvent {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            TraceEvent::OptionChosen { option } => write!(f, "Number {option} is chosen!"),
            TraceEvent::RouteBlocked => write!(f, "Path is impassable!"),
            TraceEvent::MovedTo { coord } => write!(f, "Moving to {coord}"),
            TraceEvent::ObjectiveReached { index } => write!(f, "Objective {index} reached!"),
        }
    }
}

/// Renders events one per line, each line newline-terminated.
pub fn render_trace(events: &[TraceEvent]) -> String {
    let mut out = String::new();
    for event in events {
        out.push_str(&event.to_string());
        out.push('\n');
    }
    out
}

/// Writes the rendered trace to `path` in one buffered pass.
pub fn write_trace(path: &Path, events: &[TraceEvent]) -> io::Result<()> {
    let file = File::create(path)?;
    let mut writer = BufWriter::new(file);
    writer.write_all(render_trace(events).as_bytes())?;
    writer.flush()
}
