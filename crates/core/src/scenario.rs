//! Text scenario files: grid nodes, adjacency edges, and the run setup.
//!
//! Three whitespace-separated plain-text files feed one run:
//! - Nodes: line 1 holds the grid extents `width height`; every later line is
//!   one cell as `x y terrain`.
//! - Edges: every line is one undirected edge as `x1-y1 x2-y2 cost`.
//! - Objectives: line 1 is the sight radius (a real number, truncated toward
//!   zero), line 2 the start as `x y`, and every later line one objective as
//!   `x y` followed by zero or more terrain-type options.
//!
//! Blank lines are ignored. Extra tokens after a line's expected fields are
//! ignored. Loading validates eagerly and reports the first offending file,
//! line, and reason.

use std::error::Error;
use std::fmt;
use std::fs;
use std::io;
use std::path::Path;
use std::str::{FromStr, SplitWhitespace};

use crate::graph::AdjacencyIndex;
use crate::grid::Grid;
use crate::types::{Coord, Objective, Terrain};

// ---------------------------------------------------------------------------
// Loaded scenario
// ---------------------------------------------------------------------------

/// Everything a run needs, parsed and validated.
#[derive(Debug)]
pub struct Scenario {
    pub grid: Grid,
    pub adjacency: AdjacencyIndex,
    pub sight_radius: i32,
    pub start: Coord,
    pub objectives: Vec<Objective>,
}

/// The objectives file's contents before cross-file validation.
#[derive(Debug)]
pub struct RunSetup {
    pub sight_radius: i32,
    pub start: Coord,
    pub objectives: Vec<Objective>,
}

// ---------------------------------------------------------------------------
// Errors
// ---------------------------------------------------------------------------

/// Which of the three input files an error refers to.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum ScenarioFile {
    Nodes,
    Edges,
    Objectives,
}

impl fmt::Display for ScenarioFile {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Nodes => write!(f, "node"),
            Self::Edges => write!(f, "edges"),
            Self::Objectives => write!(f, "objectives"),
        }
    }
}

/// Describes why a scenario could not be loaded.
#[derive(Debug)]
pub enum ScenarioLoadError {
    /// Underlying I/O failure while reading one of the input files.
    Io { file: ScenarioFile, error: io::Error },
    /// The file ended before a structurally required line.
    MissingLine { file: ScenarioFile, line: usize, expected: &'static str },
    /// A line is present but one of its fields cannot be interpreted.
    Malformed { file: ScenarioFile, line: usize, message: String },
    /// The declared start coordinate lies outside the grid extents.
    StartOutOfBounds { start: Coord, width: i32, height: i32 },
}

impl fmt::Display for ScenarioLoadError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Io { file, error } => write!(f, "{file} file I/O error: {error}"),
            Self::MissingLine { file, line, expected } => {
                write!(f, "{file} file ended before line {line}: expected {expected}")
            }
            Self::Malformed { file, line, message } => {
                write!(f, "invalid {file} file at line {line}: {message}")
            }
            Self::StartOutOfBounds { start, width, height } => {
                write!(f, "start {start} lies outside the {width}x{height} grid")
            }
        }
    }
}

impl Error for ScenarioLoadError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match self {
            Self::Io { error, .. } => Some(error),
            _ => None,
        }
    }
}

// ---------------------------------------------------------------------------
// Line and token helpers
// ---------------------------------------------------------------------------

/// Non-blank lines paired with their 1-based line numbers.
fn numbered_lines(content: &str) -> impl Iterator<Item = (usize, &str)> {
    content
        .lines()
        .enumerate()
        .map(|(index, line)| (index + 1, line))
        .filter(|(_, line)| !line.trim().is_empty())
}

fn parse_token<T: FromStr>(
    tokens: &mut SplitWhitespace<'_>,
    file: ScenarioFile,
    line: usize,
    expected: &'static str,
) -> Result<T, ScenarioLoadError> {
    let token = tokens.next().ok_or(ScenarioLoadError::Malformed {
        file,
        line,
        message: format!("missing {expected}"),
    })?;
    token.parse().map_err(|_| ScenarioLoadError::Malformed {
        file,
        line,
        message: format!("invalid {expected} `{token}`"),
    })
}

/// One `x-y` endpoint token from an edges line.
fn parse_endpoint(
    tokens: &mut SplitWhitespace<'_>,
    line: usize,
    expected: &'static str,
) -> Result<Coord, ScenarioLoadError> {
    const FILE: ScenarioFile = ScenarioFile::Edges;
    let token = tokens.next().ok_or(ScenarioLoadError::Malformed {
        file: FILE,
        line,
        message: format!("missing {expected}"),
    })?;
    let invalid = || ScenarioLoadError::Malformed {
        file: FILE,
        line,
        message: format!("invalid {expected} `{token}`"),
    };
    let (x, y) = token.split_once('-').ok_or_else(invalid)?;
    let x: i32 = x.parse().map_err(|_| invalid())?;
    let y: i32 = y.parse().map_err(|_| invalid())?;
    Ok(Coord::new(x, y))
}

// ---------------------------------------------------------------------------
// Parsers
// ---------------------------------------------------------------------------

/// Parse the node file into a grid. Positions never listed stay absent.
pub fn parse_grid(content: &str) -> Result<Grid, ScenarioLoadError> {
    const FILE: ScenarioFile = ScenarioFile::Nodes;
    let mut lines = numbered_lines(content);

    let (extents_line, extents) = lines.next().ok_or(ScenarioLoadError::MissingLine {
        file: FILE,
        line: 1,
        expected: "grid extents `width height`",
    })?;
    let mut tokens = extents.split_whitespace();
    let width: i32 = parse_token(&mut tokens, FILE, extents_line, "grid width")?;
    let height: i32 = parse_token(&mut tokens, FILE, extents_line, "grid height")?;
    if width < 0 || height < 0 {
        return Err(ScenarioLoadError::Malformed {
            file: FILE,
            line: extents_line,
            message: format!("negative grid extents {width} {height}"),
        });
    }

    let mut grid = Grid::new(width, height);
    for (line_number, line) in lines {
        let mut tokens = line.split_whitespace();
        let x: i32 = parse_token(&mut tokens, FILE, line_number, "cell x")?;
        let y: i32 = parse_token(&mut tokens, FILE, line_number, "cell y")?;
        let terrain: Terrain = parse_token(&mut tokens, FILE, line_number, "cell terrain")?;
        let coord = Coord::new(x, y);
        if !grid.in_bounds(coord) {
            return Err(ScenarioLoadError::Malformed {
                file: FILE,
                line: line_number,
                message: format!("cell {coord} lies outside the {width}x{height} grid"),
            });
        }
        grid.place_cell(coord, terrain);
    }

    Ok(grid)
}

/// Parse the edges file. Each line inserts both directions of one edge.
pub fn parse_edges(content: &str) -> Result<AdjacencyIndex, ScenarioLoadError> {
    const FILE: ScenarioFile = ScenarioFile::Edges;
    let mut adjacency = AdjacencyIndex::new();
    for (line_number, line) in numbered_lines(content) {
        let mut tokens = line.split_whitespace();
        let from = parse_endpoint(&mut tokens, line_number, "edge source")?;
        let to = parse_endpoint(&mut tokens, line_number, "edge destination")?;
        let cost: f64 = parse_token(&mut tokens, FILE, line_number, "edge cost")?;
        if !cost.is_finite() || cost < 0.0 {
            return Err(ScenarioLoadError::Malformed {
                file: FILE,
                line: line_number,
                message: format!("edge cost {cost} must be finite and non-negative"),
            });
        }
        adjacency.add_undirected(from, to, cost);
    }
    Ok(adjacency)
}

/// Parse the objectives file: sight radius, start, then the objective list.
pub fn parse_run_setup(content: &str) -> Result<RunSetup, ScenarioLoadError> {
    const FILE: ScenarioFile = ScenarioFile::Objectives;
    let mut lines = numbered_lines(content);

    let (radius_line, radius_text) = lines.next().ok_or(ScenarioLoadError::MissingLine {
        file: FILE,
        line: 1,
        expected: "sight radius",
    })?;
    let mut tokens = radius_text.split_whitespace();
    let radius: f64 = parse_token(&mut tokens, FILE, radius_line, "sight radius")?;
    // `as` truncates toward zero and saturates at the i32 bounds.
    let sight_radius = radius as i32;

    let (start_line, start_text) = lines.next().ok_or(ScenarioLoadError::MissingLine {
        file: FILE,
        line: 2,
        expected: "start coordinate `x y`",
    })?;
    let mut tokens = start_text.split_whitespace();
    let start_x: i32 = parse_token(&mut tokens, FILE, start_line, "start x")?;
    let start_y: i32 = parse_token(&mut tokens, FILE, start_line, "start y")?;

    let mut objectives = Vec::new();
    for (line_number, line) in lines {
        let mut tokens = line.split_whitespace();
        let x: i32 = parse_token(&mut tokens, FILE, line_number, "objective x")?;
        let y: i32 = parse_token(&mut tokens, FILE, line_number, "objective y")?;
        let mut options = Vec::new();
        for token in tokens {
            let option: Terrain = token.parse().map_err(|_| ScenarioLoadError::Malformed {
                file: FILE,
                line: line_number,
                message: format!("invalid terrain option `{token}`"),
            })?;
            options.push(option);
        }
        objectives.push(Objective::new(Coord::new(x, y), options));
    }

    Ok(RunSetup { sight_radius, start: Coord::new(start_x, start_y), objectives })
}

// ---------------------------------------------------------------------------
// Loader
// ---------------------------------------------------------------------------

/// Read and parse all three input files into a validated scenario.
pub fn load_scenario(
    nodes_path: &Path,
    edges_path: &Path,
    objectives_path: &Path,
) -> Result<Scenario, ScenarioLoadError> {
    let nodes = read_input(nodes_path, ScenarioFile::Nodes)?;
    let edges = read_input(edges_path, ScenarioFile::Edges)?;
    let setup = read_input(objectives_path, ScenarioFile::Objectives)?;

    let grid = parse_grid(&nodes)?;
    let adjacency = parse_edges(&edges)?;
    let setup = parse_run_setup(&setup)?;

    if !grid.in_bounds(setup.start) {
        return Err(ScenarioLoadError::StartOutOfBounds {
            start: setup.start,
            width: grid.width(),
            height: grid.height(),
        });
    }

    Ok(Scenario {
        grid,
        adjacency,
        sight_radius: setup.sight_radius,
        start: setup.start,
        objectives: setup.objectives,
    })
}

fn read_input(path: &Path, file: ScenarioFile) -> Result<String, ScenarioLoadError> {
    fs::read_to_string(path).map_err(|error| ScenarioLoadError::Io { file, error })
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
