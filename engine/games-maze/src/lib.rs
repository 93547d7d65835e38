//! Text labyrinth game model
//!
//! A single walker moves through a maze drawn as text until it reaches the
//! exit. There is no opponent, so the search degenerates into path finding
//! over a graph that is full of cycles: every corridor can be walked both
//! ways, and states are keyed by position alone.
//!
//! # Level format
//!
//! ```text
//!  .I      ' ' wall
//!   .      '.' floor
//! ...O     'I' start (floor)
//!          'O' exit (floor)
//! ```
//!
//! Lines are rows, characters are columns; rows may have different lengths.
//!
//! # Named strategies
//!
//! * portfolio `no_revisit`: never step onto a tile this walk already visited
//! * heuristic `distance`: negative Manhattan distance to the exit
//! * priority `distance`: expand tiles closer to the exit first

use std::collections::{BTreeSet, HashSet};
use std::fmt;
use std::str::FromStr;

use engine_core::{
    Game, Heuristic, JointAction, LegalMoves, Outcome, Portfolio, Priority, Valuation,
};
use thiserror::Error;

/// Tile coordinate: `(row, column)`
pub type Coord = (usize, usize);

/// The sample labyrinth used when no level is given.
pub const CLASSIC_LEVEL: &str = " .I
  .
..... ...
.     .
....... .
.       .
. .......
. .   . .
... ... .
        .
.........
      .
      O";

/// Errors raised while reading a level.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum LevelError {
    #[error("Unknown tile '{tile}' at line {line}, column {column}")]
    UnknownTile {
        tile: char,
        line: usize,
        column: usize,
    },

    #[error("Level has no start tile 'I'")]
    MissingStart,

    #[error("Level has no exit tile 'O'")]
    MissingExit,

    #[error("Level has more than one '{0}' tile")]
    Duplicate(char),
}

/// The only actor: whoever walks the maze.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct Walker;

/// One step on the grid.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum Step {
    Up,
    Down,
    Left,
    Right,
}

impl Step {
    pub const ALL: [Step; 4] = [Step::Up, Step::Down, Step::Left, Step::Right];

    /// Target of this step, if it stays on non-negative coordinates.
    pub fn target(self, (row, column): Coord) -> Option<Coord> {
        match self {
            Step::Up => row.checked_sub(1).map(|row| (row, column)),
            Step::Down => Some((row + 1, column)),
            Step::Left => column.checked_sub(1).map(|column| (row, column)),
            Step::Right => Some((row, column + 1)),
        }
    }
}

impl fmt::Display for Step {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let key = match self {
            Step::Up => 'w',
            Step::Down => 's',
            Step::Left => 'a',
            Step::Right => 'd',
        };
        write!(f, "{key}")
    }
}

/// Walker position plus the tiles this walk has already stepped on.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct State {
    position: Coord,
    visited: BTreeSet<Coord>,
}

impl State {
    pub fn position(&self) -> Coord {
        self.position
    }

    pub fn has_visited(&self, tile: Coord) -> bool {
        self.visited.contains(&tile)
    }
}

/// A parsed labyrinth.
#[derive(Debug, Clone)]
pub struct Maze {
    tiles: HashSet<Coord>,
    start: Coord,
    exit: Coord,
}

impl Maze {
    /// The built-in sample level.
    pub fn classic() -> Result<Self, LevelError> {
        CLASSIC_LEVEL.parse()
    }

    pub fn start(&self) -> Coord {
        self.start
    }

    pub fn exit(&self) -> Coord {
        self.exit
    }

    pub fn is_floor(&self, tile: Coord) -> bool {
        self.tiles.contains(&tile)
    }

    /// Number of walkable tiles, start and exit included.
    pub fn floor_count(&self) -> usize {
        self.tiles.len()
    }

    /// Steps leading from `tile` onto floor.
    pub fn open_steps(&self, tile: Coord) -> Vec<Step> {
        Step::ALL
            .into_iter()
            .filter(|step| step.target(tile).is_some_and(|next| self.is_floor(next)))
            .collect()
    }

    /// Manhattan distance from `tile` to the exit.
    pub fn distance_to_exit(&self, tile: Coord) -> usize {
        tile.0.abs_diff(self.exit.0) + tile.1.abs_diff(self.exit.1)
    }
}

impl FromStr for Maze {
    type Err = LevelError;

    fn from_str(level: &str) -> Result<Self, Self::Err> {
        let mut tiles = HashSet::new();
        let mut start = None;
        let mut exit = None;

        for (row, line) in level.lines().enumerate() {
            for (column, tile) in line.chars().enumerate() {
                let coord = (row, column);
                match tile {
                    ' ' => continue,
                    '.' => {}
                    'I' => place(&mut start, coord, tile)?,
                    'O' => place(&mut exit, coord, tile)?,
                    _ => {
                        return Err(LevelError::UnknownTile {
                            tile,
                            line: row + 1,
                            column: column + 1,
                        })
                    }
                }
                tiles.insert(coord);
            }
        }

        Ok(Self {
            tiles,
            start: start.ok_or(LevelError::MissingStart)?,
            exit: exit.ok_or(LevelError::MissingExit)?,
        })
    }
}

fn place(slot: &mut Option<Coord>, coord: Coord, tile: char) -> Result<(), LevelError> {
    match slot.replace(coord) {
        Some(_) => Err(LevelError::Duplicate(tile)),
        None => Ok(()),
    }
}

impl Game for Maze {
    type State = State;
    type Actor = Walker;
    type Move = Step;
    type Hash = Coord;

    fn actors(&self) -> Vec<Walker> {
        vec![Walker]
    }

    fn initial_state(&self) -> State {
        State {
            position: self.start,
            visited: BTreeSet::from([self.start]),
        }
    }

    fn legal_moves(&self, state: &State) -> LegalMoves<Walker, Step> {
        if self.is_terminal(state) {
            return LegalMoves::new();
        }
        LegalMoves::from([(Walker, self.open_steps(state.position))])
    }

    fn apply(&self, state: &State, action: &JointAction<Walker, Step>) -> State {
        let target = action
            .get(Walker)
            .and_then(|step| step.target(state.position))
            .filter(|&tile| self.is_floor(tile));

        match target {
            Some(position) => {
                let mut visited = state.visited.clone();
                visited.insert(position);
                State { position, visited }
            }
            None => state.clone(),
        }
    }

    fn outcome(&self, state: &State) -> Option<Outcome<Walker>> {
        (state.position == self.exit).then_some(Outcome::Winner(Walker))
    }

    fn hash_state(&self, state: &State) -> Coord {
        state.position
    }

    fn heuristic(&self, name: &str) -> Option<Heuristic<Self>> {
        match name {
            "distance" => Some(distance_valuation),
            _ => None,
        }
    }

    fn heuristic_names(&self) -> &'static [&'static str] {
        &["distance"]
    }

    fn portfolio(&self, name: &str) -> Option<Portfolio<Self>> {
        match name {
            "no_revisit" => Some(no_revisit),
            _ => None,
        }
    }

    fn portfolio_names(&self) -> &'static [&'static str] {
        &["no_revisit"]
    }

    fn priority(&self, name: &str) -> Option<Priority<Self>> {
        match name {
            "distance" => Some(closeness),
            _ => None,
        }
    }

    fn priority_names(&self) -> &'static [&'static str] {
        &["distance"]
    }
}

fn distance_valuation(maze: &Maze, state: &State) -> Valuation<Walker> {
    Valuation::from([(Walker, closeness(maze, state))])
}

fn closeness(maze: &Maze, state: &State) -> f64 {
    -(maze.distance_to_exit(state.position) as f64)
}

fn no_revisit(_maze: &Maze, state: &State, _walker: Walker, steps: &[Step]) -> Vec<Step> {
    steps
        .iter()
        .copied()
        .filter(|step| {
            step.target(state.position)
                .is_some_and(|tile| !state.has_visited(tile))
        })
        .collect()
}
