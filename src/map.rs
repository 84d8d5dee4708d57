use std::fmt;
use std::fmt::{Display, Formatter};

use crate::data::Pos;
use crate::map_formatter::MapFormatter;
use crate::state::State;
use crate::vec2d::Vec2d;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MapCell {
    Empty,
    Wall,
    Goal,
}

/// What sits on top of a cell - at most one of these at a time.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Contents {
    Empty,
    Box,
    Player,
}

/// The immovable part of a level: walls and goals. Identical for all states
/// derived from one level so it is never copied during search.
#[derive(Debug, Clone)]
pub struct GoalMap {
    pub grid: Vec2d<MapCell>,
    pub goals: Vec<Pos>,
}

impl GoalMap {
    pub(crate) fn new(grid: Vec2d<MapCell>, goals: Vec<Pos>) -> Self {
        GoalMap { grid, goals }
    }

    pub fn format_with_state<'a>(&'a self, state: &'a State) -> MapFormatter<'a> {
        MapFormatter::new(self, state)
    }

    pub(crate) fn write_with_state(&self, state: &State, f: &mut Formatter<'_>) -> fmt::Result {
        let mut contents = self.grid.create_scratchpad(Contents::Empty);
        for &b in state.boxes() {
            contents[b] = Contents::Box;
        }
        contents[state.player_pos] = Contents::Player;
        self.write(&contents, f)
    }

    fn write(&self, contents: &Vec2d<Contents>, f: &mut Formatter<'_>) -> fmt::Result {
        for r in 0..self.grid.rows() {
            // don't print trailing empty cells to match the input level strings
            let mut last_non_empty = 0;
            for c in 0..self.grid.cols() {
                let pos = Pos::new(r, c);
                if self.grid[pos] != MapCell::Empty || contents[pos] != Contents::Empty {
                    last_non_empty = c;
                }
            }

            for c in 0..=last_non_empty {
                let pos = Pos::new(r, c);
                Self::write_cell(self.grid[pos], contents[pos], f)?;
            }
            writeln!(f)?;
        }
        Ok(())
    }

    fn write_cell(cell: MapCell, contents: Contents, f: &mut Formatter<'_>) -> fmt::Result {
        match (cell, contents) {
            (MapCell::Wall, Contents::Empty) => write!(f, "#"),
            (MapCell::Wall, _) => unreachable!("wall cells can't be occupied"),
            (MapCell::Empty, Contents::Empty) => write!(f, " "),
            (MapCell::Empty, Contents::Box) => write!(f, "$"),
            (MapCell::Empty, Contents::Player) => write!(f, "@"),
            (MapCell::Goal, Contents::Empty) => write!(f, "."),
            (MapCell::Goal, Contents::Box) => write!(f, "*"),
            (MapCell::Goal, Contents::Player) => write!(f, "+"),
        }
    }
}

impl Display for GoalMap {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        let contents = self.grid.create_scratchpad(Contents::Empty);
        self.write(&contents, f)
    }
}
