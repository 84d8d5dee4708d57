use std::fmt;
use std::fmt::{Debug, Display, Formatter};

use crate::map::GoalMap;
use crate::map_formatter::MapFormatter;
use crate::moves::Moves;
use crate::solution_formatter::SolutionFormatter;
use crate::state::State;

/// A parsed level: the fixed map plus the initial state.
///
/// Only the parser constructs levels so every `Level` is well-formed:
/// exactly one player and as many boxes as goals.
#[derive(Clone)]
pub struct Level {
    pub map: GoalMap,
    pub state: State,
}

impl Level {
    pub(crate) fn new(map: GoalMap, state: State) -> Self {
        Level { map, state }
    }

    pub fn xsb(&self) -> MapFormatter<'_> {
        MapFormatter::new(&self.map, &self.state)
    }

    /// Replays `moves` from the initial state, one board per move
    /// (pushes only when `include_steps` is false).
    pub fn solution<'a>(&'a self, moves: &'a Moves, include_steps: bool) -> SolutionFormatter<'a> {
        SolutionFormatter::new(&self.map, &self.state, moves, include_steps)
    }
}

impl Display for Level {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.xsb())
    }
}

impl Debug for Level {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        write!(f, "{:?}", self.xsb())
    }
}
