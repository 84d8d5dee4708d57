use std::fmt::{self, Debug, Display, Formatter};

use crate::map::GoalMap;
use crate::moves::Moves;
use crate::state::State;

/// Replays a move sequence from the initial state, printing each board.
#[derive(Clone, Copy)]
pub struct SolutionFormatter<'a> {
    map: &'a GoalMap,
    initial_state: &'a State,
    moves: &'a Moves,
    include_steps: bool,
}

impl<'a> SolutionFormatter<'a> {
    pub(crate) fn new(
        map: &'a GoalMap,
        initial_state: &'a State,
        moves: &'a Moves,
        include_steps: bool,
    ) -> Self {
        Self {
            map,
            initial_state,
            moves,
            include_steps,
        }
    }
}

impl Display for SolutionFormatter<'_> {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        writeln!(f, "{}", self.map.format_with_state(self.initial_state))?;
        let mut last_state = self.initial_state.clone();
        for &mov in self.moves {
            let new_state = match last_state.apply(self.map, mov.dir) {
                Some(state) => state,
                // the moves don't fit this level - stop the replay
                None => return Ok(()),
            };
            if mov.is_push || self.include_steps {
                writeln!(f, "{}", self.map.format_with_state(&new_state))?;
            }
            last_state = new_state;
        }
        Ok(())
    }
}

impl Debug for SolutionFormatter<'_> {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self)
    }
}
