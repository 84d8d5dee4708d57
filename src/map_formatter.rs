use std::fmt::{self, Debug, Display, Formatter};

use crate::map::GoalMap;
use crate::state::State;

/// Renders a map with a state on top of it in XSB notation.
#[derive(Clone, Copy)]
pub struct MapFormatter<'a> {
    map: &'a GoalMap,
    state: &'a State,
}

impl<'a> MapFormatter<'a> {
    pub(crate) fn new(map: &'a GoalMap, state: &'a State) -> Self {
        Self { map, state }
    }
}

impl Display for MapFormatter<'_> {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        self.map.write_with_state(self.state, f)
    }
}

impl Debug for MapFormatter<'_> {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self)
    }
}
