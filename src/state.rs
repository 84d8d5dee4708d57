use std::hash::{Hash, Hasher};

use crate::data::{Dir, Pos};
use crate::map::{GoalMap, MapCell};

/// A snapshot of everything that moves: the player and the boxes.
///
/// States are immutable - `apply` builds a new value and never touches the
/// predecessor. Identity (`Eq`/`Hash`) is the (player, boxes) pair only;
/// `path_cost` is carried along but two states reaching the same arrangement
/// through different move counts are the same search node.
#[derive(Debug, Clone)]
pub struct State {
    pub player_pos: Pos,
    boxes: Vec<Pos>,
    path_cost: u32,
}

impl State {
    pub(crate) fn new(player_pos: Pos, boxes: Vec<Pos>) -> State {
        Self::with_cost(player_pos, boxes, 0)
    }

    fn with_cost(player_pos: Pos, mut boxes: Vec<Pos>, path_cost: u32) -> State {
        // kept sorted so states with reordered boxes compare and hash equal
        boxes.sort_unstable();
        State {
            player_pos,
            boxes,
            path_cost,
        }
    }

    pub fn boxes(&self) -> &[Pos] {
        &self.boxes
    }

    /// Number of moves from the initial state.
    pub fn path_cost(&self) -> u32 {
        self.path_cost
    }

    /// The successor after moving in `dir`, or `None` when the move is
    /// illegal (leaving the board, walking into a wall, pushing a box into a
    /// wall or another box). An illegal move is an ordinary outcome, not an
    /// error.
    pub fn apply(&self, map: &GoalMap, dir: Dir) -> Option<State> {
        let next_player = self.player_pos.step(dir)?;
        if !map.grid.contains(next_player) || map.grid[next_player] == MapCell::Wall {
            return None;
        }

        let boxes = match self.boxes.binary_search(&next_player) {
            Ok(pushed) => {
                let next_box = next_player.step(dir)?;
                if !map.grid.contains(next_box)
                    || map.grid[next_box] == MapCell::Wall
                    || self.boxes.binary_search(&next_box).is_ok()
                {
                    return None;
                }
                let mut boxes = self.boxes.clone();
                boxes[pushed] = next_box;
                boxes
            }
            Err(_) => self.boxes.clone(),
        };

        Some(Self::with_cost(next_player, boxes, self.path_cost + 1))
    }

    /// Exact goal check - every box sits on a goal.
    pub fn is_solved(&self, map: &GoalMap) -> bool {
        self.boxes.iter().all(|&b| map.grid[b] == MapCell::Goal)
    }

    /// Sum over all boxes of the Manhattan distance to the nearest goal.
    ///
    /// Zero whenever every box sits on *some* goal, which is necessary but
    /// not sufficient for `is_solved` to hold under a different goal set, so
    /// the search never uses it as a solved check.
    pub fn heuristic(&self, map: &GoalMap) -> u32 {
        self.boxes
            .iter()
            .map(|&b| {
                map.goals
                    .iter()
                    .map(|&g| u32::from(b.dist(g)))
                    .min()
                    .unwrap_or(0)
            })
            .sum()
    }
}

impl PartialEq for State {
    fn eq(&self, other: &Self) -> bool {
        self.player_pos == other.player_pos && self.boxes == other.boxes
    }
}

impl Eq for State {}

impl Hash for State {
    fn hash<H: Hasher>(&self, hasher: &mut H) {
        self.player_pos.hash(hasher);
        self.boxes.hash(hasher);
    }
}
