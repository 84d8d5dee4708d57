mod frontier;
mod stats;

pub use self::stats::Stats;

use std::fmt;
use std::fmt::{Debug, Formatter};
use std::time::Instant;

use fnv::FnvHashMap;
use log::debug;

use crate::config::Strategy;
use crate::data::{Dir, DIRECTIONS};
use crate::level::Level;
use crate::moves::{Move, Moves};
use crate::state::State;
use crate::Solve;

use self::frontier::{Frontier, SearchNode};

pub struct SolverOk {
    /// `None` means the whole reachable state space was explored
    /// without finding a solved state.
    pub moves: Option<Moves>,
    pub stats: Stats,
    strategy: Strategy,
}

impl SolverOk {
    fn new(moves: Option<Moves>, stats: Stats, strategy: Strategy) -> Self {
        Self {
            moves,
            stats,
            strategy,
        }
    }
}

impl Debug for SolverOk {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        match self.moves {
            None => writeln!(f, "{}: no solution", self.strategy)?,
            Some(ref moves) => writeln!(f, "{}: {} moves", self.strategy, moves.move_cnt())?,
        }
        write!(f, "{:?}", self.stats)
    }
}

impl Solve for Level {
    fn solve(&self, strategy: Strategy, print_status: bool) -> SolverOk {
        search(self, strategy, print_status)
    }
}

fn search(level: &Level, strategy: Strategy, print_status: bool) -> SolverOk {
    debug!("Searching using {}", strategy);

    let started = Instant::now();
    let mut stats = Stats::new();
    let mut frontier = Frontier::new(strategy);
    // also the visited set - a state is a key here iff it has been expanded
    let mut prevs: FnvHashMap<State, State> = FnvHashMap::default();

    let start = SearchNode::new(
        level.state.clone(),
        None,
        level.state.heuristic(&level.map),
    );
    stats.add_created(&start);
    frontier.push(start);

    while let Some(cur_node) = frontier.pop() {
        if prevs.contains_key(&cur_node.state) {
            stats.add_duplicate(&cur_node);
            continue;
        }
        if stats.add_expanded(&cur_node) && print_status {
            println!("Expanded new depth: {}", cur_node.state.path_cost());
            println!("{:?}", stats);
        }

        // insert here and not when the state is created
        // so a longer path can't overwrite a shorter one
        match cur_node.prev {
            Some(ref prev) => prevs.insert(cur_node.state.clone(), prev.clone()),
            // the initial state points to itself to avoid an Option
            None => prevs.insert(cur_node.state.clone(), cur_node.state.clone()),
        };

        if cur_node.state.is_solved(&level.map) {
            debug!("Solved, backtracking path");
            stats.set_elapsed(started.elapsed());
            let moves = backtrack_moves(&prevs, &cur_node.state);
            return SolverOk::new(Some(moves), stats, strategy);
        }

        for &dir in &DIRECTIONS {
            if let Some(neighbor) = cur_node.state.apply(&level.map, dir) {
                let h = neighbor.heuristic(&level.map);
                let next_node = SearchNode::new(neighbor, Some(cur_node.state.clone()), h);
                stats.add_created(&next_node);
                frontier.push(next_node);
            }
        }
    }

    debug!("Frontier exhausted, no solution");
    stats.set_elapsed(started.elapsed());
    SolverOk::new(None, stats, strategy)
}

fn backtrack_moves(prevs: &FnvHashMap<State, State>, final_state: &State) -> Moves {
    let mut path = Vec::new();
    let mut state = final_state;
    loop {
        path.push(state.clone());
        let prev = &prevs[state];
        if prev == state {
            break;
        }
        state = prev;
    }
    path.reverse();

    let mut moves = Moves::default();
    for pair in path.windows(2) {
        moves.add(move_between(&pair[0], &pair[1]));
    }
    moves
}

fn move_between(from: &State, to: &State) -> Move {
    let dir = match Dir::between(from.player_pos, to.player_pos) {
        Some(dir) => dir,
        None => unreachable!("consecutive states differ by one step"),
    };
    Move::new(dir, from.boxes() != to.boxes())
}

#[cfg(test)]
mod tests {
    use crate::level::Level;

    use super::*;

    fn parse(level: &str) -> Level {
        level.parse().unwrap()
    }

    fn replay(level: &Level, moves: &Moves) -> State {
        let mut state = level.state.clone();
        for mov in moves {
            state = state
                .apply(&level.map, mov.dir)
                .unwrap_or_else(|| panic!("illegal move {} in solution", mov));
        }
        state
    }

    #[test]
    fn one_push_level() {
        let level = parse(
            r"
#####
#@$.#
#####
",
        );

        for &strategy in &Strategy::ALL {
            let solution = level.solve(strategy, false);
            let moves = solution.moves.unwrap();
            assert_eq!(moves.to_string(), "R");
            assert_eq!(moves.move_cnt(), 1);
            assert_eq!(solution.stats.total_created(), 2);
            assert_eq!(solution.stats.total_expanded(), 2);
            assert_eq!(solution.stats.total_duplicates(), 0);
        }
    }

    #[test]
    fn already_solved_level() {
        let level = parse(
            r"
####
#@*#
####
",
        );

        for &strategy in &Strategy::ALL {
            let solution = level.solve(strategy, false);
            let moves = solution.moves.unwrap();
            assert_eq!(moves.move_cnt(), 0);
            assert_eq!(solution.stats.total_expanded(), 1);
        }
    }

    #[test]
    fn unsolvable_level_exhausts_the_space() {
        // the box is stuck in the corner, the player can only walk around
        let level = parse(
            r"
####
#@$#
#. #
####
",
        );

        for &strategy in &Strategy::ALL {
            let solution = level.solve(strategy, false);
            assert!(solution.moves.is_none(), "{} found a bogus solution", strategy);
            // player can stand on 3 cells, the box never moves
            assert_eq!(solution.stats.total_expanded(), 3);
            assert_eq!(solution.stats.total_created(), 5);
            assert_eq!(solution.stats.total_duplicates(), 2);
        }
    }

    #[test]
    fn optimal_strategies_agree_on_move_count() {
        let level = parse(
            r"
#######
#@ $ .#
#######
",
        );

        for &strategy in &[Strategy::Bfs, Strategy::Ucs, Strategy::AStar] {
            let moves = level.solve(strategy, false).moves.unwrap();
            assert_eq!(moves.to_string(), "rRR", "{} is not optimal", strategy);
            assert_eq!(moves.move_cnt(), 3);
            assert_eq!(moves.push_cnt(), 2);
        }
    }

    #[test]
    fn all_strategies_solve_a_two_box_level() {
        let level = parse(
            r"
######
#@$. #
# $. #
######
",
        );

        for &strategy in &Strategy::ALL {
            let moves = level.solve(strategy, false).moves.unwrap();
            let end = replay(&level, &moves);
            assert!(end.is_solved(&level.map), "{} replay failed", strategy);
            if strategy.is_optimal() {
                assert_eq!(moves.move_cnt(), 4, "{} is not optimal", strategy);
            } else {
                assert!(moves.move_cnt() >= 4);
            }
        }
    }

    #[test]
    fn repeated_searches_are_deterministic() {
        let level = parse(
            r"
########
#  @   #
# $$ # #
# .. # #
#    # #
########
",
        );

        for &strategy in &Strategy::ALL {
            let first = level.solve(strategy, false);
            let second = level.solve(strategy, false);

            match (first.moves, second.moves) {
                (Some(a), Some(b)) => assert_eq!(a, b, "{} is not deterministic", strategy),
                (a, b) => panic!("{}: expected solutions, got {:?} and {:?}", strategy, a, b),
            }
            assert_eq!(
                first.stats.total_expanded(),
                second.stats.total_expanded(),
                "{} expansion counts differ",
                strategy
            );
            assert_eq!(first.stats.total_created(), second.stats.total_created());
        }
    }
}
