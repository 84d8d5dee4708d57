use std::error::Error;
use std::fmt::{self, Display, Formatter};
use std::str::FromStr;

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Strategy {
    Bfs,
    Dfs,
    Ucs,
    Greedy,
    AStar,
}

impl Strategy {
    pub const ALL: [Strategy; 5] = [
        Strategy::Bfs,
        Strategy::Dfs,
        Strategy::Ucs,
        Strategy::Greedy,
        Strategy::AStar,
    ];

    /// Whether the strategy guarantees a minimal move count
    /// (A* only as long as the heuristic stays admissible).
    pub fn is_optimal(self) -> bool {
        match self {
            Strategy::Bfs | Strategy::Ucs | Strategy::AStar => true,
            Strategy::Dfs | Strategy::Greedy => false,
        }
    }
}

impl Display for Strategy {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        match *self {
            Strategy::Bfs => write!(f, "bfs"),
            Strategy::Dfs => write!(f, "dfs"),
            Strategy::Ucs => write!(f, "ucs"),
            Strategy::Greedy => write!(f, "greedy"),
            Strategy::AStar => write!(f, "astar"),
        }
    }
}

impl FromStr for Strategy {
    type Err = UnknownStrategy;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "bfs" => Ok(Strategy::Bfs),
            "dfs" => Ok(Strategy::Dfs),
            "ucs" => Ok(Strategy::Ucs),
            "greedy" => Ok(Strategy::Greedy),
            "astar" => Ok(Strategy::AStar),
            _ => Err(UnknownStrategy(s.to_string())),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UnknownStrategy(pub String);

impl Display for UnknownStrategy {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "Unknown strategy: {} (expected bfs, dfs, ucs, greedy or astar)",
            self.0
        )
    }
}

impl Error for UnknownStrategy {}
