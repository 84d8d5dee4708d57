use std::fmt::{self, Debug, Display, Formatter};
use std::time::Duration;

use prettytable::format::consts::FORMAT_CLEAN;
use prettytable::{Cell, Row, Table};
use separator::Separatable;

use crate::solver::frontier::SearchNode;

/// Search counters tracked per depth (index = path cost at which the event
/// happened) plus the wall-clock time of the whole search.
#[derive(PartialEq, Eq)]
pub struct Stats {
    created_states: Vec<u32>,
    expanded_states: Vec<u32>,
    duplicate_states: Vec<u32>,
    elapsed: Duration,
}

impl Stats {
    pub(crate) fn new() -> Self {
        Stats {
            created_states: vec![],
            expanded_states: vec![],
            duplicate_states: vec![],
            elapsed: Duration::from_secs(0),
        }
    }

    pub fn total_created(&self) -> u64 {
        Self::total(&self.created_states)
    }

    /// Unique states expanded - the `nodes_expanded` diagnostic.
    pub fn total_expanded(&self) -> u64 {
        Self::total(&self.expanded_states)
    }

    pub fn total_duplicates(&self) -> u64 {
        Self::total(&self.duplicate_states)
    }

    pub fn elapsed(&self) -> Duration {
        self.elapsed
    }

    pub(crate) fn set_elapsed(&mut self, elapsed: Duration) {
        self.elapsed = elapsed;
    }

    pub(crate) fn add_created(&mut self, node: &SearchNode) -> bool {
        Self::add(&mut self.created_states, node)
    }

    pub(crate) fn add_expanded(&mut self, node: &SearchNode) -> bool {
        Self::add(&mut self.expanded_states, node)
    }

    pub(crate) fn add_duplicate(&mut self, node: &SearchNode) -> bool {
        Self::add(&mut self.duplicate_states, node)
    }

    /// Returns true when the node reached a depth not seen by this counter.
    fn add(counts: &mut Vec<u32>, node: &SearchNode) -> bool {
        let depth = node.state.path_cost() as usize;
        let mut new_depth = false;

        // while because DFS and the informed strategies can skip depths
        while depth >= counts.len() {
            counts.push(0);
            new_depth = true;
        }
        counts[depth] += 1;
        new_depth
    }

    fn total(counts: &[u32]) -> u64 {
        counts.iter().map(|&n| u64::from(n)).sum()
    }

    fn at(counts: &[u32], depth: usize) -> u32 {
        counts.get(depth).cloned().unwrap_or(0)
    }
}

impl Display for Stats {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        let created = self.total_created();
        let expanded = self.total_expanded();
        let duplicates = self.total_duplicates();
        let left = created - expanded - duplicates;
        writeln!(f, "States created total: {}", created.separated_string())?;
        writeln!(f, "Unique states expanded total: {}", expanded.separated_string())?;
        writeln!(f, "Reached duplicates total: {}", duplicates.separated_string())?;
        writeln!(f, "Created but not reached total: {}", left.separated_string())?;
        writeln!(
            f,
            "Time: {} ms",
            (self.elapsed.as_millis() as u64).separated_string()
        )?;

        let mut table = Table::new();
        table.set_format(*FORMAT_CLEAN);
        table.set_titles(Row::new(vec![
            Cell::new("Depth"),
            Cell::new("Created"),
            Cell::new("Expanded"),
            Cell::new("Duplicates"),
        ]));
        // created_states is the longest vec - every state is created first
        for depth in 0..self.created_states.len() {
            table.add_row(Row::new(vec![
                Cell::new(&depth.to_string()),
                Cell::new(&Self::at(&self.created_states, depth).separated_string()),
                Cell::new(&Self::at(&self.expanded_states, depth).separated_string()),
                Cell::new(&Self::at(&self.duplicate_states, depth).separated_string()),
            ]));
        }
        write!(f, "{}", table)
    }
}

impl Debug for Stats {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        writeln!(f, "created by depth: {:?}", self.created_states)?;
        writeln!(f, "expanded by depth: {:?}", self.expanded_states)?;
        writeln!(f, "duplicates by depth: {:?}", self.duplicate_states)
    }
}
