use std::error::Error;
use std::fmt;
use std::fmt::{Display, Formatter};
use std::str::FromStr;

use crate::data::{Pos, MAX_SIZE};
use crate::level::Level;
use crate::map::{GoalMap, MapCell};
use crate::state::State;
use crate::vec2d::Vec2d;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ParserErr {
    InvalidCell(usize, usize),
    TooLarge,
    NoPlayer,
    MultiplePlayers,
    BoxesGoals { boxes: usize, goals: usize },
}

impl Display for ParserErr {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        match *self {
            ParserErr::InvalidCell(r, c) => write!(f, "Invalid cell at pos: [{}, {}]", r, c),
            ParserErr::TooLarge => write!(f, "Map larger than {} rows/columns", MAX_SIZE),
            ParserErr::NoPlayer => write!(f, "No player"),
            ParserErr::MultiplePlayers => write!(f, "More than one player"),
            ParserErr::BoxesGoals { boxes, goals } => {
                write!(f, "Different number of boxes ({}) and goals ({})", boxes, goals)
            }
        }
    }
}

impl Error for ParserErr {}

impl FromStr for Level {
    type Err = ParserErr;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        parse(s)
    }
}

pub(crate) fn parse(level: &str) -> Result<Level, ParserErr> {
    // trim so levels can be specified using raw strings more easily
    let level = level.trim_matches('\n').trim_end();

    let mut grid = Vec::new();
    let mut goals = Vec::new();
    let mut boxes = Vec::new();
    let mut player_pos = None;

    for (r, line) in level.lines().enumerate() {
        if r >= MAX_SIZE {
            return Err(ParserErr::TooLarge);
        }
        let mut row = Vec::new();
        for (c, cur) in line.chars().enumerate() {
            if c >= MAX_SIZE {
                return Err(ParserErr::TooLarge);
            }
            let pos = Pos::new(r as u8, c as u8);
            match cur {
                ' ' => row.push(MapCell::Empty),
                '#' => row.push(MapCell::Wall),
                '.' => {
                    goals.push(pos);
                    row.push(MapCell::Goal);
                }
                '$' => {
                    boxes.push(pos);
                    row.push(MapCell::Empty);
                }
                '*' => {
                    boxes.push(pos);
                    goals.push(pos);
                    row.push(MapCell::Goal);
                }
                '@' => {
                    if player_pos.is_some() {
                        return Err(ParserErr::MultiplePlayers);
                    }
                    player_pos = Some(pos);
                    row.push(MapCell::Empty);
                }
                '+' => {
                    if player_pos.is_some() {
                        return Err(ParserErr::MultiplePlayers);
                    }
                    player_pos = Some(pos);
                    goals.push(pos);
                    row.push(MapCell::Goal);
                }
                _ => return Err(ParserErr::InvalidCell(r, c)),
            }
        }
        grid.push(row);
    }

    let player_pos = player_pos.ok_or(ParserErr::NoPlayer)?;
    if boxes.len() != goals.len() {
        return Err(ParserErr::BoxesGoals {
            boxes: boxes.len(),
            goals: goals.len(),
        });
    }

    Ok(Level::new(
        GoalMap::new(Vec2d::new(&grid), goals),
        State::new(player_pos, boxes),
    ))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parsing_all_cell_kinds() {
        let level: Level = r"
#####
#+$*#
# . #
#$  #
#####
"
        .parse()
        .unwrap();

        assert_eq!(level.state.player_pos, Pos::new(1, 1));
        assert_eq!(
            level.state.boxes(),
            [Pos::new(1, 2), Pos::new(1, 3), Pos::new(3, 1)]
        );
        assert_eq!(
            level.map.goals,
            [Pos::new(1, 1), Pos::new(1, 3), Pos::new(2, 2)]
        );
        assert_eq!(level.map.grid[Pos::new(1, 1)], MapCell::Goal);
        assert_eq!(level.map.grid[Pos::new(1, 2)], MapCell::Empty);
    }

    #[test]
    fn no_player() {
        let err = r"
####
#$.#
####
"
        .parse::<Level>()
        .unwrap_err();
        assert_eq!(err, ParserErr::NoPlayer);
    }

    #[test]
    fn multiple_players() {
        let err = r"
#####
#@+.#
#####
"
        .parse::<Level>()
        .unwrap_err();
        assert_eq!(err, ParserErr::MultiplePlayers);
    }

    #[test]
    fn unbalanced_boxes_and_goals() {
        let err = r"
#####
#@$ #
#$ .#
#####
"
        .parse::<Level>()
        .unwrap_err();
        assert_eq!(err, ParserErr::BoxesGoals { boxes: 2, goals: 1 });
    }

    #[test]
    fn invalid_cell() {
        let err = r"
####
#@x#
####
"
        .parse::<Level>()
        .unwrap_err();
        assert_eq!(err, ParserErr::InvalidCell(1, 2));
    }

    #[test]
    fn ragged_rows_are_padded() {
        let level: Level = r"
###
#@##
#$ .#
#####
"
        .parse()
        .unwrap();

        // the first row is shorter than the widest one - padded with empty cells
        assert_eq!(level.map.grid.cols(), 5);
        assert_eq!(level.map.grid[Pos::new(0, 4)], MapCell::Empty);
    }

    #[test]
    fn level_formats_back_to_its_input() {
        let xsb: &str = r"
#####
#+$*#
#####
"
        .trim_start_matches('\n');

        let level: Level = xsb.parse().unwrap();
        assert_eq!(level.to_string(), xsb);
        assert_eq!(format!("{}", level), xsb);
        assert_eq!(format!("{:?}", level), xsb);
    }
}
