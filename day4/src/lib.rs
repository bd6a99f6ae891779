use std::{collections::BTreeSet, fmt, str::FromStr};

use anyhow::{anyhow, Result};
use thiserror::Error;
use util::{parse_nice, parse_number_list};

pub const SIZE: usize = 5;

/// Board state at the draw that completed it.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Win {
    pub draw: u32,
    pub unmarked_sum: u64,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Board {
    cells: [[u32; SIZE]; SIZE],
    marked: [[bool; SIZE]; SIZE],
    win: Option<Win>,
}

#[derive(Error, Debug)]
pub enum BoardParseError {
    #[error("Int parse error parsing into Board")]
    ParseNumberError(#[from] std::num::ParseIntError),

    #[error("Board has {0} rows instead of 5")]
    WrongRowCount(usize),

    #[error("Board row has {0} numbers instead of 5")]
    WrongRowLength(usize),
}

#[derive(Error, Debug, PartialEq, Eq)]
pub enum BingoError {
    #[error("Board {0} has not won yet")]
    NotWon(usize),

    #[error("There is no board {0}")]
    NoSuchBoard(usize),

    #[error("Score of board {0} doesn't fit in 64 bits")]
    ScoreOverflow(usize),
}

impl FromStr for Board {
    type Err = BoardParseError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let rows = s
            .lines()
            .filter(|line| !line.trim().is_empty())
            .map(|line| {
                line.split_whitespace()
                    .map(|n| n.parse().map_err(BoardParseError::ParseNumberError))
                    .collect::<Result<Vec<u32>, _>>()?
                    .try_into()
                    .map_err(|v: Vec<_>| BoardParseError::WrongRowLength(v.len()))
            })
            .collect::<Result<Vec<[u32; SIZE]>, _>>()?;

        let cells = rows
            .try_into()
            .map_err(|v: Vec<_>| BoardParseError::WrongRowCount(v.len()))?;

        Ok(Self::new(cells))
    }
}

/// Marked cells are shown in brackets.
impl fmt::Display for Board {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for (i, (cells, marked)) in self.cells.iter().zip(self.marked.iter()).enumerate() {
            if i > 0 {
                writeln!(f)?
            }
            for (&cell, &marked) in cells.iter().zip(marked.iter()) {
                if marked {
                    write!(f, "[{cell:>2}]")?
                } else {
                    write!(f, " {cell:>2} ")?
                }
            }
        }

        Ok(())
    }
}

impl Board {
    pub fn new(cells: [[u32; SIZE]; SIZE]) -> Self {
        Self {
            cells,
            marked: [[false; SIZE]; SIZE],
            win: None,
        }
    }

    fn position(&self, number: u32) -> Option<(usize, usize)> {
        self.cells.iter().enumerate().find_map(|(row, cells)| {
            cells
                .iter()
                .position(|&cell| cell == number)
                .map(|col| (row, col))
        })
    }

    /// A full row or a full column. Diagonals don't count.
    pub fn is_complete(&self) -> bool {
        let full_row = self.marked.iter().any(|row| row.iter().all(|&m| m));
        let full_col = (0..SIZE).any(|col| self.marked.iter().all(|row| row[col]));

        full_row || full_col
    }

    pub fn has_won(&self) -> bool {
        self.win.is_some()
    }

    pub fn win(&self) -> Option<Win> {
        self.win
    }

    pub fn last_draw(&self) -> Option<u32> {
        self.win.map(|win| win.draw)
    }

    /// Marks `number` if it is on the board. Returns true only on the draw
    /// that completes the board, later draws are still marked but never
    /// reported again.
    pub fn apply_draw(&mut self, number: u32) -> bool {
        let Some((row, col)) = self.position(number) else {
            return false;
        };
        self.marked[row][col] = true;

        if !self.has_won() && self.is_complete() {
            self.win = Some(Win {
                draw: number,
                unmarked_sum: self.unmarked_sum(),
            });
            true
        } else {
            false
        }
    }

    /// Sum of the cells unmarked right now, including marks made after a win.
    pub fn unmarked_sum(&self) -> u64 {
        self.cells
            .iter()
            .flatten()
            .zip(self.marked.iter().flatten())
            .filter_map(|(&cell, &marked)| (!marked).then_some(u64::from(cell)))
            .sum()
    }
}

#[derive(Debug, Clone)]
pub struct BoardSet {
    boards: Vec<Board>,
    remaining: BTreeSet<usize>,
}

impl BoardSet {
    pub fn new(boards: Vec<Board>) -> Self {
        let remaining = (0..boards.len()).collect();
        Self { boards, remaining }
    }

    pub fn boards(&self) -> &[Board] {
        &self.boards
    }

    /// Boards that haven't won yet, in input order.
    pub fn remaining(&self) -> impl Iterator<Item = usize> + '_ {
        self.remaining.iter().copied()
    }

    /// Applies one draw to every board and returns the indices of the boards
    /// it made win, in input order.
    pub fn apply_draw(&mut self, number: u32) -> Vec<usize> {
        let winners = self
            .boards
            .iter_mut()
            .enumerate()
            .filter_map(|(i, board)| board.apply_draw(number).then_some(i))
            .collect::<Vec<_>>();

        for &i in winners.iter() {
            self.remaining.remove(&i);
            log::debug!("board {i} wins on {number}:\n{}", self.boards[i]);
        }

        winners
    }

    /// Unmarked sum times winning draw, both taken when the board won.
    pub fn score(&self, index: usize) -> Result<u64, BingoError> {
        let win = self
            .boards
            .get(index)
            .ok_or(BingoError::NoSuchBoard(index))?
            .win()
            .ok_or(BingoError::NotWon(index))?;

        win.unmarked_sum
            .checked_mul(u64::from(win.draw))
            .ok_or(BingoError::ScoreOverflow(index))
    }

    /// Replays draws until some board wins; ties go to the earliest board.
    pub fn first_winner(&mut self, draws: impl IntoIterator<Item = u32>) -> Option<usize> {
        draws
            .into_iter()
            .find_map(|draw| self.apply_draw(draw).first().copied())
    }

    /// Replays draws until every board has won. When several boards complete
    /// on that final draw, the latest one in input order is returned.
    pub fn last_winner(&mut self, draws: impl IntoIterator<Item = u32>) -> Option<usize> {
        if self.remaining.is_empty() {
            return None;
        }

        draws.into_iter().find_map(|draw| {
            let winners = self.apply_draw(draw);
            if self.remaining.is_empty() {
                winners.last().copied()
            } else {
                None
            }
        })
    }
}

pub fn get_draws_and_boards(
    mut input: impl Iterator<Item = impl Into<String>>,
) -> Result<(Vec<u32>, BoardSet)> {
    let draws_line = input
        .by_ref()
        .map(Into::<String>::into)
        .find(|line| !line.trim().is_empty())
        .ok_or(anyhow!("Missing draws"))?;
    let draws = parse_nice(draws_line.trim(), parse_number_list)?;

    let lines = input.map(Into::<String>::into).collect::<Vec<_>>();

    let boards = lines
        .split(|line| line.trim().is_empty())
        .filter(|block| !block.is_empty())
        .map(|block| block.join("\n").parse().map_err(anyhow::Error::from))
        .collect::<Result<Vec<Board>>>()?;

    log::debug!("{} draws, {} boards", draws.len(), boards.len());

    Ok((draws, BoardSet::new(boards)))
}

pub fn first_winning_score(input: impl Iterator<Item = impl Into<String>>) -> Result<u64> {
    let (draws, mut boards) = get_draws_and_boards(input)?;

    let winner = boards
        .first_winner(draws)
        .ok_or(anyhow!("No board ever wins"))?;

    Ok(boards.score(winner)?)
}

pub fn last_winning_score(input: impl Iterator<Item = impl Into<String>>) -> Result<u64> {
    let (draws, mut boards) = get_draws_and_boards(input)?;

    let winner = boards
        .last_winner(draws)
        .ok_or(anyhow!("Not every board wins"))?;

    Ok(boards.score(winner)?)
}
