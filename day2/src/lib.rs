use std::str::FromStr;

use anyhow::Result;
use thiserror::Error;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Command {
    Forward(i64),
    Up(i64),
    Down(i64),
}

#[derive(Error, Debug)]
pub enum CommandParseError {
    #[error("Expected `<direction> <step>`, got {0:?}")]
    WrongShape(String),

    #[error("Invalid command {0:?}")]
    InvalidCommand(String),

    #[error("Invalid step")]
    InvalidStep(#[from] std::num::ParseIntError),
}

impl FromStr for Command {
    type Err = CommandParseError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let parts: [&str; 2] = s
            .split_whitespace()
            .collect::<Vec<_>>()
            .try_into()
            .map_err(|_| CommandParseError::WrongShape(s.to_string()))?;
        let step = parts[1].parse()?;

        let command = match parts[0] {
            "forward" => Command::Forward(step),
            "up" => Command::Up(step),
            "down" => Command::Down(step),
            other => return Err(CommandParseError::InvalidCommand(other.to_string())),
        };

        Ok(command)
    }
}

/// How up/down commands are interpreted.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Steering {
    /// up/down change the depth directly
    Direct,
    /// up/down change the aim, forward dives along it
    Aim,
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Submarine {
    pub position: i64,
    pub depth: i64,
    pub aim: i64,
}

impl Submarine {
    pub fn apply(&mut self, command: Command, steering: Steering) {
        match (steering, command) {
            (_, Command::Forward(n)) => {
                self.position += n;
                if steering == Steering::Aim {
                    self.depth += self.aim * n;
                }
            }
            (Steering::Direct, Command::Up(n)) => self.depth -= n,
            (Steering::Direct, Command::Down(n)) => self.depth += n,
            (Steering::Aim, Command::Up(n)) => self.aim -= n,
            (Steering::Aim, Command::Down(n)) => self.aim += n,
        }
    }

    pub fn location(&self) -> i64 {
        self.position * self.depth
    }
}

pub fn get_commands(input: impl Iterator<Item = impl Into<String>>) -> Result<Vec<Command>> {
    input
        .map(|line| {
            let line: String = line.into();
            line.parse().map_err(anyhow::Error::from)
        })
        .collect()
}

pub fn final_location(
    input: impl Iterator<Item = impl Into<String>>,
    steering: Steering,
) -> Result<i64> {
    let mut submarine = Submarine::default();

    for command in get_commands(input)? {
        submarine.apply(command, steering);
        log::trace!("{command:?} -> {submarine:?}");
    }

    Ok(submarine.location())
}
