use anyhow::{anyhow, Result};
use thiserror::Error;
use util::{parse_nice, parse_number_list};

const NEW_TIMER: usize = 8;
const RESET_TIMER: usize = 6;

#[derive(Error, Debug)]
#[error("Timer {0} is out of range 0..=8")]
pub struct TimerError(usize);

/// Lanternfish counted by timer value instead of one by one.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct School {
    by_timer: [u64; NEW_TIMER + 1],
}

impl School {
    pub fn new(timers: &[usize]) -> Result<Self, TimerError> {
        let mut school = Self::default();
        for &timer in timers {
            *school.by_timer.get_mut(timer).ok_or(TimerError(timer))? += 1;
        }
        Ok(school)
    }

    pub fn day_passes(&mut self) {
        let spawning = self.by_timer[0];
        self.by_timer.rotate_left(1);
        self.by_timer[RESET_TIMER] += spawning;
    }

    pub fn len(&self) -> u64 {
        self.by_timer.iter().sum()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

pub fn count_fish(input: &str, days: usize) -> Result<u64> {
    let line = input
        .lines()
        .find(|l| !l.trim().is_empty())
        .ok_or(anyhow!("no fish"))?;
    let timers: Vec<usize> = parse_nice(line.trim(), parse_number_list)?;

    let mut school = School::new(&timers)?;
    for day in 1..=days {
        school.day_passes();
        log::trace!("day {day}: {}", school.len());
    }

    Ok(school.len())
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    const TEST_INPUT: &str = include_str!("../data/test_input");

    #[rstest]
    #[case(0, 5)]
    #[case(1, 5)]
    #[case(2, 6)]
    #[case(18, 26)]
    #[case(80, 5934)]
    #[case(256, 26984457539)]
    fn example(#[case] days: usize, #[case] expected: u64) {
        let res = count_fish(TEST_INPUT, days);
        assert!(res.is_ok());
        assert_eq!(res.unwrap(), expected);
    }

    #[test]
    fn spawning_resets_to_six() {
        let mut school = School::new(&[0]).unwrap();
        school.day_passes();
        assert_eq!(school, School::new(&[6, 8]).unwrap());
    }

    #[test]
    fn timer_out_of_range() {
        assert!(School::new(&[9]).is_err());
        assert!(count_fish("3,4,10", 1).is_err());
    }
}
