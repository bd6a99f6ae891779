use anyhow::{anyhow, Context, Result};
use thiserror::Error;

#[derive(Error, Debug)]
pub enum DiagnosticError {
    #[error("No diagnostic words")]
    Empty,

    #[error("Word {0:?} is not {1} bits wide")]
    WrongWidth(String, usize),

    #[error("Word {0:?} contains something other than 0 and 1")]
    NotBinary(String),
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Criteria {
    MostCommon,
    LeastCommon,
}

impl Criteria {
    /// Bit to keep given the number of ones out of `total` words. Ties pick 1
    /// for most common and 0 for least common.
    fn bit(&self, ones: usize, total: usize) -> bool {
        let most_common = 2 * ones >= total;
        match self {
            Criteria::MostCommon => most_common,
            Criteria::LeastCommon => !most_common,
        }
    }
}

#[derive(Debug, Clone)]
pub struct Diagnostic {
    words: Vec<Vec<bool>>,
    width: usize,
}

impl Diagnostic {
    pub fn new(input: impl Iterator<Item = impl Into<String>>) -> Result<Self, DiagnosticError> {
        let mut words = Vec::new();
        let mut width = None;

        for line in input {
            let line: String = line.into();
            let line = line.trim();
            if line.is_empty() {
                continue;
            }

            let word = line
                .chars()
                .map(|c| match c {
                    '0' => Ok(false),
                    '1' => Ok(true),
                    _ => Err(DiagnosticError::NotBinary(line.to_string())),
                })
                .collect::<Result<Vec<_>, _>>()?;

            let width = *width.get_or_insert(word.len());
            if word.len() != width {
                return Err(DiagnosticError::WrongWidth(line.to_string(), width));
            }
            words.push(word);
        }

        let width = width.ok_or(DiagnosticError::Empty)?;

        Ok(Self { words, width })
    }

    fn ones_per_column<'a>(words: impl Iterator<Item = &'a Vec<bool>>, width: usize) -> Vec<usize> {
        words.fold(vec![0; width], |mut counts, word| {
            for (count, &bit) in counts.iter_mut().zip(word) {
                *count += bit as usize;
            }
            counts
        })
    }

    fn rate(&self, criteria: Criteria) -> u64 {
        let total = self.words.len();

        to_number(
            Self::ones_per_column(self.words.iter(), self.width)
                .into_iter()
                .map(|ones| criteria.bit(ones, total)),
        )
    }

    pub fn gamma_rate(&self) -> u64 {
        self.rate(Criteria::MostCommon)
    }

    pub fn epsilon_rate(&self) -> u64 {
        self.rate(Criteria::LeastCommon)
    }

    fn rating(&self, criteria: Criteria) -> Result<u64> {
        let mut candidates = self.words.iter().collect::<Vec<_>>();

        for i in 0..self.width {
            if candidates.len() == 1 {
                break;
            }

            let ones = candidates.iter().filter(|word| word[i]).count();
            let keep = criteria.bit(ones, candidates.len());
            candidates.retain(|word| word[i] == keep);
        }

        match candidates.as_slice() {
            [word] => Ok(to_number(word.iter().copied())),
            _ => Err(anyhow!(
                "{criteria:?} filter left {} words",
                candidates.len()
            )),
        }
    }

    pub fn oxygen_generator_rating(&self) -> Result<u64> {
        self.rating(Criteria::MostCommon)
    }

    pub fn co2_scrubber_rating(&self) -> Result<u64> {
        self.rating(Criteria::LeastCommon)
    }
}

fn to_number(bits: impl Iterator<Item = bool>) -> u64 {
    bits.fold(0, |n, bit| (n << 1) | bit as u64)
}

pub fn power_consumption(input: impl Iterator<Item = impl Into<String>>) -> Result<u64> {
    let diagnostic = Diagnostic::new(input)?;
    let (gamma, epsilon) = (diagnostic.gamma_rate(), diagnostic.epsilon_rate());
    log::debug!("gamma {gamma}, epsilon {epsilon}");

    Ok(gamma * epsilon)
}

pub fn life_support_rating(input: impl Iterator<Item = impl Into<String>>) -> Result<u64> {
    let diagnostic = Diagnostic::new(input)?;
    let oxygen = diagnostic
        .oxygen_generator_rating()
        .context("oxygen generator rating")?;
    let co2 = diagnostic
        .co2_scrubber_rating()
        .context("CO2 scrubber rating")?;
    log::debug!("oxygen {oxygen}, co2 {co2}");

    Ok(oxygen * co2)
}

#[cfg(test)]
mod tests {
    use super::*;

    const TEST_INPUT: &str = include_str!("../data/test_input");

    #[test]
    fn rates() {
        let diagnostic = Diagnostic::new(TEST_INPUT.lines()).unwrap();
        assert_eq!(diagnostic.gamma_rate(), 22);
        assert_eq!(diagnostic.epsilon_rate(), 9);
    }

    #[test]
    fn ratings() {
        let diagnostic = Diagnostic::new(TEST_INPUT.lines()).unwrap();
        assert_eq!(diagnostic.oxygen_generator_rating().unwrap(), 23);
        assert_eq!(diagnostic.co2_scrubber_rating().unwrap(), 10);
    }

    #[test]
    fn part1() {
        let res = power_consumption(TEST_INPUT.lines());
        assert!(res.is_ok());
        assert_eq!(res.unwrap(), 198);
    }

    #[test]
    fn part2() {
        let res = life_support_rating(TEST_INPUT.lines());
        assert!(res.is_ok());
        assert_eq!(res.unwrap(), 230);
    }

    #[test]
    fn tie_goes_to_one_for_gamma() {
        let diagnostic = Diagnostic::new(["10", "01"].into_iter()).unwrap();
        assert_eq!(diagnostic.gamma_rate(), 0b11);
        assert_eq!(diagnostic.epsilon_rate(), 0b00);
    }

    #[test]
    fn bad_words() {
        assert!(matches!(
            Diagnostic::new(["101", "11"].into_iter()),
            Err(DiagnosticError::WrongWidth(..))
        ));
        assert!(matches!(
            Diagnostic::new(["102"].into_iter()),
            Err(DiagnosticError::NotBinary(..))
        ));
        assert!(matches!(
            Diagnostic::new(std::iter::empty::<&str>()),
            Err(DiagnosticError::Empty)
        ));
    }
}
