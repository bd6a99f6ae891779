use anyhow::{anyhow, Result};
use itertools::Itertools;

fn get_depths(input: impl Iterator<Item = impl Into<String>>) -> Result<Vec<u32>> {
    input
        .map(|line| {
            let line: String = line.into();
            line.trim()
                .parse::<u32>()
                .map_err(|e| anyhow!("bad depth {line:?}: {e}"))
        })
        .collect()
}

/// Number of sliding-window sums that are larger than the sum before them.
pub fn count_increases(
    input: impl Iterator<Item = impl Into<String>>,
    window: usize,
) -> Result<usize> {
    if window == 0 {
        return Err(anyhow!("window must hold at least one measurement"));
    }

    let depths = get_depths(input)?;
    log::debug!("{} depths, window {window}", depths.len());

    let increases = depths
        .windows(window)
        .map(|w| w.iter().sum::<u32>())
        .tuple_windows()
        .filter(|(prev, next)| next > prev)
        .count();

    Ok(increases)
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    const TEST_INPUT: &str = include_str!("../data/test_input");

    #[rstest]
    #[case(1, 7)]
    #[case(3, 5)]
    fn example(#[case] window: usize, #[case] expected: usize) {
        let res = count_increases(TEST_INPUT.lines(), window);
        assert!(res.is_ok());
        assert_eq!(res.unwrap(), expected);
    }

    #[test]
    fn window_longer_than_input() {
        let res = count_increases(["1", "2"].into_iter(), 3);
        assert_eq!(res.unwrap(), 0);
    }

    #[test]
    fn zero_window() {
        assert!(count_increases(TEST_INPUT.lines(), 0).is_err());
    }

    #[test]
    fn bad_depth() {
        assert!(count_increases(["199", "two hundred"].into_iter(), 1).is_err());
    }
}
