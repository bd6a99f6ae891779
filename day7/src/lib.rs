use anyhow::{anyhow, Result};
use itertools::Itertools;
use util::{parse_nice, parse_number_list};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FuelModel {
    /// one unit per step
    Constant,
    /// each step costs one more than the last
    Increasing,
}

impl FuelModel {
    pub fn cost(&self, distance: u64) -> u64 {
        match self {
            FuelModel::Constant => distance,
            FuelModel::Increasing => distance * (distance + 1) / 2,
        }
    }

    pub fn total_cost(&self, positions: &[u64], target: u64) -> u64 {
        positions
            .iter()
            .map(|&p| self.cost(p.abs_diff(target)))
            .sum()
    }
}

fn median(positions: &[u64]) -> Option<u64> {
    let mut sorted = positions.to_vec();
    sorted.sort_unstable();
    sorted.get(sorted.len() / 2).copied()
}

/// Least fuel needed to line every crab up on one position.
pub fn cheapest_alignment(input: &str, model: FuelModel) -> Result<u64> {
    let line = input
        .lines()
        .find(|l| !l.trim().is_empty())
        .ok_or(anyhow!("no crabs"))?;
    let positions: Vec<u64> = parse_nice(line.trim(), parse_number_list)?;

    let (target, cost) = match model {
        FuelModel::Constant => {
            let target = median(&positions).ok_or(anyhow!("no crabs"))?;
            (target, model.total_cost(&positions, target))
        }
        FuelModel::Increasing => {
            let (lo, hi) = positions
                .iter()
                .copied()
                .minmax()
                .into_option()
                .ok_or(anyhow!("no crabs"))?;
            (lo..=hi)
                .map(|target| (target, model.total_cost(&positions, target)))
                .min_by_key(|&(_, cost)| cost)
                .ok_or(anyhow!("no crabs"))?
        }
    };
    log::debug!("{model:?}: align on {target} for {cost}");

    Ok(cost)
}
