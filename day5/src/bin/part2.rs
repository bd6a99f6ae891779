use anyhow::Result;
use day5::count_overlaps;
use std::io::{self, BufRead};

const GRID_SIZE: usize = 1000;

fn main() -> Result<()> {
    env_logger::init();

    let stdin = io::stdin();

    let overlaps = count_overlaps(
        stdin.lock().lines().filter_map(|s| s.ok()),
        GRID_SIZE,
        true,
    )?;

    println!("{overlaps}");

    Ok(())
}
