use anyhow::Result;
use day3::power_consumption;
use std::io::{self, BufRead};

fn main() -> Result<()> {
    env_logger::init();

    let stdin = io::stdin();

    let rating = power_consumption(stdin.lock().lines().filter_map(|s| s.ok()))?;

    println!("{rating}");

    Ok(())
}
