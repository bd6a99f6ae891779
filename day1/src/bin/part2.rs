use anyhow::Result;
use day1::count_increases;
use std::io::{self, BufRead};

fn main() -> Result<()> {
    env_logger::init();

    let stdin = io::stdin();

    let total = count_increases(stdin.lock().lines().filter_map(|s| s.ok()), 3)?;

    println!("{total}");

    Ok(())
}
