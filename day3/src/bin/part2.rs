use anyhow::Result;
use day3::life_support_rating;
use std::io::{self, BufRead};

fn main() -> Result<()> {
    env_logger::init();

    let stdin = io::stdin();

    let rating = life_support_rating(stdin.lock().lines().filter_map(|s| s.ok()))?;

    println!("{rating}");

    Ok(())
}
