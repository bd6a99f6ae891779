use anyhow::Result;
use day4::first_winning_score;
use std::io::{self, BufRead};

fn main() -> Result<()> {
    env_logger::init();

    let stdin = io::stdin();

    let score = first_winning_score(stdin.lock().lines().filter_map(|s| s.ok()))?;

    println!("{score}");

    Ok(())
}
