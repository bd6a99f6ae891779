use anyhow::Result;
use day2::{final_location, Steering};
use std::io::{self, BufRead};

fn main() -> Result<()> {
    env_logger::init();

    let stdin = io::stdin();

    let location = final_location(stdin.lock().lines().filter_map(|s| s.ok()), Steering::Aim)?;

    println!("{location}");

    Ok(())
}
