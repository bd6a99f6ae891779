use anyhow::Result;
use day6::count_fish;
use util::read_input_as_string;

const DAYS: usize = 256;

fn main() -> Result<()> {
    env_logger::init();

    let input = read_input_as_string()?;

    let fish = count_fish(&input, DAYS)?;

    println!("{fish}");

    Ok(())
}
