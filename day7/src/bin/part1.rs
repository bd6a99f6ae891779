use anyhow::Result;
use day7::{cheapest_alignment, FuelModel};
use util::read_input_as_string;

fn main() -> Result<()> {
    env_logger::init();

    let input = read_input_as_string()?;

    let fuel = cheapest_alignment(&input, FuelModel::Constant)?;

    println!("{fuel}");

    Ok(())
}
