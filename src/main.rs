use anyhow::Result;
use pagestitch::{Config, assemble};

fn main() -> Result<()> {
    let config = Config::from_cli()?;
    assemble(&config)?;
    Ok(())
}
