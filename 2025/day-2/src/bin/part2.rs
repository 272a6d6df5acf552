use std::path::PathBuf;

use miette::*;
use tracing_subscriber::EnvFilter;

use aoc2025_day_2::part2;

fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .init();

    let path = std::env::args_os()
        .nth(1)
        .map(PathBuf::from)
        .unwrap_or_else(|| PathBuf::from(env!("CARGO_MANIFEST_DIR")).join("input2.txt"));
    let input = std::fs::read_to_string(&path)
        .into_diagnostic()
        .wrap_err_with(|| format!("failed to read puzzle input from {}", path.display()))?;

    let result = part2::process(&input)?;
    println!("Result: {}", result);
    Ok(())
}
