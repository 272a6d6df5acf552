use miette::*;

use crate::grid::Grid;

#[tracing::instrument]
pub fn process(input: &str) -> Result<String> {
    let grid: Grid = input.parse()?;
    let reduction = grid.run_to_fixpoint();

    Ok(reduction.total_removed.to_string())
}
