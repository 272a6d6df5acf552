use miette::*;

use crate::grid::Grid;

#[tracing::instrument]
pub fn process(input: &str) -> Result<String> {
    let grid: Grid = input.parse()?;
    tracing::trace!("accessible rolls:\n{}", grid.mark_removable());

    // Part 1 is the size of the first removal round
    let accessible = grid.find_removable().len();

    Ok(accessible.to_string())
}

#[cfg(test)]
mod tests {
    use super::*;

    use rstest::rstest;

    #[test]
    fn it_works() -> Result<()> {
        let input = "..@@.@@@@.
@@@.@.@.@@
@@@@@.@.@@
@.@@@@..@.
@@.@@@@.@@
.@@@@@@@.@
.@.@.@.@@@
@.@@@.@@@@
.@@@@@@@@.
@.@.@@@.@.";
        assert_eq!("13", process(input)?);
        Ok(())
    }

    #[rstest]
    #[case("@", "1")]
    #[case("@@@\n@@@\n@@@", "4")]
    #[case("...\n...", "0")]
    fn small_grids(#[case] input: &str, #[case] expected: &str) -> Result<()> {
        assert_eq!(expected, process(input)?);
        Ok(())
    }

    #[test]
    fn reports_ragged_rows() {
        assert!(process("@@@\n@@").is_err());
    }
}
