use chumsky::prelude::*;
use miette::*;

use crate::dial::{parser, Dial};

#[tracing::instrument]
pub fn process(input: &str) -> Result<String> {
    let rotations = parser()
        .parse(input)
        .into_result()
        .map_err(|e| miette!("Parse failed: {:?}", e))?;

    let mut dial = Dial::default();
    let resting_on_zero = rotations
        .into_iter()
        .filter(|&rotation| {
            dial.rotate(rotation);
            dial.position() == 0
        })
        .count();

    Ok(resting_on_zero.to_string())
}
