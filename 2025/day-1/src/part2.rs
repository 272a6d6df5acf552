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
    let zero_clicks: u64 = rotations
        .into_iter()
        .map(|rotation| dial.rotate(rotation))
        .sum();

    tracing::debug!(final_position = dial.position(), zero_clicks);

    Ok(zero_clicks.to_string())
}
