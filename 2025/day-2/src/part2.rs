use chumsky::prelude::*;
use miette::*;

use crate::ids::{is_repeated, parser, sum_invalid};

#[tracing::instrument]
pub fn process(input: &str) -> Result<String> {
    let ranges = parser()
        .parse(input)
        .into_result()
        .map_err(|e| miette!("Parse failed: {:?}", e))?;

    Ok(sum_invalid(&ranges, is_repeated).to_string())
}
