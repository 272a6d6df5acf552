use std::ops::RangeInclusive;

use chumsky::prelude::*;
use itertools::Itertools;
use rayon::prelude::*;

/// An inclusive `start-end` range of product IDs.
#[derive(Clone, Copy, PartialEq, Eq, Debug)]
pub struct IdRange {
    pub start: u64,
    pub end: u64,
}

impl IdRange {
    pub fn ids(self) -> RangeInclusive<u64> {
        self.start..=self.end
    }
}

/// Parses comma separated `start-end` ranges, ignoring whitespace around each range.
pub fn parser<'a>() -> impl Parser<'a, &'a str, Vec<IdRange>, extra::Err<Rich<'a, char>>> {
    let id = text::int(10).try_map(|digits: &str, span| {
        digits
            .parse::<u64>()
            .map_err(|err| Rich::custom(span, err))
    });

    let range = id
        .clone()
        .then_ignore(just('-'))
        .then(id)
        .map(|(start, end)| IdRange { start, end })
        .padded();

    range.separated_by(just(',')).allow_trailing().collect()
}

/// The digits of `id` are one block written exactly twice, like `6464`.
pub fn is_doubled(id: u64) -> bool {
    let digits = id.to_string();
    let (head, tail) = digits.split_at(digits.len() / 2);
    digits.len() % 2 == 0 && head == tail
}

/// The digits of `id` are one block written two or more times, like `121212`.
pub fn is_repeated(id: u64) -> bool {
    let digits = id.to_string().into_bytes();
    (1..=digits.len() / 2)
        .filter(|width| digits.len() % width == 0)
        .any(|width| digits.chunks(width).all_equal())
}

/// Sums every ID in `ranges` matching `is_invalid`.
///
/// Each range is summed on its own, so overlapping ranges count shared IDs more than once.
pub fn sum_invalid(ranges: &[IdRange], is_invalid: fn(u64) -> bool) -> u64 {
    ranges
        .par_iter()
        .map(|range| {
            let sum: u64 = range.ids().filter(|&id| is_invalid(id)).sum();
            tracing::trace!(?range, sum);
            sum
        })
        .sum()
}
