use chumsky::prelude::*;

/// Number of marks around the dial, `0..DIAL_SIZE`.
pub const DIAL_SIZE: u32 = 100;
pub const START_POSITION: u32 = 50;

#[derive(Clone, Copy, PartialEq, Eq, Debug)]
pub enum Direction {
    /// Towards lower numbers.
    Left,
    /// Towards higher numbers.
    Right,
}

#[derive(Clone, Copy, PartialEq, Eq, Debug)]
pub struct Rotation {
    pub direction: Direction,
    pub clicks: u32,
}

/// Parses one `L<n>` / `R<n>` rotation per line.
pub fn parser<'a>() -> impl Parser<'a, &'a str, Vec<Rotation>, extra::Err<Rich<'a, char>>> {
    let direction = choice((
        just('L').to(Direction::Left),
        just('R').to(Direction::Right),
    ));

    let clicks = text::int(10).try_map(|digits: &str, span| {
        digits
            .parse::<u32>()
            .map_err(|err| Rich::custom(span, err))
    });

    direction
        .then(clicks)
        .map(|(direction, clicks)| Rotation { direction, clicks })
        .padded()
        .repeated()
        .collect()
}

/// The safe's dial. Starts at [`START_POSITION`].
#[derive(Clone, Copy, PartialEq, Eq, Debug)]
pub struct Dial {
    position: u32,
}

impl Default for Dial {
    fn default() -> Self {
        Self {
            position: START_POSITION,
        }
    }
}

impl Dial {
    pub fn position(&self) -> u32 {
        self.position
    }

    /// Turns the dial one click at a time and returns how many of those clicks
    /// left it pointing at 0.
    pub fn rotate(&mut self, rotation: Rotation) -> u64 {
        // Stepping left is stepping right by DIAL_SIZE - 1 modulo DIAL_SIZE
        let step = match rotation.direction {
            Direction::Left => DIAL_SIZE - 1,
            Direction::Right => 1,
        };

        let mut zeros = 0;
        for _ in 0..rotation.clicks {
            self.position = (self.position + step) % DIAL_SIZE;
            if self.position == 0 {
                zeros += 1;
            }
        }
        zeros
    }
}
