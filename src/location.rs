use std::fmt::{Display, Formatter};
use std::num::NonZero;
use std::str::FromStr;

use crate::error::InvalidInput;

pub(crate) type Coord = usize;
pub(crate) type Dimension = NonZero<Coord>;

#[derive(Clone, Eq, Hash, Copy, PartialEq, Ord, PartialOrd, Debug)]
/// A square `(column, row)` on a board. `Location(0, 0)` is the bottom left corner, `a1` in algebraic notation.
pub struct Location(pub Coord, pub Coord);

impl Location {
    pub(crate) fn as_index(&self) -> (Coord, Coord) {
        (self.1, self.0)
    }

    /// Shift this location by a signed `(column, row)` offset.
    ///
    /// Stepping off the low edge wraps around to a huge coordinate, which no board contains.
    pub fn offset_by(self, rhs: (isize, isize)) -> Self {
        Self(self.0.wrapping_add_signed(rhs.0), self.1.wrapping_add_signed(rhs.1))
    }

    pub(crate) fn within(&self, dims: (Dimension, Dimension)) -> bool {
        self.0 < dims.0.get() && self.1 < dims.1.get()
    }
}

/// Algebraic notation: column letter from `a`, then the row counted from 1.
impl Display for Location {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match u8::try_from(self.0).ok().and_then(|col| b'a'.checked_add(col)) {
            Some(letter) if letter.is_ascii_lowercase() => write!(f, "{}{}", letter as char, self.1 + 1),
            _ => write!(f, "({}, {})", self.0, self.1),
        }
    }
}

impl FromStr for Location {
    type Err = InvalidInput;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let malformed = || InvalidInput::MalformedSquare(s.to_owned());

        let trimmed = s.trim();
        let mut chars = trimmed.chars();
        let column = match chars.next() {
            Some(letter) if letter.is_ascii_lowercase() => letter as Coord - 'a' as Coord,
            _ => return Err(malformed()),
        };
        let row: Coord = chars.as_str().parse().map_err(|_| malformed())?;
        if row == 0 {
            return Err(malformed());
        }

        Ok(Self(column, row - 1))
    }
}

#[cfg(test)]
mod tests {
    use rstest::rstest;

    use super::*;

    #[rstest]
    #[case("a1", Location(0, 0))]
    #[case("f6", Location(5, 5))]
    #[case("c2", Location(2, 1))]
    #[case("b12", Location(1, 11))]
    fn algebraic_round_trip(#[case] text: &str, #[case] location: Location) {
        assert_eq!(text.parse::<Location>().unwrap(), location);
        assert_eq!(location.to_string(), text);
    }

    #[rstest]
    #[case("")]
    #[case("a0")]
    #[case("A1")]
    #[case("1a")]
    #[case("a")]
    #[case("a-1")]
    fn malformed_squares(#[case] text: &str) {
        assert_eq!(text.parse::<Location>(), Err(InvalidInput::MalformedSquare(text.to_owned())));
    }

    #[test]
    fn offset_below_zero_leaves_every_board() {
        let dims = (NonZero::new(6).unwrap(), NonZero::new(6).unwrap());
        assert!(!Location(0, 0).offset_by((-1, 2)).within(dims));
        assert!(Location(0, 0).offset_by((1, 2)).within(dims));
    }
}
