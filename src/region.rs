use std::fmt::{Display, Formatter};
use std::ops::Index;

use itertools::Itertools;
use strum::{EnumCount, VariantArray};

use crate::error::InvalidInput;

/// The labels partitioning a board's squares.
#[derive(Copy, Clone, Debug, Default, Eq, PartialEq, Hash, Ord, PartialOrd, VariantArray, EnumCount, strum::Display)]
pub enum Region {
    /// The region every square starts out in.
    #[default]
    A,
    /// Second region, whose value is listed second.
    B,
    /// Third region.
    C,
}

impl Region {
    /// The region written as `display` in a board layout, if any.
    pub fn from_display(display: char) -> Option<Self> {
        Self::VARIANTS.iter().copied().find(|region| region.display() == display)
    }

    pub(crate) fn display(&self) -> char {
        match self {
            Self::A => 'A',
            Self::B => 'B',
            Self::C => 'C',
        }
    }
}

/// One integer per [`Region`]: pairwise distinct and positive.
#[derive(Copy, Clone, Debug, Eq, PartialEq, Hash)]
pub struct RegionValues([u32; Region::COUNT]);

impl RegionValues {
    /// Assign `values` to the regions in [`Region::VARIANTS`] order.
    pub fn new(values: [u32; Region::COUNT]) -> Result<Self, InvalidInput> {
        if let Some(zero) = values.iter().find(|v| **v == 0) {
            return Err(InvalidInput::NonPositiveValue(*zero));
        }
        if let Some(dup) = values.iter().duplicates().next() {
            return Err(InvalidInput::DuplicateValue(*dup));
        }

        Ok(Self(values))
    }

    /// Same as [`Self::new`], for a slice of any length.
    pub fn from_slice(values: &[u32]) -> Result<Self, InvalidInput> {
        let values: [u32; Region::COUNT] = values.try_into().map_err(|_| InvalidInput::WrongValueCount {
            expected: Region::COUNT,
            found: values.len(),
        })?;
        Self::new(values)
    }

    // the candidate generator only hands out distinct positive triples
    pub(crate) fn trusted(values: [u32; Region::COUNT]) -> Self {
        debug_assert!(Self::new(values).is_ok());
        Self(values)
    }

    /// The values in region order.
    pub fn as_array(&self) -> [u32; Region::COUNT] {
        self.0
    }

    /// Sum of the three values, which the candidate bound limits.
    pub fn sum(&self) -> u32 {
        self.0.iter().sum()
    }
}

impl Index<Region> for RegionValues {
    type Output = u32;

    fn index(&self, region: Region) -> &Self::Output {
        &self.0[region as usize]
    }
}

impl Display for RegionValues {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0.iter().join(","))
    }
}

#[cfg(test)]
mod tests {
    use rstest::rstest;

    use super::*;

    #[test]
    fn indexed_by_region() {
        let values = RegionValues::new([1, 3, 2]).unwrap();
        assert_eq!(values[Region::A], 1);
        assert_eq!(values[Region::B], 3);
        assert_eq!(values[Region::C], 2);
        assert_eq!(values.sum(), 6);
        assert_eq!(values.to_string(), "1,3,2");
    }

    #[rstest]
    #[case(& [0, 1, 2], InvalidInput::NonPositiveValue(0))]
    #[case(& [4, 1, 4], InvalidInput::DuplicateValue(4))]
    #[case(& [7, 7, 7], InvalidInput::DuplicateValue(7))]
    #[case(& [1, 2], InvalidInput::WrongValueCount { expected: 3, found: 2 })]
    #[case(& [1, 2, 3, 4], InvalidInput::WrongValueCount { expected: 3, found: 4 })]
    fn rejected_assignments(#[case] values: &[u32], #[case] expected: InvalidInput) {
        assert_eq!(RegionValues::from_slice(values), Err(expected));
    }

    #[test]
    fn layout_characters() {
        assert_eq!(Region::from_display('B'), Some(Region::B));
        assert_eq!(Region::from_display('b'), None);
        assert_eq!(Region::C.to_string(), "C");
    }
}
