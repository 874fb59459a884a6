use derive_more::{Display, Error};
use std::{ops::Sub, str::FromStr};

/// A column on the Xiangqi board.
#[derive(Debug, Display, Copy, Clone, Eq, PartialEq, Ord, PartialOrd, Hash)]
#[cfg_attr(test, derive(test_strategy::Arbitrary))]
#[repr(u8)]
pub enum File {
    #[display(fmt = "a")]
    A,
    #[display(fmt = "b")]
    B,
    #[display(fmt = "c")]
    C,
    #[display(fmt = "d")]
    D,
    #[display(fmt = "e")]
    E,
    #[display(fmt = "f")]
    F,
    #[display(fmt = "g")]
    G,
    #[display(fmt = "h")]
    H,
    #[display(fmt = "i")]
    I,
}

impl File {
    pub(crate) const ALL: [File; 9] = [
        File::A,
        File::B,
        File::C,
        File::D,
        File::E,
        File::F,
        File::G,
        File::H,
        File::I,
    ];

    /// Constructs [`File`] from its index in the range (0..=8), if in range.
    #[inline(always)]
    pub fn from_index(i: u8) -> Option<Self> {
        Self::ALL.get(i as usize).copied()
    }

    /// This file's index in the range (0..=8).
    #[inline(always)]
    pub fn index(&self) -> u8 {
        *self as u8
    }

    /// Returns an iterator over [`File`]s ordered by [index][`File::index`].
    #[inline(always)]
    pub fn iter() -> impl DoubleEndedIterator<Item = Self> + ExactSizeIterator {
        Self::ALL.into_iter()
    }
}

impl Sub for File {
    type Output = i8;

    #[inline(always)]
    fn sub(self, rhs: Self) -> Self::Output {
        self.index() as i8 - rhs.index() as i8
    }
}

/// The reason why parsing [`File`] failed.
#[derive(Debug, Display, Copy, Clone, Eq, PartialEq, Hash, Error)]
pub enum ParseFileError {
    #[display(fmt = "failed to parse file, expected a single letter")]
    NotALetter,
    #[display(fmt = "failed to parse file, expected letter in the range `(a..=i)`")]
    OutOfRange,
}

impl FromStr for File {
    type Err = ParseFileError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let mut chars = s.chars();
        match (chars.next(), chars.next()) {
            (Some(c), None) if c.is_alphabetic() => match c.to_ascii_lowercase() {
                c @ 'a'..='i' => File::from_index(c as u8 - b'a').ok_or(ParseFileError::OutOfRange),
                _ => Err(ParseFileError::OutOfRange),
            },

            _ => Err(ParseFileError::NotALetter),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::mem::size_of;
    use test_strategy::proptest;

    #[test]
    fn file_guarantees_zero_value_optimization() {
        assert_eq!(size_of::<Option<File>>(), size_of::<File>());
    }

    #[test]
    fn iter_returns_iterator_over_files_in_order() {
        assert_eq!(
            Vec::from_iter(File::iter()),
            Vec::from_iter((0..9).filter_map(File::from_index))
        );
    }

    #[test]
    fn iter_returns_iterator_of_exact_size() {
        assert_eq!(File::iter().len(), 9);
    }

    #[proptest]
    fn from_index_constructs_file_by_index(#[strategy(0u8..9)] i: u8) {
        assert_eq!(File::from_index(i).map(|f| f.index()), Some(i));
    }

    #[proptest]
    fn from_index_fails_if_index_out_of_range(#[strategy(9u8..)] i: u8) {
        assert_eq!(File::from_index(i), None);
    }

    #[proptest]
    fn subtracting_files_returns_distance(a: File, b: File) {
        assert_eq!(a - b, a.index() as i8 - b.index() as i8);
    }

    #[proptest]
    fn file_is_ordered_by_index(a: File, b: File) {
        assert_eq!(a < b, a.index() < b.index());
    }

    #[proptest]
    fn parsing_printed_file_is_an_identity(f: File) {
        assert_eq!(f.to_string().parse(), Ok(f));
    }

    #[proptest]
    fn parsing_file_is_case_insensitive(f: File) {
        assert_eq!(f.to_string().to_uppercase().parse(), Ok(f));
    }

    #[proptest]
    fn parsing_file_fails_if_letter_out_of_range(#[strategy("[j-zJ-Z]")] s: String) {
        assert_eq!(s.parse::<File>(), Err(ParseFileError::OutOfRange));
    }

    #[proptest]
    fn parsing_file_fails_if_not_a_letter(#[filter(!#c.is_alphabetic())] c: char) {
        assert_eq!(c.to_string().parse::<File>(), Err(ParseFileError::NotALetter));
    }

    #[proptest]
    fn parsing_file_fails_if_length_not_one(#[filter(#s.chars().count() != 1)] s: String) {
        assert_eq!(s.parse::<File>(), Err(ParseFileError::NotALetter));
    }
}
