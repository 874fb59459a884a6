use derive_more::Display;

/// The movement kind of a Xiangqi [`Piece`][`crate::chess::Piece`].
#[derive(Debug, Display, Copy, Clone, Eq, PartialEq, Ord, PartialOrd, Hash)]
#[cfg_attr(test, derive(test_strategy::Arbitrary))]
#[repr(u8)]
pub enum Role {
    #[display(fmt = "general")]
    General,
    #[display(fmt = "advisor")]
    Advisor,
    #[display(fmt = "elephant")]
    Elephant,
    #[display(fmt = "horse")]
    Horse,
    #[display(fmt = "chariot")]
    Chariot,
    #[display(fmt = "cannon")]
    Cannon,
    #[display(fmt = "soldier")]
    Soldier,
}

impl Role {
    /// Returns an iterator over [`Role`]s.
    #[inline(always)]
    pub fn iter() -> impl DoubleEndedIterator<Item = Self> + ExactSizeIterator {
        use Role::*;
        [General, Advisor, Elephant, Horse, Chariot, Cannon, Soldier].into_iter()
    }

    /// The single letter used to draw this role on a text board.
    #[inline(always)]
    pub fn symbol(&self) -> char {
        match self {
            Role::General => 'G',
            Role::Advisor => 'A',
            Role::Elephant => 'E',
            Role::Horse => 'H',
            Role::Chariot => 'C',
            Role::Cannon => 'O',
            Role::Soldier => 'S',
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashSet;
    use std::mem::size_of;
    use test_strategy::proptest;

    #[test]
    fn role_guarantees_zero_value_optimization() {
        assert_eq!(size_of::<Option<Role>>(), size_of::<Role>());
    }

    #[test]
    fn iter_returns_every_role_once() {
        assert_eq!(Role::iter().len(), 7);
        assert_eq!(HashSet::<Role>::from_iter(Role::iter()).len(), 7);
    }

    #[proptest]
    fn every_role_has_a_unique_symbol(r: Role, #[filter(#r != #s)] s: Role) {
        assert_ne!(r.symbol(), s.symbol());
    }

    #[proptest]
    fn symbol_is_an_upper_case_letter(r: Role) {
        assert!(r.symbol().is_ascii_uppercase());
    }
}
