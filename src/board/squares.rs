use super::square::Square;

/// An unordered set of squares as a 64-bit mask, one bit per square.
#[derive(Debug, Default, Clone, Copy, Hash, PartialEq, Eq, PartialOrd, Ord)]
pub struct Squares(u64);

impl Squares {
    pub fn empty() -> Self {
        Self(0)
    }
    pub fn size(&self) -> usize {
        self.0.count_ones() as usize
    }
    pub fn is_empty(&self) -> bool {
        self.0 == 0
    }
    pub fn contains(&self, square: &Square) -> bool {
        self.0 & Self::bit(*square) != 0
    }
    pub fn insert(&mut self, square: Square) {
        self.0 |= Self::bit(square);
    }
    pub fn remove(&mut self, square: Square) {
        self.0 &= !Self::bit(square);
    }
    fn bit(square: Square) -> u64 {
        1 << u8::from(square)
    }
}

/// drained from the lowest square upward
impl Iterator for Squares {
    type Item = Square;
    fn next(&mut self) -> Option<Self::Item> {
        if self.is_empty() {
            None
        } else {
            let square = Square::from(self.0.trailing_zeros() as u8);
            self.remove(square);
            Some(square)
        }
    }
}

impl std::iter::FromIterator<Square> for Squares {
    fn from_iter<T: IntoIterator<Item = Square>>(iter: T) -> Self {
        iter.into_iter().fold(Self::empty(), |mut set, square| {
            set.insert(square);
            set
        })
    }
}

impl From<Square> for Squares {
    fn from(square: Square) -> Self {
        Self(Self::bit(square))
    }
}

/// u64 isomorphism
impl From<u64> for Squares {
    fn from(n: u64) -> Self {
        Self(n)
    }
}
impl From<Squares> for u64 {
    fn from(s: Squares) -> Self {
        s.0
    }
}

impl std::fmt::Display for Squares {
    fn fmt(&self, f: &mut std::fmt::Formatter) -> std::fmt::Result {
        let words = (*self).map(|s| s.to_string()).collect::<Vec<_>>();
        write!(f, "{{{}}}", words.join(" "))
    }
}
