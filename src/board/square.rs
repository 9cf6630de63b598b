use super::direction::Direction;
use super::squares::Squares;
use crate::WIDTH;

/// A square on the 8x8 board, indexed `rank * 8 + file`.
///
/// File `a` is 0 and rank `1` (gold's home row) is 0, so `a1` is 0
/// and `h8` is 63. Text form is the usual `<file-letter><rank-digit>`.
#[derive(Debug, Clone, Copy, Hash, PartialEq, Eq, PartialOrd, Ord)]
#[cfg_attr(feature = "client", derive(serde::Serialize, serde::Deserialize))]
pub struct Square(u8);

impl Square {
    pub fn all() -> impl Iterator<Item = Self> {
        (0..crate::AREA as u8).map(Self)
    }
    pub fn file(&self) -> usize {
        self.0 as usize % WIDTH
    }
    pub fn rank(&self) -> usize {
        self.0 as usize / WIDTH
    }
    pub fn is_trap(&self) -> bool {
        crate::TRAPS.contains(&(self.file(), self.rank()))
    }
    pub fn traps() -> impl Iterator<Item = Self> {
        crate::TRAPS.into_iter().map(Self::from)
    }
    /// The square one step away, if it is on the board.
    pub fn shift(&self, direction: Direction) -> Option<Self> {
        let (df, dr) = direction.offset();
        let file = self.file().checked_add_signed(df).filter(|f| *f < WIDTH)?;
        let rank = self.rank().checked_add_signed(dr).filter(|r| *r < WIDTH)?;
        Some(Self::from((file, rank)))
    }
    pub fn neighbors(&self) -> Squares {
        Direction::ALL
            .into_iter()
            .filter_map(|d| self.shift(d))
            .collect()
    }
    pub fn is_adjacent(&self, other: &Self) -> bool {
        self.distance(other) == 1
    }
    /// Direction of an adjacent square.
    pub fn toward(&self, other: &Self) -> Option<Direction> {
        Direction::ALL
            .into_iter()
            .find(|d| self.shift(*d) == Some(*other))
    }
    /// Manhattan distance.
    pub fn distance(&self, other: &Self) -> usize {
        self.file().abs_diff(other.file()) + self.rank().abs_diff(other.rank())
    }
}

/// (file, rank) isomorphism
impl From<(usize, usize)> for Square {
    fn from((file, rank): (usize, usize)) -> Self {
        assert!(file < WIDTH && rank < WIDTH, "off board {} {}", file, rank);
        Self((rank * WIDTH + file) as u8)
    }
}

/// u8 isomorphism
impl From<Square> for u8 {
    fn from(s: Square) -> u8 {
        s.0
    }
}
impl From<u8> for Square {
    fn from(n: u8) -> Self {
        assert!((n as usize) < crate::AREA, "off board {}", n);
        Self(n)
    }
}

/// str isomorphism
impl TryFrom<&str> for Square {
    type Error = String;
    fn try_from(s: &str) -> Result<Self, Self::Error> {
        let mut chars = s.chars();
        match (chars.next(), chars.next(), chars.next()) {
            (Some(f @ 'a'..='h'), Some(r @ '1'..='8'), None) => Ok(Self::from((
                (f as u8 - b'a') as usize,
                (r as u8 - b'1') as usize,
            ))),
            _ => Err(format!("invalid square {}", s)),
        }
    }
}

impl std::fmt::Display for Square {
    fn fmt(&self, f: &mut std::fmt::Formatter) -> std::fmt::Result {
        write!(
            f,
            "{}{}",
            (b'a' + self.file() as u8) as char,
            (b'1' + self.rank() as u8) as char
        )
    }
}
