/// Orthogonal step directions, in the order packed records number them.
#[derive(Debug, Clone, Copy, Hash, PartialEq, Eq, PartialOrd, Ord)]
#[cfg_attr(feature = "client", derive(serde::Serialize, serde::Deserialize))]
pub enum Direction {
    South = 0,
    West = 1,
    East = 2,
    North = 3,
}

impl Direction {
    pub const ALL: [Self; 4] = [
        Direction::South,
        Direction::West,
        Direction::East,
        Direction::North,
    ];

    /// (file, rank) offset of one step.
    pub fn offset(&self) -> (isize, isize) {
        match self {
            Direction::South => (0, -1),
            Direction::West => (-1, 0),
            Direction::East => (1, 0),
            Direction::North => (0, 1),
        }
    }
    pub fn reverse(&self) -> Self {
        match self {
            Direction::South => Direction::North,
            Direction::West => Direction::East,
            Direction::East => Direction::West,
            Direction::North => Direction::South,
        }
    }
    pub fn letter(&self) -> char {
        match self {
            Direction::South => 's',
            Direction::West => 'w',
            Direction::East => 'e',
            Direction::North => 'n',
        }
    }
}

impl From<u8> for Direction {
    fn from(n: u8) -> Self {
        match n {
            0 => Direction::South,
            1 => Direction::West,
            2 => Direction::East,
            3 => Direction::North,
            _ => panic!("invalid direction {}", n),
        }
    }
}
impl From<Direction> for u8 {
    fn from(d: Direction) -> u8 {
        d as u8
    }
}

impl TryFrom<char> for Direction {
    type Error = String;
    fn try_from(c: char) -> Result<Self, Self::Error> {
        Direction::ALL
            .into_iter()
            .find(|d| d.letter() == c)
            .ok_or_else(|| format!("invalid direction {}", c))
    }
}

impl std::fmt::Display for Direction {
    fn fmt(&self, f: &mut std::fmt::Formatter) -> std::fmt::Result {
        write!(f, "{}", self.letter())
    }
}
