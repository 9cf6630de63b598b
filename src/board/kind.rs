/// The six piece ranks, ordered weakest to strongest.
#[derive(Debug, Default, Clone, Copy, Hash, PartialEq, Eq, PartialOrd, Ord)]
#[cfg_attr(feature = "client", derive(serde::Serialize, serde::Deserialize))]
pub enum PieceType {
    #[default]
    Rabbit = 0,
    Cat = 1,
    Dog = 2,
    Horse = 3,
    Camel = 4,
    Elephant = 5,
}

impl PieceType {
    pub const MAX: Self = PieceType::Elephant;
    pub const MIN: Self = PieceType::Rabbit;
    pub const ALL: [Self; 6] = [
        PieceType::Rabbit,
        PieceType::Cat,
        PieceType::Dog,
        PieceType::Horse,
        PieceType::Camel,
        PieceType::Elephant,
    ];

    /// How many of this type each side starts with.
    pub fn allotment(&self) -> usize {
        crate::ALLOTMENT[*self as usize]
    }
    /// Uppercase letter; silver pieces print it lowercased.
    pub fn letter(&self) -> char {
        match self {
            PieceType::Rabbit => 'R',
            PieceType::Cat => 'C',
            PieceType::Dog => 'D',
            PieceType::Horse => 'H',
            PieceType::Camel => 'M',
            PieceType::Elephant => 'E',
        }
    }
}

impl From<u8> for PieceType {
    fn from(n: u8) -> Self {
        match n {
            0 => PieceType::Rabbit,
            1 => PieceType::Cat,
            2 => PieceType::Dog,
            3 => PieceType::Horse,
            4 => PieceType::Camel,
            5 => PieceType::Elephant,
            _ => panic!("invalid piece type {}", n),
        }
    }
}
impl From<PieceType> for u8 {
    fn from(k: PieceType) -> u8 {
        k as u8
    }
}

/// case-insensitive; side is carried by [`crate::Piece`]
impl TryFrom<char> for PieceType {
    type Error = String;
    fn try_from(c: char) -> Result<Self, Self::Error> {
        PieceType::ALL
            .into_iter()
            .find(|k| k.letter() == c.to_ascii_uppercase())
            .ok_or_else(|| format!("invalid piece letter {}", c))
    }
}

impl std::fmt::Display for PieceType {
    fn fmt(&self, f: &mut std::fmt::Formatter) -> std::fmt::Result {
        write!(f, "{}", self.letter())
    }
}
