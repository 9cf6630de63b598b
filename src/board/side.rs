use crate::notation::Style;

/// One of the two players. Gold sets up and moves first,
/// from the south edge of the board.
#[derive(Debug, Default, Clone, Copy, Hash, PartialEq, Eq, PartialOrd, Ord)]
#[cfg_attr(feature = "client", derive(serde::Serialize, serde::Deserialize))]
pub enum Side {
    #[default]
    Gold = 0,
    Silver = 1,
}

impl Side {
    pub const ALL: [Self; 2] = [Side::Gold, Side::Silver];

    pub fn opponent(&self) -> Self {
        match self {
            Side::Gold => Side::Silver,
            Side::Silver => Side::Gold,
        }
    }
    /// Rank this side's rabbits must not step toward, and the
    /// nearer of the two ranks it sets up on.
    pub fn home(&self) -> usize {
        match self {
            Side::Gold => 0,
            Side::Silver => crate::WIDTH - 1,
        }
    }
    /// Rank this side's rabbits must reach.
    pub fn goal(&self) -> usize {
        self.opponent().home()
    }
    /// Both setup ranks.
    pub fn camp(&self) -> [usize; 2] {
        match self {
            Side::Gold => [0, 1],
            Side::Silver => [crate::WIDTH - 2, crate::WIDTH - 1],
        }
    }
    /// Side letter used in ply labels.
    pub fn letter(&self, style: Style) -> char {
        match (self, style) {
            (Side::Gold, Style::Modern) => 'g',
            (Side::Silver, Style::Modern) => 's',
            (Side::Gold, Style::Legacy) => 'w',
            (Side::Silver, Style::Legacy) => 'b',
        }
    }
}

impl From<u8> for Side {
    fn from(n: u8) -> Self {
        match n {
            0 => Side::Gold,
            1 => Side::Silver,
            _ => panic!("invalid side {}", n),
        }
    }
}
impl From<Side> for u8 {
    fn from(s: Side) -> u8 {
        s as u8
    }
}

/// accepts both modern (g/s) and legacy (w/b) letters
impl TryFrom<char> for Side {
    type Error = String;
    fn try_from(c: char) -> Result<Self, Self::Error> {
        match c {
            'g' | 'w' => Ok(Side::Gold),
            's' | 'b' => Ok(Side::Silver),
            _ => Err(format!("invalid side letter {}", c)),
        }
    }
}

impl std::fmt::Display for Side {
    fn fmt(&self, f: &mut std::fmt::Formatter) -> std::fmt::Result {
        match self {
            Side::Gold => write!(f, "gold"),
            Side::Silver => write!(f, "silver"),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn goals_face_homes() {
        for side in Side::ALL {
            assert_eq!(side.goal(), side.opponent().home());
            assert!(side.camp().contains(&side.home()));
        }
    }

    #[test]
    fn letters_parse_in_either_style() {
        for side in Side::ALL {
            for style in [Style::Modern, Style::Legacy] {
                assert_eq!(Side::try_from(side.letter(style)), Ok(side));
            }
        }
    }
}
