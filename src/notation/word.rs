use crate::Placement;
use crate::Side;
use crate::Step;

/// What a single whitespace-delimited token says.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Word {
    /// `takeback`: return to the previous position.
    Takeback,
    /// `pass`: end the ply being written.
    Pass,
    /// `<number><side-letter>`, e.g. `12s`: the label of a ply.
    Marker(usize, Side),
    /// `<piece><square>`, e.g. `Ra1`.
    Placement(Placement),
    /// `<piece><square><direction>`, e.g. `Ra1n`.
    Step(Step),
    /// `<piece><trap>x`, e.g. `rc6x`.
    Capture(Placement),
    Unknown,
}

impl From<&str> for Word {
    fn from(token: &str) -> Self {
        if token == "takeback" {
            return Word::Takeback;
        }
        if token == "pass" {
            return Word::Pass;
        }
        if !token.is_ascii() {
            return Word::Unknown;
        }
        if let Some(marker) = Self::marker(token) {
            return marker;
        }
        match token.len() {
            3 => Placement::try_from(token)
                .map(Word::Placement)
                .unwrap_or(Word::Unknown),
            4 if token.ends_with('x') => Placement::try_from(&token[..3])
                .ok()
                .filter(|p| p.square.is_trap())
                .map(Word::Capture)
                .unwrap_or(Word::Unknown),
            4 => Step::try_from(token).map(Word::Step).unwrap_or(Word::Unknown),
            _ => Word::Unknown,
        }
    }
}

impl Word {
    fn marker(token: &str) -> Option<Self> {
        let (digits, letter) = token.split_at(token.len().checked_sub(1)?);
        if digits.is_empty() || !digits.bytes().all(|b| b.is_ascii_digit()) {
            return None;
        }
        let side = letter.chars().next().and_then(|c| Side::try_from(c).ok())?;
        digits.parse().ok().map(|n| Word::Marker(n, side))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn classifies_tokens() {
        assert_eq!(Word::from("takeback"), Word::Takeback);
        assert_eq!(Word::from("pass"), Word::Pass);
        assert_eq!(Word::from("12s"), Word::Marker(12, Side::Silver));
        assert_eq!(Word::from("3w"), Word::Marker(3, Side::Gold));
        assert!(matches!(Word::from("Ra1"), Word::Placement(_)));
        assert!(matches!(Word::from("Ra1n"), Word::Step(_)));
        assert!(matches!(Word::from("rc6x"), Word::Capture(_)));
        assert_eq!(Word::from("rc5x"), Word::Unknown);
        assert_eq!(Word::from("Ra1s"), Word::Unknown);
        assert_eq!(Word::from("g"), Word::Unknown);
        assert_eq!(Word::from("info"), Word::Unknown);
        assert_eq!(Word::from("12x"), Word::Unknown);
    }
}
