/// Which letters name the sides in ply labels.
#[derive(Debug, Default, Clone, Copy, Hash, PartialEq, Eq)]
#[cfg_attr(feature = "client", derive(serde::Serialize, serde::Deserialize))]
pub enum Style {
    /// gold and silver: `g`, `s`
    #[default]
    Modern,
    /// white and black: `w`, `b`
    Legacy,
}
