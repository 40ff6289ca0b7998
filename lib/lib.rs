/// Chess domain types.
pub mod chess;
/// Assembly and validation of chess variants.
pub mod variant;
