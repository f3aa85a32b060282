pub mod articles;
pub mod public;
pub mod theme;
