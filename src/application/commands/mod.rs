pub mod articles;
pub mod theme;
