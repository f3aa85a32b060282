pub mod articles;
pub mod public;
