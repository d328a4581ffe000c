pub mod cue;
pub mod health;
pub mod parse;
pub mod recommend;
