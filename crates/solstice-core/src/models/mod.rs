pub mod card;
pub mod cue;
pub mod routine;
