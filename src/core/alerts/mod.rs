// Repeat-alert handling for intimations.
//
// Architecture:
// - engine.rs: per-record alert decision (ceiling, daily reset, interval)
// - sound.rs: the sound capability the board fires when the engine says so

pub mod engine;
pub mod sound;
