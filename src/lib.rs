#![warn(clippy::all, clippy::pedantic, clippy::nursery)]
pub mod core;

pub mod app;
mod output;
pub use app::run;
