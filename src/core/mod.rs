pub mod alerts;
pub mod board;
pub mod config;
pub mod error;
pub mod intake;
pub mod model;
pub mod store;

#[cfg(test)]
mod scenario_test;
