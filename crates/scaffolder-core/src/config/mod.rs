//! Project answers and generated configuration files

pub mod answers;
pub mod generator;

pub use answers::{Features, ProjectAnswers, RawAnswers};
