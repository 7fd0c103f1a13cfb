//! Pure game logic with no I/O: guess matching, question-set assembly,
//! score computation and phone masking.

pub mod guess;
pub mod masking;
pub mod questions;
pub mod scoring;
