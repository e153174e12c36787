//! G-code command interpretation.
//!
//! Tokenizes command lines into parameter sets and command codes, tracks
//! modal state and produces [`Dispatch`] values for the motion controller.

mod command;
mod interpreter;
mod params;

pub use command::{Code, Dispatch};
pub use interpreter::{Interpreter, ParsePolicy, MAX_DISPATCHES_PER_LINE};
pub use params::ParamSet;

#[cfg(feature = "std")]
pub use interpreter::Program;
