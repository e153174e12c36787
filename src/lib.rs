//! # gcode-motion
//!
//! G-code interpretation and step-level motion control with embedded-hal 1.0
//! support.
//!
//! ## Features
//!
//! - **Dialect interpreter**: modal G-codes, immediate F/S/T words, closed
//!   command set with strict or permissive handling of the rest
//! - **Step-level interpolation**: straight moves split into sub-step
//!   impulses, arcs walked in one-degree increments with drift checking
//! - **embedded-hal 1.0**: axes drive `OutputPin`s and pace with `DelayNs`
//! - **Kinematics**: cartesian or two-anchor hanging plotter geometry
//! - **no_std compatible**: core library works without the standard library
//!
//! ## Quick Start
//!
//! ```rust,ignore
//! use gcode_motion::{Controller, Interpreter, Spindle, VirtualAxis};
//!
//! let config = gcode_motion::load_config("machine.toml")?;
//!
//! let axis = |name| VirtualAxis::new(config.axis(name).unwrap().settings());
//! let mut controller = Controller::builder(
//!     axis("x"), axis("y"), axis("z"), Spindle::new(), delay,
//! )
//! .from_config(&config)
//! .build()?;
//!
//! let program = Interpreter::new().parse_file("job.gcode")?;
//! controller.run(&program)?;
//! ```
//!
//! ## Feature Flags
//!
//! - `std` (default): Enables file I/O, TOML parsing and whole-program runs
//! - `alloc`: Enables heap allocation for no_std with allocator

#![cfg_attr(not(feature = "std"), no_std)]
#![warn(missing_docs)]
#![warn(clippy::all)]
#![deny(unsafe_code)]
// Allow large error types - necessary for no_std with heapless strings
#![allow(clippy::result_large_err)]

#[cfg(feature = "alloc")]
extern crate alloc;

// Core modules
pub mod axis;
pub mod config;
pub mod controller;
pub mod error;
pub mod gcode;
pub mod geometry;
pub mod kinematics;
pub mod observer;
pub mod pins;
pub mod tool;

// Re-exports for ergonomic API
pub use axis::{Actuator, CoilStepper, Direction, LaserAxis, StepDirAxis, VirtualAxis};
pub use config::{validate_config, AxisConfig, BoundaryPolicy, SystemConfig};
pub use controller::{Controller, ControllerBuilder, MotionMode};
pub use error::{Error, Result};
pub use gcode::{Code, Dispatch, Interpreter, ParsePolicy};
pub use geometry::Vector3;
pub use kinematics::Kinematics;
pub use observer::{MotionObserver, Snapshot};
pub use pins::{StubDelay, StubPin};
pub use tool::{LaserTool, Spindle, Tool};

// Configuration loading (std only)
#[cfg(feature = "std")]
pub use config::load_config;

#[cfg(feature = "std")]
pub use gcode::Program;
