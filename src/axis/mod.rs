//! Axis actuators.
//!
//! Per-axis sub-step accumulation, boundary enforcement, pacing and phase
//! sequencing. Digital outputs are `embedded-hal` [`OutputPin`]s injected at
//! construction; pacing goes through a [`DelayNs`] provider.
//!
//! [`OutputPin`]: embedded_hal::digital::OutputPin
//! [`DelayNs`]: embedded_hal::delay::DelayNs

mod actuator;
mod coil;
mod laser;
mod phase;
mod step_dir;
mod virtual_axis;

pub use actuator::{Actuator, AxisCore, Direction};
pub use coil::CoilStepper;
pub use laser::LaserAxis;
pub use phase::PhaseTable;
pub use step_dir::StepDirAxis;
pub use virtual_axis::VirtualAxis;
