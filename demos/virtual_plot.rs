//! Virtual dry-run example.
//!
//! Parses a small program and executes it against bookkeeping-only axes,
//! printing every interpolated waypoint. Useful for checking a job's
//! geometry and bounds before it touches hardware.

use gcode_motion::axis::VirtualAxis;
use gcode_motion::config::{AxisSettings, BoundaryPolicy};
use gcode_motion::observer::FnObserver;
use gcode_motion::{Controller, Interpreter, Snapshot, Spindle, StubDelay};

const PROGRAM: &str = "\
(square with a rounded corner)
G90 G21
F25
G01 X20 Y0
G01 X20 Y15
G03 X15 Y20 I-5 J0
G01 X0 Y20
M02
";

fn main() -> Result<(), gcode_motion::Error> {
    let settings = AxisSettings {
        min_position: -10_000,
        max_position: 10_000,
        boundary_policy: BoundaryPolicy::Fault,
        ..AxisSettings::default()
    };

    let mut controller = Controller::builder(
        VirtualAxis::new(settings.clone()),
        VirtualAxis::new(settings.clone()),
        VirtualAxis::new(settings),
        Spindle::new(),
        StubDelay,
    )
    .resolution(40.0)
    .observer(FnObserver(|s: &Snapshot| {
        println!(
            "{:8.3} {:8.3} {:8.3}  steps {:?}",
            s.position.x, s.position.y, s.position.z, s.steps
        );
    }))
    .build()?;

    let program = Interpreter::new().parse_program(PROGRAM)?;
    println!("program with {} dispatches", program.len());
    controller.run(&program)?;

    println!("final position: {:?}", controller.position());
    Ok(())
}
