//! Configuration-driven hanging-plotter example.
//!
//! Builds a two-anchor machine entirely from TOML: stub pins stand in for
//! the two cord motors, and a laser axis fires whenever the pen plunges
//! below zero.

use gcode_motion::axis::{CoilStepper, LaserAxis};
use gcode_motion::config::parse_config;
use gcode_motion::{Controller, Interpreter, Spindle, StubDelay, StubPin};

const CONFIG: &str = r#"
resolution = 20.0
default_speed = 15.0
parse_policy = "strict"

[axes.x]
min_position = -20000
max_position = 20000
step_delay_ms = 0.0
phase_table = "mixed"

[axes.y]
min_position = -20000
max_position = 20000
step_delay_ms = 0.0
phase_table = "mixed"

[axes.z]
min_position = -50
max_position = 50

[kinematics]
type = "two_anchor"
width = 1200.0
height = 800.0
scale = 1.0
"#;

const PROGRAM: &str = "\
G90
G01 X0 Y0 Z-1
G01 X50 Y0
G02 X50 Y-50 I0 J-25
G01 Z1
M02
";

fn main() -> Result<(), gcode_motion::Error> {
    let config = parse_config(CONFIG)?;
    let pins = || [StubPin::new(), StubPin::new(), StubPin::new(), StubPin::new()];

    let mut controller = Controller::builder(
        CoilStepper::new(pins(), StubDelay, config.axis("x").unwrap().settings()),
        CoilStepper::new(pins(), StubDelay, config.axis("y").unwrap().settings()),
        LaserAxis::new(StubPin::new(), config.axis("z").unwrap().settings()),
        Spindle::new(),
        StubDelay,
    )
    .from_config(&config)
    .build()?;

    let program = Interpreter::new().parse_program(PROGRAM)?;
    controller.run(&program)?;

    let snapshot = controller.snapshot();
    println!("cord motor positions: a={} b={}", snapshot.steps[0], snapshot.steps[1]);
    println!("logical position: {:?}", controller.position());
    Ok(())
}
