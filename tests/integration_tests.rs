//! Integration tests for the gcode-motion library.
//!
//! These tests verify the complete workflow from configuration and program
//! text through interpretation to step-level execution.

use std::cell::RefCell;
use std::rc::Rc;
use std::sync::atomic::{AtomicBool, Ordering};

use embedded_hal_mock::eh1::delay::NoopDelay;
use embedded_hal_mock::eh1::digital::{
    Mock as PinMock, State as PinState, Transaction as PinTransaction,
};
use proptest::prelude::*;

use gcode_motion::axis::{
    Actuator, AxisCore, CoilStepper, Direction, PhaseTable, StepDirAxis, VirtualAxis,
};
use gcode_motion::config::{parse_config, AxisSettings, BoundaryPolicy};
use gcode_motion::error::{AxisError, Error, MotionError};
use gcode_motion::observer::FnObserver;
use gcode_motion::{
    Controller, Interpreter, ParsePolicy, Snapshot, Spindle, StubDelay, StubPin, Vector3,
};

// =============================================================================
// Test configuration data
// =============================================================================

const MACHINE_CONFIG: &str = r#"
resolution = 10.0
default_speed = 20.0

[axes.x]
min_position = -10000
max_position = 10000

[axes.y]
min_position = -10000
max_position = 10000

[axes.z]
min_position = -200
max_position = 200
"#;

fn settings(min: i64, max: i64) -> AxisSettings {
    AxisSettings {
        min_position: min,
        max_position: max,
        boundary_policy: BoundaryPolicy::Fault,
        ..AxisSettings::default()
    }
}

fn virtual_controller(
    resolution: f64,
) -> Controller<VirtualAxis, VirtualAxis, VirtualAxis, Spindle, StubDelay, ()> {
    Controller::builder(
        VirtualAxis::new(settings(-100_000, 100_000)),
        VirtualAxis::new(settings(-100_000, 100_000)),
        VirtualAxis::new(settings(-100_000, 100_000)),
        Spindle::new(),
        StubDelay,
    )
    .resolution(resolution)
    .build()
    .expect("controller should build")
}

// =============================================================================
// Whole-program execution
// =============================================================================

#[test]
fn config_to_execution_workflow() {
    let config = parse_config(MACHINE_CONFIG).expect("config should parse");
    let axis = |name: &str| VirtualAxis::new(config.axis(name).unwrap().settings());

    let mut controller = Controller::builder(
        axis("x"),
        axis("y"),
        axis("z"),
        Spindle::new(),
        StubDelay,
    )
    .from_config(&config)
    .build()
    .expect("controller should build");

    let program = Interpreter::new()
        .parse_program(
            "%\n\
             (square outline)\n\
             G90 G21\n\
             F30\n\
             G01 X10 Y0\n\
             X10 Y10\n\
             X0 Y10\n\
             X0 Y0\n\
             M02\n",
        )
        .expect("program should parse");

    controller.run(&program).expect("program should run");

    // M02 returned home and released everything
    assert_eq!(controller.snapshot().steps, [0, 0, 0]);
    assert_eq!(controller.position(), Vector3::ORIGIN);
    assert!(!controller.tool_state().running);
}

#[test]
fn modal_carry_over_drives_motion() {
    let mut controller = virtual_controller(10.0);
    let program = Interpreter::new()
        .parse_program("G01 X1\nX2\nX3\n")
        .expect("program should parse");
    controller.run(&program).expect("program should run");
    assert_eq!(controller.snapshot().steps[0], 30);
}

#[test]
fn program_without_m02_just_finishes() {
    let mut controller = virtual_controller(10.0);
    let program = Interpreter::new().parse_program("G01 X2\n").unwrap();
    controller.run(&program).unwrap();
    assert_eq!(controller.snapshot().steps[0], 20);
}

#[test]
fn fault_during_run_releases_axes() {
    let mut controller = Controller::builder(
        VirtualAxis::new(settings(-10, 10)),
        VirtualAxis::new(settings(-10, 10)),
        VirtualAxis::new(settings(-10, 10)),
        Spindle::new(),
        StubDelay,
    )
    .resolution(1.0)
    .build()
    .unwrap();

    let program = Interpreter::new()
        .parse_program("M03 S100\nG01 X50\nG01 Y5\n")
        .unwrap();
    let err = controller.run(&program).unwrap_err();
    assert!(matches!(err, Error::Axis(AxisError::BoundaryExceeded { .. })));
    // axis held at the bound, tool released by the shutdown path
    assert_eq!(controller.snapshot().steps[0], 10);
    assert_eq!(controller.snapshot().steps[1], 0);
    assert!(!controller.tool_state().running);
}

#[test]
fn stop_flag_abandons_program() {
    let mut controller = virtual_controller(10.0);
    let program = Interpreter::new()
        .parse_program("G01 X1\nG01 X2\nG01 X3\n")
        .unwrap();

    let stop = AtomicBool::new(true);
    controller.run_until(&program, &stop).unwrap();
    assert_eq!(controller.snapshot().steps, [0, 0, 0]);

    stop.store(false, Ordering::Relaxed);
    controller.run_until(&program, &stop).unwrap();
    assert_eq!(controller.snapshot().steps[0], 30);
}

#[test]
fn strict_policy_halts_on_unknown_code() {
    let mut interpreter = Interpreter::with_policy(ParsePolicy::Strict);
    assert!(interpreter.parse_program("G01 X1\nG42 X2\n").is_err());
}

#[test]
fn permissive_policy_skips_unknown_code() {
    let mut controller = virtual_controller(10.0);
    let mut interpreter = Interpreter::with_policy(ParsePolicy::Permissive);
    let program = interpreter
        .parse_program("G01 X1\nG42 X9\nG01 X2\n")
        .expect("permissive parse should succeed");
    controller.run(&program).unwrap();
    assert_eq!(controller.snapshot().steps[0], 20);
}

// =============================================================================
// Arc geometry through the full stack
// =============================================================================

#[test]
fn arc_waypoints_stay_on_circle() {
    let points: Rc<RefCell<Vec<Vector3>>> = Rc::new(RefCell::new(Vec::new()));
    let sink = Rc::clone(&points);
    let mut controller = Controller::builder(
        VirtualAxis::new(settings(-100_000, 100_000)),
        VirtualAxis::new(settings(-100_000, 100_000)),
        VirtualAxis::new(settings(-100_000, 100_000)),
        Spindle::new(),
        StubDelay,
    )
    .resolution(100.0)
    .observer(FnObserver(move |s: &Snapshot| {
        sink.borrow_mut().push(s.position)
    }))
    .build()
    .unwrap();

    let program = Interpreter::new()
        .parse_program("G01 X20 Y0\nG03 X-20 Y0 I-20 J0\n")
        .unwrap();
    controller.run(&program).unwrap();

    assert_eq!(controller.position(), Vector3::new(-20.0, 0.0, 0.0));
    let points = points.borrow();
    // half circle: one waypoint per degree plus the closing snap
    assert!(points.len() >= 180);
    for p in points.iter().skip(1) {
        assert!((p.length_xy() - 20.0).abs() < 0.01, "off circle: {:?}", p);
    }
}

#[test]
fn helical_arc_interpolates_z() {
    let mut controller = virtual_controller(10.0);
    let program = Interpreter::new()
        .parse_program("G01 X5 Y0\nG02 X5 Y0 I-5 J0 Z-2\n")
        .unwrap();
    controller.run(&program).unwrap();
    assert_eq!(controller.position(), Vector3::new(5.0, 0.0, -2.0));
    // sub-step residue may hold z one step shy of the target
    assert!((controller.snapshot().steps[2] + 20).abs() <= 1);
}

#[test]
fn bad_arc_surfaces_motion_error() {
    let mut controller = virtual_controller(10.0);
    let program = Interpreter::new().parse_program("G02 X3 Y3\n").unwrap();
    assert!(matches!(
        controller.run(&program),
        Err(Error::Motion(MotionError::DegenerateArc))
    ));
}

// =============================================================================
// Hardware-facing axes driven end to end
// =============================================================================

#[test]
fn coil_axis_walks_phase_sequence_through_program() {
    let make_pins = || [StubPin::new(), StubPin::new(), StubPin::new(), StubPin::new()];
    let coil_settings = AxisSettings {
        phase_table: PhaseTable::Mixed,
        ..settings(-10_000, 10_000)
    };
    let mut controller = Controller::builder(
        CoilStepper::new(make_pins(), StubDelay, coil_settings.clone()),
        CoilStepper::new(make_pins(), StubDelay, coil_settings.clone()),
        CoilStepper::new(make_pins(), StubDelay, coil_settings),
        Spindle::new(),
        StubDelay,
    )
    .resolution(1.0)
    .build()
    .unwrap();

    let program = Interpreter::new().parse_program("G01 X16\n").unwrap();
    controller.run(&program).unwrap();

    // 16 steps is two full trips through the 8-entry mixed sequence
    let (x, _, _, _) = controller.into_parts();
    assert_eq!(x.position(), 16);
}

#[test]
fn step_dir_axis_pulses_its_pins() {
    let mut step = PinMock::new(&[
        PinTransaction::set(PinState::High),
        PinTransaction::set(PinState::Low),
        PinTransaction::set(PinState::High),
        PinTransaction::set(PinState::Low),
        PinTransaction::set(PinState::Low), // unhold
    ]);
    let mut dir = PinMock::new(&[
        PinTransaction::set(PinState::High),
        PinTransaction::set(PinState::Low),
    ]);

    let mut axis = StepDirAxis::new(step.clone(), dir.clone(), NoopDelay::new(), settings(-10, 10));
    axis.advance(Direction::Clockwise, 1.0).unwrap();
    axis.advance(Direction::CounterClockwise, 1.0).unwrap();
    axis.unhold().unwrap();
    assert_eq!(axis.position(), 0);

    step.done();
    dir.done();
}

// =============================================================================
// Property tests for the sub-step accumulator
// =============================================================================

proptest! {
    #[test]
    fn accumulator_never_drifts_a_full_step(
        fractions in proptest::collection::vec((0.0f64..=1.0, any::<bool>()), 1..200)
    ) {
        let mut core = AxisCore::new(settings(-1000, 1000));
        for (fraction, positive) in fractions {
            let direction = if positive {
                Direction::Clockwise
            } else {
                Direction::CounterClockwise
            };
            core.accumulate(direction, fraction).unwrap();
            prop_assert!((core.float_position() - core.position() as f64).abs() < 1.0);
        }
    }

    #[test]
    fn bounds_are_never_crossed(
        fractions in proptest::collection::vec(0.0f64..=1.0, 1..300)
    ) {
        let mut core = AxisCore::new(AxisSettings {
            min_position: -3,
            max_position: 3,
            boundary_policy: BoundaryPolicy::Ignore,
            ..AxisSettings::default()
        });
        for fraction in fractions {
            core.accumulate(Direction::Clockwise, fraction).unwrap();
            prop_assert!(core.position() <= 3);
            prop_assert!(core.float_position() <= 3.0 + 1.0);
        }
    }
}
