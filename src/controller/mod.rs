//! The motion controller: executes dispatches against the axes.
//!
//! All interpolation happens here. Straight moves are split into unit
//! impulses no larger than one step per axis; arcs walk the circle in
//! fixed one-degree increments and close with a partial rotation plus a
//! drift-checked snap onto the exact target.

mod builder;

pub use builder::ControllerBuilder;

use embedded_hal::delay::DelayNs;

use crate::axis::{Actuator, Direction};
use crate::error::{Error, MotionError, Result};
use crate::gcode::{Code, Dispatch, ParamSet};
use crate::geometry::Vector3;
use crate::kinematics::Kinematics;
use crate::observer::{MotionObserver, Snapshot};
use crate::tool::Tool;

#[cfg(feature = "std")]
use core::sync::atomic::{AtomicBool, Ordering};

#[cfg(feature = "std")]
use crate::gcode::Program;

/// Angular increment for arc interpolation, one degree.
const ANGLE_STEP: f64 = core::f64::consts::PI / 180.0;

/// Positional drift tolerance, the diagonal of a unit cube.
///
/// Applied twice: to the arc interpolation residual before the snap onto
/// the exact target (in machine units), and after every straight move to
/// the gap between the actuator step counts and the transformed logical
/// position (in steps, at most one of sub-step residue per axis). Loose,
/// but kept as a compatibility contract.
const DRIFT_LIMIT: f64 = 1.7320508075688772;

/// Geometric epsilon for coincidence tests, in machine units.
const EPSILON: f64 = 1e-9;

/// Distance mode selected by G90/G91.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum MotionMode {
    /// Coordinates are absolute positions.
    #[default]
    Absolute,
    /// Coordinates are offsets from the current position.
    Incremental,
}

/// Executes dispatches against three axes and a tool.
///
/// The controller tracks the logical work-space position and the
/// transformed motor-space position separately; motors only ever see
/// differences of transformed positions, so nonlinear kinematics stay
/// exact at every commanded point.
pub struct Controller<X, Y, Z, T, D, O>
where
    X: Actuator,
    Y: Actuator,
    Z: Actuator,
    T: Tool,
    D: DelayNs,
    O: MotionObserver,
{
    x: X,
    y: Y,
    z: Z,
    tool: T,
    delay: D,
    observer: O,
    position: Vector3,
    motor_position: Vector3,
    mode: MotionMode,
    resolution: f64,
    default_speed: f64,
    current_speed: f64,
    kinematics: Kinematics,
    sin_step: f64,
    cos_step: f64,
}

impl<X, Y, Z, T, D> Controller<X, Y, Z, T, D, ()>
where
    X: Actuator,
    Y: Actuator,
    Z: Actuator,
    T: Tool,
    D: DelayNs,
{
    /// Start building a controller around the given hardware.
    pub fn builder(x: X, y: Y, z: Z, tool: T, delay: D) -> ControllerBuilder<X, Y, Z, T, D, ()> {
        ControllerBuilder::new(x, y, z, tool, delay)
    }
}

impl<X, Y, Z, T, D, O> Controller<X, Y, Z, T, D, O>
where
    X: Actuator,
    Y: Actuator,
    Z: Actuator,
    T: Tool,
    D: DelayNs,
    O: MotionObserver,
{
    pub(crate) fn new(
        x: X,
        y: Y,
        z: Z,
        tool: T,
        delay: D,
        observer: O,
        resolution: f64,
        default_speed: f64,
        kinematics: Kinematics,
    ) -> Self {
        let motor_position = kinematics.apply(Vector3::ORIGIN);
        Self {
            x,
            y,
            z,
            tool,
            delay,
            observer,
            position: Vector3::ORIGIN,
            motor_position,
            mode: MotionMode::default(),
            resolution,
            default_speed,
            current_speed: default_speed,
            kinematics,
            sin_step: libm::sin(ANGLE_STEP),
            cos_step: libm::cos(ANGLE_STEP),
        }
    }

    /// Current work-space position in machine units.
    pub fn position(&self) -> Vector3 {
        self.position
    }

    /// Current distance mode.
    pub fn mode(&self) -> MotionMode {
        self.mode
    }

    /// Feed rate in effect, in units per second.
    pub fn current_speed(&self) -> f64 {
        self.current_speed
    }

    /// State of the attached tool.
    pub fn tool_state(&self) -> crate::tool::ToolState {
        self.tool.state()
    }

    /// Read-only view of the machine for observers and reporting.
    pub fn snapshot(&self) -> Snapshot {
        Snapshot {
            position: self.position,
            steps: [self.x.position(), self.y.position(), self.z.position()],
        }
    }

    /// Execute a single dispatch.
    ///
    /// `Err(Error::ProgramEnd)` signals normal M02 completion; every
    /// other error is a fault. Neither leaves the axes energized when
    /// the caller uses [`Controller::run`].
    pub fn execute(&mut self, dispatch: &Dispatch) -> Result<()> {
        match dispatch {
            Dispatch::FeedRate(feed) => {
                log::debug!("feed rate {}", feed);
                self.current_speed = *feed;
                Ok(())
            }
            Dispatch::SpindleSpeed(speed) => {
                log::debug!("tool speed {}", speed);
                self.tool.set_speed(*speed);
                Ok(())
            }
            Dispatch::ToolSelect(tool) => {
                log::info!("tool select T{}", tool);
                Ok(())
            }
            Dispatch::Command { code, params } => {
                log::debug!("{}", code.mnemonic());
                self.command(*code, params)?;
                let snapshot = self.snapshot();
                self.observer.on_command(&snapshot);
                Ok(())
            }
        }
    }

    fn command(&mut self, code: Code, params: &ParamSet) -> Result<()> {
        match code {
            Code::Rapid | Code::Linear => {
                let target = self.resolve_target(params);
                self.straight_move(target)
            }
            Code::ArcCw => self.arc(params, true),
            Code::ArcCcw => self.arc(params, false),
            Code::Dwell => {
                let seconds = params.get('P').unwrap_or(0.0);
                if seconds > 0.0 {
                    self.delay.delay_ms((seconds * 1000.0) as u32);
                }
                Ok(())
            }
            Code::PlaneXy => Ok(()),
            Code::PlaneXz | Code::PlaneYz => {
                log::warn!("{}: only the XY plane is supported", code.mnemonic());
                Ok(())
            }
            Code::Inches => {
                log::warn!("G20: inch input is not scaled");
                Ok(())
            }
            Code::Millimeters | Code::WorkOffset | Code::FeedPerMinute => Ok(()),
            Code::Absolute => {
                self.mode = MotionMode::Absolute;
                Ok(())
            }
            Code::Incremental => {
                self.mode = MotionMode::Incremental;
                Ok(())
            }
            Code::ProgramEnd => self.finish(),
            Code::SpindleCw => {
                self.tool.rotate(Direction::Clockwise, params.get('S'))?;
                Ok(())
            }
            Code::SpindleCcw => {
                self.tool
                    .rotate(Direction::CounterClockwise, params.get('S'))?;
                Ok(())
            }
            Code::SpindleStop => {
                self.tool.unhold()?;
                Ok(())
            }
            Code::ToolChange | Code::MistCoolantOn | Code::FloodCoolantOn | Code::CoolantOff => {
                log::info!("{}: acknowledged", code.mnemonic());
                Ok(())
            }
        }
    }

    /// Target position for a motion command under the current distance
    /// mode. Missing coordinates keep their current value.
    fn resolve_target(&self, params: &ParamSet) -> Vector3 {
        match self.mode {
            MotionMode::Absolute => Vector3::new(
                params.get('X').unwrap_or(self.position.x),
                params.get('Y').unwrap_or(self.position.y),
                params.get('Z').unwrap_or(self.position.z),
            ),
            MotionMode::Incremental => Vector3::new(
                self.position.x + params.get('X').unwrap_or(0.0),
                self.position.y + params.get('Y').unwrap_or(0.0),
                self.position.z + params.get('Z').unwrap_or(0.0),
            ),
        }
    }

    /// Move in a straight line to `target`.
    ///
    /// The transformed displacement is scaled to steps and split into
    /// impulses of at most one step per axis, so the axes stay in sync
    /// over the whole segment and the accumulators receive the full
    /// displacement with no tail left behind. Ends by verifying the
    /// actuators actually followed; a silently refused step (ignored
    /// boundary) surfaces here as [`MotionError::DriftExceeded`].
    fn straight_move(&mut self, target: Vector3) -> Result<()> {
        let motor_target = self.kinematics.apply(target);
        let steps = (motor_target - self.motor_position) * self.resolution;

        let length = libm::fmax(
            libm::fabs(steps.x),
            libm::fmax(libm::fabs(steps.y), libm::fabs(steps.z)),
        );

        if length > 0.0 {
            let count = libm::fmax(libm::ceil(length), 1.0);
            let impulses = [
                (Direction::from_sign(steps.x), libm::fabs(steps.x) / count),
                (Direction::from_sign(steps.y), libm::fabs(steps.y) / count),
                (Direction::from_sign(steps.z), libm::fabs(steps.z) / count),
            ];
            for _ in 0..count as u64 {
                if impulses[0].1 > 0.0 {
                    self.x.advance(impulses[0].0, impulses[0].1)?;
                }
                if impulses[1].1 > 0.0 {
                    self.y.advance(impulses[1].0, impulses[1].1)?;
                }
                if impulses[2].1 > 0.0 {
                    self.z.advance(impulses[2].0, impulses[2].1)?;
                }
            }
        }

        self.motor_position = motor_target;
        self.position = target;

        // the actuators must track the transformed position to within one
        // full step per axis; a larger gap means the bookkeeping and the
        // hardware have desynchronized and the run must not continue
        let actual = Vector3::new(
            self.x.position() as f64,
            self.y.position() as f64,
            self.z.position() as f64,
        );
        let drift = (motor_target * self.resolution - actual).length();
        if drift > DRIFT_LIMIT {
            return Err(Error::Motion(MotionError::DriftExceeded {
                drift,
                limit: DRIFT_LIMIT,
            }));
        }

        let snapshot = self.snapshot();
        self.observer.on_motion(&snapshot);
        Ok(())
    }

    /// Interpolate a circular arc in the XY plane, with linear Z.
    ///
    /// The radius vector is rotated one degree at a time using the
    /// precomputed step rotation, then by the remaining partial angle.
    /// The endpoint is only trusted after the drift check passes.
    fn arc(&mut self, params: &ParamSet, clockwise: bool) -> Result<()> {
        let target = self.resolve_target(params);
        let center = self.arc_center(&target, params, clockwise)?;

        let start = Vector3::new(self.position.x - center.x, self.position.y - center.y, 0.0);
        let stop = Vector3::new(target.x - center.x, target.y - center.y, 0.0);
        if start.length_xy() < EPSILON {
            return Err(Error::Motion(MotionError::ZeroRadius));
        }
        if stop.length_xy() < EPSILON {
            return Err(Error::Motion(MotionError::DegenerateArc));
        }

        // a sweep of at most one angular step degenerates to its chord;
        // coincident endpoints stay on the full-circle path below
        let gap = start.angle_between(&stop);
        if gap > EPSILON && gap <= ANGLE_STEP {
            return self.straight_move(target);
        }

        let start_angle = start.angle();
        let mut stop_angle = stop.angle();
        // make the sweep monotone in the travel direction; coincident
        // angles become a full circle
        if clockwise {
            if stop_angle >= start_angle - EPSILON {
                stop_angle -= 2.0 * core::f64::consts::PI;
            }
        } else if stop_angle <= start_angle + EPSILON {
            stop_angle += 2.0 * core::f64::consts::PI;
        }

        let sweep = libm::fabs(stop_angle - start_angle);
        let whole_steps = libm::floor(sweep / ANGLE_STEP) as u64;
        let sin_step = if clockwise { -self.sin_step } else { self.sin_step };

        let z_start = self.position.z;
        let z_sweep = target.z - z_start;

        let mut radius = start;
        for i in 1..=whole_steps {
            radius = radius.rotated_z_fast(sin_step, self.cos_step);
            let progress = i as f64 * ANGLE_STEP / sweep;
            self.straight_move(Vector3::new(
                center.x + radius.x,
                center.y + radius.y,
                z_start + z_sweep * progress,
            ))?;
        }

        let remainder = sweep - whole_steps as f64 * ANGLE_STEP;
        if remainder > EPSILON {
            let signed = if clockwise { -remainder } else { remainder };
            radius = radius.rotated_z(signed);
            self.straight_move(Vector3::new(
                center.x + radius.x,
                center.y + radius.y,
                target.z,
            ))?;
        }

        self.drift_management(target)
    }

    /// Final arc bookkeeping: verify the interpolated endpoint landed
    /// within tolerance of the commanded target and snap onto it.
    fn drift_management(&mut self, target: Vector3) -> Result<()> {
        let drift = (target - self.position).length();
        if drift > DRIFT_LIMIT {
            return Err(Error::Motion(MotionError::DriftExceeded {
                drift,
                limit: DRIFT_LIMIT,
            }));
        }
        self.straight_move(target)
    }

    /// Arc center in the XY plane from I/J offsets or the R form.
    fn arc_center(&self, target: &Vector3, params: &ParamSet, clockwise: bool) -> Result<Vector3> {
        if let Some(r) = params.get('R') {
            return self.center_from_radius(target, r, clockwise);
        }

        if params.contains('I') || params.contains('J') {
            let i = params.get('I').unwrap_or(0.0);
            let j = params.get('J').unwrap_or(0.0);
            if libm::fabs(i) < EPSILON && libm::fabs(j) < EPSILON {
                return Err(Error::Motion(MotionError::ZeroRadius));
            }
            return Ok(Vector3::new(self.position.x + i, self.position.y + j, 0.0));
        }

        Err(Error::Motion(MotionError::DegenerateArc))
    }

    /// Center from the radius form: intersect the two circles of radius
    /// `|r|` around the endpoints. The sign of `r` and the arc direction
    /// select which of the two intersections is meant, per the usual
    /// minor/major arc convention.
    fn center_from_radius(&self, target: &Vector3, r: f64, clockwise: bool) -> Result<Vector3> {
        let radius = libm::fabs(r);
        if radius < EPSILON {
            return Err(Error::Motion(MotionError::ZeroRadius));
        }

        let chord_vec = Vector3::new(target.x - self.position.x, target.y - self.position.y, 0.0);
        let chord = chord_vec.length_xy();
        if chord < EPSILON {
            // the radius form cannot express a full circle
            return Err(Error::Motion(MotionError::DegenerateArc));
        }
        if chord / 2.0 > radius + EPSILON {
            return Err(Error::Motion(MotionError::UnreachableTarget { chord, radius }));
        }

        let half = chord / 2.0;
        let offset = libm::sqrt(libm::fmax(radius * radius - half * half, 0.0));
        let unit = chord_vec.unit();
        // unit chord direction rotated a quarter turn to the left
        let perp = Vector3::new(-unit.y, unit.x, 0.0);
        let side = if clockwise == (r < 0.0) { 1.0 } else { -1.0 };

        let mid_x = (self.position.x + target.x) / 2.0;
        let mid_y = (self.position.y + target.y) / 2.0;
        Ok(Vector3::new(
            mid_x + perp.x * offset * side,
            mid_y + perp.y * offset * side,
            0.0,
        ))
    }

    /// M02: return to origin, release everything, signal completion.
    fn finish(&mut self) -> Result<()> {
        log::info!("program end, returning to origin");
        let went_home = self.straight_move(Vector3::ORIGIN);
        self.release()?;
        went_home?;
        self.current_speed = self.default_speed;
        Err(Error::ProgramEnd)
    }

    /// De-energize every axis and the tool.
    fn release(&mut self) -> Result<()> {
        self.x.unhold()?;
        self.y.unhold()?;
        self.z.unhold()?;
        self.tool.unhold()?;
        Ok(())
    }

    /// Best-effort release for fault paths; failures are logged, never
    /// propagated, so the original fault stays visible.
    pub fn shutdown(&mut self) {
        if self.x.unhold().is_err() {
            log::error!("failed to release x axis");
        }
        if self.y.unhold().is_err() {
            log::error!("failed to release y axis");
        }
        if self.z.unhold().is_err() {
            log::error!("failed to release z axis");
        }
        if self.tool.unhold().is_err() {
            log::error!("failed to release tool");
        }
    }

    /// Consume the controller and hand the axes and tool back.
    pub fn into_parts(self) -> (X, Y, Z, T) {
        (self.x, self.y, self.z, self.tool)
    }
}

#[cfg(feature = "std")]
impl<X, Y, Z, T, D, O> Controller<X, Y, Z, T, D, O>
where
    X: Actuator,
    Y: Actuator,
    Z: Actuator,
    T: Tool,
    D: DelayNs,
    O: MotionObserver,
{
    /// Run a parsed program to completion.
    ///
    /// M02 terminates the run normally. Any fault releases the axes and
    /// tool before propagating.
    pub fn run(&mut self, program: &Program) -> Result<()> {
        for dispatch in program.iter() {
            match self.execute(dispatch) {
                Ok(()) => {}
                Err(Error::ProgramEnd) => return Ok(()),
                Err(e) => {
                    self.shutdown();
                    return Err(e);
                }
            }
        }
        Ok(())
    }

    /// Run a parsed program, checking `stop` between dispatches.
    ///
    /// A raised stop flag releases the axes and returns `Ok`; the
    /// program is simply abandoned where it stands.
    pub fn run_until(&mut self, program: &Program, stop: &AtomicBool) -> Result<()> {
        for dispatch in program.iter() {
            if stop.load(Ordering::Relaxed) {
                log::info!("stop requested, abandoning program");
                self.shutdown();
                return Ok(());
            }
            match self.execute(dispatch) {
                Ok(()) => {}
                Err(Error::ProgramEnd) => return Ok(()),
                Err(e) => {
                    self.shutdown();
                    return Err(e);
                }
            }
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::axis::VirtualAxis;
    use crate::config::{AxisSettings, BoundaryPolicy};
    use crate::error::AxisError;
    use crate::gcode::Interpreter;
    use crate::observer::FnObserver;
    use crate::pins::StubDelay;
    use crate::tool::Spindle;

    use std::cell::RefCell;
    use std::rc::Rc;

    fn axis(min: i64, max: i64) -> VirtualAxis {
        VirtualAxis::new(AxisSettings {
            min_position: min,
            max_position: max,
            boundary_policy: BoundaryPolicy::Fault,
            ..AxisSettings::default()
        })
    }

    fn controller(
        resolution: f64,
    ) -> Controller<VirtualAxis, VirtualAxis, VirtualAxis, Spindle, StubDelay, ()> {
        Controller::builder(
            axis(-100_000, 100_000),
            axis(-100_000, 100_000),
            axis(-100_000, 100_000),
            Spindle::new(),
            StubDelay,
        )
        .resolution(resolution)
        .build()
        .unwrap()
    }

    fn exec<X, Y, Z, T, D, O>(
        controller: &mut Controller<X, Y, Z, T, D, O>,
        interpreter: &mut Interpreter,
        line: &str,
    ) -> Result<()>
    where
        X: Actuator,
        Y: Actuator,
        Z: Actuator,
        T: Tool,
        D: DelayNs,
        O: MotionObserver,
    {
        for dispatch in interpreter.parse_line(line)? {
            controller.execute(&dispatch)?;
        }
        Ok(())
    }

    #[test]
    fn test_linear_move_scales_by_resolution() {
        let mut c = controller(10.0);
        let mut i = Interpreter::new();
        exec(&mut c, &mut i, "G01 X1 Y2 Z-0.5").unwrap();
        let snapshot = c.snapshot();
        assert_eq!(snapshot.steps, [10, 20, -5]);
        assert_eq!(c.position(), Vector3::new(1.0, 2.0, -0.5));
    }

    #[test]
    fn test_incremental_mode_accumulates() {
        let mut c = controller(10.0);
        let mut i = Interpreter::new();
        exec(&mut c, &mut i, "G91").unwrap();
        exec(&mut c, &mut i, "G01 X1").unwrap();
        exec(&mut c, &mut i, "X1").unwrap();
        assert_eq!(c.snapshot().steps[0], 20);
        assert_eq!(c.mode(), MotionMode::Incremental);
    }

    #[test]
    fn test_missing_coordinates_keep_current() {
        let mut c = controller(10.0);
        let mut i = Interpreter::new();
        exec(&mut c, &mut i, "G01 X3 Y4").unwrap();
        exec(&mut c, &mut i, "G01 X5").unwrap();
        assert_eq!(c.position(), Vector3::new(5.0, 4.0, 0.0));
    }

    #[test]
    fn test_round_trip_returns_exactly_to_origin() {
        let mut c = controller(16.0);
        let mut i = Interpreter::new();
        exec(&mut c, &mut i, "G01 X2 Y-4 Z1.5").unwrap();
        exec(&mut c, &mut i, "G01 X0 Y0 Z0").unwrap();
        assert_eq!(c.snapshot().steps, [0, 0, 0]);
        assert_eq!(c.position(), Vector3::ORIGIN);
    }

    #[test]
    fn test_quarter_arc_stays_on_circle() {
        let points = Rc::new(RefCell::new(Vec::new()));
        let sink = Rc::clone(&points);
        let mut c = Controller::builder(
            axis(-100_000, 100_000),
            axis(-100_000, 100_000),
            axis(-100_000, 100_000),
            Spindle::new(),
            StubDelay,
        )
        .resolution(100.0)
        .observer(FnObserver(move |s: &Snapshot| {
            sink.borrow_mut().push(s.position)
        }))
        .build()
        .unwrap();
        let mut i = Interpreter::new();

        exec(&mut c, &mut i, "G01 X10 Y0").unwrap();
        points.borrow_mut().clear();
        // counter-clockwise quarter circle around the origin
        exec(&mut c, &mut i, "G03 X0 Y10 I-10 J0").unwrap();

        assert_eq!(c.position(), Vector3::new(0.0, 10.0, 0.0));
        let points = points.borrow();
        assert!(points.len() >= 90);
        for p in points.iter() {
            assert!(
                (p.length_xy() - 10.0).abs() < 0.01,
                "point off circle: {:?}",
                p
            );
        }
    }

    #[test]
    fn test_full_circle_sweeps_all_the_way_around() {
        let count = Rc::new(RefCell::new(0usize));
        let sink = Rc::clone(&count);
        let mut c = Controller::builder(
            axis(-100_000, 100_000),
            axis(-100_000, 100_000),
            axis(-100_000, 100_000),
            Spindle::new(),
            StubDelay,
        )
        .resolution(10.0)
        .observer(FnObserver(move |_: &Snapshot| *sink.borrow_mut() += 1))
        .build()
        .unwrap();
        let mut i = Interpreter::new();

        exec(&mut c, &mut i, "G01 X5 Y0").unwrap();
        *count.borrow_mut() = 0;
        exec(&mut c, &mut i, "G02 X5 Y0 I-5 J0").unwrap();

        assert!(*count.borrow() >= 360);
        assert_eq!(c.position(), Vector3::new(5.0, 0.0, 0.0));
        // sub-step residue may hold an axis one step shy of the target
        let steps = c.snapshot().steps;
        assert!((steps[0] - 50).abs() <= 1 && steps[1].abs() <= 1);
    }

    #[test]
    fn test_sub_degree_arc_degenerates_to_chord() {
        let waypoints = Rc::new(RefCell::new(0usize));
        let sink = Rc::clone(&waypoints);
        let mut c = Controller::builder(
            axis(-100_000, 100_000),
            axis(-100_000, 100_000),
            axis(-100_000, 100_000),
            Spindle::new(),
            StubDelay,
        )
        .resolution(10.0)
        .observer(FnObserver(move |_: &Snapshot| *sink.borrow_mut() += 1))
        .build()
        .unwrap();
        let mut i = Interpreter::new();

        exec(&mut c, &mut i, "G01 X10 Y0").unwrap();
        *waypoints.borrow_mut() = 0;
        // target half a degree clockwise of the start: sweeping the long
        // way around would be wrong, the move collapses to one chord
        exec(&mut c, &mut i, "G03 X9.999619 Y-0.087265 I-10 J0").unwrap();

        assert_eq!(*waypoints.borrow(), 1);
        assert_eq!(c.position(), Vector3::new(9.999619, -0.087265, 0.0));
    }

    #[test]
    fn test_radius_form_semicircle() {
        let mut c = controller(100.0);
        let mut i = Interpreter::new();
        exec(&mut c, &mut i, "G03 X0 Y10 R5").unwrap();
        assert_eq!(c.position(), Vector3::new(0.0, 10.0, 0.0));
        // the counter-clockwise half circle bulges to positive x
        assert!(c.snapshot().steps[0].abs() <= 1);
    }

    #[test]
    fn test_radius_form_unreachable_target() {
        let mut c = controller(10.0);
        let mut i = Interpreter::new();
        let err = exec(&mut c, &mut i, "G02 X100 Y0 R10").unwrap_err();
        assert!(matches!(
            err,
            Error::Motion(MotionError::UnreachableTarget { .. })
        ));
    }

    #[test]
    fn test_arc_without_center_is_degenerate() {
        let mut c = controller(10.0);
        let mut i = Interpreter::new();
        let err = exec(&mut c, &mut i, "G02 X1 Y1").unwrap_err();
        assert_eq!(err, Error::Motion(MotionError::DegenerateArc));
    }

    #[test]
    fn test_arc_with_zero_offsets_is_zero_radius() {
        let mut c = controller(10.0);
        let mut i = Interpreter::new();
        let err = exec(&mut c, &mut i, "G02 X1 Y1 I0 J0").unwrap_err();
        assert_eq!(err, Error::Motion(MotionError::ZeroRadius));
    }

    #[test]
    fn test_boundary_fault_stops_at_bound() {
        let mut c = Controller::builder(
            axis(-10, 10),
            axis(-10, 10),
            axis(-10, 10),
            Spindle::new(),
            StubDelay,
        )
        .resolution(1.0)
        .build()
        .unwrap();
        let mut i = Interpreter::new();
        let err = exec(&mut c, &mut i, "G01 X50").unwrap_err();
        assert!(matches!(
            err,
            Error::Axis(AxisError::BoundaryExceeded { position: 11, .. })
        ));
        assert_eq!(c.snapshot().steps[0], 10);
    }

    #[test]
    fn test_ignored_boundary_desync_trips_drift_check() {
        let x = VirtualAxis::new(AxisSettings {
            min_position: -10,
            max_position: 10,
            boundary_policy: BoundaryPolicy::Ignore,
            ..AxisSettings::default()
        });
        let mut c = Controller::builder(
            x,
            axis(-100_000, 100_000),
            axis(-100_000, 100_000),
            Spindle::new(),
            StubDelay,
        )
        .resolution(1.0)
        .build()
        .unwrap();
        let mut i = Interpreter::new();
        // the axis silently refuses steps past 10; the motor and the
        // logical position part ways, which must not go unnoticed
        let err = exec(&mut c, &mut i, "G01 X50").unwrap_err();
        assert!(matches!(
            err,
            Error::Motion(MotionError::DriftExceeded { .. })
        ));
        assert_eq!(c.snapshot().steps[0], 10);
    }

    #[test]
    fn test_program_end_returns_home_and_releases() {
        let mut c = controller(10.0);
        let mut i = Interpreter::new();
        exec(&mut c, &mut i, "M03 S800").unwrap();
        exec(&mut c, &mut i, "G01 X5 Y5").unwrap();
        let err = exec(&mut c, &mut i, "M02").unwrap_err();
        assert!(err.is_program_end());
        assert_eq!(c.snapshot().steps, [0, 0, 0]);
        assert!(!c.tool_state().running);
    }

    #[test]
    fn test_dwell_does_not_move() {
        let mut c = controller(10.0);
        let mut i = Interpreter::new();
        exec(&mut c, &mut i, "G04 P0.01").unwrap();
        assert_eq!(c.snapshot().steps, [0, 0, 0]);
    }

    #[test]
    fn test_spindle_commands_reach_tool() {
        let mut c = controller(10.0);
        let mut i = Interpreter::new();
        exec(&mut c, &mut i, "M03 S1200").unwrap();
        assert!(c.tool_state().running);
        assert_eq!(c.tool_state().speed, Some(1200.0));
        exec(&mut c, &mut i, "M05").unwrap();
        assert!(!c.tool_state().running);
    }

    #[test]
    fn test_feed_and_tool_words_are_recorded() {
        let mut c = controller(10.0);
        let mut i = Interpreter::new();
        exec(&mut c, &mut i, "F42 T3").unwrap();
        assert_eq!(c.current_speed(), 42.0);
    }
}
