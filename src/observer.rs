//! Motion observation hooks.

use crate::geometry::Vector3;

/// Read-only view of the machine handed to observers.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Snapshot {
    /// Work-space position in machine units.
    pub position: Vector3,
    /// Integer motor positions for x, y, z.
    pub steps: [i64; 3],
}

/// Callback surface for progress reporting, plotting or recording.
///
/// `on_motion` fires after every interpolation step of a move or arc;
/// `on_command` fires once per executed dispatch. Both default to
/// no-ops so observers implement only what they need.
pub trait MotionObserver {
    /// One interpolation step finished.
    fn on_motion(&mut self, _snapshot: &Snapshot) {}

    /// One dispatch finished.
    fn on_command(&mut self, _snapshot: &Snapshot) {}
}

/// No observation.
impl MotionObserver for () {}

/// Adapter calling a closure on every motion step.
pub struct FnObserver<F>(pub F);

impl<F: FnMut(&Snapshot)> MotionObserver for FnObserver<F> {
    fn on_motion(&mut self, snapshot: &Snapshot) {
        (self.0)(snapshot)
    }
}
