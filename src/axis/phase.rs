//! Stepper coil phase tables.

use serde::Deserialize;

// low torque mode - also low power as only one coil is powered
const SEQUENCE_LOW: [[bool; 4]; 4] = [
    [true, false, false, false],
    [false, false, true, false],
    [false, true, false, false],
    [false, false, false, true],
];

// high torque - full step mode, two coils powered
const SEQUENCE_HIGH: [[bool; 4]; 4] = [
    [true, false, true, false],
    [false, true, true, false],
    [false, true, false, true],
    [true, false, false, true],
];

// mixed torque - half step mode, alternating single and double
const SEQUENCE_MIXED: [[bool; 4]; 8] = [
    [true, false, false, false],
    [true, false, true, false],
    [false, false, true, false],
    [false, true, true, false],
    [false, true, false, false],
    [false, true, false, true],
    [false, false, false, true],
    [true, false, false, true],
];

/// Fixed cyclic coil-energization sequence for a stepper axis.
///
/// Patterns are given for coil order (a1, a2, b1, b2); drivers bound to
/// fewer outputs use a prefix of each pattern.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum PhaseTable {
    /// Single coil active: low power, low torque.
    LowTorque,
    /// Two coils active: full-step, high torque.
    HighTorque,
    /// Half-step, alternating single/double coil.
    #[default]
    Mixed,
}

impl PhaseTable {
    /// Period of the sequence in steps.
    #[inline]
    pub fn len(&self) -> usize {
        match self {
            PhaseTable::LowTorque | PhaseTable::HighTorque => 4,
            PhaseTable::Mixed => 8,
        }
    }

    /// Phase tables are never empty; present for clippy's benefit.
    #[inline]
    pub fn is_empty(&self) -> bool {
        false
    }

    /// Coil pattern for an integer step position.
    ///
    /// Indexed by `position mod len`, so consecutive positions walk the
    /// sequence in either direction.
    pub fn pattern(&self, position: i64) -> [bool; 4] {
        let index = position.rem_euclid(self.len() as i64) as usize;
        match self {
            PhaseTable::LowTorque => SEQUENCE_LOW[index],
            PhaseTable::HighTorque => SEQUENCE_HIGH[index],
            PhaseTable::Mixed => SEQUENCE_MIXED[index],
        }
    }
}
