//! Error types for the gcode-motion library.
//!
//! Provides unified error handling across parsing, axis actuation, motion
//! geometry and configuration. `ProgramEnd` is carried here as well: it is a
//! normal termination signal (M02), not a fault, but it propagates through the
//! same channel so the run loop can unwind cleanly.

use core::fmt;

/// Result type alias using the library's Error type.
pub type Result<T> = core::result::Result<T, Error>;

/// Unified error type for all gcode-motion operations.
#[derive(Debug, Clone, PartialEq)]
pub enum Error {
    /// Command interpretation error
    Parse(ParseError),
    /// Axis actuator error
    Axis(AxisError),
    /// Motion geometry or invariant error
    Motion(MotionError),
    /// Configuration parsing or validation error
    Config(ConfigError),
    /// M02 received: normal end of program, not a fault.
    ///
    /// Triggers graceful shutdown (return-to-origin, unhold all, release
    /// tool); must never be logged as an error.
    ProgramEnd,
}

/// Command interpretation errors.
#[derive(Debug, Clone, PartialEq)]
pub enum ParseError {
    /// A letter word was not followed by a parseable decimal number.
    MalformedWord {
        /// Letter the number was attached to
        letter: char,
    },
    /// G/M code number outside the supported command set.
    UnknownCommand {
        /// Command letter (G or M)
        letter: char,
        /// Code number as written
        number: f64,
    },
    /// Letter outside the recognized parameter/command alphabet.
    UnexpectedWord(char),
    /// Line carries bare parameters but no modal G-code was ever set.
    NoModalCommand,
    /// More command words on one line than the interpreter can dispatch.
    TooManyWords,
}

/// Axis actuator errors.
#[derive(Debug, Clone, PartialEq)]
pub enum AxisError {
    /// Prospective step would exit the configured position bounds.
    BoundaryExceeded {
        /// Position the step would have reached
        position: i64,
        /// Configured minimum step position
        min: i64,
        /// Configured maximum step position
        max: i64,
    },
    /// Digital output operation failed.
    Pin,
}

/// Motion geometry and invariant errors.
#[derive(Debug, Clone, PartialEq)]
pub enum MotionError {
    /// Arc commanded with a zero radius.
    ZeroRadius,
    /// Arc center coincides with the current position or the target.
    DegenerateArc,
    /// Radius-form arc whose endpoints are further apart than the diameter.
    UnreachableTarget {
        /// Chord length between current position and target
        chord: f64,
        /// Commanded radius
        radius: f64,
    },
    /// Physical/logical position divergence exceeded the tolerance.
    ///
    /// Always fatal: indicates accumulated numerical error or hardware
    /// desynchronization and must not be swallowed.
    DriftExceeded {
        /// Measured drift, in machine units for the arc residual and in
        /// actuator steps for the post-move actuator check
        drift: f64,
        /// Tolerance that was exceeded
        limit: f64,
    },
}

/// Configuration-related errors.
#[derive(Debug, Clone, PartialEq)]
pub enum ConfigError {
    /// Failed to parse TOML configuration
    ParseError(heapless::String<128>),
    /// Resolution must be > 0 steps per machine unit
    InvalidResolution(f64),
    /// Axis bounds with min >= max
    InvalidBounds {
        /// Minimum step position
        min: i64,
        /// Maximum step position
        max: i64,
    },
    /// Negative per-step pacing delay
    InvalidStepDelay(f64),
    /// Default feed rate must be > 0 units per second
    InvalidSpeed(f64),
    /// Two-anchor geometry with non-positive width, height or scale
    InvalidAnchorGeometry {
        /// Configured work-area width
        width: f64,
        /// Configured work-area height
        height: f64,
        /// Configured output scale
        scale: f64,
    },
    /// Referenced axis missing from the configuration
    AxisNotConfigured(char),
    /// File I/O error (std only)
    #[cfg(feature = "std")]
    IoError(heapless::String<128>),
}

impl fmt::Display for Error {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Error::Parse(e) => write!(f, "Parse error: {}", e),
            Error::Axis(e) => write!(f, "Axis error: {}", e),
            Error::Motion(e) => write!(f, "Motion error: {}", e),
            Error::Config(e) => write!(f, "Configuration error: {}", e),
            Error::ProgramEnd => write!(f, "M02 received, end of program"),
        }
    }
}

impl fmt::Display for ParseError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ParseError::MalformedWord { letter } => {
                write!(f, "Malformed number after '{}'", letter)
            }
            ParseError::UnknownCommand { letter, number } => {
                write!(f, "Unknown command {}{}", letter, number)
            }
            ParseError::UnexpectedWord(letter) => {
                write!(f, "Unexpected word letter '{}'", letter)
            }
            ParseError::NoModalCommand => {
                write!(f, "Parameters without command and no modal G-code set")
            }
            ParseError::TooManyWords => {
                write!(f, "Too many command words on one line (max 8)")
            }
        }
    }
}

impl fmt::Display for AxisError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            AxisError::BoundaryExceeded { position, min, max } => {
                write!(
                    f,
                    "Boundary reached: {} <= {} <= {} not true",
                    min, position, max
                )
            }
            AxisError::Pin => write!(f, "digital output operation failed"),
        }
    }
}

impl fmt::Display for MotionError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            MotionError::ZeroRadius => write!(f, "Arc with zero radius"),
            MotionError::DegenerateArc => {
                write!(f, "Arc center coincides with an endpoint")
            }
            MotionError::UnreachableTarget { chord, radius } => {
                write!(
                    f,
                    "Arc endpoints {} apart not reachable with radius {}",
                    chord, radius
                )
            }
            MotionError::DriftExceeded { drift, limit } => {
                write!(
                    f,
                    "Position drift {} exceeds tolerance {}",
                    drift, limit
                )
            }
        }
    }
}

impl fmt::Display for ConfigError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ConfigError::ParseError(msg) => write!(f, "Parse error: {}", msg),
            ConfigError::InvalidResolution(v) => {
                write!(f, "Invalid resolution: {}. Must be > 0", v)
            }
            ConfigError::InvalidBounds { min, max } => {
                write!(f, "Invalid bounds: min ({}) must be < max ({})", min, max)
            }
            ConfigError::InvalidStepDelay(v) => {
                write!(f, "Invalid step delay: {}. Must be >= 0", v)
            }
            ConfigError::InvalidSpeed(v) => {
                write!(f, "Invalid default speed: {}. Must be > 0", v)
            }
            ConfigError::InvalidAnchorGeometry {
                width,
                height,
                scale,
            } => {
                write!(
                    f,
                    "Invalid anchor geometry: width={}, height={}, scale={}. All must be > 0",
                    width, height, scale
                )
            }
            ConfigError::AxisNotConfigured(axis) => {
                write!(f, "Axis '{}' not found in configuration", axis)
            }
            #[cfg(feature = "std")]
            ConfigError::IoError(msg) => write!(f, "I/O error: {}", msg),
        }
    }
}

// Conversion impls
impl From<ParseError> for Error {
    fn from(e: ParseError) -> Self {
        Error::Parse(e)
    }
}

impl From<AxisError> for Error {
    fn from(e: AxisError) -> Self {
        Error::Axis(e)
    }
}

impl From<MotionError> for Error {
    fn from(e: MotionError) -> Self {
        Error::Motion(e)
    }
}

impl From<ConfigError> for Error {
    fn from(e: ConfigError) -> Self {
        Error::Config(e)
    }
}

impl Error {
    /// Whether this is the normal M02 completion signal rather than a fault.
    #[inline]
    pub fn is_program_end(&self) -> bool {
        matches!(self, Error::ProgramEnd)
    }
}

#[cfg(feature = "std")]
impl std::error::Error for Error {}

#[cfg(feature = "std")]
impl std::error::Error for ParseError {}

#[cfg(feature = "std")]
impl std::error::Error for AxisError {}

#[cfg(feature = "std")]
impl std::error::Error for MotionError {}

#[cfg(feature = "std")]
impl std::error::Error for ConfigError {}
