//! Command codes and dispatch values.
//!
//! The supported G/M command set is a closed enum; unknown codes surface as
//! [`ParseError::UnknownCommand`](crate::error::ParseError::UnknownCommand)
//! instead of being silently dropped.

use crate::error::ParseError;

use super::params::ParamSet;

/// A supported G or M command code.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Code {
    /// G00: rapid motion
    Rapid,
    /// G01: linear motion at feed speed
    Linear,
    /// G02: clockwise circular/helical motion
    ArcCw,
    /// G03: counter-clockwise circular/helical motion
    ArcCcw,
    /// G04: dwell for P seconds
    Dwell,
    /// G17: XY plane selection (inert, machine is always XY)
    PlaneXy,
    /// G18: XZ plane selection (inert)
    PlaneXz,
    /// G19: YZ plane selection (inert)
    PlaneYz,
    /// G20: inch units (inert, machine is always metric)
    Inches,
    /// G21: millimeter units (inert)
    Millimeters,
    /// G54: work coordinate system selection (inert, single system)
    WorkOffset,
    /// G90: absolute distance mode
    Absolute,
    /// G91: incremental distance mode
    Incremental,
    /// G94: units-per-minute feed mode (inert)
    FeedPerMinute,
    /// M02: end of program
    ProgramEnd,
    /// M03: start tool clockwise, optional S speed
    SpindleCw,
    /// M04: start tool counter-clockwise, optional S speed
    SpindleCcw,
    /// M05: stop tool
    SpindleStop,
    /// M06: tool change (inert)
    ToolChange,
    /// M07: mist coolant on (inert, no coolant output exists)
    MistCoolantOn,
    /// M08: flood coolant on (inert)
    FloodCoolantOn,
    /// M09: coolant off (inert)
    CoolantOff,
}

impl Code {
    /// Resolve a `G`/`M` word into a command code.
    pub fn from_word(letter: char, number: f64) -> Result<Self, ParseError> {
        let rounded = libm::round(number);
        if (number - rounded).abs() > 1e-9 || !(0.0..=99.0).contains(&rounded) {
            return Err(ParseError::UnknownCommand { letter, number });
        }
        let code = match (letter, rounded as u8) {
            ('G', 0) => Code::Rapid,
            ('G', 1) => Code::Linear,
            ('G', 2) => Code::ArcCw,
            ('G', 3) => Code::ArcCcw,
            ('G', 4) => Code::Dwell,
            ('G', 17) => Code::PlaneXy,
            ('G', 18) => Code::PlaneXz,
            ('G', 19) => Code::PlaneYz,
            ('G', 20) => Code::Inches,
            ('G', 21) => Code::Millimeters,
            ('G', 54) => Code::WorkOffset,
            ('G', 90) => Code::Absolute,
            ('G', 91) => Code::Incremental,
            ('G', 94) => Code::FeedPerMinute,
            ('M', 2) => Code::ProgramEnd,
            ('M', 3) => Code::SpindleCw,
            ('M', 4) => Code::SpindleCcw,
            ('M', 5) => Code::SpindleStop,
            ('M', 6) => Code::ToolChange,
            ('M', 7) => Code::MistCoolantOn,
            ('M', 8) => Code::FloodCoolantOn,
            ('M', 9) => Code::CoolantOff,
            _ => return Err(ParseError::UnknownCommand { letter, number }),
        };
        Ok(code)
    }

    /// Whether this code becomes the modal command for bare-parameter lines.
    ///
    /// Only G-codes are modal; M-codes and immediates are not.
    #[inline]
    pub fn is_modal(&self) -> bool {
        !matches!(
            self,
            Code::ProgramEnd
                | Code::SpindleCw
                | Code::SpindleCcw
                | Code::SpindleStop
                | Code::ToolChange
                | Code::MistCoolantOn
                | Code::FloodCoolantOn
                | Code::CoolantOff
        )
    }

    /// Canonical mnemonic for logging.
    pub fn mnemonic(&self) -> &'static str {
        match self {
            Code::Rapid => "G00",
            Code::Linear => "G01",
            Code::ArcCw => "G02",
            Code::ArcCcw => "G03",
            Code::Dwell => "G04",
            Code::PlaneXy => "G17",
            Code::PlaneXz => "G18",
            Code::PlaneYz => "G19",
            Code::Inches => "G20",
            Code::Millimeters => "G21",
            Code::WorkOffset => "G54",
            Code::Absolute => "G90",
            Code::Incremental => "G91",
            Code::FeedPerMinute => "G94",
            Code::ProgramEnd => "M02",
            Code::SpindleCw => "M03",
            Code::SpindleCcw => "M04",
            Code::SpindleStop => "M05",
            Code::ToolChange => "M06",
            Code::MistCoolantOn => "M07",
            Code::FloodCoolantOn => "M08",
            Code::CoolantOff => "M09",
        }
    }
}

/// One unit of work handed from the interpreter to the controller.
///
/// Immediate F/S/T words are dispatched on their own ahead of the G/M
/// commands found on the same line.
#[derive(Debug, Clone, PartialEq)]
pub enum Dispatch {
    /// A G/M command with the parameter set collected from its line.
    Command {
        /// The resolved command code
        code: Code,
        /// Parameters collected from the same line
        params: ParamSet,
    },
    /// F word: set feed rate.
    FeedRate(f64),
    /// S word: set tool speed.
    SpindleSpeed(f64),
    /// T word: tool selection (logged, no physical effect).
    ToolSelect(f64),
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_known_codes() {
        assert_eq!(Code::from_word('G', 0.0).unwrap(), Code::Rapid);
        assert_eq!(Code::from_word('G', 2.0).unwrap(), Code::ArcCw);
        assert_eq!(Code::from_word('G', 91.0).unwrap(), Code::Incremental);
        assert_eq!(Code::from_word('M', 2.0).unwrap(), Code::ProgramEnd);
        assert_eq!(Code::from_word('M', 5.0).unwrap(), Code::SpindleStop);
    }

    #[test]
    fn test_unknown_codes() {
        assert_eq!(
            Code::from_word('G', 99.0),
            Err(ParseError::UnknownCommand {
                letter: 'G',
                number: 99.0
            })
        );
        assert!(Code::from_word('G', 2.5).is_err());
        assert!(Code::from_word('M', 30.0).is_err());
    }

    #[test]
    fn test_modality() {
        assert!(Code::Rapid.is_modal());
        assert!(Code::ArcCcw.is_modal());
        assert!(Code::PlaneXy.is_modal());
        assert!(!Code::ProgramEnd.is_modal());
        assert!(!Code::SpindleCw.is_modal());
    }
}
