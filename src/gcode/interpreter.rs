//! Line interpreter with modal state tracking.
//!
//! One logical line is normalized, tokenized into letter+number words and
//! resolved into zero or more [`Dispatch`] values. The interpreter never
//! executes motion itself; semantics live in the controller.

use heapless::Vec;
use serde::Deserialize;

use crate::error::{ParseError, Result};

use super::command::{Code, Dispatch};
use super::params::ParamSet;

/// Upper bound on dispatches produced by a single line.
pub const MAX_DISPATCHES_PER_LINE: usize = 8;

/// How the interpreter reacts to an unparseable line.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ParsePolicy {
    /// Halt on the offending line.
    #[default]
    Strict,
    /// Log and skip the offending line (program parsing only).
    Permissive,
}

/// G-code line interpreter.
///
/// Tracks the last invoked modal G-code so bare-parameter lines re-invoke it
/// with the new parameters.
#[derive(Debug, Default)]
pub struct Interpreter {
    last_g_code: Option<Code>,
    policy: ParsePolicy,
}

impl Interpreter {
    /// Create an interpreter with the default strict policy.
    pub fn new() -> Self {
        Self::default()
    }

    /// Create an interpreter with an explicit parse policy.
    pub fn with_policy(policy: ParsePolicy) -> Self {
        Self {
            last_g_code: None,
            policy,
        }
    }

    /// The currently remembered modal G-code, if any.
    #[inline]
    pub fn modal_code(&self) -> Option<Code> {
        self.last_g_code
    }

    /// Parse one logical line into its dispatches.
    ///
    /// Blank lines and `%` marker lines yield an empty dispatch list;
    /// `(...)` comments are skipped whether they cover the whole line or sit
    /// between words. Immediate F/S/T words come first, then each G/M
    /// command in left-to-right order with the full parameter set of the
    /// line; a line with parameters but no command re-dispatches the modal
    /// G-code.
    pub fn parse_line(&mut self, raw: &str) -> Result<Vec<Dispatch, MAX_DISPATCHES_PER_LINE>> {
        let mut out: Vec<Dispatch, MAX_DISPATCHES_PER_LINE> = Vec::new();
        let line = raw.trim();
        if line.is_empty() {
            return Ok(out);
        }
        let bytes = line.as_bytes();
        if bytes[0] == b'%' {
            log::debug!("skipping marker line: {}", line);
            return Ok(out);
        }
        if bytes[0] == b'(' {
            log::info!("comment: {}", line);
            return Ok(out);
        }

        let mut params = ParamSet::new();
        let mut codes: Vec<Code, MAX_DISPATCHES_PER_LINE> = Vec::new();
        let mut i = 0;
        while i < bytes.len() {
            if bytes[i].is_ascii_whitespace() {
                i += 1;
                continue;
            }
            if bytes[i] == b'(' {
                // inline comment, runs to the closing parenthesis
                match bytes[i..].iter().position(|&b| b == b')') {
                    Some(offset) => {
                        i += offset + 1;
                        continue;
                    }
                    None => {
                        log::warn!("unterminated comment ignored: {}", line);
                        break;
                    }
                }
            }
            let letter = bytes[i].to_ascii_uppercase() as char;
            if !letter.is_ascii_alphabetic() {
                return Err(ParseError::UnexpectedWord(letter).into());
            }
            i += 1;
            let (number, consumed) = scan_number(&bytes[i..])
                .ok_or(ParseError::MalformedWord { letter })?;
            i += consumed;

            match letter {
                'G' | 'M' => {
                    codes
                        .push(Code::from_word(letter, number)?)
                        .map_err(|_| ParseError::TooManyWords)?;
                }
                'F' => push(&mut out, Dispatch::FeedRate(number))?,
                'S' => push(&mut out, Dispatch::SpindleSpeed(number))?,
                'T' => push(&mut out, Dispatch::ToolSelect(number))?,
                l if ParamSet::is_param_letter(l) => params.insert(l, number),
                other => return Err(ParseError::UnexpectedWord(other).into()),
            }
        }

        if codes.is_empty() {
            if !params.is_empty() {
                // modal carry-over: re-invoke the last G-code
                let modal = self.last_g_code.ok_or(ParseError::NoModalCommand)?;
                log::debug!("modal carry-over, re-dispatching {}", modal.mnemonic());
                push(
                    &mut out,
                    Dispatch::Command {
                        code: modal,
                        params,
                    },
                )?;
            }
            return Ok(out);
        }

        for code in codes {
            if code.is_modal() {
                self.last_g_code = Some(code);
            }
            push(
                &mut out,
                Dispatch::Command {
                    code,
                    params: params.clone(),
                },
            )?;
        }
        Ok(out)
    }
}

fn push(
    out: &mut Vec<Dispatch, MAX_DISPATCHES_PER_LINE>,
    dispatch: Dispatch,
) -> Result<()> {
    out.push(dispatch).map_err(|_| ParseError::TooManyWords)?;
    Ok(())
}

/// Scan an optionally signed decimal number at the start of `bytes`.
///
/// Returns the value and the number of bytes consumed, or `None` if no valid
/// number is present.
fn scan_number(bytes: &[u8]) -> Option<(f64, usize)> {
    let mut end = 0;
    if end < bytes.len() && (bytes[end] == b'+' || bytes[end] == b'-') {
        end += 1;
    }
    let digits_start = end;
    while end < bytes.len() && (bytes[end].is_ascii_digit() || bytes[end] == b'.') {
        end += 1;
    }
    if end == digits_start {
        return None;
    }
    let text = core::str::from_utf8(&bytes[..end]).ok()?;
    let value: f64 = text.parse().ok()?;
    Some((value, end))
}

/// A fully parsed program: the ordered, append-only dispatch queue.
///
/// Built during parse, drained strictly in order during execution. Command
/// order encodes position-dependent semantics, so no reordering is ever
/// permitted.
#[cfg(feature = "std")]
#[derive(Debug, Clone, Default)]
pub struct Program {
    dispatches: std::vec::Vec<Dispatch>,
}

#[cfg(feature = "std")]
impl Program {
    /// Iterate the dispatches in program order.
    pub fn iter(&self) -> impl Iterator<Item = &Dispatch> {
        self.dispatches.iter()
    }

    /// Number of dispatches in the program.
    pub fn len(&self) -> usize {
        self.dispatches.len()
    }

    /// Whether the program is empty.
    pub fn is_empty(&self) -> bool {
        self.dispatches.is_empty()
    }
}

#[cfg(feature = "std")]
impl Interpreter {
    /// Parse a whole program text into an ordered dispatch queue.
    ///
    /// With [`ParsePolicy::Permissive`] an unparseable line is logged and
    /// skipped; with [`ParsePolicy::Strict`] parsing halts on it.
    pub fn parse_program(&mut self, text: &str) -> Result<Program> {
        let mut program = Program::default();
        for (index, line) in text.lines().enumerate() {
            match self.parse_line(line) {
                Ok(dispatches) => program.dispatches.extend(dispatches),
                Err(e) => match self.policy {
                    ParsePolicy::Strict => return Err(e),
                    ParsePolicy::Permissive => {
                        log::warn!("skipping line {}: {}", index + 1, e);
                    }
                },
            }
        }
        Ok(program)
    }

    /// Read and parse a program file.
    pub fn parse_file<P: AsRef<std::path::Path>>(&mut self, path: P) -> Result<Program> {
        let text = std::fs::read_to_string(path.as_ref()).map_err(|e| {
            let msg = heapless::String::try_from(e.to_string().as_str()).unwrap_or_default();
            crate::error::ConfigError::IoError(msg)
        })?;
        self.parse_program(&text)
    }
}
