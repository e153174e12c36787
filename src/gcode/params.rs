//! Axis/offset parameter sets extracted from command lines.

use heapless::FnvIndexMap;

/// Letters recognized as axis/offset parameters on a command line.
pub(crate) const PARAM_LETTERS: [char; 14] = [
    'X', 'Y', 'Z', 'I', 'J', 'K', 'P', 'R', 'U', 'V', 'W', 'A', 'B', 'C',
];

/// Ordered set of letter → value parameters from one command line.
///
/// Keys are unique per line; the first occurrence of a letter wins, so a
/// letter already consumed as a parameter can never be re-read as a command
/// code.
#[derive(Debug, Clone, Default)]
pub struct ParamSet {
    map: FnvIndexMap<u8, f64, 16>,
}

impl PartialEq for ParamSet {
    fn eq(&self, other: &Self) -> bool {
        self.map.len() == other.map.len()
            && self
                .map
                .iter()
                .all(|(k, v)| other.map.get(k).is_some_and(|w| v == w))
    }
}

impl ParamSet {
    /// Create an empty parameter set.
    pub fn new() -> Self {
        Self {
            map: FnvIndexMap::new(),
        }
    }

    /// Whether `letter` is in the recognized parameter alphabet.
    #[inline]
    pub fn is_param_letter(letter: char) -> bool {
        PARAM_LETTERS.contains(&letter)
    }

    /// Get the value for a letter, if present.
    #[inline]
    pub fn get(&self, letter: char) -> Option<f64> {
        self.map.get(&(letter as u8)).copied()
    }

    /// Whether a letter is present.
    #[inline]
    pub fn contains(&self, letter: char) -> bool {
        self.map.contains_key(&(letter as u8))
    }

    /// Insert a value for a letter unless one is already present.
    pub fn insert(&mut self, letter: char, value: f64) {
        if !self.contains(letter) {
            // capacity 16 >= 14 recognized letters, cannot overflow
            let _ = self.map.insert(letter as u8, value);
        }
    }

    /// Number of parameters present.
    #[inline]
    pub fn len(&self) -> usize {
        self.map.len()
    }

    /// Whether the set is empty.
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.map.is_empty()
    }
}
