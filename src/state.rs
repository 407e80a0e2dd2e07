//! Item state and its bracket encoding
//!
//! Each tracked index carries two independent flags, obtained and reviewed.
//! On disk an index is written as `<open><digits><close>`; the opening
//! character alone carries the state. The closing character is written to
//! match but is ignored when reading, so hand-edited names such as `[7-`
//! still decode.

use serde::Serialize;

/// Opening characters, indexed by state bits.
pub const OPEN_CHARS: [char; 4] = ['-', '[', '!', '$'];

/// Closing characters, indexed by state bits.
pub const CLOSE_CHARS: [char; 4] = ['-', ']', '!', '$'];

/// Highest index a series can hold.
pub const MAX_INDEX: u32 = 99_999;

/// Packed obtained/reviewed flags of one index
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize)]
pub enum StateValue {
    #[default]
    None,
    Got,
    Seen,
    GotSeen,
}

/// One of the two independent flags of a [`StateValue`]
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StateFlag {
    Obtained,
    Reviewed,
}

impl StateFlag {
    fn bit(self) -> u8 {
        match self {
            StateFlag::Obtained => 1,
            StateFlag::Reviewed => 2,
        }
    }
}

impl StateValue {
    pub const ALL: [StateValue; 4] = [
        StateValue::None,
        StateValue::Got,
        StateValue::Seen,
        StateValue::GotSeen,
    ];

    pub fn bits(self) -> u8 {
        match self {
            StateValue::None => 0,
            StateValue::Got => 1,
            StateValue::Seen => 2,
            StateValue::GotSeen => 3,
        }
    }

    pub fn from_bits(bits: u8) -> Self {
        match bits & 3 {
            0 => StateValue::None,
            1 => StateValue::Got,
            2 => StateValue::Seen,
            _ => StateValue::GotSeen,
        }
    }

    pub fn obtained(self) -> bool {
        self.has(StateFlag::Obtained)
    }

    pub fn reviewed(self) -> bool {
        self.has(StateFlag::Reviewed)
    }

    pub fn has(self, flag: StateFlag) -> bool {
        self.bits() & flag.bit() != 0
    }

    pub fn with(self, flag: StateFlag) -> Self {
        Self::from_bits(self.bits() | flag.bit())
    }

    pub fn without(self, flag: StateFlag) -> Self {
        Self::from_bits(self.bits() & !flag.bit())
    }

    /// Bitwise union, used when several files mention the same index.
    pub fn merge(self, other: StateValue) -> Self {
        Self::from_bits(self.bits() | other.bits())
    }

    pub fn open_char(self) -> char {
        OPEN_CHARS[self.bits() as usize]
    }

    pub fn close_char(self) -> char {
        CLOSE_CHARS[self.bits() as usize]
    }

    /// State named by an opening character, if it is one.
    pub fn from_open_char(c: char) -> Option<Self> {
        OPEN_CHARS
            .iter()
            .position(|&open| open == c)
            .map(|bits| Self::from_bits(bits as u8))
    }
}

/// Encode one index as a bracketed run, zero-padded to `width` digits.
pub fn encode(index: u32, state: StateValue, width: usize) -> String {
    format!(
        "{}{:0width$}{}",
        state.open_char(),
        index,
        state.close_char(),
        width = width
    )
}

/// Number of decimal digits needed to print `n`.
pub fn digit_width(n: u32) -> usize {
    n.to_string().len()
}

/// Decode a string made entirely of runs.
///
/// Returns `None` unless the whole input is one or more well-formed runs.
pub fn decode(runs: &str) -> Option<Vec<(u32, StateValue)>> {
    let mut decoded = Vec::new();
    let mut rest = runs;

    while !rest.is_empty() {
        let state = StateValue::from_open_char(rest.chars().next()?)?;
        let body = &rest[1..];
        let digits_len = body.bytes().take_while(u8::is_ascii_digit).count();
        if digits_len == 0 {
            return None;
        }
        let index: u32 = body[..digits_len].parse().ok()?;
        let close = body[digits_len..].chars().next()?;
        if !CLOSE_CHARS.contains(&close) {
            return None;
        }
        decoded.push((index, state));
        rest = &body[digits_len + close.len_utf8()..];
    }

    if decoded.is_empty() {
        None
    } else {
        Some(decoded)
    }
}
