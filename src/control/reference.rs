//! Reference value and the 4-digit serial entry protocol.
//!
//! The operator types four decimal digits; they are weighted 1000, 100, 10
//! and 1 and the sum becomes the new reference once the fourth digit lands.
//! Partial entries are never visible outside [`DigitEntry`].

/// Number of keystrokes in one reference entry.
pub const ENTRY_DIGITS: u8 = 4;

/// Place value of each keystroke, in entry order.
const PLACE_VALUES: [i16; ENTRY_DIGITS as usize] = [1000, 100, 10, 1];

// ---------------------------------------------------------------------------
// Reference
// ---------------------------------------------------------------------------

/// The setpoint the control law tracks.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Reference {
    value: i16,
}

impl Reference {
    pub const fn new(value: i16) -> Self {
        Self { value }
    }

    pub fn value(&self) -> i16 {
        self.value
    }

    /// Replace the value with a completed entry.
    pub fn commit(&mut self, value: i16) {
        self.value = value;
    }

    /// Negate the reference (`+x` ⇄ `-x`). Saturates at `i16::MIN`, which the
    /// entry protocol cannot produce.
    pub fn flip_sign(&mut self) {
        self.value = self.value.saturating_neg();
    }
}

// ---------------------------------------------------------------------------
// Digit entry
// ---------------------------------------------------------------------------

/// Progress of a reference entry.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EntryProgress {
    /// Digit stored; `received` keystrokes of the current entry so far.
    Pending { received: u8 },
    /// Fourth digit consumed; carries the composed value.
    Complete(i16),
}

/// Accumulates keystrokes until a full entry is available.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct DigitEntry {
    digits_received: u8,
    accumulator: i16,
}

impl DigitEntry {
    pub const fn new() -> Self {
        Self {
            digits_received: 0,
            accumulator: 0,
        }
    }

    pub fn digits_received(&self) -> u8 {
        self.digits_received
    }

    /// Feed one decimal digit (`0..=9`).
    ///
    /// The first digit of an entry starts a fresh accumulator; the fourth
    /// completes it and resets the counter.
    pub fn accept_digit(&mut self, digit: u8) -> EntryProgress {
        debug_assert!(digit <= 9, "digit out of range: {digit}");
        let weighted = i16::from(digit.min(9)) * PLACE_VALUES[self.digits_received as usize];

        if self.digits_received == 0 {
            self.accumulator = weighted;
        } else {
            self.accumulator += weighted;
        }
        self.digits_received += 1;

        if self.digits_received == ENTRY_DIGITS {
            let value = self.accumulator;
            self.reset();
            EntryProgress::Complete(value)
        } else {
            EntryProgress::Pending {
                received: self.digits_received,
            }
        }
    }

    /// Discard any in-progress entry.
    pub fn reset(&mut self) {
        self.digits_received = 0;
        self.accumulator = 0;
    }
}
