//! Sensor channel alternation and the serial report format.
//!
//! Each tick samples one of the two analog inputs, alternating strictly.
//! Every sample is reported to the operator as
//!
//! ```text
//! <tag>:DDDD\n        p:0512\n   a:-0031\n
//! ```
//!
//! `p` tags channel 0 (ball position) and `a` tags channel 1 (beam angle).
//! All report lines end in `\n`; the magnitude is always four digits.

use core::fmt::Write;

/// Largest magnitude that fits the four-digit report field.
const REPORT_MAX: u16 = 9999;

/// `tag` + `:` + optional sign + 4 digits + `\n`.
pub const REPORT_LINE_CAP: usize = 8;

/// One rendered report line.
pub type ReportLine = heapless::String<REPORT_LINE_CAP>;

/// One of the two analog inputs.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[repr(u8)]
pub enum Channel {
    /// Ball position on the beam.
    Zero = 0,
    /// Beam angle.
    One = 1,
}

impl Channel {
    pub fn index(self) -> u8 {
        self as u8
    }

    /// Single-character tag used in serial reports.
    pub fn tag(self) -> char {
        match self {
            Self::Zero => 'p',
            Self::One => 'a',
        }
    }

    /// The other channel.
    pub fn toggled(self) -> Self {
        match self {
            Self::Zero => Self::One,
            Self::One => Self::Zero,
        }
    }
}

/// Which channel the next tick samples.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SampleChannel {
    active: Channel,
}

impl Default for SampleChannel {
    fn default() -> Self {
        Self::new()
    }
}

impl SampleChannel {
    pub const fn new() -> Self {
        Self {
            active: Channel::Zero,
        }
    }

    pub fn active(&self) -> Channel {
        self.active
    }

    /// Return the channel to sample this tick and toggle for the next one.
    pub fn advance(&mut self) -> Channel {
        let current = self.active;
        self.active = current.toggled();
        current
    }

    /// Back to channel 0.
    pub fn reset(&mut self) {
        self.active = Channel::Zero;
    }
}

/// A raw reading taken on one channel.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Sample {
    pub channel: Channel,
    pub raw: i16,
}

impl Sample {
    /// Render the report line for this sample.
    pub fn report_line(&self) -> ReportLine {
        let mut line = ReportLine::new();
        let sign = if self.raw < 0 { "-" } else { "" };
        let magnitude = self.raw.unsigned_abs().min(REPORT_MAX);
        // Capacity covers the longest possible line.
        let _ = writeln!(line, "{}:{}{:04}", self.channel.tag(), sign, magnitude);
        line
    }
}
