//! Log-based event sink adapter.
//!
//! Implements [`EventSink`] by writing application events to the ESP-IDF
//! logger (console UART / USB-CDC in production). The operator link is a
//! separate UART, so log output never interleaves with report lines.

use log::{debug, info};

use crate::app::events::AppEvent;
use crate::app::ports::EventSink;

/// Adapter that logs every [`AppEvent`].
pub struct LogEventSink;

impl LogEventSink {
    pub fn new() -> Self {
        Self
    }
}

impl Default for LogEventSink {
    fn default() -> Self {
        Self::new()
    }
}

impl EventSink for LogEventSink {
    fn emit(&mut self, event: &AppEvent) {
        match event {
            AppEvent::Booted { reference } => {
                info!("BOOT  | reference={} actuator=neutral", reference);
            }
            AppEvent::Started => {
                info!("START | controller on");
            }
            AppEvent::Stopped { discarded_digits } => {
                if *discarded_digits > 0 {
                    info!(
                        "STOP  | controller off, {} pending digit(s) discarded",
                        discarded_digits
                    );
                } else {
                    info!("STOP  | controller off");
                }
            }
            AppEvent::DigitAccepted { digit, received } => {
                debug!("ENTRY | digit {} ({}/4)", digit, received);
            }
            AppEvent::ReferenceCommitted { value } => {
                info!("REF   | committed {}", value);
            }
            AppEvent::ReferenceFlipped { value } => {
                info!("REF   | sign flipped -> {}", value);
            }
            AppEvent::Sampled { sample, command } => {
                debug!(
                    "TICK  | ch{}={} cmd={}",
                    sample.channel.index(),
                    sample.raw,
                    command
                );
            }
        }
    }
}
