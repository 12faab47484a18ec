//! Pluggable actuation law.
//!
//! The firmware ships without a feedback law; the application plugs in its
//! own.
//! Anything implementing [`ActuationLaw`] can be handed to
//! [`ControlService::new`](crate::app::service::ControlService::new),
//! including a plain closure.

use super::sampling::Sample;

/// Maps the current reference and the latest sample to an actuator command.
pub trait ActuationLaw {
    fn compute_actuation(&mut self, reference: i16, measurement: Sample) -> i16;
}

impl<F> ActuationLaw for F
where
    F: FnMut(i16, Sample) -> i16,
{
    fn compute_actuation(&mut self, reference: i16, measurement: Sample) -> i16 {
        self(reference, measurement)
    }
}

/// Holds the actuator at its neutral command. Default until a real law is
/// plugged in.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct NeutralLaw {
    neutral: i16,
}

impl NeutralLaw {
    pub const fn new(neutral: i16) -> Self {
        Self { neutral }
    }
}

impl ActuationLaw for NeutralLaw {
    fn compute_actuation(&mut self, _reference: i16, _measurement: Sample) -> i16 {
        self.neutral
    }
}
