//! Operator UART receive task.
//!
//! A dedicated thread blocks on the UART driver and forwards every received
//! byte to the foreground loop as [`ControlEvent::ByteReceived`]. Bytes are
//! never interpreted here; classification happens in the control task so
//! that it is serialised with the sampling cycle.
//!
//! Operator bytes are never dropped: a lost digit would shift every later
//! reference entry. When the queue is full the task waits for the
//! foreground loop to drain it while the UART driver buffers input.

use std::time::Duration;

use log::debug;

use super::hw_init;
use crate::error::{PeripheralError, Result};
use crate::events::{ControlEvent, EVENTS, EventQueue};

/// Read chunk size. At 38400 baud a 20 ms poll collects ~77 bytes at most.
const RX_CHUNK: usize = 64;
/// How long one driver read waits for data.
const RX_TIMEOUT_MS: u32 = 20;
/// Back-off while the event queue is full.
const QUEUE_FULL_BACKOFF: Duration = Duration::from_millis(1);
const RX_TASK_STACK: usize = 4096;

/// Queue each byte in order. Returns how many did not fit.
pub fn forward_bytes(queue: &EventQueue, bytes: &[u8]) -> usize {
    bytes
        .iter()
        .filter(|&&b| !queue.push(ControlEvent::ByteReceived(b)))
        .count()
}

/// Queue each byte in order, calling `wait` whenever the queue is full
/// until the byte fits. Returns how many times it had to wait.
pub fn forward_bytes_blocking(
    queue: &EventQueue,
    bytes: &[u8],
    mut wait: impl FnMut(),
) -> usize {
    let mut waits = 0;
    for &b in bytes {
        let mut event = ControlEvent::ByteReceived(b);
        while let Err(back) = queue.try_push(event) {
            event = back;
            waits += 1;
            wait();
        }
    }
    waits
}

/// Spawn the receive task. It runs until power-down.
pub fn spawn_receiver() -> Result<()> {
    std::thread::Builder::new()
        .name("uart_rx".into())
        .stack_size(RX_TASK_STACK)
        .spawn(|| {
            let mut buf = [0u8; RX_CHUNK];
            loop {
                let n = hw_init::uart_read(&mut buf, RX_TIMEOUT_MS);
                if n == 0 {
                    continue;
                }
                let waits = forward_bytes_blocking(&EVENTS, &buf[..n], || {
                    std::thread::sleep(QUEUE_FULL_BACKOFF);
                });
                if waits > 0 {
                    debug!("uart_rx: event queue full, waited {} ms", waits);
                }
            }
        })
        .map(|_| ())
        .map_err(|_| PeripheralError::TaskSpawnFailed.into())
}
