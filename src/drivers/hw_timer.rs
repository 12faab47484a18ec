//! Periodic sampling timer using ESP-IDF's esp_timer API.
//!
//! The callback pushes one [`ControlEvent::Tick`] per period into the
//! shared [`EVENTS`] queue. Timer callbacks execute in the ESP timer task
//! context (not ISR), and `EventQueue::push` never blocks, so a slow
//! foreground loop costs dropped ticks rather than a stalled timer task.

#[cfg(target_os = "espidf")]
use crate::error::PeripheralError;
use crate::error::Result;
use crate::events::{ControlEvent, EVENTS};

#[cfg(target_os = "espidf")]
use esp_idf_svc::sys::*;

#[cfg(target_os = "espidf")]
use log::info;

#[cfg(target_os = "espidf")]
static mut SAMPLE_TIMER: esp_timer_handle_t = core::ptr::null_mut();

/// SAFETY: SAMPLE_TIMER is written once in `start_timer()` before the
/// timer is started. Only called from the single main task.
#[cfg(target_os = "espidf")]
unsafe fn sample_timer() -> esp_timer_handle_t {
    unsafe { SAMPLE_TIMER }
}

#[cfg(target_os = "espidf")]
unsafe extern "C" fn sample_tick_cb(_arg: *mut core::ffi::c_void) {
    on_timer_fired();
}

/// Body of the timer callback. Returns `false` if the tick was dropped.
pub fn on_timer_fired() -> bool {
    EVENTS.push(ControlEvent::Tick)
}

/// Start the periodic sampling timer.
#[cfg(target_os = "espidf")]
pub fn start_timer(period_ms: u32) -> Result<()> {
    // SAFETY: SAMPLE_TIMER is written here once at boot from the single
    // main-task context before any timer callbacks fire. The callback only
    // pushes to the event queue.
    unsafe {
        let args = esp_timer_create_args_t {
            callback: Some(sample_tick_cb),
            arg: core::ptr::null_mut(),
            dispatch_method: esp_timer_dispatch_t_ESP_TIMER_TASK,
            name: c"sample".as_ptr(),
            skip_unhandled_events: true,
        };
        let ret = esp_timer_create(&args, &raw mut SAMPLE_TIMER);
        if ret != ESP_OK as i32 {
            return Err(PeripheralError::TimerInitFailed(ret).into());
        }
        let ret = esp_timer_start_periodic(sample_timer(), u64::from(period_ms) * 1_000);
        if ret != ESP_OK as i32 {
            return Err(PeripheralError::TimerInitFailed(ret).into());
        }
    }

    info!("hw_timer: sampling timer started ({} ms)", period_ms);
    Ok(())
}

#[cfg(not(target_os = "espidf"))]
pub fn start_timer(period_ms: u32) -> Result<()> {
    log::info!(
        "hw_timer(sim): timer not started ({} ms period); push ticks via on_timer_fired()",
        period_ms
    );
    Ok(())
}
