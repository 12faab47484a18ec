//! One-shot hardware peripheral initialization and raw accessors.
//!
//! Configures ADC1, the actuator LEDC channel and the operator UART using
//! raw ESP-IDF sys calls. Called once from `main()` before the event loop
//! starts.
//!
//! ## Dual-target design
//!
//! On ESP-IDF: touches the real peripherals.
//! On host/test: ADC readings come from injectable atomics, the LEDC duty is
//! latched in an atomic, and UART traffic is discarded.

#[cfg(target_os = "espidf")]
use esp_idf_svc::sys::*;

#[cfg(target_os = "espidf")]
use log::info;

use crate::config::ControllerConfig;
use crate::error::Result;
#[cfg(target_os = "espidf")]
use crate::error::PeripheralError;
#[cfg(target_os = "espidf")]
use crate::pins;

/// Validate `config` and bring up ADC1, the actuator LEDC channel and the
/// operator UART.
#[cfg(target_os = "espidf")]
pub fn init_peripherals(config: &ControllerConfig) -> Result<()> {
    config.validate()?;
    // SAFETY: Called once from main() before event loop; single-threaded.
    unsafe {
        init_adc()?;
        init_ledc()?;
        init_uart(config.baud_rate)?;
    }
    info!("hw_init: all peripherals configured");
    Ok(())
}

#[cfg(not(target_os = "espidf"))]
pub fn init_peripherals(config: &ControllerConfig) -> Result<()> {
    config.validate()?;
    log::info!(
        "hw_init(sim): peripheral init skipped (baud={})",
        config.baud_rate
    );
    Ok(())
}

// ── ADC (oneshot) ─────────────────────────────────────────────

#[cfg(target_os = "espidf")]
static mut ADC1_HANDLE: adc_oneshot_unit_handle_t = core::ptr::null_mut();

/// SAFETY: Must be called only from the single-threaded init path or the
/// main-loop ADC read path. `init_adc()` completes before the event loop
/// starts.
#[cfg(target_os = "espidf")]
unsafe fn adc1_handle() -> adc_oneshot_unit_handle_t {
    unsafe { ADC1_HANDLE }
}

#[cfg(target_os = "espidf")]
unsafe fn init_adc() -> core::result::Result<(), PeripheralError> {
    let init_cfg = adc_oneshot_unit_init_cfg_t {
        unit_id: adc_unit_t_ADC_UNIT_1,
        ulp_mode: adc_ulp_mode_t_ADC_ULP_MODE_DISABLE,
        ..Default::default()
    };
    // SAFETY: ADC1_HANDLE is only written here, once at boot.
    let ret = unsafe { adc_oneshot_new_unit(&init_cfg, &raw mut ADC1_HANDLE) };
    if ret != ESP_OK as i32 {
        return Err(PeripheralError::AdcInitFailed(ret));
    }

    let chan_cfg = adc_oneshot_chan_cfg_t {
        atten: adc_atten_t_ADC_ATTEN_DB_12,
        bitwidth: adc_bitwidth_t_ADC_BITWIDTH_12,
    };

    for channel in [pins::POSITION_ADC_CHANNEL, pins::ANGLE_ADC_CHANNEL] {
        let ret = unsafe { adc_oneshot_config_channel(adc1_handle(), channel, &chan_cfg) };
        if ret != ESP_OK as i32 {
            return Err(PeripheralError::AdcInitFailed(ret));
        }
    }

    info!(
        "hw_init: ADC1 configured (CH{}=position, CH{}=angle)",
        pins::POSITION_ADC_CHANNEL,
        pins::ANGLE_ADC_CHANNEL
    );
    Ok(())
}

/// Blocking 12-bit conversion on ADC1. A failed conversion returns the
/// ESP-IDF error code.
#[cfg(target_os = "espidf")]
pub fn adc1_read(channel: u32) -> core::result::Result<u16, i32> {
    let mut raw: i32 = 0;
    // SAFETY: adc1_handle() contract — single-threaded main-loop access only.
    let ret = unsafe { adc_oneshot_read(adc1_handle(), channel, &mut raw) };
    if ret != ESP_OK as i32 {
        return Err(ret);
    }
    Ok(raw.max(0) as u16)
}

#[cfg(not(target_os = "espidf"))]
static SIM_ADC: [core::sync::atomic::AtomicU16; 8] =
    [const { core::sync::atomic::AtomicU16::new(0) }; 8];

#[cfg(not(target_os = "espidf"))]
static SIM_ADC_FAULT: [core::sync::atomic::AtomicBool; 8] =
    [const { core::sync::atomic::AtomicBool::new(false) }; 8];

/// Inject the raw reading the next `adc1_read(channel)` returns.
#[cfg(not(target_os = "espidf"))]
pub fn sim_set_adc(channel: u32, raw: u16) {
    if let Some(slot) = SIM_ADC.get(channel as usize) {
        slot.store(raw, core::sync::atomic::Ordering::Relaxed);
    }
}

/// Make conversions on `channel` fail (`true`) or succeed again (`false`).
#[cfg(not(target_os = "espidf"))]
pub fn sim_fail_adc(channel: u32, fail: bool) {
    if let Some(slot) = SIM_ADC_FAULT.get(channel as usize) {
        slot.store(fail, core::sync::atomic::Ordering::Relaxed);
    }
}

/// Error code reported by a simulated conversion fault (`ESP_ERR_TIMEOUT`).
#[cfg(not(target_os = "espidf"))]
pub const SIM_ADC_FAULT_CODE: i32 = 0x107;

#[cfg(not(target_os = "espidf"))]
pub fn adc1_read(channel: u32) -> core::result::Result<u16, i32> {
    let idx = channel as usize;
    if SIM_ADC_FAULT
        .get(idx)
        .is_some_and(|f| f.load(core::sync::atomic::Ordering::Relaxed))
    {
        return Err(SIM_ADC_FAULT_CODE);
    }
    Ok(SIM_ADC
        .get(idx)
        .map_or(0, |slot| slot.load(core::sync::atomic::Ordering::Relaxed)))
}

// ── LEDC PWM ─────────────────────────────────────────────────

#[cfg(target_os = "espidf")]
unsafe fn init_ledc() -> core::result::Result<(), PeripheralError> {
    let timer = ledc_timer_config_t {
        speed_mode: ledc_mode_t_LEDC_LOW_SPEED_MODE,
        timer_num: ledc_timer_t_LEDC_TIMER_0,
        duty_resolution: ledc_timer_bit_t_LEDC_TIMER_10_BIT,
        freq_hz: pins::ACTUATOR_PWM_FREQ_HZ,
        clk_cfg: soc_periph_ledc_clk_src_legacy_t_LEDC_AUTO_CLK,
        ..Default::default()
    };
    // SAFETY: Called from single main-task context via init_peripherals().
    let ret = unsafe { ledc_timer_config(&timer) };
    if ret != ESP_OK as i32 {
        return Err(PeripheralError::LedcInitFailed(ret));
    }

    let ret = unsafe {
        ledc_channel_config(&ledc_channel_config_t {
            speed_mode: ledc_mode_t_LEDC_LOW_SPEED_MODE,
            channel: LEDC_CH_ACTUATOR,
            timer_sel: ledc_timer_t_LEDC_TIMER_0,
            gpio_num: pins::ACTUATOR_PWM_GPIO,
            duty: 0,
            hpoint: 0,
            ..Default::default()
        })
    };
    if ret != ESP_OK as i32 {
        return Err(PeripheralError::LedcInitFailed(ret));
    }

    info!(
        "hw_init: LEDC configured (actuator=CH{}, {} Hz, {}-bit)",
        LEDC_CH_ACTUATOR,
        pins::ACTUATOR_PWM_FREQ_HZ,
        pins::ACTUATOR_PWM_RESOLUTION_BITS
    );
    Ok(())
}

pub const LEDC_CH_ACTUATOR: u32 = 0;

#[cfg(target_os = "espidf")]
pub fn ledc_set(channel: u32, duty: u32) -> core::result::Result<(), i32> {
    // SAFETY: LEDC channels were configured in init_ledc(); duty register
    // writes are race-free since only the main loop calls this function.
    let ret = unsafe { ledc_set_duty(ledc_mode_t_LEDC_LOW_SPEED_MODE, channel, duty) };
    if ret != ESP_OK as i32 {
        return Err(ret);
    }
    let ret = unsafe { ledc_update_duty(ledc_mode_t_LEDC_LOW_SPEED_MODE, channel) };
    if ret != ESP_OK as i32 {
        return Err(ret);
    }
    Ok(())
}

#[cfg(not(target_os = "espidf"))]
static SIM_LEDC_DUTY: core::sync::atomic::AtomicU32 = core::sync::atomic::AtomicU32::new(0);

#[cfg(not(target_os = "espidf"))]
pub fn ledc_set(_channel: u32, duty: u32) -> core::result::Result<(), i32> {
    SIM_LEDC_DUTY.store(duty, core::sync::atomic::Ordering::Relaxed);
    Ok(())
}

/// Duty last written through `ledc_set` (host only).
#[cfg(not(target_os = "espidf"))]
pub fn sim_ledc_duty() -> u32 {
    SIM_LEDC_DUTY.load(core::sync::atomic::Ordering::Relaxed)
}

// ── UART (operator link) ──────────────────────────────────────

#[cfg(target_os = "espidf")]
const UART_PIN_NO_CHANGE: i32 = -1;

#[cfg(target_os = "espidf")]
unsafe fn init_uart(baud_rate: u32) -> core::result::Result<(), PeripheralError> {
    let cfg = uart_config_t {
        baud_rate: baud_rate as i32,
        data_bits: uart_word_length_t_UART_DATA_8_BITS,
        parity: uart_parity_t_UART_PARITY_DISABLE,
        stop_bits: uart_stop_bits_t_UART_STOP_BITS_1,
        flow_ctrl: uart_hw_flowcontrol_t_UART_HW_FLOWCTRL_DISABLE,
        ..Default::default()
    };

    // No TX buffer: uart_write_bytes() returns once the bytes are in the
    // hardware FIFO, waiting for space as needed.
    let ret = unsafe {
        uart_driver_install(
            pins::OPERATOR_UART_PORT,
            pins::OPERATOR_UART_RX_BUF,
            0,
            0,
            core::ptr::null_mut(),
            0,
        )
    };
    if ret != ESP_OK as i32 {
        return Err(PeripheralError::UartInitFailed(ret));
    }

    let ret = unsafe { uart_param_config(pins::OPERATOR_UART_PORT, &cfg) };
    if ret != ESP_OK as i32 {
        return Err(PeripheralError::UartInitFailed(ret));
    }

    let ret = unsafe {
        uart_set_pin(
            pins::OPERATOR_UART_PORT,
            pins::OPERATOR_UART_TX_GPIO,
            pins::OPERATOR_UART_RX_GPIO,
            UART_PIN_NO_CHANGE,
            UART_PIN_NO_CHANGE,
        )
    };
    if ret != ESP_OK as i32 {
        return Err(PeripheralError::UartInitFailed(ret));
    }

    info!(
        "hw_init: UART{} configured ({} baud, 8N1)",
        pins::OPERATOR_UART_PORT,
        baud_rate
    );
    Ok(())
}

/// Blocking write to the operator UART.
#[cfg(target_os = "espidf")]
pub fn uart_write(bytes: &[u8]) {
    // SAFETY: the UART driver was installed in init_uart(); the driver
    // serialises concurrent writers internally.
    unsafe {
        uart_write_bytes(
            pins::OPERATOR_UART_PORT,
            bytes.as_ptr().cast(),
            bytes.len(),
        );
    }
}

#[cfg(not(target_os = "espidf"))]
pub fn uart_write(_bytes: &[u8]) {}

/// Read whatever arrived within `timeout_ms`. Returns the byte count.
#[cfg(target_os = "espidf")]
pub fn uart_read(buf: &mut [u8], timeout_ms: u32) -> usize {
    let ticks = (timeout_ms * configTICK_RATE_HZ / 1000).max(1);
    // SAFETY: the UART driver was installed in init_uart(); only the
    // receive task calls this function.
    let n = unsafe {
        uart_read_bytes(
            pins::OPERATOR_UART_PORT,
            buf.as_mut_ptr().cast(),
            buf.len() as u32,
            ticks,
        )
    };
    n.max(0) as usize
}

#[cfg(not(target_os = "espidf"))]
pub fn uart_read(_buf: &mut [u8], timeout_ms: u32) -> usize {
    std::thread::sleep(std::time::Duration::from_millis(u64::from(timeout_ms)));
    0
}
