//! Integration tests for the ControlService → ports pipeline.
//!
//! Drive the service with the same byte and tick stream the board would
//! see and check what reaches the mock converter, actuator and serial link.

use super::mock_hw::{HwCall, LogSink, MockHardware};

use dcservo::app::events::AppEvent;
use dcservo::app::service::ControlService;
use dcservo::config::ControllerConfig;
use dcservo::control::lifecycle::Phase;
use dcservo::control::sampling::{Channel, Sample};

const NEUTRAL: i16 = 540;

fn make_app() -> (ControlService, MockHardware, LogSink) {
    let mut app = ControlService::with_neutral_law(ControllerConfig::default());
    let mut hw = MockHardware::with_readings(512, -31);
    let mut sink = LogSink::new();
    app.boot(&mut hw, &mut sink);
    (app, hw, sink)
}

fn send(app: &mut ControlService, hw: &mut MockHardware, sink: &mut LogSink, bytes: &[u8]) {
    for &b in bytes {
        app.handle_byte(b, hw, sink);
    }
}

// ── Boot ─────────────────────────────────────────────────────

#[test]
fn boot_drives_actuator_neutral_and_stays_off() {
    let (app, hw, sink) = make_app();

    assert_eq!(hw.calls, vec![HwCall::Actuate(NEUTRAL)]);
    assert_eq!(app.phase(), Phase::Off);
    assert_eq!(app.reference(), 1);
    assert_eq!(app.digits_received(), 0);
    assert_eq!(app.active_channel(), Channel::Zero);
    assert_eq!(sink.events, vec![AppEvent::Booted { reference: 1 }]);
}

// ── Sampling cycle ───────────────────────────────────────────

#[test]
fn start_then_ticks_alternate_channels_and_report() {
    let (mut app, mut hw, mut sink) = make_app();
    hw.clear();

    send(&mut app, &mut hw, &mut sink, b"s");
    assert!(app.is_on());
    assert!(hw.calls.is_empty(), "start must not touch the hardware");

    app.tick(&mut hw, &mut sink);
    app.tick(&mut hw, &mut sink);
    app.tick(&mut hw, &mut sink);

    assert_eq!(
        hw.conversions(),
        vec![Channel::Zero, Channel::One, Channel::Zero]
    );
    assert_eq!(hw.serial_text(), "p:0512\na:-0031\np:0512\n");
    assert_eq!(hw.actuator_writes(), vec![NEUTRAL, NEUTRAL, NEUTRAL]);
}

#[test]
fn each_tick_converts_then_reports_then_actuates() {
    let (mut app, mut hw, mut sink) = make_app();
    send(&mut app, &mut hw, &mut sink, b"s");
    hw.clear();

    app.tick(&mut hw, &mut sink);

    let first_send = hw
        .calls
        .iter()
        .position(|c| matches!(c, HwCall::Send(_)))
        .unwrap();
    let write = hw
        .calls
        .iter()
        .position(|c| matches!(c, HwCall::Actuate(_)))
        .unwrap();
    assert_eq!(hw.calls[0], HwCall::Convert(Channel::Zero));
    assert!(first_send < write, "report goes out before the actuator write");
    assert_eq!(write, hw.calls.len() - 1);
}

#[test]
fn ticks_while_off_do_nothing() {
    let (mut app, mut hw, mut sink) = make_app();
    hw.clear();
    let before = sink.events.len();

    for _ in 0..5 {
        app.tick(&mut hw, &mut sink);
    }

    assert!(hw.calls.is_empty());
    assert_eq!(sink.events.len(), before);
    assert_eq!(app.active_channel(), Channel::Zero);
    assert_eq!(app.tick_count(), 5);
}

#[test]
fn restart_begins_on_channel_zero() {
    let (mut app, mut hw, mut sink) = make_app();
    send(&mut app, &mut hw, &mut sink, b"s");
    app.tick(&mut hw, &mut sink);
    assert_eq!(app.active_channel(), Channel::One);

    send(&mut app, &mut hw, &mut sink, b"ts");
    hw.clear();
    app.tick(&mut hw, &mut sink);

    assert_eq!(hw.conversions(), vec![Channel::Zero]);
    assert_eq!(hw.serial_text(), "p:0512\n");
}

// ── Reference entry ──────────────────────────────────────────

#[test]
fn four_digits_commit_with_no_intermediate_write() {
    let (mut app, mut hw, mut sink) = make_app();
    send(&mut app, &mut hw, &mut sink, b"s");
    hw.clear();

    send(&mut app, &mut hw, &mut sink, b"123");
    assert!(hw.calls.is_empty(), "partial entry must not actuate");
    assert_eq!(app.digits_received(), 3);
    assert_eq!(app.reference(), 1);

    send(&mut app, &mut hw, &mut sink, b"4");
    assert_eq!(app.reference(), 1234);
    assert_eq!(app.digits_received(), 0);
    assert_eq!(hw.calls, vec![HwCall::Actuate(1234)]);
    assert_eq!(
        sink.events.last(),
        Some(&AppEvent::ReferenceCommitted { value: 1234 })
    );
}

#[test]
fn entry_while_off_commits_without_actuating() {
    let (mut app, mut hw, mut sink) = make_app();
    hw.clear();

    send(&mut app, &mut hw, &mut sink, b"0042");

    assert_eq!(app.reference(), 42);
    assert!(hw.calls.is_empty());
}

#[test]
fn stop_mid_entry_discards_partial_digits() {
    let (mut app, mut hw, mut sink) = make_app();
    send(&mut app, &mut hw, &mut sink, b"s12");
    assert_eq!(app.digits_received(), 2);
    hw.clear();

    send(&mut app, &mut hw, &mut sink, b"t");
    assert_eq!(hw.calls, vec![HwCall::Actuate(NEUTRAL)]);
    assert_eq!(app.digits_received(), 0);
    assert_eq!(
        sink.events.last(),
        Some(&AppEvent::Stopped {
            discarded_digits: 2
        })
    );

    send(&mut app, &mut hw, &mut sink, b"5678");
    assert_eq!(app.reference(), 5678, "new entry starts from a clean slate");
}

#[test]
fn entries_chain_back_to_back() {
    let (mut app, mut hw, mut sink) = make_app();

    send(&mut app, &mut hw, &mut sink, b"99990000");

    assert_eq!(app.reference(), 0);
    assert_eq!(app.digits_received(), 0);
}

// ── Flip and noise ───────────────────────────────────────────

#[test]
fn flip_twice_restores_reference() {
    let (mut app, mut hw, mut sink) = make_app();
    send(&mut app, &mut hw, &mut sink, b"0300");

    send(&mut app, &mut hw, &mut sink, b"r");
    assert_eq!(app.reference(), -300);
    send(&mut app, &mut hw, &mut sink, b"r");
    assert_eq!(app.reference(), 300);
}

#[test]
fn flip_mid_entry_keeps_partial_digits() {
    let (mut app, mut hw, mut sink) = make_app();

    send(&mut app, &mut hw, &mut sink, b"12r34");

    // The flip hit the old reference; the entry then replaced it.
    assert_eq!(app.reference(), 1234);
}

#[test]
fn noise_bytes_leave_state_unchanged() {
    let (mut app, mut hw, mut sink) = make_app();
    send(&mut app, &mut hw, &mut sink, b"s12");
    let before = app.state();
    let events_before = sink.events.len();
    hw.clear();

    send(&mut app, &mut hw, &mut sink, b"xyzST\r\n \xff");

    assert_eq!(app.state(), before);
    assert!(hw.calls.is_empty());
    assert_eq!(sink.events.len(), events_before);
}

// ── Lifecycle ────────────────────────────────────────────────

#[test]
fn stop_is_idempotent() {
    let (mut app, mut hw, mut sink) = make_app();
    hw.clear();

    send(&mut app, &mut hw, &mut sink, b"tt");

    assert_eq!(app.phase(), Phase::Off);
    assert_eq!(hw.actuator_writes(), vec![NEUTRAL, NEUTRAL]);
}

#[test]
fn repeated_start_emits_once() {
    let (mut app, mut hw, mut sink) = make_app();

    send(&mut app, &mut hw, &mut sink, b"sss");

    let starts = sink
        .events
        .iter()
        .filter(|e| matches!(e, AppEvent::Started))
        .count();
    assert_eq!(starts, 1);
    assert!(app.is_on());
}

// ── Custom actuation law ─────────────────────────────────────

#[test]
fn plugged_law_sees_reference_and_sample() {
    let law = |reference: i16, sample: Sample| reference - sample.raw;
    let mut app = ControlService::new(ControllerConfig::default(), law);
    let mut hw = MockHardware::with_readings(200, 50);
    let mut sink = LogSink::new();
    app.boot(&mut hw, &mut sink);

    for &b in b"1000s" {
        app.handle_byte(b, &mut hw, &mut sink);
    }
    hw.clear();
    app.tick(&mut hw, &mut sink);
    app.tick(&mut hw, &mut sink);

    assert_eq!(hw.actuator_writes(), vec![800, 950]);
    assert!(matches!(
        sink.events.last(),
        Some(AppEvent::Sampled { command: 950, .. })
    ));
}
