//! Integration tests for the event queue → ControlService dispatch path.
//!
//! Producers (timer, UART task) are stood in for by direct pushes; the
//! service drains the queue exactly as the firmware main loop does.

use super::mock_hw::{LogSink, MockHardware};

use dcservo::app::service::ControlService;
use dcservo::config::ControllerConfig;
use dcservo::drivers::uart::{forward_bytes, forward_bytes_blocking};
use dcservo::events::{ControlEvent, EVENT_QUEUE_CAP, EventQueue};

fn make_app() -> (ControlService, MockHardware, LogSink) {
    let mut app = ControlService::with_neutral_law(ControllerConfig::default());
    let mut hw = MockHardware::with_readings(7, 8);
    let mut sink = LogSink::new();
    app.boot(&mut hw, &mut sink);
    hw.clear();
    sink.events.clear();
    (app, hw, sink)
}

#[test]
fn bytes_and_ticks_are_handled_in_arrival_order() {
    let (mut app, mut hw, mut sink) = make_app();
    let queue = EventQueue::new();

    queue.push(ControlEvent::Tick); // off: ignored
    assert_eq!(forward_bytes(&queue, b"s"), 0);
    queue.push(ControlEvent::Tick);
    assert_eq!(forward_bytes(&queue, b"t"), 0);
    queue.push(ControlEvent::Tick); // off again: ignored

    let handled = app.run_pending(&queue, &mut hw, &mut sink);

    assert_eq!(handled, 5);
    assert!(queue.is_empty());
    assert_eq!(hw.serial_text(), "p:0007\n");
    assert!(!app.is_on());
    assert_eq!(app.tick_count(), 3);
}

#[test]
fn entry_split_across_drains_still_commits() {
    let (mut app, mut hw, mut sink) = make_app();
    let queue = EventQueue::new();

    forward_bytes(&queue, b"45");
    app.run_pending(&queue, &mut hw, &mut sink);
    assert_eq!(app.digits_received(), 2);

    forward_bytes(&queue, b"67");
    app.run_pending(&queue, &mut hw, &mut sink);
    assert_eq!(app.reference(), 4567);
}

#[test]
fn overflow_drops_newest_events_only() {
    let (mut app, mut hw, mut sink) = make_app();
    let queue = EventQueue::new();

    let mut burst = vec![b'x'; EVENT_QUEUE_CAP - 4];
    burst.extend_from_slice(b"1234");
    burst.extend_from_slice(b"9999");

    assert_eq!(forward_bytes(&queue, &burst), 4);
    assert_eq!(queue.dropped(), 4);

    app.run_pending(&queue, &mut hw, &mut sink);
    assert_eq!(app.reference(), 1234);
}

#[test]
fn empty_queue_is_a_no_op() {
    let (mut app, mut hw, mut sink) = make_app();
    let queue = EventQueue::new();

    assert_eq!(app.run_pending(&queue, &mut hw, &mut sink), 0);
    assert!(hw.calls.is_empty());
    assert!(sink.events.is_empty());
}

#[test]
fn full_entry_survives_a_nearly_full_queue() {
    let (mut app, mut hw, mut sink) = make_app();
    let queue = EventQueue::new();
    for _ in 0..EVENT_QUEUE_CAP - 2 {
        queue.push(ControlEvent::Tick);
    }

    // The receive task waits while the foreground loop drains one event.
    forward_bytes_blocking(&queue, b"1234", || {
        if let Some(event) = queue.pop() {
            app.handle_event(event, &mut hw, &mut sink);
        }
    });
    app.run_pending(&queue, &mut hw, &mut sink);
    assert_eq!(app.reference(), 1234);

    forward_bytes_blocking(&queue, b"5678", || unreachable!("queue has room"));
    app.run_pending(&queue, &mut hw, &mut sink);

    assert_eq!(app.reference(), 5678);
    assert_eq!(app.digits_received(), 0);
    assert_eq!(queue.dropped(), 0);
}
