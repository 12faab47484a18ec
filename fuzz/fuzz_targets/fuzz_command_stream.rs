//! Fuzz target: `ControlService` fed an arbitrary operator byte stream
//!
//! Every input byte is delivered as a received byte; every `0x00` byte is
//! additionally treated as a timer tick. Asserts that the service never
//! panics, never holds more than three pending digits, keeps the reference
//! inside full scale, and only emits well-formed report lines.
//!
//! cargo fuzz run fuzz_command_stream

#![no_main]

use dcservo::app::events::AppEvent;
use dcservo::app::ports::{ActuatorPort, EventSink, SensorPort, SerialPort};
use dcservo::app::service::ControlService;
use dcservo::config::ControllerConfig;
use dcservo::control::sampling::Channel;
use libfuzzer_sys::fuzz_target;

struct Rig {
    reading: i16,
    serial: Vec<u8>,
}

impl SensorPort for Rig {
    fn read_channel(&mut self, _channel: Channel) -> i16 {
        self.reading
    }
}

impl ActuatorPort for Rig {
    fn write_actuator(&mut self, _command: i16) {}
}

impl SerialPort for Rig {
    fn send_byte(&mut self, byte: u8) {
        self.serial.push(byte);
    }
}

struct Discard;

impl EventSink for Discard {
    fn emit(&mut self, _event: &AppEvent) {}
}

fuzz_target!(|data: &[u8]| {
    let config = ControllerConfig::default();
    let full_scale = config.full_scale;
    let mut app = ControlService::with_neutral_law(config);
    let mut rig = Rig {
        reading: 0,
        serial: Vec::new(),
    };
    let mut sink = Discard;
    app.boot(&mut rig, &mut sink);

    for &b in data {
        // Reuse the byte as the next conversion result.
        rig.reading = i16::from(b as i8) * 40;
        app.handle_byte(b, &mut rig, &mut sink);
        if b == 0 {
            app.tick(&mut rig, &mut sink);
        }
        assert!(app.digits_received() < 4);
        assert!(app.reference().unsigned_abs() <= full_scale.unsigned_abs());
    }

    let text = core::str::from_utf8(&rig.serial).expect("report lines are ASCII");
    for line in text.split_terminator('\n') {
        let (tag, body) = line.split_at(2);
        assert!(tag == "p:" || tag == "a:", "bad tag in {line:?}");
        let digits = body.strip_prefix('-').unwrap_or(body);
        assert_eq!(digits.len(), 4, "bad width in {line:?}");
        assert!(digits.bytes().all(|c| c.is_ascii_digit()));
    }
});
