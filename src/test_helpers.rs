use core::convert::Infallible;
use std::cell::{Cell, RefCell};
use std::collections::VecDeque;
use std::rc::Rc;
use std::sync::Once;

use embedded_hal::delay::DelayNs;
use embedded_hal::digital::{ErrorType, OutputPin};

static INIT_LOGGER: Once = Once::new();

pub fn init_logger() {
    INIT_LOGGER.call_once(|| {
        let _ = env_logger::builder().is_test(true).try_init();
    });
}

#[derive(Debug, Default)]
struct SerialState {
    replies: VecDeque<Vec<u8>>,
    rx: VecDeque<u8>,
    pending: Vec<u8>,
    frames: Vec<Vec<u8>>,
}

/// Scripted modem. Every `flush` closes the current write as one frame and
/// queues the next scripted reply for reading. Clones share the script.
#[derive(Debug, Clone, Default)]
pub struct MockSerial {
    state: Rc<RefCell<SerialState>>,
}

impl MockSerial {
    pub fn new(replies: &[&[u8]]) -> Self {
        let serial = Self::default();
        for reply in replies {
            serial.push_reply(reply);
        }
        serial
    }

    pub fn push_reply(&self, reply: &[u8]) {
        self.state.borrow_mut().replies.push_back(reply.to_vec());
    }

    /// Bytes waiting to be read without a preceding write
    pub fn push_unsolicited(&self, bytes: &[u8]) {
        self.state.borrow_mut().rx.extend(bytes.iter().copied());
    }

    /// Everything written so far, one entry per flush
    pub fn frames(&self) -> Vec<Vec<u8>> {
        self.state.borrow().frames.clone()
    }

    pub fn frames_starting_with(&self, prefix: &[u8]) -> Vec<Vec<u8>> {
        self.frames()
            .into_iter()
            .filter(|f| f.starts_with(prefix))
            .collect()
    }

    pub fn unread(&self) -> usize {
        self.state.borrow().rx.len()
    }
}

impl embedded_io::ErrorType for MockSerial {
    type Error = Infallible;
}

impl embedded_io::Read for MockSerial {
    fn read(&mut self, buf: &mut [u8]) -> Result<usize, Self::Error> {
        let mut state = self.state.borrow_mut();
        let mut n = 0;
        while n < buf.len() {
            match state.rx.pop_front() {
                Some(b) => {
                    buf[n] = b;
                    n += 1;
                }
                None => break,
            }
        }
        Ok(n)
    }
}

impl embedded_io::ReadReady for MockSerial {
    fn read_ready(&mut self) -> Result<bool, Self::Error> {
        Ok(!self.state.borrow().rx.is_empty())
    }
}

impl embedded_io::Write for MockSerial {
    fn write(&mut self, buf: &[u8]) -> Result<usize, Self::Error> {
        self.state.borrow_mut().pending.extend_from_slice(buf);
        Ok(buf.len())
    }

    fn flush(&mut self) -> Result<(), Self::Error> {
        let mut state = self.state.borrow_mut();
        let frame = core::mem::take(&mut state.pending);
        if frame.is_empty() {
            return Ok(());
        }
        state.frames.push(frame);
        if let Some(reply) = state.replies.pop_front() {
            state.rx.extend(reply);
        }
        Ok(())
    }
}

/// Output pin counting its high to low edges
#[derive(Debug, Clone)]
pub struct MockPin {
    high: Rc<Cell<bool>>,
    falls: Rc<Cell<u32>>,
}

impl MockPin {
    pub fn new() -> Self {
        Self {
            high: Rc::new(Cell::new(true)),
            falls: Rc::new(Cell::new(0)),
        }
    }

    pub fn is_high(&self) -> bool {
        self.high.get()
    }

    pub fn pulses(&self) -> u32 {
        self.falls.get()
    }
}

impl ErrorType for MockPin {
    type Error = Infallible;
}

impl OutputPin for MockPin {
    fn set_low(&mut self) -> Result<(), Self::Error> {
        if self.high.replace(false) {
            self.falls.set(self.falls.get() + 1);
        }
        Ok(())
    }

    fn set_high(&mut self) -> Result<(), Self::Error> {
        self.high.set(true);
        Ok(())
    }
}

/// Delay that returns immediately and keeps track of the time it would
/// have slept
#[derive(Debug, Clone, Default)]
pub struct MockDelay {
    elapsed_ns: Rc<Cell<u64>>,
}

impl MockDelay {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn elapsed_ms(&self) -> u64 {
        self.elapsed_ns.get() / 1_000_000
    }
}

impl DelayNs for MockDelay {
    fn delay_ns(&mut self, ns: u32) {
        self.elapsed_ns.set(self.elapsed_ns.get() + u64::from(ns));
    }
}

mod tests {
    use super::*;
    use embedded_io::{Read, ReadReady, Write};

    #[test]
    fn mock_serial_replies_per_flush() {
        let mut serial = MockSerial::new(&[b"0\r", b"4\r"]);
        assert!(!serial.read_ready().unwrap());

        serial.write_all(b"AT\r\n").unwrap();
        serial.flush().unwrap();
        let mut buf = [0u8; 8];
        assert_eq!(serial.read(&mut buf).unwrap(), 2);
        assert_eq!(&buf[..2], b"0\r");

        assert_eq!(serial.frames(), vec![b"AT\r\n".to_vec()]);
    }

    #[test]
    fn mock_pin_counts_pulses() {
        let mut pin = MockPin::new();
        let probe = pin.clone();
        pin.set_low().unwrap();
        pin.set_low().unwrap();
        pin.set_high().unwrap();
        assert_eq!(probe.pulses(), 1);
        assert!(probe.is_high());
    }
}
