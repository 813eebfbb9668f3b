use atat::AtatCmd;
use embassy_time::Duration;
use embedded_hal::{delay::DelayNs, digital::OutputPin};
use embedded_io::{Read, ReadReady, Write};

use crate::{
    config::{Config, NoPin},
    error::{from_serial, Error},
    fmt, module_timing,
    power::PowerState,
};

/// Size of the stack buffer commands are serialized into
const COMMAND_LEN: usize = 256;

/// Byte level access to the module UART.
pub(crate) struct Channel<S, D> {
    serial: S,
    pub(crate) delay: D,
    open: bool,
    baud_rate: u32,
    command_delay: Duration,
}

impl<S, D> Channel<S, D>
where
    S: Read + Write + ReadReady,
    D: DelayNs,
{
    fn ensure_open(&self) -> Result<(), Error> {
        if self.open {
            Ok(())
        } else {
            Err(Error::UartClosed)
        }
    }

    pub(crate) fn sleep(&mut self, duration: Duration) {
        let mut remaining = duration.as_micros();
        while remaining > 0 {
            let step = u32::try_from(remaining).unwrap_or(u32::MAX);
            self.delay.delay_us(step);
            remaining -= u64::from(step);
        }
    }

    fn write(&mut self, bytes: &[u8]) -> Result<(), Error> {
        self.ensure_open()?;
        self.serial.write_all(bytes).map_err(from_serial)?;
        self.serial.flush().map_err(from_serial)
    }

    fn ready(&mut self) -> Result<bool, Error> {
        self.serial.read_ready().map_err(from_serial)
    }

    /// Sleep in poll sized steps until bytes are available. Returns the time
    /// spent waiting, or `None` when `timeout` passed without any.
    fn wait(&mut self, timeout: Duration) -> Result<Option<Duration>, Error> {
        let mut waited = Duration::from_ticks(0);
        loop {
            if self.ready()? {
                return Ok(Some(waited));
            }
            if waited >= timeout {
                return Ok(None);
            }
            self.sleep(module_timing::poll_interval());
            waited += module_timing::poll_interval();
        }
    }

    /// Read into `dst` for as long as bytes keep arriving within one poll
    /// interval, or until `dst` is full.
    fn read_into(&mut self, dst: &mut [u8]) -> Result<usize, Error> {
        let mut filled = 0;
        while filled < dst.len() {
            if !self.ready()? {
                self.sleep(module_timing::poll_interval());
                if !self.ready()? {
                    break;
                }
            }
            match self.serial.read(&mut dst[filled..]).map_err(from_serial)? {
                0 => break,
                n => filled += n,
            }
        }
        Ok(filled)
    }

    /// Read and drop bytes for as long as they keep arriving
    fn discard(&mut self) -> Result<usize, Error> {
        let mut scratch = [0u8; 64];
        let mut dropped = 0;
        loop {
            match self.read_into(&mut scratch)? {
                0 => break,
                n => dropped += n,
            }
        }
        Ok(dropped)
    }

    /// Fill `out` with the reply, keeping the last byte for the NUL
    /// terminator. Bytes past the capacity are dropped.
    fn capture(&mut self, out: &mut [u8]) -> Result<usize, Error> {
        let Some(capacity) = out.len().checked_sub(1) else {
            return self.discard().map(|_| 0);
        };
        let len = self.read_into(&mut out[..capacity])?;
        out[len] = 0;

        if len == capacity {
            let dropped = self.discard()?;
            if dropped > 0 {
                warn!("Reply overflowed the receive buffer, {} bytes dropped", dropped);
            }
        }
        Ok(len)
    }
}

/// Driver for a SIM7080G module.
///
/// `N` is the capacity of the receive buffer every command reply is read
/// into. It has to be a non-zero multiple of 4, and one byte of it is taken
/// by the NUL terminator.
pub struct Device<S, D, PWR, DTR = NoPin, const N: usize = 1000> {
    pub(crate) channel: Channel<S, D>,
    pub(crate) config: Config<PWR, DTR>,
    pub(crate) power_state: PowerState,
    buf: [u8; N],
    len: usize,
}

impl<S, D, PWR, DTR, const N: usize> Device<S, D, PWR, DTR, N>
where
    S: Read + Write + ReadReady,
    D: DelayNs,
    PWR: OutputPin,
    DTR: OutputPin,
{
    const CAPACITY_CHECK: () = assert!(
        N > 0 && N % 4 == 0,
        "receive buffer capacity must be a non-zero multiple of 4"
    );

    /// Take ownership of an opened serial channel. The module is assumed to
    /// be powered down until [`Device::power_up`] says otherwise.
    pub fn new(serial: S, delay: D, mut config: Config<PWR, DTR>) -> Self {
        #[allow(clippy::let_unit_value)]
        let () = Self::CAPACITY_CHECK;

        if let Some(ref mut dtr) = config.dtr_pin {
            dtr.set_low().ok();
        }

        Self {
            channel: Channel {
                serial,
                delay,
                open: true,
                baud_rate: config.baud_rate,
                command_delay: config.command_delay,
            },
            config,
            power_state: PowerState::PoweredDown,
            buf: [0; N],
            len: 0,
        }
    }

    pub fn open_uart(&mut self) {
        if !self.channel.open {
            debug!("Opening UART at {} baud", self.channel.baud_rate);
            self.channel.open = true;
        }
    }

    /// Mark the channel closed. Every exchange fails with
    /// [`Error::UartClosed`] until it is opened again.
    pub fn close_uart(&mut self) -> Result<(), Error> {
        if self.channel.open {
            self.flush_uart()?;
            self.channel.open = false;
            debug!("UART closed");
        }
        Ok(())
    }

    /// Wait for all pending output to leave the UART.
    pub fn flush_uart(&mut self) -> Result<(), Error> {
        self.channel.serial.flush().map_err(from_serial)
    }

    pub fn is_uart_open(&self) -> bool {
        self.channel.open
    }

    pub fn baud_rate(&self) -> u32 {
        self.channel.baud_rate
    }

    /// Reply of the last capturing exchange, without the NUL terminator
    pub fn response(&self) -> &[u8] {
        &self.buf[..self.len]
    }

    /// Write a fully terminated command, wait for the reply and read it.
    ///
    /// With `out` the reply is copied into it and NUL terminated, so at most
    /// `out.len() - 1` bytes are kept and the rest is drained and dropped.
    /// Without `out` the whole reply is drained and dropped. Returns
    /// the number of reply bytes, `0` when nothing arrived within `timeout`
    /// (the configured response timeout when `None`).
    pub fn exchange_raw(
        &mut self,
        command: &[u8],
        out: Option<&mut [u8]>,
        timeout: Option<Duration>,
    ) -> Result<usize, Error> {
        let timeout = timeout.unwrap_or(self.config.response_timeout);
        self.transmit(command)?;

        if self.channel.wait(timeout)?.is_none() {
            trace!("No reply within {} ms", timeout.as_millis());
            if let Some(first) = out.and_then(|out| out.first_mut()) {
                *first = 0;
            }
            return Ok(0);
        }

        match out {
            Some(out) => self.channel.capture(out),
            None => self.channel.discard(),
        }
    }

    /// Exchange `command` and keep the reply in the receive buffer.
    pub fn exchange_capture(
        &mut self,
        command: &[u8],
        timeout: Option<Duration>,
    ) -> Result<usize, Error> {
        let timeout = timeout.unwrap_or(self.config.response_timeout);
        self.transmit(command)?;
        self.read_response(timeout)?;
        trace!("Reply: {:?}", fmt::ascii(self.response()));
        Ok(self.len)
    }

    /// Exchange `command` and drop the reply.
    pub fn exchange_discard(
        &mut self,
        command: &[u8],
        timeout: Option<Duration>,
    ) -> Result<usize, Error> {
        self.exchange_raw(command, None, timeout)
    }

    /// Exchange `command` and report whether the module answered with the
    /// numeric `0` (OK) result code.
    pub fn exchange_expect_ok(
        &mut self,
        command: &[u8],
        timeout: Option<Duration>,
    ) -> Result<bool, Error> {
        self.exchange_capture(command, timeout)?;
        Ok(self.response_is_ok())
    }

    /// Exchange `command`, then keep reading into the receive buffer until
    /// `marker` shows up as a complete line or `timeout` passes. Returns
    /// whether the marker was seen.
    pub fn exchange_until(
        &mut self,
        command: &[u8],
        marker: &[u8],
        timeout: Duration,
    ) -> Result<bool, Error> {
        self.transmit(command)?;
        self.collect_until(marker, 1, timeout)
    }

    /// Write raw bytes to the module.
    pub fn send(&mut self, bytes: &[u8]) -> Result<(), Error> {
        self.channel.write(bytes)
    }

    /// Read raw bytes from the module into `buffer`.
    ///
    /// At most `max_len` bytes are read, or as many as `buffer` holds when
    /// `max_len` is 0. Bytes that do not fit stay in the UART.
    pub fn receive(
        &mut self,
        buffer: &mut [u8],
        max_len: usize,
        timeout: Option<Duration>,
    ) -> Result<usize, Error> {
        self.channel.ensure_open()?;
        let timeout = timeout.unwrap_or(self.config.response_timeout);
        let limit = match max_len {
            0 => buffer.len(),
            n => n.min(buffer.len()),
        };

        if self.channel.wait(timeout)?.is_none() {
            return Ok(0);
        }
        self.channel.read_into(&mut buffer[..limit])
    }

    /// Send an `atat` command and drop its reply.
    pub fn send_command<Cmd: AtatCmd>(&mut self, cmd: &Cmd) -> Result<usize, Error> {
        let mut command = [0u8; COMMAND_LEN];
        let len = serialize(cmd, &mut command)?;
        self.exchange_discard(&command[..len], Some(self.command_timeout::<Cmd>()))
    }

    /// Send an `atat` command and copy its raw reply into `out`.
    pub fn send_command_raw<Cmd: AtatCmd>(
        &mut self,
        cmd: &Cmd,
        out: &mut [u8],
    ) -> Result<usize, Error> {
        let mut command = [0u8; COMMAND_LEN];
        let len = serialize(cmd, &mut command)?;
        let timeout = self.command_timeout::<Cmd>();
        self.exchange_raw(&command[..len], Some(out), Some(timeout))
    }

    /// Write an `atat` command without waiting for a reply.
    pub fn send_command_detached<Cmd: AtatCmd>(&mut self, cmd: &Cmd) -> Result<(), Error> {
        let mut command = [0u8; COMMAND_LEN];
        let len = serialize(cmd, &mut command)?;
        trace!("Sending: {:?}", fmt::ascii(&command[..len]));
        self.channel.write(&command[..len])
    }

    /// Send an `atat` command and report whether it succeeded.
    pub fn send_command_ok<Cmd: AtatCmd>(&mut self, cmd: &Cmd) -> Result<bool, Error> {
        let mut command = [0u8; COMMAND_LEN];
        let len = serialize(cmd, &mut command)?;
        self.exchange_expect_ok(&command[..len], Some(self.command_timeout::<Cmd>()))
    }

    /// Send an `atat` command and return its raw reply.
    pub fn send_command_capture<Cmd: AtatCmd>(&mut self, cmd: &Cmd) -> Result<&[u8], Error> {
        let mut command = [0u8; COMMAND_LEN];
        let len = serialize(cmd, &mut command)?;
        self.exchange_capture(&command[..len], Some(self.command_timeout::<Cmd>()))?;
        Ok(self.response())
    }

    /// Send an `atat` command and read until `marker` completes a line.
    pub fn send_command_until<Cmd: AtatCmd>(
        &mut self,
        cmd: &Cmd,
        marker: &[u8],
        timeout: Duration,
    ) -> Result<bool, Error> {
        self.send_command_lines(cmd, marker, 1, timeout)
    }

    /// Send an `atat` command and read until `count` lines starting with
    /// `marker` arrived.
    pub(crate) fn send_command_lines<Cmd: AtatCmd>(
        &mut self,
        cmd: &Cmd,
        marker: &[u8],
        count: usize,
        timeout: Duration,
    ) -> Result<bool, Error> {
        let mut command = [0u8; COMMAND_LEN];
        let len = serialize(cmd, &mut command)?;
        self.transmit(&command[..len])?;
        self.collect_until(marker, count, timeout)
    }

    /// `0` as the second to last byte of the captured reply.
    ///
    /// With `ATV0` a successful command ends in `0\r`.
    pub(crate) fn response_is_ok(&self) -> bool {
        self.len >= 2 && self.buf[self.len - 2] == b'0'
    }

    /// Wait for a reply to something already written and capture it into
    /// the receive buffer.
    pub(crate) fn read_response(&mut self, timeout: Duration) -> Result<usize, Error> {
        self.len = 0;
        self.buf[0] = 0;
        if self.channel.wait(timeout)?.is_some() {
            self.len = self.channel.capture(&mut self.buf)?;
        }
        Ok(self.len)
    }

    /// Read into the receive buffer, without writing anything first, until
    /// `marker` has been seen `count` times, each followed by a line end.
    pub(crate) fn collect_until(
        &mut self,
        marker: &[u8],
        count: usize,
        timeout: Duration,
    ) -> Result<bool, Error> {
        self.len = 0;
        self.buf[0] = 0;
        let capacity = N - 1;
        let mut remaining = timeout;

        loop {
            let Some(waited) = self.channel.wait(remaining)? else {
                break;
            };
            remaining = remaining.checked_sub(waited).unwrap_or_default();

            let len = self.channel.read_into(&mut self.buf[self.len..capacity])?;
            self.len += len;
            self.buf[self.len] = 0;

            if completed_lines(self.response(), marker) >= count {
                trace!("Reply: {:?}", fmt::ascii(self.response()));
                return Ok(true);
            }
            if self.len == capacity {
                warn!("Receive buffer full while waiting for {:?}", fmt::ascii(marker));
                break;
            }
            if remaining == Duration::from_ticks(0) {
                break;
            }
        }

        debug!(
            "Gave up waiting for {:?}, got {:?}",
            fmt::ascii(marker),
            fmt::ascii(self.response())
        );
        Ok(false)
    }

    fn transmit(&mut self, command: &[u8]) -> Result<(), Error> {
        trace!("Sending: {:?}", fmt::ascii(command));
        self.channel.write(command)?;
        let command_delay = self.channel.command_delay;
        self.channel.sleep(command_delay);
        Ok(())
    }

    fn command_timeout<Cmd: AtatCmd>(&self) -> Duration {
        Duration::from_millis(u64::from(Cmd::MAX_TIMEOUT_MS)).max(self.config.response_timeout)
    }
}

fn serialize<Cmd: AtatCmd>(cmd: &Cmd, buf: &mut [u8; COMMAND_LEN]) -> Result<usize, Error> {
    if Cmd::MAX_LEN > COMMAND_LEN {
        error!("Command of up to {} bytes does not fit", Cmd::MAX_LEN);
        return Err(Error::CommandTooLong);
    }
    Ok(cmd.write(buf))
}

/// Number of `marker` occurrences in `reply` that are followed by a `\n`
/// before the next occurrence.
fn completed_lines(reply: &[u8], marker: &[u8]) -> usize {
    if marker.is_empty() {
        return 0;
    }
    let mut count = 0;
    let mut rest = reply;
    while let Some(start) = rest.windows(marker.len()).position(|w| w == marker) {
        rest = &rest[start + marker.len()..];
        match rest.iter().position(|&b| b == b'\n') {
            Some(end) => {
                count += 1;
                rest = &rest[end + 1..];
            }
            None => break,
        }
    }
    count
}
