use embedded_hal::{delay::DelayNs, digital::OutputPin};
use embedded_io::{Read, ReadReady, Write};

use crate::{
    client::Device,
    command::{Reboot, SetNumericResultCodes, AT},
    error::Error,
    module_timing,
};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum PowerState {
    PoweredDown,
    PoweredUp,
    /// DTR is held high and the module is allowed to enter sleep mode
    Sleeping,
}

impl<S, D, PWR, DTR, const N: usize> Device<S, D, PWR, DTR, N>
where
    S: Read + Write + ReadReady,
    D: DelayNs,
    PWR: OutputPin,
    DTR: OutputPin,
{
    pub fn power_state(&self) -> PowerState {
        self.power_state
    }

    /// Check that the module is alive.
    ///
    /// Pokes the AT interface once and counts any reply as a sign of life,
    /// whatever result code format the module is in.
    pub(crate) fn is_alive(&mut self) -> Result<bool, Error> {
        Ok(self.send_command(&AT)? > 0)
    }

    /// Power the module on with a `PWRKEY` pulse, unless it already
    /// answers, and switch it to numeric result codes.
    pub fn power_up(&mut self) -> Result<(), Error> {
        if self.is_alive()? {
            if self.power_state != PowerState::PoweredUp {
                debug!("Module already on, was {:?}", self.power_state);
                if let Some(ref mut dtr) = self.config.dtr_pin {
                    dtr.set_low().map_err(|_| Error::IoPin)?;
                }
                self.power_state = PowerState::PoweredUp;
            }
            return Ok(());
        }

        if self.power_state == PowerState::PoweredDown {
            info!("Powering module on");
            self.pulse_pwr_key()?;
            self.channel.sleep(module_timing::boot_time());

            self.send_command(&SetNumericResultCodes)?;
            self.power_state = PowerState::PoweredUp;
            info!("Module powered on");
        } else {
            warn!("Module is {:?} but does not answer", self.power_state);
        }

        Ok(())
    }

    /// Power the module off with a `PWRKEY` pulse.
    pub fn power_down(&mut self) -> Result<(), Error> {
        if self.power_state != PowerState::PoweredUp {
            debug!("Not powering down, module is {:?}", self.power_state);
            return Ok(());
        }

        info!("Powering module off");
        self.pulse_pwr_key()?;
        self.power_state = PowerState::PoweredDown;
        Ok(())
    }

    /// Let the module enter sleep mode by raising DTR. Does nothing when no
    /// DTR pin is configured.
    pub fn enter_sleep(&mut self) -> Result<(), Error> {
        if self.power_state != PowerState::PoweredUp {
            return Ok(());
        }
        let Some(ref mut dtr) = self.config.dtr_pin else {
            debug!("No DTR pin, sleep is not available");
            return Ok(());
        };

        dtr.set_high().map_err(|_| Error::IoPin)?;
        self.power_state = PowerState::Sleeping;
        debug!("Module sleeping");
        Ok(())
    }

    /// Wake the module by pulling DTR low.
    pub fn leave_sleep(&mut self) -> Result<(), Error> {
        if self.power_state != PowerState::Sleeping {
            return Ok(());
        }
        let Some(ref mut dtr) = self.config.dtr_pin else {
            return Ok(());
        };

        dtr.set_low().map_err(|_| Error::IoPin)?;
        self.power_state = PowerState::PoweredUp;
        debug!("Module awake");
        Ok(())
    }

    /// Restart the module with `AT+CREBOOT`. The reply is not awaited.
    pub fn reboot(&mut self) -> Result<(), Error> {
        info!("Rebooting module");
        self.send_command_detached(&Reboot)
    }

    fn pulse_pwr_key(&mut self) -> Result<(), Error> {
        self.config.pwr_pin.set_low().map_err(|_| Error::IoPin)?;
        self.channel.sleep(module_timing::pwr_key_pulse_time());
        self.config.pwr_pin.set_high().map_err(|_| Error::IoPin)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{
        config::{Config, NoPin},
        test_helpers::{init_logger, MockDelay, MockPin, MockSerial},
    };

    #[test]
    fn power_up_pulses_once() {
        init_logger();
        // Silent probe, ATV0, then an answered probe
        let serial = MockSerial::new(&[b"", b"OK\r\n", b"0\r"]);
        let pwr = MockPin::new();
        let delay = MockDelay::new();
        let mut device: Device<_, _, _, NoPin, 64> =
            Device::new(serial.clone(), delay.clone(), Config::new(pwr.clone()));

        device.power_up().unwrap();
        assert_eq!(device.power_state(), PowerState::PoweredUp);
        device.power_up().unwrap();
        assert_eq!(device.power_state(), PowerState::PoweredUp);

        assert_eq!(pwr.pulses(), 1);
        assert!(pwr.is_high());
        assert_eq!(serial.frames_starting_with(b"ATV0").len(), 1);
        assert!(delay.elapsed_ms() >= 1100 + 1800);
    }

    #[test]
    fn power_up_reconciles_running_module() {
        init_logger();
        let serial = MockSerial::new(&[b"AT\r\r\nOK\r\n"]);
        let pwr = MockPin::new();
        let mut device: Device<_, _, _, NoPin, 64> =
            Device::new(serial, MockDelay::new(), Config::new(pwr.clone()));

        device.power_up().unwrap();
        assert_eq!(device.power_state(), PowerState::PoweredUp);
        assert_eq!(pwr.pulses(), 0);
    }

    #[test]
    fn power_down_only_when_up() {
        init_logger();
        let serial = MockSerial::new(&[b"0\r"]);
        let pwr = MockPin::new();
        let mut device: Device<_, _, _, NoPin, 64> =
            Device::new(serial, MockDelay::new(), Config::new(pwr.clone()));

        device.power_down().unwrap();
        assert_eq!(pwr.pulses(), 0);

        device.power_up().unwrap();
        device.power_down().unwrap();
        device.power_down().unwrap();
        assert_eq!(device.power_state(), PowerState::PoweredDown);
        assert_eq!(pwr.pulses(), 1);
    }

    #[test]
    fn sleep_follows_dtr() {
        init_logger();
        let serial = MockSerial::new(&[b"0\r"]);
        let dtr = MockPin::new();
        let config = Config::new(MockPin::new()).with_dtr(dtr.clone());
        let mut device: Device<_, _, _, _, 64> = Device::new(serial, MockDelay::new(), config);
        assert!(!dtr.is_high());

        device.power_up().unwrap();
        device.enter_sleep().unwrap();
        assert_eq!(device.power_state(), PowerState::Sleeping);
        assert!(dtr.is_high());

        device.leave_sleep().unwrap();
        assert_eq!(device.power_state(), PowerState::PoweredUp);
        assert!(!dtr.is_high());
    }

    #[test]
    fn sleep_without_dtr_is_a_no_op() {
        init_logger();
        let serial = MockSerial::new(&[b"0\r"]);
        let mut device: Device<_, _, _, NoPin, 64> =
            Device::new(serial, MockDelay::new(), Config::new(MockPin::new()));

        device.power_up().unwrap();
        device.enter_sleep().unwrap();
        assert_eq!(device.power_state(), PowerState::PoweredUp);
    }

    #[test]
    fn reboot_does_not_wait() {
        init_logger();
        let serial = MockSerial::new(&[]);
        let delay = MockDelay::new();
        let mut device: Device<_, _, _, NoPin, 64> =
            Device::new(serial.clone(), delay.clone(), Config::new(MockPin::new()));

        device.reboot().unwrap();
        assert_eq!(serial.frames(), vec![b"AT+CREBOOT\r\n".to_vec()]);
        assert_eq!(delay.elapsed_ms(), 0);
    }
}
