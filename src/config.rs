use core::convert::Infallible;
use embassy_time::Duration;
use embedded_hal::digital::{ErrorType, OutputPin};

use crate::module_timing;

/// Placeholder for modules wired without a DTR line. Sleep control is
/// disabled when the driver is configured with it.
pub struct NoPin;

impl ErrorType for NoPin {
    type Error = Infallible;
}

impl OutputPin for NoPin {
    fn set_low(&mut self) -> Result<(), Self::Error> {
        Ok(())
    }

    fn set_high(&mut self) -> Result<(), Self::Error> {
        Ok(())
    }
}

#[derive(Debug)]
pub struct Config<PWR, DTR = NoPin> {
    pub(crate) pwr_pin: PWR,
    pub(crate) dtr_pin: Option<DTR>,
    pub(crate) baud_rate: u32,
    pub(crate) response_timeout: Duration,
    pub(crate) command_delay: Duration,
}

impl<PWR> Config<PWR, NoPin>
where
    PWR: OutputPin,
{
    pub fn new(pwr_pin: PWR) -> Self {
        Config {
            pwr_pin,
            dtr_pin: None,
            baud_rate: 115_200_u32,
            response_timeout: module_timing::response_timeout(),
            command_delay: module_timing::command_delay(),
        }
    }

    pub fn with_dtr<DTR: OutputPin>(self, dtr_pin: DTR) -> Config<PWR, DTR> {
        Config {
            pwr_pin: self.pwr_pin,
            dtr_pin: Some(dtr_pin),
            baud_rate: self.baud_rate,
            response_timeout: self.response_timeout,
            command_delay: self.command_delay,
        }
    }
}

impl<PWR, DTR> Config<PWR, DTR>
where
    PWR: OutputPin,
    DTR: OutputPin,
{
    /// Baud rate the serial channel was opened with. The driver never
    /// renegotiates it, so this is informational only.
    pub fn baud_rate<B: Into<u32>>(self, baud_rate: B) -> Self {
        Config {
            baud_rate: baud_rate.into(),
            ..self
        }
    }

    /// How long to wait for the first byte of a reply when a command does not
    /// specify its own timeout.
    pub fn response_timeout(self, response_timeout: Duration) -> Self {
        Config {
            response_timeout,
            ..self
        }
    }

    /// Blind wait between writing a command and starting to read.
    pub fn command_delay(self, command_delay: Duration) -> Self {
        Config {
            command_delay,
            ..self
        }
    }

    pub fn has_dtr(&self) -> bool {
        self.dtr_pin.is_some()
    }
}
