//! Supply voltage and charge level
use embedded_hal::{delay::DelayNs, digital::OutputPin};
use embedded_io::{Read, ReadReady, Write};

use crate::{
    client::Device,
    command::battery::{responses::BatteryCharge, GetBatteryCharge},
    error::Error,
};

impl<S, D, PWR, DTR, const N: usize> Device<S, D, PWR, DTR, N>
where
    S: Read + Write + ReadReady,
    D: DelayNs,
    PWR: OutputPin,
    DTR: OutputPin,
{
    pub fn battery_charge(&mut self) -> Result<BatteryCharge, Error> {
        let reply = self.send_command_capture(&GetBatteryCharge)?;
        Ok(BatteryCharge::parse(reply))
    }

    /// Supply voltage in mV, 0 when unknown
    pub fn battery_voltage(&mut self) -> Result<u16, Error> {
        self.battery_charge().map(|charge| charge.voltage)
    }

    /// Charge level in percent, 0xFF when unknown
    pub fn battery_percent(&mut self) -> Result<u8, Error> {
        self.battery_charge().map(|charge| charge.percent)
    }
}
