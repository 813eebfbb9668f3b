//! GNSS engine control and position readout
use embedded_hal::{delay::DelayNs, digital::OutputPin};
use embedded_io::{Read, ReadReady, Write};

use crate::{
    client::Device,
    command::gnss::{
        responses::GnssInfo, ColdStart, GetNavigationInfo, HotStart, SetGnssPower, WarmStart,
    },
    error::Error,
};

impl<S, D, PWR, DTR, const N: usize> Device<S, D, PWR, DTR, N>
where
    S: Read + Write + ReadReady,
    D: DelayNs,
    PWR: OutputPin,
    DTR: OutputPin,
{
    pub fn gnss_power_up(&mut self) -> Result<bool, Error> {
        self.send_command_ok(&SetGnssPower { on: 1 })
    }

    pub fn gnss_power_down(&mut self) -> Result<bool, Error> {
        self.send_command_ok(&SetGnssPower { on: 0 })
    }

    pub fn gnss_cold_start(&mut self) -> Result<bool, Error> {
        self.send_command_ok(&ColdStart)
    }

    pub fn gnss_warm_start(&mut self) -> Result<bool, Error> {
        self.send_command_ok(&WarmStart)
    }

    pub fn gnss_hot_start(&mut self) -> Result<bool, Error> {
        self.send_command_ok(&HotStart)
    }

    /// Latest navigation record. Fields the module leaves empty stay empty
    /// or zero.
    pub fn gnss_info(&mut self) -> Result<GnssInfo, Error> {
        let reply = self.send_command_capture(&GetNavigationInfo)?;
        let info = GnssInfo::parse(reply);
        trace!(
            "GNSS run {} fix {} sats {}/{}/{}",
            info.run,
            info.has_fix(),
            info.gps_satellites,
            info.gnss_satellites,
            info.glonass_satellites
        );
        Ok(info)
    }
}

#[cfg(test)]
mod tests {
    use crate::{
        client::Device,
        config::{Config, NoPin},
        test_helpers::{init_logger, MockDelay, MockPin, MockSerial},
    };

    fn device(serial: &MockSerial) -> Device<MockSerial, MockDelay, MockPin, NoPin, 256> {
        init_logger();
        Device::new(serial.clone(), MockDelay::new(), Config::new(MockPin::new()))
    }

    #[test]
    fn engine_control() {
        let serial = MockSerial::new(&[b"0\r", b"0\r", b"0\r", b"0\r", b"3\r"]);
        let mut device = device(&serial);

        assert!(device.gnss_power_up().unwrap());
        assert!(device.gnss_cold_start().unwrap());
        assert!(device.gnss_warm_start().unwrap());
        assert!(device.gnss_hot_start().unwrap());
        assert!(!device.gnss_power_down().unwrap());

        assert_eq!(
            serial.frames(),
            vec![
                b"AT+CGNSPWR=1\r\n".to_vec(),
                b"AT+CGNSCOLD\r\n".to_vec(),
                b"AT+CGNSWARM\r\n".to_vec(),
                b"AT+CGNSHOT\r\n".to_vec(),
                b"AT+CGNSPWR=0\r\n".to_vec(),
            ]
        );
    }

    #[test]
    fn navigation_info() {
        let serial = MockSerial::new(&[
            b"AT+CGNSINF\r\r\n+CGNSINF: 1,1,,20240101120000.000,12.345678,-98.765432,0.0,0.0,0,0,,,,,,08,07,06,,,,,\r\n\r\n0\r",
        ]);
        let mut device = device(&serial);

        let info = device.gnss_info().unwrap();
        assert_eq!(info.run, 1);
        assert_eq!(info.latitude.as_str(), "12.345678");
        assert_eq!(info.longitude.as_str(), "-98.765432");
        assert_eq!(
            (info.gps_satellites, info.gnss_satellites, info.glonass_satellites),
            (8, 7, 6)
        );
    }
}
