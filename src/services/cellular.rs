//! Network registration, operator selection and SIM access
use embedded_hal::{delay::DelayNs, digital::OutputPin};
use embedded_io::{Read, ReadReady, Write};
use heapless::String;

use crate::{
    client::Device,
    command::{
        device_lock::{responses::PinStatus, GetPinStatus, SetPin},
        network_service::{
            responses::{parse_clock, parse_functionality, NetworkRegistration, SignalQuality},
            types::{Functionality, OperatorFormat},
            GetClock, GetFunctionality, GetNetworkRegistration, GetOperators,
            GetSignalQuality, SetFunctionality, SetOperator,
        },
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
    pub fn network_registration(&mut self) -> Result<NetworkRegistration, Error> {
        let reply = self.send_command_capture(&GetNetworkRegistration)?;
        Ok(NetworkRegistration::parse(reply))
    }

    pub fn signal_quality(&mut self) -> Result<SignalQuality, Error> {
        let reply = self.send_command_capture(&GetSignalQuality)?;
        Ok(SignalQuality::parse(reply))
    }

    /// Scan for operators and copy the raw `+COPS: (...)` list into `out`.
    ///
    /// The scan can take minutes. Returns the number of bytes copied.
    pub fn cell_operators(&mut self, out: &mut [u8]) -> Result<usize, Error> {
        self.send_command_raw(&GetOperators, out)
    }

    /// Manually select the operator with the long alphanumeric `name`.
    pub fn set_cell_operator(&mut self, name: &str) -> Result<bool, Error> {
        if name.is_empty() || name.len() > 24 {
            return Err(Error::InvalidParameter);
        }
        self.send_command_ok(&SetOperator {
            mode: 1,
            format: OperatorFormat::Long as u8,
            oper: name,
        })
    }

    /// Current functionality level, `None` when the reply can not be read
    pub fn cell_function(&mut self) -> Result<Option<Functionality>, Error> {
        let reply = self.send_command_capture(&GetFunctionality)?;
        Ok(Functionality::from_code(parse_functionality(reply)))
    }

    pub fn set_cell_function(&mut self, fun: Functionality) -> Result<bool, Error> {
        debug!("Setting functionality {:?}", fun);
        self.send_command_ok(&SetFunctionality { fun: fun as u8 })
    }

    /// Network time as `yy/MM/dd,hh:mm:ss±zz`, empty when unknown
    pub fn clock(&mut self) -> Result<String<20>, Error> {
        let reply = self.send_command_capture(&GetClock)?;
        Ok(parse_clock(reply))
    }

    /// Unlock the SIM with a four digit `pin`.
    pub fn enter_pin(&mut self, pin: &str) -> Result<bool, Error> {
        if pin.len() != 4 || !pin.bytes().all(|b| b.is_ascii_digit()) {
            return Err(Error::InvalidParameter);
        }
        self.send_command_ok(&SetPin { pin })
    }

    pub fn pin_status(&mut self) -> Result<PinStatus, Error> {
        let reply = self.send_command_capture(&GetPinStatus)?;
        Ok(PinStatus::parse(reply))
    }
}
