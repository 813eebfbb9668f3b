//! APP network (PDP context) management and ping
use embassy_time::Duration;
use embedded_hal::{delay::DelayNs, digital::OutputPin};
use embedded_io::{Read, ReadReady, Write};
use heapless::Vec;

use crate::{
    client::Device,
    command::app_network::{
        responses::{AppNetworkInfo, PingResult},
        ConfigureAppNetwork, GetAppNetwork, Ping, SetAppNetwork,
    },
    error::Error,
};

/// Number of PDP contexts of the internal IP stack
pub const MAX_CONTEXTS: u8 = 4;

impl<S, D, PWR, DTR, const N: usize> Device<S, D, PWR, DTR, N>
where
    S: Read + Write + ReadReady,
    D: DelayNs,
    PWR: OutputPin,
    DTR: OutputPin,
{
    /// Configure PDP context `index` for IPv4 with `apn`.
    pub fn configure_app_network(&mut self, index: u8, apn: &str) -> Result<bool, Error> {
        if index >= MAX_CONTEXTS || apn.len() > 64 {
            return Err(Error::InvalidParameter);
        }
        self.send_command_ok(&ConfigureAppNetwork {
            pdp_index: index,
            ip_type: 1,
            apn,
        })
    }

    pub fn activate_network(&mut self, index: u8) -> Result<bool, Error> {
        self.set_app_network(index, 1)
    }

    pub fn deactivate_network(&mut self, index: u8) -> Result<bool, Error> {
        self.set_app_network(index, 0)
    }

    fn set_app_network(&mut self, index: u8, action: u8) -> Result<bool, Error> {
        if index >= MAX_CONTEXTS {
            return Err(Error::InvalidParameter);
        }
        debug!("APP network {}: action {}", index, action);
        self.send_command_ok(&SetAppNetwork {
            pdp_index: index,
            action,
        })
    }

    /// State and address of PDP context `index`. Unknown fields carry their
    /// sentinel values.
    pub fn app_network_info(&mut self, index: u8) -> Result<AppNetworkInfo, Error> {
        let reply = self.send_command_capture(&GetAppNetwork)?;
        Ok(AppNetworkInfo::parse(reply, index))
    }

    /// State of every PDP context the module reports
    pub fn network_status(&mut self) -> Result<Vec<AppNetworkInfo, 4>, Error> {
        let reply = self.send_command_capture(&GetAppNetwork)?;
        Ok((0..MAX_CONTEXTS)
            .map(|index| AppNetworkInfo::parse(reply, index))
            .filter(|info| info.index != 0xFF)
            .collect())
    }

    /// Ping the dotted IPv4 `address` `count` times with `size` byte
    /// payloads, waiting up to `timeout_ms` for each reply.
    pub fn ping(
        &mut self,
        address: &str,
        count: u16,
        size: u16,
        timeout_ms: u32,
    ) -> Result<PingResult, Error> {
        if !(7..=15).contains(&address.len()) || count == 0 {
            return Err(Error::InvalidParameter);
        }

        let timeout = Duration::from_millis(u64::from(timeout_ms) * u64::from(count))
            + self.config.response_timeout;
        let ping = Ping {
            address,
            count,
            size,
            timeout: timeout_ms,
        };
        self.send_command_lines(&ping, b"+SNPING4:", usize::from(count), timeout)?;

        let result = PingResult::parse(self.response());
        debug!("Ping {}: {} of {} replies", address, result.replies, count);
        Ok(result)
    }
}
