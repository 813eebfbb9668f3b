//! Blocking driver for SIMCom SIM7080G cellular/GNSS modules.
//!
//! The driver owns the module UART, its `PWRKEY` pin and optionally its DTR
//! pin. Every operation writes one AT command, waits for the reply and reads
//! it into a fixed size receive buffer, so nothing here allocates.
//!
//! ```ignore
//! let config = Config::new(pwr_key).with_dtr(dtr);
//! let mut modem: Device<_, _, _, _> = Device::new(uart, delay, config);
//!
//! modem.power_up()?;
//! modem.configure_app_network(0, "iot.1nce.net")?;
//! modem.activate_network(0)?;
//! let fix = modem.gnss_info()?;
//! ```
#![cfg_attr(not(test), no_std)]

// This mod MUST go first, so that the others see its macros.
pub(crate) mod fmt;

pub mod client;
pub mod command;
pub mod config;
pub mod error;
mod module_timing;
pub mod parse;
pub mod power;
pub mod services;

#[cfg(test)]
mod test_helpers;

pub use atat;
pub use client::Device;
pub use config::{Config, NoPin};
pub use error::Error;
pub use power::PowerState;
