//! ### Power supply information

pub mod responses;

use atat::atat_derive::AtatCmd;

use super::NoResponse;

/// +CBC Battery charge
///
/// Answers `+CBC: <bcs>,<bcl>,<voltage>` with the charge level in percent
/// and the voltage in mV.
#[derive(Clone, AtatCmd)]
#[at_cmd("+CBC", NoResponse)]
pub struct GetBatteryCharge;
