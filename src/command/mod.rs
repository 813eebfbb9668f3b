//! AT Commands for the SIMCom SIM7080 module family\
//! Following the SIM7080 Series AT Command Manual
//!
//! Commands are only serialized through `atat`. Their replies are read with
//! the raw transport and decoded by the hand written readers in each
//! `responses` module, because the driver runs the modem with numeric result
//! codes (`ATV0`), which `atat`'s response digester does not understand.

pub mod app_network;
pub mod battery;
pub mod device_lock;
pub mod ftp;
pub mod gnss;
pub mod http;
pub mod network_service;

use atat::atat_derive::{AtatCmd, AtatResp};

#[derive(Clone, AtatResp)]
pub struct NoResponse;

#[derive(Clone, AtatCmd)]
#[at_cmd("", NoResponse, timeout_ms = 1000)]
pub struct AT;

/// V TA response format
///
/// `V0` switches the result codes to their numeric form, so a successful
/// command ends in `0\r`.
#[derive(Clone, AtatCmd)]
#[at_cmd("V0", NoResponse)]
pub struct SetNumericResultCodes;

/// +CREBOOT Reboot module
#[derive(Clone, AtatCmd)]
#[at_cmd("+CREBOOT", NoResponse)]
pub struct Reboot;
