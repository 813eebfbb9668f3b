//! ### FTP application commands
//!
//! Session parameters (`+FTPCID` .. `+FTPPUTPATH`) are set once; a put is
//! then driven through `+FTPPUT` in extended mode, see
//! [`crate::services::ftp`].

pub mod responses;
pub mod types;

use atat::atat_derive::AtatCmd;

use super::NoResponse;

/// +FTPCID Set FTP bearer profile identifier
#[derive(Clone, AtatCmd)]
#[at_cmd("+FTPCID", NoResponse)]
pub struct SetBearer {
    #[at_arg(position = 0)]
    pub cid: u8,
}

/// +FTPSERV Set FTP server address
#[derive(Clone, AtatCmd)]
#[at_cmd("+FTPSERV", NoResponse)]
pub struct SetServer<'a> {
    #[at_arg(position = 0, len = 64)]
    pub address: &'a str,
}

/// +FTPPORT Set FTP control port
#[derive(Clone, AtatCmd)]
#[at_cmd("+FTPPORT", NoResponse)]
pub struct SetPort {
    #[at_arg(position = 0)]
    pub port: u16,
}

/// +FTPUN Set FTP user name
#[derive(Clone, AtatCmd)]
#[at_cmd("+FTPUN", NoResponse)]
pub struct SetUser<'a> {
    #[at_arg(position = 0, len = 32)]
    pub name: &'a str,
}

/// +FTPPW Set FTP password
#[derive(Clone, AtatCmd)]
#[at_cmd("+FTPPW", NoResponse)]
pub struct SetPassword<'a> {
    #[at_arg(position = 0, len = 32)]
    pub password: &'a str,
}

/// +FTPTYPE Set FTP type, `"A"` for ASCII or `"I"` for binary
#[derive(Clone, AtatCmd)]
#[at_cmd("+FTPTYPE", NoResponse)]
pub struct SetTransferType<'a> {
    #[at_arg(position = 0, len = 1)]
    pub kind: &'a str,
}

/// +FTPPUTOPT Set FTP put type
#[derive(Clone, AtatCmd)]
#[at_cmd("+FTPPUTOPT", NoResponse)]
pub struct SetPutOption<'a> {
    #[at_arg(position = 0, len = 4)]
    pub option: &'a str,
}

/// +FTPPUTNAME Set put file name
#[derive(Clone, AtatCmd)]
#[at_cmd("+FTPPUTNAME", NoResponse)]
pub struct SetPutName<'a> {
    #[at_arg(position = 0, len = 64)]
    pub name: &'a str,
}

/// +FTPPUTPATH Set put file path
#[derive(Clone, AtatCmd)]
#[at_cmd("+FTPPUTPATH", NoResponse)]
pub struct SetPutPath<'a> {
    #[at_arg(position = 0, len = 128)]
    pub path: &'a str,
}

/// +FTPSTATE Get the FTP state
#[derive(Clone, AtatCmd)]
#[at_cmd("+FTPSTATE", NoResponse)]
pub struct GetState;

/// +FTPQUIT Quit current FTP session
#[derive(Clone, AtatCmd)]
#[at_cmd("+FTPQUIT", NoResponse)]
pub struct Quit;

/// +FTPPUT Open a put session
#[derive(Clone, AtatCmd)]
#[at_cmd("+FTPPUT=1", NoResponse, value_sep = false, timeout_ms = 30000)]
pub struct OpenPutSession;

/// +FTPPUT Announce `len` bytes of data. A zero length closes the put.
#[derive(Clone, AtatCmd)]
#[at_cmd("+FTPPUT", NoResponse, timeout_ms = 30000)]
pub struct PutData {
    #[at_arg(position = 0)]
    pub mode: u8,
    #[at_arg(position = 1)]
    pub len: usize,
}
