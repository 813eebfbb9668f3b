//! Operations built on top of the command catalog, one module per
//! application of the module.

pub mod battery;
pub mod cellular;
pub mod data;
pub mod ftp;
pub mod gnss;
pub mod http;
