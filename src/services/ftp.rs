//! ### FTP put
//!
//! Uploads run in the extended `+FTPPUT` mode. The module announces how many
//! bytes it accepts per chunk in every `+FTPPUT: 1,1,<maxlength>` line, and
//! each chunk is announced with `+FTPPUT=2,<len>`, echoed back, and then
//! written raw:
//!
//! ```text
//! AT+FTPPUT=1           -> +FTPPUT: 1,1,1360
//! AT+FTPPUT=2,1360      -> +FTPPUT: 2,1360
//! <1360 bytes>          -> +FTPPUT: 1,1,1360
//! ...
//! AT+FTPPUT=2,0         -> +FTPPUT: 1,0
//! ```
use embedded_hal::{delay::DelayNs, digital::OutputPin};
use embedded_io::{Read, ReadReady, Write};

use crate::{
    client::Device,
    command::ftp::{
        responses::{parse_ftp_state, PutStatus},
        types::{FtpConfig, FtpResult, FtpState},
        GetState, OpenPutSession, PutData, Quit, SetBearer, SetPassword, SetPort,
        SetPutName, SetPutOption, SetPutPath, SetServer, SetTransferType, SetUser,
    },
    error::Error,
    module_timing,
};

const SESSION_LINE: &[u8] = b"+FTPPUT: 1,";
const ANY_LINE: &[u8] = b"+FTPPUT:";

/// Bookkeeping of a single put
#[derive(Debug)]
struct FtpUpload {
    state: FtpState,
    /// Chunk size last announced by the module
    chunk: usize,
    /// Payload bytes confirmed by the module
    sent: usize,
}

impl FtpUpload {
    fn new() -> Self {
        Self {
            state: FtpState::Idle,
            chunk: 0,
            sent: 0,
        }
    }

    fn transition(&mut self, state: FtpState) {
        debug!("FTP put {:?} -> {:?}", self.state, state);
        self.state = state;
    }
}

/// What came back while waiting for a `+FTPPUT` line
enum Reply {
    Status(PutStatus),
    Timeout,
    Garbled,
}

/// Why a put stopped short
enum Failure {
    /// Seen on our side of the wire, the session has to be closed
    Local(FtpResult),
    /// Reported by the module, which keeps its session as is
    Module(FtpResult),
}

impl<S, D, PWR, DTR, const N: usize> Device<S, D, PWR, DTR, N>
where
    S: Read + Write + ReadReady,
    D: DelayNs,
    PWR: OutputPin,
    DTR: OutputPin,
{
    /// Set every session parameter, stopping at the first one the module
    /// refuses.
    pub fn ftp_configure(&mut self, config: &FtpConfig) -> Result<bool, Error> {
        let accepted = self.send_command_ok(&SetBearer { cid: config.cid })?
            && self.send_command_ok(&SetServer {
                address: config.server.as_str(),
            })?
            && self.send_command_ok(&SetPort { port: config.port })?
            && self.send_command_ok(&SetUser {
                name: config.user.as_str(),
            })?
            && self.send_command_ok(&SetPassword {
                password: config.password.as_str(),
            })?
            && self.send_command_ok(&SetTransferType {
                kind: config.transfer_type.as_str(),
            })?
            && self.send_command_ok(&SetPutOption {
                option: config.put_option.as_str(),
            })?;

        if !accepted {
            warn!("FTP configuration refused: {:?}", crate::fmt::ascii(self.response()));
        }
        Ok(accepted)
    }

    /// Set the remote directory and file name of the next put.
    pub fn ftp_set_put_file(&mut self, path: &str, name: &str) -> Result<bool, Error> {
        if name.is_empty() || name.len() > 64 || path.len() > 128 {
            return Err(Error::InvalidParameter);
        }
        Ok(self.send_command_ok(&SetPutPath { path })?
            && self.send_command_ok(&SetPutName { name })?)
    }

    /// `0` when idle, `1` while a session is open, `0xFF` when unknown
    pub fn ftp_state(&mut self) -> Result<u8, Error> {
        let reply = self.send_command_capture(&GetState)?;
        Ok(parse_ftp_state(reply))
    }

    pub fn ftp_quit(&mut self) -> Result<bool, Error> {
        self.send_command_ok(&Quit)
    }

    /// Upload `data` to the file set with [`Device::ftp_set_put_file`].
    ///
    /// Failures reported by the module or seen on the wire come back as a
    /// [`FtpResult`]; only channel errors are `Err`. A timeout or a broken
    /// put sequence closes the session with `AT+FTPQUIT`, an error code from
    /// the module leaves it alone.
    pub fn ftp_upload(&mut self, data: &[u8]) -> Result<FtpResult, Error> {
        let mut upload = FtpUpload::new();
        let result = match self.ftp_put(&mut upload, data)? {
            Ok(()) => {
                info!("FTP put of {} bytes done", upload.sent);
                FtpResult::Success
            }
            Err(Failure::Local(result)) => {
                error!(
                    "FTP put failed in {:?} after {} bytes: {:?}",
                    upload.state, upload.sent, result
                );
                upload.transition(FtpState::Error);
                self.ftp_quit()?;
                result
            }
            Err(Failure::Module(result)) => {
                warn!("FTP put failed after {} bytes: {:?}", upload.sent, result);
                upload.transition(FtpState::Error);
                result
            }
        };

        Ok(result)
    }

    fn ftp_put(
        &mut self,
        upload: &mut FtpUpload,
        data: &[u8],
    ) -> Result<Result<(), Failure>, Error> {
        if self.ftp_state()? == 1 {
            debug!("Closing stale FTP session");
            self.ftp_quit()?;
        }

        let found = self.send_command_until(
            &OpenPutSession,
            SESSION_LINE,
            module_timing::ftp_response_timeout(),
        )?;
        match self.put_reply(found) {
            Reply::Status(PutStatus::Session {
                code: 1,
                max_len: Some(max_len),
            }) if max_len > 0 => {
                upload.chunk = max_len;
                upload.transition(FtpState::SessionOpen);
            }
            reply => return Ok(Err(Self::put_failure(reply))),
        }

        let mut remaining = data;
        while !remaining.is_empty() {
            let len = remaining.len().min(upload.chunk);
            upload.transition(FtpState::ChunkInFlight);

            let found = self.send_command_until(
                &PutData { mode: 2, len },
                ANY_LINE,
                module_timing::ftp_response_timeout(),
            )?;
            match self.put_reply(found) {
                Reply::Status(PutStatus::Accepted { len: echoed }) if echoed == len => {}
                Reply::Status(PutStatus::Accepted { len: echoed }) => {
                    warn!("Module accepted {} bytes instead of {}", echoed, len);
                    return Ok(Err(Failure::Local(FtpResult::ProtocolError)));
                }
                reply => return Ok(Err(Self::put_failure(reply))),
            }

            self.send(&remaining[..len])?;
            let found = self.collect_until(SESSION_LINE, 1, module_timing::ftp_response_timeout())?;
            match self.put_reply(found) {
                Reply::Status(PutStatus::Session {
                    code: 1,
                    max_len: Some(max_len),
                }) if max_len > 0 => {
                    upload.chunk = max_len;
                }
                reply => return Ok(Err(Self::put_failure(reply))),
            }

            upload.sent += len;
            remaining = &remaining[len..];
            upload.transition(FtpState::ChunkConfirmed);
        }

        upload.transition(FtpState::Closing);
        let found = self.send_command_until(
            &PutData { mode: 2, len: 0 },
            SESSION_LINE,
            module_timing::ftp_response_timeout(),
        )?;
        match self.put_reply(found) {
            Reply::Status(PutStatus::Session {
                code: 0,
                max_len: None,
            }) => {
                upload.transition(FtpState::Closed);
                Ok(Ok(()))
            }
            reply => Ok(Err(Self::put_failure(reply))),
        }
    }

    fn put_reply(&self, found: bool) -> Reply {
        if !found {
            return Reply::Timeout;
        }
        PutStatus::parse(self.response()).map_or(Reply::Garbled, Reply::Status)
    }

    /// Map anything but the expected line onto the put outcome
    fn put_failure(reply: Reply) -> Failure {
        match reply {
            Reply::Timeout => Failure::Local(FtpResult::Timeout),
            Reply::Status(PutStatus::Session { code, .. }) if FtpResult::is_module_error(code) => {
                Failure::Module(FtpResult::from_code(code))
            }
            Reply::Status(_) | Reply::Garbled => Failure::Local(FtpResult::ProtocolError),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{
        command::ftp::types::{PutOption, TransferType},
        config::{Config, NoPin},
        test_helpers::{init_logger, MockDelay, MockPin, MockSerial},
    };
    use heapless::String;

    fn device(serial: &MockSerial) -> Device<MockSerial, MockDelay, MockPin, NoPin, 128> {
        init_logger();
        Device::new(serial.clone(), MockDelay::new(), Config::new(MockPin::new()))
    }

    fn chunk_requests(serial: &MockSerial) -> Vec<Vec<u8>> {
        serial
            .frames_starting_with(b"AT+FTPPUT=2,")
            .into_iter()
            .filter(|f| f != b"AT+FTPPUT=2,0\r\n")
            .collect()
    }

    #[test]
    fn upload_in_three_chunks() {
        let serial = MockSerial::new(&[
            b"+FTPSTATE: 0\r\n\r\n0\r",
            b"0\r\n+FTPPUT: 1,1,256\r\n",
            b"+FTPPUT: 2,256\r\n",
            b"0\r\n+FTPPUT: 1,1,256\r\n",
            b"+FTPPUT: 2,256\r\n",
            b"0\r\n+FTPPUT: 1,1,256\r\n",
            b"+FTPPUT: 2,88\r\n",
            b"0\r\n+FTPPUT: 1,1,256\r\n",
            b"0\r\n+FTPPUT: 1,0\r\n",
        ]);
        let mut device = device(&serial);
        let data = [0x5Au8; 600];

        assert_eq!(device.ftp_upload(&data).unwrap(), FtpResult::Success);
        assert_eq!(
            chunk_requests(&serial),
            vec![
                b"AT+FTPPUT=2,256\r\n".to_vec(),
                b"AT+FTPPUT=2,256\r\n".to_vec(),
                b"AT+FTPPUT=2,88\r\n".to_vec(),
            ]
        );
        let payload: usize = serial
            .frames()
            .iter()
            .filter(|f| f.first() == Some(&0x5A))
            .map(|f| f.len())
            .sum();
        assert_eq!(payload, 600);
        assert!(serial.frames_starting_with(b"AT+FTPQUIT").is_empty());
    }

    #[test]
    fn chunk_size_follows_the_module() {
        let serial = MockSerial::new(&[
            b"+FTPSTATE: 1\r\n\r\n0\r",
            b"0\r",
            b"+FTPPUT: 1,1,100\r\n",
            b"+FTPPUT: 2,100\r\n",
            b"+FTPPUT: 1,1,50\r\n",
            b"+FTPPUT: 2,50\r\n",
            b"+FTPPUT: 1,1,50\r\n",
            b"+FTPPUT: 1,0\r\n",
        ]);
        let mut device = device(&serial);

        assert_eq!(device.ftp_upload(&[1u8; 150]).unwrap(), FtpResult::Success);
        // The stale session was closed before opening a new one
        assert_eq!(serial.frames()[1], b"AT+FTPQUIT\r\n".to_vec());
        assert_eq!(
            chunk_requests(&serial),
            vec![b"AT+FTPPUT=2,100\r\n".to_vec(), b"AT+FTPPUT=2,50\r\n".to_vec()]
        );
    }

    #[test]
    fn silent_module_times_out_and_quits() {
        let serial = MockSerial::new(&[b"+FTPSTATE: 0\r\n\r\n0\r", b"", b"0\r"]);
        let mut device = device(&serial);

        assert_eq!(device.ftp_upload(&[0u8; 10]).unwrap(), FtpResult::Timeout);
        assert_eq!(serial.frames_starting_with(b"AT+FTPQUIT").len(), 1);
    }

    #[test]
    fn module_error_is_returned_without_quit() {
        let serial = MockSerial::new(&[b"+FTPSTATE: 0\r\n\r\n0\r", b"0\r\n+FTPPUT: 1,65\r\n"]);
        let mut device = device(&serial);

        assert_eq!(
            device.ftp_upload(&[0u8; 10]).unwrap(),
            FtpResult::ServerError
        );
        assert!(serial.frames_starting_with(b"AT+FTPQUIT").is_empty());
    }

    #[test]
    fn module_timeout_is_not_a_local_timeout() {
        let serial = MockSerial::new(&[b"+FTPSTATE: 0\r\n\r\n0\r", b"0\r\n+FTPPUT: 1,64\r\n"]);
        let mut device = device(&serial);

        assert_eq!(
            device.ftp_upload(&[0u8; 10]).unwrap(),
            FtpResult::SessionTimeout
        );
        assert!(serial.frames_starting_with(b"AT+FTPQUIT").is_empty());
    }

    #[test]
    fn echo_mismatch_is_a_protocol_error() {
        let serial = MockSerial::new(&[
            b"+FTPSTATE: 0\r\n\r\n0\r",
            b"+FTPPUT: 1,1,256\r\n",
            b"+FTPPUT: 2,100\r\n",
            b"0\r",
        ]);
        let mut device = device(&serial);

        assert_eq!(
            device.ftp_upload(&[0u8; 200]).unwrap(),
            FtpResult::ProtocolError
        );
        // No payload went out
        assert_eq!(serial.frames().len(), 4);
        assert_eq!(serial.frames()[3], b"AT+FTPQUIT\r\n".to_vec());
    }

    #[test]
    fn zero_chunk_is_a_protocol_error() {
        let serial = MockSerial::new(&[
            b"+FTPSTATE: 0\r\n\r\n0\r",
            b"+FTPPUT: 1,1,0\r\n",
            b"0\r",
        ]);
        let mut device = device(&serial);

        assert_eq!(
            device.ftp_upload(&[0u8; 10]).unwrap(),
            FtpResult::ProtocolError
        );
        assert_eq!(serial.frames_starting_with(b"AT+FTPQUIT").len(), 1);
    }

    #[test]
    fn unfinished_close_is_not_success() {
        let serial = MockSerial::new(&[
            b"+FTPSTATE: 0\r\n\r\n0\r",
            b"+FTPPUT: 1,1,256\r\n",
            b"+FTPPUT: 2,4\r\n",
            b"+FTPPUT: 1,1,256\r\n",
            b"+FTPPUT: 1,1,256\r\n",
            b"0\r",
        ]);
        let mut device = device(&serial);

        assert_eq!(
            device.ftp_upload(&[0u8; 4]).unwrap(),
            FtpResult::ProtocolError
        );
    }

    #[test]
    fn configure_session() {
        let serial = MockSerial::new(&[b"0\r".as_slice(); 9]);
        let mut device = device(&serial);

        let config = FtpConfig {
            cid: 0,
            server: String::try_from("ftp.example.com").unwrap(),
            port: 21,
            user: String::try_from("user").unwrap(),
            password: String::try_from("secret").unwrap(),
            transfer_type: TransferType::Binary,
            put_option: PutOption::Append,
        };
        assert!(device.ftp_configure(&config).unwrap());
        assert!(device.ftp_set_put_file("/upload/", "log.txt").unwrap());

        assert_eq!(
            serial.frames(),
            vec![
                b"AT+FTPCID=0\r\n".to_vec(),
                b"AT+FTPSERV=\"ftp.example.com\"\r\n".to_vec(),
                b"AT+FTPPORT=21\r\n".to_vec(),
                b"AT+FTPUN=\"user\"\r\n".to_vec(),
                b"AT+FTPPW=\"secret\"\r\n".to_vec(),
                b"AT+FTPTYPE=\"I\"\r\n".to_vec(),
                b"AT+FTPPUTOPT=\"APPE\"\r\n".to_vec(),
                b"AT+FTPPUTPATH=\"/upload/\"\r\n".to_vec(),
                b"AT+FTPPUTNAME=\"log.txt\"\r\n".to_vec(),
            ]
        );
    }

    #[test]
    fn configure_stops_at_refusal() {
        let serial = MockSerial::new(&[b"0\r", b"4\r"]);
        let mut device = device(&serial);

        assert!(!device.ftp_configure(&FtpConfig::default()).unwrap());
        assert_eq!(serial.frames().len(), 2);
    }
}
