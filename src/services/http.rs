//! HTTP(S) client of the module
use embedded_hal::{delay::DelayNs, digital::OutputPin};
use embedded_io::{Read, ReadReady, Write};

use crate::{
    client::Device,
    command::http::{
        responses::{is_body_prompt, parse_connection_state, parse_read_header, HttpResult},
        types::{param, HttpMethod, MAX_BODY_LEN, MAX_HEADER_LEN},
        AddHeader, ClearHeaders, ConfigureHttp, ConfigureHttpSize, Connect, Disconnect,
        GetConnectionState, ReadBody, Request, SetBody,
    },
    error::Error,
    module_timing,
};

/// Time the module waits for the body bytes after the `>` prompt, in ms
const BODY_INPUT_TIMEOUT: u32 = 10_000;

impl<S, D, PWR, DTR, const N: usize> Device<S, D, PWR, DTR, N>
where
    S: Read + Write + ReadReady,
    D: DelayNs,
    PWR: OutputPin,
    DTR: OutputPin,
{
    /// Set the server `url` and the size of the body and header buffers.
    pub fn http_configure(
        &mut self,
        url: &str,
        body_len: usize,
        header_len: usize,
    ) -> Result<bool, Error> {
        if url.is_empty() || url.len() > 128 || body_len > MAX_BODY_LEN || header_len > MAX_HEADER_LEN {
            return Err(Error::InvalidParameter);
        }

        Ok(self.send_command_ok(&ConfigureHttp {
            param: param::URL,
            value: url,
        })? && self.send_command_ok(&ConfigureHttpSize {
            param: param::BODY_LEN,
            value: body_len as u32,
        })? && self.send_command_ok(&ConfigureHttpSize {
            param: param::HEADER_LEN,
            value: header_len as u32,
        })?)
    }

    pub fn http_connect(&mut self) -> Result<bool, Error> {
        self.send_command_ok(&Connect)
    }

    pub fn http_disconnect(&mut self) -> Result<bool, Error> {
        self.send_command_ok(&Disconnect)
    }

    pub fn http_is_connected(&mut self) -> Result<bool, Error> {
        let reply = self.send_command_capture(&GetConnectionState)?;
        Ok(parse_connection_state(reply))
    }

    pub fn http_clear_headers(&mut self) -> Result<bool, Error> {
        self.send_command_ok(&ClearHeaders)
    }

    pub fn http_add_header(&mut self, name: &str, value: &str) -> Result<bool, Error> {
        if name.is_empty() || name.len() > 64 || value.len() > 128 {
            return Err(Error::InvalidParameter);
        }
        self.send_command_ok(&AddHeader { name, value })
    }

    /// Hand the request body to the module.
    pub fn http_set_body(&mut self, body: &[u8]) -> Result<bool, Error> {
        if body.len() > MAX_BODY_LEN {
            return Err(Error::InvalidParameter);
        }

        let reply = self.send_command_capture(&SetBody {
            len: body.len(),
            timeout: BODY_INPUT_TIMEOUT,
        })?;
        if !is_body_prompt(reply) {
            warn!("No body prompt");
            return Ok(false);
        }

        self.send(body)?;
        self.read_response(self.config.response_timeout)?;
        Ok(self.response_is_ok())
    }

    /// Issue a request for `path` and wait for its completion.
    pub fn http_request(&mut self, method: HttpMethod, path: &str) -> Result<HttpResult, Error> {
        if path.is_empty() || path.len() > 128 {
            return Err(Error::InvalidParameter);
        }

        debug!("HTTP {} {}", method.as_str(), path);
        let done = self.send_command_until(
            &Request {
                path,
                method: method as u8,
            },
            b"+SHREQ:",
            module_timing::http_response_timeout(),
        )?;
        if !done {
            warn!("HTTP request timed out");
            return Ok(HttpResult::default());
        }

        let result = HttpResult::parse(self.response());
        debug!("HTTP status {}, {} bytes", result.status, result.length);
        Ok(result)
    }

    /// Read up to `out.len()` bytes of the response body starting at
    /// `offset`. Returns the number of bytes copied into `out`.
    pub fn http_read(&mut self, offset: usize, out: &mut [u8]) -> Result<usize, Error> {
        if out.is_empty() {
            return Ok(0);
        }

        let found = self.send_command_until(
            &ReadBody {
                offset,
                len: out.len(),
            },
            b"+SHREAD:",
            self.config.response_timeout,
        )?;
        if !found {
            return Ok(0);
        }
        let Some((announced, start)) = parse_read_header(self.response()) else {
            return Ok(0);
        };

        let wanted = announced.min(out.len());
        let buffered = &self.response()[start..];
        let mut copied = buffered.len().min(wanted);
        out[..copied].copy_from_slice(&buffered[..copied]);

        // The rest of the body is still in the UART
        while copied < wanted {
            match self.receive(&mut out[copied..wanted], 0, None)? {
                0 => break,
                n => copied += n,
            }
        }

        if copied < wanted {
            warn!("Short HTTP read, {} of {} bytes", copied, wanted);
        }
        Ok(copied)
    }
}
