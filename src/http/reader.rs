use crate::http::HttpError;
use bytes::{Buf, BytesMut};
use tokio::io::AsyncReadExt;

/// Read chunk size for the underlying socket.
const READ_CHUNK: usize = 1024;

/// Buffered reader that yields one logical header line at a time.
///
/// Lines are delimited by `\n` (so both `\r\n` and bare `\n` terminate a
/// line) and returned with their terminator included. Bytes are consumed
/// irrevocably from the stream; there is no pushback.
pub struct LineReader<R> {
    stream: R,
    buf: BytesMut,
}

impl<R: tokio::io::AsyncRead + Unpin> LineReader<R> {
    pub fn new(stream: R) -> Self {
        Self {
            stream,
            buf: BytesMut::with_capacity(4096),
        }
    }

    /// Reads one line including its terminator.
    ///
    /// Returns `Ok(None)` on clean end-of-stream with nothing buffered. If
    /// the stream ends mid-line, the partial line is returned as the final
    /// line; the next call then reports end-of-stream.
    pub async fn read_line(&mut self) -> Result<Option<Vec<u8>>, HttpError> {
        loop {
            if let Some(pos) = self.buf.iter().position(|&b| b == b'\n') {
                let line = self.buf.split_to(pos + 1);
                return Ok(Some(line.to_vec()));
            }

            let mut chunk = [0u8; READ_CHUNK];
            let n = self.stream.read(&mut chunk).await?;

            if n == 0 {
                if self.buf.is_empty() {
                    return Ok(None);
                }
                let rest = self.buf.split_off(0);
                return Ok(Some(rest.to_vec()));
            }

            self.buf.extend_from_slice(&chunk[..n]);
        }
    }

    /// Accumulates header lines until the blank line that terminates the
    /// header block (a line of at most 2 bytes, i.e. `\r\n` or `\n`).
    ///
    /// The returned block has the trailing blank-line terminator stripped.
    /// Returns `Ok(None)` when the client closed the connection without
    /// sending anything.
    pub async fn read_header_block(&mut self) -> Result<Option<String>, HttpError> {
        let mut block = Vec::new();

        loop {
            match self.read_line().await? {
                Some(line) => {
                    let end = line.len() <= 2;
                    block.extend_from_slice(&line);
                    if end {
                        break;
                    }
                }
                None => break,
            }
        }

        if block.is_empty() {
            return Ok(None);
        }

        let block = String::from_utf8(block).map_err(|_| HttpError::InvalidEncoding)?;
        let block = block
            .strip_suffix("\r\n\r\n")
            .or_else(|| block.strip_suffix("\n\n"))
            .or_else(|| block.strip_suffix("\r\n"))
            .or_else(|| block.strip_suffix("\n"))
            .unwrap_or(&block);

        Ok(Some(block.to_string()))
    }

    /// Reads exactly `n` body bytes following the header block.
    ///
    /// This is the single authoritative length check: end-of-stream before
    /// `n` bytes is a [`HttpError::BodyTooShort`], never a silent
    /// truncation.
    pub async fn read_body(&mut self, n: usize) -> Result<Vec<u8>, HttpError> {
        let mut body = Vec::with_capacity(n);

        let buffered = n.min(self.buf.len());
        body.extend_from_slice(&self.buf[..buffered]);
        self.buf.advance(buffered);

        while body.len() < n {
            let mut chunk = [0u8; READ_CHUNK];
            let want = (n - body.len()).min(READ_CHUNK);
            let read = self.stream.read(&mut chunk[..want]).await?;

            if read == 0 {
                return Err(HttpError::BodyTooShort {
                    expected: n,
                    got: body.len(),
                });
            }

            body.extend_from_slice(&chunk[..read]);
        }

        Ok(body)
    }
}
