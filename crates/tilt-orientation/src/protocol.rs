use crate::types::OrientationSample;
use std::collections::VecDeque;
use thiserror::Error;

/// Samples are newline-delimited JSON objects:
/// `{"alpha": 10.0, "beta": null, "gamma": 3.5}`. Keys may be omitted.
const DELIMITER: u8 = b'\n';
/// Longest accepted line. Anything longer is dropped up to the next delimiter.
pub const MAX_LINE_LEN: usize = 4096;

#[derive(Debug, Error)]
pub enum ProtocolError {
    #[error("Sample line is not valid UTF-8")]
    InvalidUtf8,
    #[error("Sample line exceeds {} bytes", MAX_LINE_LEN)]
    LineTooLong,
    #[error("Malformed sample line: {0}")]
    Malformed(#[from] serde_json::Error),
}

/// Streaming parser for the orientation sample stream.
///
/// Feed raw bytes via `push_data`, then drain parsed samples via `next_sample`.
/// At most `MAX_LINE_LEN` bytes stay buffered between calls.
pub struct SampleParser {
    buffer: VecDeque<u8>,
    /// Bytes at the front of `buffer` already known to hold no delimiter.
    scanned: usize,
    /// Dropping the tail of an oversized line.
    discarding: bool,
}

impl SampleParser {
    pub fn new() -> Self {
        Self {
            buffer: VecDeque::with_capacity(1024),
            scanned: 0,
            discarding: false,
        }
    }

    /// Append received bytes to the internal buffer.
    pub fn push_data(&mut self, data: &[u8]) {
        self.buffer.extend(data);
    }

    /// Number of bytes waiting for a delimiter.
    pub fn buffered_len(&self) -> usize {
        self.buffer.len()
    }

    /// Try to extract the next sample from the buffer.
    /// Returns `None` if no complete line is available yet.
    pub fn next_sample(&mut self) -> Option<Result<OrientationSample, ProtocolError>> {
        loop {
            let Some(offset) = self
                .buffer
                .range(self.scanned..)
                .position(|&b| b == DELIMITER)
            else {
                return self.hold_partial_line();
            };
            let line_end = self.scanned + offset;
            let line: Vec<u8> = self.buffer.drain(..=line_end).collect();
            self.scanned = 0;

            if self.discarding {
                // Tail of a line already reported as too long.
                self.discarding = false;
                continue;
            }
            if line.len() > MAX_LINE_LEN {
                return Some(Err(ProtocolError::LineTooLong));
            }

            let Ok(text) = std::str::from_utf8(&line) else {
                return Some(Err(ProtocolError::InvalidUtf8));
            };
            let text = text.trim();
            if text.is_empty() {
                continue;
            }

            return Some(parse_line(text));
        }
    }

    /// No delimiter buffered: keep the partial line unless it is too long.
    fn hold_partial_line(&mut self) -> Option<Result<OrientationSample, ProtocolError>> {
        if self.discarding {
            self.buffer.clear();
            self.scanned = 0;
            return None;
        }
        if self.buffer.len() > MAX_LINE_LEN {
            self.buffer.clear();
            self.scanned = 0;
            self.discarding = true;
            return Some(Err(ProtocolError::LineTooLong));
        }
        self.scanned = self.buffer.len();
        None
    }
}

impl Default for SampleParser {
    fn default() -> Self {
        Self::new()
    }
}

fn parse_line(line: &str) -> Result<OrientationSample, ProtocolError> {
    Ok(serde_json::from_str(line)?)
}
