// Transcribe Stream Rust Library for Amazon Transcribe real-time speech-to-text
// Copyright 2025 Transcribe Stream Contributors
//
// Licensed under the Apache License, Version 2.0 (the "License");
// you may not use this file except in compliance with the License.
// You may obtain a copy of the License at
//
//     http://www.apache.org/licenses/LICENSE-2.0
//
// Unless required by applicable law or agreed to in writing, software
// distributed under the License is distributed on an "AS IS" BASIS,
// WITHOUT WARRANTIES OR CONDITIONS OF ANY KIND, either express or implied.
// See the License for the specific language governing permissions and
// limitations under the License.

//! Event-stream frame codec.
//!
//! Wire layout, big-endian:
//! `total_length:u32 | headers_length:u32 | prelude_crc:u32 | headers |
//! payload | message_crc:u32`. `total_length` includes itself and both
//! checksums; `prelude_crc` covers bytes `[0, 8)`; `message_crc` covers every
//! byte preceding it.

use crate::transcribe::error::EventStreamError;
use crate::transcribe::event_stream::header::{
    self, Header, HeaderValue, decode_headers, encode_headers,
};
use crate::transcribe::utils::crc32;
use bytes::{BufMut, Bytes, BytesMut};

/// Prelude plus trailing checksum; the size of a frame with no headers and no
/// payload.
pub const MIN_FRAME_LEN: usize = 16;

/// An event-stream message: an ordered header list plus an opaque payload.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct Message {
    headers: Vec<Header>,
    payload: Bytes,
}

impl Message {
    /// Creates a message with the given payload. Headers can be added later.
    pub fn new(payload: impl Into<Bytes>) -> Message {
        Message {
            headers: Vec::new(),
            payload: payload.into(),
        }
    }

    /// Adds a header to the message.
    pub fn add_header(mut self, name: impl Into<String>, value: HeaderValue) -> Self {
        self.headers.push(Header::new(name, value));
        self
    }

    pub fn headers(&self) -> &[Header] {
        &self.headers
    }

    pub fn payload(&self) -> &Bytes {
        &self.payload
    }

    pub fn into_payload(self) -> Bytes {
        self.payload
    }

    /// Looks up a header by name; duplicate names resolve to the first match.
    pub fn header(&self, name: &str) -> Option<&HeaderValue> {
        header::find(&self.headers, name)
    }

    /// First `String` header with the given name.
    pub fn string_header(&self, name: &str) -> Option<&str> {
        header::find_string(&self.headers, name)
    }

    /// Length of the wire frame [`Message::to_bytes`] produces.
    pub fn encoded_len(&self) -> usize {
        MIN_FRAME_LEN + header::encoded_len(&self.headers) + self.payload.len()
    }

    /// Encodes the message as one wire frame.
    pub fn to_bytes(&self) -> Result<Bytes, EventStreamError> {
        let header_block = encode_headers(&self.headers)?;
        let total_len = MIN_FRAME_LEN + header_block.len() + self.payload.len();
        let total_len_u32 =
            u32::try_from(total_len).map_err(|_| EventStreamError::FrameTooLong(total_len))?;

        let mut buf = BytesMut::with_capacity(total_len);
        buf.put_u32(total_len_u32);
        buf.put_u32(header_block.len() as u32);
        let prelude_crc = crc32(&buf[..8]);
        buf.put_u32(prelude_crc);
        buf.put_slice(&header_block);
        buf.put_slice(&self.payload);
        let message_crc = crc32(&buf[..]);
        buf.put_u32(message_crc);
        Ok(buf.freeze())
    }

    /// Decodes exactly one frame from `buf`. The buffer must hold the frame
    /// and nothing else; re-framing a byte stream is the extractor's job.
    pub fn from_bytes(buf: &[u8]) -> Result<Message, EventStreamError> {
        if buf.len() < MIN_FRAME_LEN {
            return Err(EventStreamError::TooShort(buf.len()));
        }

        let total_len = u32::from_be_bytes([buf[0], buf[1], buf[2], buf[3]]);
        if total_len as usize != buf.len() {
            return Err(EventStreamError::LengthMismatch {
                declared: total_len,
                actual: buf.len(),
            });
        }

        let expected = u32::from_be_bytes([buf[8], buf[9], buf[10], buf[11]]);
        let got = crc32(&buf[..8]);
        if expected != got {
            return Err(EventStreamError::PreludeChecksumMismatch { expected, got });
        }

        let crc_offset = buf.len() - 4;
        let expected = u32::from_be_bytes([
            buf[crc_offset],
            buf[crc_offset + 1],
            buf[crc_offset + 2],
            buf[crc_offset + 3],
        ]);
        let got = crc32(&buf[..crc_offset]);
        if expected != got {
            return Err(EventStreamError::MessageChecksumMismatch { expected, got });
        }

        let headers_len = u32::from_be_bytes([buf[4], buf[5], buf[6], buf[7]]);
        let headers_end = 12usize
            .checked_add(headers_len as usize)
            .filter(|end| *end <= crc_offset)
            .ok_or(EventStreamError::InvalidHeadersLength(headers_len))?;

        let headers = decode_headers(&buf[12..headers_end])?;
        let payload = Bytes::copy_from_slice(&buf[headers_end..crc_offset]);

        Ok(Message { headers, payload })
    }
}
