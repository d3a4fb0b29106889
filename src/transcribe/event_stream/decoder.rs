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

use crate::transcribe::error::EventStreamError;
use crate::transcribe::event_stream::frame::MIN_FRAME_LEN;
use bytes::{Bytes, BytesMut};

/// Re-frames an incoming byte stream into whole event-stream frames.
///
/// HTTP/2 DATA boundaries are arbitrary; the frame codec wants exact buffers.
/// This buffer accumulates transport chunks and splits off one frame at a
/// time, using only the `total_length` field of the prelude.
#[derive(Debug, Default)]
pub struct FrameBuffer {
    buf: BytesMut,
}

impl FrameBuffer {
    pub fn new() -> FrameBuffer {
        FrameBuffer { buf: BytesMut::new() }
    }

    /// Appends transport bytes.
    pub fn extend(&mut self, data: &[u8]) {
        self.buf.extend_from_slice(data);
    }

    /// Number of buffered bytes not yet consumed by a complete frame.
    pub fn pending(&self) -> usize {
        self.buf.len()
    }

    /// Splits off the next complete frame, or `None` until more bytes arrive.
    /// A declared length below the 16-byte minimum cannot be resynchronized
    /// and is a decode error.
    pub fn next_frame(&mut self) -> Result<Option<Bytes>, EventStreamError> {
        if self.buf.len() < 4 {
            return Ok(None);
        }
        let total_len =
            u32::from_be_bytes([self.buf[0], self.buf[1], self.buf[2], self.buf[3]]) as usize;
        if total_len < MIN_FRAME_LEN {
            return Err(EventStreamError::TooShort(total_len));
        }
        if self.buf.len() < total_len {
            return Ok(None);
        }
        Ok(Some(self.buf.split_to(total_len).freeze()))
    }
}
