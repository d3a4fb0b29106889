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

//! Inbound pipeline: demultiplexes the HTTP/2 response byte stream into
//! decoded transcript events, typed service exceptions and protocol errors.
//!
//! Frames are routed by `:message-type`. A malformed frame is surfaced as an
//! error without ending the stream; protocol violations and service
//! exceptions are terminal.

use crate::transcribe::error::{Error, ProtocolError, TranscribeServerError};
use crate::transcribe::event_stream::decoder::FrameBuffer;
use crate::transcribe::event_stream::frame::Message;
use crate::transcribe::header_constants::{
    CONTENT_TYPE_JSON, EVENT_CONTENT_TYPE, EVENT_EVENT_TYPE, EVENT_EXCEPTION_TYPE,
    EVENT_MESSAGE_TYPE, EVENT_TYPE_TRANSCRIPT_EVENT, MESSAGE_TYPE_EVENT, MESSAGE_TYPE_EXCEPTION,
};
use crate::transcribe::types::TranscriptEvent;
use bytes::Bytes;
use futures_util::Stream;
use log::{debug, warn};
use std::pin::Pin;
use std::task::{Context, Poll};

/// Stream adapter turning transport bytes into transcript events.
///
/// Generic over the inner byte stream so the demultiplexer is testable
/// without a connection; the client feeds it `Response::bytes_stream`.
pub struct EventStreamReader<S> {
    inner: S,
    frames: FrameBuffer,
    done: bool,
}

impl<S> EventStreamReader<S> {
    pub fn new(inner: S) -> Self {
        Self {
            inner,
            frames: FrameBuffer::new(),
            done: false,
        }
    }

    fn dispatch(&self, frame: Bytes) -> Result<TranscriptEvent, Error> {
        let message = Message::from_bytes(&frame)?;

        let message_type = message
            .string_header(EVENT_MESSAGE_TYPE)
            .ok_or(ProtocolError::MissingHeader(EVENT_MESSAGE_TYPE))?;

        match message_type {
            MESSAGE_TYPE_EVENT => {
                let event_type = message
                    .string_header(EVENT_EVENT_TYPE)
                    .ok_or(ProtocolError::MissingHeader(EVENT_EVENT_TYPE))?;
                if event_type != EVENT_TYPE_TRANSCRIPT_EVENT {
                    return Err(ProtocolError::UnexpectedEventType(event_type.to_string()).into());
                }
                if let Some(content_type) = message.string_header(EVENT_CONTENT_TYPE)
                    && content_type != CONTENT_TYPE_JSON
                {
                    return Err(
                        ProtocolError::UnexpectedContentType(content_type.to_string()).into()
                    );
                }
                Ok(serde_json::from_slice(message.payload())?)
            }
            MESSAGE_TYPE_EXCEPTION => {
                let exception_type = message
                    .string_header(EVENT_EXCEPTION_TYPE)
                    .ok_or(ProtocolError::MissingHeader(EVENT_EXCEPTION_TYPE))?;
                Err(TranscribeServerError::from_exception_frame(
                    exception_type,
                    message.payload(),
                )
                .into())
            }
            // `error` frames and anything else end the session
            other => Err(ProtocolError::UnexpectedMessageType(other.to_string()).into()),
        }
    }
}

impl<S, E> Stream for EventStreamReader<S>
where
    S: Stream<Item = Result<Bytes, E>> + Unpin,
    E: Into<Error>,
{
    type Item = Result<TranscriptEvent, Error>;

    fn poll_next(mut self: Pin<&mut Self>, cx: &mut Context<'_>) -> Poll<Option<Self::Item>> {
        if self.done {
            return Poll::Ready(None);
        }

        loop {
            // drain buffered frames before touching the transport
            match self.frames.next_frame() {
                Ok(Some(frame)) => {
                    let item = self.dispatch(frame);
                    if let Err(err) = &item
                        && err.is_terminal()
                    {
                        self.done = true;
                    }
                    return Poll::Ready(Some(item));
                }
                Ok(None) => {}
                Err(e) => {
                    // unlike a bad frame, a corrupt total_length leaves no
                    // boundary to skip to; the remaining bytes cannot be
                    // re-delimited, so this one decode error is terminal
                    self.done = true;
                    return Poll::Ready(Some(Err(e.into())));
                }
            }

            let inner = Pin::new(&mut self.inner);
            match inner.poll_next(cx) {
                Poll::Ready(Some(Ok(chunk))) => {
                    self.frames.extend(&chunk);
                }
                Poll::Ready(Some(Err(e))) => {
                    self.done = true;
                    return Poll::Ready(Some(Err(e.into())));
                }
                Poll::Ready(None) => {
                    if self.frames.pending() > 0 {
                        warn!(
                            "response stream ended with {} unconsumed bytes",
                            self.frames.pending()
                        );
                    }
                    debug!("event stream finished");
                    self.done = true;
                    return Poll::Ready(None);
                }
                Poll::Pending => {
                    return Poll::Pending;
                }
            }
        }
    }
}
