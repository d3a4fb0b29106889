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

//! Outbound pipeline: audio chunks become signed event-stream frames ready
//! for the HTTP/2 request body.
//!
//! Each chunk is wrapped into an `AudioEvent` frame, encoded, signed (the
//! encoded frame is the signed payload) and encoded again as the outer wire
//! frame. The zero-length sentinel from the chunker maps to the terminal
//! frame: a signed frame with an empty payload. Ordering is strict FIFO; the
//! signature chain forbids reordering or skipping.

use crate::transcribe::error::Error;
use crate::transcribe::event_stream::frame::Message;
use crate::transcribe::event_stream::header::HeaderValue;
use crate::transcribe::header_constants::{
    CONTENT_TYPE_OCTET_STREAM, EVENT_CONTENT_TYPE, EVENT_EVENT_TYPE, EVENT_MESSAGE_TYPE,
    EVENT_TYPE_AUDIO_EVENT, MESSAGE_TYPE_EVENT,
};
use crate::transcribe::signer::EventSigner;
use bytes::Bytes;
use futures_util::Stream;
use log::debug;
use std::pin::Pin;
use std::task::{Context, Poll};

/// Wraps an audio chunk into an `AudioEvent` event-stream message.
fn audio_event(chunk: Bytes) -> Message {
    Message::new(chunk)
        .add_header(EVENT_CONTENT_TYPE, HeaderValue::String(CONTENT_TYPE_OCTET_STREAM.into()))
        .add_header(EVENT_EVENT_TYPE, HeaderValue::String(EVENT_TYPE_AUDIO_EVENT.into()))
        .add_header(EVENT_MESSAGE_TYPE, HeaderValue::String(MESSAGE_TYPE_EVENT.into()))
}

/// Stream adapter that frames and signs every chunk produced by the inner
/// stream. The signer is owned here: this stage is the sole mutator of the
/// signature chain.
pub struct SignedEventStream<S> {
    inner: S,
    signer: EventSigner,
    done: bool,
}

impl<S> SignedEventStream<S> {
    pub fn new(inner: S, signer: EventSigner) -> Self {
        Self {
            inner,
            signer,
            done: false,
        }
    }

    fn next_frame(&mut self, chunk: Bytes) -> Result<Bytes, Error> {
        let signed = if chunk.is_empty() {
            // terminal marker: empty signed payload, no inner frame
            debug!("signing terminal event-stream frame");
            self.signer.sign(Bytes::new())?
        } else {
            let inner_frame = audio_event(chunk).to_bytes()?;
            self.signer.sign(inner_frame)?
        };
        Ok(signed.to_bytes()?)
    }
}

impl<S> Stream for SignedEventStream<S>
where
    S: Stream<Item = Bytes> + Unpin,
{
    type Item = Result<Bytes, Error>;

    fn poll_next(mut self: Pin<&mut Self>, cx: &mut Context<'_>) -> Poll<Option<Self::Item>> {
        if self.done {
            return Poll::Ready(None);
        }

        let inner = Pin::new(&mut self.inner);
        match inner.poll_next(cx) {
            Poll::Ready(Some(chunk)) => {
                let terminal = chunk.is_empty();
                let item = self.next_frame(chunk);
                if terminal || item.is_err() {
                    self.done = true;
                }
                Poll::Ready(Some(item))
            }
            Poll::Ready(None) => {
                self.done = true;
                Poll::Ready(None)
            }
            Poll::Pending => Poll::Pending,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::transcribe::creds::Credentials;
    use crate::transcribe::event_stream::header::Header;
    use crate::transcribe::header_constants::{EVENT_CHUNK_SIGNATURE, EVENT_DATE};
    use crate::transcribe::utils::utc_now;
    use futures_util::StreamExt;

    fn test_signer() -> EventSigner {
        let creds = Credentials {
            access_key: "test".into(),
            secret_key: "secret".into(),
            session_token: None,
            expiration: None,
        };
        EventSigner::new("us-east-1", &creds, utc_now(), "0".repeat(64))
    }

    fn header_names(message: &Message) -> Vec<&str> {
        message.headers().iter().map(Header::name).collect()
    }

    #[tokio::test]
    async fn test_chunks_become_signed_audio_events() {
        let chunks = vec![Bytes::from_static(b"first"), Bytes::from_static(b"second")];
        let stream =
            SignedEventStream::new(futures_util::stream::iter(chunks.clone()), test_signer());
        let frames: Vec<Bytes> = stream.map(Result::unwrap).collect().await;
        assert_eq!(frames.len(), 2);

        for (frame, chunk) in frames.iter().zip(&chunks) {
            let outer = Message::from_bytes(frame).unwrap();
            assert_eq!(header_names(&outer), vec![EVENT_DATE, EVENT_CHUNK_SIGNATURE]);

            let inner = Message::from_bytes(outer.payload()).unwrap();
            assert_eq!(inner.string_header(":message-type"), Some("event"));
            assert_eq!(inner.string_header(":event-type"), Some("AudioEvent"));
            assert_eq!(inner.string_header(":content-type"), Some("application/octet-stream"));
            assert_eq!(inner.payload(), chunk);
        }
    }

    #[tokio::test]
    async fn test_sentinel_becomes_empty_signed_frame() {
        let chunks = vec![Bytes::from_static(b"audio"), Bytes::new()];
        let stream = SignedEventStream::new(futures_util::stream::iter(chunks), test_signer());
        let frames: Vec<Bytes> = stream.map(Result::unwrap).collect().await;
        assert_eq!(frames.len(), 2);

        let terminal = Message::from_bytes(&frames[1]).unwrap();
        assert_eq!(header_names(&terminal), vec![EVENT_DATE, EVENT_CHUNK_SIGNATURE]);
        assert!(terminal.payload().is_empty());
    }

    #[tokio::test]
    async fn test_signatures_chain_in_fifo_order() {
        let chunks = vec![
            Bytes::from_static(b"a"),
            Bytes::from_static(b"b"),
            Bytes::new(),
        ];
        let stream = SignedEventStream::new(futures_util::stream::iter(chunks), test_signer());
        let frames: Vec<Bytes> = stream.map(Result::unwrap).collect().await;

        let signatures: Vec<Bytes> = frames
            .iter()
            .map(|f| {
                Message::from_bytes(f)
                    .unwrap()
                    .header(EVENT_CHUNK_SIGNATURE)
                    .and_then(HeaderValue::as_bytes)
                    .cloned()
                    .unwrap()
            })
            .collect();
        assert_eq!(signatures.len(), 3);
        assert!(signatures.iter().all(|s| s.len() == 32));
        // a chained signer never repeats a signature
        assert_ne!(signatures[0], signatures[1]);
        assert_ne!(signatures[1], signatures[2]);
    }
}
