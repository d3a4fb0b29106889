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

//! Repacketizes an arbitrary inbound byte stream into fixed-size audio
//! chunks, flushing the remainder on close and terminating with exactly one
//! zero-length sentinel chunk when any audio was seen. The sentinel, once
//! framed and signed downstream, is the end-of-stream indicator.

use bytes::{Bytes, BytesMut};
use futures_util::Stream;
use std::pin::Pin;
use std::task::{Context, Poll};

/// Audio frame cadence the chunk size is derived from.
const CHUNK_CADENCE_MS: usize = 200;

/// Chunk size in bytes for 16-bit PCM at the given sample rate and a 200 ms
/// cadence.
pub fn pcm_chunk_size(sample_rate_hz: u32) -> usize {
    (sample_rate_hz as usize * 2 * CHUNK_CADENCE_MS) / 1000
}

/// State machine for the chunker.
#[derive(Clone, Copy)]
enum ChunkerState {
    /// Buffering input and emitting full chunks
    Streaming,
    /// Input exhausted; emitting the partial remainder
    Flush,
    /// Emitting the zero-length terminal chunk
    Sentinel,
    /// Done
    Done,
}

/// Stream adapter that cuts the inner byte stream into `chunk_size` pieces.
///
/// A `chunk_size` of zero disables repacketization: input slices pass through
/// untouched, though the terminal sentinel is still emitted on close.
pub struct AudioChunker<S> {
    inner: S,
    chunk_size: usize,
    buf: BytesMut,
    seen_bytes: bool,
    state: ChunkerState,
}

impl<S> AudioChunker<S> {
    pub fn new(inner: S, chunk_size: usize) -> Self {
        Self {
            inner,
            chunk_size,
            buf: BytesMut::new(),
            seen_bytes: false,
            state: ChunkerState::Streaming,
        }
    }
}

impl<S> Stream for AudioChunker<S>
where
    S: Stream<Item = Bytes> + Unpin,
{
    type Item = Bytes;

    fn poll_next(mut self: Pin<&mut Self>, cx: &mut Context<'_>) -> Poll<Option<Self::Item>> {
        loop {
            match self.state {
                ChunkerState::Streaming => {
                    // one input slice can span several chunks; drain before polling
                    if self.chunk_size > 0 && self.buf.len() >= self.chunk_size {
                        let size = self.chunk_size;
                        let chunk = self.buf.split_to(size).freeze();
                        return Poll::Ready(Some(chunk));
                    }

                    let inner = Pin::new(&mut self.inner);
                    match inner.poll_next(cx) {
                        Poll::Ready(Some(data)) => {
                            if data.is_empty() {
                                continue;
                            }
                            self.seen_bytes = true;
                            if self.chunk_size == 0 {
                                return Poll::Ready(Some(data));
                            }
                            self.buf.extend_from_slice(&data);
                        }
                        Poll::Ready(None) => {
                            self.state = ChunkerState::Flush;
                        }
                        Poll::Pending => {
                            return Poll::Pending;
                        }
                    }
                }

                ChunkerState::Flush => {
                    self.state = ChunkerState::Sentinel;
                    if !self.buf.is_empty() {
                        let rest = self.buf.split().freeze();
                        return Poll::Ready(Some(rest));
                    }
                }

                ChunkerState::Sentinel => {
                    self.state = ChunkerState::Done;
                    if self.seen_bytes {
                        return Poll::Ready(Some(Bytes::new()));
                    }
                }

                ChunkerState::Done => {
                    return Poll::Ready(None);
                }
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use futures_util::StreamExt;

    async fn collect(chunker: AudioChunker<impl Stream<Item = Bytes> + Unpin>) -> Vec<Bytes> {
        chunker.collect().await
    }

    #[tokio::test]
    async fn test_16khz_pcm_scenario() {
        let chunk_size = pcm_chunk_size(16_000);
        assert_eq!(chunk_size, 6400);

        // 16,000 bytes fed in 1,500-byte pieces
        let input: Vec<Bytes> = (0..10)
            .map(|_| Bytes::from(vec![0x42u8; 1500]))
            .chain(std::iter::once(Bytes::from(vec![0x42u8; 1000])))
            .collect();
        assert_eq!(input.iter().map(Bytes::len).sum::<usize>(), 16_000);

        let out = collect(AudioChunker::new(futures_util::stream::iter(input), chunk_size)).await;

        let lens: Vec<usize> = out.iter().map(Bytes::len).collect();
        assert_eq!(lens, vec![6400, 6400, 3200, 0]);
    }

    #[tokio::test]
    async fn test_mass_conservation() {
        let pieces: Vec<Bytes> = [3usize, 700, 41, 1024, 9, 0, 511]
            .iter()
            .map(|n| Bytes::from(vec![7u8; *n]))
            .collect();
        let total: usize = pieces.iter().map(Bytes::len).sum();

        let out = collect(AudioChunker::new(futures_util::stream::iter(pieces), 256)).await;

        assert_eq!(out.iter().map(Bytes::len).sum::<usize>(), total);
        // all but the last two chunks are full-sized
        for chunk in &out[..out.len() - 2] {
            assert_eq!(chunk.len(), 256);
        }
        assert_eq!(out.last().map(Bytes::len), Some(0));
    }

    #[tokio::test]
    async fn test_no_sentinel_without_input() {
        let out = collect(AudioChunker::new(futures_util::stream::iter(Vec::<Bytes>::new()), 256))
            .await;
        assert!(out.is_empty());

        // empty slices do not count as input either
        let out = collect(AudioChunker::new(
            futures_util::stream::iter(vec![Bytes::new(), Bytes::new()]),
            256,
        ))
        .await;
        assert!(out.is_empty());
    }

    #[tokio::test]
    async fn test_exactly_one_sentinel() {
        let out = collect(AudioChunker::new(
            futures_util::stream::iter(vec![Bytes::from(vec![1u8; 512])]),
            256,
        ))
        .await;
        let sentinels = out.iter().filter(|c| c.is_empty()).count();
        assert_eq!(sentinels, 1);
        assert!(out.last().unwrap().is_empty());
    }

    #[tokio::test]
    async fn test_pass_through_when_disabled() {
        let pieces = vec![Bytes::from_static(b"abc"), Bytes::from_static(b"defgh")];
        let out = collect(AudioChunker::new(futures_util::stream::iter(pieces.clone()), 0)).await;
        assert_eq!(out[..2], pieces[..]);
        assert_eq!(out.len(), 3);
        assert!(out[2].is_empty());
    }

    #[tokio::test]
    async fn test_input_exactly_divisible_flushes_nothing() {
        let out = collect(AudioChunker::new(
            futures_util::stream::iter(vec![Bytes::from(vec![5u8; 512])]),
            256,
        ))
        .await;
        let lens: Vec<usize> = out.iter().map(Bytes::len).collect();
        assert_eq!(lens, vec![256, 256, 0]);
    }
}
