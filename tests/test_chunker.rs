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

//! Conservation and sentinel properties of the audio chunker.

use bytes::Bytes;
use futures_util::StreamExt;
use transcribe_stream::transcribe::chunker::{AudioChunker, pcm_chunk_size};

async fn run(pieces: Vec<Vec<u8>>, chunk_size: usize) -> Vec<Bytes> {
    let input = futures_util::stream::iter(pieces.into_iter().map(Bytes::from));
    AudioChunker::new(input, chunk_size).collect().await
}

#[test]
fn cadence_formula() {
    assert_eq!(pcm_chunk_size(8_000), 3_200);
    assert_eq!(pcm_chunk_size(16_000), 6_400);
    assert_eq!(pcm_chunk_size(44_100), 17_640);
    assert_eq!(pcm_chunk_size(48_000), 19_200);
}

#[tokio::test]
async fn sixteen_khz_reference_scenario() {
    // 16,000 bytes of PCM-16 at 16 kHz, fed in 1,500-byte slices
    let mut pieces = vec![vec![0xAB; 1_500]; 10];
    pieces.push(vec![0xAB; 1_000]);

    let out = run(pieces, pcm_chunk_size(16_000)).await;
    let lens: Vec<usize> = out.iter().map(Bytes::len).collect();
    assert_eq!(lens, vec![6_400, 6_400, 3_200, 0]);
}

#[tokio::test]
async fn mass_is_conserved_for_irregular_input() {
    let sizes = [1usize, 6_399, 6_400, 6_401, 13, 0, 20_000];
    let pieces: Vec<Vec<u8>> = sizes.iter().map(|n| vec![1u8; *n]).collect();
    let total: usize = sizes.iter().sum();

    let out = run(pieces, 6_400).await;
    let produced: usize = out.iter().map(Bytes::len).sum();
    assert_eq!(produced, total);
}

#[tokio::test]
async fn content_is_preserved_in_order() {
    let data: Vec<u8> = (0..=255u8).cycle().take(10_000).collect();
    let pieces: Vec<Vec<u8>> = data.chunks(777).map(<[u8]>::to_vec).collect();

    let out = run(pieces, 4_096).await;
    let rejoined: Vec<u8> = out.iter().flat_map(|c| c.to_vec()).collect();
    assert_eq!(rejoined, data);
}

#[tokio::test]
async fn sentinel_iff_bytes_were_seen() {
    let out = run(vec![], 512).await;
    assert!(out.is_empty());

    let out = run(vec![vec![], vec![]], 512).await;
    assert!(out.is_empty());

    let out = run(vec![vec![9u8; 1]], 512).await;
    assert_eq!(out.iter().filter(|c| c.is_empty()).count(), 1);
    assert!(out.last().unwrap().is_empty());
}
