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

//! Implementation of the Amazon Transcribe streaming transcription client

pub mod chunker;
pub mod client;
pub mod creds;
pub mod error;
pub mod event_stream;
pub mod header_constants;
pub mod inbound;
pub mod multimap_ext;
pub mod outbound;
pub mod signer;
pub mod transcription;
pub mod types;
pub mod utils;

#[cfg(test)]
mod signer_tests;

pub use client::{TranscribeClient, TranscribeClientBuilder};
