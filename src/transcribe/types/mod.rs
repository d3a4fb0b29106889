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

//! Request, response and transcript types for the streaming transcription API

pub mod request;
pub mod response;
pub mod transcript;

pub use request::{
    ContentIdentificationType, ContentRedactionType, MediaEncoding, PartialResultsStability,
    StartStreamTranscriptionRequest, VocabularyFilterMethod,
};
pub use response::ResponseMetadata;
pub use transcript::{Alternative, Entity, Item, ItemType, Transcript, TranscriptEvent, TranscriptResult};
