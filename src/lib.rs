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

pub mod transcribe;

pub use transcribe::client::{
    AudioSink, StartStreamTranscriptionOutput, TranscribeClient, TranscribeClientBuilder,
    TranscriptStream,
};
pub use transcribe::creds::{Credentials, Provider, StaticProvider};
pub use transcribe::error::{Error, EventStreamError, ProtocolError, TranscribeServerError};
pub use transcribe::transcription::{PlainTextTranscription, TranscriptionStrategy};
pub use transcribe::types::{
    MediaEncoding, StartStreamTranscriptionRequest, TranscriptEvent,
};
