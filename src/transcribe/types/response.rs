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

use crate::transcribe::header_constants::*;
use http::HeaderMap;

/// Metadata of an accepted StartStreamTranscription response, taken from the
/// initial HTTP/2 headers. The service echoes the effective session
/// parameters back.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct ResponseMetadata {
    pub request_id: Option<String>,
    pub language_code: Option<String>,
    pub media_sample_rate_hz: Option<u32>,
    pub media_encoding: Option<String>,
    pub session_id: Option<String>,
}

fn header_str(headers: &HeaderMap, name: &str) -> Option<String> {
    headers
        .get(name)
        .and_then(|v| v.to_str().ok())
        .map(String::from)
}

impl ResponseMetadata {
    pub fn from_headers(headers: &HeaderMap) -> ResponseMetadata {
        ResponseMetadata {
            request_id: header_str(headers, X_AMZN_REQUEST_ID),
            language_code: header_str(headers, X_AMZN_TRANSCRIBE_LANGUAGE_CODE),
            media_sample_rate_hz: header_str(headers, X_AMZN_TRANSCRIBE_SAMPLE_RATE)
                .and_then(|v| v.parse().ok()),
            media_encoding: header_str(headers, X_AMZN_TRANSCRIBE_MEDIA_ENCODING),
            session_id: header_str(headers, X_AMZN_TRANSCRIBE_SESSION_ID),
        }
    }
}
