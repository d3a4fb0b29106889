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

//! Error definitions for streaming transcription operations

use bytes::Bytes;
use serde::Deserialize;
use thiserror::Error;

/// Errors raised while encoding or decoding event-stream frames and their
/// typed headers.
///
/// Decode errors from the inbound demultiplexer are surfaced on the event
/// source but do not tear down the stream; a single malformed frame does not
/// kill the session.
#[derive(Clone, Debug, Error, PartialEq)]
pub enum EventStreamError {
    #[error("frame too short; got {0} bytes, minimum is 16")]
    TooShort(usize),

    #[error("frame length mismatch; prelude declares {declared} bytes, buffer has {actual}")]
    LengthMismatch { declared: u32, actual: usize },

    #[error("prelude checksum mismatch; expected: {expected:08X}, got: {got:08X}")]
    PreludeChecksumMismatch { expected: u32, got: u32 },

    #[error("message checksum mismatch; expected: {expected:08X}, got: {got:08X}")]
    MessageChecksumMismatch { expected: u32, got: u32 },

    #[error("headers length {0} does not fit in frame")]
    InvalidHeadersLength(u32),

    #[error("header block truncated")]
    HeaderTruncated,

    #[error("invalid header value type {0}")]
    InvalidHeaderValueType(u8),

    #[error("header name or string value is not valid UTF-8")]
    InvalidUtf8,

    #[error("header name length {0} exceeds 255 bytes")]
    HeaderNameTooLong(usize),

    #[error("header value length {0} exceeds 65535 bytes")]
    HeaderValueTooLong(usize),

    #[error("frame length {0} exceeds the wire limit")]
    FrameTooLong(usize),
}

/// Violations of the event-stream dispatch contract. These are terminal: the
/// peer is not speaking the protocol we expect.
#[derive(Clone, Debug, Error, PartialEq)]
pub enum ProtocolError {
    #[error("unexpected message type {0:?}")]
    UnexpectedMessageType(String),

    #[error("unexpected event type {0:?}")]
    UnexpectedEventType(String),

    #[error("unexpected content type {0:?}")]
    UnexpectedContentType(String),

    #[error("missing required header {0:?}")]
    MissingHeader(&'static str),
}

/// Service exceptions decoded from inbound `exception` frames or from HTTP
/// error responses, parametric on the exception type the service names.
#[derive(Clone, Debug, Error, PartialEq)]
pub enum TranscribeServerError {
    #[error("bad request: {0}")]
    BadRequest(String),

    #[error("limit exceeded: {0}")]
    LimitExceeded(String),

    #[error("internal failure: {0}")]
    InternalFailure(String),

    #[error("conflict: {0}")]
    Conflict(String),

    #[error("service unavailable: {0}")]
    ServiceUnavailable(String),

    #[error("service error {error_type} (HTTP {status}): {message}")]
    Http {
        status: u16,
        error_type: String,
        message: String,
    },

    #[error("service error {error_type}: {message}")]
    Other { error_type: String, message: String },
}

/// JSON error document the service sends in exception frame payloads and HTTP
/// error bodies.
#[derive(Debug, Default, Deserialize)]
struct ErrorDocument {
    #[serde(rename = "Message", alias = "message")]
    message: Option<String>,
}

fn error_message(body: &[u8]) -> String {
    serde_json::from_slice::<ErrorDocument>(body)
        .ok()
        .and_then(|doc| doc.message)
        .unwrap_or_default()
}

impl TranscribeServerError {
    /// Builds a typed exception from an inbound `exception` frame's
    /// `:exception-type` header and JSON payload.
    pub fn from_exception_frame(exception_type: &str, payload: &[u8]) -> Self {
        let message = error_message(payload);
        match exception_type {
            "BadRequestException" => TranscribeServerError::BadRequest(message),
            "LimitExceededException" => TranscribeServerError::LimitExceeded(message),
            "InternalFailureException" => TranscribeServerError::InternalFailure(message),
            "ConflictException" => TranscribeServerError::Conflict(message),
            "ServiceUnavailableException" => TranscribeServerError::ServiceUnavailable(message),
            other => TranscribeServerError::Other {
                error_type: other.to_string(),
                message,
            },
        }
    }

    /// Builds a typed exception from an HTTP error response. `error_type` is
    /// the `x-amzn-errortype` header; only the portion before `:` selects the
    /// variant. Falls back to the numeric status when the header is absent.
    pub fn from_http_response(status: u16, error_type: Option<&str>, body: &Bytes) -> Self {
        match error_type.map(|v| v.split(':').next().unwrap_or(v)) {
            Some(name) => Self::from_exception_frame(name, body),
            None => TranscribeServerError::Http {
                status,
                error_type: status.to_string(),
                message: error_message(body),
            },
        }
    }
}

/// Error definitions for all streaming transcription operations.
#[derive(Debug, Error)]
pub enum Error {
    #[error(transparent)]
    EventStream(#[from] EventStreamError),

    #[error(transparent)]
    Protocol(#[from] ProtocolError),

    #[error(transparent)]
    Service(#[from] TranscribeServerError),

    #[error(transparent)]
    Http(#[from] reqwest::Error),

    #[error("transcript payload is not valid JSON: {0}")]
    Json(#[from] serde_json::Error),

    #[error("sample rate {0} Hz is not supported; allowed range is 8000..=48000")]
    InvalidSampleRate(u32),

    #[error("{0}")]
    InvalidRequest(String),

    #[error("audio stream is closed")]
    AudioStreamClosed,
}

impl Error {
    /// Whether the inbound pipeline keeps running after surfacing this error.
    /// Only codec-level decode failures are recoverable; protocol violations,
    /// service exceptions and transport failures end the session.
    pub fn is_terminal(&self) -> bool {
        !matches!(self, Error::EventStream(_) | Error::Json(_))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_exception_frame_variants() {
        let body = br#"{"Message":"bad vocabulary"}"#;
        let err = TranscribeServerError::from_exception_frame("BadRequestException", body);
        assert_eq!(err, TranscribeServerError::BadRequest("bad vocabulary".into()));

        let err = TranscribeServerError::from_exception_frame("SomeNewException", body);
        assert_eq!(
            err,
            TranscribeServerError::Other {
                error_type: "SomeNewException".into(),
                message: "bad vocabulary".into(),
            }
        );
    }

    #[test]
    fn test_http_response_error_type_prefix() {
        let body = Bytes::from_static(br#"{"Message":"too many streams"}"#);
        let err = TranscribeServerError::from_http_response(
            429,
            Some("LimitExceededException:http://internal"),
            &body,
        );
        assert_eq!(err, TranscribeServerError::LimitExceeded("too many streams".into()));
    }

    #[test]
    fn test_http_response_without_error_type() {
        let body = Bytes::from_static(b"not json");
        let err = TranscribeServerError::from_http_response(503, None, &body);
        assert_eq!(
            err,
            TranscribeServerError::Http {
                status: 503,
                error_type: "503".into(),
                message: String::new(),
            }
        );
    }

    #[test]
    fn test_terminal_classification() {
        assert!(!Error::EventStream(EventStreamError::TooShort(3)).is_terminal());
        assert!(Error::Protocol(ProtocolError::UnexpectedMessageType("x".into())).is_terminal());
        assert!(Error::Service(TranscribeServerError::Conflict(String::new())).is_terminal());
    }
}
