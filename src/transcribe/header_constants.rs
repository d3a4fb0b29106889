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

pub const CONTENT_TYPE: &str = "Content-Type";
pub const AUTHORIZATION: &str = "Authorization";
pub const HOST: &str = "Host";

pub const X_AMZ_DATE: &str = "X-Amz-Date";
pub const X_AMZ_TARGET: &str = "X-Amz-Target";
pub const X_AMZ_CONTENT_SHA256: &str = "X-Amz-Content-SHA256";
pub const X_AMZ_SECURITY_TOKEN: &str = "X-Amz-Security-Token";

pub const X_AMZN_REQUEST_ID: &str = "x-amzn-request-id";
pub const X_AMZN_ERRORTYPE: &str = "x-amzn-errortype";

pub const X_AMZN_TRANSCRIBE_LANGUAGE_CODE: &str = "x-amzn-transcribe-language-code";
pub const X_AMZN_TRANSCRIBE_SAMPLE_RATE: &str = "x-amzn-transcribe-sample-rate";
pub const X_AMZN_TRANSCRIBE_MEDIA_ENCODING: &str = "x-amzn-transcribe-media-encoding";
pub const X_AMZN_TRANSCRIBE_VOCABULARY_NAME: &str = "x-amzn-transcribe-vocabulary-name";
pub const X_AMZN_TRANSCRIBE_SESSION_ID: &str = "x-amzn-transcribe-session-id";
pub const X_AMZN_TRANSCRIBE_VOCABULARY_FILTER_NAME: &str =
    "x-amzn-transcribe-vocabulary-filter-name";
pub const X_AMZN_TRANSCRIBE_VOCABULARY_FILTER_METHOD: &str =
    "x-amzn-transcribe-vocabulary-filter-method";
pub const X_AMZN_TRANSCRIBE_SHOW_SPEAKER_LABEL: &str = "x-amzn-transcribe-show-speaker-label";
pub const X_AMZN_TRANSCRIBE_ENABLE_CHANNEL_IDENTIFICATION: &str =
    "x-amzn-transcribe-enable-channel-identification";
pub const X_AMZN_TRANSCRIBE_NUMBER_OF_CHANNELS: &str = "x-amzn-transcribe-number-of-channels";
pub const X_AMZN_TRANSCRIBE_ENABLE_PARTIAL_RESULTS_STABILIZATION: &str =
    "x-amzn-transcribe-enable-partial-results-stabilization";
pub const X_AMZN_TRANSCRIBE_PARTIAL_RESULTS_STABILITY: &str =
    "x-amzn-transcribe-partial-results-stability";
pub const X_AMZN_TRANSCRIBE_CONTENT_IDENTIFICATION_TYPE: &str =
    "x-amzn-transcribe-content-identification-type";
pub const X_AMZN_TRANSCRIBE_CONTENT_REDACTION_TYPE: &str =
    "x-amzn-transcribe-content-redaction-type";
pub const X_AMZN_TRANSCRIBE_PII_ENTITY_TYPES: &str = "x-amzn-transcribe-pii-entity-types";
pub const X_AMZN_TRANSCRIBE_LANGUAGE_MODEL_NAME: &str = "x-amzn-transcribe-language-model-name";
pub const X_AMZN_TRANSCRIBE_IDENTIFY_LANGUAGE: &str = "x-amzn-transcribe-identify-language";
pub const X_AMZN_TRANSCRIBE_LANGUAGE_OPTIONS: &str = "x-amzn-transcribe-language-options";
pub const X_AMZN_TRANSCRIBE_PREFERRED_LANGUAGE: &str = "x-amzn-transcribe-preferred-language";
pub const X_AMZN_TRANSCRIBE_IDENTIFY_MULTIPLE_LANGUAGES: &str =
    "x-amzn-transcribe-identify-multiple-languages";
pub const X_AMZN_TRANSCRIBE_VOCABULARY_NAMES: &str = "x-amzn-transcribe-vocabulary-names";
pub const X_AMZN_TRANSCRIBE_VOCABULARY_FILTER_NAMES: &str =
    "x-amzn-transcribe-vocabulary-filter-names";

/// Content-type of the HTTP/2 request and response bodies.
pub const CONTENT_TYPE_EVENT_STREAM: &str = "application/vnd.amazon.eventstream";

/// Value of `x-amz-content-sha256` for a body whose hash cannot be known up
/// front because every frame is signed individually.
pub const STREAMING_EVENTS_PAYLOAD: &str = "STREAMING-AWS4-HMAC-SHA256-EVENTS";

/// Target operation of the initial request.
pub const START_STREAM_TRANSCRIPTION_TARGET: &str =
    "com.amazonaws.transcribe.Transcribe.StartStreamTranscription";

// Event-stream header names. The leading colon marks protocol-owned headers.
pub const EVENT_MESSAGE_TYPE: &str = ":message-type";
pub const EVENT_EVENT_TYPE: &str = ":event-type";
pub const EVENT_EXCEPTION_TYPE: &str = ":exception-type";
pub const EVENT_CONTENT_TYPE: &str = ":content-type";
pub const EVENT_DATE: &str = ":date";
pub const EVENT_CHUNK_SIGNATURE: &str = ":chunk-signature";

pub const MESSAGE_TYPE_EVENT: &str = "event";
pub const MESSAGE_TYPE_EXCEPTION: &str = "exception";
pub const MESSAGE_TYPE_ERROR: &str = "error";

pub const EVENT_TYPE_AUDIO_EVENT: &str = "AudioEvent";
pub const EVENT_TYPE_TRANSCRIPT_EVENT: &str = "TranscriptEvent";

pub const CONTENT_TYPE_OCTET_STREAM: &str = "application/octet-stream";
pub const CONTENT_TYPE_JSON: &str = "application/json";
