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

//! Request parameters of the StartStreamTranscription operation and their
//! mapping onto `x-amzn-transcribe-*` request headers.

use crate::transcribe::header_constants::*;
use crate::transcribe::multimap_ext::{Multimap, MultimapExt};
use typed_builder::TypedBuilder;

/// Encoding of the audio the sink will receive.
#[derive(Clone, Copy, Debug, PartialEq)]
pub enum MediaEncoding {
    Pcm,
    OggOpus,
    Flac,
}

impl MediaEncoding {
    pub fn as_str(&self) -> &'static str {
        match self {
            MediaEncoding::Pcm => "pcm",
            MediaEncoding::OggOpus => "ogg-opus",
            MediaEncoding::Flac => "flac",
        }
    }
}

#[derive(Clone, Copy, Debug, PartialEq)]
pub enum VocabularyFilterMethod {
    Remove,
    Mask,
    Tag,
}

impl VocabularyFilterMethod {
    pub fn as_str(&self) -> &'static str {
        match self {
            VocabularyFilterMethod::Remove => "remove",
            VocabularyFilterMethod::Mask => "mask",
            VocabularyFilterMethod::Tag => "tag",
        }
    }
}

#[derive(Clone, Copy, Debug, PartialEq)]
pub enum PartialResultsStability {
    High,
    Medium,
    Low,
}

impl PartialResultsStability {
    pub fn as_str(&self) -> &'static str {
        match self {
            PartialResultsStability::High => "high",
            PartialResultsStability::Medium => "medium",
            PartialResultsStability::Low => "low",
        }
    }
}

#[derive(Clone, Copy, Debug, PartialEq)]
pub enum ContentIdentificationType {
    PiiAll,
}

impl ContentIdentificationType {
    pub fn as_str(&self) -> &'static str {
        match self {
            ContentIdentificationType::PiiAll => "PII",
        }
    }
}

#[derive(Clone, Copy, Debug, PartialEq)]
pub enum ContentRedactionType {
    PiiAll,
}

impl ContentRedactionType {
    pub fn as_str(&self) -> &'static str {
        match self {
            ContentRedactionType::PiiAll => "PII",
        }
    }
}

/// Parameters of one streaming transcription session.
///
/// Language codes are open-ended strings (`"en-US"`, `"de-DE"`, …); the
/// service vocabulary grows faster than any enum would.
#[derive(Clone, Debug, TypedBuilder)]
pub struct StartStreamTranscriptionRequest {
    /// Sample rate of the audio in Hertz, 8000 to 48000.
    pub media_sample_rate_hz: u32,

    pub media_encoding: MediaEncoding,

    #[builder(default, setter(into, strip_option))]
    pub language_code: Option<String>,

    #[builder(default, setter(into, strip_option))]
    pub vocabulary_name: Option<String>,

    #[builder(default, setter(into, strip_option))]
    pub session_id: Option<String>,

    #[builder(default, setter(into, strip_option))]
    pub vocabulary_filter_name: Option<String>,

    #[builder(default, setter(strip_option))]
    pub vocabulary_filter_method: Option<VocabularyFilterMethod>,

    #[builder(default, setter(strip_option))]
    pub show_speaker_label: Option<bool>,

    #[builder(default, setter(strip_option))]
    pub enable_channel_identification: Option<bool>,

    #[builder(default, setter(strip_option))]
    pub number_of_channels: Option<u32>,

    #[builder(default, setter(strip_option))]
    pub enable_partial_results_stabilization: Option<bool>,

    #[builder(default, setter(strip_option))]
    pub partial_results_stability: Option<PartialResultsStability>,

    #[builder(default, setter(strip_option))]
    pub content_identification_type: Option<ContentIdentificationType>,

    #[builder(default, setter(strip_option))]
    pub content_redaction_type: Option<ContentRedactionType>,

    /// Comma-separated PII entity types to identify or redact.
    #[builder(default, setter(into, strip_option))]
    pub pii_entity_types: Option<String>,

    #[builder(default, setter(into, strip_option))]
    pub language_model_name: Option<String>,

    #[builder(default, setter(strip_option))]
    pub identify_language: Option<bool>,

    /// Comma-separated candidate languages for identification.
    #[builder(default, setter(into, strip_option))]
    pub language_options: Option<String>,

    #[builder(default, setter(into, strip_option))]
    pub preferred_language: Option<String>,

    #[builder(default, setter(strip_option))]
    pub identify_multiple_languages: Option<bool>,

    /// Comma-separated vocabulary names, one per identified language.
    #[builder(default, setter(into, strip_option))]
    pub vocabulary_names: Option<String>,

    /// Comma-separated vocabulary filter names, one per identified language.
    #[builder(default, setter(into, strip_option))]
    pub vocabulary_filter_names: Option<String>,
}

fn bool_str(v: bool) -> &'static str {
    if v { "true" } else { "false" }
}

impl StartStreamTranscriptionRequest {
    /// Maps the request onto its `x-amzn-transcribe-*` headers. Booleans
    /// serialize as `"true"`/`"false"`, numbers as decimal strings, enums as
    /// their documented wire value.
    pub fn to_headers(&self) -> Multimap {
        let mut headers = Multimap::new();
        headers.add(
            X_AMZN_TRANSCRIBE_SAMPLE_RATE,
            self.media_sample_rate_hz.to_string(),
        );
        headers.add(X_AMZN_TRANSCRIBE_MEDIA_ENCODING, self.media_encoding.as_str());

        if let Some(v) = &self.language_code {
            headers.add(X_AMZN_TRANSCRIBE_LANGUAGE_CODE, v.as_str());
        }
        if let Some(v) = &self.vocabulary_name {
            headers.add(X_AMZN_TRANSCRIBE_VOCABULARY_NAME, v.as_str());
        }
        if let Some(v) = &self.session_id {
            headers.add(X_AMZN_TRANSCRIBE_SESSION_ID, v.as_str());
        }
        if let Some(v) = &self.vocabulary_filter_name {
            headers.add(X_AMZN_TRANSCRIBE_VOCABULARY_FILTER_NAME, v.as_str());
        }
        if let Some(v) = self.vocabulary_filter_method {
            headers.add(X_AMZN_TRANSCRIBE_VOCABULARY_FILTER_METHOD, v.as_str());
        }
        if let Some(v) = self.show_speaker_label {
            headers.add(X_AMZN_TRANSCRIBE_SHOW_SPEAKER_LABEL, bool_str(v));
        }
        if let Some(v) = self.enable_channel_identification {
            headers.add(X_AMZN_TRANSCRIBE_ENABLE_CHANNEL_IDENTIFICATION, bool_str(v));
        }
        if let Some(v) = self.number_of_channels {
            headers.add(X_AMZN_TRANSCRIBE_NUMBER_OF_CHANNELS, v.to_string());
        }
        if let Some(v) = self.enable_partial_results_stabilization {
            headers.add(
                X_AMZN_TRANSCRIBE_ENABLE_PARTIAL_RESULTS_STABILIZATION,
                bool_str(v),
            );
        }
        if let Some(v) = self.partial_results_stability {
            headers.add(X_AMZN_TRANSCRIBE_PARTIAL_RESULTS_STABILITY, v.as_str());
        }
        if let Some(v) = self.content_identification_type {
            headers.add(X_AMZN_TRANSCRIBE_CONTENT_IDENTIFICATION_TYPE, v.as_str());
        }
        if let Some(v) = self.content_redaction_type {
            headers.add(X_AMZN_TRANSCRIBE_CONTENT_REDACTION_TYPE, v.as_str());
        }
        if let Some(v) = &self.pii_entity_types {
            headers.add(X_AMZN_TRANSCRIBE_PII_ENTITY_TYPES, v.as_str());
        }
        if let Some(v) = &self.language_model_name {
            headers.add(X_AMZN_TRANSCRIBE_LANGUAGE_MODEL_NAME, v.as_str());
        }
        if let Some(v) = self.identify_language {
            headers.add(X_AMZN_TRANSCRIBE_IDENTIFY_LANGUAGE, bool_str(v));
        }
        if let Some(v) = &self.language_options {
            headers.add(X_AMZN_TRANSCRIBE_LANGUAGE_OPTIONS, v.as_str());
        }
        if let Some(v) = &self.preferred_language {
            headers.add(X_AMZN_TRANSCRIBE_PREFERRED_LANGUAGE, v.as_str());
        }
        if let Some(v) = self.identify_multiple_languages {
            headers.add(X_AMZN_TRANSCRIBE_IDENTIFY_MULTIPLE_LANGUAGES, bool_str(v));
        }
        if let Some(v) = &self.vocabulary_names {
            headers.add(X_AMZN_TRANSCRIBE_VOCABULARY_NAMES, v.as_str());
        }
        if let Some(v) = &self.vocabulary_filter_names {
            headers.add(X_AMZN_TRANSCRIBE_VOCABULARY_FILTER_NAMES, v.as_str());
        }

        headers
    }
}
