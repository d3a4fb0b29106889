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

//! JSON model of the `TranscriptEvent` payload carried by inbound `event`
//! frames. Field names follow the service's PascalCase JSON.

use serde::{Deserialize, Serialize};

/// One decoded transcription event.
#[derive(Clone, Debug, Default, Deserialize, PartialEq, Serialize)]
#[serde(rename_all = "PascalCase")]
pub struct TranscriptEvent {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub transcript: Option<Transcript>,
}

#[derive(Clone, Debug, Default, Deserialize, PartialEq, Serialize)]
#[serde(rename_all = "PascalCase")]
pub struct Transcript {
    #[serde(default)]
    pub results: Vec<TranscriptResult>,
}

/// A segment of speech, partial until the service finalizes it.
#[derive(Clone, Debug, Default, Deserialize, PartialEq, Serialize)]
#[serde(rename_all = "PascalCase")]
pub struct TranscriptResult {
    #[serde(default)]
    pub result_id: String,
    #[serde(default)]
    pub start_time: f64,
    #[serde(default)]
    pub end_time: f64,
    #[serde(default)]
    pub is_partial: bool,
    #[serde(default)]
    pub alternatives: Vec<Alternative>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub channel_id: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub language_code: Option<String>,
}

#[derive(Clone, Debug, Default, Deserialize, PartialEq, Serialize)]
#[serde(rename_all = "PascalCase")]
pub struct Alternative {
    #[serde(default)]
    pub transcript: String,
    #[serde(default)]
    pub items: Vec<Item>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub entities: Vec<Entity>,
}

#[derive(Clone, Debug, Default, Deserialize, PartialEq, Serialize)]
#[serde(rename_all = "PascalCase")]
pub struct Item {
    #[serde(default)]
    pub start_time: f64,
    #[serde(default)]
    pub end_time: f64,
    #[serde(default, rename = "Type")]
    pub item_type: ItemType,
    #[serde(default)]
    pub content: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub vocabulary_filter_match: Option<bool>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub speaker: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub confidence: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub stable: Option<bool>,
}

/// Identified entity inside an alternative (PII identification/redaction).
#[derive(Clone, Debug, Default, Deserialize, PartialEq, Serialize)]
#[serde(rename_all = "PascalCase")]
pub struct Entity {
    #[serde(default)]
    pub start_time: f64,
    #[serde(default)]
    pub end_time: f64,
    #[serde(default)]
    pub category: String,
    #[serde(default)]
    pub content: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub confidence: Option<f64>,
}

#[derive(Clone, Copy, Debug, Default, Deserialize, PartialEq, Serialize)]
pub enum ItemType {
    #[default]
    #[serde(rename = "pronunciation")]
    Pronunciation,
    #[serde(rename = "punctuation")]
    Punctuation,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_deserialize_empty_results() {
        let event: TranscriptEvent =
            serde_json::from_str(r#"{"Transcript":{"Results":[]}}"#).unwrap();
        assert_eq!(event.transcript.unwrap().results, Vec::new());
    }

    #[test]
    fn test_deserialize_full_result() {
        let json = r#"{
            "Transcript": {
                "Results": [{
                    "ResultId": "result-1",
                    "StartTime": 0.04,
                    "EndTime": 1.12,
                    "IsPartial": false,
                    "Alternatives": [{
                        "Transcript": "hello world",
                        "Items": [
                            {"StartTime": 0.04, "EndTime": 0.6, "Type": "pronunciation",
                             "Content": "hello", "Confidence": 0.99, "Stable": true},
                            {"StartTime": 0.6, "EndTime": 1.12, "Type": "punctuation",
                             "Content": "."}
                        ]
                    }]
                }]
            }
        }"#;
        let event: TranscriptEvent = serde_json::from_str(json).unwrap();
        let results = event.transcript.unwrap().results;
        assert_eq!(results.len(), 1);
        assert!(!results[0].is_partial);
        assert_eq!(results[0].alternatives[0].transcript, "hello world");
        assert_eq!(results[0].alternatives[0].items[0].item_type, ItemType::Pronunciation);
        assert_eq!(results[0].alternatives[0].items[1].item_type, ItemType::Punctuation);
    }

    #[test]
    fn test_unknown_fields_tolerated() {
        let event: TranscriptEvent =
            serde_json::from_str(r#"{"Transcript":{"Results":[]},"NewField":1}"#).unwrap();
        assert!(event.transcript.is_some());
    }
}
