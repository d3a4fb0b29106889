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

//! Strategies for folding a sequence of transcript events into text.

use crate::transcribe::types::TranscriptEvent;

/// Consumes decoded transcript events and accumulates a transcription.
pub trait TranscriptionStrategy {
    /// Feeds the next event from the stream, in wire order.
    fn on_event(&mut self, event: &TranscriptEvent);

    /// The transcription built so far.
    fn transcription(&self) -> String;
}

/// Keeps the first alternative of every finalized result, discarding partial
/// results as the service revises them.
#[derive(Debug, Default)]
pub struct PlainTextTranscription {
    segments: Vec<String>,
}

impl PlainTextTranscription {
    pub fn new() -> PlainTextTranscription {
        PlainTextTranscription::default()
    }
}

impl TranscriptionStrategy for PlainTextTranscription {
    fn on_event(&mut self, event: &TranscriptEvent) {
        let Some(transcript) = &event.transcript else {
            return;
        };
        for result in &transcript.results {
            if result.is_partial {
                continue;
            }
            if let Some(alternative) = result.alternatives.first()
                && !alternative.transcript.is_empty()
            {
                self.segments.push(alternative.transcript.clone());
            }
        }
    }

    fn transcription(&self) -> String {
        self.segments.join(" ")
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::transcribe::types::{Alternative, Transcript, TranscriptResult};

    fn event(text: &str, is_partial: bool) -> TranscriptEvent {
        TranscriptEvent {
            transcript: Some(Transcript {
                results: vec![TranscriptResult {
                    is_partial,
                    alternatives: vec![Alternative {
                        transcript: text.to_string(),
                        ..Alternative::default()
                    }],
                    ..TranscriptResult::default()
                }],
            }),
        }
    }

    #[test]
    fn test_partial_results_are_skipped() {
        let mut strategy = PlainTextTranscription::new();
        strategy.on_event(&event("hello", true));
        strategy.on_event(&event("hello world", true));
        strategy.on_event(&event("hello world.", false));
        strategy.on_event(&event("how are you?", false));
        assert_eq!(strategy.transcription(), "hello world. how are you?");
    }

    #[test]
    fn test_empty_events_ignored() {
        let mut strategy = PlainTextTranscription::new();
        strategy.on_event(&TranscriptEvent::default());
        assert_eq!(strategy.transcription(), "");
    }
}
