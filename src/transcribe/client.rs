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

//! Transcribe streaming client: opens the HTTP/2 stream, signs the initial
//! request, wires up both pipelines and hands the application an audio sink
//! and an event source.

use bytes::Bytes;
use futures_util::Stream;
use http::{HeaderMap, HeaderName, HeaderValue, Method};
use log::debug;
use reqwest::Body;
use std::pin::Pin;
use std::sync::Arc;
use std::task::{Context, Poll};
use tokio::sync::mpsc;

use crate::transcribe::chunker::{AudioChunker, pcm_chunk_size};
use crate::transcribe::creds::Provider;
use crate::transcribe::error::{Error, TranscribeServerError};
use crate::transcribe::header_constants::*;
use crate::transcribe::inbound::EventStreamReader;
use crate::transcribe::multimap_ext::{Multimap, MultimapExt};
use crate::transcribe::outbound::SignedEventStream;
use crate::transcribe::signer::{EventSigner, sign_v4_transcribe};
use crate::transcribe::types::request::MediaEncoding;
use crate::transcribe::types::{ResponseMetadata, StartStreamTranscriptionRequest, TranscriptEvent};
use crate::transcribe::utils::{to_amz_date, utc_now};

/// Request path of the StartStreamTranscription operation.
const STREAM_TRANSCRIPTION_PATH: &str = "/stream-transcription";

/// Bound on audio slices buffered between the application and the outbound
/// pipeline before `send` applies backpressure.
const AUDIO_CHANNEL_CAPACITY: usize = 16;

/// Allowed range of `media_sample_rate_hz`.
const SAMPLE_RATE_RANGE: std::ops::RangeInclusive<u32> = 8_000..=48_000;

/// Client builder manufactures a client using given parameters.
#[derive(Debug)]
pub struct TranscribeClientBuilder {
    region: String,
    provider: Option<Arc<dyn Provider + Send + Sync + 'static>>,
    endpoint: Option<String>,
}

impl TranscribeClientBuilder {
    pub fn new(region: impl Into<String>) -> Self {
        Self {
            region: region.into(),
            provider: None,
            endpoint: None,
        }
    }

    /// Sets the credential provider. Credentials are fetched once per stream.
    pub fn provider(mut self, provider: Arc<dyn Provider + Send + Sync + 'static>) -> Self {
        self.provider = Some(provider);
        self
    }

    /// Overrides the service endpoint. Intended for tests and private
    /// deployments; the default is the regional AWS endpoint.
    pub fn endpoint(mut self, endpoint: impl Into<String>) -> Self {
        self.endpoint = Some(endpoint.into());
        self
    }

    pub fn build(self) -> Result<TranscribeClient, Error> {
        let provider = self
            .provider
            .ok_or_else(|| Error::InvalidRequest("a credentials provider is required".into()))?;

        let endpoint = self
            .endpoint
            .unwrap_or_else(|| format!("https://transcribestreaming.{}.amazonaws.com", self.region));

        // the event-stream protocol is defined over HTTP/2 only
        let http_client = reqwest::Client::builder()
            .http2_prior_knowledge()
            .build()?;

        Ok(TranscribeClient {
            region: self.region,
            provider,
            endpoint,
            http_client,
        })
    }
}

/// Streaming transcription client over a shared HTTP/2 connection pool.
#[derive(Clone, Debug)]
pub struct TranscribeClient {
    region: String,
    provider: Arc<dyn Provider + Send + Sync + 'static>,
    endpoint: String,
    http_client: reqwest::Client,
}

/// Everything `start_stream_transcription` hands back: the accepted response
/// metadata, the sink audio is written to, and the source decoded events
/// arrive on.
pub struct StartStreamTranscriptionOutput {
    pub response: ResponseMetadata,
    pub audio: AudioSink,
    pub transcript: TranscriptStream,
}

impl TranscribeClient {
    pub fn builder(region: impl Into<String>) -> TranscribeClientBuilder {
        TranscribeClientBuilder::new(region)
    }

    pub fn region(&self) -> &str {
        &self.region
    }

    /// Starts a bidirectional transcription stream.
    ///
    /// Returns once the initial response headers arrive. Startup failures
    /// (TLS, signing, HTTP status >= 400) surface here; afterwards all
    /// failures arrive via the returned event source.
    pub async fn start_stream_transcription(
        &self,
        request: StartStreamTranscriptionRequest,
    ) -> Result<StartStreamTranscriptionOutput, Error> {
        if !SAMPLE_RATE_RANGE.contains(&request.media_sample_rate_hz) {
            return Err(Error::InvalidSampleRate(request.media_sample_rate_hz));
        }
        if let Some(session_id) = &request.session_id
            && !is_valid_session_id(session_id)
        {
            return Err(Error::InvalidRequest(format!(
                "session id {session_id:?} must be a UUID in 8-4-4-4-12 form"
            )));
        }

        let creds = self.provider.fetch();
        let date = utc_now();

        let host = self
            .endpoint
            .trim_start_matches("https://")
            .trim_start_matches("http://")
            .to_string();

        let mut headers = Multimap::new();
        headers.add(HOST, host);
        headers.add(X_AMZ_DATE, to_amz_date(date));
        headers.add(X_AMZ_CONTENT_SHA256, STREAMING_EVENTS_PAYLOAD);
        headers.add(X_AMZ_TARGET, START_STREAM_TRANSCRIPTION_TARGET);
        headers.add(CONTENT_TYPE, CONTENT_TYPE_EVENT_STREAM);
        if let Some(token) = &creds.session_token {
            headers.add(X_AMZ_SECURITY_TOKEN, token.as_str());
        }
        headers.add_multimap(request.to_headers());

        let seed_signature = sign_v4_transcribe(
            &Method::POST,
            STREAM_TRANSCRIPTION_PATH,
            &self.region,
            &mut headers,
            &Multimap::new(),
            &creds.access_key,
            &creds.secret_key,
            STREAMING_EVENTS_PAYLOAD,
            date,
        );

        let signer = EventSigner::new(&self.region, &creds, date, seed_signature);

        // audio flows: sink -> channel -> chunker -> framer/signer -> body
        let (tx, rx) = mpsc::channel::<Bytes>(AUDIO_CHANNEL_CAPACITY);
        let chunk_size = match request.media_encoding {
            MediaEncoding::Pcm => pcm_chunk_size(request.media_sample_rate_hz),
            // compressed containers carry their own framing; forward as-is
            MediaEncoding::OggOpus | MediaEncoding::Flac => 0,
        };
        let body_stream =
            SignedEventStream::new(AudioChunker::new(ReceiverStream { rx }, chunk_size), signer);

        let url = format!("{}{}", self.endpoint, STREAM_TRANSCRIPTION_PATH);
        debug!(
            "starting stream transcription: url={url} encoding={} chunk_size={chunk_size}",
            request.media_encoding.as_str()
        );

        let response = self
            .http_client
            .post(&url)
            .headers(to_header_map(&headers)?)
            .body(Body::wrap_stream(body_stream))
            .send()
            .await?;

        let status = response.status();
        debug!("stream transcription response status: {status}");
        if status.as_u16() >= 400 {
            let error_type = response
                .headers()
                .get(X_AMZN_ERRORTYPE)
                .and_then(|v| v.to_str().ok())
                .map(String::from);
            let body = response.bytes().await.unwrap_or_default();
            return Err(TranscribeServerError::from_http_response(
                status.as_u16(),
                error_type.as_deref(),
                &body,
            )
            .into());
        }

        let metadata = ResponseMetadata::from_headers(response.headers());
        let transcript = TranscriptStream {
            inner: EventStreamReader::new(Box::pin(response.bytes_stream())),
        };

        Ok(StartStreamTranscriptionOutput {
            response: metadata,
            audio: AudioSink { tx },
            transcript,
        })
    }
}

/// Session ids must look like a canonical UUID: 8-4-4-4-12 hex groups.
fn is_valid_session_id(id: &str) -> bool {
    let bytes = id.as_bytes();
    bytes.len() == 36
        && bytes.iter().enumerate().all(|(i, b)| match i {
            8 | 13 | 18 | 23 => *b == b'-',
            _ => b.is_ascii_hexdigit(),
        })
}

fn to_header_map(headers: &Multimap) -> Result<HeaderMap, Error> {
    let mut map = HeaderMap::new();
    for (key, values) in headers.iter_all() {
        let name = HeaderName::try_from(key.as_str())
            .map_err(|e| Error::InvalidRequest(format!("invalid header name {key:?}: {e}")))?;
        for value in values {
            let value = HeaderValue::from_str(value)
                .map_err(|e| Error::InvalidRequest(format!("invalid value for {key:?}: {e}")))?;
            map.append(name.clone(), value);
        }
    }
    Ok(map)
}

/// Write half handed to the application.
///
/// Closing the sink (explicitly or by dropping it) flushes the chunker, emits
/// the signed terminal frame and finishes the request body.
#[derive(Clone, Debug)]
pub struct AudioSink {
    tx: mpsc::Sender<Bytes>,
}

impl AudioSink {
    /// Queues raw audio bytes, waiting when the pipeline is backed up.
    pub async fn send(&self, data: impl Into<Bytes>) -> Result<(), Error> {
        self.tx
            .send(data.into())
            .await
            .map_err(|_| Error::AudioStreamClosed)
    }

    /// Ends the audio stream.
    pub fn close(self) {
        drop(self.tx);
    }
}

type ResponseBytes = Pin<Box<dyn Stream<Item = Result<Bytes, reqwest::Error>> + Send>>;

/// Read half handed to the application: decoded transcript events in wire
/// order. Dropping it tears down the HTTP/2 stream.
pub struct TranscriptStream {
    inner: EventStreamReader<ResponseBytes>,
}

impl Stream for TranscriptStream {
    type Item = Result<TranscriptEvent, Error>;

    fn poll_next(mut self: Pin<&mut Self>, cx: &mut Context<'_>) -> Poll<Option<Self::Item>> {
        Pin::new(&mut self.inner).poll_next(cx)
    }
}

/// Adapts the audio channel to the chunker's input stream.
struct ReceiverStream {
    rx: mpsc::Receiver<Bytes>,
}

impl Stream for ReceiverStream {
    type Item = Bytes;

    fn poll_next(mut self: Pin<&mut Self>, cx: &mut Context<'_>) -> Poll<Option<Self::Item>> {
        self.rx.poll_recv(cx)
    }
}
