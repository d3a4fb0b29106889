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

//! Signature V4 for the initial HTTP request and for the per-frame event
//! stream payload chain.

use crate::transcribe::creds::Credentials;
use crate::transcribe::error::EventStreamError;
use crate::transcribe::event_stream::header::{Header, HeaderValue, encode_headers};
use crate::transcribe::event_stream::frame::Message;
use crate::transcribe::header_constants::{AUTHORIZATION, EVENT_CHUNK_SIGNATURE, EVENT_DATE};
use crate::transcribe::multimap_ext::{Multimap, MultimapExt};
use crate::transcribe::utils::{UtcTime, sha256_hash, to_amz_date, to_signer_date};
use bytes::Bytes;
use hex::encode as hexencode;
use hmac::{Hmac, Mac};
use http::Method;
use sha2::Sha256;
use std::sync::Arc;

/// SigV4 service name for the streaming transcription endpoint.
pub const SIGNING_SERVICE: &str = "transcribe";

/// Algorithm line of the per-frame string-to-sign.
const PAYLOAD_ALGORITHM: &str = "AWS4-HMAC-SHA256-PAYLOAD";

/// Returns HMAC hash for given key and data
fn hmac_hash(key: &[u8], data: &[u8]) -> Vec<u8> {
    let mut hasher = Hmac::<Sha256>::new_from_slice(key).expect("HMAC can take key of any size");
    hasher.update(data);
    hasher.finalize().into_bytes().to_vec()
}

/// Returns hex encoded HMAC hash for given key and data
fn hmac_hash_hex(key: &[u8], data: &[u8]) -> String {
    hexencode(hmac_hash(key, data))
}

/// Returns scope value of given date, region and service name
fn get_scope(date: UtcTime, region: &str, service_name: &str) -> String {
    format!(
        "{}/{}/{}/aws4_request",
        to_signer_date(date),
        region,
        service_name
    )
}

/// Returns hex encoded SHA256 hash of canonical request
fn get_canonical_request_hash(
    method: &Method,
    uri: &str,
    query_string: &str,
    headers: &str,
    signed_headers: &str,
    content_sha256: &str,
) -> String {
    let canonical_request = format!(
        "{method}\n{uri}\n{query_string}\n{headers}\n\n{signed_headers}\n{content_sha256}",
    );
    sha256_hash(canonical_request.as_bytes())
}

/// Returns string-to-sign value of given date, scope and canonical request hash
fn get_string_to_sign(date: UtcTime, scope: &str, canonical_request_hash: &str) -> String {
    format!(
        "AWS4-HMAC-SHA256\n{}\n{}\n{}",
        to_amz_date(date),
        scope,
        canonical_request_hash
    )
}

/// Returns signing key of given secret key, date, region and service name
fn get_signing_key(secret_key: &str, date: UtcTime, region: &str, service_name: &str) -> Vec<u8> {
    let mut key: Vec<u8> = b"AWS4".to_vec();
    key.extend(secret_key.as_bytes());

    let date_key = hmac_hash(key.as_slice(), to_signer_date(date).as_bytes());
    let date_region_key = hmac_hash(date_key.as_slice(), region.as_bytes());
    let date_region_service_key = hmac_hash(date_region_key.as_slice(), service_name.as_bytes());
    hmac_hash(date_region_service_key.as_slice(), b"aws4_request")
}

/// Returns authorization value for given access key, scope, signed headers and signature
fn get_authorization(
    access_key: &str,
    scope: &str,
    signed_headers: &str,
    signature: &str,
) -> String {
    format!(
        "AWS4-HMAC-SHA256 Credential={access_key}/{scope}, SignedHeaders={signed_headers}, Signature={signature}",
    )
}

/// Signs and updates headers for the initial streaming transcription request.
/// Returns the hex signature; it seeds the per-frame signature chain.
pub(crate) fn sign_v4_transcribe(
    method: &Method,
    uri: &str,
    region: &str,
    headers: &mut Multimap,
    query_params: &Multimap,
    access_key: &str,
    secret_key: &str,
    content_sha256: &str,
    date: UtcTime,
) -> String {
    let scope = get_scope(date, region, SIGNING_SERVICE);
    let (signed_headers, canonical_headers) = headers.get_canonical_headers();
    let canonical_query_string = query_params.get_canonical_query_string();
    let canonical_request_hash = get_canonical_request_hash(
        method,
        uri,
        &canonical_query_string,
        &canonical_headers,
        &signed_headers,
        content_sha256,
    );
    let string_to_sign = get_string_to_sign(date, &scope, &canonical_request_hash);
    let signing_key = get_signing_key(secret_key, date, region, SIGNING_SERVICE);
    let signature = hmac_hash_hex(signing_key.as_slice(), string_to_sign.as_bytes());
    let authorization = get_authorization(access_key, &scope, &signed_headers, &signature);

    headers.add(AUTHORIZATION, authorization);
    signature
}

/// Rolling SigV4 signer for outgoing event-stream frames.
///
/// Each frame is signed over a string-to-sign that includes the previous
/// frame's signature, forming an ordered, tamper-evident chain seeded by the
/// signature of the initial HTTP request. The chain demands a total order on
/// produced frames, so a signer instance is single-producer and owned by the
/// outbound pipeline.
#[derive(Debug)]
pub struct EventSigner {
    signing_key: Arc<[u8]>,
    scope: String,
    prior_signature: String,
}

impl EventSigner {
    /// Derives the signing key for `region`/`transcribe` at construction and
    /// caches it for the session. `seed_signature` is the hex signature of
    /// the initial request.
    pub fn new(
        region: &str,
        creds: &Credentials,
        date: UtcTime,
        seed_signature: String,
    ) -> EventSigner {
        EventSigner {
            signing_key: get_signing_key(&creds.secret_key, date, region, SIGNING_SERVICE).into(),
            scope: get_scope(date, region, SIGNING_SERVICE),
            prior_signature: seed_signature,
        }
    }

    /// Hex signature of the most recently signed frame.
    pub fn prior_signature(&self) -> &str {
        &self.prior_signature
    }

    /// Signs `payload` at the current time.
    pub fn sign(&mut self, payload: Bytes) -> Result<Message, EventStreamError> {
        self.sign_at(payload, crate::transcribe::utils::utc_now())
    }

    /// Signs `payload` at an explicit time. The timestamp is truncated to
    /// whole seconds before it enters the `:date` header, so both peers hash
    /// identical header bytes.
    pub fn sign_at(&mut self, payload: Bytes, time: UtcTime) -> Result<Message, EventStreamError> {
        let epoch_millis = time.timestamp() * 1000;
        let date_header = Header::new(EVENT_DATE, HeaderValue::Timestamp(epoch_millis));
        let date_block = encode_headers(std::slice::from_ref(&date_header))?;

        let string_to_sign = format!(
            "{PAYLOAD_ALGORITHM}\n{}\n{}\n{}\n{}\n{}",
            to_amz_date(time),
            self.scope,
            self.prior_signature,
            sha256_hash(&date_block),
            sha256_hash(&payload),
        );

        let signature = hmac_hash(&self.signing_key, string_to_sign.as_bytes());
        let signature_hex = hexencode(&signature);

        let message = Message::new(payload)
            .add_header(EVENT_DATE, HeaderValue::Timestamp(epoch_millis))
            .add_header(EVENT_CHUNK_SIGNATURE, HeaderValue::ByteArray(signature.into()));

        self.prior_signature = signature_hex;
        Ok(message)
    }
}
