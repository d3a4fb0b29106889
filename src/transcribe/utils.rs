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

//! Various utility and helper functions

use chrono::{DateTime, Utc};
use crc_fast::{CrcAlgorithm, Digest as CrcFastDigest};
use sha2::{Digest, Sha256};

/// Date and time with UTC timezone
pub type UtcTime = DateTime<Utc>;

/// Hex encoded SHA256 hash of zero bytes of input.
pub const EMPTY_SHA256: &str = "e3b0c44298fc1c149afbf4c8996fb92427ae41e4649b934ca495991b7852b855";

/// Computes CRC-32/ISO-HDLC (a.k.a. CRC-32/IEEE) of given data.
pub fn crc32(data: &[u8]) -> u32 {
    let mut digest = CrcFastDigest::new(CrcAlgorithm::Crc32IsoHdlc);
    digest.update(data);
    digest.finalize() as u32
}

/// Gets hex encoded SHA256 hash of given data
pub fn sha256_hash(data: &[u8]) -> String {
    let mut hasher = Sha256::new();
    hasher.update(data);
    format!("{:x}", hasher.finalize())
}

/// Gets current UTC time
pub fn utc_now() -> UtcTime {
    chrono::offset::Utc::now()
}

/// Gets signer date value of given time
pub fn to_signer_date(time: UtcTime) -> String {
    time.format("%Y%m%d").to_string()
}

/// Gets AMZ date value of given time
pub fn to_amz_date(time: UtcTime) -> String {
    time.format("%Y%m%dT%H%M%SZ").to_string()
}

pub fn url_encode(s: &str) -> String {
    urlencoding::encode(s).into_owned()
}
