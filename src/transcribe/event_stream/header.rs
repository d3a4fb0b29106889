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

//! Typed named headers of an event-stream frame.
//!
//! Each header is laid out as `name_len:u8 | name | type_tag:u8 | value`,
//! big-endian throughout. The type tag is part of the wire format, so the
//! constants live next to the enum they discriminate.

use crate::transcribe::error::EventStreamError;
use bytes::{Buf, BufMut, Bytes, BytesMut};
use uuid::Uuid;

const TYPE_BOOL_TRUE: u8 = 0;
const TYPE_BOOL_FALSE: u8 = 1;
const TYPE_BYTE: u8 = 2;
const TYPE_INT16: u8 = 3;
const TYPE_INT32: u8 = 4;
const TYPE_INT64: u8 = 5;
const TYPE_BYTE_ARRAY: u8 = 6;
const TYPE_STRING: u8 = 7;
const TYPE_TIMESTAMP: u8 = 8;
const TYPE_UUID: u8 = 9;

/// Header names are length-prefixed with a single byte.
pub const MAX_HEADER_NAME_LEN: usize = 255;

/// String and byte-array values are length-prefixed with an unsigned 16-bit
/// integer.
pub const MAX_HEADER_VALUE_LEN: usize = 65_535;

/// Event-stream header value.
///
/// Timestamps are milliseconds since the Unix epoch. UUIDs travel as 16 raw
/// bytes and present as canonical 8-4-4-4-12 hex.
#[derive(Clone, Debug, PartialEq)]
pub enum HeaderValue {
    Bool(bool),
    Byte(i8),
    Int16(i16),
    Int32(i32),
    Int64(i64),
    ByteArray(Bytes),
    String(String),
    Timestamp(i64),
    Uuid(Uuid),
}

impl HeaderValue {
    fn read_from(buf: &mut &[u8]) -> Result<HeaderValue, EventStreamError> {
        if buf.remaining() < 1 {
            return Err(EventStreamError::HeaderTruncated);
        }
        let tag = buf.get_u8();
        match tag {
            TYPE_BOOL_TRUE => Ok(HeaderValue::Bool(true)),
            TYPE_BOOL_FALSE => Ok(HeaderValue::Bool(false)),
            TYPE_BYTE => {
                if buf.remaining() < 1 {
                    return Err(EventStreamError::HeaderTruncated);
                }
                Ok(HeaderValue::Byte(buf.get_i8()))
            }
            TYPE_INT16 => {
                if buf.remaining() < 2 {
                    return Err(EventStreamError::HeaderTruncated);
                }
                Ok(HeaderValue::Int16(buf.get_i16()))
            }
            TYPE_INT32 => {
                if buf.remaining() < 4 {
                    return Err(EventStreamError::HeaderTruncated);
                }
                Ok(HeaderValue::Int32(buf.get_i32()))
            }
            TYPE_INT64 => {
                if buf.remaining() < 8 {
                    return Err(EventStreamError::HeaderTruncated);
                }
                Ok(HeaderValue::Int64(buf.get_i64()))
            }
            TYPE_BYTE_ARRAY | TYPE_STRING => {
                if buf.remaining() < 2 {
                    return Err(EventStreamError::HeaderTruncated);
                }
                let len = buf.get_u16() as usize;
                if buf.remaining() < len {
                    return Err(EventStreamError::HeaderTruncated);
                }
                let bytes = buf.copy_to_bytes(len);
                if tag == TYPE_STRING {
                    let s = String::from_utf8(bytes.to_vec())
                        .map_err(|_| EventStreamError::InvalidUtf8)?;
                    Ok(HeaderValue::String(s))
                } else {
                    Ok(HeaderValue::ByteArray(bytes))
                }
            }
            TYPE_TIMESTAMP => {
                if buf.remaining() < 8 {
                    return Err(EventStreamError::HeaderTruncated);
                }
                Ok(HeaderValue::Timestamp(buf.get_i64()))
            }
            TYPE_UUID => {
                if buf.remaining() < 16 {
                    return Err(EventStreamError::HeaderTruncated);
                }
                let mut raw = [0u8; 16];
                buf.copy_to_slice(&mut raw);
                Ok(HeaderValue::Uuid(Uuid::from_bytes(raw)))
            }
            other => Err(EventStreamError::InvalidHeaderValueType(other)),
        }
    }

    fn write_to(&self, buf: &mut BytesMut) -> Result<(), EventStreamError> {
        match self {
            HeaderValue::Bool(true) => buf.put_u8(TYPE_BOOL_TRUE),
            HeaderValue::Bool(false) => buf.put_u8(TYPE_BOOL_FALSE),
            HeaderValue::Byte(v) => {
                buf.put_u8(TYPE_BYTE);
                buf.put_i8(*v);
            }
            HeaderValue::Int16(v) => {
                buf.put_u8(TYPE_INT16);
                buf.put_i16(*v);
            }
            HeaderValue::Int32(v) => {
                buf.put_u8(TYPE_INT32);
                buf.put_i32(*v);
            }
            HeaderValue::Int64(v) => {
                buf.put_u8(TYPE_INT64);
                buf.put_i64(*v);
            }
            HeaderValue::ByteArray(v) => {
                if v.len() > MAX_HEADER_VALUE_LEN {
                    return Err(EventStreamError::HeaderValueTooLong(v.len()));
                }
                buf.put_u8(TYPE_BYTE_ARRAY);
                buf.put_u16(v.len() as u16);
                buf.put_slice(v);
            }
            HeaderValue::String(v) => {
                if v.len() > MAX_HEADER_VALUE_LEN {
                    return Err(EventStreamError::HeaderValueTooLong(v.len()));
                }
                buf.put_u8(TYPE_STRING);
                buf.put_u16(v.len() as u16);
                buf.put_slice(v.as_bytes());
            }
            HeaderValue::Timestamp(millis) => {
                buf.put_u8(TYPE_TIMESTAMP);
                buf.put_i64(*millis);
            }
            HeaderValue::Uuid(v) => {
                buf.put_u8(TYPE_UUID);
                buf.put_slice(v.as_bytes());
            }
        }
        Ok(())
    }

    /// The string value, when this is a `String` header.
    pub fn as_str(&self) -> Option<&str> {
        match self {
            HeaderValue::String(v) => Some(v),
            _ => None,
        }
    }

    /// The raw bytes, when this is a `ByteArray` header.
    pub fn as_bytes(&self) -> Option<&Bytes> {
        match self {
            HeaderValue::ByteArray(v) => Some(v),
            _ => None,
        }
    }

    /// Epoch milliseconds, when this is a `Timestamp` header.
    pub fn as_timestamp(&self) -> Option<i64> {
        match self {
            HeaderValue::Timestamp(v) => Some(*v),
            _ => None,
        }
    }

    /// Number of bytes the value occupies on the wire, tag byte included.
    fn wire_len(&self) -> usize {
        1 + match self {
            HeaderValue::Bool(_) => 0,
            HeaderValue::Byte(_) => 1,
            HeaderValue::Int16(_) => 2,
            HeaderValue::Int32(_) => 4,
            HeaderValue::Int64(_) | HeaderValue::Timestamp(_) => 8,
            HeaderValue::ByteArray(v) => 2 + v.len(),
            HeaderValue::String(v) => 2 + v.len(),
            HeaderValue::Uuid(_) => 16,
        }
    }
}

/// A named typed header.
#[derive(Clone, Debug, PartialEq)]
pub struct Header {
    name: String,
    value: HeaderValue,
}

impl Header {
    pub fn new(name: impl Into<String>, value: HeaderValue) -> Header {
        Header {
            name: name.into(),
            value,
        }
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn value(&self) -> &HeaderValue {
        &self.value
    }

    fn read_from(buf: &mut &[u8]) -> Result<Header, EventStreamError> {
        if buf.remaining() < 2 {
            return Err(EventStreamError::HeaderTruncated);
        }
        let name_len = buf.get_u8() as usize;
        if buf.remaining() < name_len {
            return Err(EventStreamError::HeaderTruncated);
        }
        let name_bytes = buf.copy_to_bytes(name_len);
        let name =
            String::from_utf8(name_bytes.to_vec()).map_err(|_| EventStreamError::InvalidUtf8)?;
        let value = HeaderValue::read_from(buf)?;
        Ok(Header { name, value })
    }

    fn write_to(&self, buf: &mut BytesMut) -> Result<(), EventStreamError> {
        if self.name.len() > MAX_HEADER_NAME_LEN {
            return Err(EventStreamError::HeaderNameTooLong(self.name.len()));
        }
        buf.put_u8(self.name.len() as u8);
        buf.put_slice(self.name.as_bytes());
        self.value.write_to(buf)
    }
}

/// First header with the given name; duplicate names resolve to the first
/// match.
pub fn find<'a>(headers: &'a [Header], name: &str) -> Option<&'a HeaderValue> {
    headers.iter().find(|h| h.name() == name).map(Header::value)
}

/// First `String` header with the given name.
pub fn find_string<'a>(headers: &'a [Header], name: &str) -> Option<&'a str> {
    find(headers, name).and_then(HeaderValue::as_str)
}

/// First `ByteArray` header with the given name.
pub fn find_bytes<'a>(headers: &'a [Header], name: &str) -> Option<&'a Bytes> {
    find(headers, name).and_then(HeaderValue::as_bytes)
}

/// First `Timestamp` header with the given name, as epoch milliseconds.
pub fn find_timestamp(headers: &[Header], name: &str) -> Option<i64> {
    find(headers, name).and_then(HeaderValue::as_timestamp)
}

/// Size of the block [`encode_headers`] produces for this list.
pub fn encoded_len(headers: &[Header]) -> usize {
    headers
        .iter()
        .map(|h| 1 + h.name.len() + h.value.wire_len())
        .sum()
}

/// Encodes a header list into a contiguous block.
pub fn encode_headers(headers: &[Header]) -> Result<Bytes, EventStreamError> {
    let mut buf = BytesMut::new();
    for header in headers {
        header.write_to(&mut buf)?;
    }
    Ok(buf.freeze())
}

/// Decodes a header block, walking the buffer until exhausted. Duplicate
/// names are preserved in order.
pub fn decode_headers(mut buf: &[u8]) -> Result<Vec<Header>, EventStreamError> {
    let mut headers = Vec::new();
    while !buf.is_empty() {
        headers.push(Header::read_from(&mut buf)?);
    }
    Ok(headers)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn round_trip(headers: Vec<Header>) -> Vec<Header> {
        let encoded = encode_headers(&headers).unwrap();
        decode_headers(&encoded).unwrap()
    }

    #[test]
    fn test_round_trip_all_value_types() {
        let headers = vec![
            Header::new("true", HeaderValue::Bool(true)),
            Header::new("false", HeaderValue::Bool(false)),
            Header::new("byte", HeaderValue::Byte(-50)),
            Header::new("short", HeaderValue::Int16(20_000)),
            Header::new("int", HeaderValue::Int32(500_000)),
            Header::new("long", HeaderValue::Int64(50_000_000_000)),
            Header::new("bytes", HeaderValue::ByteArray(Bytes::from_static(b"some bytes"))),
            Header::new("str", HeaderValue::String("some str".into())),
            Header::new("time", HeaderValue::Timestamp(5_000_000_000_000)),
            Header::new(
                "uuid",
                HeaderValue::Uuid("b79bc914-de21-4e13-b8b2-bc47e85b7f0b".parse().unwrap()),
            ),
        ];
        assert_eq!(round_trip(headers.clone()), headers);
    }

    #[test]
    fn test_duplicate_names_preserved_in_order() {
        let headers = vec![
            Header::new("dup", HeaderValue::Int32(1)),
            Header::new("dup", HeaderValue::Int32(2)),
        ];
        let decoded = round_trip(headers.clone());
        assert_eq!(decoded, headers);
    }

    #[test]
    fn test_typed_lookups() {
        let headers = vec![
            Header::new(":date", HeaderValue::Timestamp(1_369_353_600_000)),
            Header::new(":event-type", HeaderValue::String("AudioEvent".into())),
            Header::new("sig", HeaderValue::ByteArray(Bytes::from_static(&[1, 2]))),
            Header::new(":event-type", HeaderValue::String("second".into())),
        ];

        assert_eq!(find_string(&headers, ":event-type"), Some("AudioEvent"));
        assert_eq!(find_timestamp(&headers, ":date"), Some(1_369_353_600_000));
        assert_eq!(
            find_bytes(&headers, "sig").map(|b| b.as_ref()),
            Some(&[1u8, 2][..])
        );
        // wrong type and missing name both miss
        assert_eq!(find_string(&headers, ":date"), None);
        assert_eq!(find_timestamp(&headers, "absent"), None);
    }

    #[test]
    fn test_encoded_len_matches_encoder() {
        let headers = vec![
            Header::new("true", HeaderValue::Bool(true)),
            Header::new("byte", HeaderValue::Byte(-50)),
            Header::new("short", HeaderValue::Int16(20_000)),
            Header::new("int", HeaderValue::Int32(500_000)),
            Header::new("long", HeaderValue::Int64(50_000_000_000)),
            Header::new("bytes", HeaderValue::ByteArray(Bytes::from_static(b"some bytes"))),
            Header::new("str", HeaderValue::String("héllo".into())),
            Header::new("time", HeaderValue::Timestamp(5_000_000_000_000)),
            Header::new(
                "uuid",
                HeaderValue::Uuid("b79bc914-de21-4e13-b8b2-bc47e85b7f0b".parse().unwrap()),
            ),
        ];
        let encoded = encode_headers(&headers).unwrap();
        assert_eq!(encoded_len(&headers), encoded.len());
        assert_eq!(encoded_len(&[]), 0);
    }

    #[test]
    fn test_short_header_wire_bytes() {
        let encoded = encode_headers(&[Header::new("x", HeaderValue::Int16(1))]).unwrap();
        assert_eq!(encoded.as_ref(), &[0x01, b'x', 0x03, 0x00, 0x01]);
    }

    #[test]
    fn test_string_header_wire_bytes() {
        let encoded = encode_headers(&[Header::new(
            ":content-type",
            HeaderValue::String("application/json".into()),
        )])
        .unwrap();
        let mut expected = vec![0x0D];
        expected.extend_from_slice(b":content-type");
        expected.extend_from_slice(&[0x07, 0x00, 0x10]);
        expected.extend_from_slice(b"application/json");
        assert_eq!(encoded.as_ref(), expected.as_slice());
    }

    #[test]
    fn test_uuid_wire_is_16_raw_bytes() {
        let uuid: Uuid = "b79bc914-de21-4e13-b8b2-bc47e85b7f0b".parse().unwrap();
        let encoded = encode_headers(&[Header::new("uuid", HeaderValue::Uuid(uuid))]).unwrap();
        // name_len + name + tag + 16 value bytes
        assert_eq!(encoded.len(), 1 + 4 + 1 + 16);
        assert_eq!(&encoded[6..], uuid.as_bytes());
    }

    #[test]
    fn test_unknown_tag_is_hard_error() {
        let bytes = [0x01, b'x', 0x0A];
        assert_eq!(
            decode_headers(&bytes),
            Err(EventStreamError::InvalidHeaderValueType(0x0A))
        );
    }

    #[test]
    fn test_truncated_value_is_error() {
        // declares a 16-byte string but provides 3 bytes
        let bytes = [0x01, b'x', 0x07, 0x00, 0x10, b'a', b'b', b'c'];
        assert_eq!(decode_headers(&bytes), Err(EventStreamError::HeaderTruncated));
    }

    #[test]
    fn test_truncated_name_is_error() {
        let bytes = [0x05, b'x'];
        assert_eq!(decode_headers(&bytes), Err(EventStreamError::HeaderTruncated));
    }

    #[test]
    fn test_non_utf8_name_is_error() {
        let bytes = [0x02, 0xFF, 0xFE, 0x00];
        assert_eq!(decode_headers(&bytes), Err(EventStreamError::InvalidUtf8));
    }

    #[test]
    fn test_value_too_long_rejected() {
        let value = "a".repeat(MAX_HEADER_VALUE_LEN + 1);
        let err = encode_headers(&[Header::new("big", HeaderValue::String(value))]).unwrap_err();
        assert_eq!(err, EventStreamError::HeaderValueTooLong(MAX_HEADER_VALUE_LEN + 1));
    }

    #[test]
    fn test_name_too_long_rejected() {
        let name = "n".repeat(256);
        let err = encode_headers(&[Header::new(name, HeaderValue::Bool(true))]).unwrap_err();
        assert_eq!(err, EventStreamError::HeaderNameTooLong(256));
    }
}
