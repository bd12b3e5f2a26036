//! Gmail API response normalization
//!
//! Flattens list responses into [`MessageRecord`] / [`ThreadRecord`] values.
//! Body decoding is best-effort: anything that cannot be decoded is handed
//! back as the original base64 text.

use base64::prelude::*;
use log::debug;

use super::api::{MessagePayload, RawMessage, RawThread};
use crate::error::DecodeError;
use crate::models::{MessageRecord, ThreadRecord};

/// Charset used when the payload does not declare one
const DEFAULT_CHARSET: &str = "utf-8";

/// Normalize raw messages, preserving order
pub fn parse_messages(messages: Vec<RawMessage>) -> Vec<MessageRecord> {
    messages
        .into_iter()
        .map(|msg| {
            let body = msg.payload.as_ref().map(extract_body).unwrap_or_default();
            MessageRecord {
                id: msg.id,
                thread_id: msg.thread_id,
                snippet: msg.snippet,
                body,
            }
        })
        .collect()
}

/// Normalize raw threads, preserving order
pub fn parse_threads(threads: Vec<RawThread>) -> Vec<ThreadRecord> {
    threads
        .into_iter()
        .map(|thread| ThreadRecord {
            id: thread.id,
            snippet: thread.snippet,
        })
        .collect()
}

/// Extract the body text of a payload
///
/// Returns an empty string when there is no `body.data`, and the raw base64
/// when it cannot be decoded with the declared charset.
pub fn extract_body(payload: &MessagePayload) -> String {
    let Some(data) = payload.body.as_ref().and_then(|b| b.data.as_deref()) else {
        return String::new();
    };

    let charset = content_charset(payload);
    match decode_body(data, charset.as_deref()) {
        Ok(text) => text,
        Err(e) => {
            debug!("Leaving body undecoded: {}", e);
            data.to_string()
        }
    }
}

/// Decode base64 body data as text in `charset` (UTF-8 when `None`)
pub fn decode_body(data: &str, charset: Option<&str>) -> Result<String, DecodeError> {
    let bytes = decode_base64(data).ok_or(DecodeError::Base64)?;
    decode_with_charset(&bytes, charset.unwrap_or(DEFAULT_CHARSET))
}

/// Labels decoded as strict 7-bit ASCII
const ASCII_LABELS: &[&str] = &["ascii", "us-ascii", "us_ascii", "646"];

/// Labels decoded as true ISO-8859-1, not the windows-1252 superset
const LATIN1_LABELS: &[&str] = &[
    "latin1", "latin-1", "latin_1", "l1", "iso-8859-1", "iso8859-1", "iso_8859-1", "8859",
];

/// Decode bytes with a named charset, rejecting invalid sequences
///
/// ASCII and Latin-1 labels keep their strict meanings; every other label
/// goes through the WHATWG registry.
pub(crate) fn decode_with_charset(bytes: &[u8], label: &str) -> Result<String, DecodeError> {
    let label = label.trim();
    let key = label.to_ascii_lowercase();

    if ASCII_LABELS.contains(&key.as_str()) {
        return if bytes.is_ascii() {
            Ok(bytes.iter().map(|&b| char::from(b)).collect())
        } else {
            Err(DecodeError::Malformed("us-ascii".to_string()))
        };
    }
    if LATIN1_LABELS.contains(&key.as_str()) {
        return Ok(bytes.iter().map(|&b| char::from(b)).collect());
    }

    let encoding = charset::Charset::for_label_no_replacement(label.as_bytes())
        .ok_or_else(|| DecodeError::UnknownCharset(label.to_string()))?;

    let (text, had_errors) = encoding.decode_without_bom_handling(bytes);
    if had_errors {
        return Err(DecodeError::Malformed(encoding.name().to_string()));
    }
    Ok(text.into_owned())
}

/// Read the `charset` parameter of the payload's `Content-Type` header
pub fn content_charset(payload: &MessagePayload) -> Option<String> {
    let content_type = extract_header(payload, "Content-Type")?;

    content_type.split(';').skip(1).find_map(|param| {
        let (key, value) = param.split_once('=')?;
        if !key.trim().eq_ignore_ascii_case("charset") {
            return None;
        }
        let value = value.trim().trim_matches('"').trim();
        (!value.is_empty()).then(|| value.to_string())
    })
}

/// Extract a header value by name
fn extract_header<'a>(payload: &'a MessagePayload, name: &str) -> Option<&'a str> {
    payload
        .headers
        .as_ref()?
        .iter()
        .find(|h| h.name.eq_ignore_ascii_case(name))
        .map(|h| h.value.as_str())
}

/// Decode base64 data
///
/// Gmail uses URL-safe base64 but padding can vary, so we try multiple decoders.
pub fn decode_base64(data: &str) -> Option<Vec<u8>> {
    let data = data.trim();
    let decoders: [&base64::engine::GeneralPurpose; 4] = [
        &BASE64_URL_SAFE_NO_PAD,
        &BASE64_URL_SAFE,
        &BASE64_STANDARD,
        &BASE64_STANDARD_NO_PAD,
    ];

    decoders.iter().find_map(|decoder| decoder.decode(data).ok())
}
