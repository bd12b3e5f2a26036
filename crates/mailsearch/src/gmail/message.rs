//! Decoding of messages fetched with `format=raw`

use log::{debug, warn};
use mailparse::{MailHeaderMap, ParsedMail};

use super::api::RawEmail;
use super::normalize::{decode_base64, decode_with_charset};
use crate::error::SearchError;
use crate::models::MessageDetail;

/// Charsets tried, in order, after the one a part declares
const FALLBACK_CHARSETS: &[&str] = &["utf-8", "latin1", "iso-8859-1", "cp1252"];

/// Column width handed to the HTML renderer; wide enough to avoid wrapping
const HTML_RENDER_WIDTH: usize = 10_000;

/// Turn a raw Gmail message into a [`MessageDetail`]
///
/// Picks the first inline `text/plain` part of a multipart message, or the
/// single body of a non-multipart one, and decodes it with its declared
/// charset (falling back through common Western encodings).
pub fn parse_raw_email(email: RawEmail) -> Result<MessageDetail, SearchError> {
    let bytes = decode_base64(&email.raw)
        .ok_or_else(|| SearchError::Message(format!("message {} has no decodable raw payload", email.id)))?;

    let parsed = mailparse::parse_mail(&bytes)
        .map_err(|e| SearchError::Message(format!("message {}: {}", email.id, e)))?;

    let subject = parsed.headers.get_first_value("Subject");
    let sender = parsed.headers.get_first_value("From");

    let body_part = if parsed.subparts.is_empty() {
        Some(&parsed)
    } else {
        find_plain_text_part(&parsed)
    };

    let body = match body_part {
        Some(part) => {
            let raw_body = part
                .get_body_raw()
                .map_err(|e| SearchError::Message(format!("message {}: {}", email.id, e)))?;
            let charset = part.ctype.params.get("charset").map(String::as_str);
            let text = decode_payload(&raw_body, charset);
            clean_email_body(&text, part.ctype.mimetype.eq_ignore_ascii_case("text/html"))
        }
        None => {
            debug!("Message {} has no inline text/plain part", email.id);
            String::new()
        }
    };

    Ok(MessageDetail {
        id: email.id,
        thread_id: email.thread_id,
        snippet: email.snippet,
        body,
        subject,
        sender,
    })
}

/// Depth-first search for the first non-attachment `text/plain` part
fn find_plain_text_part<'m, 'a>(part: &'m ParsedMail<'a>) -> Option<&'m ParsedMail<'a>> {
    if part.ctype.mimetype.eq_ignore_ascii_case("text/plain") && !is_attachment(part) {
        return Some(part);
    }
    part.subparts.iter().find_map(|sub| find_plain_text_part(sub))
}

fn is_attachment(part: &ParsedMail<'_>) -> bool {
    part.headers
        .get_first_value("Content-Disposition")
        .is_some_and(|d| d.to_ascii_lowercase().contains("attachment"))
}

/// Decode body bytes, trying the declared charset first
///
/// Never fails: if no candidate charset accepts the bytes, invalid sequences
/// are replaced with U+FFFD.
pub fn decode_payload(payload: &[u8], charset: Option<&str>) -> String {
    charset
        .into_iter()
        .chain(FALLBACK_CHARSETS.iter().copied())
        .find_map(|label| decode_with_charset(payload, label).ok())
        .unwrap_or_else(|| {
            warn!("No charset could decode message body; using lossy UTF-8");
            String::from_utf8_lossy(payload).into_owned()
        })
}

/// Normalize a decoded body for display to a model
///
/// HTML is rendered to plain text; everything is trimmed.
pub fn clean_email_body(body: &str, is_html: bool) -> String {
    if is_html || looks_like_html(body) {
        match html2text::from_read(body.as_bytes(), HTML_RENDER_WIDTH) {
            Ok(text) => return text.trim().to_string(),
            Err(e) => debug!("HTML rendering failed, keeping markup: {}", e),
        }
    }
    body.trim().to_string()
}

fn looks_like_html(body: &str) -> bool {
    let lower = body.trim_start().to_ascii_lowercase();
    lower.starts_with("<!doctype html") || lower.starts_with("<html") || lower.contains("</p>") || lower.contains("<br")
}
