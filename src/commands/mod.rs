//! Backend Command Wrappers
//!
//! HTTP bindings to the catalog REST backend, organized by resource.

mod category;

pub use category::HttpCategoryRepository;

use serde_json::Value;

use crate::error::{CatalogError, CatalogResult};
use crate::models::CategoryRecord;

/// Envelope keys a write response may wrap the stored record in
const RECORD_ENVELOPES: [&str; 3] = ["data", "item", "category"];

/// Longest plain-text error body shown to the user as-is
const MAX_TEXT_MESSAGE: usize = 200;

/// Pull a human-readable message out of an error body.
///
/// Understands `{"detail": "..."}`, `{"detail": [{"msg": "..."}]}`,
/// `{"message": "..."}` and `{"error": "..."}`; short plain-text bodies are
/// used verbatim, HTML pages are ignored.
pub fn server_message(body: &str) -> Option<String> {
    let body = body.trim();
    if body.is_empty() {
        return None;
    }

    let Ok(value) = serde_json::from_str::<Value>(body) else {
        let looks_like_text = !body.starts_with('<') && body.len() <= MAX_TEXT_MESSAGE;
        return looks_like_text.then(|| body.to_string());
    };

    ["detail", "message", "error"].iter().find_map(|key| match value.get(*key)? {
        Value::String(text) if !text.trim().is_empty() => Some(text.clone()),
        Value::Array(entries) => entries
            .iter()
            .find_map(|entry| entry.get("msg").and_then(Value::as_str))
            .map(str::to_string),
        _ => None,
    })
}

/// Decode listed records one at a time; malformed entries are logged and
/// skipped so one bad record never hides the rest.
pub fn decode_records(values: Vec<Value>) -> Vec<CategoryRecord> {
    let received = values.len();
    let records: Vec<CategoryRecord> = values
        .into_iter()
        .filter_map(|value| match serde_json::from_value::<CategoryRecord>(value.clone()) {
            Ok(record) => Some(record),
            Err(err) => {
                log::warn!("[API] Skipping malformed category {}: {}", value, err);
                None
            }
        })
        .collect();
    if records.len() < received {
        log::warn!("[API] Skipped {} of {} categories", received - records.len(), received);
    }
    records
}

/// Record echoed in the body of a successful write, if there is one.
///
/// Accepts the record itself or one wrapped in `data`, `item` or
/// `category`. Anything else (empty body, bare id, ...) yields `None`.
pub fn written_record(body: &str) -> Option<CategoryRecord> {
    let value = serde_json::from_str::<Value>(body.trim()).ok()?;
    if let Ok(record) = serde_json::from_value::<CategoryRecord>(value.clone()) {
        return Some(record);
    }
    RECORD_ENVELOPES
        .iter()
        .find_map(|key| serde_json::from_value::<CategoryRecord>(value.get(*key)?.clone()).ok())
}

/// Complete a write: the status decides success, the body is optional.
async fn finish_write(response: reqwest::Response) -> CatalogResult<Option<CategoryRecord>> {
    let response = check_status(response).await?;
    let body = response.text().await.unwrap_or_else(|err| {
        log::warn!("[API] Write succeeded but its body could not be read: {}", err);
        String::new()
    });
    let record = written_record(&body);
    if record.is_none() {
        log::debug!("[API] Write response carried no category record");
    }
    Ok(record)
}

/// Turn a non-success response into a `CatalogError::Request`
async fn check_status(response: reqwest::Response) -> CatalogResult<reqwest::Response> {
    let status = response.status();
    if status.is_success() {
        return Ok(response);
    }
    let body = response.text().await.unwrap_or_default();
    let message = server_message(&body);
    log::warn!("[API] {} {} -> {:?}", status.as_u16(), status.canonical_reason().unwrap_or(""), message);
    Err(CatalogError::Request { status: status.as_u16(), message })
}
