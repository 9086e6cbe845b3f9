//! Share token encoding and decoding.
//!
//! A share token is one list's exportable contents (name + items)
//! serialized to JSON and wrapped in URL-safe base64 so it survives
//! copy/paste through plain-text channels. Decoding treats the token
//! as untrusted input: it never panics, classifies every failure, and
//! drops invalid entries rather than rejecting an otherwise usable
//! payload.

use base64::{engine::general_purpose::URL_SAFE_NO_PAD, Engine as _};
use serde_json::Value;

use crate::error::DecodeError;
use crate::models::{Item, SharePayload};

/// Name shown for payloads that carry no name of their own.
const UNNAMED_PAYLOAD: &str = "Shared list";

/// Encode a payload as a portable text token.
pub fn encode(payload: &SharePayload) -> String {
    // Serializing Item/SharePayload cannot fail: no maps with non-string
    // keys, no non-finite floats admitted past validation.
    let json = serde_json::to_string(payload).unwrap_or_default();
    URL_SAFE_NO_PAD.encode(json.as_bytes())
}

/// Decode an untrusted token into a payload.
///
/// Entries that fail item validation are dropped; if none survive the
/// whole decode is rejected as [`DecodeError::NoValidItems`].
pub fn decode(token: &str) -> Result<SharePayload, DecodeError> {
    let bytes = URL_SAFE_NO_PAD
        .decode(token.trim())
        .map_err(|_| DecodeError::MalformedToken)?;
    let text = String::from_utf8(bytes).map_err(|_| DecodeError::MalformedToken)?;
    let value: Value = serde_json::from_str(&text).map_err(|_| DecodeError::MalformedToken)?;

    let obj = value.as_object().ok_or(DecodeError::InvalidPayloadShape)?;
    let raw_items = obj
        .get("items")
        .and_then(Value::as_array)
        .ok_or(DecodeError::InvalidPayloadShape)?;

    let items: Vec<Item> = raw_items.iter().filter_map(item_from_value).collect();
    if items.is_empty() {
        return Err(DecodeError::NoValidItems);
    }

    let name = obj
        .get("name")
        .and_then(Value::as_str)
        .map(str::trim)
        .filter(|s| !s.is_empty())
        .unwrap_or(UNNAMED_PAYLOAD)
        .to_string();

    Ok(SharePayload { name, items })
}

/// Validate one untrusted record as an item.
///
/// Requires a string `name` and a numeric `price` passing the item
/// invariants; `category` must be a string if present, else it is
/// treated as empty. Used both for share tokens and for persisted
/// state read back from storage.
pub(crate) fn item_from_value(value: &Value) -> Option<Item> {
    let obj = value.as_object()?;
    let name = obj.get("name")?.as_str()?;
    let price = obj.get("price")?.as_f64()?;
    let category = match obj.get("category") {
        Some(Value::String(s)) => s.as_str(),
        _ => "",
    };
    Item::new(name, price, category).ok()
}
