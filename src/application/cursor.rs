use crate::domain::ports::CursorPosition;
use base64::engine::general_purpose::URL_SAFE_NO_PAD;
use base64::Engine as _;
use chrono::{TimeZone, Utc};

/// Encodes a row position as an opaque forward-pagination token.
///
/// Wire format is bit-exact: `base64url_no_padding("<epochMillis>:<id>")`.
pub fn encode(position: &CursorPosition) -> String {
    let raw = format!("{}:{}", position.created_at.timestamp_millis(), position.id);
    URL_SAFE_NO_PAD.encode(raw.as_bytes())
}

/// Restores a cursor from a request token.
///
/// Absent, empty, or malformed tokens all decode to `None` ("first page")
/// rather than an error. Note for integrators: a cursor corrupted in
/// transit therefore silently restarts pagination at page one.
pub fn decode(cursor: Option<&str>) -> Option<CursorPosition> {
    let cursor = cursor?.trim();
    if cursor.is_empty() {
        return None;
    }
    let bytes = URL_SAFE_NO_PAD.decode(cursor).ok()?;
    let raw = String::from_utf8(bytes).ok()?;
    let (millis, id) = raw.split_once(':')?;
    if id.contains(':') {
        return None;
    }
    let millis: i64 = millis.parse().ok()?;
    let id: i64 = id.parse().ok()?;
    let created_at = Utc.timestamp_millis_opt(millis).single()?;
    Some(CursorPosition { created_at, id })
}
