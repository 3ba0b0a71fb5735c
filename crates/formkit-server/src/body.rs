//! `application/x-www-form-urlencoded` request bodies.

use formkit_core::FlatSubmission;

use crate::error::ServerError;

/// Decode a posted form body into a flat submission.
///
/// Pairs are `&`-separated; a pair without `=` has an empty value. `+`
/// decodes to a space before percent-decoding. Empty pairs (`a=1&&b=2`) are
/// skipped. A repeated key keeps its first value.
///
/// # Errors
///
/// Returns [`ServerError::BadRequest`] when the body or a decoded component
/// is not valid UTF-8.
pub fn decode_form(body: &[u8]) -> Result<FlatSubmission, ServerError> {
    let body = std::str::from_utf8(body)
        .map_err(|e| ServerError::BadRequest(format!("form body is not UTF-8: {e}")))?;

    let mut flat = FlatSubmission::new();
    for pair in body.split('&').filter(|pair| !pair.is_empty()) {
        let (key, value) = pair.split_once('=').unwrap_or((pair, ""));
        let key = decode_component(key)?;
        let value = decode_component(value)?;
        if !flat.insert(key.clone(), value) {
            tracing::debug!(key = %key, "repeated form key; keeping first value");
        }
    }
    Ok(flat)
}

fn decode_component(raw: &str) -> Result<String, ServerError> {
    let spaced = raw.replace('+', " ");
    urlencoding::decode(&spaced)
        .map(std::borrow::Cow::into_owned)
        .map_err(|e| ServerError::BadRequest(format!("URL decode: {e}")))
}
