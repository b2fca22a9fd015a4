use base64::engine::general_purpose::STANDARD;
use base64::Engine;
use std::path::Path;
use thiserror::Error;

pub const DEFAULT_MIME: &str = "image/jpeg";

#[derive(Debug, Error)]
pub enum CodecError {
    #[error("failed to read image {path}: {source}")]
    Read {
        path: String,
        #[source]
        source: std::io::Error,
    },
    #[error("payload is not valid base64: {0}")]
    Decode(#[from] base64::DecodeError),
}

/// Reads an image file and returns its raw base64 payload, without any
/// `data:` header.
pub async fn encode_file(path: impl AsRef<Path>) -> Result<String, CodecError> {
    let path = path.as_ref();
    let bytes = tokio::fs::read(path).await.map_err(|source| CodecError::Read {
        path: path.display().to_string(),
        source,
    })?;
    Ok(encode_bytes(&bytes))
}

pub fn encode_bytes(bytes: &[u8]) -> String {
    STANDARD.encode(bytes)
}

pub fn strip_data_uri_prefix(value: &str) -> &str {
    if !value.starts_with("data:") {
        return value;
    }
    match value.split_once(',') {
        Some((_, payload)) => payload,
        None => value,
    }
}

#[allow(dead_code)]
pub fn to_displayable(payload: &str, mime_type: &str) -> String {
    format!("data:{mime_type};base64,{payload}")
}

pub fn decode_displayable(locator: &str) -> Result<Vec<u8>, CodecError> {
    let payload = strip_data_uri_prefix(locator.trim());
    Ok(STANDARD.decode(payload)?)
}
