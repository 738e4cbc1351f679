//! # Keyframes codec
//!
//! Validating decoder and lossless encoder for keyframes animation documents.
//!
//! [`decode`] walks a `serde_json::Value` and either returns a fully checked
//! [`Document`] or the first problem it met, with the field path where it met
//! it. [`encode`] turns a document back into the same tree through the
//! model's `Serialize` impls.
//!
//! ```ignore
//! let doc = keyframes_codec::decode_str(text)?;
//! assert_eq!(keyframes_codec::decode(&keyframes_codec::encode(&doc))?, doc);
//! ```

mod decode;
pub mod error;
pub mod options;
pub mod path;
mod refs;

pub use error::{DecodeError, DecodeErrorKind, IdKind, Result};
pub use keyframes_data::model;
pub use options::{DecodeOptions, KeyframeOrder};
pub use path::{FieldPath, Segment};

use keyframes_data::model::Document;
use serde_json::Value;

/// Decodes with [`DecodeOptions::default`].
pub fn decode(value: &Value) -> Result<Document> {
    decode_with(value, &DecodeOptions::default())
}

/// Decodes a tree: shape checks in field order, then id references.
/// Returns the first problem found.
pub fn decode_with(value: &Value, options: &DecodeOptions) -> Result<Document> {
    let doc = decode::Decoder::new(options).document(value)?;
    tracing::debug!(
        name = %doc.name,
        features = doc.features.len(),
        groups = doc.animation_groups.len(),
        keyframes = doc.keyframe_count(),
        "decoded keyframes document"
    );
    Ok(doc)
}

/// Parses JSON text, then decodes it. Malformed text is a
/// [`DecodeError::Syntax`].
pub fn decode_str(text: &str) -> Result<Document> {
    decode_str_with(text, &DecodeOptions::default())
}

/// [`decode_str`] with explicit options.
pub fn decode_str_with(text: &str, options: &DecodeOptions) -> Result<Document> {
    let value: Value = serde_json::from_str(text)?;
    decode_with(&value, options)
}

/// Parses UTF-8 JSON bytes, then decodes them.
pub fn decode_slice(bytes: &[u8]) -> Result<Document> {
    decode_slice_with(bytes, &DecodeOptions::default())
}

/// [`decode_slice`] with explicit options.
pub fn decode_slice_with(bytes: &[u8], options: &DecodeOptions) -> Result<Document> {
    let value: Value = serde_json::from_slice(bytes)?;
    decode_with(&value, options)
}

/// Encodes a document. Optional fields that are `None` are left out.
pub fn encode(doc: &Document) -> Value {
    // Every map key in the model is a string, so this cannot fail.
    serde_json::to_value(doc).unwrap_or(Value::Null)
}

/// Compact JSON text.
pub fn encode_string(doc: &Document) -> String {
    encode(doc).to_string()
}

/// Indented JSON text.
pub fn encode_string_pretty(doc: &Document) -> String {
    format!("{:#}", encode(doc))
}
