use serde::{Deserialize, Serialize};

/// How `start_frame` sequences are checked.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum KeyframeOrder {
    /// Every `start_frame` must be >= the previous one. Equal frames are allowed.
    #[default]
    NonDecreasing,
    /// Order is the caller's concern.
    Unchecked,
}

/// Decoder settings. Deserializable so hosts can embed it in their own config.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct DecodeOptions {
    pub keyframe_order: KeyframeOrder,
    /// Reject object fields the schema does not know. When off they are
    /// skipped, and the decoded document no longer encodes back to its input.
    pub deny_unknown_fields: bool,
    pub max_masking_depth: usize,
}

impl Default for DecodeOptions {
    fn default() -> Self {
        DecodeOptions {
            keyframe_order: KeyframeOrder::NonDecreasing,
            deny_unknown_fields: true,
            max_masking_depth: 32,
        }
    }
}

impl DecodeOptions {
    /// Defaults, but unknown fields are skipped (and logged) instead of rejected.
    pub fn lenient() -> Self {
        DecodeOptions {
            deny_unknown_fields: false,
            ..Default::default()
        }
    }

    pub fn with_keyframe_order(mut self, order: KeyframeOrder) -> Self {
        self.keyframe_order = order;
        self
    }

    pub fn with_max_masking_depth(mut self, depth: usize) -> Self {
        self.max_masking_depth = depth;
        self
    }
}
