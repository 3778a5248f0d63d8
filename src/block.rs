use std::ops::Range;

use serde::{Deserialize, Serialize};

/// Block-level pieces of a chat message, in source order.
///
/// Ranges are byte offsets into the message text and always fall on
/// `char` boundaries.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum Segment {
    /// A fenced block. `range` covers both fences.
    CodeBlock {
        language: String,
        body: String,
        range: Range<usize>,
    },
    /// An ATX heading (`#` through `######`).
    Header {
        level: u8,
        text: String,
        range: Range<usize>,
    },
    /// Free text; inline spans are resolved separately.
    Text { raw: String, range: Range<usize> },
}

impl Segment {
    pub fn range(&self) -> Range<usize> {
        match self {
            Segment::CodeBlock { range, .. }
            | Segment::Header { range, .. }
            | Segment::Text { range, .. } => range.clone(),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum InlineKind {
    Plain,
    Code,
    Bold,
}

/// Inline formatting inside a `Segment::Text`.
///
/// For `Code` and `Bold`, `text` excludes the delimiters while `range`
/// covers them, so adjacent ranges tile the owning string.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct InlineSpan {
    pub kind: InlineKind,
    pub text: String,
    pub range: Range<usize>,
}

/// Author of a chat message
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Role {
    User,
    #[default]
    Assistant,
}

impl Role {
    pub fn as_str(self) -> &'static str {
        match self {
            Role::User => "user",
            Role::Assistant => "assistant",
        }
    }
}

/// A single message as handed over by the session store
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Message {
    pub role: Role,
    pub content: String,
}

impl Message {
    pub fn new(role: Role, content: impl Into<String>) -> Self {
        Self {
            role,
            content: content.into(),
        }
    }
}
