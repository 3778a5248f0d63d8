use std::ops::Range;
use std::sync::OnceLock;

use regex::Regex;
use tracing::debug;

use crate::block::{InlineKind, InlineSpan, Segment};
use crate::overlap::{self, Candidate};

/// Language recorded for fences that do not name one
pub const DEFAULT_FENCE_LANGUAGE: &str = "text";

static CODE_BLOCK_REGEX: OnceLock<Regex> = OnceLock::new();
static HEADER_REGEX: OnceLock<Regex> = OnceLock::new();
static INLINE_CODE_REGEX: OnceLock<Regex> = OnceLock::new();
static BOLD_REGEX: OnceLock<Regex> = OnceLock::new();

fn code_block_regex() -> &'static Regex {
    CODE_BLOCK_REGEX.get_or_init(|| {
        // ```lang\n ... ``` with a lazy body so consecutive blocks stay apart
        Regex::new(r"```([A-Za-z0-9_]+)?\r?\n((?s:.*?))```")
            .expect("Failed to compile code block regex")
    })
}

fn header_regex() -> &'static Regex {
    HEADER_REGEX.get_or_init(|| {
        Regex::new(r"(?mR)^(#{1,6})[ \t]+(.+)$").expect("Failed to compile header regex")
    })
}

fn inline_code_regex() -> &'static Regex {
    INLINE_CODE_REGEX
        .get_or_init(|| Regex::new(r"`([^`]+)`").expect("Failed to compile inline code regex"))
}

fn bold_regex() -> &'static Regex {
    BOLD_REGEX
        .get_or_init(|| Regex::new(r"\*\*([^*]+)\*\*").expect("Failed to compile bold regex"))
}

/// Split a chat message into code blocks, headers and text.
///
/// Never fails: an unterminated fence simply does not match and stays in the
/// surrounding text. Whitespace-only stretches between matches are dropped,
/// as are the blank lines at either end of a text stretch. When nothing
/// matches, the whole input comes back untouched as a single text segment,
/// even if it is empty or blank.
pub fn segment(text: &str) -> Vec<Segment> {
    let mut matches: Vec<Segment> = code_block_regex()
        .captures_iter(text)
        .filter_map(|caps| {
            let whole = caps.get(0)?;
            let language = caps
                .get(1)
                .map_or(DEFAULT_FENCE_LANGUAGE, |m| m.as_str())
                .to_string();
            let body = caps.get(2).map_or("", |m| m.as_str()).trim().to_string();
            Some(Segment::CodeBlock {
                language,
                body,
                range: whole.range(),
            })
        })
        .collect();

    let code_ranges: Vec<Range<usize>> = matches.iter().map(Segment::range).collect();
    let code_block_count = code_ranges.len();

    // Code blocks outrank headers: a heading that starts inside a fence, or
    // runs into one, is not a heading.
    matches.extend(header_regex().captures_iter(text).filter_map(|caps| {
        let whole = caps.get(0)?;
        let range = whole.range();
        if code_ranges
            .iter()
            .any(|cb| range.start < cb.end && cb.start < range.end)
        {
            return None;
        }
        let level = caps.get(1)?.len() as u8;
        let heading = caps.get(2)?.as_str().to_string();
        Some(Segment::Header {
            level,
            text: heading,
            range,
        })
    }));

    if matches.is_empty() {
        return vec![Segment::Text {
            raw: text.to_string(),
            range: 0..text.len(),
        }];
    }

    matches.sort_by_key(|m| m.range().start);
    debug!(
        code_blocks = code_block_count,
        headers = matches.len() - code_block_count,
        "segmented message"
    );

    let mut segments = Vec::with_capacity(matches.len() * 2 + 1);
    let mut last = 0;
    for m in matches {
        let range = m.range();
        if range.start > last {
            push_text(text, last..range.start, &mut segments);
        }
        last = range.end;
        segments.push(m);
    }
    if last < text.len() {
        push_text(text, last..text.len(), &mut segments);
    }
    segments
}

/// Emit the gap `range` as text unless it is blank. Leading blank lines and
/// trailing whitespace belong to the dropped gap; indentation of the first
/// kept line stays.
fn push_text(text: &str, range: Range<usize>, segments: &mut Vec<Segment>) {
    let gap = text[range.clone()].trim_end();
    let content = gap.trim_start();
    if content.is_empty() {
        return;
    }

    let leading = &gap[..gap.len() - content.len()];
    let start = range.start + leading.rfind('\n').map_or(0, |i| i + 1);
    let end = range.start + gap.len();
    segments.push(Segment::Text {
        raw: text[start..end].to_string(),
        range: start..end,
    });
}

/// Resolve inline code and bold spans inside a text segment.
///
/// Inline code is scanned before bold, so where the two overlap the code
/// span is kept and the bold one dropped. Everything else becomes plain.
pub fn resolve_inline(text: &str) -> Vec<InlineSpan> {
    let mut candidates: Vec<Candidate<InlineKind>> = inline_code_regex()
        .find_iter(text)
        .map(|m| Candidate::new(InlineKind::Code, m.range()))
        .collect();
    candidates.extend(
        bold_regex()
            .find_iter(text)
            .map(|m| Candidate::new(InlineKind::Bold, m.range())),
    );

    let accepted = overlap::first_wins(candidates);
    overlap::tile(text.len(), accepted, InlineKind::Plain)
        .into_iter()
        .map(|c| {
            let inner = match c.kind {
                InlineKind::Plain => c.range.clone(),
                InlineKind::Code => c.range.start + 1..c.range.end - 1,
                InlineKind::Bold => c.range.start + 2..c.range.end - 2,
            };
            InlineSpan {
                kind: c.kind,
                text: text[inner].to_string(),
                range: c.range,
            }
        })
        .collect()
}
