mod block;
pub mod catalog;
mod config;
mod error;
mod highlight;
mod html;
mod language;
mod overlap;
mod parser;

pub use block::{InlineKind, InlineSpan, Message, Role, Segment};
pub use config::{
    CodeConfig, Config, DEFAULT_CONFIG, HeadersConfig, InlineConfig, PaletteConfig,
};
pub use error::{Error, Result};
pub use highlight::{Token, TokenKind, tokenize, tokenize_block, tokenize_with};
pub use language::{Language, UnknownLanguage};
pub use parser::{DEFAULT_FENCE_LANGUAGE, resolve_inline, segment};

/// Render message text to an HTML fragment.
pub fn render_content(content: &str, config: &Config) -> String {
    let segments = segment(content);
    html::segments_to_html(&segments, config)
}

/// Render a message, wrapped in a container for its role.
pub fn render_message(message: &Message, config: &Config) -> String {
    let fragment = render_content(&message.content, config);
    html::message_to_html(message, &fragment)
}

/// Render a whole transcript as a standalone HTML page.
pub fn render_document(messages: &[Message], config: &Config) -> String {
    let rendered: Vec<String> = messages
        .iter()
        .map(|message| render_message(message, config))
        .collect();
    html::document(&rendered, config)
}
