use crate::block::{InlineKind, Message, Segment};
use crate::config::Config;
use crate::highlight::{Token, tokenize_block};
use crate::parser::resolve_inline;

/// Convert segments to an HTML fragment
pub fn segments_to_html(segments: &[Segment], config: &Config) -> String {
    let mut out = String::new();
    for segment in segments {
        emit_segment(segment, config, &mut out);
    }
    out
}

/// Wrap a rendered message in a container tagged with its role
pub fn message_to_html(message: &Message, fragment: &str) -> String {
    format!(
        "<div class=\"message message-{}\">\n{}</div>\n",
        message.role.as_str(),
        fragment
    )
}

/// Build a standalone page around already rendered messages
pub fn document(messages: &[String], config: &Config) -> String {
    let mut out = String::new();
    out.push_str("<!DOCTYPE html>\n<html>\n<head>\n<meta charset=\"utf-8\">\n");
    out.push_str("<title>chatmark</title>\n</head>\n");
    out.push_str(&format!(
        "<body style=\"background:{};color:{};font-family:sans-serif\">\n",
        attr(&config.code.background),
        attr(&config.palette.text)
    ));
    for message in messages {
        out.push_str(message);
    }
    out.push_str("</body>\n</html>\n");
    out
}

fn emit_segment(segment: &Segment, config: &Config, out: &mut String) {
    match segment {
        Segment::CodeBlock { language, body, .. } => emit_code_block(language, body, config, out),
        Segment::Header { level, text, .. } => emit_header(*level, text, config, out),
        Segment::Text { raw, .. } => emit_text(raw, config, out),
    }
}

fn emit_code_block(language: &str, body: &str, config: &Config, out: &mut String) {
    out.push_str(&format!(
        "<div class=\"code-block\" style=\"border:1px solid {}\">\n",
        attr(&config.code.border)
    ));
    if config.code.language_label {
        out.push_str(&format!(
            "<div class=\"code-header\" style=\"background:{}\">",
            attr(&config.code.header_background)
        ));
        out.push_str(&format!(
            "<span class=\"code-language\" style=\"color:{}\">",
            attr(&config.palette.comment)
        ));
        escape_into(&language.to_uppercase(), out);
        out.push_str("</span></div>\n");
    }
    out.push_str(&format!(
        "<pre style=\"background:{}\"><code>\n",
        attr(&config.code.background)
    ));

    for (index, tokens) in tokenize_block(body, language).iter().enumerate() {
        out.push_str("<div class=\"line\">");
        if config.code.line_numbers {
            out.push_str(&format!(
                "<span class=\"line-number\" style=\"color:{}\">{}</span>",
                attr(&config.palette.comment),
                index + 1
            ));
        }
        out.push_str("<span class=\"line-content\">");
        emit_tokens(tokens, config, out);
        out.push_str("</span></div>\n");
    }

    out.push_str("</code></pre>\n</div>\n");
}

fn emit_tokens(tokens: &[Token], config: &Config, out: &mut String) {
    for token in tokens {
        out.push_str(&format!(
            "<span class=\"{}\" style=\"color:{}\">",
            token.kind.css_class(),
            attr(config.palette.color_for(token.kind))
        ));
        escape_into(&token.text, out);
        out.push_str("</span>");
    }
}

fn emit_header(level: u8, text: &str, config: &Config, out: &mut String) {
    let level = level.clamp(1, 6);
    let color = config
        .headers
        .color_for_level(level)
        .unwrap_or(config.palette.text.as_str());
    out.push_str(&format!("<h{level} style=\"color:{}\">", attr(color)));
    escape_into(text, out);
    out.push_str(&format!("</h{level}>\n"));
}

fn emit_text(raw: &str, config: &Config, out: &mut String) {
    out.push_str("<div class=\"text\" style=\"white-space:pre-wrap\">");
    for span in resolve_inline(raw) {
        match span.kind {
            InlineKind::Plain => escape_into(&span.text, out),
            InlineKind::Code => {
                out.push_str(&format!(
                    "<code style=\"background:{};color:{}\">",
                    attr(&config.inline.code_background),
                    attr(&config.inline.code_foreground)
                ));
                escape_into(&span.text, out);
                out.push_str("</code>");
            }
            InlineKind::Bold => {
                out.push_str(&format!(
                    "<strong style=\"color:{}\">",
                    attr(&config.inline.bold)
                ));
                escape_into(&span.text, out);
                out.push_str("</strong>");
            }
        }
    }
    out.push_str("</div>\n");
}

/// Config value escaped for use inside a double-quoted attribute
fn attr(value: &str) -> String {
    let mut out = String::with_capacity(value.len());
    escape_into(value, &mut out);
    out
}

fn escape_into(text: &str, out: &mut String) {
    for ch in text.chars() {
        match ch {
            '&' => out.push_str("&amp;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            '"' => out.push_str("&quot;"),
            '\'' => out.push_str("&#39;"),
            _ => out.push(ch),
        }
    }
}

#[cfg(test)]
mod tests {
    use crate::block::{Message, Role};
    use crate::config::Config;
    use crate::{render_content, render_message};

    #[test]
    fn heading() {
        assert_eq!(
            render_content("# Hello", &Config::default()),
            "<h1 style=\"color:#bb9af7\">Hello</h1>\n"
        );
    }

    #[test]
    fn heading_uses_level_colour() {
        assert_eq!(
            render_content("### Third", &Config::default()),
            "<h3 style=\"color:#9ece6a\">Third</h3>\n"
        );
    }

    #[test]
    fn paragraph_with_inline_spans() {
        assert_eq!(
            render_content("a **b** `c`", &Config::default()),
            "<div class=\"text\" style=\"white-space:pre-wrap\">a \
             <strong style=\"color:#c0caf5\">b</strong> \
             <code style=\"background:#292e42;color:#9ece6a\">c</code></div>\n"
        );
    }

    #[test]
    fn escapes_special_chars() {
        let html = render_content("x < y && \"z\"", &Config::default());
        assert!(html.contains("x &lt; y &amp;&amp; &quot;z&quot;"));
    }

    #[test]
    fn code_block_without_gutter_or_label() {
        let mut config = Config::default();
        config.code.line_numbers = false;
        config.code.language_label = false;
        assert_eq!(
            render_content("```json\ntrue\n```", &config),
            "<div class=\"code-block\" style=\"border:1px solid #414868\">\n\
             <pre style=\"background:#1a1b26\"><code>\n\
             <div class=\"line\"><span class=\"line-content\">\
             <span class=\"tok-keyword\" style=\"color:#bb9af7\">true</span>\
             </span></div>\n\
             </code></pre>\n</div>\n"
        );
    }

    #[test]
    fn code_block_label_and_line_numbers() {
        let html = render_content("```py\nx = 1\n\ny = 2\n```", &Config::default());
        assert!(html.contains("<span class=\"code-language\" style=\"color:#565f89\">PY</span>"));
        assert!(html.contains("<span class=\"line-number\" style=\"color:#565f89\">3</span>"));
        assert!(html.contains(
            "<span class=\"line-number\" style=\"color:#565f89\">2</span>\
             <span class=\"line-content\"></span>"
        ));
        assert!(!html.contains(">4</span>"));
    }

    #[test]
    fn config_values_cannot_break_out_of_style() {
        let mut config = Config::default();
        config.inline.bold = "red\" onmouseover=\"x".to_string();
        config.headers.colors = vec!["<b>".to_string()];
        config.code.border = "1px'".to_string();

        let html = render_content("# H\n\n**b**\n```\nx\n```", &config);
        assert!(html.contains("<strong style=\"color:red&quot; onmouseover=&quot;x\">"));
        assert!(html.contains("<h1 style=\"color:&lt;b&gt;\">"));
        assert!(html.contains("border:1px solid 1px&#39;"));
        assert!(!html.contains("onmouseover=\"x"));
    }

    #[test]
    fn code_tokens_are_escaped() {
        let html = render_content("```html\n<div>\n```", &Config::default());
        assert!(html.contains("&lt;"));
        assert!(!html.contains("<div>"));
    }

    #[test]
    fn message_wrapper_carries_role() {
        let message = Message::new(Role::User, "hi");
        let html = render_message(&message, &Config::default());
        assert!(html.starts_with("<div class=\"message message-user\">\n"));
        assert!(html.ends_with("</div>\n</div>\n"));
    }
}
