use std::fmt;
use std::str::FromStr;

use serde::Serialize;
use thiserror::Error;
use tracing::trace;

/// Language named by a fence tag. Each one only contributes a reserved-word
/// list; tags that do not resolve fall back to [`Language::JavaScript`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Language {
    #[default]
    JavaScript,
    TypeScript,
    Python,
    Bash,
    Css,
    Html,
    Json,
}

#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("unknown language tag: {0}")]
pub struct UnknownLanguage(pub String);

impl Language {
    pub const ALL: [Language; 7] = [
        Language::JavaScript,
        Language::TypeScript,
        Language::Python,
        Language::Bash,
        Language::Css,
        Language::Html,
        Language::Json,
    ];

    /// Resolve a fence tag, falling back to JavaScript for anything unknown.
    pub fn from_tag(tag: &str) -> Self {
        tag.parse().unwrap_or_else(|UnknownLanguage(tag)| {
            trace!(%tag, "unknown language tag, using default keywords");
            Language::default()
        })
    }

    pub fn name(self) -> &'static str {
        match self {
            Language::JavaScript => "javascript",
            Language::TypeScript => "typescript",
            Language::Python => "python",
            Language::Bash => "bash",
            Language::Css => "css",
            Language::Html => "html",
            Language::Json => "json",
        }
    }

    pub fn keywords(self) -> &'static [&'static str] {
        match self {
            Language::JavaScript => JAVASCRIPT_KEYWORDS,
            Language::TypeScript => TYPESCRIPT_KEYWORDS,
            Language::Python => PYTHON_KEYWORDS,
            Language::Bash => BASH_KEYWORDS,
            Language::Css => CSS_KEYWORDS,
            Language::Html => HTML_KEYWORDS,
            Language::Json => JSON_KEYWORDS,
        }
    }

    pub(crate) fn index(self) -> usize {
        self as usize
    }
}

impl FromStr for Language {
    type Err = UnknownLanguage;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "javascript" | "js" | "jsx" | "mjs" | "cjs" => Ok(Language::JavaScript),
            "typescript" | "ts" | "tsx" => Ok(Language::TypeScript),
            "python" | "py" => Ok(Language::Python),
            "bash" | "sh" | "shell" | "zsh" => Ok(Language::Bash),
            "css" => Ok(Language::Css),
            "html" | "htm" => Ok(Language::Html),
            "json" => Ok(Language::Json),
            _ => Err(UnknownLanguage(s.to_string())),
        }
    }
}

impl fmt::Display for Language {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

const JAVASCRIPT_KEYWORDS: &[&str] = &[
    "const", "let", "var", "function", "return", "if", "else", "for", "while", "do", "switch",
    "case", "break", "continue", "try", "catch", "finally", "throw", "new", "this", "typeof",
    "instanceof", "in", "of", "async", "await", "class", "extends", "super", "static", "import",
    "export", "from", "default",
];

const TYPESCRIPT_KEYWORDS: &[&str] = &[
    "const", "let", "var", "function", "return", "if", "else", "for", "while", "do", "switch",
    "case", "break", "continue", "try", "catch", "finally", "throw", "new", "this", "typeof",
    "instanceof", "in", "of", "async", "await", "class", "extends", "super", "static", "import",
    "export", "from", "default", "interface", "type", "enum", "namespace", "declare", "abstract",
    "implements", "private", "protected", "public", "readonly",
];

const PYTHON_KEYWORDS: &[&str] = &[
    "def", "class", "if", "elif", "else", "for", "while", "try", "except", "finally", "with", "as",
    "import", "from", "return", "yield", "lambda", "and", "or", "not", "in", "is", "None", "True",
    "False", "pass", "break", "continue", "global", "nonlocal", "async", "await",
];

const BASH_KEYWORDS: &[&str] = &[
    "if", "then", "else", "elif", "fi", "for", "while", "do", "done", "case", "esac", "function",
    "return", "exit", "export", "source", "alias", "echo", "cd", "ls", "grep", "awk", "sed",
];

const CSS_KEYWORDS: &[&str] = &[
    "@media", "@import", "@keyframes", "@font-face", "important", "inherit", "initial", "unset",
];

const HTML_KEYWORDS: &[&str] = &[
    "DOCTYPE", "html", "head", "body", "title", "meta", "link", "script", "style", "div", "span",
    "p", "a", "img", "ul", "ol", "li", "table", "tr", "td", "th",
];

const JSON_KEYWORDS: &[&str] = &["true", "false", "null"];
