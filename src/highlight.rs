use std::ops::Range;
use std::sync::OnceLock;

use regex::Regex;
use serde::Serialize;

use crate::language::Language;
use crate::overlap::{self, Candidate};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum TokenKind {
    Comment,
    String,
    Number,
    Keyword,
    FunctionName,
    TypeName,
    Operator,
    Plain,
}

impl TokenKind {
    /// Class attached to the rendered span
    pub fn css_class(self) -> &'static str {
        match self {
            TokenKind::Comment => "tok-comment",
            TokenKind::String => "tok-string",
            TokenKind::Number => "tok-number",
            TokenKind::Keyword => "tok-keyword",
            TokenKind::FunctionName => "tok-function",
            TokenKind::TypeName => "tok-type",
            TokenKind::Operator => "tok-operator",
            TokenKind::Plain => "tok-plain",
        }
    }
}

/// A classified slice of one line. `range` is in bytes, relative to the line.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Token {
    pub kind: TokenKind,
    pub text: String,
    pub range: Range<usize>,
}

const TYPE_NAMES: &[&str] = &[
    "string",
    "number",
    "boolean",
    "object",
    "Array",
    "Promise",
    "void",
    "null",
    "undefined",
    "any",
];

struct Patterns {
    comment: Regex,
    string: Regex,
    number: Regex,
    function: Regex,
    type_name: Regex,
    operator: Regex,
    keywords: Vec<Regex>,
}

static PATTERNS: OnceLock<Patterns> = OnceLock::new();

fn patterns() -> &'static Patterns {
    PATTERNS.get_or_init(|| Patterns {
        comment: Regex::new(r"//.*|/\*.*?\*/|#.*").expect("Failed to compile comment regex"),
        string: Regex::new(r#""(?:\\.|[^"\\])*"|'(?:\\.|[^'\\])*'|`(?:\\.|[^`\\])*`"#)
            .expect("Failed to compile string regex"),
        number: Regex::new(r"\b[0-9]+(?:\.[0-9]+)?\b")
            .expect("Failed to compile number regex"),
        // The paren is matched but only the identifier group becomes the token
        function: Regex::new(r"\b([A-Za-z_][A-Za-z0-9_]*)\(")
            .expect("Failed to compile function regex"),
        type_name: word_list_regex(TYPE_NAMES),
        operator: Regex::new(r"[-+*/%=<>!&|^~?:]").expect("Failed to compile operator regex"),
        keywords: Language::ALL
            .iter()
            .map(|language| word_list_regex(language.keywords()))
            .collect(),
    })
}

/// Whole-word alternation. Words that open with a non-word character such as
/// `@media` cannot sit behind a `\b`, so they are anchored on the right only.
fn word_list_regex(words: &[&str]) -> Regex {
    let alternatives: Vec<String> = words
        .iter()
        .map(|word| {
            let escaped = regex::escape(word);
            let leading_word_char = word
                .chars()
                .next()
                .is_some_and(|c| c.is_alphanumeric() || c == '_');
            if leading_word_char {
                format!(r"\b{escaped}\b")
            } else {
                format!(r"{escaped}\b")
            }
        })
        .collect();
    Regex::new(&format!("(?:{})", alternatives.join("|")))
        .expect("Failed to compile word list regex")
}

/// Tokenize one line of code for the language named by a fence tag.
///
/// Unknown tags use the default keyword list. An empty line has no tokens.
pub fn tokenize(line: &str, language: &str) -> Vec<Token> {
    tokenize_with(line, Language::from_tag(language))
}

/// Tokenize one line with an already resolved language.
///
/// Every category is matched against the whole line on its own, then the
/// candidates are merged first-wins in this order: comment, string, number,
/// keyword, function name, type name, operator. Whatever no category claims
/// is emitted as `Plain`, so the tokens always tile the line exactly.
pub fn tokenize_with(line: &str, language: Language) -> Vec<Token> {
    if line.is_empty() {
        return Vec::new();
    }

    let p = patterns();
    let mut candidates = Vec::new();
    push_matches(&mut candidates, TokenKind::Comment, &p.comment, line);
    push_matches(&mut candidates, TokenKind::String, &p.string, line);
    push_matches(&mut candidates, TokenKind::Number, &p.number, line);
    let keywords = &p.keywords[language.index()];
    push_matches(&mut candidates, TokenKind::Keyword, keywords, line);
    candidates.extend(
        p.function
            .captures_iter(line)
            .filter_map(|caps| caps.get(1))
            .map(|m| Candidate::new(TokenKind::FunctionName, m.range())),
    );
    push_matches(&mut candidates, TokenKind::TypeName, &p.type_name, line);
    push_matches(&mut candidates, TokenKind::Operator, &p.operator, line);

    let accepted = overlap::first_wins(candidates);
    overlap::tile(line.len(), accepted, TokenKind::Plain)
        .into_iter()
        .map(|c| Token {
            kind: c.kind,
            text: line[c.range.clone()].to_string(),
            range: c.range,
        })
        .collect()
}

fn push_matches(
    candidates: &mut Vec<Candidate<TokenKind>>,
    kind: TokenKind,
    re: &Regex,
    line: &str,
) {
    candidates.extend(re.find_iter(line).map(|m| Candidate::new(kind, m.range())));
}

/// Tokenize every line of a code block body, one token list per line.
///
/// Lines split on `\n`; a trailing `\r` is not part of the line.
pub fn tokenize_block(body: &str, language: &str) -> Vec<Vec<Token>> {
    let language = Language::from_tag(language);
    body.split('\n')
        .map(|line| tokenize_with(line.strip_suffix('\r').unwrap_or(line), language))
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn kinds(tokens: &[Token]) -> Vec<(TokenKind, &str)> {
        tokens.iter().map(|t| (t.kind, t.text.as_str())).collect()
    }

    #[test]
    fn const_assignment_with_comment() {
        let line = "const x = 42; // init";
        let tokens = tokenize(line, "typescript");
        assert_eq!(
            kinds(&tokens),
            vec![
                (TokenKind::Keyword, "const"),
                (TokenKind::Plain, " x "),
                (TokenKind::Operator, "="),
                (TokenKind::Plain, " "),
                (TokenKind::Number, "42"),
                (TokenKind::Plain, "; "),
                (TokenKind::Comment, "// init"),
            ]
        );
        assert_eq!(tokens.last().map(|t| t.range.end), Some(line.len()));
    }

    #[test]
    fn function_name_excludes_paren() {
        let tokens = tokenize("print(\"hi\")", "python");
        assert_eq!(
            kinds(&tokens),
            vec![
                (TokenKind::FunctionName, "print"),
                (TokenKind::Plain, "("),
                (TokenKind::String, "\"hi\""),
                (TokenKind::Plain, ")"),
            ]
        );
    }

    #[test]
    fn keyword_beats_function_name_on_same_start() {
        let tokens = tokenize("if(x)", "javascript");
        assert_eq!(tokens[0].kind, TokenKind::Keyword);
        assert_eq!(tokens[0].text, "if");
    }

    #[test]
    fn string_swallows_inner_comment_marker() {
        let tokens = tokenize(r#"s = "a // b""#, "python");
        assert_eq!(
            kinds(&tokens),
            vec![
                (TokenKind::Plain, "s "),
                (TokenKind::Operator, "="),
                (TokenKind::Plain, " "),
                (TokenKind::String, "\"a // b\""),
            ]
        );
    }

    #[test]
    fn escaped_quotes_stay_inside_string() {
        let tokens = tokenize(r#"'it\'s' + 1"#, "js");
        assert_eq!(tokens[0].kind, TokenKind::String);
        assert_eq!(tokens[0].text, r#"'it\'s'"#);
    }

    #[test]
    fn hash_comment_and_block_comment() {
        assert_eq!(
            kinds(&tokenize("# note", "bash")),
            vec![(TokenKind::Comment, "# note")]
        );
        assert_eq!(
            kinds(&tokenize("a /* b */ c", "css")),
            vec![
                (TokenKind::Plain, "a "),
                (TokenKind::Comment, "/* b */"),
                (TokenKind::Plain, " c"),
            ]
        );
    }

    #[test]
    fn decimal_numbers_and_type_names() {
        let tokens = tokenize("let n: number = 3.14", "ts");
        assert_eq!(
            kinds(&tokens),
            vec![
                (TokenKind::Keyword, "let"),
                (TokenKind::Plain, " n"),
                (TokenKind::Operator, ":"),
                (TokenKind::Plain, " "),
                (TokenKind::TypeName, "number"),
                (TokenKind::Plain, " "),
                (TokenKind::Operator, "="),
                (TokenKind::Plain, " "),
                (TokenKind::Number, "3.14"),
            ]
        );
    }

    #[test]
    fn keywords_are_whole_words_only() {
        let tokens = tokenize("constant", "javascript");
        assert_eq!(kinds(&tokens), vec![(TokenKind::Plain, "constant")]);
    }

    #[test]
    fn css_at_rule_keyword() {
        let tokens = tokenize("@media screen", "css");
        assert_eq!(tokens[0].kind, TokenKind::Keyword);
        assert_eq!(tokens[0].text, "@media");
    }

    #[test]
    fn language_changes_keyword_set() {
        assert_eq!(tokenize("def", "python")[0].kind, TokenKind::Keyword);
        assert_eq!(tokenize("def", "javascript")[0].kind, TokenKind::Plain);
        assert_eq!(tokenize("interface", "unknown-lang")[0].kind, TokenKind::Plain);
    }

    #[test]
    fn empty_line_has_no_tokens() {
        assert!(tokenize("", "rust").is_empty());
    }

    #[test]
    fn block_keeps_blank_lines() {
        let lines = tokenize_block("a\n\nb", "text");
        assert_eq!(lines.len(), 3);
        assert!(lines[1].is_empty());
    }

    #[test]
    fn block_drops_carriage_returns() {
        let lines = tokenize_block("a\r\nb", "text");
        assert_eq!(lines.len(), 2);
        assert_eq!(kinds(&lines[0]), vec![(TokenKind::Plain, "a")]);
        assert_eq!(kinds(&lines[1]), vec![(TokenKind::Plain, "b")]);
    }

    #[test]
    fn multibyte_text_is_tiled_on_char_boundaries() {
        let line = "let é = \"ü\"; // ß";
        let tokens = tokenize(line, "js");
        let rebuilt: String = tokens.iter().map(|t| t.text.as_str()).collect();
        assert_eq!(rebuilt, line);
    }
}
