//! A small, lenient line tokenizer for the code samples on the site.
//!
//! It never rejects input: anything it does not recognise is passed through
//! as plain text, and the spans of a line always concatenate back to the
//! line itself.

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Language {
    Json,
    Http,
    TypeScript,
    Plain,
}

impl Language {
    pub fn label(self) -> &'static str {
        match self {
            Language::Json => "json",
            Language::Http => "http",
            Language::TypeScript => "typescript",
            Language::Plain => "text",
        }
    }

    /// Request bodies are JSON unless they are form-encoded.
    pub fn for_body(body: &str) -> Self {
        match body.trim_start().as_bytes().first() {
            Some(b'{') | Some(b'[') => Language::Json,
            _ => Language::Plain,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TokenKind {
    Key,
    String,
    Number,
    Literal,
    Keyword,
    Comment,
    Punctuation,
    Text,
}

impl TokenKind {
    pub fn class(self) -> &'static str {
        match self {
            TokenKind::Key => "tok-key",
            TokenKind::String => "tok-string",
            TokenKind::Number => "tok-number",
            TokenKind::Literal => "tok-literal",
            TokenKind::Keyword => "tok-keyword",
            TokenKind::Comment => "tok-comment",
            TokenKind::Punctuation => "tok-punct",
            TokenKind::Text => "tok-text",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Span<'a> {
    pub kind: TokenKind,
    pub text: &'a str,
}

const TS_KEYWORDS: [&str; 9] = [
    "interface", "enum", "export", "type", "extends", "const", "readonly", "import", "from",
];
const TS_TYPES: [&str; 9] = [
    "string", "number", "boolean", "null", "undefined", "any", "Date", "true", "false",
];

pub fn highlight_line(language: Language, line: &str) -> Vec<Span<'_>> {
    match language {
        Language::Plain => vec![Span { kind: TokenKind::Text, text: line }],
        Language::Http => http_line(line),
        Language::Json | Language::TypeScript => scan(language, line),
    }
}

fn http_line(line: &str) -> Vec<Span<'_>> {
    match line.split_once(':') {
        Some((name, value)) if !name.is_empty() && !name.contains(char::is_whitespace) => vec![
            Span { kind: TokenKind::Key, text: name },
            Span { kind: TokenKind::Punctuation, text: ":" },
            Span { kind: TokenKind::String, text: value },
        ],
        _ => vec![Span { kind: TokenKind::Text, text: line }],
    }
}

fn scan(language: Language, line: &str) -> Vec<Span<'_>> {
    let bytes = line.as_bytes();
    let mut spans = Vec::new();
    let mut pos = 0;
    let mut text_start = 0;

    while pos < bytes.len() {
        let byte = bytes[pos];
        let token = match byte {
            b'"' => Some(quoted(language, bytes, pos)),
            b'\'' if language == Language::TypeScript => Some(quoted(language, bytes, pos)),
            b'/' if language == Language::TypeScript && bytes.get(pos + 1) == Some(&b'/') => {
                Some((TokenKind::Comment, bytes.len()))
            }
            b'0'..=b'9' => Some((TokenKind::Number, number_end(bytes, pos))),
            b'-' if bytes.get(pos + 1).is_some_and(u8::is_ascii_digit) => {
                Some((TokenKind::Number, number_end(bytes, pos + 1)))
            }
            b'{' | b'}' | b'[' | b']' | b'(' | b')' | b',' | b':' | b';' | b'|' | b'=' | b'<'
            | b'>' | b'?' => Some((TokenKind::Punctuation, pos + 1)),
            b if b.is_ascii_alphabetic() || b == b'_' => {
                let end = word_end(bytes, pos);
                match classify(language, &line[pos..end], bytes, end) {
                    TokenKind::Text => {
                        pos = end;
                        None
                    }
                    kind => Some((kind, end)),
                }
            }
            _ => {
                pos += 1;
                None
            }
        };

        if let Some((kind, end)) = token {
            if text_start < pos {
                spans.push(Span { kind: TokenKind::Text, text: &line[text_start..pos] });
            }
            spans.push(Span { kind, text: &line[pos..end] });
            pos = end;
            text_start = end;
        }
    }

    if text_start < bytes.len() {
        spans.push(Span { kind: TokenKind::Text, text: &line[text_start..] });
    }
    spans
}

/// A string token, or a key when a JSON string is followed by a colon.
fn quoted(language: Language, bytes: &[u8], start: usize) -> (TokenKind, usize) {
    let quote = bytes[start];
    let mut end = start + 1;
    while end < bytes.len() {
        match bytes[end] {
            b'\\' => end += 2,
            b if b == quote => {
                end += 1;
                break;
            }
            _ => end += 1,
        }
    }
    let end = end.min(bytes.len());

    let kind = if language == Language::Json && next_significant(bytes, end) == Some(b':') {
        TokenKind::Key
    } else {
        TokenKind::String
    };
    (kind, end)
}

fn number_end(bytes: &[u8], start: usize) -> usize {
    let mut end = start;
    while end < bytes.len() {
        match bytes[end] {
            b'0'..=b'9' | b'.' => end += 1,
            b'e' | b'E' if matches!(bytes.get(end + 1), Some(b'0'..=b'9' | b'+' | b'-')) => end += 2,
            _ => break,
        }
    }
    end.min(bytes.len())
}

fn word_end(bytes: &[u8], start: usize) -> usize {
    let mut end = start;
    while end < bytes.len() && (bytes[end].is_ascii_alphanumeric() || bytes[end] == b'_') {
        end += 1;
    }
    end
}

fn next_significant(bytes: &[u8], from: usize) -> Option<u8> {
    bytes[from..].iter().copied().find(|b| !b.is_ascii_whitespace())
}

fn classify(language: Language, word: &str, bytes: &[u8], end: usize) -> TokenKind {
    match language {
        Language::Json => match word {
            "true" | "false" | "null" => TokenKind::Literal,
            _ => TokenKind::Text,
        },
        Language::TypeScript => {
            if TS_KEYWORDS.contains(&word) {
                return TokenKind::Keyword;
            }
            if TS_TYPES.contains(&word) {
                return TokenKind::Literal;
            }
            // `Field:` and `Field?:` inside an interface body.
            let after = &bytes[end..];
            let after = after.strip_prefix(b"?").unwrap_or(after);
            if after.first() == Some(&b':') {
                TokenKind::Key
            } else {
                TokenKind::Text
            }
        }
        Language::Http | Language::Plain => TokenKind::Text,
    }
}
