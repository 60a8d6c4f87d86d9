use maud::{html, Markup, Render};

use super::highlight::{highlight_line, Language, TokenKind};

/// A highlighted code sample with a copy button.
///
/// The button carries the exact source text in `data-copy`; `site.js` puts it
/// on the clipboard and flips the label to "Copied!" for
/// `data-copy-reset-ms` milliseconds.
#[derive(Debug, Clone, Copy)]
pub struct CodeBlock<'a> {
    pub code: &'a str,
    pub language: Language,
    pub line_numbers: bool,
    pub copy_reset_ms: u64,
}

impl<'a> CodeBlock<'a> {
    pub fn new(code: &'a str, language: Language, copy_reset_ms: u64) -> Self {
        Self {
            code,
            language,
            line_numbers: false,
            copy_reset_ms,
        }
    }

    pub fn with_line_numbers(mut self) -> Self {
        self.line_numbers = true;
        self
    }
}

impl Render for CodeBlock<'_> {
    fn render(&self) -> Markup {
        html! {
            div.code-block data-language=(self.language.label()) {
                div.code-toolbar {
                    span.code-language { (self.language.label()) }
                    button.copy-button type="button" title="Copy to clipboard"
                        data-copy=(self.code) data-copy-reset-ms=(self.copy_reset_ms) { "Copy" }
                }
                pre.code.numbered[self.line_numbers] {
                    code {
                        @for (index, line) in self.code.lines().enumerate() {
                            span.line {
                                @if self.line_numbers {
                                    span.line-number aria-hidden="true" { (index + 1) }
                                }
                                @for token in highlight_line(self.language, line) {
                                    @if token.kind == TokenKind::Text {
                                        (token.text)
                                    } @else {
                                        span class=(token.kind.class()) { (token.text) }
                                    }
                                }
                            }
                        }
                    }
                }
            }
        }
    }
}
