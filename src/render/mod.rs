//! Server-side HTML for every page of the site, built with `maud`.

mod code_block;
mod endpoint;
mod highlight;
mod layout;
mod pages;

pub use pages::render_route;

use maud::{html, Markup};

/// Timings handed to `site.js` through data attributes.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RenderOptions {
    /// How long a copy button reads "Copied!" before reverting.
    pub copy_reset_ms: u64,
    /// Delay before smooth-scrolling to a fragment on same-page navigation.
    pub scroll_delay_ms: u64,
}

impl Default for RenderOptions {
    fn default() -> Self {
        Self {
            copy_reset_ms: 2000,
            scroll_delay_ms: 100,
        }
    }
}

#[derive(Debug)]
pub struct RenderedPage {
    pub markup: Markup,
    /// False for the "not found" panels, which are served with a 404.
    pub found: bool,
}

impl RenderedPage {
    pub fn into_string(self) -> String {
        self.markup.into_string()
    }
}

/// Content text with backtick-delimited spans shown as inline code.
pub(crate) fn inline_code(text: &str) -> Markup {
    html! {
        @for (index, part) in text.split('`').enumerate() {
            @if index % 2 == 1 {
                code { (part) }
            } @else {
                (part)
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn backticks_become_code() {
        assert_eq!(
            inline_code("call `PATCH /documents/:documentId` with <body>").into_string(),
            "call <code>PATCH /documents/:documentId</code> with &lt;body&gt;"
        );
        assert_eq!(inline_code("no code here").into_string(), "no code here");
    }
}
