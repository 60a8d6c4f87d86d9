use regex::Regex;
use std::sync::LazyLock;

static WHITESPACE: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"\s+").expect("valid regex"));
static SECTION_ID: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^[a-z0-9]+(-[a-z0-9]+)*$").expect("valid regex"));

/// URL segment and anchor id for a title: lower-cased, each whitespace run
/// replaced by a single hyphen. Punctuation is kept as-is.
pub fn slug(title: &str) -> String {
    WHITESPACE.replace_all(&title.to_lowercase(), "-").into_owned()
}

pub fn is_url_safe(id: &str) -> bool {
    SECTION_ID.is_match(id)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn slugs_lowercase_and_hyphenate() {
        assert_eq!(slug("List Cash Acquisitions"), "list-cash-acquisitions");
        assert_eq!(slug("Get Document by ID"), "get-document-by-id");
        assert_eq!(slug("Obtaining  an\tAccess Token"), "obtaining-an-access-token");
    }

    #[test]
    fn slugs_keep_punctuation() {
        assert_eq!(slug("Get Upload URL (v2)"), "get-upload-url-(v2)");
    }

    #[test]
    fn section_ids_must_be_kebab_case() {
        assert!(is_url_safe("financing-property"));
        assert!(is_url_safe("v1"));
        assert!(!is_url_safe("Financing"));
        assert!(!is_url_safe("cash acquisitions"));
        assert!(!is_url_safe("-leading"));
        assert!(!is_url_safe(""));
    }
}
