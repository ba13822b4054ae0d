//! Request payloads and the cleaning/validation applied before they reach storage.

pub mod post;
pub mod user;

pub use post::PostPayload;
pub use user::{UserAction, UserPayload};

/// Maximum length of usernames, emails and titles.
pub const MAX_NAME_LEN: usize = 100;
/// Maximum length of post content.
pub const MAX_CONTENT_LEN: usize = 255;

/// Trim surrounding whitespace and HTML-escape what is left.
///
/// Quotes use the numeric entities `&#34;` and `&#39;` so stored text matches
/// what earlier deployments wrote for the same input.
pub(crate) fn clean(input: &str) -> String {
    html_escape::encode_text(input.trim())
        .replace('"', "&#34;")
        .replace('\'', "&#39;")
}

pub(crate) fn too_long(value: &str, max: usize) -> bool {
    value.chars().count() > max
}
