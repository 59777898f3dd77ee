//! Input sanitization
//!
//! Companies supply free-text `website` and `description` fields that end up
//! rendered on public pages. Both are stripped of executable-script content
//! before every save.

use lazy_static::lazy_static;
use regex::Regex;

lazy_static! {
    // <script ...> ... </script>, including unclosed trailing blocks
    static ref SCRIPT_BLOCK: Regex =
        Regex::new(r"(?is)<script\b[^>]*>.*?</script\s*>|<script\b[^>]*>.*$")
            .expect("script regex must compile");
    // inline handlers: onclick=, onload=, ...
    static ref EVENT_HANDLER: Regex =
        Regex::new(r#"(?i)\son\w+\s*=\s*("[^"]*"|'[^']*'|[^\s>]+)"#)
            .expect("handler regex must compile");
    static ref JAVASCRIPT_SCHEME: Regex =
        Regex::new(r"(?i)javascript\s*:").expect("scheme regex must compile");
}

/// Strip script blocks, inline event handlers and javascript: URIs.
/// The remaining markup is left untouched.
pub fn strip_script_content(value: &str) -> String {
    let without_blocks = SCRIPT_BLOCK.replace_all(value, "");
    let without_handlers = EVENT_HANDLER.replace_all(&without_blocks, "");
    JAVASCRIPT_SCHEME.replace_all(&without_handlers, "").into_owned()
}

/// Sanitize an optional text field in place
pub fn sanitize_field(field: &mut Option<String>) {
    if let Some(value) = field.as_deref() {
        *field = Some(strip_script_content(value));
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_strips_script_blocks() {
        let input = "Dog daycare<script>alert('x')</script> in Solna";
        assert_eq!(strip_script_content(input), "Dog daycare in Solna");
    }

    #[test]
    fn test_strips_unclosed_script() {
        let input = "before<script>var x = 1;";
        assert_eq!(strip_script_content(input), "before");
    }

    #[test]
    fn test_strips_event_handlers() {
        let input = r#"<a href="https://example.se" onclick="steal()">site</a>"#;
        let cleaned = strip_script_content(input);
        assert!(!cleaned.to_lowercase().contains("onclick"));
        assert!(cleaned.contains("https://example.se"));
    }

    #[test]
    fn test_strips_javascript_scheme() {
        let input = "javascript:alert(1)";
        assert!(!strip_script_content(input).to_lowercase().contains("javascript:"));
    }

    #[test]
    fn test_plain_text_untouched() {
        let input = "Uppfödare av labrador i Västra Götaland sedan 1998.";
        assert_eq!(strip_script_content(input), input);
    }

    #[test]
    fn test_sanitize_field_none_stays_none() {
        let mut field: Option<String> = None;
        sanitize_field(&mut field);
        assert!(field.is_none());
    }
}
