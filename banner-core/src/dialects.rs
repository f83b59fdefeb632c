//! Conversion between the two banner message dialects.
//!
//! A banner message lives in two textual encodings of the same content: a
//! markdown-like dialect (`**bold**`, `*italic*`, `[text](url)`) while it is
//! being edited, and an HTML subset (`<strong>`, `<em>`, `<a href=...>`) while
//! it is resident in the settings store.
//!
//! Both directions are a fold over an ordered list of pattern/replacement
//! rules. Each rule is applied globally (all non-overlapping matches) before
//! the next rule runs, and the list is traversed exactly once - never to
//! fixpoint. The order is load-bearing: bold must run before italic so that
//! `**` runs are consumed before the single-`*` rule sees them, and links run
//! last so that anchor text containing `*` survives untouched.
//!
//! Malformed markup (an unbalanced `*`, a stray `</em>`) is not an error; it
//! simply fails to match and passes through as literal text.

use once_cell::sync::Lazy;
use regex::Regex;

/// A single pattern/replacement pair applied during dialect conversion.
struct RewriteRule {
    pattern: Regex,
    replacement: &'static str,
}

impl RewriteRule {
    fn new(pattern: &str, replacement: &'static str) -> Self {
        RewriteRule {
            pattern: Regex::new(pattern).expect("rewrite pattern must compile"),
            replacement,
        }
    }

    /// Replace every non-overlapping match in a single left-to-right pass.
    fn apply(&self, text: &str) -> String {
        self.pattern.replace_all(text, self.replacement).into_owned()
    }
}

/// Rules for the markdown -> HTML direction, in application order.
static MARKDOWN_TO_HTML: Lazy<Vec<RewriteRule>> = Lazy::new(|| {
    vec![
        RewriteRule::new(r"\*\*([^*]+)\*\*", "<strong>${1}</strong>"),
        RewriteRule::new(r"\*([^*]+)\*", "<em>${1}</em>"),
        RewriteRule::new(r"\[([^\[\]]+)\]\(([^()]+)\)", "<a href='${2}'>${1}</a>"),
    ]
});

/// Rules for the HTML -> markdown direction, in the same bold/italic/link order.
static HTML_TO_MARKDOWN: Lazy<Vec<RewriteRule>> = Lazy::new(|| {
    vec![
        RewriteRule::new(r"<strong>([^<>]+)</strong>", "**${1}**"),
        RewriteRule::new(r"<em>([^<>]+)</em>", "*${1}*"),
        RewriteRule::new(
            r#"<a href=["']([^<>]+)["']>([^<>]+)</a>"#,
            "[${2}](${1})",
        ),
    ]
});

fn apply_rules(rules: &[RewriteRule], text: &str) -> String {
    rules
        .iter()
        .fold(text.to_string(), |acc, rule| rule.apply(&acc))
}

/// Convert a message from the markdown dialect to the HTML subset dialect.
pub fn to_html(markdown: &str) -> String {
    apply_rules(&MARKDOWN_TO_HTML, markdown)
}

/// Convert a message from the HTML subset dialect back to the markdown dialect.
///
/// Accepts either single or double quotes around the anchor href value.
pub fn to_markdown(html: &str) -> String {
    apply_rules(&HTML_TO_MARKDOWN, html)
}
