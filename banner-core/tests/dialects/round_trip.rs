//! Round-trip tests for the dialect rewriter.
//!
//! Messages built only from supported dialect elements (plain text, bold,
//! italic, link, no same-kind nesting) must survive markdown -> HTML ->
//! markdown unchanged, and the HTML rendition must be a fixpoint of the
//! reverse trip.

use banner_core::dialects::{to_html, to_markdown};
use proptest::prelude::*;

/// One dialect element. Inner texts avoid the marker characters so segments
/// compose without accidental nesting.
fn segment() -> impl Strategy<Value = String> {
    prop_oneof![
        // plain text
        "[a-zA-Z0-9 .,!]{1,16}",
        // bold run
        "[a-zA-Z0-9 ]{1,10}".prop_map(|inner| format!("**{inner}**")),
        // italic run
        "[a-zA-Z0-9 ]{1,10}".prop_map(|inner| format!("*{inner}*")),
        // link
        ("[a-zA-Z0-9 ]{1,8}", "[a-z0-9./:]{1,14}")
            .prop_map(|(text, url)| format!("[{text}]({url})")),
    ]
}

fn message() -> impl Strategy<Value = String> {
    prop::collection::vec(segment(), 0..6).prop_map(|segments| segments.concat())
}

proptest! {
    #[test]
    fn dialect_messages_round_trip(markdown in message()) {
        let html = to_html(&markdown);
        prop_assert_eq!(to_markdown(&html), markdown.clone());
        // The HTML side is a fixpoint of the reverse trip.
        prop_assert_eq!(to_html(&to_markdown(&html)), html);
    }

    #[test]
    fn plain_text_is_untouched(text in "[a-zA-Z0-9 .,!?;:'\"]{0,40}") {
        prop_assert_eq!(to_html(&text), text.clone());
        prop_assert_eq!(to_markdown(&text), text);
    }
}

#[test]
fn kitchensink_message_round_trips() {
    let markdown = "**Outage** expected, see [the status page](https://status.example.com) or *wait it out*.";
    let html = to_html(markdown);
    assert_eq!(
        html,
        "<strong>Outage</strong> expected, see <a href='https://status.example.com'>the status page</a> or <em>wait it out</em>."
    );
    assert_eq!(to_markdown(&html), markdown);
}

#[test]
fn rule_order_is_bold_then_italic_then_link() {
    // Bold is substituted globally before italic ever runs, so the inner
    // `**` run is consumed first and the remaining single asterisks wrap the
    // whole substituted span. Visually odd, but reproducible by contract.
    assert_eq!(
        to_html("*bold **inner** text*"),
        "<em>bold <strong>inner</strong> text</em>"
    );
}

#[test]
fn anchors_with_marker_characters_convert_last() {
    // In the HTML -> markdown direction the bold/italic rules have already
    // run by the time the anchor rule produces bracket syntax, so asterisks
    // inside anchor text come through literally.
    assert_eq!(
        to_markdown("<a href=\"http://x.com\">a *starry* name</a>"),
        "[a *starry* name](http://x.com)"
    );
}

#[test]
fn same_kind_nesting_is_not_special_cased() {
    // A single pass per rule means nested bold leaves literal leftovers.
    // Accepted behavior, not a defect.
    assert_eq!(
        to_html("**a **b** c**"),
        "<strong>a </strong>b<strong> c</strong>"
    );
}
