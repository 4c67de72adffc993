//! Property tests for statement source dedenting

use livyctl_core::dedent;
use proptest::prelude::*;

/// Strategy for lines without leading whitespace
fn body_line_strategy() -> impl Strategy<Value = String> {
    "[a-z(][a-z0-9 ()=+]{0,20}"
}

proptest! {
    /// Property: A uniform indent added to every line is removed exactly
    #[test]
    fn uniform_indent_is_removed(
        lines in prop::collection::vec(body_line_strategy(), 1..8),
        width in 0usize..12,
    ) {
        let indent = " ".repeat(width);
        let indented = lines
            .iter()
            .map(|line| format!("{indent}{line}"))
            .collect::<Vec<_>>()
            .join("\n");

        prop_assert_eq!(dedent(&indented), lines.join("\n"));
    }

    /// Property: Dedenting twice gives the same result as dedenting once
    #[test]
    fn dedent_is_idempotent(text in "[ \ta-z\n]{0,60}") {
        let once = dedent(&text);
        prop_assert_eq!(dedent(&once), once.clone());
    }

    /// Property: The number of lines never changes
    #[test]
    fn line_count_is_preserved(text in "[ \ta-z\n]{0,60}") {
        prop_assert_eq!(dedent(&text).split('\n').count(), text.split('\n').count());
    }

    /// Property: Relative indentation inside a block survives
    #[test]
    fn nested_indent_is_kept(
        outer in 1usize..8,
        inner in 1usize..8,
        head in body_line_strategy(),
        body in body_line_strategy(),
    ) {
        let text = format!(
            "{}{head}\n{}{body}",
            " ".repeat(outer),
            " ".repeat(outer + inner)
        );
        prop_assert_eq!(dedent(&text), format!("{head}\n{}{body}", " ".repeat(inner)));
    }
}

#[test]
fn mixed_tabs_and_spaces_share_no_margin() {
    assert_eq!(dedent("\ta\n    b"), "\ta\n    b");
}

#[test]
fn whitespace_only_lines_are_emptied() {
    assert_eq!(dedent("    a\n   \n    b"), "a\n\nb");
}
