//! Normalization of statement source text.

const INDENT_CHARS: [char; 2] = [' ', '\t'];

/// Removes the indentation common to every non-blank line
///
/// Lines made only of spaces and tabs become empty and do not take part in
/// computing the common margin. Tabs and spaces are not interchangeable: a
/// line indented with a tab and one indented with spaces share no margin.
#[must_use]
pub fn dedent(text: &str) -> String {
    let mut margin: Option<&str> = None;
    for line in text.split('\n') {
        if is_blank(line) {
            continue;
        }
        let indent = leading_indent(line);
        margin = Some(match margin {
            None => indent,
            Some(current) => common_prefix(current, indent),
        });
    }
    let margin = margin.unwrap_or_default();

    text.split('\n')
        .map(|line| {
            if is_blank(line) {
                ""
            } else {
                line.strip_prefix(margin).unwrap_or(line)
            }
        })
        .collect::<Vec<_>>()
        .join("\n")
}

fn is_blank(line: &str) -> bool {
    line.trim_matches(INDENT_CHARS).is_empty()
}

fn leading_indent(line: &str) -> &str {
    let rest = line.trim_start_matches(INDENT_CHARS);
    &line[..line.len() - rest.len()]
}

fn common_prefix<'a>(a: &'a str, b: &str) -> &'a str {
    // Both inputs only hold ASCII spaces and tabs, so byte offsets are char boundaries.
    let len = a
        .bytes()
        .zip(b.bytes())
        .take_while(|(x, y)| x == y)
        .count();
    &a[..len]
}
