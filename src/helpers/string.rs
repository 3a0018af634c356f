//! Text utilities for turning HTML element text into cell values.

/// Concatenates text fragments and collapses every run of whitespace into a single space.
/// Leading and trailing whitespace is removed.
pub(crate) fn collapse_whitespace<'a, I>(fragments: I) -> String
where
    I: IntoIterator<Item = &'a str>,
{
    let joined: String = fragments.into_iter().collect();
    let mut text = String::with_capacity(joined.len());
    for word in joined.split_whitespace() {
        if !text.is_empty() {
            text.push(' ');
        }
        text.push_str(word);
    }
    text
}
