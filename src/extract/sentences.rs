use super::text::MIN_SENTENCE_LENGTH;
use itertools::Itertools;
use once_cell::sync::Lazy;
use regex::Regex;

static PARAGRAPH_BREAK: Lazy<Regex> = Lazy::new(|| Regex::new(r"\n{2,}").unwrap());

fn is_terminal(c: char) -> bool {
    matches!(c, '.' | '!' | '?')
}

/// Cut `text` right after every char where `boundary(current, next)` holds.
fn split_after<F>(text: &str, boundary: F) -> Vec<&str>
where
    F: Fn(char, Option<char>) -> bool,
{
    let mut fragments = Vec::new();
    let mut start = 0;
    let mut chars = text.char_indices().peekable();

    while let Some((i, c)) = chars.next() {
        let next = chars.peek().map(|&(_, n)| n);
        if boundary(c, next) {
            let end = i + c.len_utf8();
            fragments.push(&text[start..end]);
            start = end;
        }
    }
    fragments.push(&text[start..]);
    fragments
}

fn rejoin<'a>(fragments: impl IntoIterator<Item = &'a str>) -> String {
    fragments
        .into_iter()
        .map(str::trim)
        .filter(|f| !f.is_empty())
        .join("\n")
}

/// Break extracted page text into one practice sentence per line.
///
/// Rules run in a fixed order, each one re-joining its output with newlines
/// before the next sees it:
/// 1. after `.`, `!` or `?` glued to the next word (`end.Next`)
/// 2. after `.`, `!` or `?` followed by whitespace, a quote, or the end
/// 3. after `:` or `;` followed by whitespace or the end
/// 4. on blank-line paragraph breaks
///
/// Lines shorter than ten characters and repeated lines are dropped.
/// Decimals and abbreviations (`3.14`, `e.g.`) are split too.
pub fn split_into_sentences(text: &str) -> String {
    let glued = rejoin(split_after(text, |c, next| {
        is_terminal(c) && next.is_some_and(|n| !is_terminal(n) && !n.is_whitespace())
    }));

    let spaced = rejoin(split_after(&glued, |c, next| {
        is_terminal(c) && next.map_or(true, |n| n.is_whitespace() || n == '"' || n == '\'')
    }));

    let clauses = rejoin(split_after(&spaced, |c, next| {
        matches!(c, ':' | ';') && next.map_or(true, char::is_whitespace)
    }));

    let paragraphs = rejoin(PARAGRAPH_BREAK.split(&clauses));

    paragraphs
        .split('\n')
        .map(str::trim)
        .filter(|line| line.chars().count() >= MIN_SENTENCE_LENGTH)
        .unique()
        .join("\n")
}
