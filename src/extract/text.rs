use once_cell::sync::Lazy;
use regex::Regex;
use url::Url;

/// Filtered text must be strictly longer than this many characters
pub const MIN_SENTENCE_LENGTH: usize = 10;

const HANGUL_SYLLABLES: std::ops::RangeInclusive<char> = '\u{AC00}'..='\u{D7A3}';
const HANGUL_JAMO: std::ops::RangeInclusive<char> = '\u{3131}'..='\u{318E}';
const ALLOWED_PUNCTUATION: &str = ".,!?()[]{}\":;'- ";

static WHITESPACE_RUN: Lazy<Regex> = Lazy::new(|| Regex::new(r"\s+").unwrap());

// Fragments that look like link text or identifiers rather than prose
static NON_SENTENCE: Lazy<[Regex; 4]> = Lazy::new(|| {
    [
        Regex::new(r"^https?:").unwrap(),
        Regex::new(r"^(?:[\w-]+\.)+[A-Za-z]{2,}$").unwrap(),
        Regex::new(r"^\d+$").unwrap(),
        Regex::new(r"^[\w-]+$").unwrap(),
    ]
});

/// True for a bare http(s) URL with a host and no surrounding or interior spaces.
pub fn is_url(text: &str) -> bool {
    if text != text.trim() || text.contains(' ') {
        return false;
    }

    match Url::parse(text) {
        Ok(url) => {
            // The parser repairs `http:/host` and `http:host`; require the authority marker
            let has_authority = text[url.scheme().len()..].starts_with("://");
            matches!(url.scheme(), "http" | "https")
                && has_authority
                && url.host_str().is_some_and(|host| !host.is_empty())
        }
        Err(_) => false,
    }
}

/// Characters that may appear in practice text
pub fn is_allowed_char(c: char) -> bool {
    c.is_alphanumeric()
        || HANGUL_SYLLABLES.contains(&c)
        || HANGUL_JAMO.contains(&c)
        || ALLOWED_PUNCTUATION.contains(c)
}

/// Reduce a block of page text to a practice candidate.
///
/// Returns an empty string when nothing worth typing is left.
pub fn filter_text(text: &str) -> String {
    let kept: String = text.chars().filter(|&c| is_allowed_char(c)).collect();
    let collapsed = WHITESPACE_RUN.replace_all(&kept, " ");
    let cleaned = collapsed.trim();

    if NON_SENTENCE.iter().any(|re| re.is_match(cleaned)) {
        return String::new();
    }

    if cleaned.chars().count() > MIN_SENTENCE_LENGTH {
        cleaned.to_string()
    } else {
        String::new()
    }
}
