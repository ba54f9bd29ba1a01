use once_cell::sync::Lazy;
use regex::Regex;

static NON_WORD: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"\W+").expect("static pattern")
});

static HTML_TAG: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"<[^>]*>").expect("static pattern")
});

/// Lowercase `text` and collapse every run of non-word characters to one space.
pub fn normalize(text: &str) -> String {
    let lowered = text.to_lowercase();
    NON_WORD.replace_all(&lowered, " ").trim().to_string()
}

/// Whether normalized `text` contains `term` as a whole word or word sequence.
///
/// `term` is normalized the same way, so "not true" matches "... is not true."
/// but "not" never matches inside "nothing".
pub fn contains_term(text: &str, term: &str) -> bool {
    let normalized_term = normalize(term);
    let needle: Vec<&str> = normalized_term.split_whitespace().collect();
    if needle.is_empty() {
        return false;
    }
    let haystack: Vec<&str> = text.split_whitespace().collect();
    haystack.windows(needle.len()).any(|window| window == needle.as_slice())
}

/// Number of whole-word occurrences of `term` in normalized `text`
pub fn count_term(text: &str, term: &str) -> usize {
    let normalized_term = normalize(term);
    let needle: Vec<&str> = normalized_term.split_whitespace().collect();
    if needle.is_empty() {
        return 0;
    }
    let haystack: Vec<&str> = text.split_whitespace().collect();
    haystack
        .windows(needle.len())
        .filter(|window| *window == needle.as_slice())
        .count()
}

/// Entities left in feed descriptions after XML unescaping; `&amp;` goes last
const HTML_ENTITIES: &[(&str, &str)] = &[
    ("&nbsp;", " "),
    ("&quot;", "\""),
    ("&#39;", "'"),
    ("&#x27;", "'"),
    ("&apos;", "'"),
    ("&lt;", "<"),
    ("&gt;", ">"),
    ("&amp;", "&"),
];

/// Remove HTML markup and decode the common entities feeds embed in their descriptions
pub fn strip_html(text: &str) -> String {
    let mut decoded = HTML_TAG.replace_all(text, " ").into_owned();
    for &(entity, replacement) in HTML_ENTITIES {
        if decoded.contains(entity) {
            decoded = decoded.replace(entity, replacement);
        }
    }
    decoded
        .split_whitespace()
        .collect::<Vec<_>>()
        .join(" ")
}
