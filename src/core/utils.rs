//! Identifier casing for Java class names and Play route parameters

/// Split an identifier into its words.
///
/// Words end at `-`, `_`, `.` and whitespace, at a lowercase-or-digit to
/// uppercase step (`petId`), and before the last capital of an acronym
/// followed by lowercase (`HTTPResponse` splits into `HTTP` and `Response`).
fn split_words(s: &str) -> Vec<&str> {
    let mut words = Vec::new();
    let chars: Vec<(usize, char)> = s.char_indices().collect();
    let mut start: Option<usize> = None;

    for (pos, &(idx, ch)) in chars.iter().enumerate() {
        if !ch.is_alphanumeric() {
            if let Some(begin) = start.take() {
                words.push(&s[begin..idx]);
            }
            continue;
        }

        let Some(begin) = start else {
            start = Some(idx);
            continue;
        };

        let prev = chars[pos - 1].1;
        let next_is_lower = chars.get(pos + 1).is_some_and(|&(_, c)| c.is_lowercase());
        let boundary = ch.is_uppercase()
            && ((prev.is_lowercase() || prev.is_ascii_digit())
                || (prev.is_uppercase() && next_is_lower));
        if boundary {
            words.push(&s[begin..idx]);
            start = Some(idx);
        }
    }

    if let Some(begin) = start {
        words.push(&s[begin..]);
    }
    words
}

fn capitalize(word: &str) -> String {
    let lower = word.to_lowercase();
    let mut chars = lower.chars();
    chars
        .next()
        .map(|first| first.to_uppercase().chain(chars).collect())
        .unwrap_or_default()
}

/// UpperCamelCase, as used for Java class names.
///
/// ```
/// use playgen::core::utils::to_proper_case;
///
/// assert_eq!(to_proper_case("store"), "Store");
/// assert_eq!(to_proper_case("user-account"), "UserAccount");
/// ```
pub fn to_proper_case(s: &str) -> String {
    split_words(s).into_iter().map(capitalize).collect()
}

/// lowerCamelCase, as used for Play route parameters.
///
/// Only the first character of each word changes case; the rest keeps its
/// casing (`user_ID` gives `userID`). Re-applying it to its own output
/// changes nothing.
///
/// ```
/// use playgen::core::utils::to_camel_case;
///
/// assert_eq!(to_camel_case("pet_id"), "petId");
/// assert_eq!(to_camel_case("petId"), "petId");
/// ```
pub fn to_camel_case(s: &str) -> String {
    let mut words = split_words(s).into_iter();
    let Some(first) = words.next() else {
        return String::new();
    };
    let mut out = with_first_char(first, char::to_lowercase);
    out.extend(words.map(|word| with_first_char(word, char::to_uppercase)));
    out
}

fn with_first_char<I>(word: &str, convert: impl FnOnce(char) -> I) -> String
where
    I: Iterator<Item = char>,
{
    let mut chars = word.chars();
    chars
        .next()
        .map(|first| convert(first).chain(chars).collect())
        .unwrap_or_default()
}
