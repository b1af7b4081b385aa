use unicode_normalization::char::is_combining_mark;
use unicode_normalization::UnicodeNormalization;

/// Characters replaced by a space before tokenizing. Periods are not in this
/// list; they mark initials and are resolved token by token.
const SEPARATORS: &[char] = &[',', '-', '\'', '\u{2019}'];

/// Canonicalize a player name for comparison.
///
/// - lowercase, accents folded ("Gaël" -> "gael")
/// - commas, hyphens and apostrophes become spaces
/// - multi-initial tokens are exploded ("j.r." -> "j.", "r.")
/// - adjacent single-letter initials are fused ("j." "r." -> "jr")
/// - remaining periods are dropped, whitespace collapsed
///
/// Applying it twice gives the same result as applying it once.
pub fn normalize_name(name: &str) -> String {
    let folded: String = name
        .to_lowercase()
        .nfkd()
        .filter(|c| !is_combining_mark(*c))
        .collect::<String>()
        .to_lowercase();

    let spaced: String = folded
        .chars()
        .map(|c| if SEPARATORS.contains(&c) { ' ' } else { c })
        .collect();

    let mut expanded: Vec<String> = Vec::new();
    for token in spaced.split_whitespace() {
        if token.matches('.').count() > 1 {
            expanded.extend(
                token
                    .split('.')
                    .filter(|piece| !piece.is_empty())
                    .map(|piece| format!("{piece}.")),
            );
        } else {
            expanded.push(token.to_string());
        }
    }

    let mut merged: Vec<String> = Vec::with_capacity(expanded.len());
    let mut i = 0;
    while i < expanded.len() {
        match as_initial(&expanded[i]) {
            Some(first) => match expanded.get(i + 1).and_then(|next| as_initial(next)) {
                Some(second) => {
                    merged.push(format!("{first}{second}"));
                    i += 2;
                }
                None => {
                    merged.push(first.to_string());
                    i += 1;
                }
            },
            None => {
                merged.push(expanded[i].replace('.', " "));
                i += 1;
            }
        }
    }

    merged
        .join(" ")
        .split_whitespace()
        .collect::<Vec<_>>()
        .join(" ")
}

/// `Some(letter)` for a single alphabetic character followed by a period.
fn as_initial(token: &str) -> Option<char> {
    let mut chars = token.chars();
    match (chars.next(), chars.next(), chars.next()) {
        (Some(letter), Some('.'), None) if letter.is_alphabetic() => Some(letter),
        _ => None,
    }
}
