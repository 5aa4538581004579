//! Column-name normalization.
//!
//! Column names and keywords go through the same function so that
//! `CUST_EMAIL`, `custEmail`, `Cust-Email` and `cust email` all become the
//! token sequence `["cust", "email"]`.

/// Splits a column name into lowercase tokens.
///
/// Boundaries are any non-alphanumeric character, a lowercase-to-uppercase
/// transition (`customerEmail`), the end of an uppercase run followed by a
/// capitalized word (`HTTPServer` -> `http`, `server`) and letter/digit
/// transitions (`address2` -> `address`, `2`).
pub fn column_tokens(raw: &str) -> Vec<String> {
    let mut tokens = Vec::new();
    for word in raw.split(|c: char| !c.is_alphanumeric()) {
        split_word(word, &mut tokens);
    }
    tokens
}

/// Lowercase tokens joined by `_`.
pub fn normalize_name(raw: &str) -> String {
    column_tokens(raw).join("_")
}

fn split_word(word: &str, tokens: &mut Vec<String>) {
    let chars: Vec<char> = word.chars().collect();
    let mut current = String::new();
    for (idx, &ch) in chars.iter().enumerate() {
        if idx > 0 && is_boundary(chars[idx - 1], ch, chars.get(idx + 1).copied()) {
            tokens.push(std::mem::take(&mut current));
        }
        current.extend(ch.to_lowercase());
    }
    if !current.is_empty() {
        tokens.push(current);
    }
}

fn is_boundary(prev: char, ch: char, next: Option<char>) -> bool {
    if prev.is_numeric() != ch.is_numeric() {
        return true;
    }
    if prev.is_lowercase() && ch.is_uppercase() {
        return true;
    }
    // Last capital of an acronym starts the next word: "IDNumber" -> "id", "number".
    prev.is_uppercase() && ch.is_uppercase() && next.is_some_and(char::is_lowercase)
}
