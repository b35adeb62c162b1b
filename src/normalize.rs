//! Text cleanup applied to user input before it is stored. Duplicate
//! detection compares exact strings, so titles and authors have to be brought
//! into one canonical shape first.

/// Drop every ASCII punctuation character.
pub fn remove_punctuation(text: &str) -> String {
    text.chars().filter(|ch| !ch.is_ascii_punctuation()).collect()
}

/// Upper-case the first letter of each word and lower-case the rest. A word
/// starts at any letter that does not follow another letter.
pub fn title_case(text: &str) -> String {
    let mut out = String::with_capacity(text.len());
    let mut prev_is_letter = false;
    for ch in text.chars() {
        if ch.is_alphabetic() {
            if prev_is_letter {
                out.extend(ch.to_lowercase());
            } else {
                out.extend(ch.to_uppercase());
            }
            prev_is_letter = true;
        } else {
            out.push(ch);
            prev_is_letter = false;
        }
    }
    out
}

/// Canonical form for titles and authors: punctuation goes first, so
/// "sci-fi" becomes "Scifi".
pub fn normalize_name(text: &str) -> String {
    title_case(remove_punctuation(text).trim())
}

/// Canonical form for genres and series: words are capitalized before
/// punctuation is dropped, so "sci-fi" becomes "SciFi".
pub fn normalize_label(text: &str) -> String {
    remove_punctuation(&title_case(text.trim())).trim().to_string()
}
