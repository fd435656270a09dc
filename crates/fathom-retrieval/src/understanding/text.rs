//! Phrase matching on normalized query text.

/// Lowercase `text`, collapse everything except alphanumerics, `&` and `'`
/// into single spaces, and pad both ends with a space. Phrases can then be
/// matched on word boundaries with [`contains_phrase`].
pub fn padded_lowercase(text: &str) -> String {
    let mut out = String::with_capacity(text.len() + 2);
    out.push(' ');
    let mut last_space = true;
    for c in text.chars().flat_map(char::to_lowercase) {
        if c.is_alphanumeric() || c == '&' || c == '\'' {
            out.push(c);
            last_space = false;
        } else if !last_space {
            out.push(' ');
            last_space = true;
        }
    }
    if !last_space {
        out.push(' ');
    }
    out
}

/// Whether the padded text contains `phrase` as whole words.
pub fn contains_phrase(padded: &str, phrase: &str) -> bool {
    padded.contains(&format!(" {phrase} "))
}
