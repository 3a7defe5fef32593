/// Characters that join words in dashed or snake-cased names.
fn is_word_joiner(c: char) -> bool {
    c == '-' || c == '_'
}

fn is_line_terminator(c: char) -> bool {
    matches!(c, '\n' | '\r' | '\u{2028}' | '\u{2029}')
}

/// Converts a dashed or snake-cased name to camel case.
///
/// Every `-` or `_` followed by a character is replaced by that character
/// upper-cased. Pairs are consumed left to right, so `a--b` becomes `a-b`.
/// A trailing joiner is kept.
///
/// # Examples
///
/// ```
/// use layer_patch_util::camel_case;
///
/// assert_eq!(camel_case("sub-object"), "subObject");
/// assert_eq!(camel_case("subber_object"), "subberObject");
/// assert_eq!(camel_case("already"), "already");
/// ```
pub fn camel_case(name: &str) -> String {
    if !name.contains(is_word_joiner) {
        return name.to_string();
    }
    let mut out = String::with_capacity(name.len());
    let mut chars = name.chars().peekable();
    while let Some(c) = chars.next() {
        if is_word_joiner(c) {
            if let Some(&next) = chars.peek() {
                if !is_line_terminator(next) {
                    out.extend(next.to_uppercase());
                    chars.next();
                    continue;
                }
            }
        }
        out.push(c);
    }
    out
}
