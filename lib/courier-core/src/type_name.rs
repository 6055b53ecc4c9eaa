//! Human-readable type names for deserialization errors.

/// Short name of `T`, with every module path stripped.
///
/// `std::any::type_name` spells out full paths; error messages only need what
/// a caller wrote at the call site.
///
/// ```
/// use courier_core::short_type_name;
///
/// assert_eq!(short_type_name::<Vec<String>>(), "Vec<String>");
/// assert_eq!(short_type_name::<Option<(u8, std::collections::HashMap<String, bool>)>>(),
///            "Option<(u8, HashMap<String, bool>)>");
/// ```
#[must_use]
pub fn short_type_name<T: ?Sized>() -> String {
    strip_paths(std::any::type_name::<T>())
}

fn strip_paths(full: &str) -> String {
    let mut out = String::with_capacity(full.len());
    let mut segment_start = 0;

    for (index, ch) in full.char_indices() {
        if is_delimiter(ch) {
            out.push_str(last_segment(&full[segment_start..index]));
            out.push(ch);
            segment_start = index + ch.len_utf8();
        }
    }
    out.push_str(last_segment(&full[segment_start..]));
    out
}

const fn is_delimiter(ch: char) -> bool {
    matches!(ch, '<' | '>' | ',' | ' ' | '(' | ')' | '[' | ']' | ';' | '&')
}

fn last_segment(path: &str) -> &str {
    path.rsplit("::").next().unwrap_or(path)
}
