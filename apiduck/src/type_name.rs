//! Type-name normalization.
//!
//! Reduces fully-qualified type descriptors, such as the ones produced by
//! [`core::any::type_name`], to the short labels shown in documentation.

/// Reduce a fully-qualified type descriptor to its short display name.
///
/// Every path inside the descriptor keeps only its final component after the
/// last `::`. Generic arguments, references, slices, arrays and tuples are
/// normalized component by component. A descriptor without `::` is returned
/// unchanged.
///
/// # Example
///
/// ```rust
/// use apiduck::short_name;
///
/// assert_eq!(short_name("my_app::models::User"), "User");
/// assert_eq!(short_name("alloc::vec::Vec<my_app::Tag>"), "Vec<Tag>");
/// assert_eq!(short_name("string"), "string");
/// ```
pub fn short_name(descriptor: &str) -> String {
    let mut out = String::with_capacity(descriptor.len());
    let mut segment_start = 0;

    for (index, ch) in descriptor.char_indices() {
        if is_path_char(ch) {
            continue;
        }
        push_last_segment(&mut out, &descriptor[segment_start..index]);
        out.push(ch);
        segment_start = index + ch.len_utf8();
    }
    push_last_segment(&mut out, &descriptor[segment_start..]);

    out
}

/// Path characters, including the braces of compiler-generated segments
/// such as `{{closure}}`.
fn is_path_char(ch: char) -> bool {
    ch.is_alphanumeric() || matches!(ch, '_' | ':' | '{' | '}' | '#')
}

fn push_last_segment(out: &mut String, path: &str) {
    out.push_str(path.rsplit("::").next().unwrap_or(path));
}
