/// Derives an attachment name from a declared model name.
///
/// Only the first character is lowercased; the rest is kept as declared:
/// `"Book"` → `"book"`, `"BookReview"` → `"bookReview"`, `"order_line"` → `"order_line"`.
pub fn lower_camel_case(name: &str) -> String {
    let mut chars = name.chars();
    match chars.next() {
        Some(first) => first.to_lowercase().chain(chars).collect(),
        None => String::new(),
    }
}
