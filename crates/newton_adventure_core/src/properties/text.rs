//! Lenient conversion of property text to Rust values.

/// Trait for types that can be read from a non-empty property string.
///
/// Conversion never fails: numbers that do not parse read as zero, which is
/// what level designers get from the editor's own property parsing.
///
/// # Example
///
/// ```rust
/// use newton_adventure_core::properties::FromPropertyText;
///
/// assert_eq!(i32::from_text(" 42 "), 42);
/// assert_eq!(i32::from_text("forty-two"), 0);
/// assert_eq!(f32::from_text("0.25"), 0.25);
/// ```
pub trait FromPropertyText: Sized {
    fn from_text(text: &str) -> Self;
}

impl FromPropertyText for i32 {
    fn from_text(text: &str) -> Self {
        text.trim().parse().unwrap_or(0)
    }
}

impl FromPropertyText for f32 {
    fn from_text(text: &str) -> Self {
        text.trim().parse().unwrap_or(0.0)
    }
}

impl FromPropertyText for String {
    fn from_text(text: &str) -> Self {
        text.to_string()
    }
}
