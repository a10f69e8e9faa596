//! Pluralization utilities.

/// Return "s" suffix for plural counts
///
/// # Examples
///
/// - `plural_s(0)` -> `"s"` (0 sources)
/// - `plural_s(1)` -> `""` (1 source)
/// - `plural_s(5)` -> `"s"` (5 sources)
#[inline]
pub fn plural_s(n: usize) -> &'static str {
    if n == 1 { "" } else { "s" }
}

/// Format count with noun, handling pluralization
///
/// # Examples
///
/// - `plural_count(0, "extension")` -> `"0 extensions"`
/// - `plural_count(1, "extension")` -> `"1 extension"`
#[inline]
pub fn plural_count(count: usize, noun: &str) -> String {
    format!("{} {}{}", count, noun, plural_s(count))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_plural_count() {
        assert_eq!(plural_count(0, "source"), "0 sources");
        assert_eq!(plural_count(1, "source"), "1 source");
        assert_eq!(plural_count(3, "warning"), "3 warnings");
    }
}
