//! String formatting utilities for UI rendering.

/// Truncate a string to max length, adding ellipsis if needed.
pub fn truncate(s: &str, max_len: usize) -> String {
    let char_count = s.chars().count();
    if char_count <= max_len {
        return s.to_string();
    }
    if max_len <= 3 {
        return s.chars().take(max_len).collect();
    }
    let truncated: String = s.chars().take(max_len - 3).collect();
    format!("{}...", truncated)
}

/// Pad a string to a fixed width (left-aligned).
pub fn pad_right(s: &str, width: usize) -> String {
    let char_count = s.chars().count();
    if char_count >= width {
        s.to_string()
    } else {
        format!("{}{}", s, " ".repeat(width - char_count))
    }
}

/// Weight without a trailing ".0": 100 -> "100", 102.5 -> "102.5".
pub fn format_kg(value: f64) -> String {
    if value.fract() == 0.0 {
        format!("{:.0}", value)
    } else {
        let text = format!("{:.2}", value);
        text.trim_end_matches('0').trim_end_matches('.').to_string()
    }
}

/// Horizontal bar for `value` scaled into `[min, max]` over `width` cells.
pub fn bar(value: f64, min: f64, max: f64, width: usize, unicode: bool) -> String {
    let fill = if unicode { "\u{2588}" } else { "#" };
    let span = max - min;
    let ratio = if span > 0.0 {
        ((value - min) / span).clamp(0.0, 1.0)
    } else {
        1.0
    };
    let cells = (ratio * width as f64).round() as usize;
    fill.repeat(cells.max(1))
}

/// Sanitize a string for single-line output (replace newlines with spaces).
pub fn single_line(s: &str) -> String {
    s.replace('\n', " ").replace('\r', "")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_truncate() {
        assert_eq!(truncate("hello", 10), "hello");
        assert_eq!(truncate("hello world", 8), "hello...");
        assert_eq!(truncate("Przysiad ze sztangą", 10), "Przysia...");
    }

    #[test]
    fn test_pad_right() {
        assert_eq!(pad_right("ab", 4), "ab  ");
        assert_eq!(pad_right("abcdef", 4), "abcdef");
    }

    #[test]
    fn test_format_kg() {
        assert_eq!(format_kg(100.0), "100");
        assert_eq!(format_kg(102.5), "102.5");
        assert_eq!(format_kg(1.25), "1.25");
    }

    #[test]
    fn test_bar_scales() {
        assert_eq!(bar(10.0, 0.0, 10.0, 5, false), "#####");
        assert_eq!(bar(5.0, 0.0, 10.0, 10, false), "#####");
        // Minimum value still gets one cell
        assert_eq!(bar(0.0, 0.0, 10.0, 10, false), "#");
        assert_eq!(bar(3.0, 3.0, 3.0, 4, false), "####");
    }

    #[test]
    fn test_single_line() {
        assert_eq!(single_line("a\nb\r"), "a b");
    }
}
