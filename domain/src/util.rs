//! Shared utility functions.

/// Truncate a string to approximately `max_bytes` without splitting a UTF-8
/// character boundary.
pub fn truncate_str(s: &str, max_bytes: usize) -> &str {
    if s.len() <= max_bytes {
        return s;
    }
    let mut end = max_bytes;
    while end > 0 && !s.is_char_boundary(end) {
        end -= 1;
    }
    &s[..end]
}

/// Single-line preview of a message for logs and listings.
///
/// Newlines are flattened to spaces and an ellipsis marks truncation.
pub fn preview(s: &str, max_bytes: usize) -> String {
    let flat = s.split_whitespace().collect::<Vec<_>>().join(" ");
    let cut = truncate_str(&flat, max_bytes);
    if cut.len() < flat.len() {
        format!("{cut}…")
    } else {
        flat
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn truncate_no_op_when_short() {
        assert_eq!(truncate_str("P0300", 10), "P0300");
    }

    #[test]
    fn truncate_multibyte_boundary() {
        // 'é' is 2 bytes; cutting inside it backs up to the previous char
        let s = "café crème";
        assert_eq!(truncate_str(s, 4), "caf");
        assert_eq!(truncate_str(s, 5), "café");
    }

    #[test]
    fn preview_flattens_and_marks_truncation() {
        assert_eq!(preview("rough\nidle  at\tstart", 100), "rough idle at start");
        assert_eq!(preview("random misfire detected", 6), "random…");
    }

    #[test]
    fn preview_empty() {
        assert_eq!(preview("", 10), "");
    }
}
