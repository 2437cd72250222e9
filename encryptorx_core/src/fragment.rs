use chrono::NaiveDateTime;

pub const TIMESTAMP_FORMAT: &str = "%Y-%m-%d %H:%M:%S";
pub const SEPARATOR_WIDTH: usize = 88;

/// Builds the text block appended to a file when a result is saved.
///
/// The `key:` line carries the processed data and the `data:` line carries the
/// processed key. Saved files written by earlier releases depend on this shape.
pub fn build_log_fragment(
    app_name: &str,
    version: &str,
    timestamp: NaiveDateTime,
    processed_data: &str,
    processed_key: &str,
) -> String {
    format!(
        "# {}{}\n\ndate: {}\nkey: {}\ndata: {}\n\n{}\n",
        app_name,
        version,
        timestamp.format(TIMESTAMP_FORMAT),
        processed_data,
        processed_key,
        "=".repeat(SEPARATOR_WIDTH)
    )
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDate;

    fn fixed_time() -> NaiveDateTime {
        NaiveDate::from_ymd_opt(2026, 10, 18)
            .and_then(|d| d.and_hms_opt(9, 5, 3))
            .unwrap()
    }

    #[test]
    fn fragment_has_exact_shape() {
        let fragment = build_log_fragment("EncryptorX", "0.1.0", fixed_time(), "secret", "k");
        let expected = format!(
            "# EncryptorX0.1.0\n\ndate: 2026-10-18 09:05:03\nkey: secret\ndata: k\n\n{}\n",
            "=".repeat(88)
        );
        assert_eq!(fragment, expected);
    }

    #[test]
    fn labels_keep_observed_binding() {
        let fragment = build_log_fragment("EncryptorX", "0.1.0", fixed_time(), "secret", "k");
        let lines: Vec<&str> = fragment.lines().collect();
        assert!(lines.contains(&"key: secret"));
        assert!(lines.contains(&"data: k"));
    }
}
