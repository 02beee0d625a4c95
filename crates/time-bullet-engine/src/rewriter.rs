//! Line rewriting for timestamped bullets.
//!
//! Two independent rewrites, each a pure function of the line text:
//!
//! - **Space** on a line starting with the trigger `-[t]` turns the trigger
//!   into `- [<timestamp>] `.
//! - **Enter** after a line that is a time bullet (`- [<timestamp>] ...`)
//!   stamps the bullet dash of the freshly opened line.
//!
//! The timestamp is passed as a closure so it is only generated when a
//! rewrite actually happens.

use std::sync::OnceLock;

use chrono::NaiveDate;
use regex::Regex;

use crate::editing::LineEdit;
use crate::format::TimeFormat;

/// Typed at the start of a line to request a time bullet.
pub const TRIGGER_TOKEN: &str = "-[t]";

const BULLET_DASH: char = '-';

/// `- [<timestamp>]`
pub fn time_bullet(timestamp: &str) -> String {
    format!("- [{timestamp}]")
}

/// Contents of the first `[...]` of a line shaped like `- [...]`.
///
/// Surrounding whitespace of the line is ignored.
pub fn bracket_contents(line: &str) -> Option<&str> {
    static BULLET_REGEX: OnceLock<Regex> = OnceLock::new();
    let regex =
        BULLET_REGEX.get_or_init(|| Regex::new(r"^- \[([^\]]+)\]").expect("Invalid bullet regex"));

    regex
        .captures(line.trim())
        .and_then(|captures| captures.get(1))
        .map(|m| m.as_str())
}

/// Whether `line` starts with a bullet whose brackets hold a timestamp in
/// `format`. Checkboxes like `- [ ]` and `- [x]` don't qualify.
pub fn is_time_bullet(line: &str, format: &TimeFormat, reference: NaiveDate) -> bool {
    bracket_contents(line).is_some_and(|contents| format.matches(contents, reference))
}

/// Space pressed on line `line_index`.
///
/// The trigger prefix is swapped for `- [<timestamp>] ` and everything after
/// it is kept verbatim. The cursor lands right after the inserted prefix.
pub fn rewrite_on_space(
    line_index: usize,
    line: &str,
    timestamp: impl FnOnce() -> String,
) -> Option<LineEdit> {
    let remainder = line.strip_prefix(TRIGGER_TOKEN)?;
    let prefix = format!("{} ", time_bullet(&timestamp()));

    Some(LineEdit {
        line: line_index,
        new_cursor_column: prefix.chars().count(),
        new_text: prefix + remainder,
    })
}

/// Enter opened line `line_index`, whose text is `line`, with the cursor at
/// `cursor_ch`. The caller has already checked that the previous line is a
/// time bullet.
///
/// The bullet dash (the first non-whitespace char) becomes
/// `- [<timestamp>]`; indentation and the rest of the line are untouched. A
/// cursor after the dash shifts right by the added length.
pub fn rewrite_on_enter(
    line_index: usize,
    line: &str,
    cursor_ch: usize,
    timestamp: impl FnOnce() -> String,
) -> Option<LineEdit> {
    let content = line.trim_start();
    if !content.starts_with(BULLET_DASH) {
        return None;
    }
    let indent = &line[..line.len() - content.len()];
    let rest = &content[BULLET_DASH.len_utf8()..];

    let bullet = time_bullet(&timestamp());
    let added = bullet.chars().count() - 1;
    let dash_column = indent.chars().count();

    let new_cursor_column = if cursor_ch > dash_column {
        cursor_ch + added
    } else {
        cursor_ch
    };

    Some(LineEdit {
        line: line_index,
        new_text: format!("{indent}{bullet}{rest}"),
        new_cursor_column,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;
    use rstest::rstest;

    fn stamp(text: &'static str) -> impl FnOnce() -> String {
        move || text.to_string()
    }

    fn reference() -> NaiveDate {
        NaiveDate::from_ymd_opt(2024, 3, 7).unwrap()
    }

    // ============ Space ============

    #[test]
    fn test_space_on_bare_trigger() {
        let edit = rewrite_on_space(0, "-[t]", stamp("14:05")).unwrap();

        assert_eq!(edit.new_text, "- [14:05] ");
        assert_eq!(edit.new_cursor_column, 10);
        assert_eq!(edit.line, 0);
    }

    #[test]
    fn test_space_keeps_remainder_verbatim() {
        let edit = rewrite_on_space(3, "-[t] buy milk", stamp("14:05")).unwrap();

        assert_eq!(edit.new_text, "- [14:05]  buy milk");
        assert_eq!(edit.new_cursor_column, 10);
        assert_eq!(edit.line, 3);

        let edit = rewrite_on_space(0, "-[t]buy  milk ", stamp("14:05")).unwrap();
        assert_eq!(edit.new_text, "- [14:05] buy  milk ");
    }

    #[rstest]
    #[case("")]
    #[case("- [14:05] ")]
    #[case(" -[t]")]
    #[case("-[T]")]
    #[case("- [t]")]
    #[case("buy milk -[t]")]
    fn test_space_without_trigger_is_noop(#[case] line: &str) {
        let edit = rewrite_on_space(0, line, || panic!("timestamp should not be generated"));

        assert_eq!(edit, None);
    }

    #[test]
    fn test_space_twice_is_noop_second_time() {
        let first = rewrite_on_space(0, "-[t]", stamp("14:05")).unwrap();
        let second = rewrite_on_space(0, &first.new_text, stamp("14:06"));

        assert_eq!(second, None);
    }

    #[test]
    fn test_space_cursor_counts_chars_not_bytes() {
        let edit = rewrite_on_space(0, "-[t]", stamp("14時05分")).unwrap();

        assert_eq!(edit.new_text, "- [14時05分] ");
        assert_eq!(edit.new_cursor_column, 11);
    }

    // ============ Enter ============

    #[test]
    fn test_enter_on_continued_bullet() {
        // Host already split the line and continued the list with "- "
        let edit = rewrite_on_enter(1, "- ", 2, stamp("14:09")).unwrap();

        assert_eq!(edit.new_text, "- [14:09] ");
        assert_eq!(edit.new_cursor_column, "- [14:09]".len() - 1 + 2);
        assert_eq!(edit.line, 1);
    }

    #[test]
    fn test_enter_on_bare_dash() {
        let edit = rewrite_on_enter(1, "-", 1, stamp("14:09")).unwrap();

        assert_eq!(edit.new_text, "- [14:09]");
        assert_eq!(edit.new_cursor_column, 9);
    }

    #[test]
    fn test_enter_preserves_indentation_and_remainder() {
        let edit = rewrite_on_enter(4, "\t  - carried over", 5, stamp("09:00")).unwrap();

        assert_eq!(edit.new_text, "\t  - [09:00] carried over");
        assert_eq!(edit.new_cursor_column, 5 + 8);
    }

    #[test]
    fn test_enter_only_replaces_the_bullet_dash() {
        let edit = rewrite_on_enter(1, "- well-known - dashes", 2, stamp("09:00")).unwrap();

        assert_eq!(edit.new_text, "- [09:00] well-known - dashes");
    }

    #[test]
    fn test_enter_cursor_before_dash_stays() {
        let edit = rewrite_on_enter(1, "  - ", 1, stamp("09:00")).unwrap();

        assert_eq!(edit.new_text, "  - [09:00] ");
        assert_eq!(edit.new_cursor_column, 1);
    }

    #[rstest]
    #[case("")]
    #[case("   ")]
    #[case("* star bullet")]
    #[case("text with - dash")]
    fn test_enter_without_bullet_dash_is_noop(#[case] line: &str) {
        let edit = rewrite_on_enter(1, line, 0, || panic!("timestamp should not be generated"));

        assert_eq!(edit, None);
    }

    // ============ Recognising time bullets ============

    #[rstest]
    #[case("- [14:05] task one", Some("14:05"))]
    #[case("   - [14:05] indented  ", Some("14:05"))]
    #[case("- [ ] unchecked task", Some(" "))]
    #[case("- [x] done", Some("x"))]
    #[case("- [] empty", None)]
    #[case("-[14:05] no space", None)]
    #[case("* [14:05] star", None)]
    #[case("text - [14:05]", None)]
    fn test_bracket_contents(#[case] line: &str, #[case] expected: Option<&str>) {
        assert_eq!(bracket_contents(line), expected);
    }

    #[rstest]
    #[case("- [14:05] task one", "HH:mm", true)]
    #[case("- [14:05]", "HH:mm", true)]
    #[case("    - [23:59] nested", "HH:mm", true)]
    #[case("- [ ] unchecked task", "HH:mm", false)]
    #[case("- [x] done", "HH:mm", false)]
    #[case("- [14:05] wrong format", "HH:mm:ss", false)]
    #[case("- [25:00] impossible", "HH:mm", false)]
    #[case("- [2024-03-07 14:05] dated", "YYYY-MM-DD HH:mm", true)]
    #[case("- [2024-02-30 14:05] bad date", "YYYY-MM-DD HH:mm", false)]
    #[case("- [invalid_format] sentinel", "HH:mm", false)]
    #[case("plain paragraph", "HH:mm", false)]
    fn test_is_time_bullet(#[case] line: &str, #[case] format: &str, #[case] expected: bool) {
        let format = TimeFormat::parse(format).unwrap();

        assert_eq!(is_time_bullet(line, &format, reference()), expected);
    }
}
