const NBSP_ENTITIES: [&str; 2] = ["&#xA0;", "&nbsp;"];

/// Normalizes whitespace and escapes Markdown-significant characters so the
/// text can sit inside a table cell or paragraph.
///
/// Applying it twice yields the same result as applying it once: an
/// asterisk preceded by an odd run of backslashes is already escaped and is
/// left alone.
pub fn sanitize_cell(raw: &str) -> String {
    let normalized = NBSP_ENTITIES
        .iter()
        .fold(raw.replace(['\r', '\n'], " "), |text, entity| {
            text.replace(entity, " ")
        });

    let mut escaped = String::with_capacity(normalized.len());
    let mut backslashes = 0usize;
    for ch in normalized.chars() {
        match ch {
            '*' if backslashes % 2 == 0 => escaped.push_str("\\*"),
            '|' => escaped.push_str("&#124;"),
            '<' => escaped.push_str("&lt;"),
            '>' => escaped.push_str("&gt;"),
            _ => escaped.push(ch),
        }
        backslashes = if ch == '\\' { backslashes + 1 } else { 0 };
    }

    escaped.trim().to_string()
}

/// Turns serialized `<br>` tags into newlines.
pub fn br_to_newline(markup: &str) -> String {
    markup.replace("<br>", "\n")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn folds_line_breaks_into_spaces() {
        assert_eq!(sanitize_cell("one\r\ntwo\nthree"), "one  two three");
    }

    #[test]
    fn replaces_nbsp_entities() {
        assert_eq!(sanitize_cell("a&#xA0;b&nbsp;c"), "a b c");
    }

    #[test]
    fn escapes_markdown_and_markup() {
        assert_eq!(
            sanitize_cell(" *.so | <none> "),
            "\\*.so &#124; &lt;none&gt;"
        );
    }

    #[test]
    fn is_idempotent() {
        let inputs = [
            "plain",
            "**bold**",
            "a|b|c",
            "<b>tag</b>",
            "  padded\r\n",
            "already \\* escaped",
            "x&#xA0;*|<>\n",
            "C:\\\\*x\\\\*",
            "\\\\\\*",
        ];
        for input in inputs {
            let once = sanitize_cell(input);
            assert_eq!(sanitize_cell(&once), once, "input: {input:?}");
        }
    }

    #[test]
    fn escapes_asterisk_after_even_backslash_run() {
        assert_eq!(sanitize_cell("C:\\\\*tmp"), "C:\\\\\\*tmp");
        assert_eq!(sanitize_cell("a\\*b"), "a\\*b");
        assert_eq!(sanitize_cell("\\\\\\*"), "\\\\\\*");
    }

    #[test]
    fn converts_br_tags() {
        assert_eq!(br_to_newline("a<br>b<br>"), "a\nb\n");
    }
}
