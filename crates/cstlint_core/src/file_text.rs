//! Line access for the file being walked.

/// The source of one file split into lines.
///
/// `\r\n`, `\n` and `\r` all end a line, matching how the parsers count
/// lines. Line terminators are not part of the stored lines.
#[derive(Debug, Clone)]
pub struct FileText<'s> {
    lines: Vec<&'s str>,
}

impl<'s> FileText<'s> {
    pub fn new(source: &'s str) -> Self {
        let bytes = source.as_bytes();
        let mut lines = Vec::new();
        let mut start = 0;
        let mut index = 0;
        while index < bytes.len() {
            match bytes[index] {
                b'\n' => {
                    lines.push(&source[start..index]);
                    index += 1;
                    start = index;
                }
                b'\r' => {
                    lines.push(&source[start..index]);
                    index += if bytes.get(index + 1) == Some(&b'\n') { 2 } else { 1 };
                    start = index;
                }
                _ => index += 1,
            }
        }
        if start < source.len() {
            lines.push(&source[start..]);
        }
        Self { lines }
    }

    pub fn lines(&self) -> &[&'s str] {
        &self.lines
    }

    /// Returns the 1-indexed `line`, or an empty string past the end.
    pub fn line(&self, line: u32) -> &'s str {
        (line as usize)
            .checked_sub(1)
            .and_then(|index| self.lines.get(index))
            .copied()
            .unwrap_or("")
    }

    /// Column of the first non-whitespace character of `line`.
    ///
    /// A blank line reports its full length.
    pub fn line_start(&self, line: u32) -> u32 {
        self.line(line).chars().take_while(|c| c.is_whitespace()).count() as u32
    }

    /// Visual width of the first `column` characters of `line`, with tabs
    /// advancing to the next multiple of `tab_width`.
    pub fn expanded_column(&self, line: u32, column: u32, tab_width: usize) -> usize {
        expand_tabs(self.line(line), column as usize, tab_width)
    }
}

/// Width of the first `column` characters of `text` once tabs are expanded.
pub fn expand_tabs(text: &str, column: usize, tab_width: usize) -> usize {
    let tab_width = tab_width.max(1);
    text.chars().take(column).fold(0, |width, c| {
        if c == '\t' {
            (width / tab_width + 1) * tab_width
        } else {
            width + 1
        }
    })
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;
    use rstest::rstest;

    use super::*;

    #[test]
    fn test_line_endings() {
        let text = FileText::new("a\r\nb\rc\n\nd");
        assert_eq!(text.lines(), &["a", "b", "c", "", "d"]);
        assert_eq!(text.line(2), "b");
        assert_eq!(text.line(0), "");
        assert_eq!(text.line(9), "");
    }

    #[test]
    fn test_trailing_newline_adds_no_line() {
        assert_eq!(FileText::new("x=1\n").lines().len(), 1);
        assert!(FileText::new("").lines().is_empty());
    }

    #[rstest]
    #[case::plain("abc", 2, 4, 2)]
    #[case::leading_tab("\tx", 1, 4, 4)]
    #[case::tab_after_text("ab\tx", 3, 4, 4)]
    #[case::tab_on_boundary("abcd\tx", 5, 4, 8)]
    #[case::two_tabs("\t\tx", 2, 8, 16)]
    #[case::past_end("ab", 10, 4, 2)]
    fn test_expand_tabs(
        #[case] line: &str,
        #[case] column: usize,
        #[case] tab_width: usize,
        #[case] expected: usize,
    ) {
        assert_eq!(expand_tabs(line, column, tab_width), expected);
    }

    #[test]
    fn test_line_start() {
        let text = FileText::new("  <a>\n\t<b/>\n   \n");
        assert_eq!(text.line_start(1), 2);
        assert_eq!(text.line_start(2), 1);
        assert_eq!(text.line_start(3), 3);
        assert_eq!(text.expanded_column(2, 1, 4), 4);
    }
}
