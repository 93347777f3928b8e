/// Splits one delimited line into fields, honoring quoted sections.
///
/// A quote character toggles quoting; a delimiter only ends a field outside
/// quotes. Quotes themselves are dropped and every field is trimmed. An
/// unbalanced quote keeps the rest of the line quoted, which is not an error.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RowParser {
    delimiter: char,
    quote: char,
}

impl Default for RowParser {
    fn default() -> Self {
        Self {
            delimiter: ',',
            quote: '"',
        }
    }
}

impl RowParser {
    #[must_use]
    pub fn new(delimiter: char, quote: char) -> Self {
        Self { delimiter, quote }
    }

    /// Parse `line` into its fields. Empty input yields one empty field.
    #[must_use]
    pub fn parse(&self, line: &str) -> Vec<String> {
        let mut fields = Vec::new();
        let mut current = String::new();
        let mut inside_quotes = false;

        for ch in line.chars() {
            if ch == self.quote {
                inside_quotes = !inside_quotes;
            } else if ch == self.delimiter && !inside_quotes {
                fields.push(current.trim().to_string());
                current.clear();
            } else {
                current.push(ch);
            }
        }
        fields.push(current.trim().to_string());

        fields
    }
}

/// Parse a comma-separated line with `"` quoting.
#[must_use]
pub fn parse_row(line: &str) -> Vec<String> {
    RowParser::default().parse(line)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn quoted_comma_stays_in_field() {
        assert_eq!(parse_row(r#"a,"b,c",d"#), vec!["a", "b,c", "d"]);
    }

    #[test]
    fn fields_are_trimmed() {
        assert_eq!(parse_row("  a , b ,c  "), vec!["a", "b", "c"]);
    }

    #[test]
    fn empty_line_yields_single_empty_field() {
        assert_eq!(parse_row(""), vec![String::new()]);
    }

    #[test]
    fn trailing_delimiter_yields_empty_last_field() {
        assert_eq!(parse_row("a,b,"), vec!["a", "b", ""]);
    }

    #[test]
    fn unbalanced_quote_swallows_rest_of_line() {
        assert_eq!(parse_row(r#"a,"b,c,d"#), vec!["a", "b,c,d"]);
    }

    #[test]
    fn doubled_quotes_toggle_twice() {
        assert_eq!(parse_row(r#""say ""hi"" now",x"#), vec!["say hi now", "x"]);
    }

    #[test]
    fn newline_inside_quotes_is_kept() {
        assert_eq!(parse_row("\"line one\nline two\",z"), vec!["line one\nline two", "z"]);
    }

    #[test]
    fn pipes_are_not_delimiters() {
        assert_eq!(parse_row("a|b|c,d"), vec!["a|b|c", "d"]);
    }

    #[test]
    fn custom_delimiter_and_quote() {
        let parser = RowParser::new(';', '\'');
        assert_eq!(parser.parse("x;'y;z';w"), vec!["x", "y;z", "w"]);
    }
}
