//! Line decoder for comma-separated devotional rows.

/// Splits one line into trimmed fields.
///
/// Fields may be wrapped in `"` to carry commas; a doubled quote (`""`) inside
/// a quoted field yields one literal quote. The line must not contain a
/// newline. The result always has one more field than there are unquoted
/// commas, so a trailing comma produces a trailing empty field.
///
/// # Examples
///
/// ```
/// use selah::import::decode_line;
///
/// let fields = decode_line(r#"2026-02-12, John 3:16 ,"a,""b"",c""#);
/// assert_eq!(fields, vec!["2026-02-12", "John 3:16", r#"a,"b",c"#]);
/// ```
pub fn decode_line(line: &str) -> Vec<String> {
    let mut fields = Vec::new();
    let mut current = String::new();
    let mut in_quotes = false;
    let mut chars = line.chars().peekable();

    while let Some(ch) = chars.next() {
        match ch {
            '"' if in_quotes => {
                if chars.peek() == Some(&'"') {
                    current.push('"');
                    chars.next();
                } else {
                    in_quotes = false;
                }
            }
            '"' => in_quotes = true,
            ',' if !in_quotes => {
                fields.push(current.trim().to_string());
                current.clear();
            }
            _ => current.push(ch),
        }
    }

    fields.push(current.trim().to_string());
    fields
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_plain_fields_are_trimmed() {
        assert_eq!(
            decode_line(" 2026-02-12 ,John 3:16,  text "),
            vec!["2026-02-12", "John 3:16", "text"]
        );
    }

    #[test]
    fn test_quoted_field_keeps_commas() {
        assert_eq!(
            decode_line(r#"a,"b, c",d"#),
            vec!["a", "b, c", "d"]
        );
    }

    #[test]
    fn test_doubled_quote_becomes_literal_quote() {
        assert_eq!(decode_line(r#""a,""b"",c""#), vec![r#"a,"b",c"#]);
        assert_eq!(decode_line(r#""He said ""peace""""#), vec![r#"He said "peace""#]);
    }

    #[test]
    fn test_empty_fields_are_preserved() {
        assert_eq!(decode_line("2026-02-13,,,,,"), vec!["2026-02-13", "", "", "", "", ""]);
        assert_eq!(decode_line(""), vec![""]);
        assert_eq!(decode_line("a,"), vec!["a", ""]);
    }

    #[test]
    fn test_field_count_is_unquoted_commas_plus_one() {
        let line = r#"1,"2,3",4,"5,6,7""#;
        assert_eq!(decode_line(line).len(), 4);
    }

    #[test]
    fn test_unterminated_quote_swallows_rest_of_line() {
        assert_eq!(decode_line(r#"a,"b,c"#), vec!["a", "b,c"]);
    }

    #[test]
    fn test_quote_inside_unquoted_field_opens_quoting() {
        assert_eq!(decode_line(r#"ab"c,d"e,f"#), vec!["abc,de", "f"]);
    }

    #[test]
    fn test_whitespace_inside_quotes_is_trimmed_with_the_field() {
        assert_eq!(decode_line(r#"" padded ",x"#), vec!["padded", "x"]);
    }

    #[test]
    fn test_decoding_is_repeatable() {
        let line = r#"2026-02-12,John 3:16,"For God so loved...","Reflect...","Pray...","Q1?|Q2?""#;
        let first = decode_line(line);
        let second = decode_line(line);
        assert_eq!(first, second);
        assert_eq!(first.len(), 6);
        assert_eq!(first[5], "Q1?|Q2?");
    }
}
