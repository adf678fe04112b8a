use std::borrow::Cow;

use tracing::trace;

const QUOTE: u8 = b'"';
const BACKSLASH: u8 = b'\\';
const TRIPLE_QUOTE: &str = "\"\"\"";

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum QuoteStyle {
    /// `"..."`, where `\"` stands for a literal quote.
    Simple,
    /// `"""..."""`, taken literally. The first run of three or more quotes
    /// closes it, and its last three quotes are the delimiter.
    Triple,
}

/// A quoted span scanned out of a line.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct QuotedSpan<'a> {
    pub style: QuoteStyle,
    /// Text between the delimiters, with `\"` escapes already removed.
    /// Only allocated when an escape had to be removed.
    pub content: Cow<'a, str>,
    /// False when end of input was reached before the closing delimiter.
    pub terminated: bool,
    /// Byte offset just past the closing delimiter, or the input length.
    pub resume: usize,
}

impl<'a> QuotedSpan<'a> {
    /// Scans the quoted span opened by the `"` at byte offset `open`.
    ///
    /// Returns `None` if there is no `"` at `open`. A span that is never
    /// closed runs to the end of `input`.
    pub fn scan(input: &'a str, open: usize) -> Option<Self> {
        let rest = input.get(open..)?;
        if rest.starts_with(TRIPLE_QUOTE) {
            Some(Self::scan_triple(input, open + TRIPLE_QUOTE.len()))
        } else if rest.as_bytes().first() == Some(&QUOTE) {
            Some(Self::scan_simple(input, open + 1))
        } else {
            None
        }
    }

    fn scan_triple(input: &'a str, from: usize) -> Self {
        let Some(len) = input[from..].find(TRIPLE_QUOTE) else {
            return Self::unterminated(QuoteStyle::Triple, Cow::Borrowed(&input[from..]), input);
        };
        // The last three quotes of a longer run close the span.
        let run = from + len;
        let run_end = run + input[run..].bytes().take_while(|&b| b == QUOTE).count();
        QuotedSpan {
            style: QuoteStyle::Triple,
            content: Cow::Borrowed(&input[from..run_end - TRIPLE_QUOTE.len()]),
            terminated: true,
            resume: run_end,
        }
    }

    fn scan_simple(input: &'a str, from: usize) -> Self {
        // Filled lazily, on the first `\"`.
        let mut unescaped: Option<String> = None;
        let mut split = from;
        let mut close = None;
        let mut prev = QUOTE;

        for (i, b) in input.bytes().enumerate().skip(from) {
            if b == QUOTE {
                if prev != BACKSLASH {
                    close = Some(i);
                    break;
                }
                // Drop the backslash, keep the quote.
                unescaped
                    .get_or_insert_with(String::new)
                    .push_str(&input[split..i - 1]);
                split = i;
            }
            prev = b;
        }

        let end = close.unwrap_or(input.len());
        let content = match unescaped {
            Some(mut buf) => {
                buf.push_str(&input[split..end]);
                Cow::Owned(buf)
            }
            None => Cow::Borrowed(&input[from..end]),
        };

        match close {
            Some(close) => QuotedSpan {
                style: QuoteStyle::Simple,
                content,
                terminated: true,
                resume: close + 1,
            },
            None => Self::unterminated(QuoteStyle::Simple, content, input),
        }
    }

    fn unterminated(style: QuoteStyle, content: Cow<'a, str>, input: &str) -> Self {
        trace!(?style, len = content.len(), "quoted span closed at end of input");
        QuotedSpan {
            style,
            content,
            terminated: false,
            resume: input.len(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    fn scan(input: &str, open: usize) -> QuotedSpan<'_> {
        QuotedSpan::scan(input, open).unwrap()
    }

    #[test]
    fn test_simple_span() {
        let span = scan(r#"a "b c" d"#, 2);
        assert_eq!(span.style, QuoteStyle::Simple);
        assert_eq!(span.content, "b c");
        assert!(span.terminated);
        assert_eq!(span.resume, 7);
        assert!(matches!(span.content, Cow::Borrowed(_)));
    }

    #[test]
    fn test_escaped_quotes_are_unescaped() {
        let span = scan(r#""b \"c\" d" e"#, 0);
        assert_eq!(span.content, r#"b "c" d"#);
        assert_eq!(span.resume, 11);
        assert!(matches!(span.content, Cow::Owned(_)));
    }

    #[test]
    fn test_escape_at_start_and_end() {
        assert_eq!(scan(r#""\"hi\"""#, 0).content, r#""hi""#);
    }

    #[test]
    fn test_other_backslashes_kept() {
        assert_eq!(scan(r#""a\nb\\c""#, 0).content, r"a\nb\\c");
    }

    #[test]
    fn test_triple_span_keeps_inner_quotes() {
        let input = r#"x """a "b" c""" y"#;
        let span = scan(input, 2);
        assert_eq!(span.style, QuoteStyle::Triple);
        assert_eq!(span.content, r#"a "b" c"#);
        assert!(span.terminated);
        assert_eq!(&input[span.resume..], " y");
    }

    #[test]
    fn test_triple_span_has_no_escapes() {
        assert_eq!(scan(r#""""a\"b""""#, 0).content, r#"a\"b"#);
    }

    #[test]
    fn test_triple_span_allows_pairs() {
        assert_eq!(scan(r#""""say ""hi"" now""""#, 0).content, r#"say ""hi"" now"#);
    }

    #[test]
    fn test_triple_span_ending_in_quotes() {
        let input = r#""""say "hi"""" y"#;
        let span = scan(input, 0);
        assert_eq!(span.content, r#"say "hi""#);
        assert_eq!(&input[span.resume..], " y");

        assert_eq!(scan(r#""""a"""""b"#, 0).content, r#"a"""#);
    }

    #[test]
    fn test_escaped_backslash_still_escapes_quote() {
        let span = scan(r#""a\\" b"#, 0);
        assert_eq!(span.content, r#"a\" b"#);
        assert!(!span.terminated);
    }

    #[test]
    fn test_empty_spans() {
        let span = scan(r#""""#, 0);
        assert_eq!(span.style, QuoteStyle::Simple);
        assert_eq!(span.content, "");
        assert_eq!(span.resume, 2);

        let span = scan(r#""""""""#, 0);
        assert_eq!(span.style, QuoteStyle::Triple);
        assert_eq!(span.content, "");
        assert_eq!(span.resume, 6);
    }

    #[test]
    fn test_unterminated_simple_runs_to_end() {
        let span = scan(r#""b c"#, 0);
        assert_eq!(span.content, "b c");
        assert!(!span.terminated);
        assert_eq!(span.resume, 4);
    }

    #[test]
    fn test_unterminated_after_escape() {
        let span = scan(r#""a\""#, 0);
        assert_eq!(span.content, r#"a""#);
        assert!(!span.terminated);
    }

    #[test]
    fn test_unterminated_triple_runs_to_end() {
        let span = scan(r#""""a "b"#, 0);
        assert_eq!(span.style, QuoteStyle::Triple);
        assert_eq!(span.content, r#"a "b"#);
        assert!(!span.terminated);
    }

    #[test]
    fn test_lone_quote() {
        let span = scan("\"", 0);
        assert_eq!(span.content, "");
        assert!(!span.terminated);
        assert_eq!(span.resume, 1);
    }

    #[test]
    fn test_multibyte_content() {
        let span = scan("\"größe \\\"ß\\\"\" x", 0);
        assert_eq!(span.content, "größe \"ß\"");
    }

    #[test]
    fn test_no_quote_at_offset() {
        assert_eq!(QuotedSpan::scan("abc", 0), None);
        assert_eq!(QuotedSpan::scan("abc", 3), None);
        assert_eq!(QuotedSpan::scan("abc", 10), None);
    }
}
