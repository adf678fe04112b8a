use crate::quoted::QuotedSpan;

/// Splits `input` into words on whitespace.
///
/// A `"` at the start of a word opens a quoted span that becomes one word,
/// whitespace included (see [`QuotedSpan`]). A `"` anywhere else is an
/// ordinary character. One trailing `,` is dropped from each unquoted word.
/// Empty words are never returned, and malformed quoting is never an error.
pub fn split_to_words(input: &str) -> Vec<String> {
    Splitter::new(input).run()
}

/// Like [`split_to_words`], with absent input giving no words.
pub fn split_optional(input: Option<&str>) -> Vec<String> {
    input.map(split_to_words).unwrap_or_default()
}

enum State<'a> {
    Plain,
    Quoted(QuotedSpan<'a>),
}

struct Splitter<'a> {
    input: &'a str,
    words: Vec<String>,
    /// Byte offset of the next unread character.
    cursor: usize,
    /// Start of the current unquoted word.
    start: usize,
    /// `None` at start of input, which counts as whitespace.
    prev: Option<char>,
}

impl<'a> Splitter<'a> {
    fn new(input: &'a str) -> Self {
        Splitter {
            input,
            words: Vec::new(),
            cursor: 0,
            start: 0,
            prev: None,
        }
    }

    fn run(mut self) -> Vec<String> {
        let mut state = State::Plain;
        loop {
            state = match state {
                State::Plain => match self.scan_plain() {
                    Some(span) => State::Quoted(span),
                    None => break,
                },
                State::Quoted(span) => {
                    self.cursor = span.resume;
                    self.start = span.resume;
                    self.prev = Some('"');
                    if !span.content.is_empty() {
                        self.words.push(span.content.into_owned());
                    }
                    State::Plain
                }
            };
        }
        self.close_word(self.input.len());
        self.words
    }

    /// Reads plain text until a quoted span opens or the input runs out.
    fn scan_plain(&mut self) -> Option<QuotedSpan<'a>> {
        while let Some(c) = self.input[self.cursor..].chars().next() {
            let at = self.cursor;
            let opens_quote = c == '"' && self.prev.is_none_or(char::is_whitespace);
            self.prev = Some(c);
            self.cursor += c.len_utf8();

            if c.is_whitespace() {
                self.close_word(at);
                self.start = self.cursor;
            } else if opens_quote {
                // `start == at` here, so no unquoted word is pending.
                if let Some(span) = QuotedSpan::scan(self.input, at) {
                    return Some(span);
                }
            }
        }
        None
    }

    fn close_word(&mut self, end: usize) {
        if let Some(word) = trim_word(&self.input[self.start..end]) {
            self.words.push(word.to_owned());
        }
    }
}

/// Drops a single trailing comma. `None` if nothing is left.
fn trim_word(word: &str) -> Option<&str> {
    let word = word.strip_suffix(',').unwrap_or(word);
    (!word.is_empty()).then_some(word)
}
