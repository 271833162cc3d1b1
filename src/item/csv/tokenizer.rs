use std::collections::VecDeque;
use std::mem;

use crate::core::item::Row;

use super::{BOM, DELIMITER, QUOTE};

/// Discrete tokenizer state.
///
/// The transitions are deliberately lenient: there is no reject state, every
/// character sequence maps to some row sequence. In particular a quote inside
/// an unquoted field is plain text, and text trailing a closed quoted run
/// (`AfterQuotedField`) is appended literally instead of re-opening quoting.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum State {
    /// At the start of a field; a quote here opens a quoted field.
    FieldStart,
    /// Inside a field that did not begin with a quote.
    InUnquotedField,
    /// Inside a quoted field; delimiter and terminators are literal here.
    InQuotedField,
    /// A quote was seen inside a quoted field: either the escape half of a
    /// doubled quote, or the closing quote.
    QuoteSeenInQuotedField,
    /// Literal trailing text after a closed quoted run.
    AfterQuotedField,
}

/// Incremental CSV tokenizer.
///
/// Consumes decoded character chunks and produces complete rows in order.
/// Chunks may be cut anywhere: in the middle of a field, a quoted run, a
/// doubled quote, or a CRLF pair. Completed rows queue up internally and are
/// pulled with [`next_row`](Tokenizer::next_row).
///
/// Row terminators on input are CRLF or bare LF; a lone CR not followed by LF
/// is kept as a literal character. A byte-order mark opening the stream is
/// stripped once and never treated as field data.
///
/// # Examples
///
/// ```
/// use csv_stream_rs::item::csv::tokenizer::Tokenizer;
///
/// let rows = Tokenizer::parse("a,b\r\n\"c,d\",e\r\n");
/// assert_eq!(rows, [["a", "b"], ["c,d", "e"]]);
/// ```
pub struct Tokenizer {
    state: State,
    /// Field currently being accumulated.
    field: String,
    /// Fields of the row currently being accumulated.
    row: Row,
    /// Completed rows not yet pulled downstream.
    ready: VecDeque<Row>,
    /// A CR was consumed and the terminator-vs-literal decision is deferred
    /// to the next character (or to `finish`). Survives chunk boundaries.
    pending_cr: bool,
    /// A row is in progress. Seeded true so an empty stream still flushes one
    /// row with one empty field; cleared by each row terminator so a trailing
    /// terminator does not flush a ghost row.
    row_open: bool,
    seen_first_chunk: bool,
    finished: bool,
}

impl Default for Tokenizer {
    fn default() -> Self {
        Self::new()
    }
}

impl Tokenizer {
    pub fn new() -> Self {
        Tokenizer {
            state: State::FieldStart,
            field: String::new(),
            row: Vec::new(),
            ready: VecDeque::new(),
            pending_cr: false,
            row_open: true,
            seen_first_chunk: false,
            finished: false,
        }
    }

    /// Tokenizes `text` in one shot.
    pub fn parse(text: &str) -> Vec<Row> {
        let mut tokenizer = Tokenizer::new();
        tokenizer.feed(text);
        tokenizer.finish();
        Vec::from(tokenizer.ready)
    }

    /// Feeds one chunk of decoded characters.
    ///
    /// The leading byte-order mark, if any, is stripped from the first
    /// non-empty chunk only; a BOM code point anywhere else is field data.
    pub fn feed(&mut self, chunk: &str) {
        let mut chunk = chunk;
        if !self.seen_first_chunk && !chunk.is_empty() {
            self.seen_first_chunk = true;
            chunk = chunk.strip_prefix(BOM).unwrap_or(chunk);
        }
        for c in chunk.chars() {
            self.step(c);
        }
    }

    /// Marks end of input and flushes the final row, if one is in progress.
    ///
    /// A pending lone CR resolves to a literal character first. Idempotent.
    pub fn finish(&mut self) {
        if self.finished {
            return;
        }
        self.finished = true;
        if self.pending_cr {
            self.pending_cr = false;
            self.push_deferred('\r');
        }
        if self.row_open {
            self.end_row();
        }
    }

    /// Pulls the oldest completed row.
    pub fn next_row(&mut self) -> Option<Row> {
        self.ready.pop_front()
    }

    fn step(&mut self, c: char) {
        if self.pending_cr {
            self.pending_cr = false;
            if c == '\n' {
                self.end_row();
                return;
            }
            // Lone CR: a literal character, not a terminator.
            self.push_deferred('\r');
        }
        self.row_open = true;
        match self.state {
            State::FieldStart => {
                if c == QUOTE {
                    self.state = State::InQuotedField;
                } else {
                    self.state = State::InUnquotedField;
                    self.step_plain(c);
                }
            }
            State::InUnquotedField | State::AfterQuotedField => self.step_plain(c),
            State::InQuotedField => {
                if c == QUOTE {
                    self.state = State::QuoteSeenInQuotedField;
                } else {
                    self.field.push(c);
                }
            }
            State::QuoteSeenInQuotedField => match c {
                QUOTE => {
                    // Doubled quote: one literal quote, still quoted.
                    self.field.push(QUOTE);
                    self.state = State::InQuotedField;
                }
                DELIMITER => self.end_field(),
                '\r' => self.pending_cr = true,
                '\n' => self.end_row(),
                _ => {
                    // The quoted run is closed; what follows is literal.
                    self.field.push(c);
                    self.state = State::AfterQuotedField;
                }
            },
        }
    }

    /// Handles a character outside any quoted run.
    fn step_plain(&mut self, c: char) {
        match c {
            DELIMITER => self.end_field(),
            '\r' => self.pending_cr = true,
            '\n' => self.end_row(),
            _ => self.field.push(c),
        }
    }

    /// Appends a character whose processing was deferred by the CR lookahead.
    fn push_deferred(&mut self, c: char) {
        match self.state {
            State::FieldStart => self.state = State::InUnquotedField,
            State::QuoteSeenInQuotedField => self.state = State::AfterQuotedField,
            _ => {}
        }
        self.field.push(c);
        self.row_open = true;
    }

    fn end_field(&mut self) {
        self.row.push(mem::take(&mut self.field));
        self.state = State::FieldStart;
    }

    fn end_row(&mut self) {
        self.end_field();
        self.ready.push_back(mem::take(&mut self.row));
        self.row_open = false;
    }
}

#[cfg(test)]
mod tests {
    use super::Tokenizer;

    #[test]
    fn parses_simple_rows() {
        let rows = Tokenizer::parse("a,b,c\r\nd,e,f\r\n");
        assert_eq!(rows, [["a", "b", "c"], ["d", "e", "f"]]);
    }

    #[test]
    fn bare_lf_terminates_rows() {
        let rows = Tokenizer::parse("a,b\nc,d\n");
        assert_eq!(rows, [["a", "b"], ["c", "d"]]);
    }

    #[test]
    fn empty_input_yields_one_row_with_one_empty_field() {
        let rows = Tokenizer::parse("");
        assert_eq!(rows, [[""]]);
    }

    #[test]
    fn trailing_terminator_does_not_add_a_row() {
        assert_eq!(Tokenizer::parse("a\r\n"), [["a"]]);
        assert_eq!(Tokenizer::parse("a\n"), [["a"]]);
    }

    #[test]
    fn missing_final_terminator_still_flushes_the_last_row() {
        let rows = Tokenizer::parse("a,b\r\nc,d");
        assert_eq!(rows, [["a", "b"], ["c", "d"]]);
    }

    #[test]
    fn blank_line_is_a_row_with_one_empty_field() {
        let rows = Tokenizer::parse("a,b,c\r\n\r\na,b\r\n");
        assert_eq!(rows, vec![vec!["a", "b", "c"], vec![""], vec!["a", "b"]]);
    }

    #[test]
    fn trailing_delimiter_closes_an_empty_field() {
        let rows = Tokenizer::parse("a,\r\n");
        assert_eq!(rows, [["a", ""]]);
    }

    #[test]
    fn quoted_field_keeps_delimiters_and_terminators() {
        let rows = Tokenizer::parse("\"a,b\r\nc\",d\r\n");
        assert_eq!(rows, [["a,b\r\nc", "d"]]);
    }

    #[test]
    fn doubled_quote_is_one_literal_quote() {
        let rows = Tokenizer::parse("\"a\"\"bc\"\r\n");
        assert_eq!(rows, [["a\"bc"]]);
    }

    #[test]
    fn quote_inside_unquoted_field_is_literal() {
        let rows = Tokenizer::parse("a\"b\"\"\r\n");
        assert_eq!(rows, [["a\"b\"\""]]);
    }

    #[test]
    fn text_after_closed_quote_is_literal_including_quotes() {
        let rows = Tokenizer::parse("\"a\"x\"y,b\r\n");
        assert_eq!(rows, [["ax\"y", "b"]]);
    }

    #[test]
    fn lone_cr_is_a_literal_character() {
        assert_eq!(Tokenizer::parse("a\rb\r\n"), [["a\rb"]]);
        assert_eq!(Tokenizer::parse("a\r"), [["a\r"]]);
    }

    #[test]
    fn cr_before_delimiter_stays_in_the_field() {
        let rows = Tokenizer::parse("a\r,b\r\n");
        assert_eq!(rows, [["a\r", "b"]]);
    }

    #[test]
    fn crlf_split_across_chunks_is_one_terminator() {
        let mut tokenizer = Tokenizer::new();
        tokenizer.feed("a\r");
        tokenizer.feed("\nb");
        tokenizer.finish();
        assert_eq!(tokenizer.next_row().unwrap(), ["a"]);
        assert_eq!(tokenizer.next_row().unwrap(), ["b"]);
        assert_eq!(tokenizer.next_row(), None);
    }

    #[test]
    fn quoted_run_split_across_chunks() {
        let mut tokenizer = Tokenizer::new();
        tokenizer.feed("\"a,");
        tokenizer.feed("b\",c\r");
        tokenizer.feed("\n");
        tokenizer.finish();
        assert_eq!(tokenizer.next_row().unwrap(), ["a,b", "c"]);
        assert_eq!(tokenizer.next_row(), None);
    }

    #[test]
    fn doubled_quote_split_across_chunks() {
        let mut tokenizer = Tokenizer::new();
        tokenizer.feed("\"a\"");
        tokenizer.feed("\"b\"\r\n");
        tokenizer.finish();
        assert_eq!(tokenizer.next_row().unwrap(), ["a\"b"]);
    }

    #[test]
    fn leading_bom_is_stripped() {
        let rows = Tokenizer::parse("\u{feff}column1,column2\r\nab,cd\r\n");
        assert_eq!(rows, [["column1", "column2"], ["ab", "cd"]]);
    }

    #[test]
    fn bom_is_only_stripped_at_stream_start() {
        let mut tokenizer = Tokenizer::new();
        tokenizer.feed("");
        tokenizer.feed("\u{feff}a");
        tokenizer.feed("\u{feff}b\r\n");
        tokenizer.finish();
        // empty chunks do not consume the stream-start check
        assert_eq!(tokenizer.next_row().unwrap(), ["a\u{feff}b"]);
    }

    #[test]
    fn unquoted_unicode_passes_through() {
        let rows = Tokenizer::parse("héllo,n\u{0303},\u{1F469}\u{200D}\u{1F680}\r\n");
        assert_eq!(rows, [["héllo", "n\u{0303}", "\u{1F469}\u{200D}\u{1F680}"]]);
    }

    #[test]
    fn unterminated_quote_flushes_at_end_of_input() {
        assert_eq!(Tokenizer::parse("\"abc"), [["abc"]]);
        assert_eq!(Tokenizer::parse("\""), [[""]]);
    }

    #[test]
    fn next_row_is_fifo_while_feeding() {
        let mut tokenizer = Tokenizer::new();
        tokenizer.feed("a\r\nb\r\nc");
        assert_eq!(tokenizer.next_row().unwrap(), ["a"]);
        assert_eq!(tokenizer.next_row().unwrap(), ["b"]);
        assert_eq!(tokenizer.next_row(), None);
        tokenizer.finish();
        assert_eq!(tokenizer.next_row().unwrap(), ["c"]);
    }
}
