//! Lexical analysis: splitting one raw input line into argument tokens.
//!
//! Tokens are plain strings. Quote marks and escape characters shape the
//! tokens but never survive into them; redirection operators are not special
//! at this level and come out as ordinary tokens for the parser to pick up.

/// Quoting state of the scan. The states are mutually exclusive; escape
/// handling differs in each of them.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum LexingState {
    Unquoted,
    SingleQuoted,
    DoubleQuoted,
}

struct LexingFsm {
    input: Vec<char>,
    pos: usize,
    state: LexingState,
    buffer: String,
}

impl LexingFsm {
    fn new(line: &str) -> Self {
        LexingFsm {
            input: line.chars().collect(),
            pos: 0,
            state: LexingState::Unquoted,
            buffer: String::new(),
        }
    }

    /// Single left-to-right scan over the input.
    ///
    /// End of input while still inside a quoted state is not an error: the
    /// token accumulated so far is emitted as if the quote had been closed.
    fn make_tokens(mut self) -> Vec<String> {
        let mut out = Vec::new();

        while let Some(ch) = self.read_char() {
            match self.state {
                LexingState::Unquoted => self.handle_unquoted(ch, &mut out),
                LexingState::SingleQuoted => self.handle_single_quote(ch),
                LexingState::DoubleQuoted => self.handle_double_quote(ch),
            }
        }

        if !self.buffer.is_empty() {
            out.push(std::mem::take(&mut self.buffer));
        }

        out
    }

    fn read_char(&mut self) -> Option<char> {
        let ch = self.input.get(self.pos).copied();
        if ch.is_some() {
            self.pos += 1;
        }
        ch
    }

    fn handle_unquoted(&mut self, ch: char, out: &mut Vec<String>) {
        match ch {
            // One-shot escape: the next character, whatever it is, goes into
            // the token literally. A trailing backslash escapes nothing.
            '\\' => {
                if let Some(escaped) = self.read_char() {
                    self.buffer.push(escaped);
                }
            }
            '\'' => self.state = LexingState::SingleQuoted,
            '"' => self.state = LexingState::DoubleQuoted,
            // A run of whitespace closes the current token; adjacent
            // whitespace never produces empty tokens.
            c if c.is_whitespace() => {
                if !self.buffer.is_empty() {
                    out.push(std::mem::take(&mut self.buffer));
                }
            }
            c => self.buffer.push(c),
        }
    }

    /// Everything except the closing quote is taken verbatim, backslashes
    /// included.
    fn handle_single_quote(&mut self, ch: char) {
        match ch {
            '\'' => self.state = LexingState::Unquoted,
            c => self.buffer.push(c),
        }
    }

    /// A backslash drops itself and keeps the following character, except
    /// before a newline where both disappear (line continuation).
    fn handle_double_quote(&mut self, ch: char) {
        match ch {
            '"' => self.state = LexingState::Unquoted,
            '\\' => match self.read_char() {
                Some('\n') | None => {}
                Some(next) => self.buffer.push(next),
            },
            c => self.buffer.push(c),
        }
    }
}

/// Split a raw input line into an ordered sequence of tokens.
///
/// Tokens come out in left-to-right order and are never merged after
/// creation. Unterminated quotes close permissively at end of input.
pub fn tokenize(line: &str) -> Vec<String> {
    LexingFsm::new(line).make_tokens()
}
