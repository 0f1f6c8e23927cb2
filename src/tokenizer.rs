/// A lexical scanner that splits a raw statement into whitespace-separated
/// word tokens.
///
/// Whitespace inside a single-quote-delimited span is preserved as part of
/// the current token, so `'Bob Dylan'` survives as one token. The quote
/// characters themselves stay embedded in the token; they are stripped later
/// during value coercion. Original casing is preserved.
pub struct Tokenizer {
    /// The input string stored as a vector of characters for easy iteration.
    input: Vec<char>,
    /// The current position in the character vector.
    position: usize,
}

impl Tokenizer {
    /// Creates a new Tokenizer for the given input string.
    pub fn new(input: &str) -> Self {
        Self {
            input: input.chars().collect(),
            position: 0,
        }
    }

    /// Processes the entire input and returns its tokens in order.
    ///
    /// An empty or all-whitespace statement yields no tokens.
    ///
    /// # Example
    /// ```
    /// # use minisql::Tokenizer;
    /// let tokens = Tokenizer::new("SELECT * FROM users").tokenize();
    /// assert_eq!(tokens, vec!["SELECT", "*", "FROM", "users"]);
    /// ```
    pub fn tokenize(mut self) -> Vec<String> {
        let mut tokens = Vec::new();

        loop {
            self.skip_whitespace();

            if self.is_at_end() {
                break;
            }

            tokens.push(self.read_word());
        }

        tokens
    }

    // --- Navigation Helpers ---

    /// Returns the character at the current position.
    fn current_char(&self) -> char {
        self.input[self.position]
    }

    /// Moves the cursor forward by one character.
    fn advance(&mut self) {
        self.position += 1;
    }

    /// Checks if the cursor has reached the end of the input.
    fn is_at_end(&self) -> bool {
        self.position >= self.input.len()
    }

    /// Consumes any whitespace characters (spaces, tabs, newlines).
    fn skip_whitespace(&mut self) {
        while !self.is_at_end() && self.current_char().is_whitespace() {
            self.advance();
        }
    }

    // --- Extraction Logic ---

    /// Reads characters until unquoted whitespace or the end of input.
    ///
    /// A single quote toggles the quoted span; inside it, whitespace is kept.
    /// An unterminated quote swallows the rest of the input into the token.
    fn read_word(&mut self) -> String {
        let mut word = String::new();
        let mut in_quotes = false;

        while !self.is_at_end() {
            let ch = self.current_char();

            if ch.is_whitespace() && !in_quotes {
                break;
            }
            if ch == '\'' {
                in_quotes = !in_quotes;
            }

            word.push(ch);
            self.advance();
        }

        word
    }
}
