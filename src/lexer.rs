#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Pos(pub u32, pub u32);

impl Pos {
    pub fn line(&self) -> u32 {
        self.0
    }

    pub fn column(&self) -> u32 {
        self.1
    }
}

/// A candidate word found in running text. `end` points one past the last
/// character.
#[derive(Debug, Clone, PartialEq)]
pub struct Token {
    pub start: Pos,
    pub end: Pos,
    pub lexeme: String,
}

/// Splits prose into words to spell check.
///
/// A word is a run of ASCII letters, digits and apostrophes that begins with
/// a letter. Runs containing a digit are skipped, as are runs longer than
/// `max_len`.
#[derive(Debug)]
pub struct Lexer {
    text: Vec<char>,
    max_len: Option<usize>,
    col: u32,
    line: u32,
    offset: usize,
}

impl Iterator for Lexer {
    type Item = Token;

    fn next(&mut self) -> Option<Self::Item> {
        self.next_token()
    }
}

fn is_word_char(c: char) -> bool {
    c.is_ascii_alphanumeric() || c == '\''
}

impl Lexer {
    pub fn new<T: AsRef<str>>(text: T, max_len: Option<usize>) -> Lexer {
        Lexer {
            text: text.as_ref().chars().collect(),
            max_len,
            col: 1,
            line: 1,
            offset: 0,
        }
    }

    fn pos(&self) -> Pos {
        Pos(self.line, self.col)
    }

    fn next_token(&mut self) -> Option<Token> {
        loop {
            let next_char = self.peek()?;

            match next_char {
                'a'..='z' | 'A'..='Z' => {
                    if let Some(token) = self.word() {
                        return Some(token);
                    }
                }
                '0'..='9' => {
                    self.word();
                }
                _ => {
                    self.next();
                }
            }
        }
    }

    fn next(&mut self) -> Option<char> {
        let char = self.peek()?;

        self.col += 1;

        if char == '\n' {
            self.col = 1;
            self.line += 1;
        }
        self.offset += 1;

        Some(char)
    }

    fn peek(&self) -> Option<char> {
        self.text.get(self.offset).copied()
    }

    /// Consumes a whole run and returns it unless it has to be skipped.
    fn word(&mut self) -> Option<Token> {
        let start = self.pos();
        let mut lexeme = String::new();
        let mut has_digit = false;

        while let Some(char) = self.peek().filter(|c| is_word_char(*c)) {
            has_digit |= char.is_ascii_digit();
            lexeme.push(char);
            self.next();
        }

        let too_long = self.max_len.is_some_and(|max| lexeme.len() > max);
        if has_digit || too_long {
            return None;
        }

        Some(Token {
            start,
            end: self.pos(),
            lexeme,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn lex(text: &str) -> Vec<String> {
        Lexer::new(text, Some(45)).map(|v| v.lexeme).collect()
    }

    #[test]
    fn lex_prose() {
        assert_eq!(
            lex("It's a truth universally acknowledged, that a single man..."),
            vec!["It's", "a", "truth", "universally", "acknowledged", "that", "a", "single", "man"]
        );
    }

    #[test]
    fn skips_words_with_digits() {
        assert_eq!(lex("route66 is 2nd best, mp3s aside"), vec!["is", "best", "aside"]);
    }

    #[test]
    fn apostrophes_only_inside_or_after_a_word() {
        assert_eq!(lex("'tis the dogs' 'bone'"), vec!["tis", "the", "dogs'", "bone'"]);
    }

    #[test]
    fn skips_over_long_words() {
        let long = "a".repeat(46);
        assert_eq!(lex(&format!("short {long} end")), vec!["short", "end"]);
        let unbounded = Lexer::new(&long, None).map(|v| v.lexeme).collect::<Vec<_>>();
        assert_eq!(unbounded, vec![long]);
    }

    #[test]
    fn non_ascii_letters_split_words() {
        assert_eq!(lex("café naïve"), vec!["caf", "na", "ve"]);
    }

    #[test]
    fn positions_are_one_based() {
        let tokens = Lexer::new("fizz buzz\n  hello", None).collect::<Vec<_>>();
        assert_eq!(tokens[0].start, Pos(1, 1));
        assert_eq!(tokens[0].end, Pos(1, 5));
        assert_eq!(tokens[1].start, Pos(1, 6));
        assert_eq!(tokens[2].start, Pos(2, 3));
        assert_eq!(tokens[2].start.line(), 2);
        assert_eq!(tokens[2].start.column(), 3);
    }
}
