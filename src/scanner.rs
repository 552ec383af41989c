use crate::{
    error::{Error, Reporter, Result},
    token::{Literal, Token, TokenKind},
};
use peekmore::{PeekMore, PeekMoreIterator};
use phf::phf_map;
use std::str::CharIndices;

pub(crate) static KEYWORDS: phf::Map<&'static str, TokenKind> = phf_map! {
    "and" => TokenKind::And,
    "class" => TokenKind::Class,
    "else" => TokenKind::Else,
    "false" => TokenKind::False,
    "for" => TokenKind::For,
    "fun" => TokenKind::Fun,
    "if" => TokenKind::If,
    "nil" => TokenKind::Nil,
    "or" => TokenKind::Or,
    "print" => TokenKind::Print,
    "return" => TokenKind::Return,
    "super" => TokenKind::Super,
    "this" => TokenKind::This,
    "true" => TokenKind::True,
    "var" => TokenKind::Var,
    "while" => TokenKind::While,
};

/// Scans `source` into tokens, handing lexical errors to `reporter`.
///
/// Always returns at least one token: the last one is `EndOfFile`.
pub fn scan<R: Reporter>(source: &str, reporter: &mut R) -> Vec<Token> {
    Scanner::new(source).scan_tokens(reporter)
}

/// Single-pass scanner over an in-memory source.
///
/// As an `Iterator` it yields the raw lexeme stream with errors in-line and no
/// end marker; `scan_tokens` turns that into the finished token list.
pub struct Scanner<'a> {
    src: &'a str,
    chars: PeekMoreIterator<CharIndices<'a>>,
    // byte offsets into `src`; start <= current <= src.len()
    start: usize,
    current: usize,
    line: usize,
}

impl <'a> Iterator for Scanner<'a> {
    type Item = Result<Token>;

    fn next(&mut self) -> Option<Result<Token>> {
        loop {
            self.start = self.current;
            let next_char = self.advance()?;
            if let Some(token) = self.scan_token(next_char) {
                return Some(token);
            }
        }
    }
}

impl <'a> Scanner<'a> {
    pub fn new(src: &'a str) -> Self {
        Self {
            src,
            chars: src.char_indices().peekmore(),
            start: 0,
            current: 0,
            line: 1,
        }
    }

    pub fn scan_tokens<R: Reporter>(mut self, reporter: &mut R) -> Vec<Token> {
        let mut tokens = Vec::new();
        let mut error_count = 0;
        while let Some(result) = self.next() {
            match result {
                Ok(token) => {
                    tracing::trace!(kind = %token.kind, lexeme = token.lexeme(), line = token.line, "token");
                    tokens.push(token);
                },
                Err(e) => {
                    error_count += 1;
                    reporter.report(e);
                },
            }
        }

        tokens.push(Token::new(TokenKind::EndOfFile, "", None, self.line));
        tracing::debug!(tokens = tokens.len(), errors = error_count, lines = self.line, "scan complete");
        tokens
    }

    fn scan_token(&mut self, next_char: char) -> Option<Result<Token>> {
        use TokenKind::*;
        let kind = match next_char {
            '(' => LeftParen,
            ')' => RightParen,
            '{' => LeftBrace,
            '}' => RightBrace,
            ',' => Comma,
            '.' => Dot,
            '-' => Minus,
            '+' => Plus,
            ';' => Semicolon,
            '*' => Star,
            '!' => if self.does_next_match('=') { BangEqual } else { Bang },
            '=' => if self.does_next_match('=') { EqualEqual } else { Equal },
            '<' => if self.does_next_match('=') { LessEqual } else { Less },
            '>' => if self.does_next_match('=') { GreaterEqual } else { Greater },
            '/' => {
                if self.does_next_match('/') { // is this a comment?
                    self.advance_until_match('\n');
                    return None;
                }
                Slash
            },
            ' ' | '\r' | '\t' => return None,
            '\n' => {
                self.line += 1;
                return None;
            },
            '"' => return Some(self.extract_string()),
            c if c.is_ascii_digit() => return Some(Ok(self.extract_number())),
            c if can_start_identifier(&c) => return Some(Ok(self.extract_identifier())),
            c => return Some(Err(Error::unexpected_character(self.line, c))),
        };
        Some(Ok(self.make_token(kind, None)))
    }

    fn lexeme(&self) -> &'a str {
        &self.src[self.start..self.current]
    }

    fn make_token(&self, kind: TokenKind, literal: Option<Literal>) -> Token {
        Token::new(kind, self.lexeme(), literal, self.line)
    }

    fn advance(&mut self) -> Option<char> {
        let (index, c) = self.chars.next()?;
        self.current = index + c.len_utf8();
        Some(c)
    }

    fn peek(&mut self) -> Option<char> {
        self.chars.peek().map(|&(_, c)| c)
    }

    fn peek_next(&mut self) -> Option<char> {
        self.chars.peek_nth(1).map(|&(_, c)| c)
    }

    fn does_next_match(&mut self, c: char) -> bool {
        match self.peek() {
            Some(next) if c == next => {
                self.advance();
                true
            }
            _ => false,
        }
    }

    fn extract_string(&mut self) -> Result<Token> {
        let line = self.line;
        let mut newline_count = 0;
        self.advance_until_match_for_each('"', |c| if c == '\n' { newline_count += 1 });
        self.line += newline_count;
        match self.advance() {
            None => Err(Error::unterminated_string(self.line)),
            Some(_) => { // must be the closing quote due to advance_until_match_for_each
                let text = &self.src[self.start + 1..self.current - 1];
                let literal = Some(Literal::String(text.to_string()));
                Ok(Token::new(TokenKind::String, self.lexeme(), literal, line))
            },
        }
    }

    fn extract_number(&mut self) -> Token {
        self.advance_until(|n| !n.is_ascii_digit());

        if self.peek() == Some('.') {
            if let Some(maybe_digit) = self.peek_next() {
                if maybe_digit.is_ascii_digit() {
                    self.advance();
                    self.advance_until(|n| !n.is_ascii_digit());
                }
            }
        }

        let literal = self.lexeme().parse().ok().map(Literal::Number);
        self.make_token(TokenKind::Number, literal)
    }

    fn extract_identifier(&mut self) -> Token {
        self.advance_until(|n| !is_part_of_valid_identifier(n));

        match KEYWORDS.get(self.lexeme()) {
            Some(kind) => self.make_token(*kind, None),
            None => self.make_token(TokenKind::Identifier, None),
        }
    }

    fn advance_until_match(&mut self, c: char) {
        self.advance_until(|n| n == &c)
    }

    fn advance_until(&mut self, should_stop: impl Fn(&char) -> bool) {
        self.advance_until_for_each(should_stop, |_| {})
    }

    fn advance_until_match_for_each(
        &mut self,
        c: char,
        f: impl FnMut(char) -> ()
    ) {
        self.advance_until_for_each(|n| n == &c, f);
    }

    fn advance_until_for_each(
        &mut self,
        should_stop: impl Fn(&char) -> bool,
        mut f: impl FnMut(char) -> ()
    ) {
        while let Some(next) = self.peek() {
            if should_stop(&next) {
                break;
            }
            self.advance();
            f(next);
        }
    }
}

fn can_start_identifier(c: &char) -> bool {
    c.is_ascii_alphabetic() || c == &'_'
}

fn is_part_of_valid_identifier(c: &char) -> bool {
    can_start_identifier(c) || c.is_ascii_digit()
}
