use crate::error_handling::*;
use tracing::trace;

#[derive(Clone, Debug, PartialEq, Eq)]
pub enum TokenKind {
    identifier, number, dollars, rubles, operator, punctuation
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Token {
    pub content: String,
    pub kind: TokenKind,
}

impl Token {
    pub fn new(content: String, kind: TokenKind) -> Self {
        Self{content, kind}
    }
}

pub trait Scanner {
    fn get_current(&self) -> Option<&Token>;
    fn advance(&mut self) -> Result<()>;
    fn is_valid(&self) -> bool;
}

pub const DOLLAR_MARKER: char = '$';
pub const RUBLE_MARKER: char = 'p';

/// Tokenizes an expression on demand. Whitespace between tokens is skipped.
pub struct StringScanner {
    string: String,
    token: Option<Token>,
    index: usize,
}

fn is_operator(character: char) -> bool {
    matches!(character, '+' | '-')
}

fn is_punctuation(character: char) -> bool {
    matches!(character, '(' | ')')
}

fn is_numeral(character: char) -> bool {
    character.is_ascii_digit() || character == '.' || character == ','
}

fn is_word(character: char) -> bool {
    character.is_alphanumeric() || character == '_'
}

impl StringScanner {
    pub fn new(string: impl Into<String>) -> Result<Self> {
        let mut source = Self {
            string: string.into(),
            token: None,
            index: 0,
        };
        source.advance()?;
        Ok(source)
    }

    pub fn is_empty(&self) -> bool {
        self.string.trim().is_empty()
    }

    /// Byte length of the longest prefix of `view` whose chars all satisfy `predicate`.
    fn span<P: Fn(char) -> bool>(view: &str, predicate: P) -> usize {
        view.char_indices()
            .find(|&(_, c)| !predicate(c))
            .map_or(view.len(), |(i, _)| i)
    }

    fn view(&self) -> &str {
        &self.string[self.index..]
    }

    fn skip_whitespace(&mut self) {
        self.index += Self::span(self.view(), char::is_whitespace);
    }

    fn get_number(&self) -> Token {
        let view = self.view();
        let count = Self::span(view, is_numeral);
        let mut after = view[count..].chars();
        let is_ruble = after.next() == Some(RUBLE_MARKER) && !after.next().map_or(false, is_word);
        if is_ruble {
            Token::new(view[..=count].into(), TokenKind::rubles)
        } else {
            Token::new(view[..count].into(), TokenKind::number)
        }
    }

    fn get_dollars(&self) -> Result<Token> {
        let view = self.view();
        let count = Self::span(&view[1..], is_numeral);
        if count == 0 {
            return Err(CalcError::invalid_number(DOLLAR_MARKER.into()));
        }
        Ok(Token::new(view[..=count].into(), TokenKind::dollars))
    }

    fn get_identifier(&self) -> Token {
        let count = Self::span(self.view(), is_word);
        Token::new(self.view()[..count].into(), TokenKind::identifier)
    }

    fn get_single(&self, kind: TokenKind) -> Token {
        Token::new(self.view()[..1].into(), kind)
    }

    fn get_token(&self) -> Result<Option<Token>> {
        let view = self.view();
        let token = match view.chars().next() {
            None => return Ok(None),
            Some(c) if is_numeral(c) => self.get_number(),
            Some(DOLLAR_MARKER) => self.get_dollars()?,
            Some(c) if c.is_alphabetic() => self.get_identifier(),
            Some(c) if is_operator(c) => self.get_single(TokenKind::operator),
            Some(c) if is_punctuation(c) => self.get_single(TokenKind::punctuation),
            Some(c) => return Err(CalcError::invalid_character(c.into())),
        };
        Ok(Some(token))
    }
}

impl Scanner for StringScanner {
    fn get_current(&self) -> Option<&Token> {
        self.token.as_ref()
    }

    fn advance(&mut self) -> Result<()> {
        self.skip_whitespace();
        let token = self.get_token()?;
        if let Some(token) = &token {
            trace!(content = %token.content, kind = ?token.kind, "scanned token");
            self.index += token.content.len();
        }
        self.token = token;
        Ok(())
    }

    fn is_valid(&self) -> bool {
        self.token.is_some()
    }
}
