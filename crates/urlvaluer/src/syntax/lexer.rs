use crate::syntax::kind::TokenKind;
use logos::Logos;

/// A single lexed token. `text` borrows from the source; synthetic
/// semicolons carry an empty slice.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Token<'a> {
    pub kind: TokenKind,
    pub text: &'a str,
    pub offset: usize,
}

/// A lexer that wraps `logos::Lexer` to produce positioned tokens.
pub struct Lexer<'a> {
    inner: logos::Lexer<'a, TokenKind>,
}

impl<'a> Lexer<'a> {
    pub fn new(input: &'a str) -> Self {
        Self {
            inner: TokenKind::lexer(input),
        }
    }
}

impl<'a> Iterator for Lexer<'a> {
    type Item = Token<'a>;

    fn next(&mut self) -> Option<Self::Item> {
        let token_result = self.inner.next()?;
        let text = self.inner.slice();
        let offset = self.inner.span().start;

        let kind = match token_result {
            Ok(token) => token,
            Err(_) => TokenKind::Unknown,
        };

        Some(Token { kind, text, offset })
    }
}

/// Lexes `source` and applies Go's automatic semicolon insertion: a
/// newline following a statement-ending token becomes a `Semicolon`
/// token. Block comments spanning lines count as newlines; line and
/// single-line block comments are neutral.
pub fn tokenize(source: &str) -> Vec<Token<'_>> {
    let mut tokens = Vec::new();
    let mut semicolon_pending = false;

    for token in Lexer::new(source) {
        match token.kind {
            TokenKind::Space | TokenKind::LineComment => tokens.push(token),
            TokenKind::Newline => {
                if semicolon_pending {
                    tokens.push(synthetic_semicolon(token.offset));
                    semicolon_pending = false;
                }
                tokens.push(token);
            }
            TokenKind::BlockComment => {
                if semicolon_pending && token.text.contains('\n') {
                    tokens.push(synthetic_semicolon(token.offset));
                    semicolon_pending = false;
                }
                tokens.push(token);
            }
            kind => {
                semicolon_pending = kind.triggers_semicolon();
                tokens.push(token);
            }
        }
    }

    if semicolon_pending {
        tokens.push(synthetic_semicolon(source.len()));
    }

    tokens
}

fn synthetic_semicolon(offset: usize) -> Token<'static> {
    Token {
        kind: TokenKind::Semicolon,
        text: "",
        offset,
    }
}
