use std::fmt;

use crate::syntax::ast::{
    Decl, FieldDecl, FuncDecl, Param, Receiver, SourceFile, StructBody, TypeDecl, TypeExpr,
};
use crate::syntax::kind::TokenKind;
use crate::syntax::lexer::{tokenize, Token};

/// Errors are fatal: the first malformed construct aborts the parse so
/// the caller never generates code from a half-read file.
#[derive(Debug, Clone, PartialEq)]
pub enum ParseError {
    Syntax {
        line: u32,
        column: u32,
        message: String,
    },
    MissingPackage,
}

impl fmt::Display for ParseError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ParseError::Syntax {
                line,
                column,
                message,
            } => write!(f, "{line}:{column}: {message}"),
            ParseError::MissingPackage => write!(f, "missing package clause"),
        }
    }
}

impl std::error::Error for ParseError {}

/// Parses a Go source file down to the declarations code generation
/// cares about. Function bodies and initializer expressions are
/// consumed by bracket matching without being represented.
pub fn parse_file(source: &str) -> Result<SourceFile, ParseError> {
    let source = source.strip_prefix('\u{feff}').unwrap_or(source);
    Parser::new(source).parse()
}

pub struct Parser<'a> {
    source: &'a str,
    tokens: Vec<Token<'a>>,
    pos: usize,
}

impl<'a> Parser<'a> {
    pub fn new(source: &'a str) -> Self {
        Self {
            source,
            tokens: tokenize(source),
            pos: 0,
        }
    }

    pub fn parse(mut self) -> Result<SourceFile, ParseError> {
        self.skip_trivia();
        if !self.at(TokenKind::KwPackage) {
            return Err(ParseError::MissingPackage);
        }
        self.bump();
        let package = self.expect_ident("package name")?.text.to_string();
        self.expect_terminator()?;

        let mut decls = Vec::new();
        loop {
            self.skip_trivia_and_semicolons();
            if self.is_eof() {
                break;
            }
            self.parse_decl(&mut decls)?;
        }

        Ok(SourceFile { package, decls })
    }

    fn parse_decl(&mut self, decls: &mut Vec<Decl>) -> Result<(), ParseError> {
        match self.peek() {
            Some(TokenKind::KwImport) => {
                self.parse_import_decl()?;
                decls.push(Decl::Import);
            }
            Some(TokenKind::KwType) => self.parse_type_decl(decls)?,
            Some(TokenKind::KwConst) => {
                self.parse_const_or_var_decl()?;
                decls.push(Decl::Const);
            }
            Some(TokenKind::KwVar) => {
                self.parse_const_or_var_decl()?;
                decls.push(Decl::Var);
            }
            Some(TokenKind::KwFunc) => {
                let func = self.parse_func_decl()?;
                decls.push(Decl::Func(func));
            }
            _ => return Err(self.error_here("expected declaration")),
        }
        Ok(())
    }

    fn parse_import_decl(&mut self) -> Result<(), ParseError> {
        self.bump(); // import
        self.skip_trivia();
        if self.at(TokenKind::LParen) {
            self.consume_balanced(TokenKind::LParen, TokenKind::RParen)?;
        } else {
            while !self.is_eof() && !self.at(TokenKind::Semicolon) {
                self.bump();
            }
        }
        self.expect_terminator()
    }

    fn parse_const_or_var_decl(&mut self) -> Result<(), ParseError> {
        self.bump(); // const or var
        self.skip_trivia();
        if self.at(TokenKind::LParen) {
            self.consume_balanced(TokenKind::LParen, TokenKind::RParen)?;
        } else {
            self.consume_spec_line()?;
        }
        self.expect_terminator()
    }

    /// Consumes one `name = expr` specification up to the terminating
    /// semicolon, tracking bracket depth so initializer expressions
    /// with composite literals or calls do not end the line early.
    fn consume_spec_line(&mut self) -> Result<(), ParseError> {
        let mut parens = 0usize;
        let mut brackets = 0usize;
        let mut braces = 0usize;
        loop {
            if self.is_eof() {
                if parens == 0 && brackets == 0 && braces == 0 {
                    return Ok(());
                }
                return Err(self.error_here("unbalanced brackets in declaration"));
            }
            match self.peek() {
                Some(TokenKind::Semicolon) if parens == 0 && brackets == 0 && braces == 0 => {
                    return Ok(());
                }
                Some(TokenKind::LParen) => parens += 1,
                Some(TokenKind::RParen) => {
                    if parens == 0 {
                        return Err(self.error_here("unexpected ')'"));
                    }
                    parens -= 1;
                }
                Some(TokenKind::LBracket) => brackets += 1,
                Some(TokenKind::RBracket) => {
                    if brackets == 0 {
                        return Err(self.error_here("unexpected ']'"));
                    }
                    brackets -= 1;
                }
                Some(TokenKind::LBrace) => braces += 1,
                Some(TokenKind::RBrace) => {
                    if braces == 0 {
                        return Err(self.error_here("unexpected '}'"));
                    }
                    braces -= 1;
                }
                _ => {}
            }
            self.bump();
        }
    }

    fn parse_type_decl(&mut self, decls: &mut Vec<Decl>) -> Result<(), ParseError> {
        self.bump(); // type
        self.skip_trivia();
        if self.at(TokenKind::LParen) {
            self.bump();
            loop {
                self.skip_trivia_and_semicolons();
                if self.is_eof() {
                    return Err(self.error_here("unterminated type declaration group"));
                }
                if self.at(TokenKind::RParen) {
                    self.bump();
                    break;
                }
                decls.push(Decl::Type(self.parse_type_spec()?));
            }
        } else {
            decls.push(Decl::Type(self.parse_type_spec()?));
        }
        self.expect_terminator()
    }

    fn parse_type_spec(&mut self) -> Result<TypeDecl, ParseError> {
        let name = self.expect_ident("type name")?.text.to_string();
        self.skip_trivia();
        let mut has_type_params = false;
        if self.at(TokenKind::LBracket) {
            match self.peek_nth_non_trivia(1) {
                // `[]` or `[5]` open an array type, not a parameter list.
                Some(TokenKind::RBracket) | Some(TokenKind::Integer) => {}
                _ => {
                    self.consume_balanced(TokenKind::LBracket, TokenKind::RBracket)?;
                    has_type_params = true;
                    self.skip_trivia();
                }
            }
        }
        if self.at(TokenKind::Equal) {
            self.bump(); // alias declaration
            self.skip_trivia();
        }
        let ty = self.parse_type()?;
        Ok(TypeDecl {
            name,
            ty,
            has_type_params,
        })
    }

    fn parse_func_decl(&mut self) -> Result<FuncDecl, ParseError> {
        self.bump(); // func
        self.skip_trivia();
        let receiver = if self.at(TokenKind::LParen) {
            Some(self.parse_receiver()?)
        } else {
            None
        };
        let name = self.expect_ident("function name")?.text.to_string();
        self.skip_trivia();
        if self.at(TokenKind::LBracket) {
            // type parameter list on a generic function
            self.consume_balanced(TokenKind::LBracket, TokenKind::RBracket)?;
            self.skip_trivia();
        }
        let params = self.parse_param_list()?;
        let results = self.parse_results()?;
        self.skip_trivia();
        if self.at(TokenKind::LBrace) {
            self.consume_balanced(TokenKind::LBrace, TokenKind::RBrace)?;
        }
        self.expect_terminator()?;
        Ok(FuncDecl {
            name,
            receiver,
            params,
            results,
        })
    }

    fn parse_receiver(&mut self) -> Result<Receiver, ParseError> {
        self.bump(); // (
        self.skip_trivia();
        let receiver = if self.at(TokenKind::Ident) {
            if self.peek_nth_non_trivia(1) == Some(TokenKind::RParen) {
                let ty = TypeExpr::Named(self.bump().text.to_string());
                Receiver { name: None, ty }
            } else {
                let name = self.bump().text.to_string();
                let ty = self.parse_type()?;
                Receiver {
                    name: Some(name),
                    ty,
                }
            }
        } else {
            Receiver {
                name: None,
                ty: self.parse_type()?,
            }
        };
        self.expect(TokenKind::RParen, "')' after receiver")?;
        Ok(receiver)
    }

    fn parse_param_list(&mut self) -> Result<Vec<Param>, ParseError> {
        self.expect(TokenKind::LParen, "'('")?;
        let mut params = Vec::new();
        loop {
            self.skip_trivia();
            if self.is_eof() {
                return Err(self.error_here("unterminated parameter list"));
            }
            if self.at(TokenKind::RParen) {
                self.bump();
                break;
            }
            params.push(self.parse_param()?);
            self.skip_trivia();
            if self.at(TokenKind::Comma) {
                self.bump();
                continue;
            }
            if self.at(TokenKind::RParen) {
                self.bump();
                break;
            }
            return Err(self.error_here("expected ',' or ')' in parameter list"));
        }
        Ok(params)
    }

    fn parse_param(&mut self) -> Result<Param, ParseError> {
        if self.at(TokenKind::Ellipsis) {
            self.bump();
            return Ok(Param {
                name: None,
                ty: self.parse_type()?,
            });
        }
        if self.at(TokenKind::Ident) {
            return match self.peek_nth_non_trivia(1) {
                // A bare name: either a type used positionally or one
                // name of a shared-type group. Both count as one
                // parameter, which is all the marker check needs.
                Some(TokenKind::Comma) | Some(TokenKind::RParen) | None => {
                    let ty = TypeExpr::Named(self.bump().text.to_string());
                    Ok(Param { name: None, ty })
                }
                // A qualified type used positionally: f(time.Time).
                Some(TokenKind::Dot) => Ok(Param {
                    name: None,
                    ty: self.parse_type()?,
                }),
                Some(TokenKind::Ellipsis) => {
                    let name = self.bump().text.to_string();
                    self.skip_trivia();
                    self.bump(); // ...
                    Ok(Param {
                        name: Some(name),
                        ty: self.parse_type()?,
                    })
                }
                _ => {
                    let name = self.bump().text.to_string();
                    Ok(Param {
                        name: Some(name),
                        ty: self.parse_type()?,
                    })
                }
            };
        }
        Ok(Param {
            name: None,
            ty: self.parse_type()?,
        })
    }

    fn parse_results(&mut self) -> Result<Vec<TypeExpr>, ParseError> {
        self.skip_trivia();
        if self.at(TokenKind::LParen) {
            let params = self.parse_param_list()?;
            return Ok(params.into_iter().map(|p| p.ty).collect());
        }
        if self.at_type_start() {
            return Ok(vec![self.parse_type()?]);
        }
        Ok(Vec::new())
    }

    fn parse_type(&mut self) -> Result<TypeExpr, ParseError> {
        self.skip_trivia();
        match self.peek() {
            Some(TokenKind::Star) => {
                self.bump();
                Ok(TypeExpr::Pointer(Box::new(self.parse_type()?)))
            }
            Some(TokenKind::LBracket) => {
                self.bump();
                self.skip_trivia();
                if self.at(TokenKind::RBracket) {
                    self.bump();
                } else {
                    // array length expression
                    let mut depth = 1usize;
                    while depth > 0 {
                        if self.is_eof() {
                            return Err(self.error_here("unterminated array length"));
                        }
                        match self.peek() {
                            Some(TokenKind::LBracket) => depth += 1,
                            Some(TokenKind::RBracket) => depth -= 1,
                            _ => {}
                        }
                        self.bump();
                    }
                }
                Ok(TypeExpr::Array(Box::new(self.parse_type()?)))
            }
            Some(TokenKind::KwMap) => {
                self.bump();
                self.expect(TokenKind::LBracket, "'[' after 'map'")?;
                let key = self.parse_type()?;
                self.expect(TokenKind::RBracket, "']' after map key type")?;
                let value = self.parse_type()?;
                Ok(TypeExpr::Map {
                    key: Box::new(key),
                    value: Box::new(value),
                })
            }
            Some(TokenKind::KwChan) => {
                self.bump();
                self.skip_trivia();
                if self.at(TokenKind::Arrow) {
                    self.bump(); // chan<-
                }
                Ok(TypeExpr::Chan(Box::new(self.parse_type()?)))
            }
            Some(TokenKind::Arrow) => {
                self.bump(); // <-chan
                self.expect(TokenKind::KwChan, "'chan' after '<-'")?;
                Ok(TypeExpr::Chan(Box::new(self.parse_type()?)))
            }
            Some(TokenKind::KwInterface) => {
                self.bump();
                self.skip_trivia();
                self.consume_balanced(TokenKind::LBrace, TokenKind::RBrace)?;
                Ok(TypeExpr::InterfaceType)
            }
            Some(TokenKind::KwStruct) => {
                self.bump();
                Ok(TypeExpr::StructType(self.parse_struct_body()?))
            }
            Some(TokenKind::KwFunc) => {
                self.bump();
                self.skip_trivia();
                self.consume_balanced(TokenKind::LParen, TokenKind::RParen)?;
                // An optional result on the same line. A newline after
                // ')' inserts a semicolon, which stops the scan here.
                self.skip_trivia();
                if self.at(TokenKind::LParen) {
                    self.consume_balanced(TokenKind::LParen, TokenKind::RParen)?;
                } else if self.at_type_start() {
                    self.parse_type()?;
                }
                Ok(TypeExpr::FuncType)
            }
            Some(TokenKind::LParen) => {
                self.bump();
                let inner = self.parse_type()?;
                self.expect(TokenKind::RParen, "')'")?;
                Ok(inner)
            }
            Some(TokenKind::Ident) => {
                let first = self.bump().text.to_string();
                match self.peek_nth_non_trivia(0) {
                    Some(TokenKind::Dot) => {
                        self.skip_trivia();
                        self.bump(); // .
                        let name = self.expect_ident("identifier after '.'")?.text.to_string();
                        if self.peek_nth_non_trivia(0) == Some(TokenKind::LBracket) {
                            self.skip_trivia();
                            self.consume_balanced(TokenKind::LBracket, TokenKind::RBracket)?;
                            Ok(TypeExpr::Generic {
                                name: format!("{first}.{name}"),
                            })
                        } else {
                            Ok(TypeExpr::Qualified {
                                package: first,
                                name,
                            })
                        }
                    }
                    Some(TokenKind::LBracket) => {
                        self.skip_trivia();
                        self.consume_balanced(TokenKind::LBracket, TokenKind::RBracket)?;
                        Ok(TypeExpr::Generic { name: first })
                    }
                    _ => Ok(TypeExpr::Named(first)),
                }
            }
            _ => Err(self.error_here("expected type")),
        }
    }

    fn parse_struct_body(&mut self) -> Result<StructBody, ParseError> {
        self.expect(TokenKind::LBrace, "'{' after 'struct'")?;
        let mut fields = Vec::new();
        loop {
            self.skip_trivia_and_semicolons();
            if self.is_eof() {
                return Err(self.error_here("unterminated struct body"));
            }
            if self.at(TokenKind::RBrace) {
                self.bump();
                break;
            }
            fields.push(self.parse_field_decl()?);
        }
        Ok(StructBody { fields })
    }

    fn parse_field_decl(&mut self) -> Result<FieldDecl, ParseError> {
        if self.at(TokenKind::Star) {
            // embedded pointer field: *Base
            self.bump();
            let ty = TypeExpr::Pointer(Box::new(self.parse_type()?));
            let tag = self.take_tag();
            self.expect_field_end()?;
            return Ok(FieldDecl {
                names: Vec::new(),
                ty,
                tag,
            });
        }
        if !self.at(TokenKind::Ident) {
            return Err(self.error_here("expected field name or embedded type"));
        }
        let first = self.bump().text.to_string();
        match self.peek_nth_non_trivia(0) {
            Some(TokenKind::Comma) => {
                let mut names = vec![first];
                while self.peek_nth_non_trivia(0) == Some(TokenKind::Comma) {
                    self.skip_trivia();
                    self.bump(); // ,
                    names.push(self.expect_ident("field name")?.text.to_string());
                }
                let ty = self.parse_type()?;
                let tag = self.take_tag();
                self.expect_field_end()?;
                Ok(FieldDecl { names, ty, tag })
            }
            Some(TokenKind::Dot) => {
                // embedded qualified field: pkg.Type
                self.skip_trivia();
                self.bump(); // .
                let name = self.expect_ident("identifier after '.'")?.text.to_string();
                let ty = TypeExpr::Qualified {
                    package: first,
                    name,
                };
                let tag = self.take_tag();
                self.expect_field_end()?;
                Ok(FieldDecl {
                    names: Vec::new(),
                    ty,
                    tag,
                })
            }
            Some(TokenKind::Semicolon)
            | Some(TokenKind::RBrace)
            | Some(TokenKind::String)
            | Some(TokenKind::RawString)
            | None => {
                // embedded field, possibly tagged
                let ty = TypeExpr::Named(first);
                let tag = self.take_tag();
                self.expect_field_end()?;
                Ok(FieldDecl {
                    names: Vec::new(),
                    ty,
                    tag,
                })
            }
            _ => {
                let ty = self.parse_type()?;
                let tag = self.take_tag();
                self.expect_field_end()?;
                Ok(FieldDecl {
                    names: vec![first],
                    ty,
                    tag,
                })
            }
        }
    }

    fn take_tag(&mut self) -> Option<String> {
        self.skip_trivia();
        if matches!(
            self.peek(),
            Some(TokenKind::String) | Some(TokenKind::RawString)
        ) {
            Some(self.bump().text.to_string())
        } else {
            None
        }
    }

    fn expect_field_end(&mut self) -> Result<(), ParseError> {
        self.skip_trivia();
        match self.peek() {
            Some(TokenKind::Semicolon) => {
                self.bump();
                Ok(())
            }
            // The closing brace terminates the last field; EOF is
            // reported by the struct body loop.
            Some(TokenKind::RBrace) | None => Ok(()),
            _ => Err(self.error_here("expected ';' or newline after field")),
        }
    }

    /// Consumes the semicolon ending a declaration. EOF and a pending
    /// close bracket count as terminators, matching Go's relaxed rule.
    fn expect_terminator(&mut self) -> Result<(), ParseError> {
        self.skip_trivia();
        match self.peek() {
            Some(TokenKind::Semicolon) => {
                self.bump();
                Ok(())
            }
            Some(TokenKind::RParen) | Some(TokenKind::RBrace) | None => Ok(()),
            _ => Err(self.error_here("expected ';' or newline after declaration")),
        }
    }

    fn at_type_start(&self) -> bool {
        matches!(
            self.peek(),
            Some(
                TokenKind::Ident
                    | TokenKind::Star
                    | TokenKind::LBracket
                    | TokenKind::LParen
                    | TokenKind::Arrow
                    | TokenKind::KwMap
                    | TokenKind::KwChan
                    | TokenKind::KwInterface
                    | TokenKind::KwStruct
                    | TokenKind::KwFunc
            )
        )
    }

    fn expect_ident(&mut self, what: &str) -> Result<Token<'a>, ParseError> {
        self.expect(TokenKind::Ident, what)
    }

    fn expect(&mut self, kind: TokenKind, what: &str) -> Result<Token<'a>, ParseError> {
        self.skip_trivia();
        if self.at(kind) {
            return Ok(self.bump());
        }
        Err(self.error_here(&format!("expected {what}")))
    }

    fn skip_trivia(&mut self) {
        while let Some(kind) = self.peek() {
            if kind.is_trivia() {
                self.bump();
            } else {
                break;
            }
        }
    }

    fn skip_trivia_and_semicolons(&mut self) {
        while let Some(kind) = self.peek() {
            if kind.is_trivia() || kind == TokenKind::Semicolon {
                self.bump();
            } else {
                break;
            }
        }
    }

    fn peek(&self) -> Option<TokenKind> {
        self.tokens.get(self.pos).map(|t| t.kind)
    }

    fn peek_nth_non_trivia(&self, nth: usize) -> Option<TokenKind> {
        let mut count = 0usize;
        let mut idx = self.pos;
        while idx < self.tokens.len() {
            let kind = self.tokens[idx].kind;
            if !kind.is_trivia() {
                if count == nth {
                    return Some(kind);
                }
                count += 1;
            }
            idx += 1;
        }
        None
    }

    fn at(&self, kind: TokenKind) -> bool {
        self.peek() == Some(kind)
    }

    fn bump(&mut self) -> Token<'a> {
        debug_assert!(!self.is_eof());
        let token = self.tokens[self.pos];
        self.pos += 1;
        token
    }

    fn is_eof(&self) -> bool {
        self.pos >= self.tokens.len()
    }

    fn consume_balanced(&mut self, open: TokenKind, close: TokenKind) -> Result<(), ParseError> {
        if !self.at(open) {
            return Err(self.error_here(&format!("expected {}", open.describe())));
        }
        let open_offset = self.tokens[self.pos].offset;
        let mut depth = 0usize;
        while !self.is_eof() {
            if self.at(open) {
                depth += 1;
            } else if self.at(close) {
                depth -= 1;
                self.bump();
                if depth == 0 {
                    return Ok(());
                }
                continue;
            }
            self.bump();
        }
        Err(self.error_at(open_offset, format!("unbalanced {}", open.describe())))
    }

    fn error_here(&self, message: &str) -> ParseError {
        let (offset, found) = match self.tokens.get(self.pos) {
            Some(token) => (token.offset, token.kind.describe()),
            None => (self.source.len(), "end of file"),
        };
        let (line, column) = line_col(self.source, offset);
        ParseError::Syntax {
            line,
            column,
            message: format!("{message}, found {found}"),
        }
    }

    fn error_at(&self, offset: usize, message: String) -> ParseError {
        let (line, column) = line_col(self.source, offset);
        ParseError::Syntax {
            line,
            column,
            message,
        }
    }
}

/// 1-based line and column for a byte offset, counting columns in
/// characters.
fn line_col(source: &str, offset: usize) -> (u32, u32) {
    let clamped = offset.min(source.len());
    let mut line = 1u32;
    let mut column = 1u32;
    for (idx, ch) in source.char_indices() {
        if idx >= clamped {
            break;
        }
        if ch == '\n' {
            line += 1;
            column = 1;
        } else {
            column += 1;
        }
    }
    (line, column)
}

#[cfg(test)]
#[path = "../../tests/src/syntax/parser_tests.rs"]
mod tests;
