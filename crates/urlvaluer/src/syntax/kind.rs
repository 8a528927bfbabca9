use logos::Logos;

#[derive(Logos, Debug, PartialEq, Eq, Clone, Copy)]
#[logos(error = ())] // Use unit type for error
pub enum TokenKind {
    /// Horizontal whitespace. Newlines are a separate kind because they
    /// drive automatic semicolon insertion.
    #[regex(r"[ \t\r\f]+")]
    Space,
    #[token("\n")]
    Newline,

    #[regex(r"//.*", allow_greedy = true)]
    LineComment,
    #[regex(r"/\*([^*]|\*+[^*/])*\*+/")]
    BlockComment,

    // Punctuation
    #[token("(")]
    LParen,
    #[token(")")]
    RParen,
    #[token("{")]
    LBrace,
    #[token("}")]
    RBrace,
    #[token("[")]
    LBracket,
    #[token("]")]
    RBracket,
    #[token(";")]
    Semicolon,
    #[token(":")]
    Colon,
    #[token(",")]
    Comma,
    #[token("...")]
    Ellipsis,
    #[token(".")]
    Dot,

    // Operators (multi-char first)
    #[token("<<=")]
    LeftShiftEqual,
    #[token(">>=")]
    RightShiftEqual,
    #[token("&^=")]
    AmpCaretEqual,
    #[token("++")]
    PlusPlus,
    #[token("--")]
    MinusMinus,
    #[token("+=")]
    PlusEqual,
    #[token("-=")]
    MinusEqual,
    #[token("*=")]
    StarEqual,
    #[token("/=")]
    SlashEqual,
    #[token("%=")]
    PercentEqual,
    #[token("&=")]
    AmpEqual,
    #[token("|=")]
    PipeEqual,
    #[token("^=")]
    CaretEqual,
    #[token("==")]
    EqualEqual,
    #[token("!=")]
    NotEqual,
    #[token("<=")]
    LessEqual,
    #[token(">=")]
    GreaterEqual,
    #[token("&&")]
    AndAnd,
    #[token("||")]
    OrOr,
    #[token("<<")]
    LeftShift,
    #[token(">>")]
    RightShift,
    #[token("&^")]
    AmpCaret,
    #[token("<-")]
    Arrow,
    #[token(":=")]
    ColonEqual,
    #[token("+")]
    Plus,
    #[token("-")]
    Minus,
    #[token("*")]
    Star,
    #[token("/")]
    Slash,
    #[token("%")]
    Percent,
    #[token("^")]
    Caret,
    #[token("&")]
    Amp,
    #[token("|")]
    Pipe,
    #[token("~")]
    Tilde,
    #[token("!")]
    Exclaim,
    #[token("=")]
    Equal,
    #[token("<")]
    Less,
    #[token(">")]
    Greater,

    // Keywords
    #[token("break")]
    KwBreak,
    #[token("case")]
    KwCase,
    #[token("chan")]
    KwChan,
    #[token("const")]
    KwConst,
    #[token("continue")]
    KwContinue,
    #[token("default")]
    KwDefault,
    #[token("defer")]
    KwDefer,
    #[token("else")]
    KwElse,
    #[token("fallthrough")]
    KwFallthrough,
    #[token("for")]
    KwFor,
    #[token("func")]
    KwFunc,
    #[token("go")]
    KwGo,
    #[token("goto")]
    KwGoto,
    #[token("if")]
    KwIf,
    #[token("import")]
    KwImport,
    #[token("interface")]
    KwInterface,
    #[token("map")]
    KwMap,
    #[token("package")]
    KwPackage,
    #[token("range")]
    KwRange,
    #[token("return")]
    KwReturn,
    #[token("select")]
    KwSelect,
    #[token("struct")]
    KwStruct,
    #[token("switch")]
    KwSwitch,
    #[token("type")]
    KwType,
    #[token("var")]
    KwVar,

    // Identifiers & literals
    #[regex(r"[\p{L}_][\p{L}\p{Nd}_]*")]
    Ident,
    #[regex(r"'([^'\\\n]|\\[^\n])*'")]
    Rune,
    #[regex(r#""([^"\\\n]|\\[^\n])*""#)]
    String,
    #[regex(r"`[^`]*`")]
    RawString,
    #[regex(r"0[xX]_?[0-9A-Fa-f](_?[0-9A-Fa-f])*i?")]
    #[regex(r"0[bB]_?[01](_?[01])*i?")]
    #[regex(r"0[oO]_?[0-7](_?[0-7])*i?")]
    #[regex(r"[0-9](_?[0-9])*i?")]
    Integer,
    #[regex(r"[0-9](_?[0-9])*\.([0-9](_?[0-9])*)?([eE][+-]?[0-9](_?[0-9])*)?i?")]
    #[regex(r"\.[0-9](_?[0-9])*([eE][+-]?[0-9](_?[0-9])*)?i?")]
    #[regex(r"[0-9](_?[0-9])*[eE][+-]?[0-9](_?[0-9])*i?")]
    #[regex(r"0[xX][0-9A-Fa-f_]*(\.[0-9A-Fa-f_]*)?[pP][+-]?[0-9]+i?")]
    Float,

    /// Any byte sequence the patterns above reject, one character at a
    /// time. Keeps the token stream total so the parser can report the
    /// offending text instead of a hole.
    #[regex(r".", priority = 0)]
    Unknown,
}

impl TokenKind {
    pub fn is_trivia(self) -> bool {
        matches!(
            self,
            TokenKind::Space | TokenKind::Newline | TokenKind::LineComment | TokenKind::BlockComment
        )
    }

    /// Token kinds after which a newline ends the statement. Mirrors the
    /// trigger set of Go's automatic semicolon insertion rule.
    pub fn triggers_semicolon(self) -> bool {
        matches!(
            self,
            TokenKind::Ident
                | TokenKind::Integer
                | TokenKind::Float
                | TokenKind::Rune
                | TokenKind::String
                | TokenKind::RawString
                | TokenKind::KwBreak
                | TokenKind::KwContinue
                | TokenKind::KwFallthrough
                | TokenKind::KwReturn
                | TokenKind::PlusPlus
                | TokenKind::MinusMinus
                | TokenKind::RParen
                | TokenKind::RBracket
                | TokenKind::RBrace
        )
    }

    /// Human-readable name used in parse error messages.
    pub fn describe(self) -> &'static str {
        match self {
            TokenKind::Space => "whitespace",
            TokenKind::Newline => "newline",
            TokenKind::LineComment | TokenKind::BlockComment => "comment",
            TokenKind::LParen => "'('",
            TokenKind::RParen => "')'",
            TokenKind::LBrace => "'{'",
            TokenKind::RBrace => "'}'",
            TokenKind::LBracket => "'['",
            TokenKind::RBracket => "']'",
            TokenKind::Semicolon => "';'",
            TokenKind::Colon => "':'",
            TokenKind::Comma => "','",
            TokenKind::Ellipsis => "'...'",
            TokenKind::Dot => "'.'",
            TokenKind::KwBreak => "'break'",
            TokenKind::KwCase => "'case'",
            TokenKind::KwChan => "'chan'",
            TokenKind::KwConst => "'const'",
            TokenKind::KwContinue => "'continue'",
            TokenKind::KwDefault => "'default'",
            TokenKind::KwDefer => "'defer'",
            TokenKind::KwElse => "'else'",
            TokenKind::KwFallthrough => "'fallthrough'",
            TokenKind::KwFor => "'for'",
            TokenKind::KwFunc => "'func'",
            TokenKind::KwGo => "'go'",
            TokenKind::KwGoto => "'goto'",
            TokenKind::KwIf => "'if'",
            TokenKind::KwImport => "'import'",
            TokenKind::KwInterface => "'interface'",
            TokenKind::KwMap => "'map'",
            TokenKind::KwPackage => "'package'",
            TokenKind::KwRange => "'range'",
            TokenKind::KwReturn => "'return'",
            TokenKind::KwSelect => "'select'",
            TokenKind::KwStruct => "'struct'",
            TokenKind::KwSwitch => "'switch'",
            TokenKind::KwType => "'type'",
            TokenKind::KwVar => "'var'",
            TokenKind::Ident => "identifier",
            TokenKind::Rune => "rune literal",
            TokenKind::String | TokenKind::RawString => "string literal",
            TokenKind::Integer | TokenKind::Float => "number",
            TokenKind::Unknown => "unrecognized character",
            _ => "operator",
        }
    }
}
