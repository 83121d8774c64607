//! Logos-based lexer for PeopleCode
//!
//! Fast tokenization using the logos crate.

use super::token_kind::TokenKind;
use crate::base::TextSize;
use logos::Logos;

/// A token with its kind, text, and position
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Token<'a> {
    pub kind: TokenKind,
    pub text: &'a str,
    pub offset: TextSize,
}

impl Token<'_> {
    pub fn end(&self) -> TextSize {
        self.offset + TextSize::of(self.text)
    }
}

/// Lexer wrapping the logos-generated tokenizer
pub struct Lexer<'a> {
    inner: logos::Lexer<'a, LogosToken>,
    offset: u32,
}

impl<'a> Lexer<'a> {
    pub fn new(input: &'a str) -> Self {
        Self {
            inner: LogosToken::lexer(input),
            offset: 0,
        }
    }
}

impl<'a> Iterator for Lexer<'a> {
    type Item = Token<'a>;

    fn next(&mut self) -> Option<Self::Item> {
        let logos_token = self.inner.next()?;
        let text = self.inner.slice();
        let offset = TextSize::new(self.offset);
        self.offset += text.len() as u32;

        let kind = match logos_token {
            Ok(t) => t.into(),
            Err(()) => TokenKind::ERROR,
        };

        Some(Token { kind, text, offset })
    }
}

/// Tokenize an entire string into a Vec
pub fn tokenize(input: &str) -> Vec<Token<'_>> {
    Lexer::new(input).collect()
}

/// Logos token enum - maps to TokenKind
///
/// PeopleCode is fully case-insensitive, so every keyword carries
/// `ignore(case)`. Hyphenated closers (`end-if`, `when-other`, ...)
/// must lex as single tokens; logos picks them over `end` + `-` because the
/// longer match wins.
#[derive(Logos, Debug, Clone, Copy, PartialEq)]
pub enum LogosToken {
    // =========================================================================
    // TRIVIA
    // =========================================================================
    #[regex(r"[ \t\r\n]+")]
    Whitespace,

    #[regex(r"/\*([^*]|\*+[^*/])*\*+/")]
    BlockComment,

    #[regex(r"<\*([^*]|\*+[^*>])*\*+>")]
    NestComment,

    #[regex(r"[rR][eE][mM][ \t\r\n][^;]*;")]
    RemComment,

    #[regex(r"/\+([^+]|\++[^+/])*\++/")]
    Annotation,

    // =========================================================================
    // LITERALS & NAMES
    // =========================================================================
    #[regex(r"[a-zA-Z_][a-zA-Z0-9_#$]*")]
    Ident,

    #[regex(r"&[a-zA-Z_][a-zA-Z0-9_#$]*")]
    UserVar,

    #[regex(r"%[a-zA-Z_][a-zA-Z0-9_]*")]
    SystemRef,

    #[regex(r"[0-9]+(\.[0-9]+)?")]
    Number,

    // Doubled quotes escape a quote inside the literal
    #[regex(r#""([^"]|"")*""#)]
    #[regex(r"'([^']|'')*'")]
    String,

    // =========================================================================
    // MULTI-CHARACTER PUNCTUATION (must come before single-char)
    // =========================================================================
    #[token("<>")]
    NotEq,

    #[token("<=")]
    LtEq,

    #[token(">=")]
    GtEq,

    #[token("**")]
    StarStar,

    // =========================================================================
    // SINGLE-CHARACTER PUNCTUATION
    // =========================================================================
    #[token("(")]
    LParen,
    #[token(")")]
    RParen,
    #[token("[")]
    LBracket,
    #[token("]")]
    RBracket,
    #[token(";")]
    Semicolon,
    #[token(":")]
    Colon,
    #[token(".")]
    Dot,
    #[token(",")]
    Comma,
    #[token("=")]
    Eq,
    #[token("<")]
    Lt,
    #[token(">")]
    Gt,
    #[token("+")]
    Plus,
    #[token("-")]
    Minus,
    #[token("*")]
    Star,
    #[token("/")]
    Slash,
    #[token("|")]
    Pipe,
    #[token("@")]
    At,

    // =========================================================================
    // KEYWORDS (case-insensitive; alphabetical)
    // =========================================================================
    #[token("abstract", ignore(case))]
    AbstractKw,
    #[token("and", ignore(case))]
    AndKw,
    #[token("as", ignore(case))]
    AsKw,
    #[token("break", ignore(case))]
    BreakKw,
    #[token("catch", ignore(case))]
    CatchKw,
    #[token("class", ignore(case))]
    ClassKw,
    #[token("component", ignore(case))]
    ComponentKw,
    #[token("constant", ignore(case))]
    ConstantKw,
    #[token("continue", ignore(case))]
    ContinueKw,
    #[token("create", ignore(case))]
    CreateKw,
    #[token("declare", ignore(case))]
    DeclareKw,
    #[token("else", ignore(case))]
    ElseKw,
    #[token("end-class", ignore(case))]
    EndClassKw,
    #[token("end-evaluate", ignore(case))]
    EndEvaluateKw,
    #[token("end-for", ignore(case))]
    EndForKw,
    #[token("end-function", ignore(case))]
    EndFunctionKw,
    #[token("end-get", ignore(case))]
    EndGetKw,
    #[token("end-if", ignore(case))]
    EndIfKw,
    #[token("end-interface", ignore(case))]
    EndInterfaceKw,
    #[token("end-method", ignore(case))]
    EndMethodKw,
    #[token("end-set", ignore(case))]
    EndSetKw,
    #[token("end-try", ignore(case))]
    EndTryKw,
    #[token("end-while", ignore(case))]
    EndWhileKw,
    #[token("evaluate", ignore(case))]
    EvaluateKw,
    #[token("exit", ignore(case))]
    ExitKw,
    #[token("extends", ignore(case))]
    ExtendsKw,
    #[token("false", ignore(case))]
    FalseKw,
    #[token("for", ignore(case))]
    ForKw,
    #[token("function", ignore(case))]
    FunctionKw,
    #[token("get", ignore(case))]
    GetKw,
    #[token("global", ignore(case))]
    GlobalKw,
    #[token("if", ignore(case))]
    IfKw,
    #[token("implements", ignore(case))]
    ImplementsKw,
    #[token("import", ignore(case))]
    ImportKw,
    #[token("instance", ignore(case))]
    InstanceKw,
    #[token("interface", ignore(case))]
    InterfaceKw,
    #[token("library", ignore(case))]
    LibraryKw,
    #[token("local", ignore(case))]
    LocalKw,
    #[token("method", ignore(case))]
    MethodKw,
    #[token("not", ignore(case))]
    NotKw,
    #[token("null", ignore(case))]
    NullKw,
    #[token("or", ignore(case))]
    OrKw,
    #[token("out", ignore(case))]
    OutKw,
    #[token("peoplecode", ignore(case))]
    PeopleCodeKw,
    #[token("private", ignore(case))]
    PrivateKw,
    #[token("property", ignore(case))]
    PropertyKw,
    #[token("protected", ignore(case))]
    ProtectedKw,
    #[token("readonly", ignore(case))]
    ReadonlyKw,
    #[token("repeat", ignore(case))]
    RepeatKw,
    #[token("return", ignore(case))]
    ReturnKw,
    #[token("returns", ignore(case))]
    ReturnsKw,
    #[token("set", ignore(case))]
    SetKw,
    #[token("step", ignore(case))]
    StepKw,
    #[token("then", ignore(case))]
    ThenKw,
    #[token("throw", ignore(case))]
    ThrowKw,
    #[token("to", ignore(case))]
    ToKw,
    #[token("true", ignore(case))]
    TrueKw,
    #[token("try", ignore(case))]
    TryKw,
    #[token("until", ignore(case))]
    UntilKw,
    #[token("when", ignore(case))]
    WhenKw,
    #[token("when-other", ignore(case))]
    WhenOtherKw,
    #[token("while", ignore(case))]
    WhileKw,
}

impl From<LogosToken> for TokenKind {
    fn from(token: LogosToken) -> Self {
        use LogosToken::*;
        match token {
            // Trivia
            Whitespace => TokenKind::WHITESPACE,
            BlockComment => TokenKind::BLOCK_COMMENT,
            NestComment => TokenKind::NEST_COMMENT,
            RemComment => TokenKind::REM_COMMENT,
            Annotation => TokenKind::ANNOTATION,

            // Literals & names
            Ident => TokenKind::IDENT,
            UserVar => TokenKind::USER_VAR,
            SystemRef => TokenKind::SYSTEM_REF,
            Number => TokenKind::NUMBER,
            String => TokenKind::STRING,

            // Punctuation
            NotEq => TokenKind::NOT_EQ,
            LtEq => TokenKind::LT_EQ,
            GtEq => TokenKind::GT_EQ,
            StarStar => TokenKind::STAR_STAR,
            LParen => TokenKind::L_PAREN,
            RParen => TokenKind::R_PAREN,
            LBracket => TokenKind::L_BRACKET,
            RBracket => TokenKind::R_BRACKET,
            Semicolon => TokenKind::SEMICOLON,
            Colon => TokenKind::COLON,
            Dot => TokenKind::DOT,
            Comma => TokenKind::COMMA,
            Eq => TokenKind::EQ,
            Lt => TokenKind::LT,
            Gt => TokenKind::GT,
            Plus => TokenKind::PLUS,
            Minus => TokenKind::MINUS,
            Star => TokenKind::STAR,
            Slash => TokenKind::SLASH,
            Pipe => TokenKind::PIPE,
            At => TokenKind::AT,

            // Keywords
            AbstractKw => TokenKind::ABSTRACT_KW,
            AndKw => TokenKind::AND_KW,
            AsKw => TokenKind::AS_KW,
            BreakKw => TokenKind::BREAK_KW,
            CatchKw => TokenKind::CATCH_KW,
            ClassKw => TokenKind::CLASS_KW,
            ComponentKw => TokenKind::COMPONENT_KW,
            ConstantKw => TokenKind::CONSTANT_KW,
            ContinueKw => TokenKind::CONTINUE_KW,
            CreateKw => TokenKind::CREATE_KW,
            DeclareKw => TokenKind::DECLARE_KW,
            ElseKw => TokenKind::ELSE_KW,
            EndClassKw => TokenKind::END_CLASS_KW,
            EndEvaluateKw => TokenKind::END_EVALUATE_KW,
            EndForKw => TokenKind::END_FOR_KW,
            EndFunctionKw => TokenKind::END_FUNCTION_KW,
            EndGetKw => TokenKind::END_GET_KW,
            EndIfKw => TokenKind::END_IF_KW,
            EndInterfaceKw => TokenKind::END_INTERFACE_KW,
            EndMethodKw => TokenKind::END_METHOD_KW,
            EndSetKw => TokenKind::END_SET_KW,
            EndTryKw => TokenKind::END_TRY_KW,
            EndWhileKw => TokenKind::END_WHILE_KW,
            EvaluateKw => TokenKind::EVALUATE_KW,
            ExitKw => TokenKind::EXIT_KW,
            ExtendsKw => TokenKind::EXTENDS_KW,
            FalseKw => TokenKind::FALSE_KW,
            ForKw => TokenKind::FOR_KW,
            FunctionKw => TokenKind::FUNCTION_KW,
            GetKw => TokenKind::GET_KW,
            GlobalKw => TokenKind::GLOBAL_KW,
            IfKw => TokenKind::IF_KW,
            ImplementsKw => TokenKind::IMPLEMENTS_KW,
            ImportKw => TokenKind::IMPORT_KW,
            InstanceKw => TokenKind::INSTANCE_KW,
            InterfaceKw => TokenKind::INTERFACE_KW,
            LibraryKw => TokenKind::LIBRARY_KW,
            LocalKw => TokenKind::LOCAL_KW,
            MethodKw => TokenKind::METHOD_KW,
            NotKw => TokenKind::NOT_KW,
            NullKw => TokenKind::NULL_KW,
            OrKw => TokenKind::OR_KW,
            OutKw => TokenKind::OUT_KW,
            PeopleCodeKw => TokenKind::PEOPLECODE_KW,
            PrivateKw => TokenKind::PRIVATE_KW,
            PropertyKw => TokenKind::PROPERTY_KW,
            ProtectedKw => TokenKind::PROTECTED_KW,
            ReadonlyKw => TokenKind::READONLY_KW,
            RepeatKw => TokenKind::REPEAT_KW,
            ReturnKw => TokenKind::RETURN_KW,
            ReturnsKw => TokenKind::RETURNS_KW,
            SetKw => TokenKind::SET_KW,
            StepKw => TokenKind::STEP_KW,
            ThenKw => TokenKind::THEN_KW,
            ThrowKw => TokenKind::THROW_KW,
            ToKw => TokenKind::TO_KW,
            TrueKw => TokenKind::TRUE_KW,
            TryKw => TokenKind::TRY_KW,
            UntilKw => TokenKind::UNTIL_KW,
            WhenKw => TokenKind::WHEN_KW,
            WhenOtherKw => TokenKind::WHEN_OTHER_KW,
            WhileKw => TokenKind::WHILE_KW,
        }
    }
}
