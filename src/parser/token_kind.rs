//! Token kinds for the PeopleCode lexer.
//!
//! PeopleCode keywords are case-insensitive (`End-If`, `END-IF`, `end-if`
//! all lex as [`TokenKind::END_IF_KW`]); the hyphenated closers are single
//! tokens so the parser never has to reassemble them.

/// All token kinds produced by the lexer.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
#[allow(non_camel_case_types)]
pub enum TokenKind {
    // =========================================================================
    // TRIVIA (whitespace, comments, generated annotations)
    // =========================================================================
    WHITESPACE,
    BLOCK_COMMENT,  // /* ... */
    NEST_COMMENT,   // <* ... *>
    REM_COMMENT,    // REM ... ;
    ANNOTATION,     // /+ ... +/ (tool-generated parameter annotations)

    // =========================================================================
    // LITERALS & NAMES
    // =========================================================================
    IDENT,      // identifiers, record/field/event names
    USER_VAR,   // &variable
    SYSTEM_REF, // %This, %Super, %UserId, ...
    NUMBER,     // 42, 3.14
    STRING,     // "text" or 'text', quotes doubled to escape

    // =========================================================================
    // PUNCTUATION
    // =========================================================================
    L_PAREN,   // (
    R_PAREN,   // )
    L_BRACKET, // [
    R_BRACKET, // ]
    SEMICOLON, // ;
    COLON,     // :
    DOT,       // .
    COMMA,     // ,
    EQ,        // = (assignment and comparison share the token)
    NOT_EQ,    // <>
    LT,        // <
    LT_EQ,     // <=
    GT,        // >
    GT_EQ,     // >=
    PLUS,      // +
    MINUS,     // -
    STAR,      // *
    STAR_STAR, // **
    SLASH,     // /
    PIPE,      // | (string concatenation)
    AT,        // @ (dynamic references)

    // =========================================================================
    // KEYWORDS
    // =========================================================================
    AND_KW,
    OR_KW,
    NOT_KW,
    IF_KW,
    THEN_KW,
    ELSE_KW,
    END_IF_KW,
    FOR_KW,
    TO_KW,
    STEP_KW,
    END_FOR_KW,
    WHILE_KW,
    END_WHILE_KW,
    REPEAT_KW,
    UNTIL_KW,
    EVALUATE_KW,
    WHEN_KW,
    WHEN_OTHER_KW,
    END_EVALUATE_KW,
    BREAK_KW,
    CONTINUE_KW,
    EXIT_KW,
    RETURN_KW,
    RETURNS_KW,
    FUNCTION_KW,
    END_FUNCTION_KW,
    DECLARE_KW,
    PEOPLECODE_KW,
    LIBRARY_KW,
    LOCAL_KW,
    GLOBAL_KW,
    COMPONENT_KW,
    CONSTANT_KW,
    INSTANCE_KW,
    CLASS_KW,
    INTERFACE_KW,
    END_CLASS_KW,
    END_INTERFACE_KW,
    EXTENDS_KW,
    IMPLEMENTS_KW,
    METHOD_KW,
    END_METHOD_KW,
    PROPERTY_KW,
    GET_KW,
    SET_KW,
    END_GET_KW,
    END_SET_KW,
    READONLY_KW,
    ABSTRACT_KW,
    OUT_KW,
    IMPORT_KW,
    CREATE_KW,
    TRY_KW,
    CATCH_KW,
    END_TRY_KW,
    THROW_KW,
    AS_KW,
    NULL_KW,
    TRUE_KW,
    FALSE_KW,
    PRIVATE_KW,
    PROTECTED_KW,

    // =========================================================================
    // Special
    // =========================================================================
    ERROR,
    EOF,
}

impl TokenKind {
    /// Check if this is a trivia token (whitespace, comment, annotation)
    pub fn is_trivia(self) -> bool {
        matches!(
            self,
            Self::WHITESPACE
                | Self::BLOCK_COMMENT
                | Self::NEST_COMMENT
                | Self::REM_COMMENT
                | Self::ANNOTATION
        )
    }

    /// Check if this is a keyword
    pub fn is_keyword(self) -> bool {
        self >= Self::AND_KW && self <= Self::PROTECTED_KW
    }

    /// Human-readable name for error messages
    pub fn describe(self) -> &'static str {
        match self {
            Self::WHITESPACE => "whitespace",
            Self::BLOCK_COMMENT | Self::NEST_COMMENT | Self::REM_COMMENT => "comment",
            Self::ANNOTATION => "annotation",
            Self::IDENT => "identifier",
            Self::USER_VAR => "&variable",
            Self::SYSTEM_REF => "%reference",
            Self::NUMBER => "number",
            Self::STRING => "string",
            Self::L_PAREN => "`(`",
            Self::R_PAREN => "`)`",
            Self::L_BRACKET => "`[`",
            Self::R_BRACKET => "`]`",
            Self::SEMICOLON => "`;`",
            Self::COLON => "`:`",
            Self::DOT => "`.`",
            Self::COMMA => "`,`",
            Self::EQ => "`=`",
            Self::NOT_EQ => "`<>`",
            Self::LT => "`<`",
            Self::LT_EQ => "`<=`",
            Self::GT => "`>`",
            Self::GT_EQ => "`>=`",
            Self::PLUS => "`+`",
            Self::MINUS => "`-`",
            Self::STAR => "`*`",
            Self::STAR_STAR => "`**`",
            Self::SLASH => "`/`",
            Self::PIPE => "`|`",
            Self::AT => "`@`",
            Self::AND_KW => "`And`",
            Self::OR_KW => "`Or`",
            Self::NOT_KW => "`Not`",
            Self::IF_KW => "`If`",
            Self::THEN_KW => "`Then`",
            Self::ELSE_KW => "`Else`",
            Self::END_IF_KW => "`End-If`",
            Self::FOR_KW => "`For`",
            Self::TO_KW => "`To`",
            Self::STEP_KW => "`Step`",
            Self::END_FOR_KW => "`End-For`",
            Self::WHILE_KW => "`While`",
            Self::END_WHILE_KW => "`End-While`",
            Self::REPEAT_KW => "`Repeat`",
            Self::UNTIL_KW => "`Until`",
            Self::EVALUATE_KW => "`Evaluate`",
            Self::WHEN_KW => "`When`",
            Self::WHEN_OTHER_KW => "`When-Other`",
            Self::END_EVALUATE_KW => "`End-Evaluate`",
            Self::BREAK_KW => "`Break`",
            Self::CONTINUE_KW => "`Continue`",
            Self::EXIT_KW => "`Exit`",
            Self::RETURN_KW => "`Return`",
            Self::RETURNS_KW => "`Returns`",
            Self::FUNCTION_KW => "`Function`",
            Self::END_FUNCTION_KW => "`End-Function`",
            Self::DECLARE_KW => "`Declare`",
            Self::PEOPLECODE_KW => "`PeopleCode`",
            Self::LIBRARY_KW => "`Library`",
            Self::LOCAL_KW => "`Local`",
            Self::GLOBAL_KW => "`Global`",
            Self::COMPONENT_KW => "`Component`",
            Self::CONSTANT_KW => "`Constant`",
            Self::INSTANCE_KW => "`Instance`",
            Self::CLASS_KW => "`class`",
            Self::INTERFACE_KW => "`interface`",
            Self::END_CLASS_KW => "`end-class`",
            Self::END_INTERFACE_KW => "`end-interface`",
            Self::EXTENDS_KW => "`extends`",
            Self::IMPLEMENTS_KW => "`implements`",
            Self::METHOD_KW => "`method`",
            Self::END_METHOD_KW => "`end-method`",
            Self::PROPERTY_KW => "`property`",
            Self::GET_KW => "`get`",
            Self::SET_KW => "`set`",
            Self::END_GET_KW => "`end-get`",
            Self::END_SET_KW => "`end-set`",
            Self::READONLY_KW => "`readonly`",
            Self::ABSTRACT_KW => "`abstract`",
            Self::OUT_KW => "`out`",
            Self::IMPORT_KW => "`import`",
            Self::CREATE_KW => "`create`",
            Self::TRY_KW => "`try`",
            Self::CATCH_KW => "`catch`",
            Self::END_TRY_KW => "`end-try`",
            Self::THROW_KW => "`throw`",
            Self::AS_KW => "`As`",
            Self::NULL_KW => "`Null`",
            Self::TRUE_KW => "`True`",
            Self::FALSE_KW => "`False`",
            Self::PRIVATE_KW => "`private`",
            Self::PROTECTED_KW => "`protected`",
            Self::ERROR => "unrecognized text",
            Self::EOF => "end of program",
        }
    }
}
