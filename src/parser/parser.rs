//! Recursive descent parser for PeopleCode
//!
//! Builds an owned AST directly from tokens. Parsing is strict: the first
//! unacceptable token aborts with a [`ParseError`], and callers that parse
//! fetched programs treat that the same as not finding the program at all.

use super::error::ParseError;
use super::lexer::{Lexer, Token};
use super::token_kind::TokenKind;
use crate::base::{Name, Span, TextRange, TextSize};
use crate::syntax::*;

/// Parse PeopleCode source into a [`Program`].
pub fn parse_program(input: &str) -> Result<Program, ParseError> {
    let tokens: Vec<_> = Lexer::new(input)
        .filter(|t| !t.kind.is_trivia())
        .collect();
    let mut parser = Parser::new(input, tokens);
    parser.parse_program()
}

/// Token kinds that end the current statement list without belonging to it.
const STMT_END: &[TokenKind] = &[
    TokenKind::SEMICOLON,
    TokenKind::ELSE_KW,
    TokenKind::END_IF_KW,
    TokenKind::END_FOR_KW,
    TokenKind::END_WHILE_KW,
    TokenKind::END_EVALUATE_KW,
    TokenKind::END_FUNCTION_KW,
    TokenKind::END_METHOD_KW,
    TokenKind::END_GET_KW,
    TokenKind::END_SET_KW,
    TokenKind::END_TRY_KW,
    TokenKind::UNTIL_KW,
    TokenKind::CATCH_KW,
    TokenKind::WHEN_KW,
    TokenKind::WHEN_OTHER_KW,
];

/// The parser state
struct Parser<'a> {
    tokens: Vec<Token<'a>>,
    pos: usize,
    input_len: TextSize,
}

impl<'a> Parser<'a> {
    fn new(input: &'a str, tokens: Vec<Token<'a>>) -> Self {
        Self {
            tokens,
            pos: 0,
            input_len: TextSize::of(input),
        }
    }

    // =========================================================================
    // Token inspection
    // =========================================================================

    fn current(&self) -> Option<&Token<'a>> {
        self.tokens.get(self.pos)
    }

    fn current_kind(&self) -> TokenKind {
        self.current().map(|t| t.kind).unwrap_or(TokenKind::EOF)
    }

    fn at(&self, kind: TokenKind) -> bool {
        self.current_kind() == kind
    }

    fn at_any(&self, kinds: &[TokenKind]) -> bool {
        kinds.contains(&self.current_kind())
    }

    fn at_eof(&self) -> bool {
        self.pos >= self.tokens.len()
    }

    /// Whether the current token is an identifier spelling `word`.
    fn at_contextual(&self, word: &str) -> bool {
        self.current()
            .is_some_and(|t| t.kind == TokenKind::IDENT && t.text.eq_ignore_ascii_case(word))
    }

    /// Offset where the current token starts (end of input at EOF).
    fn start(&self) -> TextSize {
        self.current().map(|t| t.offset).unwrap_or(self.input_len)
    }

    /// End offset of the most recently consumed token.
    fn prev_end(&self) -> TextSize {
        if self.pos == 0 {
            TextSize::new(0)
        } else {
            self.tokens[self.pos - 1].end()
        }
    }

    fn span_from(&self, start: TextSize) -> Span {
        TextRange::new(start, self.prev_end().max(start))
    }

    fn token_span(token: &Token<'a>) -> Span {
        TextRange::at(token.offset, TextSize::of(token.text))
    }

    // =========================================================================
    // Token consumption
    // =========================================================================

    fn bump(&mut self) -> Option<Token<'a>> {
        let token = self.current().cloned();
        if token.is_some() {
            self.pos += 1;
        }
        token
    }

    fn eat(&mut self, kind: TokenKind) -> bool {
        if self.at(kind) {
            self.pos += 1;
            true
        } else {
            false
        }
    }

    fn expect(&mut self, kind: TokenKind) -> Result<Token<'a>, ParseError> {
        if self.at(kind) {
            Ok(self.bump().unwrap())
        } else {
            Err(self.unexpected_here(kind.describe()))
        }
    }

    fn unexpected_here(&self, expected: impl Into<String>) -> ParseError {
        match self.current() {
            Some(t) if t.kind == TokenKind::ERROR => ParseError::Lex { offset: t.offset },
            Some(t) => ParseError::unexpected(expected, t.kind, t.offset),
            None => ParseError::eof(expected),
        }
    }

    /// Consume an identifier token into an [`Ident`].
    fn ident(&mut self) -> Result<Ident, ParseError> {
        let token = self.expect(TokenKind::IDENT)?;
        Ok(Ident::new(token.text, Self::token_span(&token)))
    }

    /// Consume a `&variable` token; the stored name drops the sigil while
    /// the span covers the whole token.
    fn user_var(&mut self) -> Result<Ident, ParseError> {
        let token = self.expect(TokenKind::USER_VAR)?;
        Ok(Ident::new(&token.text[1..], Self::token_span(&token)))
    }

    /// Member names may collide with keywords (`.Get(...)`, `.Value`), so
    /// any keyword token is accepted here by its raw text.
    fn member_name(&mut self) -> Result<Ident, ParseError> {
        match self.current() {
            Some(t) if t.kind == TokenKind::IDENT || t.kind.is_keyword() => {
                let token = self.bump().unwrap();
                Ok(Ident::new(token.text, Self::token_span(&token)))
            }
            _ => Err(self.unexpected_here("a member name")),
        }
    }

    // =========================================================================
    // Program structure
    // =========================================================================

    fn parse_program(&mut self) -> Result<Program, ParseError> {
        let mut program = Program {
            imports: Vec::new(),
            class: None,
            functions: Vec::new(),
            variables: Vec::new(),
            constants: Vec::new(),
            method_impls: Vec::new(),
            accessors: Vec::new(),
            stmts: Vec::new(),
            span: TextRange::new(TextSize::new(0), self.input_len),
        };

        while !self.at_eof() {
            match self.current_kind() {
                TokenKind::IMPORT_KW => program.imports.push(self.parse_import()?),
                TokenKind::CLASS_KW | TokenKind::INTERFACE_KW => {
                    let is_interface = self.at(TokenKind::INTERFACE_KW);
                    let kw = self.current_kind();
                    let class = self.parse_class_decl(is_interface)?;
                    if program.class.is_some() {
                        return Err(ParseError::unexpected(
                            "a single class declaration per program",
                            kw,
                            class.span.start(),
                        ));
                    }
                    program.class = Some(class);
                }
                TokenKind::DECLARE_KW => {
                    if let Some(declared) = self.parse_declare_function()? {
                        program.functions.push(Function::Declared(declared));
                    }
                }
                TokenKind::FUNCTION_KW => {
                    let def = self.parse_function_def()?;
                    program.functions.push(Function::Defined(def));
                }
                TokenKind::GLOBAL_KW => {
                    program.variables.push(self.parse_var_decl(VarScope::Global)?)
                }
                TokenKind::COMPONENT_KW => program
                    .variables
                    .push(self.parse_var_decl(VarScope::Component)?),
                TokenKind::LOCAL_KW => {
                    program.variables.push(self.parse_var_decl(VarScope::Local)?)
                }
                TokenKind::CONSTANT_KW => program.constants.push(self.parse_constant_decl()?),
                TokenKind::METHOD_KW => program.method_impls.push(self.parse_method_impl()?),
                TokenKind::GET_KW => program
                    .accessors
                    .push(self.parse_accessor_impl(AccessorKind::Get)?),
                TokenKind::SET_KW => program
                    .accessors
                    .push(self.parse_accessor_impl(AccessorKind::Set)?),
                TokenKind::SEMICOLON => {
                    self.bump();
                }
                _ => program.stmts.push(self.parse_stmt()?),
            }
        }

        Ok(program)
    }

    fn parse_import(&mut self) -> Result<Import, ParseError> {
        let start = self.start();
        self.bump(); // import
        let mut path = vec![self.ident()?];
        let mut wildcard = false;
        while self.eat(TokenKind::COLON) {
            if self.eat(TokenKind::STAR) {
                wildcard = true;
                break;
            }
            path.push(self.ident()?);
        }
        self.eat(TokenKind::SEMICOLON);
        Ok(Import {
            path,
            wildcard,
            span: self.span_from(start),
        })
    }

    fn parse_class_decl(&mut self, is_interface: bool) -> Result<AppClass, ParseError> {
        let start = self.start();
        self.bump(); // class / interface
        let name = self.ident()?;
        let base = if self.eat(TokenKind::EXTENDS_KW) {
            Some(self.parse_type_path()?)
        } else {
            None
        };
        let interface = if self.eat(TokenKind::IMPLEMENTS_KW) {
            Some(self.parse_type_path()?)
        } else {
            None
        };

        let mut methods = Vec::new();
        let mut properties = Vec::new();
        let mut instance_vars = Vec::new();
        let mut constants = Vec::new();

        let end_kw = if is_interface {
            TokenKind::END_INTERFACE_KW
        } else {
            TokenKind::END_CLASS_KW
        };
        while !self.at(end_kw) && !self.at_eof() {
            match self.current_kind() {
                // Visibility markers only group the members that follow.
                TokenKind::PRIVATE_KW | TokenKind::PROTECTED_KW => {
                    self.bump();
                }
                TokenKind::METHOD_KW => methods.push(self.parse_method_header()?),
                TokenKind::PROPERTY_KW => properties.push(self.parse_property()?),
                TokenKind::INSTANCE_KW => {
                    instance_vars.push(self.parse_var_decl(VarScope::Instance)?)
                }
                TokenKind::CONSTANT_KW => constants.push(self.parse_constant_decl()?),
                TokenKind::SEMICOLON => {
                    self.bump();
                }
                _ => return Err(self.unexpected_here("a class member declaration")),
            }
        }
        self.expect(end_kw)?;
        self.eat(TokenKind::SEMICOLON);

        Ok(AppClass {
            name,
            is_interface,
            base,
            interface,
            methods,
            properties,
            instance_vars,
            constants,
            span: self.span_from(start),
        })
    }

    fn parse_method_header(&mut self) -> Result<MethodSig, ParseError> {
        let start = self.start();
        self.bump(); // method
        let name = self.ident()?;
        let params = if self.at(TokenKind::L_PAREN) {
            self.parse_params()?
        } else {
            Vec::new()
        };
        let returns = if self.eat(TokenKind::RETURNS_KW) {
            Some(self.parse_type()?)
        } else {
            None
        };
        let is_abstract = self.eat(TokenKind::ABSTRACT_KW);
        self.eat(TokenKind::SEMICOLON);
        Ok(MethodSig {
            name,
            params,
            returns,
            is_abstract,
            span: self.span_from(start),
        })
    }

    fn parse_property(&mut self) -> Result<Property, ParseError> {
        let start = self.start();
        self.bump(); // property
        let prop_type = self.parse_type()?;
        let name = self.ident()?;
        let mut has_get = false;
        let mut has_set = false;
        let mut is_readonly = false;
        let mut is_abstract = false;
        loop {
            match self.current_kind() {
                TokenKind::GET_KW => {
                    self.bump();
                    has_get = true;
                }
                TokenKind::SET_KW => {
                    self.bump();
                    has_set = true;
                }
                TokenKind::READONLY_KW => {
                    self.bump();
                    is_readonly = true;
                }
                TokenKind::ABSTRACT_KW => {
                    self.bump();
                    is_abstract = true;
                }
                _ => break,
            }
        }
        self.eat(TokenKind::SEMICOLON);
        Ok(Property {
            name,
            prop_type,
            has_get,
            has_set,
            is_readonly,
            is_abstract,
            span: self.span_from(start),
        })
    }

    fn parse_constant_decl(&mut self) -> Result<ConstantDecl, ParseError> {
        let start = self.start();
        self.bump(); // constant
        let name = self.user_var()?;
        self.expect(TokenKind::EQ)?;
        let value = self.parse_literal()?;
        self.eat(TokenKind::SEMICOLON);
        Ok(ConstantDecl {
            name,
            value,
            span: self.span_from(start),
        })
    }

    /// `Declare Function name PeopleCode RECORD.FIELD Event;`
    ///
    /// Library declares (`Declare Function x Library "y" …`) are consumed
    /// and dropped; they bind to external DLLs, not to programs.
    fn parse_declare_function(&mut self) -> Result<Option<DeclaredFunction>, ParseError> {
        let start = self.start();
        self.bump(); // declare
        self.expect(TokenKind::FUNCTION_KW)?;
        let name = self.ident()?;
        match self.current_kind() {
            TokenKind::PEOPLECODE_KW => {
                self.bump();
                let record = self.ident()?;
                self.expect(TokenKind::DOT)?;
                let field = self.ident()?;
                let event = self.ident()?;
                self.eat(TokenKind::SEMICOLON);
                Ok(Some(DeclaredFunction {
                    name,
                    record,
                    field,
                    event,
                    span: self.span_from(start),
                }))
            }
            TokenKind::LIBRARY_KW => {
                while !self.at(TokenKind::SEMICOLON) && !self.at_eof() {
                    self.bump();
                }
                self.eat(TokenKind::SEMICOLON);
                Ok(None)
            }
            _ => Err(self.unexpected_here("`PeopleCode` or `Library`")),
        }
    }

    fn parse_function_def(&mut self) -> Result<FunctionDef, ParseError> {
        let start = self.start();
        self.bump(); // function
        let name = self.ident()?;
        let params = if self.at(TokenKind::L_PAREN) {
            self.parse_params()?
        } else {
            Vec::new()
        };
        let returns = if self.eat(TokenKind::RETURNS_KW) {
            Some(self.parse_type()?)
        } else {
            None
        };
        self.eat(TokenKind::SEMICOLON);
        let body = self.parse_stmts(&[TokenKind::END_FUNCTION_KW])?;
        self.expect(TokenKind::END_FUNCTION_KW)?;
        self.eat(TokenKind::SEMICOLON);
        Ok(FunctionDef {
            name,
            params,
            returns,
            body,
            span: self.span_from(start),
        })
    }

    fn parse_method_impl(&mut self) -> Result<MethodImpl, ParseError> {
        let start = self.start();
        self.bump(); // method
        let name = self.ident()?;
        let body = self.parse_stmts(&[TokenKind::END_METHOD_KW])?;
        self.expect(TokenKind::END_METHOD_KW)?;
        self.eat(TokenKind::SEMICOLON);
        Ok(MethodImpl {
            name,
            body,
            span: self.span_from(start),
        })
    }

    fn parse_accessor_impl(&mut self, kind: AccessorKind) -> Result<AccessorImpl, ParseError> {
        let start = self.start();
        self.bump(); // get / set
        let name = self.ident()?;
        let end_kw = match kind {
            AccessorKind::Get => TokenKind::END_GET_KW,
            AccessorKind::Set => TokenKind::END_SET_KW,
        };
        let body = self.parse_stmts(&[end_kw])?;
        self.expect(end_kw)?;
        self.eat(TokenKind::SEMICOLON);
        Ok(AccessorImpl {
            kind,
            name,
            body,
            span: self.span_from(start),
        })
    }

    fn parse_var_decl(&mut self, scope: VarScope) -> Result<VariableDecl, ParseError> {
        let start = self.start();
        self.bump(); // local / global / component / instance
        let var_type = self.parse_type()?;
        let mut names = vec![self.user_var()?];
        while self.eat(TokenKind::COMMA) {
            names.push(self.user_var()?);
        }
        let init = if self.eat(TokenKind::EQ) {
            Some(self.parse_expr()?)
        } else {
            None
        };
        self.eat(TokenKind::SEMICOLON);
        Ok(VariableDecl {
            scope,
            var_type,
            names,
            init,
            span: self.span_from(start),
        })
    }

    fn parse_params(&mut self) -> Result<Vec<Param>, ParseError> {
        self.expect(TokenKind::L_PAREN)?;
        let mut params = Vec::new();
        if !self.at(TokenKind::R_PAREN) {
            loop {
                let start = self.start();
                let name = self.user_var()?;
                let param_type = if self.eat(TokenKind::AS_KW) {
                    Some(self.parse_type()?)
                } else {
                    None
                };
                let is_out = self.eat(TokenKind::OUT_KW);
                params.push(Param {
                    name,
                    param_type,
                    is_out,
                    span: self.span_from(start),
                });
                if !self.eat(TokenKind::COMMA) {
                    break;
                }
            }
        }
        self.expect(TokenKind::R_PAREN)?;
        Ok(params)
    }

    // =========================================================================
    // Types
    // =========================================================================

    fn parse_type(&mut self) -> Result<TypeRef, ParseError> {
        let start = self.start();
        let first = self.ident()?;
        if is_array_type_name(first.as_str()) {
            let elem = if self.at_contextual("of") {
                self.bump();
                Some(Box::new(self.parse_type()?))
            } else {
                None
            };
            return Ok(TypeRef::Array {
                elem,
                span: self.span_from(start),
            });
        }
        if self.at(TokenKind::COLON) {
            let mut segments = vec![first];
            while self.eat(TokenKind::COLON) {
                segments.push(self.ident()?);
            }
            return Ok(TypeRef::AppClass(TypePath {
                segments,
                span: self.span_from(start),
            }));
        }
        Ok(TypeRef::Named(first))
    }

    /// An application class path in `extends` / `implements` position. A
    /// single bare name is allowed there when the class was imported.
    fn parse_type_path(&mut self) -> Result<TypePath, ParseError> {
        let start = self.start();
        let mut segments = vec![self.ident()?];
        while self.eat(TokenKind::COLON) {
            segments.push(self.ident()?);
        }
        Ok(TypePath {
            segments,
            span: self.span_from(start),
        })
    }

    // =========================================================================
    // Statements
    // =========================================================================

    fn parse_stmts(&mut self, terminators: &[TokenKind]) -> Result<Vec<Stmt>, ParseError> {
        let mut stmts = Vec::new();
        while !self.at_eof() && !self.at_any(terminators) {
            if self.eat(TokenKind::SEMICOLON) {
                continue;
            }
            stmts.push(self.parse_stmt()?);
        }
        Ok(stmts)
    }

    fn parse_stmt(&mut self) -> Result<Stmt, ParseError> {
        match self.current_kind() {
            TokenKind::LOCAL_KW => Ok(Stmt::VarDecl(self.parse_var_decl(VarScope::Local)?)),
            TokenKind::GLOBAL_KW => Ok(Stmt::VarDecl(self.parse_var_decl(VarScope::Global)?)),
            TokenKind::COMPONENT_KW => {
                Ok(Stmt::VarDecl(self.parse_var_decl(VarScope::Component)?))
            }
            TokenKind::IF_KW => self.parse_if(),
            TokenKind::FOR_KW => self.parse_for(),
            TokenKind::WHILE_KW => self.parse_while(),
            TokenKind::REPEAT_KW => self.parse_repeat(),
            TokenKind::EVALUATE_KW => self.parse_evaluate(),
            TokenKind::TRY_KW => self.parse_try(),
            TokenKind::RETURN_KW => {
                let start = self.start();
                self.bump();
                let value = if self.at_stmt_end() {
                    None
                } else {
                    Some(self.parse_expr()?)
                };
                self.eat(TokenKind::SEMICOLON);
                Ok(Stmt::Return(ReturnStmt {
                    value,
                    span: self.span_from(start),
                }))
            }
            TokenKind::THROW_KW => {
                let start = self.start();
                self.bump();
                let value = self.parse_expr()?;
                self.eat(TokenKind::SEMICOLON);
                Ok(Stmt::Throw(ThrowStmt {
                    value,
                    span: self.span_from(start),
                }))
            }
            TokenKind::BREAK_KW => {
                let start = self.start();
                self.bump();
                self.eat(TokenKind::SEMICOLON);
                Ok(Stmt::Break(self.span_from(start)))
            }
            TokenKind::CONTINUE_KW => {
                let start = self.start();
                self.bump();
                self.eat(TokenKind::SEMICOLON);
                Ok(Stmt::Continue(self.span_from(start)))
            }
            TokenKind::EXIT_KW => {
                let start = self.start();
                self.bump();
                let value = if self.at_stmt_end() {
                    None
                } else {
                    Some(self.parse_expr()?)
                };
                self.eat(TokenKind::SEMICOLON);
                Ok(Stmt::Exit(ExitStmt {
                    value,
                    span: self.span_from(start),
                }))
            }
            _ => self.parse_expr_stmt(),
        }
    }

    fn at_stmt_end(&self) -> bool {
        self.at_eof() || self.at_any(STMT_END)
    }

    /// Expression statement, reinterpreting a top-level `=` comparison as
    /// an assignment: PeopleCode uses one token for both, and at statement
    /// level it always means assignment.
    fn parse_expr_stmt(&mut self) -> Result<Stmt, ParseError> {
        let expr = self.parse_expr()?;
        let stmt = match expr {
            Expr::Binary(bin) if bin.op == BinaryOp::Eq => Stmt::Assign(AssignStmt {
                span: bin.span,
                target: *bin.lhs,
                value: *bin.rhs,
            }),
            other => Stmt::Expr(other),
        };
        self.eat(TokenKind::SEMICOLON);
        Ok(stmt)
    }

    fn parse_if(&mut self) -> Result<Stmt, ParseError> {
        let start = self.start();
        self.bump(); // if
        let cond = self.parse_expr()?;
        self.expect(TokenKind::THEN_KW)?;
        let then_branch = self.parse_stmts(&[TokenKind::ELSE_KW, TokenKind::END_IF_KW])?;
        let else_branch = if self.eat(TokenKind::ELSE_KW) {
            self.parse_stmts(&[TokenKind::END_IF_KW])?
        } else {
            Vec::new()
        };
        self.expect(TokenKind::END_IF_KW)?;
        self.eat(TokenKind::SEMICOLON);
        Ok(Stmt::If(IfStmt {
            cond,
            then_branch,
            else_branch,
            span: self.span_from(start),
        }))
    }

    fn parse_for(&mut self) -> Result<Stmt, ParseError> {
        let start = self.start();
        self.bump(); // for
        let var = Expr::VarRef(self.user_var()?);
        self.expect(TokenKind::EQ)?;
        let from = self.parse_expr()?;
        self.expect(TokenKind::TO_KW)?;
        let to = self.parse_expr()?;
        let step = if self.eat(TokenKind::STEP_KW) {
            Some(self.parse_expr()?)
        } else {
            None
        };
        self.eat(TokenKind::SEMICOLON);
        let body = self.parse_stmts(&[TokenKind::END_FOR_KW])?;
        self.expect(TokenKind::END_FOR_KW)?;
        self.eat(TokenKind::SEMICOLON);
        Ok(Stmt::For(ForStmt {
            var,
            from,
            to,
            step,
            body,
            span: self.span_from(start),
        }))
    }

    fn parse_while(&mut self) -> Result<Stmt, ParseError> {
        let start = self.start();
        self.bump(); // while
        let cond = self.parse_expr()?;
        self.eat(TokenKind::SEMICOLON);
        let body = self.parse_stmts(&[TokenKind::END_WHILE_KW])?;
        self.expect(TokenKind::END_WHILE_KW)?;
        self.eat(TokenKind::SEMICOLON);
        Ok(Stmt::While(WhileStmt {
            cond,
            body,
            span: self.span_from(start),
        }))
    }

    fn parse_repeat(&mut self) -> Result<Stmt, ParseError> {
        let start = self.start();
        self.bump(); // repeat
        let body = self.parse_stmts(&[TokenKind::UNTIL_KW])?;
        self.expect(TokenKind::UNTIL_KW)?;
        let until = self.parse_expr()?;
        self.eat(TokenKind::SEMICOLON);
        Ok(Stmt::Repeat(RepeatStmt {
            body,
            until,
            span: self.span_from(start),
        }))
    }

    fn parse_evaluate(&mut self) -> Result<Stmt, ParseError> {
        let start = self.start();
        self.bump(); // evaluate
        let subject = self.parse_expr()?;
        let mut whens = Vec::new();
        let mut otherwise = Vec::new();
        loop {
            match self.current_kind() {
                TokenKind::WHEN_KW => {
                    let when_start = self.start();
                    self.bump();
                    let op = self.eat_comparison_op();
                    let value = self.parse_expr()?;
                    let body = self.parse_stmts(&[
                        TokenKind::WHEN_KW,
                        TokenKind::WHEN_OTHER_KW,
                        TokenKind::END_EVALUATE_KW,
                    ])?;
                    whens.push(WhenClause {
                        op,
                        value,
                        body,
                        span: self.span_from(when_start),
                    });
                }
                TokenKind::WHEN_OTHER_KW => {
                    self.bump();
                    otherwise =
                        self.parse_stmts(&[TokenKind::END_EVALUATE_KW, TokenKind::WHEN_KW])?;
                }
                TokenKind::END_EVALUATE_KW => break,
                _ => return Err(self.unexpected_here("`When` or `End-Evaluate`")),
            }
        }
        self.expect(TokenKind::END_EVALUATE_KW)?;
        self.eat(TokenKind::SEMICOLON);
        Ok(Stmt::Evaluate(EvaluateStmt {
            subject,
            whens,
            otherwise,
            span: self.span_from(start),
        }))
    }

    fn parse_try(&mut self) -> Result<Stmt, ParseError> {
        let start = self.start();
        self.bump(); // try
        let body = self.parse_stmts(&[TokenKind::CATCH_KW, TokenKind::END_TRY_KW])?;
        let mut catches = Vec::new();
        while self.at(TokenKind::CATCH_KW) {
            let catch_start = self.start();
            self.bump();
            let exc_type = self.parse_type()?;
            let var = self.user_var()?;
            let catch_body = self.parse_stmts(&[TokenKind::CATCH_KW, TokenKind::END_TRY_KW])?;
            catches.push(CatchClause {
                exc_type,
                var,
                body: catch_body,
                span: self.span_from(catch_start),
            });
        }
        self.expect(TokenKind::END_TRY_KW)?;
        self.eat(TokenKind::SEMICOLON);
        Ok(Stmt::Try(TryStmt {
            body,
            catches,
            span: self.span_from(start),
        }))
    }

    fn eat_comparison_op(&mut self) -> Option<BinaryOp> {
        let op = match self.current_kind() {
            TokenKind::EQ => BinaryOp::Eq,
            TokenKind::NOT_EQ => BinaryOp::NotEq,
            TokenKind::LT => BinaryOp::Lt,
            TokenKind::LT_EQ => BinaryOp::LtEq,
            TokenKind::GT => BinaryOp::Gt,
            TokenKind::GT_EQ => BinaryOp::GtEq,
            _ => return None,
        };
        self.bump();
        Some(op)
    }

    // =========================================================================
    // Expressions (precedence climbing, loosest first)
    // =========================================================================

    fn parse_expr(&mut self) -> Result<Expr, ParseError> {
        self.parse_or()
    }

    fn parse_or(&mut self) -> Result<Expr, ParseError> {
        let start = self.start();
        let mut lhs = self.parse_and()?;
        while self.eat(TokenKind::OR_KW) {
            let rhs = self.parse_and()?;
            lhs = binary(BinaryOp::Or, lhs, rhs, self.span_from(start));
        }
        Ok(lhs)
    }

    fn parse_and(&mut self) -> Result<Expr, ParseError> {
        let start = self.start();
        let mut lhs = self.parse_not()?;
        while self.eat(TokenKind::AND_KW) {
            let rhs = self.parse_not()?;
            lhs = binary(BinaryOp::And, lhs, rhs, self.span_from(start));
        }
        Ok(lhs)
    }

    fn parse_not(&mut self) -> Result<Expr, ParseError> {
        if self.at(TokenKind::NOT_KW) {
            let start = self.start();
            self.bump();
            let expr = self.parse_not()?;
            return Ok(Expr::Unary(UnaryExpr {
                op: UnaryOp::Not,
                expr: Box::new(expr),
                span: self.span_from(start),
            }));
        }
        self.parse_cmp()
    }

    /// Comparison parses right-associatively so that the statement level can
    /// peel one `=` off as an assignment: `&a = &b = 2` becomes
    /// `&a = (&b = 2)`, which matches how PeopleCode reads it.
    fn parse_cmp(&mut self) -> Result<Expr, ParseError> {
        let start = self.start();
        let lhs = self.parse_concat()?;
        if let Some(op) = self.eat_comparison_op() {
            let rhs = self.parse_cmp()?;
            return Ok(binary(op, lhs, rhs, self.span_from(start)));
        }
        Ok(lhs)
    }

    fn parse_concat(&mut self) -> Result<Expr, ParseError> {
        let start = self.start();
        let mut lhs = self.parse_add()?;
        while self.eat(TokenKind::PIPE) {
            let rhs = self.parse_add()?;
            lhs = binary(BinaryOp::Concat, lhs, rhs, self.span_from(start));
        }
        Ok(lhs)
    }

    fn parse_add(&mut self) -> Result<Expr, ParseError> {
        let start = self.start();
        let mut lhs = self.parse_mul()?;
        loop {
            let op = match self.current_kind() {
                TokenKind::PLUS => BinaryOp::Add,
                TokenKind::MINUS => BinaryOp::Sub,
                _ => break,
            };
            self.bump();
            let rhs = self.parse_mul()?;
            lhs = binary(op, lhs, rhs, self.span_from(start));
        }
        Ok(lhs)
    }

    fn parse_mul(&mut self) -> Result<Expr, ParseError> {
        let start = self.start();
        let mut lhs = self.parse_exp()?;
        loop {
            let op = match self.current_kind() {
                TokenKind::STAR => BinaryOp::Mul,
                TokenKind::SLASH => BinaryOp::Div,
                _ => break,
            };
            self.bump();
            let rhs = self.parse_exp()?;
            lhs = binary(op, lhs, rhs, self.span_from(start));
        }
        Ok(lhs)
    }

    fn parse_exp(&mut self) -> Result<Expr, ParseError> {
        let start = self.start();
        let lhs = self.parse_unary()?;
        if self.eat(TokenKind::STAR_STAR) {
            let rhs = self.parse_exp()?;
            return Ok(binary(BinaryOp::Exp, lhs, rhs, self.span_from(start)));
        }
        Ok(lhs)
    }

    fn parse_unary(&mut self) -> Result<Expr, ParseError> {
        if self.at(TokenKind::MINUS) {
            let start = self.start();
            self.bump();
            let expr = self.parse_unary()?;
            return Ok(Expr::Unary(UnaryExpr {
                op: UnaryOp::Neg,
                expr: Box::new(expr),
                span: self.span_from(start),
            }));
        }
        self.parse_postfix()
    }

    fn parse_postfix(&mut self) -> Result<Expr, ParseError> {
        let start = self.start();
        let mut expr = self.parse_primary()?;
        loop {
            match self.current_kind() {
                TokenKind::DOT => {
                    self.bump();
                    let name = self.member_name()?;
                    expr = Expr::Member(MemberExpr {
                        base: Box::new(expr),
                        name,
                        span: self.span_from(start),
                    });
                }
                TokenKind::L_PAREN => {
                    self.bump();
                    let args = self.parse_args(TokenKind::R_PAREN)?;
                    expr = Expr::Call(CallExpr {
                        target: Box::new(expr),
                        args,
                        span: self.span_from(start),
                    });
                }
                TokenKind::L_BRACKET => {
                    self.bump();
                    let args = self.parse_args(TokenKind::R_BRACKET)?;
                    expr = Expr::Index(IndexExpr {
                        base: Box::new(expr),
                        args,
                        span: self.span_from(start),
                    });
                }
                _ => break,
            }
        }
        Ok(expr)
    }

    fn parse_args(&mut self, close: TokenKind) -> Result<Vec<Expr>, ParseError> {
        let mut args = Vec::new();
        if !self.at(close) {
            loop {
                args.push(self.parse_expr()?);
                if !self.eat(TokenKind::COMMA) {
                    break;
                }
            }
        }
        self.expect(close)?;
        Ok(args)
    }

    fn parse_primary(&mut self) -> Result<Expr, ParseError> {
        match self.current_kind() {
            TokenKind::NUMBER
            | TokenKind::STRING
            | TokenKind::TRUE_KW
            | TokenKind::FALSE_KW
            | TokenKind::NULL_KW => Ok(Expr::Literal(self.parse_literal()?)),
            TokenKind::USER_VAR => Ok(Expr::VarRef(self.user_var()?)),
            TokenKind::SYSTEM_REF => {
                let token = self.bump().unwrap();
                Ok(Expr::SystemRef(SystemRef {
                    name: Name::new(&token.text[1..]),
                    span: Self::token_span(&token),
                }))
            }
            TokenKind::IDENT => Ok(Expr::NameRef(self.ident()?)),
            TokenKind::CREATE_KW => self.parse_create(),
            TokenKind::L_PAREN => {
                let start = self.start();
                self.bump();
                let inner = self.parse_expr()?;
                self.expect(TokenKind::R_PAREN)?;
                Ok(Expr::Paren(ParenExpr {
                    inner: Box::new(inner),
                    span: self.span_from(start),
                }))
            }
            _ => Err(self.unexpected_here("an expression")),
        }
    }

    fn parse_create(&mut self) -> Result<Expr, ParseError> {
        let start = self.start();
        self.bump(); // create
        let class = self.parse_type()?;
        self.expect(TokenKind::L_PAREN)?;
        let args = self.parse_args(TokenKind::R_PAREN)?;
        Ok(Expr::Create(CreateExpr {
            class,
            args,
            span: self.span_from(start),
        }))
    }

    fn parse_literal(&mut self) -> Result<Literal, ParseError> {
        let start = self.start();
        let negative = self.eat(TokenKind::MINUS);
        let kind = match self.current_kind() {
            TokenKind::NUMBER => LiteralKind::Number,
            TokenKind::STRING => LiteralKind::String,
            TokenKind::TRUE_KW | TokenKind::FALSE_KW => LiteralKind::Boolean,
            TokenKind::NULL_KW => LiteralKind::Null,
            _ => return Err(self.unexpected_here("a literal value")),
        };
        let token = self.bump().unwrap();
        let text = if negative {
            Name::from(format!("-{}", token.text))
        } else {
            Name::new(token.text)
        };
        Ok(Literal {
            kind,
            text,
            span: self.span_from(start),
        })
    }
}

fn binary(op: BinaryOp, lhs: Expr, rhs: Expr, span: Span) -> Expr {
    Expr::Binary(BinaryExpr {
        op,
        lhs: Box::new(lhs),
        rhs: Box::new(rhs),
        span,
    })
}

fn is_array_type_name(text: &str) -> bool {
    let Some(rest) = text
        .get(..5)
        .filter(|head| head.eq_ignore_ascii_case("array"))
        .map(|_| &text[5..])
    else {
        return false;
    };
    rest.is_empty() || (rest.len() == 1 && rest.as_bytes()[0].is_ascii_digit())
}
