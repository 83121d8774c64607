//! AST node types for the PeopleCode subset.
//!
//! Nodes are plain owned structs and closed enums so that consumers match
//! exhaustively; adding a node kind is a compile-time event for every
//! traversal in the crate. Every node carries the byte [`Span`] it covers,
//! and every name token is an [`Ident`] pairing the case-insensitive
//! [`Name`] with the span of just that token.

use crate::base::{Name, Span};

// ============================================================================
// Leaves
// ============================================================================

/// A name token: the identifier text plus the span of the token itself.
///
/// For sigil variables (`&emplid`) the stored name excludes the `&` while
/// the span covers the whole token.
#[derive(Debug, Clone)]
pub struct Ident {
    pub name: Name,
    pub span: Span,
}

impl Ident {
    pub fn new(name: impl Into<Name>, span: Span) -> Self {
        Ident {
            name: name.into(),
            span,
        }
    }

    pub fn as_str(&self) -> &str {
        self.name.as_str()
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LiteralKind {
    Number,
    String,
    Boolean,
    Null,
}

#[derive(Debug, Clone)]
pub struct Literal {
    pub kind: LiteralKind,
    /// Raw source text, quotes included for strings.
    pub text: Name,
    pub span: Span,
}

// ============================================================================
// Types
// ============================================================================

/// A colon-separated application package path, e.g. `ADS:Relation:BaseUI`.
///
/// The last segment is the class name; the leading segments (at most three)
/// are package levels.
#[derive(Debug, Clone)]
pub struct TypePath {
    pub segments: Vec<Ident>,
    pub span: Span,
}

impl TypePath {
    /// The class name segment (always the last one).
    pub fn class_ident(&self) -> &Ident {
        // Parser guarantees at least one segment.
        self.segments.last().unwrap()
    }

    /// The package-level segments preceding the class name.
    pub fn package_idents(&self) -> &[Ident] {
        &self.segments[..self.segments.len() - 1]
    }

    pub fn as_dotted(&self) -> String {
        self.segments
            .iter()
            .map(|s| s.as_str())
            .collect::<Vec<_>>()
            .join(":")
    }
}

/// A type annotation.
#[derive(Debug, Clone)]
pub enum TypeRef {
    /// A builtin or unqualified name: `string`, `Rowset`, or an imported
    /// class referenced by bare name.
    Named(Ident),
    /// A fully qualified application class path.
    AppClass(TypePath),
    /// `array`, `array of string`, `array of array of number`, ...
    Array {
        elem: Option<Box<TypeRef>>,
        span: Span,
    },
}

impl TypeRef {
    pub fn span(&self) -> Span {
        match self {
            TypeRef::Named(ident) => ident.span,
            TypeRef::AppClass(path) => path.span,
            TypeRef::Array { span, .. } => *span,
        }
    }
}

// ============================================================================
// Program
// ============================================================================

/// A parsed PeopleCode program.
///
/// Field lists keep declaration order; a program is either an application
/// class/interface program (`class` is set, statements live in method and
/// accessor bodies) or an event program (top-level `stmts`).
#[derive(Debug, Clone)]
pub struct Program {
    pub imports: Vec<Import>,
    pub class: Option<AppClass>,
    pub functions: Vec<Function>,
    /// Program-level variable declarations (Global, Component, Local).
    pub variables: Vec<VariableDecl>,
    pub constants: Vec<ConstantDecl>,
    pub method_impls: Vec<MethodImpl>,
    pub accessors: Vec<AccessorImpl>,
    /// Top-level statements of an event program.
    pub stmts: Vec<Stmt>,
    pub span: Span,
}

impl Program {
    /// Case-insensitive lookup among functions defined in this program.
    pub fn find_defined_function(&self, name: &str) -> Option<&FunctionDef> {
        self.functions.iter().find_map(|f| match f {
            Function::Defined(def) if def.name.name.matches(name) => Some(def),
            _ => None,
        })
    }

    pub fn find_method_impl(&self, name: &str) -> Option<&MethodImpl> {
        self.method_impls
            .iter()
            .find(|m| m.name.name.matches(name))
    }

    pub fn find_accessor(&self, name: &str) -> Option<&AccessorImpl> {
        self.accessors.iter().find(|a| a.name.name.matches(name))
    }
}

/// `import PKG:SUB:Class;` or `import PKG:SUB:*;`
#[derive(Debug, Clone)]
pub struct Import {
    pub path: Vec<Ident>,
    pub wildcard: bool,
    pub span: Span,
}

impl Import {
    /// The imported class name, when this is an exact (non-wildcard) import.
    pub fn class_ident(&self) -> Option<&Ident> {
        if self.wildcard {
            None
        } else {
            self.path.last()
        }
    }
}

// ============================================================================
// Application classes
// ============================================================================

/// `class … end-class` or `interface … end-interface` declaration.
#[derive(Debug, Clone)]
pub struct AppClass {
    pub name: Ident,
    pub is_interface: bool,
    /// `extends` clause.
    pub base: Option<TypePath>,
    /// `implements` clause.
    pub interface: Option<TypePath>,
    pub methods: Vec<MethodSig>,
    pub properties: Vec<Property>,
    pub instance_vars: Vec<VariableDecl>,
    pub constants: Vec<ConstantDecl>,
    pub span: Span,
}

impl AppClass {
    /// The single hierarchy edge: the extended class, or the implemented
    /// interface when there is no `extends` clause.
    pub fn base_type(&self) -> Option<&TypePath> {
        self.base.as_ref().or(self.interface.as_ref())
    }

    pub fn find_method(&self, name: &str) -> Option<&MethodSig> {
        self.methods.iter().find(|m| m.name.name.matches(name))
    }

    pub fn find_property(&self, name: &str) -> Option<&Property> {
        self.properties.iter().find(|p| p.name.name.matches(name))
    }
}

/// A method header inside the class declaration block.
#[derive(Debug, Clone)]
pub struct MethodSig {
    pub name: Ident,
    pub params: Vec<Param>,
    pub returns: Option<TypeRef>,
    pub is_abstract: bool,
    pub span: Span,
}

/// `property string Label get set;`
#[derive(Debug, Clone)]
pub struct Property {
    pub name: Ident,
    pub prop_type: TypeRef,
    pub has_get: bool,
    pub has_set: bool,
    pub is_readonly: bool,
    pub is_abstract: bool,
    pub span: Span,
}

/// An out-of-line method body: `method Name … end-method;`
#[derive(Debug, Clone)]
pub struct MethodImpl {
    pub name: Ident,
    pub body: Vec<Stmt>,
    pub span: Span,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AccessorKind {
    Get,
    Set,
}

/// A property accessor body: `get Name … end-get;` / `set Name … end-set;`
#[derive(Debug, Clone)]
pub struct AccessorImpl {
    pub kind: AccessorKind,
    pub name: Ident,
    pub body: Vec<Stmt>,
    pub span: Span,
}

// ============================================================================
// Functions
// ============================================================================

#[derive(Debug, Clone)]
pub enum Function {
    /// `Declare Function name PeopleCode RECORD.FIELD Event;` — a forward
    /// declaration bound to a function defined in another program.
    Declared(DeclaredFunction),
    /// A function defined in this program.
    Defined(FunctionDef),
}

impl Function {
    pub fn name(&self) -> &Ident {
        match self {
            Function::Declared(d) => &d.name,
            Function::Defined(d) => &d.name,
        }
    }
}

#[derive(Debug, Clone)]
pub struct DeclaredFunction {
    pub name: Ident,
    pub record: Ident,
    pub field: Ident,
    pub event: Ident,
    pub span: Span,
}

#[derive(Debug, Clone)]
pub struct FunctionDef {
    pub name: Ident,
    pub params: Vec<Param>,
    pub returns: Option<TypeRef>,
    pub body: Vec<Stmt>,
    pub span: Span,
}

#[derive(Debug, Clone)]
pub struct Param {
    pub name: Ident,
    pub param_type: Option<TypeRef>,
    pub is_out: bool,
    pub span: Span,
}

// ============================================================================
// Declarations
// ============================================================================

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum VarScope {
    Global,
    Component,
    Local,
    Instance,
}

/// A variable declaration, possibly declaring several names at once:
/// `Local string &a, &b;` or `Local number &n = 1;`
#[derive(Debug, Clone)]
pub struct VariableDecl {
    pub scope: VarScope,
    pub var_type: TypeRef,
    pub names: Vec<Ident>,
    pub init: Option<Expr>,
    pub span: Span,
}

/// `Constant &MAX_ROWS = 100;`
#[derive(Debug, Clone)]
pub struct ConstantDecl {
    pub name: Ident,
    pub value: Literal,
    pub span: Span,
}

// ============================================================================
// Statements
// ============================================================================

#[derive(Debug, Clone)]
pub enum Stmt {
    VarDecl(VariableDecl),
    Assign(AssignStmt),
    Expr(Expr),
    If(IfStmt),
    For(ForStmt),
    While(WhileStmt),
    Repeat(RepeatStmt),
    Evaluate(EvaluateStmt),
    Try(TryStmt),
    Return(ReturnStmt),
    Throw(ThrowStmt),
    Break(Span),
    Continue(Span),
    Exit(ExitStmt),
}

impl Stmt {
    pub fn span(&self) -> Span {
        match self {
            Stmt::VarDecl(decl) => decl.span,
            Stmt::Assign(s) => s.span,
            Stmt::Expr(e) => e.span(),
            Stmt::If(s) => s.span,
            Stmt::For(s) => s.span,
            Stmt::While(s) => s.span,
            Stmt::Repeat(s) => s.span,
            Stmt::Evaluate(s) => s.span,
            Stmt::Try(s) => s.span,
            Stmt::Return(s) => s.span,
            Stmt::Throw(s) => s.span,
            Stmt::Break(span) | Stmt::Continue(span) => *span,
            Stmt::Exit(s) => s.span,
        }
    }
}

#[derive(Debug, Clone)]
pub struct AssignStmt {
    pub target: Expr,
    pub value: Expr,
    pub span: Span,
}

#[derive(Debug, Clone)]
pub struct IfStmt {
    pub cond: Expr,
    pub then_branch: Vec<Stmt>,
    pub else_branch: Vec<Stmt>,
    pub span: Span,
}

#[derive(Debug, Clone)]
pub struct ForStmt {
    /// The loop control variable, an `&var` reference.
    pub var: Expr,
    pub from: Expr,
    pub to: Expr,
    pub step: Option<Expr>,
    pub body: Vec<Stmt>,
    pub span: Span,
}

#[derive(Debug, Clone)]
pub struct WhileStmt {
    pub cond: Expr,
    pub body: Vec<Stmt>,
    pub span: Span,
}

#[derive(Debug, Clone)]
pub struct RepeatStmt {
    pub body: Vec<Stmt>,
    pub until: Expr,
    pub span: Span,
}

#[derive(Debug, Clone)]
pub struct EvaluateStmt {
    pub subject: Expr,
    pub whens: Vec<WhenClause>,
    pub otherwise: Vec<Stmt>,
    pub span: Span,
}

#[derive(Debug, Clone)]
pub struct WhenClause {
    pub op: Option<BinaryOp>,
    pub value: Expr,
    pub body: Vec<Stmt>,
    pub span: Span,
}

#[derive(Debug, Clone)]
pub struct TryStmt {
    pub body: Vec<Stmt>,
    pub catches: Vec<CatchClause>,
    pub span: Span,
}

#[derive(Debug, Clone)]
pub struct CatchClause {
    pub exc_type: TypeRef,
    pub var: Ident,
    pub body: Vec<Stmt>,
    pub span: Span,
}

#[derive(Debug, Clone)]
pub struct ReturnStmt {
    pub value: Option<Expr>,
    pub span: Span,
}

#[derive(Debug, Clone)]
pub struct ThrowStmt {
    pub value: Expr,
    pub span: Span,
}

#[derive(Debug, Clone)]
pub struct ExitStmt {
    pub value: Option<Expr>,
    pub span: Span,
}

// ============================================================================
// Expressions
// ============================================================================

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum UnaryOp {
    Neg,
    Not,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BinaryOp {
    Or,
    And,
    Eq,
    NotEq,
    Lt,
    LtEq,
    Gt,
    GtEq,
    Concat,
    Add,
    Sub,
    Mul,
    Div,
    Exp,
}

#[derive(Debug, Clone)]
pub enum Expr {
    Literal(Literal),
    /// `&var` — a sigil-prefixed user variable reference.
    VarRef(Ident),
    /// A bare identifier: a function name in call position, a record or
    /// field reference, a builtin.
    NameRef(Ident),
    /// `%This`, `%Super`, `%UserId`, … — stored without the `%`.
    SystemRef(SystemRef),
    Member(MemberExpr),
    Call(CallExpr),
    Index(IndexExpr),
    Create(CreateExpr),
    Unary(UnaryExpr),
    Binary(BinaryExpr),
    Paren(ParenExpr),
}

impl Expr {
    pub fn span(&self) -> Span {
        match self {
            Expr::Literal(lit) => lit.span,
            Expr::VarRef(ident) | Expr::NameRef(ident) => ident.span,
            Expr::SystemRef(sys) => sys.span,
            Expr::Member(m) => m.span,
            Expr::Call(c) => c.span,
            Expr::Index(i) => i.span,
            Expr::Create(c) => c.span,
            Expr::Unary(u) => u.span,
            Expr::Binary(b) => b.span,
            Expr::Paren(p) => p.span,
        }
    }
}

#[derive(Debug, Clone)]
pub struct SystemRef {
    pub name: Name,
    pub span: Span,
}

impl SystemRef {
    pub fn is_this(&self) -> bool {
        self.name.matches("This")
    }

    pub fn is_super(&self) -> bool {
        self.name.matches("Super")
    }
}

/// `base.Member`
#[derive(Debug, Clone)]
pub struct MemberExpr {
    pub base: Box<Expr>,
    pub name: Ident,
    pub span: Span,
}

/// `target(args…)`
#[derive(Debug, Clone)]
pub struct CallExpr {
    pub target: Box<Expr>,
    pub args: Vec<Expr>,
    pub span: Span,
}

/// `base[index…]`
#[derive(Debug, Clone)]
pub struct IndexExpr {
    pub base: Box<Expr>,
    pub args: Vec<Expr>,
    pub span: Span,
}

/// `create PKG:Class(args…)`
#[derive(Debug, Clone)]
pub struct CreateExpr {
    pub class: TypeRef,
    pub args: Vec<Expr>,
    pub span: Span,
}

#[derive(Debug, Clone)]
pub struct UnaryExpr {
    pub op: UnaryOp,
    pub expr: Box<Expr>,
    pub span: Span,
}

#[derive(Debug, Clone)]
pub struct BinaryExpr {
    pub op: BinaryOp,
    pub lhs: Box<Expr>,
    pub rhs: Box<Expr>,
    pub span: Span,
}

#[derive(Debug, Clone)]
pub struct ParenExpr {
    pub inner: Box<Expr>,
    pub span: Span,
}
