//! Variable scope tracking
//!
//! PeopleCode has a flat two-level scope model. A program scope holds the
//! program-level variable declarations, the class's instance variables, and
//! constants. When a position falls inside a function, method, getter, or
//! setter body, that callable contributes an inner scope holding its
//! parameters and every variable declared in the body (declarations are
//! callable-scoped, not block-scoped).
//!
//! A [`ScopeTracker`] borrows the program and is rebuilt for each
//! resolution call; nothing here is cached or shared.

use crate::base::TextSize;
use crate::syntax::{
    AccessorImpl, Function, FunctionDef, Ident, MethodImpl, Program, Stmt, TypeRef, VarScope,
    VariableDecl,
};

/// What kind of declaration a binding came from.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum BindingKind {
    Parameter,
    Local,
    ProgramVar,
    Instance,
    Constant,
}

/// One name visible at a position.
///
/// Multi-name declarations (`Local string &a, &b;`) yield one binding per
/// name slot, each pointing at its own token.
#[derive(Clone, Copy, Debug)]
pub struct Binding<'a> {
    pub name: &'a Ident,
    pub kind: BindingKind,
    /// The declared type, when the declaration carries one.
    pub var_type: Option<&'a TypeRef>,
}

/// Scope lookup over one parsed program.
pub struct ScopeTracker<'a> {
    program: &'a Program,
}

impl<'a> ScopeTracker<'a> {
    pub fn new(program: &'a Program) -> Self {
        ScopeTracker { program }
    }

    /// All bindings visible at `offset`, innermost scope first.
    pub fn bindings_at(&self, offset: TextSize) -> Vec<Binding<'a>> {
        let mut bindings = Vec::new();
        self.push_callable_scope(offset, &mut bindings);
        self.push_program_scope(&mut bindings);
        bindings
    }

    /// The innermost binding for `name` visible at `offset`.
    pub fn lookup(&self, offset: TextSize, name: &str) -> Option<Binding<'a>> {
        self.bindings_at(offset)
            .into_iter()
            .find(|b| b.name.name.matches(name))
    }

    fn push_callable_scope(&self, offset: TextSize, out: &mut Vec<Binding<'a>>) {
        let program = self.program;
        if let Some(def) = program.functions.iter().find_map(|f| match f {
            Function::Defined(def) if def.span.contains(offset) => Some(def),
            _ => None,
        }) {
            self.push_function_scope(def, out);
            return;
        }
        if let Some(m) = program
            .method_impls
            .iter()
            .find(|m| m.span.contains(offset))
        {
            self.push_method_scope(m, out);
            return;
        }
        if let Some(a) = program.accessors.iter().find(|a| a.span.contains(offset)) {
            self.push_accessor_scope(a, out);
        }
    }

    fn push_function_scope(&self, def: &'a FunctionDef, out: &mut Vec<Binding<'a>>) {
        for param in &def.params {
            out.push(Binding {
                name: &param.name,
                kind: BindingKind::Parameter,
                var_type: param.param_type.as_ref(),
            });
        }
        collect_body_bindings(&def.body, out);
    }

    fn push_method_scope(&self, m: &'a MethodImpl, out: &mut Vec<Binding<'a>>) {
        // Method parameters live on the header in the class declaration;
        // the implementation block does not restate them.
        if let Some(class) = &self.program.class {
            if let Some(sig) = class.find_method(m.name.as_str()) {
                for param in &sig.params {
                    out.push(Binding {
                        name: &param.name,
                        kind: BindingKind::Parameter,
                        var_type: param.param_type.as_ref(),
                    });
                }
            }
        }
        collect_body_bindings(&m.body, out);
    }

    fn push_accessor_scope(&self, a: &'a AccessorImpl, out: &mut Vec<Binding<'a>>) {
        collect_body_bindings(&a.body, out);
    }

    fn push_program_scope(&self, out: &mut Vec<Binding<'a>>) {
        let program = self.program;
        for decl in &program.variables {
            push_decl_bindings(decl, out);
        }
        if let Some(class) = &program.class {
            for decl in &class.instance_vars {
                push_decl_bindings(decl, out);
            }
            for constant in &class.constants {
                out.push(Binding {
                    name: &constant.name,
                    kind: BindingKind::Constant,
                    var_type: None,
                });
            }
        }
        for constant in &program.constants {
            out.push(Binding {
                name: &constant.name,
                kind: BindingKind::Constant,
                var_type: None,
            });
        }
    }
}

fn push_decl_bindings<'a>(decl: &'a VariableDecl, out: &mut Vec<Binding<'a>>) {
    let kind = match decl.scope {
        VarScope::Local => BindingKind::Local,
        VarScope::Global | VarScope::Component => BindingKind::ProgramVar,
        VarScope::Instance => BindingKind::Instance,
    };
    for name in &decl.names {
        out.push(Binding {
            name,
            kind,
            var_type: Some(&decl.var_type),
        });
    }
}

/// Collect every declaration in a callable body, nested blocks included.
fn collect_body_bindings<'a>(stmts: &'a [Stmt], out: &mut Vec<Binding<'a>>) {
    for stmt in stmts {
        match stmt {
            Stmt::VarDecl(decl) => push_decl_bindings(decl, out),
            Stmt::If(s) => {
                collect_body_bindings(&s.then_branch, out);
                collect_body_bindings(&s.else_branch, out);
            }
            Stmt::For(s) => collect_body_bindings(&s.body, out),
            Stmt::While(s) => collect_body_bindings(&s.body, out),
            Stmt::Repeat(s) => collect_body_bindings(&s.body, out),
            Stmt::Evaluate(s) => {
                for when in &s.whens {
                    collect_body_bindings(&when.body, out);
                }
                collect_body_bindings(&s.otherwise, out);
            }
            Stmt::Try(s) => {
                collect_body_bindings(&s.body, out);
                for catch in &s.catches {
                    out.push(Binding {
                        name: &catch.var,
                        kind: BindingKind::Local,
                        var_type: Some(&catch.exc_type),
                    });
                    collect_body_bindings(&catch.body, out);
                }
            }
            Stmt::Assign(_)
            | Stmt::Expr(_)
            | Stmt::Return(_)
            | Stmt::Throw(_)
            | Stmt::Break(_)
            | Stmt::Continue(_)
            | Stmt::Exit(_) => {}
        }
    }
}
