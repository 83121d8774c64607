//! Go-to-definition resolution.
//!
//! [`goto_definition`] walks the whole program once, outer nodes before
//! inner ones. Every rule that recognizes the cursor writes into the same
//! result slot, so a narrower (inner) match overwrites a wider one. Bare
//! function calls cannot be resolved mid-walk because PeopleCode allows a
//! call to precede the function's definition in the same file; those park a
//! pending name in the slot and are resolved against the program's own
//! function list after the walk.

use rustc_hash::FxHashSet;
use tracing::debug;

use crate::address::ProgramKey;
use crate::base::{Name, Span, TextSize};
use crate::scope::ScopeTracker;
use crate::store::{ProgramStore, load_program};
use crate::syntax::{
    AppClass, CallExpr, DeclaredFunction, Expr, Function, Ident, MemberExpr, MethodSig, Param,
    Program, Property, Stmt, SystemRef, TypePath, TypeRef, VariableDecl,
};

use super::hierarchy::{self, find_member};

/// Outcome of one go-to-definition request.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum ResolutionTarget {
    /// The cursor is not on a resolvable construct.
    Empty,
    /// A definition in the same program.
    Local { span: Span },
    /// A definition in another program: its key plus the span inside that
    /// program's source.
    Remote { key: ProgramKey, span: Span },
    /// The cursor was on a resolvable construct but resolution could not
    /// complete; the message names what is missing.
    Failed { message: String },
}

impl ResolutionTarget {
    pub fn is_empty(&self) -> bool {
        matches!(self, ResolutionTarget::Empty)
    }
}

/// Resolve the definition of whatever the cursor at `offset` is on.
///
/// Without a `store`, every rule that would fetch another program degrades:
/// remote function declarations are skipped, hierarchy walks stop at the
/// current program, type references stay unresolved.
pub fn goto_definition(
    program: &Program,
    offset: TextSize,
    store: Option<&dyn ProgramStore>,
) -> ResolutionTarget {
    let mut resolver = DefinitionResolver {
        program,
        offset,
        store,
        scope: ScopeTracker::new(program),
        outcome: Outcome::Unresolved,
    };
    resolver.visit_program();
    resolver.finish()
}

/// The traversal's single result slot.
///
/// `PendingFunction` is the deferred half of bare-call resolution; at most
/// one name can be pending when the walk ends because every write replaces
/// the slot.
enum Outcome {
    Unresolved,
    Hit(ResolutionTarget),
    PendingFunction(Name),
}

struct DefinitionResolver<'a> {
    program: &'a Program,
    offset: TextSize,
    store: Option<&'a dyn ProgramStore>,
    scope: ScopeTracker<'a>,
    outcome: Outcome,
}

impl<'a> DefinitionResolver<'a> {
    fn finish(self) -> ResolutionTarget {
        match self.outcome {
            Outcome::Unresolved => ResolutionTarget::Empty,
            Outcome::Hit(target) => target,
            Outcome::PendingFunction(name) => {
                match self.program.find_defined_function(name.as_str()) {
                    Some(def) => ResolutionTarget::Local {
                        span: def.name.span,
                    },
                    None => ResolutionTarget::Empty,
                }
            }
        }
    }

    fn hit(&self, span: Span) -> bool {
        // A cursor sitting just past a token still belongs to it.
        span.contains_inclusive(self.offset)
    }

    fn emit(&mut self, target: ResolutionTarget) {
        self.outcome = Outcome::Hit(target);
    }

    // =========================================================================
    // Traversal
    // =========================================================================

    fn visit_program(&mut self) {
        let program = self.program;

        for import in &program.imports {
            self.visit_import_path(&import.path, import.wildcard);
        }

        for function in &program.functions {
            match function {
                Function::Declared(decl) => {
                    if self.hit(decl.name.span) {
                        self.resolve_declared_function(decl);
                    }
                }
                Function::Defined(def) => {
                    self.visit_params(&def.params);
                    if let Some(returns) = &def.returns {
                        self.visit_type(returns);
                    }
                    self.visit_stmts(&def.body);
                }
            }
        }

        for decl in &program.variables {
            self.visit_var_decl(decl);
        }

        if let Some(class) = &program.class {
            self.visit_class(class);
        }

        for m in &program.method_impls {
            // Implementation name links back to its header.
            if self.hit(m.name.span) {
                if let Some(sig) = program
                    .class
                    .as_ref()
                    .and_then(|c| c.find_method(m.name.as_str()))
                {
                    self.emit(ResolutionTarget::Local {
                        span: sig.name.span,
                    });
                }
            }
            self.visit_stmts(&m.body);
        }

        for a in &program.accessors {
            // Accessor name links back to its property.
            if self.hit(a.name.span) {
                if let Some(prop) = program
                    .class
                    .as_ref()
                    .and_then(|c| c.find_property(a.name.as_str()))
                {
                    self.emit(ResolutionTarget::Local {
                        span: prop.name.span,
                    });
                }
            }
            self.visit_stmts(&a.body);
        }

        self.visit_stmts(&program.stmts);
    }

    fn visit_class(&mut self, class: &'a AppClass) {
        if let Some(base) = &class.base {
            self.visit_type_path(base);
        }
        if let Some(interface) = &class.interface {
            self.visit_type_path(interface);
        }
        for sig in &class.methods {
            self.visit_method_header(sig);
        }
        for prop in &class.properties {
            self.visit_property(prop);
        }
        for decl in &class.instance_vars {
            self.visit_var_decl(decl);
        }
    }

    fn visit_method_header(&mut self, sig: &'a MethodSig) {
        // Header name links forward to the implementation, when one exists.
        if self.hit(sig.name.span) {
            if let Some(imp) = self.program.find_method_impl(sig.name.as_str()) {
                self.emit(ResolutionTarget::Local {
                    span: imp.name.span,
                });
            }
        }
        self.visit_params(&sig.params);
        if let Some(returns) = &sig.returns {
            self.visit_type(returns);
        }
    }

    fn visit_property(&mut self, prop: &'a Property) {
        // Property name links forward to its accessor implementation.
        if self.hit(prop.name.span) {
            if let Some(accessor) = self.program.find_accessor(prop.name.as_str()) {
                self.emit(ResolutionTarget::Local {
                    span: accessor.name.span,
                });
            }
        }
        self.visit_type(&prop.prop_type);
    }

    fn visit_params(&mut self, params: &'a [Param]) {
        for param in params {
            if let Some(ty) = &param.param_type {
                self.visit_type(ty);
            }
        }
    }

    fn visit_var_decl(&mut self, decl: &'a VariableDecl) {
        self.visit_type(&decl.var_type);
        if let Some(init) = &decl.init {
            self.visit_expr(init);
        }
    }

    fn visit_stmts(&mut self, stmts: &'a [Stmt]) {
        for stmt in stmts {
            self.visit_stmt(stmt);
        }
    }

    fn visit_stmt(&mut self, stmt: &'a Stmt) {
        match stmt {
            Stmt::VarDecl(decl) => self.visit_var_decl(decl),
            Stmt::Assign(s) => {
                self.visit_expr(&s.target);
                self.visit_expr(&s.value);
            }
            Stmt::Expr(e) => self.visit_expr(e),
            Stmt::If(s) => {
                self.visit_expr(&s.cond);
                self.visit_stmts(&s.then_branch);
                self.visit_stmts(&s.else_branch);
            }
            Stmt::For(s) => {
                self.visit_expr(&s.var);
                self.visit_expr(&s.from);
                self.visit_expr(&s.to);
                if let Some(step) = &s.step {
                    self.visit_expr(step);
                }
                self.visit_stmts(&s.body);
            }
            Stmt::While(s) => {
                self.visit_expr(&s.cond);
                self.visit_stmts(&s.body);
            }
            Stmt::Repeat(s) => {
                self.visit_stmts(&s.body);
                self.visit_expr(&s.until);
            }
            Stmt::Evaluate(s) => {
                self.visit_expr(&s.subject);
                for when in &s.whens {
                    self.visit_expr(&when.value);
                    self.visit_stmts(&when.body);
                }
                self.visit_stmts(&s.otherwise);
            }
            Stmt::Try(s) => {
                self.visit_stmts(&s.body);
                for catch in &s.catches {
                    self.visit_type(&catch.exc_type);
                    self.visit_stmts(&catch.body);
                }
            }
            Stmt::Return(s) => {
                if let Some(value) = &s.value {
                    self.visit_expr(value);
                }
            }
            Stmt::Throw(s) => self.visit_expr(&s.value),
            Stmt::Exit(s) => {
                if let Some(value) = &s.value {
                    self.visit_expr(value);
                }
            }
            Stmt::Break(_) | Stmt::Continue(_) => {}
        }
    }

    fn visit_expr(&mut self, expr: &'a Expr) {
        match expr {
            Expr::Literal(_) | Expr::NameRef(_) | Expr::SystemRef(_) => {}
            Expr::VarRef(ident) => {
                if self.hit(ident.span) {
                    self.resolve_var(ident);
                }
            }
            Expr::Member(member) => self.visit_member(member, false),
            Expr::Call(call) => self.visit_call(call),
            Expr::Index(index) => {
                self.visit_expr(&index.base);
                for arg in &index.args {
                    self.visit_expr(arg);
                }
            }
            Expr::Create(create) => {
                self.visit_type(&create.class);
                for arg in &create.args {
                    self.visit_expr(arg);
                }
            }
            Expr::Unary(unary) => self.visit_expr(&unary.expr),
            Expr::Binary(binary) => {
                self.visit_expr(&binary.lhs);
                self.visit_expr(&binary.rhs);
            }
            Expr::Paren(paren) => self.visit_expr(&paren.inner),
        }
    }

    fn visit_call(&mut self, call: &'a CallExpr) {
        match call.target.as_ref() {
            // A bare callee defers to the post-walk function scan.
            Expr::NameRef(ident) => {
                if self.hit(ident.span) {
                    self.outcome = Outcome::PendingFunction(ident.name.clone());
                }
            }
            Expr::Member(member) => self.visit_member(member, true),
            other => self.visit_expr(other),
        }
        for arg in &call.args {
            self.visit_expr(arg);
        }
    }

    fn visit_member(&mut self, member: &'a MemberExpr, is_call_target: bool) {
        self.visit_expr(&member.base);
        if !self.hit(member.name.span) {
            return;
        }
        match member.base.as_ref() {
            Expr::SystemRef(sys) if sys.is_this() || sys.is_super() => {
                self.resolve_class_member(sys, member, is_call_target);
            }
            Expr::VarRef(var) => self.resolve_typed_member(var, member, is_call_target),
            _ => {}
        }
    }

    // =========================================================================
    // Type references
    // =========================================================================

    fn visit_type(&mut self, ty: &'a TypeRef) {
        match ty {
            TypeRef::Named(ident) => {
                if self.hit(ident.span) {
                    if let Some(key) = hierarchy::bare_class_key(self.program, ident.as_str()) {
                        self.resolve_type_key(key);
                    }
                }
            }
            TypeRef::AppClass(path) => self.visit_type_path(path),
            TypeRef::Array { elem, .. } => {
                if let Some(elem) = elem {
                    self.visit_type(elem);
                }
            }
        }
    }

    fn visit_type_path(&mut self, path: &'a TypePath) {
        if !self.hit(path.span) {
            return;
        }
        if let Some(key) = hierarchy::type_path_key(self.program, path) {
            self.resolve_type_key(key);
        }
    }

    fn visit_import_path(&mut self, path: &'a [Ident], wildcard: bool) {
        let (Some(first), Some(last)) = (path.first(), path.last()) else {
            return;
        };
        if wildcard || !self.hit(first.span.cover(last.span)) {
            return;
        }
        let (class, packages) = (last, &path[..path.len() - 1]);
        let packages: Vec<&str> = packages.iter().map(|p| p.as_str()).collect();
        if let Some(key) = ProgramKey::app_class(&packages, class.as_str(), hierarchy::ON_EXECUTE) {
            self.resolve_type_key(key);
        }
    }

    // =========================================================================
    // Rule bodies
    // =========================================================================

    /// `Declare Function name PeopleCode REC.FLD Event;` — the name jumps
    /// into the remote program. The one miss the user is told about is the
    /// remote program failing to load; that points at broken data rather
    /// than a routine "nothing here".
    fn resolve_declared_function(&mut self, decl: &DeclaredFunction) {
        let Some(store) = self.store else {
            // Remote resolution is optional infrastructure.
            return;
        };
        let key = ProgramKey::record_field(
            decl.record.as_str(),
            decl.field.as_str(),
            decl.event.as_str(),
        );
        let target = match load_program(store, &key) {
            Some(target) => target,
            None => {
                self.emit(ResolutionTarget::Failed {
                    message: format!("could not find program {key}"),
                });
                return;
            }
        };
        match target.find_defined_function(decl.name.as_str()) {
            Some(def) => self.emit(ResolutionTarget::Remote {
                key,
                span: def.name.span,
            }),
            None => {
                debug!(
                    "[GOTO] {} loads but does not define {}",
                    key,
                    decl.name.as_str()
                );
                self.emit(ResolutionTarget::Empty);
            }
        }
    }

    /// `&name` resolves against the class's properties first, then the
    /// scope chain. Multi-name declarations resolve to the exact name slot.
    fn resolve_var(&mut self, ident: &Ident) {
        if let Some(class) = &self.program.class {
            if let Some(prop) = class.find_property(ident.as_str()) {
                self.emit(ResolutionTarget::Local {
                    span: prop.name.span,
                });
                return;
            }
        }
        match self.scope.lookup(self.offset, ident.as_str()) {
            Some(binding) => self.emit(ResolutionTarget::Local {
                span: binding.name.span,
            }),
            None => self.emit(ResolutionTarget::Empty),
        }
    }

    /// `%This.Member` / `%Super.Member` — hierarchy walk from the current
    /// class. The member is a method exactly when the access is a call
    /// target; `%Super` skips the current class for the first level.
    fn resolve_class_member(&mut self, sys: &SystemRef, member: &MemberExpr, is_call_target: bool) {
        let Some(class) = &self.program.class else {
            return;
        };
        let mut visited = FxHashSet::default();
        let (key, span) = find_member(
            self.program,
            class,
            member.name.as_str(),
            is_call_target,
            sys.is_super(),
            self.store,
            &mut visited,
        );
        self.emit(match (key, span) {
            (None, Some(span)) => ResolutionTarget::Local { span },
            (Some(key), Some(span)) => ResolutionTarget::Remote { key, span },
            _ => ResolutionTarget::Empty,
        });
    }

    /// `&var.Member` where `&var`'s declared type names an application
    /// class — hierarchy walk starting at that class.
    fn resolve_typed_member(&mut self, var: &Ident, member: &MemberExpr, is_call_target: bool) {
        let Some(binding) = self.scope.lookup(self.offset, var.as_str()) else {
            return;
        };
        let Some(class_key) = binding
            .var_type
            .and_then(|ty| hierarchy::class_key_of_type(self.program, ty))
        else {
            return;
        };
        let Some(store) = self.store else {
            return;
        };

        let Some(target) = load_program(store, &class_key) else {
            self.emit(ResolutionTarget::Empty);
            return;
        };
        let Some(class) = target.class.as_ref() else {
            self.emit(ResolutionTarget::Empty);
            return;
        };
        let mut visited = FxHashSet::default();
        visited.insert(class_key.clone());
        let result = find_member(
            &target,
            class,
            member.name.as_str(),
            is_call_target,
            false,
            Some(store),
            &mut visited,
        );
        self.emit(match result {
            (hop, Some(span)) => ResolutionTarget::Remote {
                key: hop.unwrap_or(class_key),
                span,
            },
            _ => ResolutionTarget::Empty,
        });
    }

    /// A type reference naming an application class jumps to that class's
    /// name token in its own program. Always remote; the class lives in a
    /// different program by construction.
    fn resolve_type_key(&mut self, key: ProgramKey) {
        let loaded = self.store.and_then(|s| load_program(s, &key));
        self.emit(match loaded.as_ref().and_then(|p| p.class.as_ref()) {
            Some(class) => ResolutionTarget::Remote {
                key,
                span: class.name.span,
            },
            None => ResolutionTarget::Empty,
        });
    }
}
