//! Which bindings are visible where.

use pcnav::scope::{BindingKind, ScopeTracker};
use pcnav::syntax::TypeRef;

use crate::helpers::resolver_helpers::{offset_of, parsed};
use crate::helpers::source_fixtures::{BASE_WIDGET, FUNCLIB_UTILS};

#[test]
fn parameters_are_scoped_to_their_function() {
    let program = parsed(FUNCLIB_UTILS);
    let scope = ScopeTracker::new(&program);

    let inside_format = offset_of(FUNCLIB_UTILS, "&last | ");
    let binding = scope.lookup(inside_format, "first").expect("param in scope");
    assert_eq!(binding.kind, BindingKind::Parameter);

    // CheckAccess cannot see FormatName's parameters.
    let inside_check = offset_of(FUNCLIB_UTILS, "&oprid = ");
    assert!(scope.lookup(inside_check, "first").is_none());
    assert!(scope.lookup(inside_check, "oprid").is_some());
}

#[test]
fn method_impl_sees_header_parameters_and_instance_vars() {
    let program = parsed(BASE_WIDGET);
    let scope = ScopeTracker::new(&program);

    let inside_resize = offset_of(BASE_WIDGET, "&width = &w;");
    let param = scope.lookup(inside_resize, "w").expect("header param");
    assert_eq!(param.kind, BindingKind::Parameter);
    assert!(matches!(param.var_type, Some(TypeRef::Named(_))));

    let field = scope.lookup(inside_resize, "width").expect("instance var");
    assert_eq!(field.kind, BindingKind::Instance);
}

#[test]
fn multi_name_declarations_bind_each_slot() {
    let program = parsed(BASE_WIDGET);
    let scope = ScopeTracker::new(&program);

    let anywhere = offset_of(BASE_WIDGET, "%This.Resize");
    let second = scope.lookup(anywhere, "height").expect("second name slot");
    assert_eq!(second.name.span.start(), offset_of(BASE_WIDGET, "&height;"));
}

#[test]
fn accessor_bodies_see_program_scope() {
    let program = parsed(BASE_WIDGET);
    let scope = ScopeTracker::new(&program);

    let inside_get = offset_of(BASE_WIDGET, "\"base\"");
    assert!(scope.lookup(inside_get, "width").is_some());
    assert!(scope.lookup(inside_get, "height").is_some());
}

#[test]
fn innermost_declaration_shadows_program_scope() {
    let source = r#"
Global string &tag;

Function Stamp()
   Local string &tag;
   &tag = "inner";
End-Function;

&tag = "outer";
"#;
    let program = parsed(source);
    let scope = ScopeTracker::new(&program);

    let inner = offset_of(source, "\"inner\"");
    let binding = scope.lookup(inner, "tag").unwrap();
    assert_eq!(binding.kind, BindingKind::Local);
    assert_eq!(
        binding.name.span.start(),
        offset_of(source, "&tag;\n   &tag")
    );

    let outer = offset_of(source, "\"outer\"");
    let binding = scope.lookup(outer, "tag").unwrap();
    assert_eq!(binding.kind, BindingKind::ProgramVar);
    assert_eq!(binding.name.span.start(), offset_of(source, "&tag;\n\nFunction"));
}

#[test]
fn catch_variables_bind_inside_the_callable() {
    let source = r#"
Function Guard()
   try
      Exit;
   catch Exception &err
      &err = Null;
   end-try;
End-Function;
"#;
    let program = parsed(source);
    let scope = ScopeTracker::new(&program);

    let inside_catch = offset_of(source, "&err = ");
    let binding = scope.lookup(inside_catch, "err").expect("catch var");
    assert_eq!(binding.kind, BindingKind::Local);
    assert!(matches!(binding.var_type, Some(TypeRef::Named(_))));
}

#[test]
fn lookup_is_case_insensitive() {
    let program = parsed(BASE_WIDGET);
    let scope = ScopeTracker::new(&program);

    let inside_resize = offset_of(BASE_WIDGET, "&width = &w;");
    assert!(scope.lookup(inside_resize, "WIDTH").is_some());
    assert!(scope.lookup(inside_resize, "Width").is_some());
}
