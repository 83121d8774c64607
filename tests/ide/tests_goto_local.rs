//! Resolution inside a single program, no store attached.

use pcnav::{ResolutionTarget, Span};

use crate::helpers::resolver_helpers::{offset_of, resolve_local};

fn local_span(target: ResolutionTarget) -> Span {
    match target {
        ResolutionTarget::Local { span } => span,
        other => panic!("expected local target, got {other:?}"),
    }
}

// =============================================================================
// POSITIONS OUTSIDE EVERY RULE
// =============================================================================

#[test]
fn literals_keywords_and_whitespace_resolve_to_nothing() {
    let source = r#"
Local number &n = 42;

If &n > 10 Then
   &n = 0;
End-If;
"#;
    for needle in ["42", "If ", "Then", "10", "End-If"] {
        assert_eq!(
            resolve_local(source, needle),
            ResolutionTarget::Empty,
            "cursor on {needle:?}"
        );
    }
}

#[test]
fn comment_interiors_resolve_to_nothing() {
    let source = "/* scratch note */\nLocal number &n;\nrem trailing note;\n";
    assert_eq!(resolve_local(source, "scratch"), ResolutionTarget::Empty);
    assert_eq!(resolve_local(source, "trailing"), ResolutionTarget::Empty);
}

// =============================================================================
// SIGIL VARIABLES
// =============================================================================

#[test]
fn use_resolves_to_the_exact_name_slot() {
    let source = "Local string &a, &b;\n&b = \"x\";";
    let span = local_span(resolve_local(source, "&b = "));
    assert_eq!(span.start(), offset_of(source, "&b;"));
    assert_eq!(&source[span], "&b");
}

#[test]
fn loop_variables_resolve_like_any_other_use() {
    let source = r#"
Local number &i;

For &i = 1 To 3
   Warn("", &i);
End-For;
"#;
    let span = local_span(resolve_local(source, "&i = 1"));
    assert_eq!(span.start(), offset_of(source, "&i;"));
}

#[test]
fn undeclared_variables_resolve_to_nothing() {
    assert_eq!(resolve_local("&ghost = 1;", "&ghost"), ResolutionTarget::Empty);
}

// =============================================================================
// BARE FUNCTION CALLS
// =============================================================================

#[test]
fn calls_resolve_forward_to_later_definitions() {
    let source = r#"
Stamp("x");

Function Stamp(&tag As string)
End-Function;
"#;
    let span = local_span(resolve_local(source, "Stamp(\"x\")"));
    assert_eq!(span.start(), offset_of(source, "Stamp(&tag"));
}

#[test]
fn calls_to_unknown_functions_resolve_to_nothing() {
    assert_eq!(
        resolve_local("DoWork(1, 2);", "DoWork"),
        ResolutionTarget::Empty
    );
}

#[test]
fn calls_to_declared_functions_are_not_local_matches() {
    // The declare line names a remote program; the call itself only ever
    // scans functions defined in this file.
    let source = r#"
Declare Function get_role PeopleCode FUNCLIB_SEC.ROLE_FLD FieldFormula;

get_role();
"#;
    assert_eq!(resolve_local(source, "get_role()"), ResolutionTarget::Empty);
    // And without a store the declare line itself is skipped.
    assert_eq!(
        resolve_local(source, "get_role PeopleCode"),
        ResolutionTarget::Empty
    );
}

// =============================================================================
// HEADER / IMPLEMENTATION LINKS
// =============================================================================

#[test]
fn method_header_and_impl_point_at_each_other() {
    let source = r#"
class Task
   method Run();
   method Cancel() abstract;
end-class;

method Run
end-method;
"#;
    let from_header = local_span(resolve_local(source, "Run();"));
    assert_eq!(from_header.start(), offset_of(source, "Run\nend-method"));

    let from_impl = local_span(resolve_local(source, "Run\nend-method"));
    assert_eq!(from_impl.start(), offset_of(source, "Run();"));

    // Abstract methods have no implementation to jump to.
    assert_eq!(resolve_local(source, "Cancel()"), ResolutionTarget::Empty);
}

#[test]
fn property_and_accessor_point_at_each_other() {
    let source = r#"
class Counter
   property number Value get;
   property number Cap;
private
   instance number &count;
end-class;

get Value
   Return &count;
end-get;
"#;
    let from_decl = local_span(resolve_local(source, "Value get;"));
    assert_eq!(from_decl.start(), offset_of(source, "Value\n   Return"));

    let from_accessor = local_span(resolve_local(source, "Value\n   Return"));
    assert_eq!(from_accessor.start(), offset_of(source, "Value get;"));

    // No accessor, nothing to jump to.
    assert_eq!(resolve_local(source, "Cap;"), ResolutionTarget::Empty);
}

// =============================================================================
// CLASS MEMBER ACCESS WITHOUT A STORE
// =============================================================================

#[test]
fn this_members_resolve_against_the_own_class() {
    let source = r#"
class Counter
   method Bump();
   method Reset();
   property number Value get;
private
   instance number &count;
end-class;

method Bump
   &count = &count + 1;
end-method;

method Reset
   %This.Bump();
   &count = %This.Value;
end-method;

get Value
   Return &count;
end-get;
"#;
    // Method call: jumps to the implementation.
    let span = local_span(resolve_local(source, "Bump();\n   &count"));
    assert_eq!(span.start(), offset_of(source, "Bump\n   &count"));

    // Non-call access: treated as a property.
    let span = local_span(resolve_local(source, "Value;\nend-method"));
    assert_eq!(span.start(), offset_of(source, "Value get;"));

    // Unknown member, no base class to continue into.
    assert_eq!(
        resolve_local("class Lone\nend-class;\n\nmethod Go\n   %This.Missing();\nend-method;", "Missing"),
        ResolutionTarget::Empty
    );
}

#[test]
fn non_property_sigils_use_the_scope_chain() {
    let source = r#"
class Holder
   property string Tag get set;
private
   instance string &backing;
end-class;

get Tag
   Return &backing;
end-get;

set Tag
   &backing = &NewValue;
end-set;
"#;
    // &backing is an instance variable, not a property: scope chain.
    let span = local_span(resolve_local(source, "&backing;\nend-get"));
    assert_eq!(span.start(), offset_of(source, "&backing;\nend-class"));
}

#[test]
fn remote_rules_degrade_without_a_store() {
    let source = r#"
import ADS:UI:BaseWidget;

class StatusWidget extends ADS:UI:BaseWidget
   method StatusWidget();
end-class;

method StatusWidget
   %Super.Paint();
end-method;
"#;
    // Hierarchy walk stops at the current program.
    assert_eq!(resolve_local(source, "Paint()"), ResolutionTarget::Empty);
    // Type references cannot fetch their class.
    assert_eq!(
        resolve_local(source, "ADS:UI:BaseWidget\n"),
        ResolutionTarget::Empty
    );
}
