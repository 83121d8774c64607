//! Resolution that crosses program boundaries through a store.

use pcnav::address::ProgramKey;
use pcnav::store::{DirStore, MemoryStore};
use pcnav::{ResolutionTarget, goto_definition};

use crate::helpers::resolver_helpers::{
    base_widget_key, funclib_key, offset_of, panel_widget_key, parsed, resolve_seeded,
};
use crate::helpers::source_fixtures::{BASE_WIDGET, FUNCLIB_UTILS, PANEL_WIDGET};

fn remote_parts(target: ResolutionTarget) -> (ProgramKey, pcnav::Span) {
    match target {
        ResolutionTarget::Remote { key, span } => (key, span),
        other => panic!("expected remote target, got {other:?}"),
    }
}

const STATUS_WIDGET: &str = r#"class StatusWidget extends ADS:UI:BaseWidget
   method StatusWidget();
   method Paint();
end-class;

method StatusWidget
   %This.Paint();
   Return;
end-method;

method Paint
   %Super.Paint();
end-method;
"#;

// =============================================================================
// CLASS HIERARCHY WALKS
// =============================================================================

#[test]
fn own_members_win_over_inherited_ones() {
    // Both StatusWidget and BaseWidget define Paint; %This stays local.
    let target = resolve_seeded(STATUS_WIDGET, "Paint();\n   Return");
    match target {
        ResolutionTarget::Local { span } => {
            assert_eq!(span.start(), offset_of(STATUS_WIDGET, "Paint\n   %Super"));
        }
        other => panic!("expected local target, got {other:?}"),
    }
}

#[test]
fn super_skips_the_own_class() {
    let (key, span) = remote_parts(resolve_seeded(STATUS_WIDGET, "Paint();\nend-method"));
    assert_eq!(key, base_widget_key());
    assert_eq!(span.start(), offset_of(BASE_WIDGET, "Paint\n   %This.Resize"));
}

#[test]
fn deep_hits_surface_the_first_hop_key() {
    // Paint lives two levels up, but the reported key is the direct base.
    let source = r#"class TabWidget extends ADS:UI:PanelWidget
   method TabWidget();
end-class;

method TabWidget
   %This.Paint();
end-method;
"#;
    let (key, span) = remote_parts(resolve_seeded(source, "Paint()"));
    assert_eq!(key, panel_widget_key());
    assert_eq!(span.start(), offset_of(BASE_WIDGET, "Paint\n   %This.Resize"));
}

#[test]
fn missing_base_programs_resolve_to_nothing() {
    let source = r#"class OrphanWidget extends ADS:UI:GhostWidget
   method OrphanWidget();
end-class;

method OrphanWidget
   %This.Refresh();
end-method;
"#;
    assert_eq!(resolve_seeded(source, "Refresh()"), ResolutionTarget::Empty);
}

#[test]
fn cyclic_hierarchies_terminate() {
    let alpha = r#"class Alpha extends PKG:Beta
   method Alpha();
end-class;

method Alpha
   %This.Missing();
end-method;
"#;
    let beta = "class Beta extends PKG:Alpha\nend-class;";

    let store = MemoryStore::new();
    store.insert(
        ProgramKey::app_class(&["PKG"], "Alpha", "OnExecute").unwrap(),
        alpha,
    );
    store.insert(
        ProgramKey::app_class(&["PKG"], "Beta", "OnExecute").unwrap(),
        beta,
    );

    let program = parsed(alpha);
    let target = goto_definition(&program, offset_of(alpha, "Missing()"), Some(&store));
    assert_eq!(target, ResolutionTarget::Empty);
}

// =============================================================================
// DECLARED FUNCTIONS
// =============================================================================

#[test]
fn declared_functions_jump_into_their_program() {
    let source = "Declare Function FormatName PeopleCode FUNCLIB_ADS.UTIL_FLD FieldFormula;";
    let (key, span) = remote_parts(resolve_seeded(source, "FormatName"));
    assert_eq!(key, funclib_key());
    assert_eq!(&FUNCLIB_UTILS[span], "FormatName");
}

#[test]
fn unloadable_programs_are_the_one_reported_failure() {
    let source = "Declare Function get_x PeopleCode NO_SUCH_REC.FLD FieldFormula;";
    match resolve_seeded(source, "get_x") {
        ResolutionTarget::Failed { message } => {
            assert!(message.contains("NO_SUCH_REC.FLD.FieldFormula"), "{message}");
        }
        other => panic!("expected failure, got {other:?}"),
    }
}

#[test]
fn a_loaded_program_missing_the_function_resolves_to_nothing() {
    let source = "Declare Function Vanished PeopleCode FUNCLIB_ADS.UTIL_FLD FieldFormula;";
    assert_eq!(resolve_seeded(source, "Vanished"), ResolutionTarget::Empty);
}

// =============================================================================
// TYPED VARIABLE MEMBERS
// =============================================================================

const PANEL_USER: &str = r#"import ADS:UI:PanelWidget;

Local ADS:UI:PanelWidget &panel;

&panel.Dock();
&panel.Paint();
&panel.Label = "on";
&panel.Ghost();
"#;

#[test]
fn typed_members_start_at_the_declared_class() {
    let (key, span) = remote_parts(resolve_seeded(PANEL_USER, "Dock()"));
    assert_eq!(key, panel_widget_key());
    assert_eq!(span.start(), offset_of(PANEL_WIDGET, "Dock\nend-method"));
}

#[test]
fn inherited_members_report_the_defining_walks_first_hop() {
    // Paint comes from the base; the hop key from PanelWidget is the base.
    let (key, span) = remote_parts(resolve_seeded(PANEL_USER, "Paint()"));
    assert_eq!(key, base_widget_key());
    assert_eq!(span.start(), offset_of(BASE_WIDGET, "Paint\n   %This.Resize"));
}

#[test]
fn non_call_members_resolve_as_properties() {
    let (key, span) = remote_parts(resolve_seeded(PANEL_USER, "Label = "));
    assert_eq!(key, base_widget_key());
    assert_eq!(span.start(), offset_of(BASE_WIDGET, "Label get set"));
}

#[test]
fn members_absent_from_the_whole_chain_resolve_to_nothing() {
    assert_eq!(resolve_seeded(PANEL_USER, "Ghost()"), ResolutionTarget::Empty);
}

#[test]
fn bare_type_names_complete_through_imports() {
    let source = r#"import ADS:UI:PanelWidget;

Local PanelWidget &p;

&p.Dock();
"#;
    let (key, span) = remote_parts(resolve_seeded(source, "Dock()"));
    assert_eq!(key, panel_widget_key());
    assert_eq!(span.start(), offset_of(PANEL_WIDGET, "Dock\nend-method"));
}

#[test]
fn members_of_builtin_typed_variables_resolve_to_nothing() {
    let source = "Local string &s;\n&s.Value = 1;";
    assert_eq!(resolve_seeded(source, "Value"), ResolutionTarget::Empty);

    let undeclared = "&nobody.Stuff();";
    assert_eq!(resolve_seeded(undeclared, "Stuff"), ResolutionTarget::Empty);
}

// =============================================================================
// TYPE REFERENCES
// =============================================================================

#[test]
fn type_annotations_jump_to_the_class_header() {
    let source = r#"import ADS:UI:BaseWidget;

Local ADS:UI:BaseWidget &one;
Local BaseWidget &two;

&two = create ADS:UI:BaseWidget();
"#;
    for needle in ["ADS:UI:BaseWidget &one", "BaseWidget &two", "BaseWidget()"] {
        let (key, span) = remote_parts(resolve_seeded(source, needle));
        assert_eq!(key, base_widget_key(), "cursor on {needle:?}");
        assert_eq!(&BASE_WIDGET[span], "BaseWidget");
    }
}

#[test]
fn import_lines_jump_to_the_class_header() {
    let source = "import ADS:UI:BaseWidget;\n";
    let (key, span) = remote_parts(resolve_seeded(source, "ADS:UI:BaseWidget;"));
    assert_eq!(key, base_widget_key());
    assert_eq!(span.start(), offset_of(BASE_WIDGET, "BaseWidget\n"));
}

#[test]
fn extends_clauses_jump_to_the_class_header() {
    let (key, span) = remote_parts(resolve_seeded(STATUS_WIDGET, "ADS:UI:BaseWidget"));
    assert_eq!(key, base_widget_key());
    assert_eq!(&BASE_WIDGET[span], "BaseWidget");
}

#[test]
fn references_to_unfetchable_classes_resolve_to_nothing() {
    let source = "Local ADS:UI:GhostWidget &g;";
    assert_eq!(
        resolve_seeded(source, "ADS:UI:GhostWidget"),
        ResolutionTarget::Empty
    );
}

// =============================================================================
// DIRECTORY STORES
// =============================================================================

#[test]
fn resolution_works_through_an_exported_tree() {
    let dir = tempfile::tempdir().unwrap();
    let class_dir = dir.path().join("ADS").join("UI").join("BaseWidget");
    std::fs::create_dir_all(&class_dir).unwrap();
    std::fs::write(class_dir.join("OnExecute.pcode"), BASE_WIDGET).unwrap();
    let funclib_dir = dir.path().join("FUNCLIB_ADS").join("UTIL_FLD");
    std::fs::create_dir_all(&funclib_dir).unwrap();
    std::fs::write(funclib_dir.join("FieldFormula.pcode"), FUNCLIB_UTILS).unwrap();

    let store = DirStore::new(dir.path());

    let source = r#"Declare Function CheckAccess PeopleCode FUNCLIB_ADS.UTIL_FLD FieldFormula;

Local ADS:UI:BaseWidget &w;
"#;
    let program = parsed(source);

    let target = goto_definition(&program, offset_of(source, "CheckAccess"), Some(&store));
    let (key, span) = remote_parts(target);
    assert_eq!(key, funclib_key());
    assert_eq!(&FUNCLIB_UTILS[span], "CheckAccess");

    let target = goto_definition(
        &program,
        offset_of(source, "ADS:UI:BaseWidget"),
        Some(&store),
    );
    let (key, span) = remote_parts(target);
    assert_eq!(key, base_widget_key());
    assert_eq!(&BASE_WIDGET[span], "BaseWidget");
}
