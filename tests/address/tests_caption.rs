//! Caption-to-key behavior over full editor captions.

use pcnav::address::{ProgramCategory, ProgramKey, SegmentKind};
use rstest::rstest;

fn shape(key: &ProgramKey) -> Vec<(SegmentKind, &str)> {
    key.segments()
        .iter()
        .map(|s| (s.kind, s.value.as_str()))
        .collect()
}

// =============================================================================
// SHAPES
// =============================================================================

#[test]
fn record_caption_yields_record_field_method() {
    let key = ProgramKey::from_caption("PSOPRDEFN.USERIDALIAS.SaveEdit (Record PeopleCode)")
        .expect("caption should parse");
    assert_eq!(key.category(), ProgramCategory::RecordField);
    assert_eq!(
        shape(&key),
        [
            (SegmentKind::Record, "PSOPRDEFN"),
            (SegmentKind::Field, "USERIDALIAS"),
            (SegmentKind::Method, "SaveEdit"),
        ]
    );
}

#[test]
fn app_package_caption_with_one_package_level() {
    let key = ProgramKey::from_caption("ADS.Common.OnExecute (Application Package PeopleCode)")
        .expect("caption should parse");
    assert_eq!(
        shape(&key),
        [
            (SegmentKind::AppPackage1, "ADS"),
            (SegmentKind::AppClass, "Common"),
            (SegmentKind::Method, "OnExecute"),
        ]
    );
}

#[test]
fn app_package_caption_with_two_package_levels() {
    let key =
        ProgramKey::from_caption("ADS.Relation.CriteriaUI.OnExecute (Application Package PeopleCode)")
            .expect("caption should parse");
    assert_eq!(
        shape(&key),
        [
            (SegmentKind::AppPackage1, "ADS"),
            (SegmentKind::AppPackage2, "Relation"),
            (SegmentKind::AppClass, "CriteriaUI"),
            (SegmentKind::Method, "OnExecute"),
        ]
    );
    assert_eq!(key.class_name().map(|n| n.as_str()), Some("CriteriaUI"));
    assert_eq!(key.method_name().as_str(), "OnExecute");
}

#[test]
fn arity_mismatch_is_rejected() {
    assert_eq!(
        ProgramKey::from_caption("A.B.C.D (Record PeopleCode)"),
        None
    );
}

// =============================================================================
// ROUND TRIPS
// =============================================================================

#[rstest]
#[case("PSOPRDEFN.USERIDALIAS.SaveEdit (Record PeopleCode)")]
#[case("USERMAINT.GBL.PSOPRDEFN.OPRID.FieldChange (Component PeopleCode)")]
#[case("ROLEMAINT.USE.ROLE_GENERAL.ItemSelected (Menu PeopleCode)")]
#[case("ADS.Relation.UI.CriteriaUI.OnExecute (Application Package PeopleCode)")]
fn captions_round_trip_through_display(#[case] caption: &str) {
    let key = ProgramKey::from_caption(caption).expect("caption should parse");
    assert_eq!(key.caption(), caption);
    // The dotted path alone is the Display form.
    let dotted = caption.split(" (").next().unwrap();
    assert_eq!(key.to_string(), dotted);
}

#[test]
fn keys_compare_case_insensitively() {
    let upper = ProgramKey::record_field("FUNCLIB", "FLD", "FieldFormula");
    let lower = ProgramKey::record_field("funclib", "fld", "fieldformula");
    assert_eq!(upper, lower);
}
