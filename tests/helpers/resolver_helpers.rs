//! Setup helpers: parsed fixtures, seeded stores, cursor offsets.

use once_cell::sync::Lazy;
use pcnav::address::ProgramKey;
use pcnav::store::MemoryStore;
use pcnav::syntax::Program;
use pcnav::{ResolutionTarget, TextSize, goto_definition, parse_program};

use super::source_fixtures::{BASE_WIDGET, FUNCLIB_UTILS, PANEL_WIDGET};

/// Byte offset of the first occurrence of `needle` in `source`.
pub fn offset_of(source: &str, needle: &str) -> TextSize {
    let pos = source
        .find(needle)
        .unwrap_or_else(|| panic!("needle {needle:?} not found in source"));
    TextSize::new(pos as u32)
}

/// Parse a fixture, panicking with the parse error on failure.
pub fn parsed(source: &str) -> Program {
    parse_program(source).unwrap_or_else(|err| panic!("fixture does not parse: {err}"))
}

pub fn base_widget_key() -> ProgramKey {
    ProgramKey::app_class(&["ADS", "UI"], "BaseWidget", "OnExecute").unwrap()
}

pub fn panel_widget_key() -> ProgramKey {
    ProgramKey::app_class(&["ADS", "UI"], "PanelWidget", "OnExecute").unwrap()
}

pub fn funclib_key() -> ProgramKey {
    ProgramKey::record_field("FUNCLIB_ADS", "UTIL_FLD", "FieldFormula")
}

static SEEDED: Lazy<MemoryStore> = Lazy::new(|| {
    let store = MemoryStore::new();
    store.insert(base_widget_key(), BASE_WIDGET);
    store.insert(panel_widget_key(), PANEL_WIDGET);
    store.insert(funclib_key(), FUNCLIB_UTILS);
    store
});

/// Store seeded with the widget package and the function library.
pub fn seeded_store() -> &'static MemoryStore {
    &SEEDED
}

/// Resolve the first occurrence of `needle` in `source` with no store.
pub fn resolve_local(source: &str, needle: &str) -> ResolutionTarget {
    let program = parsed(source);
    goto_definition(&program, offset_of(source, needle), None)
}

/// Resolve the first occurrence of `needle` in `source` against the
/// seeded store.
pub fn resolve_seeded(source: &str, needle: &str) -> ResolutionTarget {
    let program = parsed(source);
    goto_definition(&program, offset_of(source, needle), Some(seeded_store()))
}
