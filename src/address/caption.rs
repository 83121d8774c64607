//! Caption parsing.
//!
//! The editor titles every program window `"<dotted.path> (<Category
//! Label>)"`. The label picks the grammar and the segment count picks the
//! shape within it, so the same label can produce different categories
//! (`Component PeopleCode` covers component, component record, and component
//! record field events).

use tracing::debug;

use super::key::{ProgramCategory, ProgramKey, SegmentKind};

impl ProgramKey {
    /// Parse an editor caption into a key.
    ///
    /// Returns `None` for an unknown label, a segment count that matches no
    /// shape for the label, or an empty segment. Failures are logged at
    /// debug level and never escalate; a caption that does not parse simply
    /// has no navigable programs behind it.
    pub fn from_caption(caption: &str) -> Option<ProgramKey> {
        let trimmed = caption.trim();
        let Some(stripped) = trimmed.strip_suffix(')') else {
            debug!("[CAPTION] missing label suffix: {:?}", trimmed);
            return None;
        };
        let Some((path, label)) = stripped.rsplit_once(" (") else {
            debug!("[CAPTION] missing label suffix: {:?}", trimmed);
            return None;
        };

        let values: Vec<&str> = path.split('.').collect();
        if values.iter().any(|v| v.is_empty()) {
            debug!("[CAPTION] empty segment in path: {:?}", path);
            return None;
        }

        let Some((category, kinds)) = shape_for(label, values.len()) else {
            debug!(
                "[CAPTION] no shape for label {:?} with {} segments",
                label,
                values.len()
            );
            return None;
        };
        Some(ProgramKey::from_parts(category, kinds, values))
    }
}

/// The segment shape for a caption label at a given segment count.
fn shape_for(label: &str, arity: usize) -> Option<(ProgramCategory, Vec<SegmentKind>)> {
    use SegmentKind::*;

    if label.eq_ignore_ascii_case("Record PeopleCode") {
        match arity {
            3 => Some((ProgramCategory::RecordField, vec![Record, Field, Method])),
            _ => None,
        }
    } else if label.eq_ignore_ascii_case("Component PeopleCode") {
        match arity {
            3 => Some((
                ProgramCategory::Component,
                vec![Component, Market, Method],
            )),
            4 => Some((
                ProgramCategory::ComponentRecord,
                vec![Component, Market, Record, Method],
            )),
            5 => Some((
                ProgramCategory::ComponentRecordField,
                vec![Component, Market, Record, Field, Method],
            )),
            _ => None,
        }
    } else if label.eq_ignore_ascii_case("Page PeopleCode") {
        match arity {
            2 => Some((ProgramCategory::Page, vec![Page, Method])),
            _ => None,
        }
    } else if label.eq_ignore_ascii_case("Menu PeopleCode") {
        match arity {
            4 => Some((
                ProgramCategory::Menu,
                vec![Menu, BarName, ItemName, Method],
            )),
            _ => None,
        }
    } else if label.eq_ignore_ascii_case("Message PeopleCode") {
        match arity {
            2 => Some((ProgramCategory::Message, vec![Message, Method])),
            _ => None,
        }
    } else if label.eq_ignore_ascii_case("Component Interface PeopleCode") {
        match arity {
            2 => Some((
                ProgramCategory::ComponentInterface,
                vec![ComponentInterface, Method],
            )),
            _ => None,
        }
    } else if label.eq_ignore_ascii_case("App Engine Program PeopleCode") {
        match arity {
            7 => Some((
                ProgramCategory::AppEngine,
                vec![
                    AeApplicationId,
                    AeSection,
                    Market,
                    DbType,
                    EffDt,
                    AeStep,
                    Method,
                ],
            )),
            _ => None,
        }
    } else if label.eq_ignore_ascii_case("Application Package PeopleCode") {
        // One to three package levels, then the class, then the method.
        match arity {
            3..=5 => {
                let mut kinds = vec![AppPackage1];
                if arity >= 4 {
                    kinds.push(AppPackage2);
                }
                if arity == 5 {
                    kinds.push(AppPackage3);
                }
                kinds.push(AppClass);
                kinds.push(Method);
                Some((ProgramCategory::AppClass, kinds))
            }
            _ => None,
        }
    } else {
        None
    }
}
