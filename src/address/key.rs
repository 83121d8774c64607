//! Typed program keys.

use std::fmt;

use crate::base::Name;

/// The kind of one key segment.
///
/// Knowing what a segment *is* (a record name, a market code, an effective
/// date) is what lets a store map keys to storage without re-guessing the
/// caption grammar.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum SegmentKind {
    Record,
    Field,
    /// The trailing method or event name; every key ends with one.
    Method,
    Component,
    Market,
    Page,
    Menu,
    BarName,
    ItemName,
    Message,
    ComponentInterface,
    AeApplicationId,
    AeSection,
    DbType,
    EffDt,
    AeStep,
    AppPackage1,
    AppPackage2,
    AppPackage3,
    AppClass,
}

/// One typed segment of a program key.
#[derive(Clone, Debug, PartialEq, Eq, Hash)]
pub struct Segment {
    pub kind: SegmentKind,
    pub value: Name,
}

impl Segment {
    pub fn new(kind: SegmentKind, value: impl Into<Name>) -> Self {
        Segment {
            kind,
            value: value.into(),
        }
    }
}

/// The definition category a key addresses.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum ProgramCategory {
    /// Record field event, e.g. `PSOPRDEFN.OPRID.FieldChange`.
    RecordField,
    /// Component-level event.
    Component,
    /// Component record event.
    ComponentRecord,
    /// Component record field event.
    ComponentRecordField,
    /// Page activate program.
    Page,
    /// Application class (one program per class).
    AppClass,
    /// Application Engine step action.
    AppEngine,
    /// Menu item program.
    Menu,
    /// Message subscription program.
    Message,
    /// Component interface program.
    ComponentInterface,
}

impl ProgramCategory {
    /// The parenthesized label the editor puts after the dotted path.
    pub fn caption_label(&self) -> &'static str {
        match self {
            ProgramCategory::RecordField => "Record PeopleCode",
            ProgramCategory::Component
            | ProgramCategory::ComponentRecord
            | ProgramCategory::ComponentRecordField => "Component PeopleCode",
            ProgramCategory::Page => "Page PeopleCode",
            ProgramCategory::AppClass => "Application Package PeopleCode",
            ProgramCategory::AppEngine => "App Engine Program PeopleCode",
            ProgramCategory::Menu => "Menu PeopleCode",
            ProgramCategory::Message => "Message PeopleCode",
            ProgramCategory::ComponentInterface => "Component Interface PeopleCode",
        }
    }
}

/// The address of one PeopleCode program.
///
/// A key is a category plus an ordered list of typed segments, always ending
/// in the method (or event) name. Keys are immutable once built; the
/// constructors and the caption parser are the only ways to make one, and
/// both keep the segment list in the category's shape. Comparison and
/// hashing are case-insensitive through [`Name`].
#[derive(Clone, Debug, PartialEq, Eq, Hash)]
pub struct ProgramKey {
    category: ProgramCategory,
    segments: Vec<Segment>,
}

impl ProgramKey {
    /// Key of a record event program: `RECORD.FIELD.Event`.
    pub fn record_field(
        record: impl Into<Name>,
        field: impl Into<Name>,
        event: impl Into<Name>,
    ) -> Self {
        ProgramKey {
            category: ProgramCategory::RecordField,
            segments: vec![
                Segment::new(SegmentKind::Record, record),
                Segment::new(SegmentKind::Field, field),
                Segment::new(SegmentKind::Method, event),
            ],
        }
    }

    /// Key of an application class program.
    ///
    /// `packages` holds the one to three package levels above the class;
    /// anything outside that range is not addressable and yields `None`.
    pub fn app_class(packages: &[&str], class: &str, method: &str) -> Option<Self> {
        const PACKAGE_KINDS: [SegmentKind; 3] = [
            SegmentKind::AppPackage1,
            SegmentKind::AppPackage2,
            SegmentKind::AppPackage3,
        ];
        if packages.is_empty() || packages.len() > PACKAGE_KINDS.len() {
            return None;
        }
        let mut segments = Vec::with_capacity(packages.len() + 2);
        for (kind, value) in PACKAGE_KINDS.iter().zip(packages) {
            segments.push(Segment::new(*kind, *value));
        }
        segments.push(Segment::new(SegmentKind::AppClass, class));
        segments.push(Segment::new(SegmentKind::Method, method));
        Some(ProgramKey {
            category: ProgramCategory::AppClass,
            segments,
        })
    }

    pub(super) fn from_parts(
        category: ProgramCategory,
        kinds: Vec<SegmentKind>,
        values: Vec<&str>,
    ) -> Self {
        let segments = kinds
            .into_iter()
            .zip(values)
            .map(|(kind, value)| Segment::new(kind, value))
            .collect();
        ProgramKey { category, segments }
    }

    pub fn category(&self) -> ProgramCategory {
        self.category
    }

    pub fn segments(&self) -> &[Segment] {
        &self.segments
    }

    /// The trailing method (or event) name.
    pub fn method_name(&self) -> &Name {
        // Constructors guarantee the trailing method segment.
        &self.segments.last().unwrap().value
    }

    /// The class name of an application class key.
    pub fn class_name(&self) -> Option<&Name> {
        self.segments
            .iter()
            .find(|s| s.kind == SegmentKind::AppClass)
            .map(|s| &s.value)
    }

    /// The editor caption for this key: `"<dotted path> (<label>)"`.
    pub fn caption(&self) -> String {
        format!("{} ({})", self, self.category.caption_label())
    }
}

impl fmt::Display for ProgramKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for (i, segment) in self.segments.iter().enumerate() {
            if i > 0 {
                f.write_str(".")?;
            }
            write!(f, "{}", segment.value)?;
        }
        Ok(())
    }
}
