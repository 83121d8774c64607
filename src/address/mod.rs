//! Program addressing
//!
//! Every PeopleCode program hangs off a definition (a record field event, a
//! component record, an application class, ...). A [`ProgramKey`] is the
//! typed address of one program: a [`ProgramCategory`] plus ordered
//! [`Segment`]s ending in the method or event name. Keys come from two
//! places: editor captions ([`ProgramKey::from_caption`]) and resolution
//! rules that synthesize them (`Declare Function` record keys, application
//! class references).
//!
//! This module depends only on [`crate::base`].

mod caption;
mod key;

pub use key::{ProgramCategory, ProgramKey, Segment, SegmentKind};
