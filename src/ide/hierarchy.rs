//! Class hierarchy walking.
//!
//! Member lookup starts in one class and climbs the `extends`/`implements`
//! chain, fetching and parsing each ancestor's program on demand. Fetch and
//! parse failures never escalate; an inheritance chain that crosses an
//! unavailable program simply ends the search there.

use rustc_hash::FxHashSet;
use tracing::trace;

use crate::address::ProgramKey;
use crate::base::Span;
use crate::store::{ProgramStore, load_program};
use crate::syntax::{AppClass, Import, Program, TypePath, TypeRef};

/// Application class programs hang off the OnExecute event.
pub(crate) const ON_EXECUTE: &str = "OnExecute";

/// Search a class and its ancestors for a member.
///
/// `is_method` picks the list to search (method implementations and headers
/// versus properties); `skip_self` starts the search one level up, which is
/// how `%Super` bypasses the current class. The return value is the span of
/// the member's name token plus the key of the first ancestor that was
/// fetched on the way there: `(None, Some(span))` means the hit is in
/// `class` itself, `(Some(key), Some(span))` means it is in `key`'s program
/// or further up, and `(None, None)` means the search ran out of hierarchy.
///
/// Only the first hop's key is surfaced even when the hit is several
/// ancestors deep; the caller needs one program to open, and resolution
/// inside that program continues the climb transparently.
///
/// `visited` carries every key fetched so far; a repeated key ends the walk
/// as unresolved instead of looping on a cyclic `extends` chain.
pub(crate) fn find_member(
    program: &Program,
    class: &AppClass,
    member: &str,
    is_method: bool,
    skip_self: bool,
    store: Option<&dyn ProgramStore>,
    visited: &mut FxHashSet<ProgramKey>,
) -> (Option<ProgramKey>, Option<Span>) {
    if !skip_self {
        if let Some(span) = find_in_class(program, class, member, is_method) {
            return (None, Some(span));
        }
    }

    let Some(base) = class.base_type() else {
        return (None, None);
    };
    let Some(key) = type_path_key(program, base) else {
        return (None, None);
    };
    let Some(store) = store else {
        return (None, None);
    };
    if !visited.insert(key.clone()) {
        trace!("[HIERARCHY] cycle at {}, stopping", key);
        return (None, None);
    }

    let Some(base_program) = load_program(store, &key) else {
        return (None, None);
    };
    let Some(base_class) = base_program.class.as_ref() else {
        return (None, None);
    };
    match find_member(
        &base_program,
        base_class,
        member,
        is_method,
        false,
        Some(store),
        visited,
    ) {
        (_, Some(span)) => (Some(key), Some(span)),
        _ => (None, None),
    }
}

/// Member search within one class, no hierarchy.
///
/// For methods the out-of-line implementation wins over the header when
/// both exist.
fn find_in_class(
    program: &Program,
    class: &AppClass,
    member: &str,
    is_method: bool,
) -> Option<Span> {
    if is_method {
        if let Some(imp) = program.find_method_impl(member) {
            return Some(imp.name.span);
        }
        class.find_method(member).map(|sig| sig.name.span)
    } else {
        class.find_property(member).map(|prop| prop.name.span)
    }
}

// =============================================================================
// Key construction for class type references
// =============================================================================

/// Program key of an application class named by a type path.
///
/// A single-segment path is a bare class name and is completed through the
/// program's exact imports; wildcard imports cannot complete a name without
/// searching the store, so they do not participate.
pub(crate) fn type_path_key(program: &Program, path: &TypePath) -> Option<ProgramKey> {
    if path.segments.len() == 1 {
        return bare_class_key(program, path.class_ident().as_str());
    }
    let (class, packages) = path.segments.split_last()?;
    let packages: Vec<&str> = packages.iter().map(|p| p.as_str()).collect();
    ProgramKey::app_class(&packages, class.as_str(), ON_EXECUTE)
}

/// Complete a bare class name to a key through the program's imports.
pub(crate) fn bare_class_key(program: &Program, name: &str) -> Option<ProgramKey> {
    let import = program
        .imports
        .iter()
        .find(|i| i.class_ident().is_some_and(|c| c.name.matches(name)))?;
    import_key(import)
}

/// Program key of an exact (non-wildcard) import.
pub(crate) fn import_key(import: &Import) -> Option<ProgramKey> {
    if import.wildcard {
        return None;
    }
    let (class, packages) = import.path.split_last()?;
    let packages: Vec<&str> = packages.iter().map(|p| p.as_str()).collect();
    ProgramKey::app_class(&packages, class.as_str(), ON_EXECUTE)
}

/// Program key of the application class a declared type names, if any.
pub(crate) fn class_key_of_type(program: &Program, ty: &TypeRef) -> Option<ProgramKey> {
    match ty {
        TypeRef::Named(ident) => bare_class_key(program, ident.as_str()),
        TypeRef::AppClass(path) => type_path_key(program, path),
        TypeRef::Array { .. } => None,
    }
}
