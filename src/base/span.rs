/// Source positions are raw byte offsets into program text.
///
/// Cursor positions arrive as byte offsets and resolution targets carry
/// byte ranges; line/column conversion is the host editor's concern.
pub use text_size::{TextRange, TextSize};

/// A byte range in program source text.
pub type Span = TextRange;
