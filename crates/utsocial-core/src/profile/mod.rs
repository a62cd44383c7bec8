//! Profile editing module.
//!
//! - `draft`: `ProfileDraft`, the uncommitted copy of the editable fields
//! - `editor`: `ProfileEditor`, begin / commit / discard against the session

mod draft;
mod editor;

pub use draft::ProfileDraft;
pub use editor::ProfileEditor;
