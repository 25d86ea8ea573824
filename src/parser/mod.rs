//! Parser layer
//! - doc_url.rs: versioned documentation URL parsing and re-targeting
//! - html.rs: in-page anchor scanning with tree-sitter-html
//! - types.rs: Common types (DocumentReference, DocVersion)
//! - error.rs: ParseError and MarkupError

pub mod doc_url;
pub mod error;
pub mod html;
pub mod types;

pub use doc_url::{parse, parse_with_site};
pub use error::{MarkupError, ParseError};
pub use html::contains_anchor;
pub use types::{DocVersion, DocumentReference, InvalidVersion};
