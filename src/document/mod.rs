pub mod char_index;
pub mod document;

pub use crate::types::identifiers::{DocumentId, DocumentVersion};
pub use char_index::CharIndex;
pub use document::{ContractDocument, DocumentError};
