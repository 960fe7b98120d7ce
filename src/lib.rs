//! figtrim - shrink design exports for plugin import
//!
//! figtrim drops oversized assets, surplus design tokens, deep element
//! subtrees and editor metadata from a design-tool JSON export until it fits a
//! size budget.

mod assets;
mod document;
mod error;
mod parse;
mod policy;
mod serialize;
mod size;
mod tokens;
mod tree;

pub use assets::*;
pub use document::*;
pub use error::*;
pub use parse::*;
pub use policy::*;
pub use serialize::*;
pub use size::*;
pub use tokens::*;
pub use tree::*;

/// Compress a JSON export with the default policy.
pub fn compress_str_default(json: &str) -> Result<(String, CompressionReport), FigtrimError> {
    compress_str(json, &Policy::default())
}

/// Compress a JSON export with a custom policy.
pub fn compress_str(
    json: &str,
    policy: &Policy,
) -> Result<(String, CompressionReport), FigtrimError> {
    let doc = parse_document(json)?;
    let Compressed { document, report } = compress(doc, policy)?;
    Ok((serialize(&document)?, report))
}
