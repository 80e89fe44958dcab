//! Data models representing stored documents and API request/response types.
//!
//! Documents keep a few typed fields that the service filters and sorts on;
//! everything else the client sends is carried verbatim in a free-form map.

use serde_json::{Map, Value};

/// Blog post documents
pub mod blog;
/// Comment documents
pub mod comment;
/// Results of store write operations
pub mod result;
/// Wishlist entry documents
pub mod wishlist;

/// Free-form document fields, kept verbatim.
pub type Fields = Map<String, Value>;

/// Key under which documents expose their store-assigned identifier.
pub const ID_KEY: &str = "_id";

/// Drop keys the client may not set among free-form fields.
pub(crate) fn strip_reserved(fields: &mut Fields, reserved: &[&str]) {
    for key in reserved {
        fields.remove(*key);
    }
}
