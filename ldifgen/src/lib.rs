//! LDAP entry model and LDIF writer.
//!
//! Entries are built with [`Entry::person`], [`Entry::group`],
//! [`Entry::organizational_unit`] or [`Entry::new`], checked by
//! [`validate`] and rendered by [`generate`] / [`generate_batch`].
//! RDN values are escaped per RFC 4514 when an entry is built; attribute
//! values are base64-encoded at render time when RFC 2849 requires it.

pub mod data;
pub mod error;
pub mod escape;
#[cfg(feature = "json")]
pub mod json;
pub mod ldif;
pub mod validate;

pub use data::{Attribute, Entry};
pub use error::{DnSyntax, LdifError, Result, ValidationError};
pub use escape::escape_dn_value;
#[cfg(feature = "json")]
pub use json::to_json;
pub use ldif::{encode_value, generate, generate_batch, is_safe_string, write_batch, write_entry};
pub use validate::validate;
