//! Structural checks run before an entry is rendered.

use crate::data::Entry;
use crate::error::{DnSyntax, ValidationError};
use crate::escape::{explode_dn, is_keystring, split_rdn};

/// Check an entry's DN, object classes and attributes, in that order.
/// The first failure is returned; the entry is never modified.
pub fn validate(entry: &Entry) -> Result<(), ValidationError> {
    check_dn(&entry.dn())?;

    if entry.object_classes.is_empty() {
        return Err(ValidationError::NoObjectClasses);
    }
    if let Some(oc) = entry.object_classes.iter().find(|oc| !is_keystring(oc)) {
        return Err(ValidationError::InvalidObjectClass { value: oc.clone() });
    }

    for attr in &entry.attributes {
        if !is_keystring(&attr.name) {
            return Err(ValidationError::InvalidAttributeName {
                name: attr.name.clone(),
            });
        }
        if attr.values.is_empty() {
            return Err(ValidationError::EmptyAttribute {
                name: attr.name.clone(),
            });
        }
    }
    Ok(())
}

impl Entry {
    pub fn validate(&self) -> Result<(), ValidationError> {
        validate(self)
    }
}

fn check_dn(dn: &str) -> Result<(), ValidationError> {
    if dn.is_empty() {
        return Err(ValidationError::EmptyDn);
    }
    let invalid = |reason| ValidationError::InvalidDn {
        dn: dn.to_string(),
        reason,
    };
    for rdn in explode_dn(dn).map_err(invalid)? {
        if rdn.is_empty() {
            return Err(invalid(DnSyntax::EmptySegment));
        }
        let (key, value) = split_rdn(rdn).map_err(invalid)?;
        if !is_keystring(key) {
            return Err(invalid(DnSyntax::InvalidKey));
        }
        if value.is_empty() {
            return Err(invalid(DnSyntax::EmptyValue));
        }
    }
    Ok(())
}
