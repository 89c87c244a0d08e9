//! JSON projection of entries: `[{ "dn", "objectClass", "attributes" }]`.
//!
//! This is not LDIF; it exposes the same data for callers that want JSON.
//! Entries are not validated.

use serde::ser::{SerializeMap, SerializeStruct};
use serde::{Serialize, Serializer};

use crate::data::{Attribute, Entry};
use crate::error::Result;

struct JsonEntry<'a>(&'a Entry);

struct JsonAttributes<'a>(&'a [Attribute]);

impl Serialize for JsonEntry<'_> {
    fn serialize<S: Serializer>(&self, serializer: S) -> std::result::Result<S::Ok, S::Error> {
        let mut s = serializer.serialize_struct("Entry", 3)?;
        s.serialize_field("dn", &self.0.dn())?;
        s.serialize_field("objectClass", &self.0.object_classes)?;
        s.serialize_field("attributes", &JsonAttributes(&self.0.attributes))?;
        s.end()
    }
}

// Keeps insertion order, which a serde_json::Map would not.
impl Serialize for JsonAttributes<'_> {
    fn serialize<S: Serializer>(&self, serializer: S) -> std::result::Result<S::Ok, S::Error> {
        let mut map = serializer.serialize_map(Some(self.0.len()))?;
        for attr in self.0 {
            map.serialize_entry(&attr.name, &attr.values)?;
        }
        map.end()
    }
}

/// Pretty-printed JSON array of the entries, in input order.
pub fn to_json(entries: &[Entry]) -> Result<String> {
    let projected: Vec<JsonEntry<'_>> = entries.iter().map(JsonEntry).collect();
    Ok(serde_json::to_string_pretty(&projected)?)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn person_projection() {
        let p = Entry::person("jdoe", "dc=x", "John Doe", "Doe", vec![]);
        let out = to_json(&[p]).unwrap();
        let v: serde_json::Value = serde_json::from_str(&out).unwrap();
        assert_eq!(v[0]["dn"], "uid=jdoe,dc=x");
        assert_eq!(v[0]["objectClass"][3], "inetOrgPerson");
        assert_eq!(v[0]["attributes"]["cn"][0], "John Doe");
        assert_eq!(v[0]["attributes"]["sn"][0], "Doe");
    }

    #[test]
    fn attribute_order_preserved() {
        let mut e = Entry::new("cn=a", "", vec!["top".into()]);
        e.add_attribute("zeta", "1");
        e.add_attribute("alpha", "2");
        let out = to_json(&[e]).unwrap();
        assert!(out.find("\"zeta\"").unwrap() < out.find("\"alpha\"").unwrap());
    }

    #[test]
    fn empty_list() {
        assert_eq!(to_json(&[]).unwrap(), "[]");
    }

    #[test]
    fn invalid_entries_still_project() {
        let e = Entry::new("invalid", "", vec![]);
        let v: serde_json::Value = serde_json::from_str(&to_json(&[e]).unwrap()).unwrap();
        assert_eq!(v[0]["dn"], "invalid");
        assert_eq!(v[0]["objectClass"], serde_json::json!([]));
    }
}
