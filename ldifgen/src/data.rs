use crate::escape::escape_dn_value;

const PERSON_CLASSES: &[&str] = &["top", "person", "organizationalPerson", "inetOrgPerson"];
const GROUP_CLASSES: &[&str] = &["top", "groupOfNames"];
const OU_CLASSES: &[&str] = &["top", "organizationalUnit"];

/// A directory entry: an RDN below a parent DN, its object classes and an
/// ordered attribute map.
#[derive(Debug, Clone)]
pub struct Entry {
    /// Already-escaped `attr=value` component.
    pub rdn: String,
    /// Pre-escaped parent DN; empty for a root entry.
    pub parent_dn: String,
    pub object_classes: Vec<String>,
    pub attributes: Vec<Attribute>,
}

/// An attribute: a name with its values in insertion order.
#[derive(Debug, Clone)]
pub struct Attribute {
    pub name: String,
    pub values: Vec<String>,
}

impl Entry {
    pub fn new(
        rdn: impl Into<String>,
        parent_dn: impl Into<String>,
        object_classes: Vec<String>,
    ) -> Entry {
        Entry {
            rdn: rdn.into(),
            parent_dn: parent_dn.into(),
            object_classes,
            attributes: Vec::new(),
        }
    }

    pub fn with_attributes(
        rdn: impl Into<String>,
        parent_dn: impl Into<String>,
        object_classes: Vec<String>,
        attributes: Vec<Attribute>,
    ) -> Entry {
        Entry {
            attributes,
            ..Entry::new(rdn, parent_dn, object_classes)
        }
    }

    /// An inetOrgPerson named by `uid`.
    pub fn person(uid: &str, parent_dn: &str, cn: &str, sn: &str, extra: Vec<Attribute>) -> Entry {
        let mut entry = Entry::with_attributes(
            format!("uid={}", escape_dn_value(uid)),
            parent_dn,
            classes(PERSON_CLASSES),
            vec![
                Attribute::with_values("uid", vec![uid.to_string()]),
                Attribute::with_values("cn", vec![cn.to_string()]),
                Attribute::with_values("sn", vec![sn.to_string()]),
            ],
        );
        entry.merge_attributes(extra);
        entry
    }

    /// A groupOfNames named by `cn`. Without members the `member`
    /// attribute is left out.
    pub fn group(cn: &str, parent_dn: &str, members: Vec<String>, extra: Vec<Attribute>) -> Entry {
        let mut attributes = vec![Attribute::with_values("cn", vec![cn.to_string()])];
        if !members.is_empty() {
            attributes.push(Attribute::with_values("member", members));
        }
        let mut entry = Entry::with_attributes(
            format!("cn={}", escape_dn_value(cn)),
            parent_dn,
            classes(GROUP_CLASSES),
            attributes,
        );
        entry.merge_attributes(extra);
        entry
    }

    /// An organizationalUnit named by `ou`.
    pub fn organizational_unit(name: &str, parent_dn: &str, extra: Vec<Attribute>) -> Entry {
        let mut entry = Entry::with_attributes(
            format!("ou={}", escape_dn_value(name)),
            parent_dn,
            classes(OU_CLASSES),
            vec![Attribute::with_values("ou", vec![name.to_string()])],
        );
        entry.merge_attributes(extra);
        entry
    }

    /// The full DN: the RDN, followed by the parent DN if there is one.
    pub fn dn(&self) -> String {
        if self.parent_dn.is_empty() {
            self.rdn.clone()
        } else {
            format!("{},{}", self.rdn, self.parent_dn)
        }
    }

    /// Find an attribute by name.
    /// If `create` is true and the attribute doesn't exist, create it.
    pub fn find_attribute(&mut self, name: &str, create: bool) -> Option<&mut Attribute> {
        let pos = self.attributes.iter().position(|a| a.name == name);
        match pos {
            Some(i) => Some(&mut self.attributes[i]),
            None if create => {
                self.attributes.push(Attribute::new(name.to_string()));
                self.attributes.last_mut()
            }
            None => None,
        }
    }

    /// Find an attribute by name (immutable).
    pub fn get_attribute(&self, name: &str) -> Option<&Attribute> {
        self.attributes.iter().find(|a| a.name == name)
    }

    /// Append a value, creating the attribute if absent.
    pub fn add_attribute(&mut self, name: &str, value: impl Into<String>) {
        if let Some(attr) = self.find_attribute(name, true) {
            attr.values.push(value.into());
        }
    }

    /// Merge `extra` into the attribute map in the given order. Values for
    /// a name already present are appended, never replaced.
    pub fn merge_attributes(&mut self, extra: Vec<Attribute>) {
        for Attribute { name, values } in extra {
            if let Some(attr) = self.find_attribute(&name, true) {
                attr.values.extend(values);
            }
        }
    }
}

impl PartialEq for Entry {
    fn eq(&self, other: &Self) -> bool {
        self.dn() == other.dn()
    }
}

impl Eq for Entry {}

impl PartialOrd for Entry {
    fn partial_cmp(&self, other: &Self) -> Option<std::cmp::Ordering> {
        Some(self.cmp(other))
    }
}

impl Ord for Entry {
    fn cmp(&self, other: &Self) -> std::cmp::Ordering {
        self.dn().cmp(&other.dn())
    }
}

impl Attribute {
    pub fn new(name: String) -> Attribute {
        Attribute {
            name,
            values: Vec::new(),
        }
    }

    pub fn with_values(name: impl Into<String>, values: Vec<String>) -> Attribute {
        Attribute {
            name: name.into(),
            values,
        }
    }
}

fn classes(names: &[&str]) -> Vec<String> {
    names.iter().map(|s| s.to_string()).collect()
}
