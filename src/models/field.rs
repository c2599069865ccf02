use indexmap::IndexMap;

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct FieldValue {
    pub value: String,
    pub id: String,
}

/// A custom field and the options Jira allows for it.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct FieldDefinition {
    pub name: String,
    /// Technical key, e.g. `customfield_10100`.
    pub id: String,
    pub values: Vec<FieldValue>,
}

/// Custom fields keyed by display name, in the order they were first seen.
///
/// Only the first definition for a given name is ever kept; see
/// [`FieldCatalog::insert_if_absent`].
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct FieldCatalog {
    fields: IndexMap<String, FieldDefinition>,
}

impl FieldCatalog {
    pub fn new() -> Self {
        Self::default()
    }

    /// Adds `field` unless a field with the same name is already present.
    /// Returns whether it was inserted.
    pub fn insert_if_absent(&mut self, field: FieldDefinition) -> bool {
        if self.fields.contains_key(&field.name) {
            return false;
        }
        self.fields.insert(field.name.clone(), field);
        true
    }

    pub fn get_by_name(&self, name: &str) -> Option<&FieldDefinition> {
        self.fields.get(name)
    }

    /// Linear scan, the catalog is keyed by name.
    pub fn find_by_id(&self, id: &str) -> Option<&FieldDefinition> {
        self.fields.values().find(|field| field.id == id)
    }

    pub fn iter(&self) -> impl Iterator<Item = &FieldDefinition> {
        self.fields.values()
    }

    pub fn len(&self) -> usize {
        self.fields.len()
    }

    pub fn is_empty(&self) -> bool {
        self.fields.is_empty()
    }
}
