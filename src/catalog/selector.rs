use crate::catalog::extractor::CUSTOM_FIELD_PREFIX;
use crate::errors::{FieldsError, Result};
use crate::models::field::{FieldCatalog, FieldDefinition};

/// What the caller asked to see from the catalog.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FieldSelector {
    All,
    ByName(String),
    /// Always holds a normalized `customfield_` ID.
    ById(String),
}

impl FieldSelector {
    /// Builds a selector from the `-n` / `-i` flags.
    ///
    /// Empty values count as absent. Runs before any credentials or network
    /// work so bad flags fail fast.
    pub fn from_args(name: Option<&str>, id: Option<&str>) -> Result<Self> {
        let name = name.filter(|n| !n.is_empty());
        let id = id.filter(|i| !i.is_empty());

        match (name, id) {
            (Some(_), Some(_)) => Err(FieldsError::InvalidSelection),
            (Some(name), None) => Ok(FieldSelector::ByName(name.to_string())),
            (None, Some(id)) => Ok(FieldSelector::ById(normalize_field_id(id)?)),
            (None, None) => Ok(FieldSelector::All),
        }
    }

    /// Resolves the selector against `catalog`.
    ///
    /// `All` returns every field in catalog order, possibly none.
    pub fn select<'a>(&self, catalog: &'a FieldCatalog) -> Result<Vec<&'a FieldDefinition>> {
        match self {
            FieldSelector::All => Ok(catalog.iter().collect()),
            FieldSelector::ByName(name) => catalog
                .get_by_name(name)
                .map(|field| vec![field])
                .ok_or_else(|| FieldsError::FieldNameNotFound(name.clone())),
            FieldSelector::ById(id) => catalog
                .find_by_id(id)
                .map(|field| vec![field])
                .ok_or_else(|| FieldsError::FieldIdNotFound(id.clone())),
        }
    }
}

/// Accepts either `customfield_<n>` (returned unchanged) or a bare `<n>`.
pub fn normalize_field_id(raw: &str) -> Result<String> {
    if raw.starts_with(CUSTOM_FIELD_PREFIX) {
        return Ok(raw.to_string());
    }

    if raw.is_empty() || !raw.bytes().all(|b| b.is_ascii_digit()) {
        return Err(FieldsError::InvalidFieldId(raw.to_string()));
    }

    Ok(format!("{}{}", CUSTOM_FIELD_PREFIX, raw))
}
