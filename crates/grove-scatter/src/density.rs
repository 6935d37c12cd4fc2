//! Per-category instance counts.

use std::collections::BTreeMap;

use crate::Category;

/// Why a density configuration was rejected.
#[derive(Debug, thiserror::Error)]
pub enum DensityError {
    /// The document is not valid JSON.
    #[error("invalid density configuration: {0}")]
    Json(#[from] serde_json::Error),

    /// The document is valid JSON but not an object.
    #[error("invalid density configuration: expected an object of category counts")]
    NotAnObject,

    /// A key names no known category.
    #[error("invalid density configuration: unknown category `{0}`")]
    UnknownCategory(String),

    /// A count is negative, fractional, or not a number.
    #[error("invalid density configuration: bad count for {category}: {value}")]
    InvalidCount { category: Category, value: String },
}

/// Requested instance count per category. Missing categories count as zero.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct DensityConfig {
    counts: BTreeMap<Category, u32>,
}

impl Default for DensityConfig {
    fn default() -> Self {
        Self::from_counts([
            (Category::Tree, 25),
            (Category::Bush, 10),
            (Category::Grass, 500),
            (Category::Rock, 5),
            (Category::Sand, 0),
        ])
    }
}

impl DensityConfig {
    /// Build from already-validated counts.
    pub fn from_counts(counts: impl IntoIterator<Item = (Category, u32)>) -> Self {
        Self {
            counts: counts.into_iter().collect(),
        }
    }

    /// Parse a JSON object such as `{"tree": 10, "rock": 5}`.
    ///
    /// The whole document is rejected if any key or value is invalid.
    ///
    /// # Errors
    ///
    /// Returns a [`DensityError`] describing the first problem found.
    pub fn try_from_json(json: &str) -> Result<Self, DensityError> {
        let value: serde_json::Value = serde_json::from_str(json)?;
        let object = value.as_object().ok_or(DensityError::NotAnObject)?;

        let mut counts = BTreeMap::new();
        for (key, raw) in object {
            let category = parse_category(key)?;
            let count = raw
                .as_u64()
                .and_then(|n| u32::try_from(n).ok())
                .ok_or_else(|| DensityError::InvalidCount {
                    category,
                    value: raw.to_string(),
                })?;
            counts.insert(category, count);
        }
        Ok(Self { counts })
    }

    /// Validate raw `(name, count)` entries, e.g. from a config file.
    ///
    /// # Errors
    ///
    /// Returns a [`DensityError`] for an unknown name or a negative count.
    pub fn try_from_entries<'a>(
        entries: impl IntoIterator<Item = (&'a str, i64)>,
    ) -> Result<Self, DensityError> {
        let mut counts = BTreeMap::new();
        for (key, raw) in entries {
            let category = parse_category(key)?;
            let count = u32::try_from(raw).map_err(|_| DensityError::InvalidCount {
                category,
                value: raw.to_string(),
            })?;
            counts.insert(category, count);
        }
        Ok(Self { counts })
    }

    /// Like [`try_from_json`](Self::try_from_json), substituting the default map on error.
    pub fn from_json_or_default(json: &str) -> Self {
        Self::try_from_json(json).unwrap_or_else(|e| {
            tracing::warn!(error = %e, "Using default density configuration");
            Self::default()
        })
    }

    /// Like [`try_from_entries`](Self::try_from_entries), substituting the default map on error.
    pub fn from_entries_or_default<'a>(entries: impl IntoIterator<Item = (&'a str, i64)>) -> Self {
        Self::try_from_entries(entries).unwrap_or_else(|e| {
            tracing::warn!(error = %e, "Using default density configuration");
            Self::default()
        })
    }

    /// Requested count for `category`.
    pub fn count(&self, category: Category) -> u32 {
        self.counts.get(&category).copied().unwrap_or(0)
    }

    /// Sum of all requested counts.
    pub fn total(&self) -> u64 {
        self.counts.values().map(|&c| c as u64).sum()
    }

    /// Explicitly listed categories and their counts.
    pub fn iter(&self) -> impl Iterator<Item = (Category, u32)> + '_ {
        self.counts.iter().map(|(&c, &n)| (c, n))
    }
}

fn parse_category(key: &str) -> Result<Category, DensityError> {
    key.parse()
        .map_err(|_| DensityError::UnknownCategory(key.to_string()))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_map() {
        let d = DensityConfig::default();
        assert_eq!(d.count(Category::Tree), 25);
        assert_eq!(d.count(Category::Bush), 10);
        assert_eq!(d.count(Category::Grass), 500);
        assert_eq!(d.count(Category::Rock), 5);
        assert_eq!(d.count(Category::Sand), 0);
        assert_eq!(d.total(), 540);
    }

    #[test]
    fn test_parse_valid_json() {
        let d = DensityConfig::try_from_json(r#"{"tree": 10, "rock": 5}"#).unwrap();
        assert_eq!(d.count(Category::Tree), 10);
        assert_eq!(d.count(Category::Rock), 5);
        assert_eq!(d.count(Category::Grass), 0, "missing categories count as zero");
    }

    #[test]
    fn test_negative_count_rejected() {
        let err = DensityConfig::try_from_json(r#"{"tree": -1}"#).unwrap_err();
        assert!(matches!(err, DensityError::InvalidCount { category: Category::Tree, .. }));
    }

    #[test]
    fn test_fractional_and_string_counts_rejected() {
        assert!(DensityConfig::try_from_json(r#"{"tree": 2.5}"#).is_err());
        assert!(DensityConfig::try_from_json(r#"{"tree": "3"}"#).is_err());
        assert!(DensityConfig::try_from_json(r#"{"tree": true}"#).is_err());
    }

    #[test]
    fn test_unknown_category_rejected() {
        let err = DensityConfig::try_from_json(r#"{"tree": 1, "cactus": 2}"#).unwrap_err();
        assert!(matches!(err, DensityError::UnknownCategory(ref k) if k == "cactus"));
    }

    #[test]
    fn test_non_object_rejected() {
        assert!(matches!(
            DensityConfig::try_from_json("[1, 2]"),
            Err(DensityError::NotAnObject)
        ));
        assert!(matches!(
            DensityConfig::try_from_json("{not json"),
            Err(DensityError::Json(_))
        ));
    }

    #[test]
    fn test_invalid_config_replaced_wholesale() {
        // The valid rock entry must not survive next to the invalid tree entry.
        let d = DensityConfig::from_json_or_default(r#"{"rock": 1, "tree": -1}"#);
        assert_eq!(d, DensityConfig::default());
    }

    #[test]
    fn test_entries_validation() {
        let d = DensityConfig::try_from_entries([("sand", 2), ("grass", 0)]).unwrap();
        assert_eq!(d.count(Category::Sand), 2);
        assert!(DensityConfig::try_from_entries([("sand", -2)]).is_err());
        let fallback = DensityConfig::from_entries_or_default([("moss", 3)]);
        assert_eq!(fallback, DensityConfig::default());
    }

    #[test]
    fn test_iter_lists_explicit_entries() {
        let d = DensityConfig::from_counts([(Category::Rock, 2), (Category::Tree, 1)]);
        let entries: Vec<_> = d.iter().collect();
        assert_eq!(entries, vec![(Category::Tree, 1), (Category::Rock, 2)]);
    }
}
