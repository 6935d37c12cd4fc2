//! Variant registry: the named assets available for each category.

use std::path::Path;

use hashbrown::HashMap;
use rand::Rng;

use crate::Category;

/// Maps each category to its sorted, de-duplicated variant names.
///
/// A category with no variants is legal; it simply yields no placements.
#[derive(Clone, Debug, Default)]
pub struct VariantRegistry {
    variants: HashMap<Category, Vec<String>>,
}

impl VariantRegistry {
    /// Creates an empty registry.
    pub fn new() -> Self {
        Self::default()
    }

    /// Registers a variant. Duplicates are ignored.
    pub fn insert(&mut self, category: Category, name: impl Into<String>) {
        let list = self.variants.entry(category).or_default();
        let name = name.into();
        if let Err(pos) = list.binary_search(&name) {
            list.insert(pos, name);
        }
    }

    /// Discover variants from a model tree laid out as
    /// `<models_dir>/<category>/<variant>/`.
    ///
    /// Hidden entries, plain files, and names that are not valid UTF-8 are
    /// skipped. A missing category directory leaves that category empty.
    ///
    /// # Errors
    ///
    /// Returns an I/O error if an existing category directory cannot be listed.
    pub fn discover(models_dir: &Path) -> std::io::Result<Self> {
        let mut registry = Self::new();
        for category in Category::ALL {
            let category_dir = models_dir.join(category.name());
            if !category_dir.is_dir() {
                tracing::warn!(
                    %category,
                    path = %category_dir.display(),
                    "No model directory for category"
                );
                continue;
            }
            for entry in std::fs::read_dir(&category_dir)? {
                let entry = entry?;
                if !entry.file_type()?.is_dir() {
                    continue;
                }
                let name = match entry.file_name().into_string() {
                    Ok(name) => name,
                    Err(raw) => {
                        tracing::warn!(
                            %category,
                            name = %raw.to_string_lossy(),
                            "Skipping model directory with a non UTF-8 name"
                        );
                        continue;
                    }
                };
                if !name.starts_with('.') {
                    registry.insert(category, name);
                }
            }
            let count = registry.variants_for(category).len();
            tracing::info!(%category, count, "Found variants");
        }
        Ok(registry)
    }

    /// Variants registered for `category`, possibly empty.
    pub fn variants_for(&self, category: Category) -> &[String] {
        self.variants.get(&category).map_or(&[], Vec::as_slice)
    }

    /// Uniformly pick a variant, or `None` if the category has none.
    pub fn pick_variant<R: Rng + ?Sized>(&self, category: Category, rng: &mut R) -> Option<&str> {
        let list = self.variants_for(category);
        if list.is_empty() {
            return None;
        }
        Some(list[rng.random_range(0..list.len())].as_str())
    }

    /// Returns `true` if no category has any variant.
    pub fn is_empty(&self) -> bool {
        self.variants.values().all(Vec::is_empty)
    }
}

impl<S: Into<String>> FromIterator<(Category, S)> for VariantRegistry {
    fn from_iter<I: IntoIterator<Item = (Category, S)>>(iter: I) -> Self {
        let mut registry = Self::new();
        for (category, name) in iter {
            registry.insert(category, name);
        }
        registry
    }
}
