//! Category resolution for the product page.

use std::collections::HashMap;

use larkspur_core::CategoryId;

use crate::catalog::Category;

/// Pure category lookup by id.
pub trait CategoryLookup: Send + Sync {
    /// The category with `id`, if known.
    fn category(&self, id: &CategoryId) -> Option<Category>;
}

/// In-memory category table built from the catalog's category list.
#[derive(Debug, Clone, Default)]
pub struct CategoryDirectory {
    by_id: HashMap<CategoryId, Category>,
}

impl CategoryDirectory {
    /// A directory with no categories; every lookup misses.
    #[must_use]
    pub fn empty() -> Self {
        Self::default()
    }

    /// Number of known categories.
    #[must_use]
    pub fn len(&self) -> usize {
        self.by_id.len()
    }

    /// Whether the directory has no categories.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.by_id.is_empty()
    }
}

impl From<Vec<Category>> for CategoryDirectory {
    fn from(categories: Vec<Category>) -> Self {
        Self {
            by_id: categories
                .into_iter()
                .map(|category| (category.id.clone(), category))
                .collect(),
        }
    }
}

impl CategoryLookup for CategoryDirectory {
    fn category(&self, id: &CategoryId) -> Option<Category> {
        self.by_id.get(id).cloned()
    }
}

/// Resolve the representative category for a product.
///
/// Only the first reference is considered. Empty or absent references, and
/// references the lookup does not know, resolve to `None`.
#[must_use]
pub fn resolve(lookup: &dyn CategoryLookup, refs: Option<&[CategoryId]>) -> Option<Category> {
    refs.and_then(<[CategoryId]>::first)
        .and_then(|id| lookup.category(id))
}

/// Display label for a resolved category; empty when unresolved.
#[must_use]
pub fn label(category: Option<&Category>) -> &str {
    category.map_or("", |c| c.title.as_str())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn directory() -> CategoryDirectory {
        CategoryDirectory::from(vec![
            Category {
                id: CategoryId::new("7"),
                title: "Boots".to_string(),
            },
            Category {
                id: CategoryId::new("8"),
                title: "Bags".to_string(),
            },
        ])
    }

    #[test]
    fn test_resolve_uses_first_reference() {
        let refs = [CategoryId::new("8"), CategoryId::new("7")];
        let category = resolve(&directory(), Some(&refs));
        assert_eq!(category.map(|c| c.title), Some("Bags".to_string()));
    }

    #[test]
    fn test_resolve_empty_or_absent_is_none() {
        assert_eq!(resolve(&directory(), Some(&[])), None);
        assert_eq!(resolve(&directory(), None), None);
    }

    #[test]
    fn test_resolve_unknown_reference_is_none() {
        let refs = [CategoryId::new("99")];
        assert_eq!(resolve(&directory(), Some(&refs)), None);
        assert_eq!(resolve(&CategoryDirectory::empty(), Some(&refs)), None);
    }

    #[test]
    fn test_label_falls_back_to_empty() {
        assert_eq!(label(None), "");
        let boots = directory().category(&CategoryId::new("7"));
        assert_eq!(label(boots.as_ref()), "Boots");
    }
}
