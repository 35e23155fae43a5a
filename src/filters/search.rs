//! Case-insensitive text search

use crate::models::{Hospital, Medicine};

/// Records that can be matched against a search term
pub trait Searchable {
    /// Fields the term is matched against
    fn search_fields(&self) -> Vec<&str>;
}

impl Searchable for Hospital {
    fn search_fields(&self) -> Vec<&str> {
        vec![self.name.as_str(), self.district.as_str()]
    }
}

impl Searchable for Medicine {
    fn search_fields(&self) -> Vec<&str> {
        vec![self.name.as_str()]
    }
}

/// True if any field contains `term`, ignoring case. The empty term matches all.
pub fn matches<T: Searchable>(item: &T, term: &str) -> bool {
    if term.is_empty() {
        return true;
    }
    let needle = term.to_lowercase();
    item.search_fields()
        .iter()
        .any(|field| field.to_lowercase().contains(&needle))
}

/// Items matching `term`, in input order
pub fn filter_by_term<T: Searchable + Clone>(items: &[T], term: &str) -> Vec<T> {
    if term.is_empty() {
        return items.to_vec();
    }
    items.iter().filter(|item| matches(*item, term)).cloned().collect()
}
