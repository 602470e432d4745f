//! Search query state.
//!
//! Holds the text typed into the product search box. The holder stores
//! exactly what it is given; trimming is up to the caller. Matching lives in
//! [`crate::catalog::filter_products`].

/// Current search query.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SearchState {
    query: String,
}

/// A search state transition.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SearchAction {
    /// Replace the query.
    SetQuery(String),
    /// Reset the query to empty.
    ClearQuery,
}

impl SearchState {
    /// An empty query.
    #[must_use]
    pub const fn new() -> Self {
        Self {
            query: String::new(),
        }
    }

    /// Replace the stored query.
    pub fn set_query(&mut self, value: impl Into<String>) {
        self.query = value.into();
    }

    /// Reset the stored query to empty.
    pub fn clear_query(&mut self) {
        self.query.clear();
    }

    /// The stored query.
    #[must_use]
    pub fn current_query(&self) -> &str {
        &self.query
    }

    /// Apply a [`SearchAction`].
    pub fn apply(&mut self, action: SearchAction) {
        match action {
            SearchAction::SetQuery(value) => self.set_query(value),
            SearchAction::ClearQuery => self.clear_query(),
        }
    }
}
