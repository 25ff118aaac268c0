//! Path-tracking context threaded through nested validation checks
//!
//! Copyright (c) 2025 Wxmap Team
//! Licensed under the Apache-2.0 license

/// Tracks the dotted path to the value currently being validated, so issues
/// can name their location (`grid.bbox.min_lon`, `parameters[2].levels[0]`).
#[derive(Debug, Clone)]
pub struct ValidationContext {
    /// Current document path
    pub path: String,
}

impl ValidationContext {
    /// Create a context rooted at the top of the document
    pub fn root() -> Self {
        Self {
            path: String::new(),
        }
    }

    /// Create a context rooted at a named section
    pub fn at<P: Into<String>>(path: P) -> Self {
        Self { path: path.into() }
    }

    /// Child context for a named field
    pub fn child<P: AsRef<str>>(&self, segment: P) -> Self {
        let path = if self.path.is_empty() {
            segment.as_ref().to_string()
        } else {
            format!("{}.{}", self.path, segment.as_ref())
        };
        Self { path }
    }

    /// Child context for an array element
    pub fn child_index(&self, index: usize) -> Self {
        Self {
            path: format!("{}[{}]", self.path, index),
        }
    }
}
