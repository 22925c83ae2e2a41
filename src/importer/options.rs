//! Import options

/// Options for markdown import
#[derive(Debug, Clone, Default)]
pub struct ImportOptions {
    /// Title of the problem being edited. The document's level-1 heading is
    /// compared against it; `None` accepts any title.
    pub title: Option<String>,
}

impl ImportOptions {
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the expected problem title
    pub fn with_title(mut self, title: impl Into<String>) -> Self {
        self.title = Some(title.into());
        self
    }
}
