//! Cross-step state of a single suite run.

/// State threaded through the ordered steps of one run.
///
/// Holds the id of the most recently created story. It is written by the
/// create step, read by the edit and delete steps, and never reset.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SuiteContext {
    created_story_id: Option<String>,
}

impl SuiteContext {
    /// Creates an empty context.
    #[must_use]
    pub const fn new() -> Self {
        Self {
            created_story_id: None,
        }
    }

    /// The id of the last created story, if any.
    #[must_use]
    pub fn created_story_id(&self) -> Option<&str> {
        self.created_story_id.as_deref()
    }

    /// Records a created story. Empty ids are ignored; whitespace is kept
    /// as sent.
    pub fn record_created(&mut self, story_id: impl Into<String>) {
        let story_id = story_id.into();
        if !story_id.is_empty() {
            self.created_story_id = Some(story_id);
        }
    }
}
