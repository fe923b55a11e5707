//! The ordered steps of the Story API suite.
//!
//! Each [`Step`] knows how to build its request from the [`SuiteContext`],
//! which assertions its response must satisfy, and what it records back into
//! the context. Steps run in [`Step::ALL`] order: create, edit, list and delete
//! share the created story id, the negative cases run last.

use std::fmt;

use spoiler_domain::{
    ApiResponse, ApiRoutes, Assertion, HttpMethod, RequestSpec, ResponseSpec, StoryDraft,
};

use crate::context::SuiteContext;
use crate::error::StepError;

/// Confirmation returned by a successful create.
pub const CREATED_MESSAGE: &str = "Successfully created!";
/// Confirmation returned by a successful edit.
pub const EDITED_MESSAGE: &str = "Successfully edited";
/// Confirmation returned by a successful delete.
pub const DELETED_MESSAGE: &str = "Deleted successfully!";
/// Message returned when editing an unknown story.
pub const NOT_FOUND_MESSAGE: &str = "No spoilers";
/// Message returned when deleting an unknown story.
pub const UNABLE_TO_DELETE_MESSAGE: &str = "Unable to delete this story spoiler!";

/// Story id that the edit-missing step targets.
pub const MISSING_EDIT_ID: &str = "non-existing-id-123";
/// Story id that the delete-missing step targets.
pub const MISSING_DELETE_ID: &str = "non-existing-id-456";

/// One ordered test case of the suite.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Step {
    /// POST a valid story; expect 201, a story id and a "created" message.
    CreateStory,
    /// PUT an update to the created story; expect 200 and an "edited" message.
    EditStory,
    /// GET every story; expect 200 and a non-empty array.
    ListStories,
    /// DELETE the created story; expect 200 and a "deleted" message.
    DeleteStory,
    /// POST a story with empty fields; expect 400.
    CreateInvalidStory,
    /// PUT to an unknown id; expect 404 and a "not found" message.
    EditMissingStory,
    /// DELETE an unknown id; expect 400 and an "unable to delete" message.
    DeleteMissingStory,
}

impl Step {
    /// Every step, in execution order.
    pub const ALL: [Self; 7] = [
        Self::CreateStory,
        Self::EditStory,
        Self::ListStories,
        Self::DeleteStory,
        Self::CreateInvalidStory,
        Self::EditMissingStory,
        Self::DeleteMissingStory,
    ];

    /// Stable snake-case name used in reports and on the command line.
    #[must_use]
    pub const fn name(self) -> &'static str {
        match self {
            Self::CreateStory => "create_story",
            Self::EditStory => "edit_story",
            Self::ListStories => "list_stories",
            Self::DeleteStory => "delete_story",
            Self::CreateInvalidStory => "create_invalid_story",
            Self::EditMissingStory => "edit_missing_story",
            Self::DeleteMissingStory => "delete_missing_story",
        }
    }

    /// One-line summary of what the step verifies.
    #[must_use]
    pub const fn summary(self) -> &'static str {
        match self {
            Self::CreateStory => "create returns 201 with a story id",
            Self::EditStory => "edit of the created story returns 200",
            Self::ListStories => "list returns 200 with a non-empty array",
            Self::DeleteStory => "delete of the created story returns 200",
            Self::CreateInvalidStory => "create with empty fields returns 400",
            Self::EditMissingStory => "edit of an unknown id returns 404",
            Self::DeleteMissingStory => "delete of an unknown id returns 400",
        }
    }

    /// Parses a step from its [`name`](Self::name).
    #[must_use]
    pub fn from_name(name: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|step| step.name() == name)
    }

    /// Returns the selected steps in execution order, without duplicates.
    #[must_use]
    pub fn ordered(selection: &[Self]) -> Vec<Self> {
        Self::ALL
            .into_iter()
            .filter(|step| selection.contains(step))
            .collect()
    }

    /// Builds the request for this step.
    ///
    /// # Errors
    ///
    /// Returns [`StepError::NoStoryToEdit`] or [`StepError::NoStoryToDelete`]
    /// when edit or delete runs before a story was created, or a domain error
    /// if the body cannot be encoded.
    pub fn request(self, routes: &ApiRoutes, context: &SuiteContext) -> Result<RequestSpec, StepError> {
        let name = self.name();
        let request = match self {
            Self::CreateStory => RequestSpec::new(name, HttpMethod::Post, routes.create()).with_json(
                &StoryDraft::new("New Spoiler Title", "A short spoiler description."),
            )?,
            Self::EditStory => {
                let story_id = context.created_story_id().ok_or(StepError::NoStoryToEdit)?;
                RequestSpec::new(name, HttpMethod::Put, routes.edit(story_id)).with_json(
                    &StoryDraft::new("Updated Spoiler Title", "Updated spoiler description.")
                        .with_url(""),
                )?
            }
            Self::ListStories => RequestSpec::get(name, routes.all()),
            Self::DeleteStory => {
                let story_id = context.created_story_id().ok_or(StepError::NoStoryToDelete)?;
                RequestSpec::delete(name, routes.delete(story_id))
            }
            Self::CreateInvalidStory => RequestSpec::new(name, HttpMethod::Post, routes.create())
                .with_json(&StoryDraft::new("", ""))?,
            Self::EditMissingStory => {
                RequestSpec::new(name, HttpMethod::Put, routes.edit(MISSING_EDIT_ID))
                    .with_json(&StoryDraft::new("Does not matter", "Does not matter"))?
            }
            Self::DeleteMissingStory => RequestSpec::delete(name, routes.delete(MISSING_DELETE_ID)),
        };
        Ok(request)
    }

    /// The checks the response must pass.
    #[must_use]
    pub fn assertions(self) -> Vec<Assertion> {
        match self {
            Self::CreateStory => vec![
                Assertion::status(201),
                Assertion::BodyNotEmpty,
                Assertion::not_empty("$.storyId"),
                Assertion::contains("$.msg", CREATED_MESSAGE),
            ],
            Self::EditStory => vec![
                Assertion::status(200),
                Assertion::BodyNotEmpty,
                Assertion::contains("$.msg", EDITED_MESSAGE),
            ],
            Self::ListStories => vec![
                Assertion::status(200),
                Assertion::BodyNotEmpty,
                Assertion::NonEmptyJsonArray,
            ],
            Self::DeleteStory => vec![
                Assertion::status(200),
                Assertion::BodyNotEmpty,
                Assertion::contains("$.msg", DELETED_MESSAGE),
            ],
            Self::CreateInvalidStory => vec![Assertion::status(400)],
            Self::EditMissingStory => vec![
                Assertion::status(404),
                Assertion::BodyNotEmpty,
                Assertion::contains("$.msg", NOT_FOUND_MESSAGE),
            ],
            Self::DeleteMissingStory => vec![
                Assertion::status(400),
                Assertion::BodyNotEmpty,
                Assertion::contains("$.msg", UNABLE_TO_DELETE_MESSAGE),
            ],
        }
    }

    /// Records state from a response that passed every assertion.
    ///
    /// Only [`Step::CreateStory`] writes to the context.
    pub fn record(self, response: &ResponseSpec, context: &mut SuiteContext) {
        if self != Self::CreateStory {
            return;
        }
        if let Some(story_id) = ApiResponse::from_body(&response.body)
            .ok()
            .and_then(|payload| payload.story_id)
        {
            context.record_created(story_id);
        }
    }
}

impl fmt::Display for Step {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;
    use url::Url;

    fn routes() -> ApiRoutes {
        ApiRoutes::new(Url::parse("https://stories.test").unwrap()).unwrap()
    }

    #[test]
    fn test_names_round_trip() {
        for step in Step::ALL {
            assert_eq!(Step::from_name(step.name()), Some(step));
        }
        assert_eq!(Step::from_name("drop_database"), None);
    }

    #[test]
    fn test_ordered_selection_uses_canonical_order() {
        let selected = Step::ordered(&[
            Step::DeleteMissingStory,
            Step::CreateStory,
            Step::CreateStory,
        ]);
        assert_eq!(selected, vec![Step::CreateStory, Step::DeleteMissingStory]);
    }

    #[test]
    fn test_create_request() {
        let request = Step::CreateStory
            .request(&routes(), &SuiteContext::new())
            .unwrap();
        assert_eq!(request.method, HttpMethod::Post);
        assert_eq!(request.url, "https://stories.test/api/Story/Create");
        assert_eq!(
            request.body,
            Some(serde_json::json!({
                "title": "New Spoiler Title",
                "description": "A short spoiler description."
            }))
        );
    }

    #[test]
    fn test_dependent_steps_require_created_story() {
        let context = SuiteContext::new();

        let edit = Step::EditStory.request(&routes(), &context).unwrap_err();
        assert_eq!(edit, StepError::NoStoryToEdit);
        assert_eq!(edit.to_string(), "Previous test must create a story.");

        let delete = Step::DeleteStory.request(&routes(), &context).unwrap_err();
        assert_eq!(delete, StepError::NoStoryToDelete);
        assert_eq!(delete.to_string(), "Previous tests must create a story.");
    }

    #[test]
    fn test_dependent_steps_use_created_story() {
        let mut context = SuiteContext::new();
        context.record_created("story-7");

        let edit = Step::EditStory.request(&routes(), &context).unwrap();
        assert_eq!(edit.method, HttpMethod::Put);
        assert_eq!(edit.url, "https://stories.test/api/Story/Edit/story-7");
        assert_eq!(edit.body.unwrap()["url"], "");

        let delete = Step::DeleteStory.request(&routes(), &context).unwrap();
        assert_eq!(delete.method, HttpMethod::Delete);
        assert_eq!(delete.url, "https://stories.test/api/Story/Delete/story-7");
        assert!(delete.body.is_none());
    }

    #[test]
    fn test_negative_requests_target_fixed_ids() {
        let context = SuiteContext::new();
        let edit = Step::EditMissingStory.request(&routes(), &context).unwrap();
        assert!(edit.url.ends_with("/api/Story/Edit/non-existing-id-123"));

        let delete = Step::DeleteMissingStory.request(&routes(), &context).unwrap();
        assert!(delete.url.ends_with("/api/Story/Delete/non-existing-id-456"));

        let invalid = Step::CreateInvalidStory.request(&routes(), &context).unwrap();
        assert_eq!(
            invalid.body,
            Some(serde_json::json!({ "title": "", "description": "" }))
        );
    }

    #[test]
    fn test_create_invalid_checks_status_only() {
        assert_eq!(
            Step::CreateInvalidStory.assertions(),
            vec![Assertion::status(400)]
        );
    }

    #[test]
    fn test_record_only_from_create() {
        let response = ResponseSpec::json(201, r#"{"msg":"Successfully created!","storyId":"s1"}"#);

        let mut context = SuiteContext::new();
        Step::ListStories.record(&response, &mut context);
        assert_eq!(context.created_story_id(), None);

        Step::CreateStory.record(&response, &mut context);
        assert_eq!(context.created_story_id(), Some("s1"));
    }

    #[test]
    fn test_record_prefers_exact_story_id_key() {
        let response = ResponseSpec::json(
            201,
            r#"{"msg":"Successfully created!","storyid":"lower","storyId":"exact"}"#,
        );

        let mut context = SuiteContext::new();
        Step::CreateStory.record(&response, &mut context);
        assert_eq!(context.created_story_id(), Some("exact"));
    }
}
