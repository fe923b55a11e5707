//! Endpoint layout of the Story API.

use url::Url;

use crate::error::{DomainError, DomainResult};

/// Builds absolute endpoint URLs from a base URL.
///
/// Path identifiers are appended as single percent-encoded segments, so an id
/// can never escape its route.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ApiRoutes {
    base: Url,
}

impl ApiRoutes {
    /// Creates the route table for `base`.
    ///
    /// # Errors
    ///
    /// Returns [`DomainError::InvalidBaseUrl`] unless `base` is an http(s) URL
    /// that can carry a path.
    pub fn new(base: Url) -> DomainResult<Self> {
        if !matches!(base.scheme(), "http" | "https") || base.cannot_be_a_base() {
            return Err(DomainError::InvalidBaseUrl(base.to_string()));
        }
        Ok(Self { base })
    }

    /// The base URL.
    #[must_use]
    pub const fn base(&self) -> &Url {
        &self.base
    }

    /// `POST /api/User/Authentication`
    #[must_use]
    pub fn authentication(&self) -> String {
        self.endpoint(&["api", "User", "Authentication"])
    }

    /// `POST /api/Story/Create`
    #[must_use]
    pub fn create(&self) -> String {
        self.endpoint(&["api", "Story", "Create"])
    }

    /// `PUT /api/Story/Edit/{id}`
    #[must_use]
    pub fn edit(&self, story_id: &str) -> String {
        self.endpoint(&["api", "Story", "Edit", story_id])
    }

    /// `GET /api/Story/All`
    #[must_use]
    pub fn all(&self) -> String {
        self.endpoint(&["api", "Story", "All"])
    }

    /// `DELETE /api/Story/Delete/{id}`
    #[must_use]
    pub fn delete(&self, story_id: &str) -> String {
        self.endpoint(&["api", "Story", "Delete", story_id])
    }

    fn endpoint(&self, segments: &[&str]) -> String {
        let mut url = self.base.clone();
        url.set_query(None);
        url.set_fragment(None);
        if let Ok(mut path) = url.path_segments_mut() {
            path.pop_if_empty().extend(segments);
        }
        url.into()
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    fn routes(base: &str) -> ApiRoutes {
        ApiRoutes::new(Url::parse(base).unwrap()).unwrap()
    }

    #[test]
    fn test_routes_from_bare_host() {
        let routes = routes("https://d3s5nxhwblsjbi.cloudfront.net");
        assert_eq!(
            routes.authentication(),
            "https://d3s5nxhwblsjbi.cloudfront.net/api/User/Authentication"
        );
        assert_eq!(
            routes.create(),
            "https://d3s5nxhwblsjbi.cloudfront.net/api/Story/Create"
        );
        assert_eq!(routes.all(), "https://d3s5nxhwblsjbi.cloudfront.net/api/Story/All");
    }

    #[test]
    fn test_routes_keep_base_path() {
        let routes = routes("http://127.0.0.1:8080/staging/");
        assert_eq!(
            routes.edit("non-existing-id-123"),
            "http://127.0.0.1:8080/staging/api/Story/Edit/non-existing-id-123"
        );
        assert_eq!(
            routes.delete("abc"),
            "http://127.0.0.1:8080/staging/api/Story/Delete/abc"
        );
    }

    #[test]
    fn test_identifier_is_one_segment() {
        let routes = routes("http://localhost");
        assert_eq!(
            routes.delete("a/b"),
            "http://localhost/api/Story/Delete/a%2Fb"
        );
    }

    #[test]
    fn test_rejects_non_http_base() {
        let result = ApiRoutes::new(Url::parse("mailto:someone@example.com").unwrap());
        assert!(matches!(result, Err(DomainError::InvalidBaseUrl(_))));

        let result = ApiRoutes::new(Url::parse("ftp://example.com").unwrap());
        assert!(matches!(result, Err(DomainError::InvalidBaseUrl(_))));
    }
}
