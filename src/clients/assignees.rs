//! Issue assignee checks.

use crate::clients::api_connection::ApiConnection;
use crate::clients::errors::ApiError;
use crate::error::ensure_not_empty;

/// Client for the assignees endpoints.
#[derive(Clone, Debug)]
pub struct AssigneesClient {
    api: ApiConnection,
}

impl AssigneesClient {
    /// Creates a client over `api`.
    #[must_use]
    pub const fn new(api: ApiConnection) -> Self {
        Self { api }
    }

    /// Checks whether `assignee` can be assigned issues in the `owner/name`
    /// repository.
    ///
    /// A `204 No Content` reply means yes. A 404 means no and is returned as
    /// `Ok(false)` rather than an error.
    ///
    /// # Errors
    ///
    /// Returns [`ApiError::Argument`] if any argument is empty, and any
    /// transport error other than [`ApiError::NotFound`].
    pub async fn check_assignee(
        &self,
        owner: &str,
        name: &str,
        assignee: &str,
    ) -> Result<bool, ApiError> {
        ensure_not_empty("owner", owner)?;
        ensure_not_empty("name", name)?;
        ensure_not_empty("assignee", assignee)?;

        let uri = check_assignee_uri(owner, name, assignee);
        match self.api.connection().get(&uri, None, None).await {
            Ok(response) => Ok(response.status_code() == 204),
            Err(error) if error.is_not_found() => Ok(false),
            Err(error) => Err(error),
        }
    }
}

fn check_assignee_uri(owner: &str, name: &str, assignee: &str) -> String {
    format!(
        "repos/{}/{}/assignees/{}",
        urlencoding::encode(owner),
        urlencoding::encode(name),
        urlencoding::encode(assignee)
    )
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_check_assignee_uri_encodes_segments() {
        assert_eq!(
            check_assignee_uri("octo", "sniper", "jane"),
            "repos/octo/sniper/assignees/jane"
        );
        assert_eq!(
            check_assignee_uri("my org", "a/b", "j?x"),
            "repos/my%20org/a%2Fb/assignees/j%3Fx"
        );
    }
}
