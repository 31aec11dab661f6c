//! Request-scoped trace identifier.
//!
//! The identifier lives in Tokio task-local storage so errors and log lines
//! can pick it up without threading it through every call. Task locals are not
//! inherited by spawned tasks; wrap spawned work in [`TraceId::scope`].

use std::future::Future;

use tokio::task_local;
use uuid::Uuid;

task_local! {
    pub(crate) static TRACE_ID: TraceId;
}

/// Per-request correlation identifier, rendered as a hyphenated UUID.
///
/// # Examples
/// ```
/// use backend::TraceId;
///
/// # tokio::runtime::Runtime::new().unwrap().block_on(async {
/// let inbound = TraceId::from_header_str("7c9e6679-7425-40de-944b-e07fc1f90ae7")
///     .expect("valid UUID");
/// let observed = TraceId::scope(inbound, async move { TraceId::current() }).await;
/// assert_eq!(observed, Some(inbound));
/// # });
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TraceId(Uuid);

impl TraceId {
    /// Generate a new random trace identifier.
    #[must_use]
    pub fn generate() -> Self {
        Self(Uuid::new_v4())
    }

    /// Accept a caller-supplied identifier when it is a well-formed UUID.
    ///
    /// Surrounding whitespace is ignored; anything else yields `None` so the
    /// caller falls back to [`TraceId::generate`].
    #[must_use]
    pub fn from_header_str(raw: &str) -> Option<Self> {
        raw.trim().parse().ok()
    }

    /// Returns the trace identifier in scope, if any.
    #[must_use]
    pub fn current() -> Option<Self> {
        TRACE_ID.try_with(|id| *id).ok()
    }

    /// Run `fut` with `trace_id` in scope.
    pub async fn scope<Fut>(trace_id: Self, fut: Fut) -> Fut::Output
    where
        Fut: Future,
    {
        TRACE_ID.scope(trace_id, fut).await
    }
}

impl std::fmt::Display for TraceId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl std::str::FromStr for TraceId {
    type Err = uuid::Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Ok(Self(Uuid::parse_str(s)?))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    #[tokio::test]
    async fn scope_is_visible_until_it_ends() {
        let expected = TraceId::generate();

        let inside = TraceId::scope(expected, async { TraceId::current() }).await;

        assert_eq!(inside, Some(expected));
        assert!(TraceId::current().is_none());
    }

    #[rstest]
    #[case("7c9e6679-7425-40de-944b-e07fc1f90ae7", true)]
    #[case("  7c9e6679-7425-40de-944b-e07fc1f90ae7 ", true)]
    #[case("", false)]
    #[case("request-42", false)]
    fn header_values_must_be_uuids(#[case] raw: &str, #[case] accepted: bool) {
        let parsed = TraceId::from_header_str(raw);

        assert_eq!(parsed.is_some(), accepted);
        if let Some(id) = parsed {
            assert_eq!(id.to_string(), raw.trim());
        }
    }
}
