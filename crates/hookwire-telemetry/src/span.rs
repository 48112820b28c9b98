//! Correlation spans for one dispatch cycle.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Identifies one request's dispatch cycle in the logs.
///
/// Every trigger and dispatch logged inside [`DispatchSpan::span`] carries the
/// same `request_id`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DispatchSpan {
    /// Unique request identifier.
    pub request_id: Uuid,
    /// When the cycle started.
    pub started_at: DateTime<Utc>,
    /// Component that opened the span (`board`, `admin`, ...).
    pub source: String,
    /// Resolved sub-action, once known.
    pub sub_action: Option<String>,
    /// Acting user id. 0 is a guest.
    pub user_id: Option<u64>,
}

impl DispatchSpan {
    /// Open a span for `source`.
    #[must_use]
    pub fn new(source: impl Into<String>) -> Self {
        Self {
            request_id: Uuid::new_v4(),
            started_at: Utc::now(),
            source: source.into(),
            sub_action: None,
            user_id: None,
        }
    }

    /// Record the resolved sub-action.
    #[must_use]
    pub fn with_sub_action(mut self, sub_action: impl Into<String>) -> Self {
        self.sub_action = Some(sub_action.into());
        self
    }

    /// Record the acting user.
    #[must_use]
    pub fn with_user_id(mut self, user_id: u64) -> Self {
        self.user_id = Some(user_id);
        self
    }

    /// Milliseconds since the span was opened.
    #[must_use]
    pub fn elapsed_ms(&self) -> i64 {
        Utc::now()
            .signed_duration_since(self.started_at)
            .num_milliseconds()
    }

    /// First eight hex digits of the request id.
    #[must_use]
    pub fn short_id(&self) -> String {
        self.request_id.simple().to_string().chars().take(8).collect()
    }

    /// A `tracing` span carrying this cycle's fields.
    #[must_use]
    pub fn span(&self) -> tracing::Span {
        tracing::info_span!(
            "dispatch",
            request_id = %self.request_id,
            source = %self.source,
            sub_action = self.sub_action.as_deref(),
            user_id = self.user_id,
        )
    }

    /// Enter the span until the returned guard drops.
    #[must_use]
    pub fn enter(self) -> DispatchGuard {
        DispatchGuard::new(self)
    }
}

/// Keeps a [`DispatchSpan`] entered and logs its duration on drop.
pub struct DispatchGuard {
    context: DispatchSpan,
    _span: tracing::span::EnteredSpan,
}

impl DispatchGuard {
    fn new(context: DispatchSpan) -> Self {
        let span = context.span().entered();
        tracing::debug!("Dispatch started");
        Self {
            context,
            _span: span,
        }
    }

    /// The span context.
    #[must_use]
    pub fn context(&self) -> &DispatchSpan {
        &self.context
    }
}

impl Drop for DispatchGuard {
    fn drop(&mut self) {
        tracing::debug!(elapsed_ms = self.context.elapsed_ms(), "Dispatch completed");
    }
}
