//! Caller-visible state of one operation entry point.
//!
//! Holds the busy indicator and the last `AdminError`, published through a
//! watch channel so a UI can observe it. Each run replaces the slot wholesale.

use crate::domain::AdminError;
use std::future::Future;
use tokio::sync::watch;

#[derive(Debug, Clone, Default)]
pub struct CallState {
    /// Invocations currently running through this call site.
    pub in_flight: usize,
    pub last_error: Option<AdminError>,
}

impl CallState {
    pub fn is_busy(&self) -> bool {
        self.in_flight > 0
    }
}

#[derive(Debug)]
pub struct CallSite {
    state: watch::Sender<CallState>,
}

impl Default for CallSite {
    fn default() -> Self {
        Self::new()
    }
}

impl CallSite {
    pub fn new() -> Self {
        let (state, _) = watch::channel(CallState::default());
        Self { state }
    }

    pub fn subscribe(&self) -> watch::Receiver<CallState> {
        self.state.subscribe()
    }

    pub fn is_busy(&self) -> bool {
        self.state.borrow().is_busy()
    }

    pub fn last_error(&self) -> Option<AdminError> {
        self.state.borrow().last_error.clone()
    }

    /// Run an invocation: busy while it runs, error slot cleared on start and
    /// set to the outcome's error (if any) on settlement.
    pub async fn run<T, Fut>(&self, invocation: Fut) -> Option<T>
    where
        Fut: Future<Output = Result<T, AdminError>>,
    {
        self.state.send_modify(|s| {
            s.in_flight += 1;
            s.last_error = None;
        });
        let outcome = invocation.await;
        self.state.send_modify(|s| {
            s.in_flight = s.in_flight.saturating_sub(1);
            s.last_error = outcome.as_ref().err().cloned();
        });
        outcome.ok()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::{ContextSeed, ErrorCode};
    use tokio::sync::oneshot;

    fn error(code: ErrorCode) -> AdminError {
        AdminError::terminal(code, ContextSeed::new().stamp("test"))
    }

    #[tokio::test]
    async fn test_error_is_stored_then_cleared_on_success() {
        let site = CallSite::new();
        let none: Option<()> = site.run(async { Err(error(ErrorCode::InvalidOrderId)) }).await;
        assert!(none.is_none());
        assert_eq!(
            site.last_error().map(|e| e.code()),
            Some(ErrorCode::InvalidOrderId)
        );

        let value = site.run(async { Ok::<_, AdminError>(7) }).await;
        assert_eq!(value, Some(7));
        assert!(site.last_error().is_none());
    }

    #[tokio::test]
    async fn test_new_error_replaces_old_one() {
        let site = CallSite::new();
        let _: Option<()> = site.run(async { Err(error(ErrorCode::InvalidOrderId)) }).await;
        let _: Option<()> = site
            .run(async { Err(error(ErrorCode::NetworkTimeout)) })
            .await;
        assert_eq!(
            site.last_error().map(|e| e.code()),
            Some(ErrorCode::NetworkTimeout)
        );
    }

    #[tokio::test]
    async fn test_busy_while_running() {
        let site = CallSite::new();
        let mut rx = site.subscribe();
        let (release, gate) = oneshot::channel::<()>();

        let run = site.run(async move {
            let _ = gate.await;
            Ok::<_, AdminError>("done")
        });
        let observe = async {
            rx.wait_for(|s| s.is_busy()).await.unwrap();
            let _ = release.send(());
        };
        let (value, ()) = tokio::join!(run, observe);

        assert_eq!(value, Some("done"));
        assert!(!site.is_busy());
    }
}
