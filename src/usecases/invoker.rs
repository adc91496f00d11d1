//! Resilient invoker: the attempt loop behind every admin operation.
//!
//! Validating -> Calling -> (Succeeded | Classifying) -> (Failed | Waiting -> Calling).
//! Only errors tagged retryable by the classifier are retried, at most
//! `policy.attempts()` calls in total, strictly one after another.

use crate::domain::{AdminError, AttemptRecord, ContextSeed, ErrorCode, RetryPolicy};
use crate::ports::{AttemptSink, RemoteResult, Reply};
use crate::usecases::classifier::{BusinessRules, Classifier, Failure};
use std::future::Future;
use std::sync::Arc;
use tracing::{debug, info, warn};

/// Synchronous pre-validation; `Err` carries the validation code.
pub type Validation<'a> = Box<dyn FnOnce() -> Result<(), ErrorCode> + Send + 'a>;

/// One invocation: the remote call thunk plus everything needed to judge its failures.
pub struct Operation<'a, F> {
    action: &'static str,
    seed: ContextSeed,
    validate: Option<Validation<'a>>,
    call: F,
    rules: &'a BusinessRules,
    policy: Option<RetryPolicy>,
}

impl<'a, F> Operation<'a, F> {
    pub fn new(action: &'static str, rules: &'a BusinessRules, call: F) -> Self {
        Self {
            action,
            seed: ContextSeed::new(),
            validate: None,
            call,
            rules,
            policy: None,
        }
    }

    pub fn seed(mut self, seed: ContextSeed) -> Self {
        self.seed = seed;
        self
    }

    pub fn validate(mut self, check: impl FnOnce() -> Result<(), ErrorCode> + Send + 'a) -> Self {
        self.validate = Some(Box::new(check));
        self
    }

    /// Override the invoker's default policy for this call.
    pub fn policy(mut self, policy: RetryPolicy) -> Self {
        self.policy = Some(policy);
        self
    }
}

/// Runs operations with classification and bounded exponential backoff.
#[derive(Clone)]
pub struct ResilientInvoker {
    policy: RetryPolicy,
    classifier: Arc<Classifier>,
    sink: Arc<dyn AttemptSink>,
}

impl ResilientInvoker {
    pub fn new(policy: RetryPolicy, classifier: Arc<Classifier>, sink: Arc<dyn AttemptSink>) -> Self {
        Self {
            policy,
            classifier,
            sink,
        }
    }

    pub fn policy(&self) -> RetryPolicy {
        self.policy
    }

    /// Run `op` to settlement: the payload, or the last classified error.
    pub async fn invoke<T, F, Fut>(&self, op: Operation<'_, F>) -> Result<T, AdminError>
    where
        F: FnMut() -> Fut,
        Fut: Future<Output = RemoteResult<T>>,
    {
        let Operation {
            action,
            seed,
            validate,
            mut call,
            rules,
            policy,
        } = op;
        let policy = policy.unwrap_or(self.policy);

        if let Some(validate) = validate {
            if let Err(code) = validate() {
                debug!(action, code = %code, "pre-validation failed, no remote call made");
                return Err(AdminError::terminal(code, seed.stamp(action)));
            }
        }

        let max_attempts = policy.attempts();
        let mut attempt = 1u32;
        loop {
            let error = match call().await {
                Ok(Reply::Done(payload)) => {
                    if attempt > 1 {
                        info!(action, attempts = attempt, "admin operation recovered after retry");
                    }
                    return Ok(payload);
                }
                Ok(Reply::Declined(message)) => {
                    self.classifier
                        .classify(Failure::Declined(&message), action, &seed, rules)
                }
                Err(raw) => self
                    .classifier
                    .classify(Failure::Transport(&raw), action, &seed, rules),
            };

            if !error.is_retryable() || attempt >= max_attempts {
                warn!(
                    action,
                    code = %error.code(),
                    attempts = attempt,
                    retryable = error.is_retryable(),
                    "admin operation failed"
                );
                return Err(error);
            }

            let delay = policy.delay_for(attempt);
            self.sink.record(&AttemptRecord {
                action: action.to_string(),
                attempt_number: attempt,
                delay,
                error,
            });
            tokio::time::sleep(delay).await;
            attempt += 1;
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::adapters::logging::MemoryAttemptSink;
    use crate::ports::RawFailure;
    use std::sync::atomic::{AtomicU32, Ordering};
    use std::time::Duration;
    use tokio::time::Instant;

    fn invoker(sink: Arc<MemoryAttemptSink>) -> ResilientInvoker {
        ResilientInvoker::new(RetryPolicy::default(), Arc::new(Classifier::new()), sink)
    }

    fn rules() -> BusinessRules {
        BusinessRules::new(ErrorCode::OrderReassignmentFailed)
            .rule("already assigned", ErrorCode::ProviderAlreadyAssigned)
    }

    fn timeout() -> RawFailure {
        RawFailure::new("deadline-exceeded", "deadline exceeded")
    }

    #[tokio::test(start_paused = true)]
    async fn test_always_transient_stops_after_max_attempts() {
        let sink = Arc::new(MemoryAttemptSink::new());
        let calls = AtomicU32::new(0);
        let rules = rules();
        let started = Instant::now();

        let op = Operation::new("reassign_order", &rules, || {
            calls.fetch_add(1, Ordering::SeqCst);
            async { Err::<Reply<()>, _>(timeout()) }
        });
        let err = invoker(Arc::clone(&sink)).invoke(op).await.unwrap_err();

        assert_eq!(calls.load(Ordering::SeqCst), 3);
        assert_eq!(err.code(), ErrorCode::NetworkTimeout);
        assert!(err.is_retryable());
        let delays: Vec<u64> = sink.records().iter().map(|r| r.delay_ms()).collect();
        assert_eq!(delays, vec![1000, 2000]);
        let elapsed = started.elapsed();
        assert!(elapsed >= Duration::from_millis(3000));
        assert!(elapsed < Duration::from_millis(3100));
    }

    #[tokio::test(start_paused = true)]
    async fn test_recovers_on_third_attempt() {
        let sink = Arc::new(MemoryAttemptSink::new());
        let calls = AtomicU32::new(0);
        let rules = rules();

        let op = Operation::new("reassign_order", &rules, || {
            let n = calls.fetch_add(1, Ordering::SeqCst) + 1;
            async move {
                if n < 3 {
                    Err(timeout())
                } else {
                    Ok(Reply::Done(n))
                }
            }
        });
        let payload = invoker(Arc::clone(&sink)).invoke(op).await.unwrap();

        assert_eq!(payload, 3);
        assert_eq!(calls.load(Ordering::SeqCst), 3);
        let records = sink.records();
        assert_eq!(records.len(), 2);
        assert_eq!(records[0].attempt_number, 1);
        assert_eq!(records[0].delay_ms(), 1000);
        assert_eq!(records[1].attempt_number, 2);
        assert_eq!(records[1].delay_ms(), 2000);
        assert!(records.iter().all(|r| r.action == "reassign_order"));
    }

    #[tokio::test(start_paused = true)]
    async fn test_permission_denied_single_attempt() {
        let sink = Arc::new(MemoryAttemptSink::new());
        let calls = AtomicU32::new(0);
        let rules = rules();

        let op = Operation::new("suspend_customer", &rules, || {
            calls.fetch_add(1, Ordering::SeqCst);
            async { Err::<Reply<()>, _>(RawFailure::new("permission-denied", "admin only")) }
        });
        let err = invoker(Arc::clone(&sink)).invoke(op).await.unwrap_err();

        assert_eq!(calls.load(Ordering::SeqCst), 1);
        assert_eq!(err.code(), ErrorCode::InsufficientAdminPermissions);
        assert!(sink.records().is_empty());
    }

    #[tokio::test(start_paused = true)]
    async fn test_unknown_failure_single_attempt() {
        let sink = Arc::new(MemoryAttemptSink::new());
        let calls = AtomicU32::new(0);
        let rules = rules();

        let op = Operation::new("reassign_order", &rules, || {
            calls.fetch_add(1, Ordering::SeqCst);
            async { Err::<Reply<()>, _>(RawFailure::new("internal", "boom")) }
        });
        let err = invoker(sink).invoke(op).await.unwrap_err();

        assert_eq!(calls.load(Ordering::SeqCst), 1);
        assert_eq!(err.code(), ErrorCode::AdminUnknownError);
    }

    #[tokio::test(start_paused = true)]
    async fn test_validation_failure_makes_no_call() {
        let sink = Arc::new(MemoryAttemptSink::new());
        let calls = AtomicU32::new(0);
        let rules = rules();

        let op = Operation::new("reassign_order", &rules, || {
            calls.fetch_add(1, Ordering::SeqCst);
            async { Ok(Reply::Done(())) }
        })
        .seed(ContextSeed::new().meta("reason", "late"))
        .validate(|| Err(ErrorCode::InvalidOrderId));
        let err = invoker(sink).invoke(op).await.unwrap_err();

        assert_eq!(calls.load(Ordering::SeqCst), 0);
        assert_eq!(err.code(), ErrorCode::InvalidOrderId);
        assert!(!err.is_retryable());
        assert_eq!(err.context().meta_text("reason"), Some("late"));
    }

    #[tokio::test(start_paused = true)]
    async fn test_business_decline_not_retried() {
        let sink = Arc::new(MemoryAttemptSink::new());
        let calls = AtomicU32::new(0);
        let rules = rules();

        let op = Operation::new("reassign_order", &rules, || {
            calls.fetch_add(1, Ordering::SeqCst);
            async {
                Ok::<Reply<()>, RawFailure>(Reply::Declined(
                    "Provider already assigned to this order".to_string(),
                ))
            }
        });
        let err = invoker(Arc::clone(&sink)).invoke(op).await.unwrap_err();

        assert_eq!(calls.load(Ordering::SeqCst), 1);
        assert_eq!(err.code(), ErrorCode::ProviderAlreadyAssigned);
        assert!(sink.records().is_empty());
    }

    #[tokio::test(start_paused = true)]
    async fn test_surfaces_last_classification() {
        let sink = Arc::new(MemoryAttemptSink::new());
        let calls = AtomicU32::new(0);
        let rules = rules();

        let op = Operation::new("reassign_order", &rules, || {
            let n = calls.fetch_add(1, Ordering::SeqCst) + 1;
            async move {
                if n == 1 {
                    Err::<Reply<()>, _>(timeout())
                } else {
                    Err(RawFailure::new("permission-denied", "revoked"))
                }
            }
        });
        let err = invoker(Arc::clone(&sink)).invoke(op).await.unwrap_err();

        assert_eq!(calls.load(Ordering::SeqCst), 2);
        assert_eq!(err.code(), ErrorCode::InsufficientAdminPermissions);
        assert_eq!(sink.records().len(), 1);
    }

    #[tokio::test(start_paused = true)]
    async fn test_per_operation_policy_override() {
        let sink = Arc::new(MemoryAttemptSink::new());
        let calls = AtomicU32::new(0);
        let rules = rules();
        let policy = RetryPolicy {
            max_attempts: 5,
            base_delay_ms: 10,
            backoff_multiplier: 2.0,
            max_delay_ms: 40,
        };

        let op = Operation::new("list_available_providers", &rules, || {
            calls.fetch_add(1, Ordering::SeqCst);
            async { Err::<Reply<()>, _>(timeout()) }
        })
        .policy(policy);
        let _ = invoker(Arc::clone(&sink)).invoke(op).await.unwrap_err();

        assert_eq!(calls.load(Ordering::SeqCst), 5);
        let delays: Vec<u64> = sink.records().iter().map(|r| r.delay_ms()).collect();
        assert_eq!(delays, vec![10, 20, 40, 40]);
    }
}
