//! Cooperative cancellation for storage calls
//!
//! A [`Context`] is handed to every repository operation. It combines a
//! [`CancellationToken`] the caller can trigger with an optional deadline.
//! Backends consult it before touching shared state ([`Context::check`]) and
//! race in-flight I/O against it ([`Context::run`]).

use std::future::IntoFuture;
use std::time::Duration;
use tokio::time::Instant;
use tokio_util::sync::CancellationToken;

/// Why a context stopped accepting work
#[derive(Debug, Clone, Copy, PartialEq, Eq, thiserror::Error)]
pub enum ContextError {
    #[error("context canceled")]
    Cancelled,

    #[error("context deadline exceeded")]
    DeadlineExceeded,
}

/// Cancellation signal plus optional deadline, cheap to clone
///
/// Clones share the same signal: cancelling one cancels all of them.
/// Derived contexts ([`Context::child`], [`Context::with_timeout`]) are
/// cancelled together with their parent but can be cancelled on their own
/// without affecting it.
#[derive(Debug, Clone, Default)]
pub struct Context {
    token: CancellationToken,
    deadline: Option<Instant>,
}

impl Context {
    /// A context that is never cancelled and has no deadline
    pub fn background() -> Self {
        Self::default()
    }

    /// Wrap an existing token, e.g. one owned by a shutdown coordinator
    pub fn from_token(token: CancellationToken) -> Self {
        Self {
            token,
            deadline: None,
        }
    }

    /// Derive a context that can be cancelled independently of this one
    pub fn child(&self) -> Self {
        Self {
            token: self.token.child_token(),
            deadline: self.deadline,
        }
    }

    /// Derive a context that expires at `deadline`, or earlier if this one
    /// already expires sooner
    pub fn with_deadline(&self, deadline: Instant) -> Self {
        let deadline = match self.deadline {
            Some(existing) if existing < deadline => existing,
            _ => deadline,
        };

        Self {
            token: self.token.child_token(),
            deadline: Some(deadline),
        }
    }

    /// Derive a context that expires `timeout` from now
    pub fn with_timeout(&self, timeout: Duration) -> Self {
        self.with_deadline(Instant::now() + timeout)
    }

    /// Signal cancellation to this context and everything derived from it
    pub fn cancel(&self) {
        self.token.cancel();
    }

    pub fn token(&self) -> &CancellationToken {
        &self.token
    }

    pub fn deadline(&self) -> Option<Instant> {
        self.deadline
    }

    /// `Some` once the context is cancelled or past its deadline
    pub fn err(&self) -> Option<ContextError> {
        if self.token.is_cancelled() {
            return Some(ContextError::Cancelled);
        }

        match self.deadline {
            Some(deadline) if Instant::now() >= deadline => Some(ContextError::DeadlineExceeded),
            _ => None,
        }
    }

    /// Fail fast if the context is already done
    pub fn check(&self) -> Result<(), ContextError> {
        match self.err() {
            Some(err) => Err(err),
            None => Ok(()),
        }
    }

    /// Resolves when the context is cancelled or its deadline passes
    pub async fn done(&self) -> ContextError {
        match self.deadline {
            Some(deadline) => tokio::select! {
                _ = self.token.cancelled() => ContextError::Cancelled,
                _ = tokio::time::sleep_until(deadline) => ContextError::DeadlineExceeded,
            },
            None => {
                self.token.cancelled().await;
                ContextError::Cancelled
            }
        }
    }

    /// Drive `future` to completion unless the context finishes first
    ///
    /// Accepts anything awaitable, including the driver's builder-style
    /// actions. A context that is already done never polls `future`.
    /// Otherwise the future is dropped as soon as the signal fires; any side
    /// effect it already caused outside the process is not rolled back.
    pub async fn run<F>(&self, future: F) -> Result<F::Output, ContextError>
    where
        F: IntoFuture,
    {
        self.check()?;
        let future = future.into_future();

        tokio::select! {
            biased;
            err = self.done() => Err(err),
            output = future => Ok(output),
        }
    }
}
