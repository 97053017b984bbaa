//! Deferred commits with a single pending slot.
//!
//! Discrete zooms and the double-tap zoom-in do not touch the rendered state
//! when requested. The whole target state (scale, translate and scroll) is
//! held here and applied once it comes due. Only one commit is ever pending:
//! scheduling a new one supersedes the old one.

use std::time::Duration;
use web_time::Instant;

use crate::transform::TransformState;

/// Identifies one scheduled commit.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct CommitToken(u64);

/// A commit waiting for its due time.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PendingCommit {
    /// Token handed out when scheduling
    pub token: CommitToken,
    /// State to commit
    pub target: TransformState,
    /// Earliest time the commit may be applied
    pub due: Instant,
}

/// Holds at most one pending commit.
#[derive(Debug)]
pub struct CommitScheduler {
    delay: Duration,
    next_token: u64,
    pending: Option<PendingCommit>,
}

impl CommitScheduler {
    /// Create a scheduler with the given delay.
    pub fn new(delay: Duration) -> Self {
        Self {
            delay,
            next_token: 0,
            pending: None,
        }
    }

    /// Schedule `target`, replacing any commit still pending.
    pub fn schedule(&mut self, target: TransformState, now: Instant) -> CommitToken {
        let token = CommitToken(self.next_token);
        self.next_token += 1;

        if let Some(stale) = self.pending.replace(PendingCommit {
            token,
            target,
            due: now + self.delay,
        }) {
            log::debug!("Commit {:?} superseded by {:?}", stale.token, token);
        }
        token
    }

    /// Drop the pending commit, if any.
    pub fn cancel(&mut self) -> Option<PendingCommit> {
        let cancelled = self.pending.take();
        if let Some(ref commit) = cancelled {
            log::debug!("Commit {:?} cancelled", commit.token);
        }
        cancelled
    }

    /// Take the pending commit if it is due at `now`.
    pub fn take_due(&mut self, now: Instant) -> Option<PendingCommit> {
        match self.pending {
            Some(commit) if commit.due <= now => self.pending.take(),
            _ => None,
        }
    }

    /// The pending commit, if any.
    pub fn pending(&self) -> Option<&PendingCommit> {
        self.pending.as_ref()
    }

    /// Check if a commit is pending.
    pub fn is_pending(&self) -> bool {
        self.pending.is_some()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn state(scale: f64) -> TransformState {
        TransformState {
            scale,
            ..TransformState::identity()
        }
    }

    #[test]
    fn test_not_due_before_delay() {
        let mut scheduler = CommitScheduler::new(Duration::from_millis(50));
        let now = Instant::now();
        scheduler.schedule(state(2.0), now);

        assert!(scheduler.take_due(now).is_none());
        assert!(scheduler.is_pending());

        let commit = scheduler.take_due(now + Duration::from_millis(50)).unwrap();
        assert_eq!(commit.target.scale, 2.0);
        assert!(!scheduler.is_pending());
    }

    #[test]
    fn test_new_schedule_supersedes_old() {
        let mut scheduler = CommitScheduler::new(Duration::from_millis(50));
        let now = Instant::now();
        let first = scheduler.schedule(state(1.0), now);
        let second = scheduler.schedule(state(1.5), now + Duration::from_millis(10));
        assert_ne!(first, second);

        // The first commit's due time passes, but it no longer exists
        assert!(scheduler.take_due(now + Duration::from_millis(55)).is_none());

        let commit = scheduler.take_due(now + Duration::from_millis(60)).unwrap();
        assert_eq!(commit.token, second);
        assert_eq!(commit.target.scale, 1.5);
    }

    #[test]
    fn test_cancel() {
        let mut scheduler = CommitScheduler::new(Duration::ZERO);
        let now = Instant::now();
        scheduler.schedule(state(3.0), now);
        assert!(scheduler.cancel().is_some());
        assert!(scheduler.take_due(now).is_none());
        assert!(scheduler.cancel().is_none());
    }
}
