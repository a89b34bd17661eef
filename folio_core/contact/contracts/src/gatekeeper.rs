use chrono::{DateTime, Utc};
use folio_models::contact::{ContactSubmission, Evaluation, RateLimitState};

/// Decides whether a contact submission may be delivered.
///
/// Both operations are pure: they depend only on their arguments and the
/// service configuration.
#[cfg_attr(feature = "mock", mockall::automock)]
pub trait ContactGatekeeperService: Send + Sync + 'static {
    /// Validates `submission` and checks the rate limits in `state` at time
    /// `now`.
    ///
    /// The returned state has the rolling window applied and must be persisted
    /// if it differs from `state`, even if the submission is rejected.
    fn evaluate(
        &self,
        submission: &ContactSubmission,
        state: RateLimitState,
        now: DateTime<Utc>,
    ) -> Evaluation;

    /// Returns the state after a submission was delivered at time `now`.
    fn record_acceptance(&self, state: RateLimitState, now: DateTime<Utc>) -> RateLimitState;

    /// Returns `state` with the rolling window applied at time `now`, i.e. with
    /// the submit count cleared if the window has expired.
    fn current_window(&self, state: RateLimitState, now: DateTime<Utc>) -> RateLimitState;
}

#[cfg(feature = "mock")]
impl MockContactGatekeeperService {
    pub fn with_evaluate(
        mut self,
        submission: ContactSubmission,
        state: RateLimitState,
        now: DateTime<Utc>,
        result: Evaluation,
    ) -> Self {
        self.expect_evaluate()
            .once()
            .with(
                mockall::predicate::eq(submission),
                mockall::predicate::eq(state),
                mockall::predicate::eq(now),
            )
            .return_once(|_, _, _| result);
        self
    }

    pub fn with_record_acceptance(
        mut self,
        state: RateLimitState,
        now: DateTime<Utc>,
        result: RateLimitState,
    ) -> Self {
        self.expect_record_acceptance()
            .once()
            .with(mockall::predicate::eq(state), mockall::predicate::eq(now))
            .return_const(result);
        self
    }

    pub fn with_current_window(
        mut self,
        state: RateLimitState,
        now: DateTime<Utc>,
        result: RateLimitState,
    ) -> Self {
        self.expect_current_window()
            .once()
            .with(mockall::predicate::eq(state), mockall::predicate::eq(now))
            .return_const(result);
        self
    }
}
