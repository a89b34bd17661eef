use std::{future::Future, net::IpAddr};

use folio_models::contact::RateLimitState;

/// Persists the per-client [`RateLimitState`].
#[cfg_attr(feature = "mock", mockall::automock)]
pub trait ContactRateLimitService: Send + Sync + 'static {
    /// Returns the stored state of `client`, or the default state if nothing
    /// has been stored yet.
    fn load(&self, client: IpAddr) -> impl Future<Output = anyhow::Result<RateLimitState>> + Send;

    /// Stores the state of `client`.
    fn save(
        &self,
        client: IpAddr,
        state: RateLimitState,
    ) -> impl Future<Output = anyhow::Result<()>> + Send;

    /// Removes the stored state of `client`.
    fn reset(&self, client: IpAddr) -> impl Future<Output = anyhow::Result<()>> + Send;
}

#[cfg(feature = "mock")]
impl MockContactRateLimitService {
    pub fn with_load(mut self, client: IpAddr, result: RateLimitState) -> Self {
        self.expect_load()
            .once()
            .with(mockall::predicate::eq(client))
            .return_once(move |_| Box::pin(std::future::ready(Ok(result))));
        self
    }

    pub fn with_save(mut self, client: IpAddr, state: RateLimitState) -> Self {
        self.expect_save()
            .once()
            .with(mockall::predicate::eq(client), mockall::predicate::eq(state))
            .return_once(|_, _| Box::pin(std::future::ready(Ok(()))));
        self
    }

    pub fn with_save_error(mut self, client: IpAddr, state: RateLimitState) -> Self {
        self.expect_save()
            .once()
            .with(mockall::predicate::eq(client), mockall::predicate::eq(state))
            .return_once(|_, _| {
                Box::pin(std::future::ready(Err(anyhow::anyhow!("storage unavailable"))))
            });
        self
    }

    pub fn with_reset(mut self, client: IpAddr) -> Self {
        self.expect_reset()
            .once()
            .with(mockall::predicate::eq(client))
            .return_once(|_| Box::pin(std::future::ready(Ok(()))));
        self
    }
}
