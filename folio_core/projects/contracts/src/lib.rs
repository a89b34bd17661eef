use folio_models::project::{Project, ProjectFilter};

#[cfg_attr(feature = "mock", mockall::automock)]
pub trait ProjectsFeatureService: Send + Sync + 'static {
    /// Returns the configured projects matching `filter` in their configured
    /// order.
    fn list(&self, filter: ProjectFilter) -> Vec<Project>;
}

#[cfg(feature = "mock")]
impl MockProjectsFeatureService {
    pub fn with_list(mut self, filter: ProjectFilter, result: Vec<Project>) -> Self {
        self.expect_list()
            .once()
            .with(mockall::predicate::eq(filter))
            .return_once(|_| result);
        self
    }
}
