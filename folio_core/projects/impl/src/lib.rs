use std::sync::Arc;

use folio_core_projects_contracts::ProjectsFeatureService;
use folio_di::Build;
use folio_models::project::{Project, ProjectFilter};
use folio_utils::trace_instrument;

#[derive(Debug, Clone, Build)]
pub struct ProjectsFeatureServiceImpl {
    config: ProjectsFeatureConfig,
}

#[derive(Debug, Clone)]
pub struct ProjectsFeatureConfig {
    pub projects: Arc<[Project]>,
}

impl ProjectsFeatureService for ProjectsFeatureServiceImpl {
    #[trace_instrument(skip(self))]
    fn list(&self, filter: ProjectFilter) -> Vec<Project> {
        self.config
            .projects
            .iter()
            .filter(|project| filter.matches(project))
            .cloned()
            .collect()
    }
}
