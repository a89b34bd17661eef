use folio_models::project::{Project, ProjectFilter};
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Serialize)]
pub struct ApiProject {
    pub id: u64,
    pub title: String,
    pub description: String,
    pub image: String,
    pub technologies: Vec<String>,
    pub github: String,
    pub demo: String,
    pub featured: bool,
}

impl From<Project> for ApiProject {
    fn from(value: Project) -> Self {
        Self {
            id: value.id,
            title: value.title,
            description: value.description,
            image: value.image.into(),
            technologies: value.technologies,
            github: value.github.into(),
            demo: value.demo.into(),
            featured: value.featured,
        }
    }
}

#[derive(Debug, Clone, Copy, Default, Deserialize)]
pub struct ApiProjectsQuery {
    #[serde(default)]
    pub featured: bool,
}

impl From<ApiProjectsQuery> for ProjectFilter {
    fn from(value: ApiProjectsQuery) -> Self {
        if value.featured {
            Self::Featured
        } else {
            Self::All
        }
    }
}
