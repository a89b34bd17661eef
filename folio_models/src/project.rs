use serde::{Deserialize, Serialize};
use url::Url;

/// An entry of the portfolio's project list.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Project {
    pub id: u64,
    pub title: String,
    pub description: String,
    pub image: Url,
    pub technologies: Vec<String>,
    pub github: Url,
    pub demo: Url,
    #[serde(default)]
    pub featured: bool,
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum ProjectFilter {
    #[default]
    All,
    Featured,
}

impl ProjectFilter {
    pub fn matches(self, project: &Project) -> bool {
        match self {
            ProjectFilter::All => true,
            ProjectFilter::Featured => project.featured,
        }
    }
}
