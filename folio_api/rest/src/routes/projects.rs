use std::sync::Arc;

use axum::{
    extract::{Query, State},
    routing, Json, Router,
};
use folio_core_projects_contracts::ProjectsFeatureService;

use crate::models::project::{ApiProject, ApiProjectsQuery};

pub fn router(service: Arc<impl ProjectsFeatureService>) -> Router<()> {
    Router::new()
        .route("/api/projects", routing::get(list_projects))
        .with_state(service)
}

async fn list_projects(
    service: State<Arc<impl ProjectsFeatureService>>,
    Query(query): Query<ApiProjectsQuery>,
) -> Json<Vec<ApiProject>> {
    Json(
        service
            .list(query.into())
            .into_iter()
            .map(Into::into)
            .collect(),
    )
}
