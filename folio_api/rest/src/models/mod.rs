use serde::Serialize;

pub mod contact;
pub mod project;

#[derive(Serialize)]
pub struct ApiError {
    pub detail: &'static str,
}
