use utoipa::{Modify, OpenApi};

/// Folds the domain's path documentation into the top-level document.
struct DomainPaths;

impl Modify for DomainPaths {
    fn modify(&self, openapi: &mut utoipa::openapi::OpenApi) {
        openapi.merge(domain_tasks::ApiDoc::openapi());
    }
}

#[derive(OpenApi)]
#[openapi(
    components(
        schemas(axum_helpers::ErrorResponse)
    ),
    info(
        title = "Todo API",
        version = "0.1.0",
        description = "API for managing tasks and the categories they are filed under"
    ),
    servers(
        (url = "/api", description = "API base path")
    ),
    modifiers(&DomainPaths)
)]
pub struct ApiDoc;
