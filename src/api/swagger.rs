use utoipa::OpenApi;

#[derive(OpenApi)]
#[openapi(
    info(
        title = "Wyma User Service API",
        version = "1.0.0",
        description = "Record-management API for the Wyma user collection. Bulk creation with explicit partial-failure reporting, exact-match filtered listing, and id-keyed read/update/delete."
    ),
    paths(
        crate::api::users::create_users,
        crate::api::users::get_users,
        crate::api::users::get_user,
        crate::api::users::update_user,
        crate::api::users::delete_user,
        crate::api::health::health_check,
    ),
    components(
        schemas(
            crate::models::CreateUserRequest,
            crate::models::UpdateUserRequest,
            crate::models::UserResponse,
            crate::api::health::HealthResponse,
        )
    ),
    tags(
        (name = "Users", description = "CRUD operations on the user collection."),
        (name = "Health", description = "Liveness check.")
    )
)]
pub struct ApiDoc;
