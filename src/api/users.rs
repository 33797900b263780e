use actix_web::{delete, get, post, put, web, HttpResponse, Responder};
use serde_json::Value;

use crate::database::MongoDB;
use crate::models::{UpdateUserRequest, UserFilter};
use crate::services::user_service::{self, CreateUsersError};
use crate::utils::error::AppError;

fn error_response(err: AppError) -> HttpResponse {
    let body = serde_json::json!({ "error": err.to_string() });
    match err {
        AppError::InvalidRequest(_) => HttpResponse::BadRequest().json(body),
        AppError::NotFound(_) => HttpResponse::NotFound().json(body),
        AppError::Database(_) => HttpResponse::InternalServerError().json(body),
    }
}

/// POST /users - Bulk create from an array of user objects
#[utoipa::path(
    post,
    path = "/users",
    tag = "Users",
    request_body = Vec<crate::models::CreateUserRequest>,
    responses(
        (status = 201, description = "All records inserted", body = Vec<crate::models::UserResponse>),
        (status = 400, description = "Body is not an array, or an insert failed; committed records are reported in `inserted`")
    )
)]
#[post("")]
pub async fn create_users(db: web::Data<MongoDB>, body: web::Json<Value>) -> impl Responder {
    match user_service::create_users(&db, &body).await {
        Ok(users) => HttpResponse::Created().json(users),
        Err(CreateUsersError::NotAnArray) => HttpResponse::BadRequest().json(serde_json::json!({
            "error": "Expected an array of users"
        })),
        Err(CreateUsersError::Partial { error, failed_index, inserted }) => {
            HttpResponse::BadRequest().json(serde_json::json!({
                "error": error,
                "failed_index": failed_index,
                "inserted": inserted,
            }))
        }
    }
}

/// GET /users - List users, filtered by optional exact-match selectors
#[utoipa::path(
    get,
    path = "/users",
    tag = "Users",
    params(crate::models::UserFilter),
    responses(
        (status = 200, description = "Matching records", body = Vec<crate::models::UserResponse>),
        (status = 500, description = "Store failure")
    )
)]
#[get("")]
pub async fn get_users(db: web::Data<MongoDB>, query: web::Query<UserFilter>) -> impl Responder {
    match user_service::find_users(&db, &query).await {
        Ok(users) => HttpResponse::Ok().json(users),
        Err(e) => error_response(e),
    }
}

/// GET /users/{id} - Fetch a single user
#[utoipa::path(
    get,
    path = "/users/{id}",
    tag = "Users",
    params(("id" = String, Path, description = "User ObjectId (hex)")),
    responses(
        (status = 200, description = "The record", body = crate::models::UserResponse),
        (status = 400, description = "Malformed id"),
        (status = 404, description = "No record at this id"),
        (status = 500, description = "Store failure")
    )
)]
#[get("/{id}")]
pub async fn get_user(db: web::Data<MongoDB>, path: web::Path<String>) -> impl Responder {
    match user_service::find_user_by_id(&db, &path.into_inner()).await {
        Ok(user) => HttpResponse::Ok().json(user),
        Err(e) => error_response(e),
    }
}

/// PUT /users/{id} - Update fields in place, returning the post-update record
#[utoipa::path(
    put,
    path = "/users/{id}",
    tag = "Users",
    params(("id" = String, Path, description = "User ObjectId (hex)")),
    request_body = crate::models::UpdateUserRequest,
    responses(
        (status = 200, description = "The updated record", body = crate::models::UserResponse),
        (status = 400, description = "Malformed id or rejected write"),
        (status = 404, description = "No record at this id")
    )
)]
#[put("/{id}")]
pub async fn update_user(
    db: web::Data<MongoDB>,
    path: web::Path<String>,
    body: web::Json<UpdateUserRequest>,
) -> impl Responder {
    match user_service::update_user(&db, &path.into_inner(), &body).await {
        Ok(user) => HttpResponse::Ok().json(user),
        Err(e) => error_response(e),
    }
}

/// DELETE /users/{id} - Remove a user permanently
#[utoipa::path(
    delete,
    path = "/users/{id}",
    tag = "Users",
    params(("id" = String, Path, description = "User ObjectId (hex)")),
    responses(
        (status = 200, description = "Deleted"),
        (status = 400, description = "Malformed id"),
        (status = 404, description = "No record at this id"),
        (status = 500, description = "Store failure")
    )
)]
#[delete("/{id}")]
pub async fn delete_user(db: web::Data<MongoDB>, path: web::Path<String>) -> impl Responder {
    match user_service::delete_user(&db, &path.into_inner()).await {
        Ok(()) => HttpResponse::Ok().json(serde_json::json!({
            "message": "User deleted successfully"
        })),
        Err(e) => error_response(e),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn error_responses_map_to_the_right_status() {
        use actix_web::http::StatusCode;

        let resp = error_response(AppError::InvalidRequest("Invalid user id".into()));
        assert_eq!(resp.status(), StatusCode::BAD_REQUEST);

        let resp = error_response(AppError::NotFound("User not found".into()));
        assert_eq!(resp.status(), StatusCode::NOT_FOUND);

        let resp = error_response(AppError::Database("boom".into()));
        assert_eq!(resp.status(), StatusCode::INTERNAL_SERVER_ERROR);
    }
}
