// ==================== USER RECORD ACCESS ====================
// All decision logic for the users collection lives here; the api
// layer only translates AppError variants into HTTP statuses.

use crate::{
    database::MongoDB,
    models::{CreateUserRequest, UpdateUserRequest, User, UserFilter, UserResponse},
    utils::error::AppError,
};
use futures::stream::StreamExt;
use mongodb::bson::{doc, oid::ObjectId, Document};
use mongodb::options::ReturnDocument;
use serde_json::Value;

const COLLECTION: &str = "users";

/// Outcome of a failed bulk create.
///
/// Inserts are sequential and non-transactional: records committed
/// before the first failure stay persisted, and `Partial` reports them
/// back to the caller together with the failing index.
#[derive(Debug)]
pub enum CreateUsersError {
    NotAnArray,
    Partial {
        error: String,
        failed_index: usize,
        inserted: Vec<UserResponse>,
    },
}

fn as_user_array(payload: &Value) -> Result<&Vec<Value>, CreateUsersError> {
    payload.as_array().ok_or(CreateUsersError::NotAnArray)
}

/// POST /users - inserts each object one at a time, awaiting each
/// insert before starting the next. Stops at the first failure.
pub async fn create_users(
    db: &MongoDB,
    payload: &Value,
) -> Result<Vec<UserResponse>, CreateUsersError> {
    let items = as_user_array(payload)?;

    let collection = db.collection::<User>(COLLECTION);
    let mut inserted: Vec<UserResponse> = Vec::with_capacity(items.len());

    for (index, item) in items.iter().enumerate() {
        let request: CreateUserRequest = match serde_json::from_value(item.clone()) {
            Ok(request) => request,
            Err(e) => {
                return Err(CreateUsersError::Partial {
                    error: format!("Invalid user object: {}", e),
                    failed_index: index,
                    inserted,
                });
            }
        };

        let mut user: User = request.into();
        match collection.insert_one(&user).await {
            Ok(result) => {
                user.id = result.inserted_id.as_object_id();
                inserted.push(UserResponse::from(user));
            }
            Err(e) => {
                log::error!("Insert failed at index {}: {}", index, e);
                return Err(CreateUsersError::Partial {
                    error: e.to_string(),
                    failed_index: index,
                    inserted,
                });
            }
        }
    }

    Ok(inserted)
}

/// Builds the find filter from the optional query selectors. A
/// selector contributes an exact-match clause iff present and
/// non-empty; clauses combine with logical AND.
pub fn build_filter(query: &UserFilter) -> Document {
    let mut filter = doc! {};

    if let Some(name) = query.name.as_deref().filter(|s| !s.is_empty()) {
        filter.insert("name", name);
    }
    if let Some(wyma_number) = query.wyma_number.as_deref().filter(|s| !s.is_empty()) {
        filter.insert("wyma_number", wyma_number);
    }
    if let Some(age_category) = query.age_category.as_deref().filter(|s| !s.is_empty()) {
        filter.insert("age_category", age_category);
    }
    if let Some(sex) = query.sex.as_deref().filter(|s| !s.is_empty()) {
        filter.insert("sex", sex);
    }

    filter
}

/// GET /users - all records matching the selectors, in the store's
/// natural order.
pub async fn find_users(db: &MongoDB, query: &UserFilter) -> Result<Vec<UserResponse>, AppError> {
    let filter = build_filter(query);
    log::debug!("Listing users with filter: {}", filter);

    let collection = db.collection::<User>(COLLECTION);
    let mut cursor = collection
        .find(filter)
        .await
        .map_err(|e| AppError::Database(e.to_string()))?;

    let mut users = Vec::new();
    while let Some(result) = cursor.next().await {
        let user = result.map_err(|e| AppError::Database(e.to_string()))?;
        users.push(UserResponse::from(user));
    }

    Ok(users)
}

fn parse_user_id(id: &str) -> Result<ObjectId, AppError> {
    ObjectId::parse_str(id).map_err(|_| AppError::InvalidRequest("Invalid user id".to_string()))
}

/// GET /users/{id}
pub async fn find_user_by_id(db: &MongoDB, id: &str) -> Result<UserResponse, AppError> {
    let object_id = parse_user_id(id)?;

    let collection = db.collection::<User>(COLLECTION);
    match collection.find_one(doc! { "_id": object_id }).await {
        Ok(Some(user)) => Ok(UserResponse::from(user)),
        Ok(None) => Err(AppError::NotFound("User not found".to_string())),
        Err(e) => Err(AppError::Database(e.to_string())),
    }
}

fn build_update(request: &UpdateUserRequest) -> Document {
    let mut update = doc! {};

    if let Some(wyma_number) = &request.wyma_number {
        update.insert("wyma_number", wyma_number);
    }
    if let Some(name) = &request.name {
        update.insert("name", name);
    }
    if let Some(age_category) = &request.age_category {
        update.insert("age_category", age_category);
    }
    if let Some(sex) = &request.sex {
        update.insert("sex", sex);
    }

    update
}

/// PUT /users/{id} - applies the present fields as a `$set` and
/// returns the post-update state. Omitted fields are preserved.
pub async fn update_user(
    db: &MongoDB,
    id: &str,
    request: &UpdateUserRequest,
) -> Result<UserResponse, AppError> {
    let object_id = parse_user_id(id)?;
    let update = build_update(request);

    let collection = db.collection::<User>(COLLECTION);

    // Empty payload: nothing to set, return the record as-is.
    if update.is_empty() {
        return match collection.find_one(doc! { "_id": object_id }).await {
            Ok(Some(user)) => Ok(UserResponse::from(user)),
            Ok(None) => Err(AppError::NotFound("User not found".to_string())),
            Err(e) => Err(AppError::Database(e.to_string())),
        };
    }

    match collection
        .find_one_and_update(doc! { "_id": object_id }, doc! { "$set": update })
        .return_document(ReturnDocument::After)
        .await
    {
        Ok(Some(user)) => Ok(UserResponse::from(user)),
        Ok(None) => Err(AppError::NotFound("User not found".to_string())),
        Err(e) => Err(AppError::InvalidRequest(e.to_string())),
    }
}

/// DELETE /users/{id} - permanent, no soft-delete.
pub async fn delete_user(db: &MongoDB, id: &str) -> Result<(), AppError> {
    let object_id = parse_user_id(id)?;

    let collection = db.collection::<User>(COLLECTION);
    match collection.find_one_and_delete(doc! { "_id": object_id }).await {
        Ok(Some(_)) => Ok(()),
        Ok(None) => Err(AppError::NotFound("User not found".to_string())),
        Err(e) => Err(AppError::Database(e.to_string())),
    }
}
