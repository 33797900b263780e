use mongodb::bson::oid::ObjectId;
use serde::{Deserialize, Serialize};

/// User document (stored in the `users` collection).
///
/// Every field is optional and unvalidated; any subset may be absent.
/// MongoDB assigns `_id` at insert, clients never supply it.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct User {
    #[serde(rename = "_id", skip_serializing_if = "Option::is_none")]
    pub id: Option<ObjectId>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub wyma_number: Option<String>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub age_category: Option<String>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub sex: Option<String>,
}

/// One element of the POST /users array. Unknown fields (including
/// any client-supplied id) are ignored.
#[derive(Debug, Default, Deserialize, utoipa::ToSchema)]
pub struct CreateUserRequest {
    pub wyma_number: Option<String>,
    pub name: Option<String>,
    pub age_category: Option<String>,
    pub sex: Option<String>,
}

impl From<CreateUserRequest> for User {
    fn from(r: CreateUserRequest) -> Self {
        User {
            id: None,
            wyma_number: r.wyma_number,
            name: r.name,
            age_category: r.age_category,
            sex: r.sex,
        }
    }
}

/// Update payload: any subset of the user fields. Present fields
/// overwrite, omitted fields are preserved.
#[derive(Debug, Default, Deserialize, utoipa::ToSchema)]
pub struct UpdateUserRequest {
    pub wyma_number: Option<String>,
    pub name: Option<String>,
    pub age_category: Option<String>,
    pub sex: Option<String>,
}

/// Query parameters for GET /users. Each selector is an exact-match
/// equality filter; absent or empty selectors impose no constraint.
#[derive(Debug, Default, Deserialize, utoipa::IntoParams)]
pub struct UserFilter {
    pub name: Option<String>,
    pub wyma_number: Option<String>,
    pub age_category: Option<String>,
    pub sex: Option<String>,
}

/// Response shape: the document with its ObjectId rendered as hex.
#[derive(Debug, Serialize, utoipa::ToSchema)]
pub struct UserResponse {
    pub id: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub wyma_number: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub age_category: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub sex: Option<String>,
}

impl From<User> for UserResponse {
    fn from(u: User) -> Self {
        UserResponse {
            id: u.id.map(|id| id.to_hex()).unwrap_or_default(),
            wyma_number: u.wyma_number,
            name: u.name,
            age_category: u.age_category,
            sex: u.sex,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use mongodb::bson;

    #[test]
    fn user_round_trips_through_bson_with_underscore_id() {
        let user = User {
            id: Some(ObjectId::new()),
            wyma_number: Some("W-001".into()),
            name: Some("Alice".into()),
            age_category: None,
            sex: Some("F".into()),
        };

        let doc = bson::to_document(&user).unwrap();
        assert!(doc.contains_key("_id"));
        assert!(!doc.contains_key("age_category"));

        let back: User = bson::from_document(doc).unwrap();
        assert_eq!(back.id, user.id);
        assert_eq!(back.name.as_deref(), Some("Alice"));
        assert_eq!(back.age_category, None);
    }

    #[test]
    fn create_payload_ignores_unknown_fields() {
        let user: User = serde_json::from_value(serde_json::json!({
            "name": "Bob",
            "nickname": "bobby"
        }))
        .unwrap();

        assert_eq!(user.name.as_deref(), Some("Bob"));
        assert_eq!(user.id, None);
    }

    #[test]
    fn response_renders_hex_id() {
        let oid = ObjectId::new();
        let user = User {
            id: Some(oid),
            wyma_number: None,
            name: Some("Alice".into()),
            age_category: None,
            sex: None,
        };

        let resp = UserResponse::from(user);
        assert_eq!(resp.id, oid.to_hex());

        let json = serde_json::to_value(&resp).unwrap();
        assert!(json.get("wyma_number").is_none());
    }
}
