use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};
use uuid::Uuid;

/// A stored account. Unknown signup fields are kept verbatim in `extra`.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct User {
    /// Absent on records written before ids were assigned.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub id: Option<Uuid>,
    pub first_name: String,
    pub last_name: String,
    pub email: String,
    pub password: String,
    pub branch: String,
    /// Number or string, whatever the client sent.
    pub current_year: Value,
    pub college: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub created_at: Option<DateTime<Utc>>,
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

/// `User` without the password, as returned by signin.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct PublicUser {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub id: Option<Uuid>,
    pub first_name: String,
    pub last_name: String,
    pub email: String,
    pub branch: String,
    pub current_year: Value,
    pub college: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub created_at: Option<DateTime<Utc>>,
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

impl From<&User> for PublicUser {
    fn from(user: &User) -> Self {
        Self {
            id: user.id,
            first_name: user.first_name.clone(),
            last_name: user.last_name.clone(),
            email: user.email.clone(),
            branch: user.branch.clone(),
            current_year: user.current_year.clone(),
            college: user.college.clone(),
            created_at: user.created_at,
            extra: user.extra.clone(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_legacy_record_without_id_deserializes() {
        let json = r#"{
            "firstName": "Asha", "lastName": "Rao", "email": "asha@example.com",
            "password": "pw", "branch": "CSE", "currentYear": "3", "college": "NIT",
            "phone": "12345"
        }"#;
        let user: User = serde_json::from_str(json).unwrap();
        assert!(user.id.is_none());
        assert_eq!(user.extra.get("phone"), Some(&Value::from("12345")));
    }

    #[test]
    fn test_public_user_has_no_password_key() {
        let user: User = serde_json::from_value(serde_json::json!({
            "firstName": "Asha", "lastName": "Rao", "email": "asha@example.com",
            "password": "pw", "branch": "CSE", "currentYear": 3, "college": "NIT"
        }))
        .unwrap();
        let value = serde_json::to_value(PublicUser::from(&user)).unwrap();
        assert!(value.get("password").is_none());
        assert_eq!(value["email"], "asha@example.com");
        assert_eq!(value["currentYear"], 3);
    }
}
