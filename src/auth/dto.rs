use serde::{Deserialize, Serialize};

/// Request body for login.
#[derive(Debug, Deserialize)]
pub struct LoginRequest {
    pub username: String,
    pub password: String,
}

/// Request body for the forced/self-service password change.
#[derive(Debug, Deserialize)]
pub struct UpdatePasswordRequest {
    pub password: String,
}

/// Response returned after login or password update. `is_first_login`
/// tells the client to route the user to the password-reset screen.
#[derive(Debug, Serialize)]
pub struct AuthResponse {
    pub token: String,
    pub is_first_login: bool,
    pub user: PublicUser,
}

/// Public part of the user returned to the client; never the hash.
#[derive(Debug, Serialize)]
pub struct PublicUser {
    pub id: i32,
    pub username: String,
    pub name: Option<String>,
    pub is_admin: bool,
    pub is_team_lead: bool,
    pub team_id: Option<i32>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn public_user_never_leaks_password_fields() {
        let user = PublicUser {
            id: 1,
            username: "agent07".into(),
            name: Some("Agent".into()),
            is_admin: false,
            is_team_lead: false,
            team_id: None,
        };
        let json = serde_json::to_string(&user).unwrap();
        assert!(json.contains("agent07"));
        assert!(!json.contains("password"));
    }
}
