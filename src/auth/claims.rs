use serde::{Deserialize, Serialize};

/// JWT payload used for authentication. Besides the registered claims it
/// carries the role flags the handlers gate on, so authorization needs no
/// extra database round trip.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Claims {
    pub sub: i32,           // user ID
    pub username: String,   // login name
    pub is_admin: bool,     // admin role flag
    pub is_team_lead: bool, // team lead role flag
    pub team_id: Option<i32>,
    pub iat: usize, // issued at (unix timestamp)
    pub exp: usize, // expires at (unix timestamp)
    pub iss: String,
    pub aud: String,
}
