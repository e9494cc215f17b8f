use serde::Deserialize;

/// Request body for provisioning an employee account. `user_role` follows
/// the admin UI's encoding: "0" admin, "1" team lead, anything else member.
#[derive(Debug, Deserialize)]
pub struct CreateEmployeeRequest {
    pub username: Option<String>,
    pub name: Option<String>,
    pub user_role: Option<String>,
    pub status: Option<i16>,
    pub team_id: Option<i32>,
}

/// Request body for flagging an account for a forced password reset.
#[derive(Debug, Deserialize)]
pub struct ResetPasswordRequest {
    pub id: Option<i32>,
}

/// Role flags decoded from the UI's `user_role` string.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RoleFlags {
    pub is_admin: bool,
    pub is_team_lead: bool,
}

pub fn parse_role(user_role: Option<&str>) -> RoleFlags {
    RoleFlags {
        is_admin: user_role == Some("0"),
        is_team_lead: user_role == Some("1"),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn role_codes_map_to_flags() {
        assert_eq!(
            parse_role(Some("0")),
            RoleFlags {
                is_admin: true,
                is_team_lead: false
            }
        );
        assert_eq!(
            parse_role(Some("1")),
            RoleFlags {
                is_admin: false,
                is_team_lead: true
            }
        );
        // Unknown codes and absence both mean plain member.
        for role in [Some("2"), Some("admin"), None] {
            let flags = parse_role(role);
            assert!(!flags.is_admin);
            assert!(!flags.is_team_lead);
        }
    }
}
