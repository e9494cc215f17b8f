/// Customer lifecycle status as stored in the `status` column.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CustomerStatus {
    /// Freshly created, not yet worked.
    New = 0,
    /// An agent has picked up the customer.
    InProgress = 1,
    /// Call concluded.
    Closed = 2,
}

impl CustomerStatus {
    pub fn as_i16(self) -> i16 {
        self as i16
    }
}

impl TryFrom<i16> for CustomerStatus {
    type Error = i16;

    fn try_from(value: i16) -> Result<Self, Self::Error> {
        match value {
            0 => Ok(CustomerStatus::New),
            1 => Ok(CustomerStatus::InProgress),
            2 => Ok(CustomerStatus::Closed),
            other => Err(other),
        }
    }
}

/// The transition table. New customers may be picked up or closed directly,
/// in-progress customers may only be closed, and a closed customer can be
/// reopened by an admin. Everything else, self-transitions included, is
/// rejected.
pub fn transition_allowed(
    current: CustomerStatus,
    requested: CustomerStatus,
    actor_is_admin: bool,
) -> bool {
    use CustomerStatus::*;
    match (current, requested) {
        (New, InProgress) | (New, Closed) | (InProgress, Closed) => true,
        (Closed, InProgress) => actor_is_admin,
        _ => false,
    }
}

/// The write a permitted transition wants: the status to store and the
/// actor attribution to store with it.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TransitionPlan {
    pub new_status: CustomerStatus,
    pub updated_by: Option<i32>,
}

/// Evaluates the table and, when the move is legal, decides the attribution.
/// Reopening from Closed deliberately drops the actor: `updated_by` is
/// cleared no matter who performs it.
pub fn plan_transition(
    current: CustomerStatus,
    requested: CustomerStatus,
    actor: i32,
    actor_is_admin: bool,
) -> Option<TransitionPlan> {
    if !transition_allowed(current, requested, actor_is_admin) {
        return None;
    }
    let updated_by = if current == CustomerStatus::Closed {
        None
    } else {
        Some(actor)
    };
    Some(TransitionPlan {
        new_status: requested,
        updated_by,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use CustomerStatus::*;

    const ALL: [CustomerStatus; 3] = [New, InProgress, Closed];

    #[test]
    fn decodes_known_codes_only() {
        assert_eq!(CustomerStatus::try_from(0), Ok(New));
        assert_eq!(CustomerStatus::try_from(1), Ok(InProgress));
        assert_eq!(CustomerStatus::try_from(2), Ok(Closed));
        assert_eq!(CustomerStatus::try_from(3), Err(3));
        assert_eq!(CustomerStatus::try_from(-1), Err(-1));
    }

    #[test]
    fn new_can_move_to_in_progress_or_closed() {
        assert!(transition_allowed(New, InProgress, false));
        assert!(transition_allowed(New, Closed, false));
    }

    #[test]
    fn in_progress_can_only_close() {
        assert!(transition_allowed(InProgress, Closed, false));
        assert!(!transition_allowed(InProgress, New, false));
        assert!(!transition_allowed(InProgress, New, true));
    }

    #[test]
    fn reopen_from_closed_is_admin_only() {
        assert!(!transition_allowed(Closed, InProgress, false));
        assert!(transition_allowed(Closed, InProgress, true));
    }

    #[test]
    fn nothing_ever_returns_to_new() {
        for current in [InProgress, Closed] {
            for admin in [false, true] {
                assert!(!transition_allowed(current, New, admin));
            }
        }
    }

    #[test]
    fn self_transitions_are_rejected() {
        for status in ALL {
            for admin in [false, true] {
                assert!(!transition_allowed(status, status, admin));
            }
        }
    }

    #[test]
    fn plan_keeps_actor_on_forward_moves() {
        for (current, requested) in [(New, InProgress), (New, Closed), (InProgress, Closed)] {
            let plan = plan_transition(current, requested, 42, false).expect("allowed");
            assert_eq!(plan.new_status, requested);
            assert_eq!(plan.updated_by, Some(42));
        }
    }

    #[test]
    fn plan_drops_actor_on_admin_reopen() {
        let plan = plan_transition(Closed, InProgress, 42, true).expect("admin may reopen");
        assert_eq!(plan.new_status, InProgress);
        assert_eq!(plan.updated_by, None);
    }

    #[test]
    fn plan_refuses_what_the_table_refuses() {
        assert_eq!(plan_transition(Closed, InProgress, 42, false), None);
        assert_eq!(plan_transition(InProgress, New, 42, true), None);
        assert_eq!(plan_transition(New, New, 42, true), None);
    }

    #[test]
    fn full_table_sweep() {
        // Every (current, requested, admin) triple; allowed iff listed.
        for current in ALL {
            for requested in ALL {
                for admin in [false, true] {
                    let expected = matches!(
                        (current, requested),
                        (New, InProgress) | (New, Closed) | (InProgress, Closed)
                    ) || (current == Closed && requested == InProgress && admin);
                    assert_eq!(
                        transition_allowed(current, requested, admin),
                        expected,
                        "({:?} -> {:?}, admin={})",
                        current,
                        requested,
                        admin
                    );
                }
            }
        }
    }
}
