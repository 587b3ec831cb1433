use crate::domain::Role;

/// Escalation path for `role`, nearest superior first.
///
/// The hierarchy is fixed and does not follow view scopes: a cashier climbs
/// the same ladder as a site engineer. Decision-final roles and `VIEWER` have
/// nowhere to escalate.
pub fn approval_chain(role: Role) -> &'static [Role] {
    match role {
        Role::SiteEngineer | Role::Cashier => {
            &[Role::ZoneManager, Role::ProjectManager, Role::AreaManager, Role::Pmo]
        }
        Role::ZoneManager => &[Role::ProjectManager, Role::AreaManager, Role::Pmo],
        Role::ProjectManager => &[Role::AreaManager, Role::Pmo],
        Role::AreaManager => &[Role::Pmo],
        Role::Pmo | Role::Admin | Role::Viewer => &[],
    }
}

#[cfg(test)]
mod tests {
    use super::approval_chain;
    use crate::domain::Role;

    #[test]
    fn terminal_roles_have_empty_chains() {
        assert!(approval_chain(Role::Pmo).is_empty());
        assert!(approval_chain(Role::Admin).is_empty());
    }

    #[test]
    fn viewer_has_empty_chain() {
        assert!(approval_chain(Role::Viewer).is_empty());
    }

    #[test]
    fn cashier_climbs_like_site_engineer() {
        assert_eq!(approval_chain(Role::Cashier), approval_chain(Role::SiteEngineer));
        assert_eq!(
            approval_chain(Role::Cashier),
            &[Role::ZoneManager, Role::ProjectManager, Role::AreaManager, Role::Pmo]
        );
    }

    #[test]
    fn managers_escalate_to_their_superiors() {
        assert_eq!(
            approval_chain(Role::ZoneManager),
            &[Role::ProjectManager, Role::AreaManager, Role::Pmo]
        );
        assert_eq!(approval_chain(Role::ProjectManager), &[Role::AreaManager, Role::Pmo]);
        assert_eq!(approval_chain(Role::AreaManager), &[Role::Pmo]);
    }

    #[test]
    fn every_non_empty_chain_is_short_and_ends_at_pmo() {
        for role in Role::ALL {
            let chain = approval_chain(role);
            assert!(chain.len() <= 4, "{role} chain too long");
            if let Some(last) = chain.last() {
                assert_eq!(*last, Role::Pmo, "{role} chain must end at PMO");
            }
        }
    }
}
