use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::errors::PolicyError;

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum Role {
    Pmo,
    AreaManager,
    ProjectManager,
    ZoneManager,
    SiteEngineer,
    Cashier,
    Viewer,
    Admin,
}

impl Role {
    pub const ALL: [Role; 8] = [
        Role::Pmo,
        Role::AreaManager,
        Role::ProjectManager,
        Role::ZoneManager,
        Role::SiteEngineer,
        Role::Cashier,
        Role::Viewer,
        Role::Admin,
    ];

    pub const COUNT: usize = Self::ALL.len();

    /// Position of the role in [`Role::ALL`]; used to index per-role tables.
    pub const fn index(self) -> usize {
        match self {
            Self::Pmo => 0,
            Self::AreaManager => 1,
            Self::ProjectManager => 2,
            Self::ZoneManager => 3,
            Self::SiteEngineer => 4,
            Self::Cashier => 5,
            Self::Viewer => 6,
            Self::Admin => 7,
        }
    }

    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Pmo => "PMO",
            Self::AreaManager => "AREA_MANAGER",
            Self::ProjectManager => "PROJECT_MANAGER",
            Self::ZoneManager => "ZONE_MANAGER",
            Self::SiteEngineer => "SITE_ENGINEER",
            Self::Cashier => "CASHIER",
            Self::Viewer => "VIEWER",
            Self::Admin => "ADMIN",
        }
    }

    pub const fn label(self) -> &'static str {
        match self {
            Self::Pmo => "Project Management Office",
            Self::AreaManager => "Area Manager",
            Self::ProjectManager => "Project Manager",
            Self::ZoneManager => "Zone Manager",
            Self::SiteEngineer => "Site Engineer",
            Self::Cashier => "Cashier",
            Self::Viewer => "Viewer",
            Self::Admin => "Administrator",
        }
    }

    /// Decision-final roles never escalate further.
    pub const fn is_terminal(self) -> bool {
        matches!(self, Self::Pmo | Self::Admin)
    }

    pub const fn can_initiate_approvals(self) -> bool {
        !matches!(self, Self::Viewer)
    }

    /// Widest data-visibility scope held by the role.
    pub fn view_scope(self) -> ViewScope {
        crate::permissions::role_permissions(self).scope.widest()
    }
}

impl fmt::Display for Role {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Role {
    type Err = PolicyError;

    fn from_str(value: &str) -> Result<Self, Self::Err> {
        let key = value.trim().to_ascii_uppercase().replace('-', "_");
        Self::ALL
            .into_iter()
            .find(|role| role.as_str() == key)
            .ok_or_else(|| PolicyError::invalid_argument("role", value))
    }
}

/// Breadth of data a role may view, ordered widest first.
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ViewScope {
    Organization,
    Area,
    Project,
    Zone,
    Site,
}

impl ViewScope {
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Organization => "organization",
            Self::Area => "area",
            Self::Project => "project",
            Self::Zone => "zone",
            Self::Site => "site",
        }
    }
}

impl fmt::Display for ViewScope {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Hierarchical visibility flags. A wider flag implies every narrower one, so
/// several flags may be set on the same role.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ScopeFlags {
    pub org_wide: bool,
    pub area_wide: bool,
    pub project_wide: bool,
    pub zone_wide: bool,
    pub site_only: bool,
}

impl ScopeFlags {
    pub const fn for_scope(scope: ViewScope) -> Self {
        match scope {
            ViewScope::Organization => Self {
                org_wide: true,
                area_wide: true,
                project_wide: true,
                zone_wide: true,
                site_only: false,
            },
            ViewScope::Area => Self {
                org_wide: false,
                area_wide: true,
                project_wide: true,
                zone_wide: true,
                site_only: false,
            },
            ViewScope::Project => Self {
                org_wide: false,
                area_wide: false,
                project_wide: true,
                zone_wide: true,
                site_only: false,
            },
            ViewScope::Zone => Self {
                org_wide: false,
                area_wide: false,
                project_wide: false,
                zone_wide: true,
                site_only: false,
            },
            ViewScope::Site => Self {
                org_wide: false,
                area_wide: false,
                project_wide: false,
                zone_wide: false,
                site_only: true,
            },
        }
    }

    pub fn widest(&self) -> ViewScope {
        if self.org_wide {
            ViewScope::Organization
        } else if self.area_wide {
            ViewScope::Area
        } else if self.project_wide {
            ViewScope::Project
        } else if self.zone_wide {
            ViewScope::Zone
        } else {
            ViewScope::Site
        }
    }

    /// Whether data owned at `scope` is visible. Site data is visible to
    /// every role; wider scopes require the matching or a wider flag.
    pub fn covers(&self, scope: ViewScope) -> bool {
        self.widest() <= scope
    }
}

#[cfg(test)]
mod tests {
    use super::{Role, ScopeFlags, ViewScope};
    use crate::errors::PolicyError;

    #[test]
    fn role_names_parse_case_insensitively() {
        assert_eq!("zone_manager".parse::<Role>(), Ok(Role::ZoneManager));
        assert_eq!(" PMO ".parse::<Role>(), Ok(Role::Pmo));
        assert_eq!("site-engineer".parse::<Role>(), Ok(Role::SiteEngineer));
    }

    #[test]
    fn unknown_role_is_invalid_argument() {
        let error = "FOREMAN".parse::<Role>().expect_err("unknown role should not parse");
        assert_eq!(
            error,
            PolicyError::InvalidArgument { field: "role", value: "FOREMAN".to_string() }
        );
    }

    #[test]
    fn index_matches_position_in_catalog() {
        for (position, role) in Role::ALL.into_iter().enumerate() {
            assert_eq!(role.index(), position, "{role} is out of place");
        }
    }

    #[test]
    fn wire_names_round_trip_through_serde() {
        let encoded = serde_json::to_string(&Role::ProjectManager).expect("serialize role");
        assert_eq!(encoded, "\"PROJECT_MANAGER\"");
        for role in Role::ALL {
            assert_eq!(role.as_str().parse::<Role>(), Ok(role));
        }
    }

    #[test]
    fn org_wide_flags_cover_every_narrower_scope() {
        let flags = ScopeFlags::for_scope(ViewScope::Organization);
        assert!(flags.covers(ViewScope::Organization));
        assert!(flags.covers(ViewScope::Zone));
        assert!(flags.covers(ViewScope::Site));
    }

    #[test]
    fn site_only_flags_cover_only_sites() {
        let flags = ScopeFlags::for_scope(ViewScope::Site);
        assert!(flags.covers(ViewScope::Site));
        assert!(!flags.covers(ViewScope::Zone));
        assert!(!flags.covers(ViewScope::Organization));
    }

    #[test]
    fn view_scope_reflects_catalog() {
        assert_eq!(Role::Pmo.view_scope(), ViewScope::Organization);
        assert_eq!(Role::AreaManager.view_scope(), ViewScope::Area);
        assert_eq!(Role::ProjectManager.view_scope(), ViewScope::Project);
        assert_eq!(Role::ZoneManager.view_scope(), ViewScope::Zone);
        assert_eq!(Role::SiteEngineer.view_scope(), ViewScope::Site);
        assert_eq!(Role::Cashier.view_scope(), ViewScope::Site);
    }

    #[test]
    fn only_viewer_cannot_initiate() {
        let blocked: Vec<Role> =
            Role::ALL.into_iter().filter(|role| !role.can_initiate_approvals()).collect();
        assert_eq!(blocked, vec![Role::Viewer]);
    }
}
