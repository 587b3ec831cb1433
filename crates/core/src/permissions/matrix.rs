use std::sync::OnceLock;

use serde::{Deserialize, Serialize};

use crate::domain::{
    Action, ApprovalCeiling, FinancialCategory, ResourceKind, Role, ScopeFlags, ViewScope,
};

/// Per-resource grant for one of `create`, `update` or `delete`.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct ResourceGrants {
    pub sites: bool,
    pub tasks: bool,
    pub employees: bool,
    pub expenses: bool,
    pub revenues: bool,
    pub safes: bool,
    pub payroll: bool,
    pub reports: bool,
}

impl ResourceGrants {
    pub const ALL: ResourceGrants = ResourceGrants {
        sites: true,
        tasks: true,
        employees: true,
        expenses: true,
        revenues: true,
        safes: true,
        payroll: true,
        reports: true,
    };

    pub const NONE: ResourceGrants = ResourceGrants {
        sites: false,
        tasks: false,
        employees: false,
        expenses: false,
        revenues: false,
        safes: false,
        payroll: false,
        reports: false,
    };

    pub fn allows(&self, kind: ResourceKind) -> bool {
        match kind {
            ResourceKind::Sites => self.sites,
            ResourceKind::Tasks => self.tasks,
            ResourceKind::Employees => self.employees,
            ResourceKind::Expenses => self.expenses,
            ResourceKind::Revenues => self.revenues,
            ResourceKind::Safes => self.safes,
            ResourceKind::Payroll => self.payroll,
            ResourceKind::Reports => self.reports,
        }
    }
}

/// `approve` grants exist only for approvable resource kinds; every other
/// kind is denied.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct ApprovalGrants {
    pub tasks: bool,
    pub expenses: bool,
    pub revenues: bool,
    pub payroll: bool,
    pub safes: bool,
}

impl ApprovalGrants {
    pub const ALL: ApprovalGrants =
        ApprovalGrants { tasks: true, expenses: true, revenues: true, payroll: true, safes: true };

    pub const NONE: ApprovalGrants = ApprovalGrants {
        tasks: false,
        expenses: false,
        revenues: false,
        payroll: false,
        safes: false,
    };

    pub fn allows(&self, kind: ResourceKind) -> bool {
        match kind {
            ResourceKind::Tasks => self.tasks,
            ResourceKind::Expenses => self.expenses,
            ResourceKind::Revenues => self.revenues,
            ResourceKind::Payroll => self.payroll,
            ResourceKind::Safes => self.safes,
            ResourceKind::Sites | ResourceKind::Employees | ResourceKind::Reports => false,
        }
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RolePermissions {
    pub role: Role,
    #[serde(flatten)]
    pub scope: ScopeFlags,
    pub create: ResourceGrants,
    pub update: ResourceGrants,
    pub delete: ResourceGrants,
    pub approve: ApprovalGrants,
    pub expense_limit: ApprovalCeiling,
    pub safe_limit: ApprovalCeiling,
    pub payroll_limit: ApprovalCeiling,
    pub can_generate_reports: bool,
    pub can_view_all_reports: bool,
    pub can_export_reports: bool,
}

impl RolePermissions {
    pub fn allows(&self, resource: ResourceKind, action: Action) -> bool {
        match action {
            Action::Create => self.create.allows(resource),
            Action::Update => self.update.allows(resource),
            Action::Delete => self.delete.allows(resource),
            Action::Approve => self.approve.allows(resource),
        }
    }

    pub fn ceiling(&self, category: FinancialCategory) -> ApprovalCeiling {
        match category {
            FinancialCategory::Expense => self.expense_limit,
            FinancialCategory::Safe => self.safe_limit,
            FinancialCategory::Payroll => self.payroll_limit,
        }
    }
}

static PERMISSION_TABLE: OnceLock<[RolePermissions; Role::COUNT]> = OnceLock::new();

/// Read-only permission record for `role`. The table is built on first use
/// and never mutated afterwards.
pub fn role_permissions(role: Role) -> &'static RolePermissions {
    let table = PERMISSION_TABLE.get_or_init(|| Role::ALL.map(build_role_permissions));
    &table[role.index()]
}

pub fn has_permission(role: Role, resource: ResourceKind, action: Action) -> bool {
    role_permissions(role).allows(resource, action)
}

fn build_role_permissions(role: Role) -> RolePermissions {
    match role {
        Role::Pmo => RolePermissions {
            role,
            scope: ScopeFlags::for_scope(ViewScope::Organization),
            create: ResourceGrants::ALL,
            update: ResourceGrants::ALL,
            delete: ResourceGrants::ALL,
            approve: ApprovalGrants::ALL,
            expense_limit: ApprovalCeiling::Unlimited,
            safe_limit: ApprovalCeiling::Unlimited,
            payroll_limit: ApprovalCeiling::Unlimited,
            can_generate_reports: true,
            can_view_all_reports: true,
            can_export_reports: true,
        },
        Role::AreaManager => RolePermissions {
            role,
            scope: ScopeFlags::for_scope(ViewScope::Area),
            create: ResourceGrants::ALL,
            update: ResourceGrants::ALL,
            delete: ResourceGrants {
                sites: false,
                tasks: true,
                employees: false,
                expenses: true,
                revenues: true,
                safes: false,
                payroll: false,
                reports: true,
            },
            approve: ApprovalGrants::ALL,
            expense_limit: ApprovalCeiling::limit(50_000),
            safe_limit: ApprovalCeiling::Unlimited,
            payroll_limit: ApprovalCeiling::Unlimited,
            can_generate_reports: true,
            can_view_all_reports: true,
            can_export_reports: true,
        },
        Role::ProjectManager => RolePermissions {
            role,
            scope: ScopeFlags::for_scope(ViewScope::Project),
            create: ResourceGrants { sites: false, ..ResourceGrants::ALL },
            update: ResourceGrants { sites: false, ..ResourceGrants::ALL },
            delete: ResourceGrants { tasks: true, expenses: true, ..ResourceGrants::NONE },
            approve: ApprovalGrants::ALL,
            expense_limit: ApprovalCeiling::limit(25_000),
            safe_limit: ApprovalCeiling::limit(50_000),
            payroll_limit: ApprovalCeiling::limit(100_000),
            can_generate_reports: true,
            can_view_all_reports: false,
            can_export_reports: true,
        },
        Role::ZoneManager => RolePermissions {
            role,
            scope: ScopeFlags::for_scope(ViewScope::Zone),
            create: ResourceGrants {
                tasks: true,
                employees: true,
                expenses: true,
                revenues: true,
                reports: true,
                ..ResourceGrants::NONE
            },
            update: ResourceGrants {
                tasks: true,
                employees: true,
                expenses: true,
                revenues: true,
                ..ResourceGrants::NONE
            },
            delete: ResourceGrants { tasks: true, ..ResourceGrants::NONE },
            approve: ApprovalGrants::ALL,
            expense_limit: ApprovalCeiling::limit(10_000),
            safe_limit: ApprovalCeiling::limit(20_000),
            payroll_limit: ApprovalCeiling::limit(30_000),
            can_generate_reports: true,
            can_view_all_reports: false,
            can_export_reports: true,
        },
        Role::SiteEngineer => RolePermissions {
            role,
            scope: ScopeFlags::for_scope(ViewScope::Site),
            create: ResourceGrants {
                tasks: true,
                expenses: true,
                reports: true,
                ..ResourceGrants::NONE
            },
            update: ResourceGrants { tasks: true, expenses: true, ..ResourceGrants::NONE },
            delete: ResourceGrants::NONE,
            approve: ApprovalGrants { tasks: true, ..ApprovalGrants::NONE },
            expense_limit: ApprovalCeiling::NONE,
            safe_limit: ApprovalCeiling::NONE,
            payroll_limit: ApprovalCeiling::NONE,
            can_generate_reports: true,
            can_view_all_reports: false,
            can_export_reports: false,
        },
        Role::Cashier => RolePermissions {
            role,
            scope: ScopeFlags::for_scope(ViewScope::Site),
            create: ResourceGrants {
                expenses: true,
                revenues: true,
                safes: true,
                ..ResourceGrants::NONE
            },
            update: ResourceGrants {
                expenses: true,
                revenues: true,
                safes: true,
                ..ResourceGrants::NONE
            },
            delete: ResourceGrants::NONE,
            approve: ApprovalGrants { expenses: true, safes: true, ..ApprovalGrants::NONE },
            expense_limit: ApprovalCeiling::limit(5_000),
            safe_limit: ApprovalCeiling::limit(10_000),
            payroll_limit: ApprovalCeiling::NONE,
            can_generate_reports: true,
            can_view_all_reports: false,
            can_export_reports: true,
        },
        Role::Viewer => RolePermissions {
            role,
            scope: ScopeFlags::for_scope(ViewScope::Organization),
            create: ResourceGrants::NONE,
            update: ResourceGrants::NONE,
            delete: ResourceGrants::NONE,
            approve: ApprovalGrants::NONE,
            expense_limit: ApprovalCeiling::NONE,
            safe_limit: ApprovalCeiling::NONE,
            payroll_limit: ApprovalCeiling::NONE,
            can_generate_reports: true,
            can_view_all_reports: true,
            can_export_reports: false,
        },
        Role::Admin => RolePermissions {
            role,
            scope: ScopeFlags::for_scope(ViewScope::Organization),
            create: ResourceGrants::ALL,
            update: ResourceGrants::ALL,
            delete: ResourceGrants::ALL,
            approve: ApprovalGrants::ALL,
            expense_limit: ApprovalCeiling::Unlimited,
            safe_limit: ApprovalCeiling::Unlimited,
            payroll_limit: ApprovalCeiling::Unlimited,
            can_generate_reports: true,
            can_view_all_reports: true,
            can_export_reports: true,
        },
    }
}
