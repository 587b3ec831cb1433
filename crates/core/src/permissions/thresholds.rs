use rust_decimal::Decimal;

use crate::domain::{ApprovalCeiling, FinancialCategory, Role};
use crate::errors::PolicyError;
use crate::permissions::matrix::role_permissions;

pub fn ceiling_for(role: Role, category: FinancialCategory) -> ApprovalCeiling {
    role_permissions(role).ceiling(category)
}

/// Ceiling-only check: does `role`'s delegated authority for `category`
/// cover `amount`? Negative amounts are rejected.
pub fn can_approve_amount(
    role: Role,
    amount: Decimal,
    category: FinancialCategory,
) -> Result<bool, PolicyError> {
    let amount = validate_amount(amount)?;
    Ok(ceiling_for(role, category).covers(amount))
}

pub(crate) fn validate_amount(amount: Decimal) -> Result<Decimal, PolicyError> {
    if amount < Decimal::ZERO {
        return Err(PolicyError::invalid_argument("amount", amount.to_string()));
    }
    Ok(amount)
}

#[cfg(test)]
mod tests {
    use rust_decimal::Decimal;

    use super::{can_approve_amount, ceiling_for};
    use crate::domain::{ApprovalCeiling, FinancialCategory, Role};
    use crate::errors::PolicyError;

    #[test]
    fn finite_ceilings_are_inclusive_at_the_boundary() {
        for role in Role::ALL {
            for category in FinancialCategory::ALL {
                let ApprovalCeiling::Limit(ceiling) = ceiling_for(role, category) else {
                    continue;
                };
                assert_eq!(
                    can_approve_amount(role, ceiling, category),
                    Ok(true),
                    "{role} {category} at ceiling"
                );
                assert_eq!(
                    can_approve_amount(role, ceiling + Decimal::ONE, category),
                    Ok(false),
                    "{role} {category} above ceiling"
                );
            }
        }
    }

    #[test]
    fn unlimited_ceilings_cover_arbitrarily_large_amounts() {
        let huge = Decimal::from(i64::MAX);
        for role in Role::ALL {
            for category in FinancialCategory::ALL {
                if ceiling_for(role, category).is_unlimited() {
                    assert_eq!(can_approve_amount(role, huge, category), Ok(true));
                }
            }
        }
    }

    #[test]
    fn pmo_and_admin_are_unlimited_everywhere() {
        for role in [Role::Pmo, Role::Admin] {
            for category in FinancialCategory::ALL {
                assert!(ceiling_for(role, category).is_unlimited(), "{role} {category}");
            }
        }
    }

    #[test]
    fn area_manager_mixes_finite_and_unlimited() {
        assert_eq!(
            ceiling_for(Role::AreaManager, FinancialCategory::Expense),
            ApprovalCeiling::limit(50_000)
        );
        assert!(ceiling_for(Role::AreaManager, FinancialCategory::Safe).is_unlimited());
        assert!(ceiling_for(Role::AreaManager, FinancialCategory::Payroll).is_unlimited());
    }

    #[test]
    fn zero_ceiling_denies_any_positive_amount() {
        assert_eq!(
            can_approve_amount(Role::Viewer, Decimal::ONE, FinancialCategory::Expense),
            Ok(false)
        );
        assert_eq!(
            can_approve_amount(Role::SiteEngineer, Decimal::new(1, 2), FinancialCategory::Payroll),
            Ok(false)
        );
    }

    #[test]
    fn cashier_within_expense_ceiling() {
        assert_eq!(
            can_approve_amount(Role::Cashier, Decimal::from(3_000), FinancialCategory::Expense),
            Ok(true)
        );
    }

    #[test]
    fn negative_amount_is_invalid_argument() {
        let result =
            can_approve_amount(Role::Pmo, Decimal::new(-150, 2), FinancialCategory::Expense);
        assert_eq!(
            result,
            Err(PolicyError::InvalidArgument { field: "amount", value: "-1.50".to_string() })
        );
    }

    #[test]
    fn zero_amount_fits_a_zero_ceiling() {
        assert_eq!(
            can_approve_amount(Role::Viewer, Decimal::ZERO, FinancialCategory::Safe),
            Ok(true)
        );
    }
}
