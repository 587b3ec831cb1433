pub mod ceiling;
pub mod resource;
pub mod role;

pub use ceiling::ApprovalCeiling;
pub use resource::{Action, FinancialCategory, ResourceKind};
pub use role::{Role, ScopeFlags, ViewScope};
