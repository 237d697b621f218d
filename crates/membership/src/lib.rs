pub mod dto;
pub mod error;
pub mod models;
pub mod services;

pub use dto::membership::ActiveMembership;
pub use error::{MembershipError, Result};
pub use models::{Athlete, AthleteDirectory, Fee, MenuItem, Role};
pub use services::projector::{MEMBERSHIP_DAYS, project_active_memberships};
