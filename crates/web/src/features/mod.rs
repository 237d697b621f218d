pub mod athletes;
pub mod fees;
pub mod memberships;
pub mod menu;
