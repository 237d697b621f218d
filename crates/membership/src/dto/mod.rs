pub mod athlete;
pub mod fee;
pub mod membership;
pub mod menu;
