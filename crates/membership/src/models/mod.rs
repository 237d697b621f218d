pub mod athlete;
pub mod calendar;
pub mod fee;
pub mod menu;

pub use athlete::{Athlete, AthleteDirectory};
pub use fee::Fee;
pub use menu::{MenuItem, Role, accessible_menu};
