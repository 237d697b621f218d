pub mod client;
pub mod error;
#[cfg(any(test, feature = "testing"))]
pub mod memory;
pub mod snapshot;
pub mod traits;

pub use client::ClubClient;
pub use error::{ClientError, Result};
pub use snapshot::Snapshot;
pub use traits::ClubApi;
