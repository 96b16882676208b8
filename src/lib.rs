pub mod bigint_utils;
pub mod error;
mod interpolation;
pub mod ledger;
pub mod params;
pub mod share;
pub mod sharding;

pub use error::{Result, ShareError};
pub use ledger::ShareLedger;
pub use params::SharingParams;
pub use share::Share;
pub use sharding::{generate, generate_with_os_rng, reconstruct};
