//! Identity badge issuer.
//!
//! One non-fungible badge per verified identity. Badges are minted and
//! burned only by the registry contract, inside the registry's own
//! transition, so a badge never outlives the verified status it attests.

pub mod error;
pub mod issuer;

pub use error::BadgeError;
pub use issuer::BadgeIssuer;
