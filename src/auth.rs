//! Challenge identifiers, redacted token secrets, and identity token claim checks.

pub mod challenge;
pub mod claims;
pub mod secret;

pub use challenge::*;
pub use claims::*;
pub use secret::*;
