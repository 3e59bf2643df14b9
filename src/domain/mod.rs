//! Domain error handling for the deidentifier.
//!
//! All fallible library operations return [`Result<T, DeidError>`]:
//!
//! ```rust
//! use deidentifier::domain::{DeidError, Result};
//!
//! fn example() -> Result<()> {
//!     let config = deidentifier::config::load_config("deidentifier.toml")?;
//!     Ok(())
//! }
//! ```

pub mod errors;
pub mod result;

pub use errors::DeidError;
pub use result::Result;
