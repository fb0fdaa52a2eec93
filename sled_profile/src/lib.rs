//! # Sled Motion Profiles
//!
//! Produces the position/acceleration tables the sled drive interpolates
//! during a move. Tables are written as text and converted to the drive's
//! binary format with the vendor's table compiler before upload.
//!
//! The drive expects profile slots 0 and 2 to be present; the default set
//! written by `create_profile` fills slots 0 through 3:
//!
//! | Slot | Curve                       |
//! |------|-----------------------------|
//! | 0    | sinusoid                    |
//! | 1    | ramped sinusoid             |
//! | 2    | minimum jerk                |
//! | 3    | ramped sinusoid, reversed   |
//!
//! # Usage
//!
//! ```rust
//! use sled_profile::{Profile, ProfileKind, table};
//!
//! let profile = Profile::generate(ProfileKind::MinimumJerk, 2048).unwrap();
//! let text = table::render(&profile);
//! assert!(text.starts_with("0, \n0,0\n"));
//! assert!(text.ends_with("2147483647,0;\n"));
//! ```

pub mod curve;
pub mod error;
pub mod table;

pub use crate::curve::{Profile, ProfileKind, Quantize, Sample};
pub use crate::error::{ProfileError, Result};

/// Points per curve in the default table set.
pub const DEFAULT_POINTS: usize = 2048;

/// The table set loaded into the drive when no curve is selected.
pub fn default_set(points: usize) -> Result<Vec<Profile>> {
    let ramped = Profile::generate(ProfileKind::RampedSinusoid, points)?;
    Ok(vec![
        Profile::generate(ProfileKind::Sinusoid, points)?,
        ramped.clone(),
        Profile::generate(ProfileKind::MinimumJerk, points)?,
        ramped.reversed(),
    ])
}
