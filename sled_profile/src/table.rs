//! Text table format read by the drive vendor's table compiler.
//!
//! ```text
//! 0,
//! 0,32768
//! ...
//! 2147483648,-32768;
//! ```
//!
//! Every profile starts with a `0, ` line and its last row carries the `;`
//! terminator. Several profiles are simply concatenated.

use crate::curve::Profile;
use crate::error::{ProfileError, Result};
use std::io::{BufWriter, Write};
use std::path::Path;
use tempfile::NamedTempFile;
use tracing::info;

/// First line of every profile block.
pub const PROFILE_HEADER: &str = "0, ";

/// Write one profile block.
pub fn write_profile<W: Write>(out: &mut W, profile: &Profile) -> Result<()> {
    out.write_all(render(profile).as_bytes())?;
    Ok(())
}

/// Write several profile blocks back to back.
pub fn write_profiles<W: Write>(out: &mut W, profiles: &[Profile]) -> Result<()> {
    for profile in profiles {
        write_profile(out, profile)?;
    }
    out.flush()?;
    Ok(())
}

/// Write profiles to `path`, replacing it only once the whole table is written.
pub fn write_file(path: &Path, profiles: &[Profile]) -> Result<()> {
    let dir = match path.parent() {
        Some(parent) if !parent.as_os_str().is_empty() => parent,
        _ => Path::new("."),
    };

    let mut file = NamedTempFile::new_in(dir).map_err(|e| io_error(path, e))?;
    write_to(&mut BufWriter::new(file.as_file_mut()), path, profiles)?;
    file.persist(path).map_err(|e| io_error(path, e.error))?;

    info!("Wrote {} profile(s) to {}", profiles.len(), path.display());
    Ok(())
}

/// Write failures on a file are reported against its final path.
fn write_to<W: Write>(out: &mut W, path: &Path, profiles: &[Profile]) -> Result<()> {
    write_profiles(out, profiles).map_err(|e| match e {
        ProfileError::Write(source) => io_error(path, source),
        other => other,
    })
}

fn io_error(path: &Path, source: std::io::Error) -> ProfileError {
    ProfileError::Io {
        path: path.to_path_buf(),
        source,
    }
}

/// Render one profile block as a string.
pub fn render(profile: &Profile) -> String {
    let mut text = String::with_capacity(profile.len() * 20);
    text.push_str(PROFILE_HEADER);
    text.push('\n');

    let last = profile.len().saturating_sub(1);
    for (i, (position, acceleration)) in profile.rows().enumerate() {
        let terminator = if i == last { ";" } else { "" };
        text.push_str(&format!("{position},{acceleration}{terminator}\n"));
    }
    text
}
