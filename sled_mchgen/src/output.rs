//! All-or-nothing output of the generated file pair.
//!
//! Both targets are opened as temporary files next to their final path
//! before the schema is read. Text is written into the temporaries and the
//! renames happen only once both texts are complete, so a failed run never
//! leaves a truncated interface or implementation behind.

use crate::emit::Artifacts;
use crate::error::{MchgenError, Result};
use std::io::Write;
use std::path::{Path, PathBuf};
use tempfile::NamedTempFile;
use tracing::{debug, info};

/// One output file staged in its target directory.
#[derive(Debug)]
pub struct PendingOutput {
    target: PathBuf,
    file: NamedTempFile,
}

impl PendingOutput {
    /// Open a temporary file in the directory of `target`.
    pub fn create(target: &Path) -> Result<Self> {
        let dir = parent_dir(target);
        if target.is_dir() {
            return Err(MchgenError::io(
                target,
                std::io::Error::new(std::io::ErrorKind::IsADirectory, "target is a directory"),
            ));
        }

        let file = tempfile::Builder::new()
            .prefix(".mchgen-")
            .suffix(".tmp")
            .tempfile_in(dir)
            .map_err(|e| MchgenError::io(target, e))?;

        #[cfg(unix)]
        {
            use std::os::unix::fs::PermissionsExt;
            file.as_file()
                .set_permissions(std::fs::Permissions::from_mode(0o644))
                .map_err(|e| MchgenError::io(target, e))?;
        }

        debug!("Staged {} at {}", target.display(), file.path().display());
        Ok(Self {
            target: target.to_path_buf(),
            file,
        })
    }

    pub fn target(&self) -> &Path {
        &self.target
    }

    /// Write the full text into the staged file.
    pub fn write(&mut self, text: &str) -> Result<()> {
        self.file
            .write_all(text.as_bytes())
            .and_then(|()| self.file.flush())
            .map_err(|e| MchgenError::io(&self.target, e))
    }

    /// Rename the staged file over the target.
    pub fn commit(self) -> Result<PathBuf> {
        let target = self.target;
        self.file
            .persist(&target)
            .map_err(|e| MchgenError::io(&target, e.error))?;
        Ok(target)
    }
}

fn parent_dir(target: &Path) -> &Path {
    match target.parent() {
        Some(parent) if !parent.as_os_str().is_empty() => parent,
        _ => Path::new("."),
    }
}

/// Absolute path `target` will land on, with `..` and symlinks resolved.
/// The parent directory must exist.
fn resolved(target: &Path) -> Result<PathBuf> {
    if let Ok(path) = target.canonicalize() {
        return Ok(path);
    }
    let name = target.file_name().ok_or_else(|| {
        MchgenError::Usage(format!("{} does not name a file", target.display()))
    })?;
    let dir = parent_dir(target)
        .canonicalize()
        .map_err(|e| MchgenError::io(target, e))?;
    Ok(dir.join(name))
}

/// The staged interface + implementation pair.
#[derive(Debug)]
pub struct OutputPair {
    interface: PendingOutput,
    implementation: PendingOutput,
}

impl OutputPair {
    /// Stage both targets. Two paths naming the same file are a usage error.
    pub fn open(interface: &Path, implementation: &Path) -> Result<Self> {
        let same_file = || {
            MchgenError::Usage(format!(
                "interface and implementation must be different files ({} and {})",
                interface.display(),
                implementation.display()
            ))
        };
        if interface == implementation {
            return Err(same_file());
        }

        let pair = Self {
            interface: PendingOutput::create(interface)?,
            implementation: PendingOutput::create(implementation)?,
        };
        if resolved(interface)? == resolved(implementation)? {
            return Err(same_file());
        }
        Ok(pair)
    }

    /// File name of the interface target, used for the implementation's include line.
    pub fn interface_file_name(&self) -> Option<String> {
        self.interface
            .target()
            .file_name()
            .map(|name| name.to_string_lossy().into_owned())
    }

    /// Write both texts, then move both files into place.
    pub fn commit(mut self, artifacts: &Artifacts) -> Result<()> {
        self.interface.write(&artifacts.interface)?;
        self.implementation.write(&artifacts.implementation)?;

        let interface = self.interface.commit()?;
        info!("Wrote interface {}", interface.display());
        let implementation = self.implementation.commit()?;
        info!("Wrote implementation {}", implementation.display());
        Ok(())
    }
}
