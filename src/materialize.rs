//! Writing a crawled [`Mapping`] to disk.
//!
//! A remote path can be both a value and a directory (`/foo` and `/foo/`),
//! so the two may compete for the same name on disk. Entries are written
//! deepest first; whichever loses is skipped with a warning.

use std::fs;
use std::io::ErrorKind;
use std::path::Path;

use tracing::{debug, info, warn};

use crate::error::MirrorError;
use crate::mapping::Mapping;

/// Counts from one materialization run.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Summary {
    pub written: usize,
    /// Entries dropped because of a file/directory conflict.
    pub skipped: usize,
}

#[derive(Debug, Clone, Copy)]
enum Step {
    CreateParents,
    WriteFile,
}

/// Whether an I/O error is a file/directory clash rather than a real failure.
fn is_conflict(step: Step, kind: ErrorKind) -> bool {
    match step {
        // A component of the parent chain already exists as a file.
        Step::CreateParents => {
            matches!(kind, ErrorKind::NotADirectory | ErrorKind::AlreadyExists)
        }
        // The target itself was created as a directory by a deeper entry.
        Step::WriteFile => matches!(kind, ErrorKind::IsADirectory | ErrorKind::NotADirectory),
    }
}

/// Write every entry of `mapping` beneath `root`.
///
/// Missing directories are created as needed and existing files are
/// overwritten, so repeated runs over the same mapping produce the same tree.
/// Any error other than a file/directory conflict below `root` aborts the
/// run, including `root` itself not being a usable directory.
pub fn materialize(mapping: &Mapping, root: &Path) -> Result<Summary, MirrorError> {
    let mut summary = Summary::default();

    // Once root is a directory, any clash while creating parents lies below it.
    fs::create_dir_all(root).map_err(|err| MirrorError::io(root, err))?;

    for (key, body) in mapping.deepest_first() {
        let target = key.to_fs_path(root);

        if let Some(parent) = target.parent() {
            debug!("Making directory {}", parent.display());
            if let Err(err) = fs::create_dir_all(parent) {
                if is_conflict(Step::CreateParents, err.kind()) {
                    warn!("Skipping {}: {}: {}", key, parent.display(), err);
                    summary.skipped += 1;
                    continue;
                }
                return Err(MirrorError::io(parent, err));
            }
        }

        debug!("Writing file {}", target.display());
        if let Err(err) = fs::write(&target, body) {
            if is_conflict(Step::WriteFile, err.kind()) {
                warn!("Skipping {}: {}: {}", key, target.display(), err);
                summary.skipped += 1;
                continue;
            }
            return Err(MirrorError::io(target, err));
        }
        summary.written += 1;
    }

    info!(
        "Wrote {} files to {} ({} skipped)",
        summary.written,
        root.display(),
        summary.skipped
    );
    Ok(summary)
}
