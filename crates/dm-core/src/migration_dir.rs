//! Migration directory scanning and file-pair removal
//!
//! A migration directory holds reversible migrations as pairs of files named
//! `<version>_<description>.up.sql` and `<version>_<description>.down.sql`.
//! Anything else in the directory is ignored.

use crate::error::{CoreError, CoreResult};
use crate::version::MigrationVersion;
use std::collections::BTreeMap;
use std::io::ErrorKind;
use std::path::{Path, PathBuf};

const UP_SUFFIX: &str = ".up.sql";
const DOWN_SUFFIX: &str = ".down.sql";

/// The up and down scripts of one migration version
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MigrationFilePair {
    /// Version shared by both scripts
    pub version: MigrationVersion,
    /// Path to the `.up.sql` script
    pub up: PathBuf,
    /// Path to the `.down.sql` script
    pub down: PathBuf,
}

/// Outcome of removing a migration file pair
#[derive(Debug, Default, Clone, PartialEq, Eq)]
pub struct RemovedFiles {
    /// Files that were deleted
    pub removed: Vec<PathBuf>,
    /// Files that were already gone
    pub missing: Vec<PathBuf>,
}

/// Up/down scripts collected for one version during a scan
#[derive(Default)]
struct VersionFiles {
    ups: Vec<PathBuf>,
    downs: Vec<PathBuf>,
}

/// Handle to a migration directory on disk
#[derive(Debug, Clone)]
pub struct MigrationDir {
    path: PathBuf,
}

impl MigrationDir {
    /// Create a handle for the directory at `path`. Nothing is read yet.
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    /// Directory path
    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Scan the directory and return every migration pair, ordered by version.
    ///
    /// Fails when a version has a down script without an up script (or the
    /// reverse), or more than one script for the same direction.
    pub fn scan(&self) -> CoreResult<Vec<MigrationFilePair>> {
        let entries = std::fs::read_dir(&self.path).map_err(|e| {
            if e.kind() == ErrorKind::NotFound {
                CoreError::MigrationDirNotFound {
                    path: self.path.display().to_string(),
                }
            } else {
                CoreError::IoWithPath {
                    path: self.path.display().to_string(),
                    source: e,
                }
            }
        })?;

        let mut by_version: BTreeMap<MigrationVersion, VersionFiles> = BTreeMap::new();

        for entry in entries {
            let entry = entry.map_err(|e| CoreError::IoWithPath {
                path: self.path.display().to_string(),
                source: e,
            })?;
            let path = entry.path();
            if path.is_dir() {
                continue;
            }
            let Some(file_name) = path.file_name().and_then(|n| n.to_str()) else {
                log::warn!("Skipping non UTF-8 file name in {}", self.path.display());
                continue;
            };

            let is_up = file_name.ends_with(UP_SUFFIX);
            let is_down = file_name.ends_with(DOWN_SUFFIX);
            if !is_up && !is_down {
                log::debug!("Ignoring {}", file_name);
                continue;
            }

            let version = MigrationVersion::from_file_name(file_name).ok_or_else(|| {
                CoreError::InvalidMigrationFileName {
                    file: file_name.to_string(),
                }
            })?;

            let files = by_version.entry(version).or_default();
            if is_up {
                files.ups.push(path);
            } else {
                files.downs.push(path);
            }
        }

        warn_on_mixed_widths(by_version.keys());

        by_version
            .into_iter()
            .map(|(version, files)| pair_files(version, files))
            .collect()
    }

    /// Return the pair with the highest version.
    ///
    /// Fails with [`CoreError::NoDownMigrations`] when the directory holds no
    /// down-migration scripts at all.
    pub fn latest_pair(&self) -> CoreResult<MigrationFilePair> {
        self.scan()?
            .pop()
            .ok_or_else(|| CoreError::NoDownMigrations {
                path: self.path.display().to_string(),
            })
    }

    /// Return the highest version that has a down-migration script.
    pub fn latest_down_version(&self) -> CoreResult<MigrationVersion> {
        Ok(self.latest_pair()?.version)
    }

    /// Delete both scripts of `pair`.
    ///
    /// A script that no longer exists is recorded in
    /// [`RemovedFiles::missing`] and logged, not treated as an error. Any
    /// other IO failure is returned.
    pub fn remove_pair(&self, pair: &MigrationFilePair) -> CoreResult<RemovedFiles> {
        let mut outcome = RemovedFiles::default();

        for path in [&pair.up, &pair.down] {
            match std::fs::remove_file(path) {
                Ok(()) => {
                    log::info!("Removed {}", path.display());
                    outcome.removed.push(path.clone());
                }
                Err(e) if e.kind() == ErrorKind::NotFound => {
                    log::warn!("Migration file already removed: {}", path.display());
                    outcome.missing.push(path.clone());
                }
                Err(e) => {
                    return Err(CoreError::IoWithPath {
                        path: path.display().to_string(),
                        source: e,
                    });
                }
            }
        }

        Ok(outcome)
    }
}

/// Check that a version has exactly one up and one down script.
fn pair_files(version: MigrationVersion, mut files: VersionFiles) -> CoreResult<MigrationFilePair> {
    files.ups.sort();
    files.downs.sort();

    for (direction, list) in [("up", &files.ups), ("down", &files.downs)] {
        if list.len() > 1 {
            return Err(CoreError::DuplicateMigration {
                version: version.into_inner(),
                direction,
                files: join_names(list),
            });
        }
    }

    match (files.ups.pop(), files.downs.pop()) {
        (Some(up), Some(down)) => Ok(MigrationFilePair { version, up, down }),
        (None, Some(down)) => Err(CoreError::UnpairedMigration {
            version: version.into_inner(),
            missing: "up",
            present: join_names(&[down]),
        }),
        (Some(up), None) => Err(CoreError::UnpairedMigration {
            version: version.into_inner(),
            missing: "down",
            present: join_names(&[up]),
        }),
        (None, None) => unreachable!("version entries are only created for a matching file"),
    }
}

fn join_names(paths: &[PathBuf]) -> String {
    paths
        .iter()
        .filter_map(|p| p.file_name().and_then(|n| n.to_str()))
        .collect::<Vec<_>>()
        .join(", ")
}

/// String ordering only tracks creation order for same-width tokens.
fn warn_on_mixed_widths<'a>(versions: impl Iterator<Item = &'a MigrationVersion>) {
    let mut widths: Vec<usize> = versions.map(|v| v.len()).collect();
    widths.sort_unstable();
    widths.dedup();
    if widths.len() > 1 {
        log::warn!(
            "Migration versions have different widths ({:?}); string ordering may not match creation order",
            widths
        );
    }
}

#[cfg(test)]
#[path = "migration_dir_test.rs"]
mod tests;
