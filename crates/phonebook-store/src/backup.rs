use crate::db;
use crate::error::{Result, StoreError};
use crate::paths;
use rusqlite::backup::Backup;
use rusqlite::Connection;
use std::fs;
use std::path::{Path, PathBuf};
use std::time::Duration;
use tracing::debug;

const PAGES_PER_STEP: i32 = 100;
const PAUSE_BETWEEN_STEPS: Duration = Duration::from_millis(10);

/// Copies the live database into `path` using SQLite's online backup.
///
/// Targets that resolve to the live database file or its WAL/SHM sidecars
/// are rejected with [`StoreError::InvalidBackupPath`].
pub fn backup_to(conn: &Connection, path: &Path) -> Result<()> {
    paths::ensure_parent_dir(path)?;
    let target = absolute_target(path)?;
    if let Some(live) = live_db_path(conn)? {
        let live = absolute_target(&live)?;
        if targets_live_db(&target, &live)? {
            return Err(StoreError::InvalidBackupPath(path.to_path_buf()));
        }
    }

    let mut dest = Connection::open(&target)?;
    {
        let backup = Backup::new(conn, &mut dest)?;
        backup.run_to_completion(PAGES_PER_STEP, PAUSE_BETWEEN_STEPS, None)?;
    }
    db::restrict_db_permissions(&target)?;
    debug!(path = %target.display(), "backup written");
    Ok(())
}

fn targets_live_db(target: &Path, live: &Path) -> Result<bool> {
    if target == live {
        return Ok(true);
    }
    for suffix in ["-wal", "-shm", "-journal"] {
        let mut sidecar = live.as_os_str().to_owned();
        sidecar.push(suffix);
        if target == Path::new(&sidecar) {
            return Ok(true);
        }
    }
    same_inode(target, live)
}

fn absolute_target(path: &Path) -> Result<PathBuf> {
    if path.exists() {
        return Ok(fs::canonicalize(path)?);
    }
    let file_name = path
        .file_name()
        .ok_or_else(|| StoreError::InvalidBackupPath(path.to_path_buf()))?;
    let parent = match path.parent() {
        Some(parent) if !parent.as_os_str().is_empty() => parent,
        _ => Path::new("."),
    };
    Ok(fs::canonicalize(parent)?.join(file_name))
}

fn live_db_path(conn: &Connection) -> Result<Option<PathBuf>> {
    // In-memory databases report an empty file name.
    match conn.path() {
        Some(file) if !file.is_empty() => Ok(Some(PathBuf::from(file))),
        _ => Ok(None),
    }
}

#[cfg(unix)]
fn same_inode(target: &Path, live: &Path) -> Result<bool> {
    use std::os::unix::fs::MetadataExt;
    if !target.exists() || !live.exists() {
        return Ok(false);
    }
    let target_meta = fs::metadata(target)?;
    let live_meta = fs::metadata(live)?;
    Ok(target_meta.dev() == live_meta.dev() && target_meta.ino() == live_meta.ino())
}

#[cfg(not(unix))]
fn same_inode(_target: &Path, _live: &Path) -> Result<bool> {
    Ok(false)
}
