//! Exclusive lock held by a run that rewrites the document.
//!
//! A sidecar `<document>.pagefix.lock` is created with `create_new`, so only
//! one writer can hold it. The file holds the owner's pid and is removed when
//! the guard drops. While the guard lives Ctrl+C only requests shutdown, so
//! an interrupted run still unwinds and releases the lock. A lock left behind
//! by a process that no longer exists is reclaimed.

use std::ffi::OsString;
use std::fs::{self, File, OpenOptions};
use std::io::{ErrorKind, Write};
use std::path::{Path, PathBuf};

use super::DocumentError;
use crate::debug;
use crate::utils::state::DeferInterrupt;

const LOCK_SUFFIX: &str = ".pagefix.lock";

/// Guard for the document lock.
#[derive(Debug)]
pub struct DocumentLock {
    path: PathBuf,
    // Dropped after the lock file is removed
    _interrupt: DeferInterrupt,
}

impl DocumentLock {
    /// Take the lock for `document`, failing if a live run holds it.
    pub fn acquire(document: &Path) -> Result<Self, DocumentError> {
        let path = lock_path(document);
        let locked = || DocumentError::Locked {
            document: document.to_path_buf(),
            lock: path.clone(),
        };

        let mut file = match create(&path) {
            Ok(file) => file,
            Err(err) if err.kind() == ErrorKind::AlreadyExists => {
                let Some(pid) = stale_owner(&path) else {
                    return Err(locked());
                };
                debug!("lock"; "reclaiming lock left by exited process {}", pid);
                match fs::remove_file(&path) {
                    Ok(()) => {}
                    Err(err) if err.kind() == ErrorKind::NotFound => {}
                    Err(err) => return Err(DocumentError::access("reclaim", &path, err)),
                }
                match create(&path) {
                    Ok(file) => file,
                    Err(err) if err.kind() == ErrorKind::AlreadyExists => return Err(locked()),
                    Err(err) => return Err(DocumentError::access("lock", &path, err)),
                }
            }
            Err(err) => return Err(DocumentError::access("lock", &path, err)),
        };

        // Failing to record the pid only disables reclaiming
        let _ = writeln!(file, "{}", std::process::id());
        Ok(Self {
            path,
            _interrupt: DeferInterrupt::enter(),
        })
    }

    #[cfg(test)]
    pub fn path(&self) -> &Path {
        &self.path
    }
}

impl Drop for DocumentLock {
    fn drop(&mut self) {
        let _ = fs::remove_file(&self.path);
    }
}

fn create(path: &Path) -> std::io::Result<File> {
    OpenOptions::new().write(true).create_new(true).open(path)
}

/// Pid recorded in an existing lock whose process has exited.
///
/// Unreadable or empty locks count as held.
fn stale_owner(path: &Path) -> Option<u32> {
    let pid: u32 = fs::read_to_string(path).ok()?.trim().parse().ok()?;
    (pid != std::process::id() && !process_alive(pid)).then_some(pid)
}

#[cfg(unix)]
fn process_alive(pid: u32) -> bool {
    let Ok(pid) = libc::pid_t::try_from(pid) else {
        return true;
    };
    if pid <= 0 {
        return true;
    }
    // Signal 0 only checks that the process exists
    let result = unsafe { libc::kill(pid, 0) };
    result == 0 || std::io::Error::last_os_error().raw_os_error() == Some(libc::EPERM)
}

#[cfg(not(unix))]
fn process_alive(_pid: u32) -> bool {
    true
}

fn lock_path(document: &Path) -> PathBuf {
    let mut name = document
        .file_name()
        .map(|n| n.to_os_string())
        .unwrap_or_else(|| OsString::from("document"));
    name.push(LOCK_SUFFIX);
    document.with_file_name(name)
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn test_lock_path() {
        assert_eq!(
            lock_path(Path::new("/site/guide.html")),
            PathBuf::from("/site/guide.html.pagefix.lock")
        );
    }

    #[test]
    fn test_second_lock_fails_until_release() {
        let dir = TempDir::new().unwrap();
        let document = dir.path().join("guide.html");

        let first = DocumentLock::acquire(&document).unwrap();
        assert!(first.path().exists());

        let err = DocumentLock::acquire(&document).unwrap_err();
        assert!(matches!(err, DocumentError::Locked { .. }));

        drop(first);
        assert!(!lock_path(&document).exists());
        assert!(DocumentLock::acquire(&document).is_ok());
    }

    #[cfg(unix)]
    #[test]
    fn test_reclaims_lock_of_exited_process() {
        let dir = TempDir::new().unwrap();
        let document = dir.path().join("guide.html");

        let mut child = std::process::Command::new("true").spawn().unwrap();
        let dead = child.id();
        child.wait().unwrap();
        fs::write(lock_path(&document), format!("{dead}\n")).unwrap();

        let lock = DocumentLock::acquire(&document).unwrap();
        let owner = fs::read_to_string(lock.path()).unwrap();
        assert_eq!(owner.trim(), std::process::id().to_string());

        drop(lock);
        assert!(!lock_path(&document).exists());
    }

    #[test]
    fn test_lock_without_pid_stays_locked() {
        let dir = TempDir::new().unwrap();
        let document = dir.path().join("guide.html");
        fs::write(lock_path(&document), "not a pid").unwrap();

        let err = DocumentLock::acquire(&document).unwrap_err();
        assert!(matches!(err, DocumentError::Locked { .. }));
        assert!(lock_path(&document).exists());
    }

    #[test]
    fn test_missing_directory_is_access_error() {
        let dir = TempDir::new().unwrap();
        let document = dir.path().join("missing/guide.html");
        let err = DocumentLock::acquire(&document).unwrap_err();
        assert!(matches!(err, DocumentError::FileAccess { action: "lock", .. }));
    }
}
