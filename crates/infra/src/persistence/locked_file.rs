// crates/infra/src/persistence/locked_file.rs
use std::{
    fs::{File, OpenOptions},
    io::{Read, Seek, SeekFrom, Write},
    path::{Path, PathBuf},
    thread,
    time::{Duration, Instant},
};

use fs2::FileExt;
use tracing::{debug, trace};
use visit_counter_domain::LockPolicy;
use visit_counter_shared_kernel::{InfraResult, InfrastructureError, LockKind};

const INITIAL_BACKOFF: Duration = Duration::from_millis(2);
const MAX_BACKOFF: Duration = Duration::from_millis(50);

/// An open record file holding an advisory lock for as long as it lives.
///
/// The lock is released on drop. Methods are called through `FileExt::` so
/// they never resolve to the inherent `File` locking methods of newer std.
#[derive(Debug)]
pub struct LockedFile {
    file: File,
    path: PathBuf,
    kind: LockKind,
}

impl LockedFile {
    /// Open an existing file for reading under a shared lock.
    pub fn open_shared(path: &Path, policy: LockPolicy) -> InfraResult<Self> {
        let file = OpenOptions::new()
            .read(true)
            .open(path)
            .map_err(|source| InfrastructureError::FileOpen { path: path.to_path_buf(), source })?;
        Self::lock(file, path, LockKind::Shared, policy)
    }

    /// Open an existing file for read-modify-write under an exclusive lock.
    ///
    /// The file is not truncated on open; contents are only replaced once
    /// the lock is held.
    pub fn open_exclusive(path: &Path, policy: LockPolicy) -> InfraResult<Self> {
        let file = OpenOptions::new()
            .read(true)
            .write(true)
            .open(path)
            .map_err(|source| InfrastructureError::FileOpen { path: path.to_path_buf(), source })?;
        Self::lock(file, path, LockKind::Exclusive, policy)
    }

    /// Like [`LockedFile::open_exclusive`] but creates the file when missing.
    pub fn create_exclusive(path: &Path, policy: LockPolicy) -> InfraResult<Self> {
        let file = OpenOptions::new()
            .read(true)
            .write(true)
            .create(true)
            .truncate(false)
            .open(path)
            .map_err(|source| InfrastructureError::FileOpen { path: path.to_path_buf(), source })?;
        Self::lock(file, path, LockKind::Exclusive, policy)
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    pub fn kind(&self) -> LockKind {
        self.kind
    }

    /// Read the whole file from the start.
    pub fn read_to_string(&mut self) -> InfraResult<String> {
        let mut contents = String::new();
        self.file
            .seek(SeekFrom::Start(0))
            .and_then(|_| self.file.read_to_string(&mut contents))
            .map_err(|source| InfrastructureError::FileRead { path: self.path.clone(), source })?;
        Ok(contents)
    }

    /// Truncate and rewrite the file in place, then flush it to disk.
    ///
    /// Only valid under an exclusive lock.
    pub fn replace_contents(&mut self, data: &[u8]) -> InfraResult<()> {
        debug_assert_eq!(self.kind, LockKind::Exclusive, "write under a shared lock");
        rewrite(&mut self.file, data)
            .map_err(|source| InfrastructureError::FileWrite { path: self.path.clone(), source })
    }

    fn lock(file: File, path: &Path, kind: LockKind, policy: LockPolicy) -> InfraResult<Self> {
        acquire(&file, path, kind, policy)?;
        trace!(path = %path.display(), %kind, "lock acquired");
        Ok(Self { file, path: path.to_path_buf(), kind })
    }
}

impl Drop for LockedFile {
    fn drop(&mut self) {
        // Closing the handle releases the lock as well; unlocking first just
        // makes it happen before the close.
        let _ = FileExt::unlock(&self.file);
    }
}

fn rewrite(file: &mut File, data: &[u8]) -> std::io::Result<()> {
    file.set_len(0)?;
    file.seek(SeekFrom::Start(0))?;
    file.write_all(data)?;
    file.flush()?;
    file.sync_data()
}

fn acquire(file: &File, path: &Path, kind: LockKind, policy: LockPolicy) -> InfraResult<()> {
    match policy {
        LockPolicy::Blocking => blocking_lock(file, kind)
            .map_err(|source| InfrastructureError::LockFailed { path: path.to_path_buf(), kind, source }),
        LockPolicy::FailFast => match try_lock(file, path, kind)? {
            true => Ok(()),
            false => Err(InfrastructureError::LockUnavailable { path: path.to_path_buf(), kind }),
        },
        LockPolicy::Timeout(limit) => {
            let Some(deadline) = Instant::now().checked_add(limit) else {
                debug!(path = %path.display(), %kind, ?limit, "lock timeout out of range, blocking");
                return acquire(file, path, kind, LockPolicy::Blocking);
            };
            let mut backoff = INITIAL_BACKOFF;
            loop {
                if try_lock(file, path, kind)? {
                    return Ok(());
                }
                let now = Instant::now();
                if now >= deadline {
                    debug!(path = %path.display(), %kind, ?limit, "gave up waiting for lock");
                    return Err(InfrastructureError::LockUnavailable { path: path.to_path_buf(), kind });
                }
                thread::sleep(backoff.min(deadline - now));
                backoff = (backoff * 2).min(MAX_BACKOFF);
            }
        }
    }
}

fn blocking_lock(file: &File, kind: LockKind) -> std::io::Result<()> {
    match kind {
        LockKind::Shared => FileExt::lock_shared(file),
        LockKind::Exclusive => FileExt::lock_exclusive(file),
    }
}

/// `Ok(false)` when the lock is held elsewhere.
fn try_lock(file: &File, path: &Path, kind: LockKind) -> InfraResult<bool> {
    let attempt = match kind {
        LockKind::Shared => FileExt::try_lock_shared(file),
        LockKind::Exclusive => FileExt::try_lock_exclusive(file),
    };
    match attempt {
        Ok(()) => Ok(true),
        Err(err) if err.kind() == fs2::lock_contended_error().kind() => Ok(false),
        Err(source) => Err(InfrastructureError::LockFailed { path: path.to_path_buf(), kind, source }),
    }
}
