//! Atomic file replacement
//!
//! Content goes into a temp file in the target's directory, is synced, then
//! renamed over the target. Readers see either the old or the new file.

use std::fs;
use std::io::{self, Read};
use std::path::Path;

/// Default mode for new files: the web server reads fragments as its own user
#[cfg(unix)]
const NEW_FILE_MODE: u32 = 0o644;

/// Write `content` to `path` atomically, creating parent directories
pub fn atomic_write(path: &Path, content: &[u8]) -> io::Result<()> {
    let mut reader = content;
    atomic_write_from(path, &mut reader)
}

/// Stream `reader` into `path` atomically.
///
/// If reading or writing fails part way, the target is left untouched and
/// the temp file is removed when it goes out of scope.
pub fn atomic_write_from<R: Read>(path: &Path, reader: &mut R) -> io::Result<()> {
    let parent = path
        .parent()
        .filter(|p| !p.as_os_str().is_empty())
        .unwrap_or_else(|| Path::new("."));
    fs::create_dir_all(parent)?;

    let mut temp = tempfile::Builder::new()
        .prefix(".webpanel-")
        .suffix(".tmp")
        .tempfile_in(parent)?;
    io::copy(reader, temp.as_file_mut())?;
    temp.as_file().sync_all()?;
    apply_permissions(path, temp.as_file())?;

    temp.persist(path).map_err(|e| e.error)?;
    Ok(())
}

/// Keep the mode of the file being replaced, else use the default
#[cfg(unix)]
fn apply_permissions(target: &Path, file: &fs::File) -> io::Result<()> {
    use std::os::unix::fs::PermissionsExt;

    let permissions = match fs::metadata(target) {
        Ok(meta) => meta.permissions(),
        Err(e) if e.kind() == io::ErrorKind::NotFound => fs::Permissions::from_mode(NEW_FILE_MODE),
        Err(e) => return Err(e),
    };
    file.set_permissions(permissions)
}

#[cfg(not(unix))]
fn apply_permissions(_target: &Path, _file: &fs::File) -> io::Result<()> {
    Ok(())
}
