use std::io::{self, Read, Write};
use std::path::Path;

use anyhow::Result;
use file_lock::FileLock;

/// Reads data from a file with shared lock.
///
/// # Returns
/// * `Ok(Some(Vec<u8>))` - File contents if file exists and read succeeds
/// * `Ok(None)` - If file does not exist
/// * `Err` - If file operations fail
pub fn read_file_lock(path: &Path) -> Result<Option<Vec<u8>>> {
    let lock_opts = file_lock::FileOptions::new().read(true);
    let mut file = match FileLock::lock(path, true, lock_opts) {
        Ok(file) => file,
        Err(err) if err.kind() == io::ErrorKind::NotFound => return Ok(None),
        Err(err) => return Err(err.into()),
    };

    let mut data = Vec::new();
    file.file.read_to_end(&mut data)?;
    Ok(Some(data))
}

/// Writes data to a file with exclusive lock.
///
/// Creates the file if it doesn't exist, truncates it if it does.
pub fn write_file_lock(path: &Path, data: &[u8]) -> Result<()> {
    let lock_opts = file_lock::FileOptions::new()
        .write(true)
        .truncate(true)
        .create(true);
    let mut file = FileLock::lock(path, true, lock_opts)?;
    file.file.write_all(data)?;
    file.file.flush()?;
    Ok(())
}
