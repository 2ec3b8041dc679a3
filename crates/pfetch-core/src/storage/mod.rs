//! Temp file lifecycle for downloaded artifacts.
//!
//! Artifacts are written to `<final>.part`, preallocated to the expected
//! size, synced and atomically renamed into place only after verification.

mod builder;
mod writer;

pub use builder::StorageWriterBuilder;
pub use writer::StorageWriter;

/// Temporary file suffix used before atomic rename.
pub const TEMP_SUFFIX: &str = ".part";

/// `file.exe` -> `file.exe.part`.
pub fn temp_path(final_path: &std::path::Path) -> std::path::PathBuf {
    let mut o = final_path.as_os_str().to_owned();
    o.push(TEMP_SUFFIX);
    std::path::PathBuf::from(o)
}
