//! Test utilities for container creation.
//!
//! # Panics
//!
//! All functions in this module may panic on I/O errors since they are
//! designed for test use only where panics are acceptable.

#![allow(clippy::unwrap_used, clippy::missing_panics_doc)]

use std::io::Cursor;
use std::io::Write;

/// Creates an in-memory container from a list of entries.
///
/// Each entry is a tuple of (name, content). Names are stored exactly as
/// given, so hostile names such as `../x` can be produced. Files are stored
/// uncompressed with mode 0o644.
///
/// # Examples
///
/// ```
/// use claw_core::test_utils::create_test_zip;
///
/// let data = create_test_zip(vec![("manifest.json", b"{}"), ("context/a.txt", b"alpha")]);
/// assert!(!data.is_empty());
/// ```
#[must_use]
pub fn create_test_zip(entries: Vec<(&str, &[u8])>) -> Vec<u8> {
    use zip::write::SimpleFileOptions;
    use zip::write::ZipWriter;

    let mut zip = ZipWriter::new(Cursor::new(Vec::new()));

    let options = SimpleFileOptions::default()
        .compression_method(zip::CompressionMethod::Stored)
        .unix_permissions(0o644);

    for (name, data) in entries {
        zip.start_file(name, options).unwrap();
        zip.write_all(data).unwrap();
    }

    zip.finish().unwrap().into_inner()
}

/// Creates a source directory tree from (relative path, content) pairs.
///
/// Parent directories are created as needed.
pub fn create_source_tree(root: &std::path::Path, files: &[(&str, &str)]) {
    for (relative, content) in files {
        let path = root.join(relative);
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent).unwrap();
        }
        std::fs::write(path, content).unwrap();
    }
}

/// Writes a small stand-in for the tool binary and returns its path.
#[must_use]
pub fn create_fake_tool(dir: &std::path::Path) -> std::path::PathBuf {
    let path = dir.join("fake-claw-tool");
    std::fs::write(&path, b"#!/bin/sh\necho claw\n").unwrap();
    #[cfg(unix)]
    {
        use std::os::unix::fs::PermissionsExt;
        std::fs::set_permissions(&path, std::fs::Permissions::from_mode(0o755)).unwrap();
    }
    path
}
