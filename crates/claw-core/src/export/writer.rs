//! Container writing.
//!
//! Compresses a staged archive root into a zip file. The container is first
//! written to a temporary sibling of the output path and only renamed into
//! place once complete.

use std::fs;
use std::fs::File;
use std::io::BufWriter;
use std::io::Seek;
use std::io::Write;
use std::path::Path;
use std::path::PathBuf;

use walkdir::WalkDir;
use zip::CompressionMethod;
use zip::ZipWriter;
use zip::write::SimpleFileOptions;

use crate::ClawError;
use crate::ExportConfig;
use crate::ProgressCallback;
use crate::Result;
use crate::copy::CopyBuffer;
use crate::copy::copy_with_progress;
use crate::layout;

/// Totals from writing a container.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct WriteStats {
    /// Number of file entries written.
    pub entries: usize,
    /// Uncompressed bytes written.
    pub bytes: u64,
}

/// A staged file paired with its container entry name.
#[derive(Debug, Clone)]
struct StagedFile {
    path: PathBuf,
    name: String,
}

/// Writes every file under `root` into a new container at `output`.
///
/// Entry names are paths relative to `root`. An existing file at `output` is
/// replaced.
///
/// # Errors
///
/// Returns an error if the staging tree cannot be read or the container
/// cannot be written.
pub fn write_container(
    root: &Path,
    output: &Path,
    config: &ExportConfig,
    progress: &mut dyn ProgressCallback,
) -> Result<WriteStats> {
    let parent = output
        .parent()
        .filter(|p| !p.as_os_str().is_empty())
        .unwrap_or_else(|| Path::new("."));

    let mut builder = tempfile::Builder::new();
    builder.prefix(".claw-").suffix(".partial");
    #[cfg(unix)]
    {
        use std::os::unix::fs::PermissionsExt;
        builder.permissions(fs::Permissions::from_mode(0o644));
    }
    let partial = builder.tempfile_in(parent)?;

    let stats = {
        let mut writer = BufWriter::new(partial.as_file());
        let stats = write_zip(&mut writer, root, config, progress)?;
        writer.flush()?;
        stats
    };

    partial
        .persist(output)
        .map_err(|e| ClawError::Io(e.error))?;
    tracing::debug!(output = %output.display(), entries = stats.entries, "container written");

    Ok(stats)
}

/// Writes the zip stream for `root` into `writer`.
fn write_zip<W: Write + Seek>(
    writer: W,
    root: &Path,
    config: &ExportConfig,
    progress: &mut dyn ProgressCallback,
) -> Result<WriteStats> {
    let files = collect_files(root)?;
    let total = files.len();
    let options = base_options(config);

    let mut zip = ZipWriter::new(writer);
    let mut buffer = CopyBuffer::new();
    let mut stats = WriteStats::default();

    for (idx, staged) in files.iter().enumerate() {
        let display = Path::new(&staged.name);
        progress.on_entry_start(display, total, idx + 1);

        let mut file = File::open(&staged.path)?;
        let metadata = file.metadata()?;
        let mut file_options = options.large_file(metadata.len() >= u64::from(u32::MAX));

        if config.preserve_permissions {
            #[cfg(unix)]
            {
                use std::os::unix::fs::PermissionsExt;
                file_options = file_options.unix_permissions(metadata.permissions().mode());
            }
        }

        zip.start_file(staged.name.as_str(), file_options)?;
        stats.bytes += copy_with_progress(&mut file, &mut zip, &mut buffer, progress)?;
        stats.entries += 1;

        progress.on_entry_complete(display);
    }

    zip.finish()?;
    progress.on_complete();

    Ok(stats)
}

fn base_options(config: &ExportConfig) -> SimpleFileOptions {
    match config.compression_level {
        Some(0) => SimpleFileOptions::default().compression_method(CompressionMethod::Stored),
        level => SimpleFileOptions::default()
            .compression_method(CompressionMethod::Deflated)
            .compression_level(Some(i64::from(level.unwrap_or(6)))),
    }
}

/// Collects regular files under `root` in file-name order.
fn collect_files(root: &Path) -> Result<Vec<StagedFile>> {
    let mut files = Vec::new();

    for entry in WalkDir::new(root).sort_by_file_name() {
        let entry = entry?;
        if !entry.file_type().is_file() {
            continue;
        }

        let relative = entry
            .path()
            .strip_prefix(root)
            .map_err(|e| std::io::Error::other(format!("path outside staging root: {e}")))?;
        files.push(StagedFile {
            path: entry.path().to_path_buf(),
            name: layout::entry_name(relative)?,
        });
    }

    Ok(files)
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;
    use crate::NoopProgress;
    use std::collections::BTreeSet;
    use std::io::Read;
    use tempfile::TempDir;

    fn staged_root() -> TempDir {
        let root = TempDir::new().unwrap();
        fs::create_dir_all(root.path().join("context/sub")).unwrap();
        fs::write(root.path().join("manifest.json"), "{}").unwrap();
        fs::write(root.path().join("context/a.txt"), "alpha").unwrap();
        fs::write(root.path().join("context/sub/b.txt"), "beta").unwrap();
        fs::create_dir(root.path().join("context/empty")).unwrap();
        root
    }

    fn entry_names(container: &Path) -> BTreeSet<String> {
        let archive = zip::ZipArchive::new(File::open(container).unwrap()).unwrap();
        archive.file_names().map(String::from).collect()
    }

    #[test]
    fn test_write_container_entries_are_relative_files() {
        let root = staged_root();
        let out = TempDir::new().unwrap();
        let container = out.path().join("out.claw");

        let stats = write_container(
            root.path(),
            &container,
            &ExportConfig::default(),
            &mut NoopProgress,
        )
        .unwrap();

        assert_eq!(stats.entries, 3);
        assert_eq!(stats.bytes, 2 + 5 + 4);
        let expected: BTreeSet<String> = ["manifest.json", "context/a.txt", "context/sub/b.txt"]
            .into_iter()
            .map(String::from)
            .collect();
        assert_eq!(entry_names(&container), expected);
    }

    #[test]
    fn test_write_container_uses_deflate() {
        let root = staged_root();
        let out = TempDir::new().unwrap();
        let container = out.path().join("out.claw");

        write_container(
            root.path(),
            &container,
            &ExportConfig::default(),
            &mut NoopProgress,
        )
        .unwrap();

        let mut archive = zip::ZipArchive::new(File::open(&container).unwrap()).unwrap();
        let mut entry = archive.by_name("context/a.txt").unwrap();
        assert_eq!(entry.compression(), CompressionMethod::Deflated);
        let mut content = String::new();
        entry.read_to_string(&mut content).unwrap();
        assert_eq!(content, "alpha");
    }

    #[test]
    fn test_write_container_stored_level_zero() {
        let root = staged_root();
        let out = TempDir::new().unwrap();
        let container = out.path().join("out.claw");
        let config = ExportConfig::default().with_compression_level(0);

        write_container(root.path(), &container, &config, &mut NoopProgress).unwrap();

        let mut archive = zip::ZipArchive::new(File::open(&container).unwrap()).unwrap();
        let entry = archive.by_name("context/a.txt").unwrap();
        assert_eq!(entry.compression(), CompressionMethod::Stored);
    }

    #[test]
    fn test_write_container_replaces_existing_file() {
        let root = staged_root();
        let out = TempDir::new().unwrap();
        let container = out.path().join("out.claw");
        fs::write(&container, "previous contents").unwrap();

        write_container(
            root.path(),
            &container,
            &ExportConfig::default(),
            &mut NoopProgress,
        )
        .unwrap();

        assert_eq!(entry_names(&container).len(), 3);
        let leftovers: Vec<_> = fs::read_dir(out.path())
            .unwrap()
            .map(|e| e.unwrap().file_name())
            .collect();
        assert_eq!(leftovers.len(), 1, "partial file left behind: {leftovers:?}");
    }

    #[test]
    fn test_write_container_missing_parent_fails() {
        let root = staged_root();
        let out = TempDir::new().unwrap();
        let container = out.path().join("missing/out.claw");

        let result = write_container(
            root.path(),
            &container,
            &ExportConfig::default(),
            &mut NoopProgress,
        );
        assert!(matches!(result, Err(ClawError::Io(_))));
        assert!(!container.exists());
    }

    #[cfg(unix)]
    #[test]
    fn test_write_container_records_permissions() {
        use std::os::unix::fs::PermissionsExt;

        let root = staged_root();
        let tool = root.path().join("claw");
        fs::write(&tool, "#!/bin/sh\n").unwrap();
        fs::set_permissions(&tool, fs::Permissions::from_mode(0o755)).unwrap();

        let out = TempDir::new().unwrap();
        let container = out.path().join("out.claw");
        write_container(
            root.path(),
            &container,
            &ExportConfig::default(),
            &mut NoopProgress,
        )
        .unwrap();

        let mut archive = zip::ZipArchive::new(File::open(&container).unwrap()).unwrap();
        let entry = archive.by_name("claw").unwrap();
        assert_eq!(entry.unix_mode().unwrap() & 0o777, 0o755);
    }
}
