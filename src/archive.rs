//! Zip archiving of the source folder.
//!
//! Stage 3 of the pipeline. Packs the whole image folder (recursively) into a
//! single zip so visitors can download everything at once. Entries are rooted
//! at the folder's base name:
//!
//! ```text
//! photos.zip
//! ├── photos/              # stored directory entry
//! ├── photos/a.JPG         # deflated
//! ├── photos/b.png
//! ├── photos/notes.txt
//! └── photos/raw/
//!     └── photos/raw/c.jpg
//! ```
//!
//! ## Strategies
//!
//! | Strategy | How |
//! |---|---|
//! | [`Builtin`](ArchiveStrategy::Builtin) | `zip::ZipWriter` + `walkdir`, no external dependency |
//! | [`External`](ArchiveStrategy::External) | `zip -r` after checking the command runs |
//!
//! Failure is never fatal to a run: the caller reports it and renders the
//! gallery without a download link. A failed builtin archive is removed so a
//! truncated zip is never left behind.

use crate::config::ArchiveStrategy;
use std::ffi::OsStr;
use std::fs::{self, File};
use std::io::{self, BufWriter};
use std::path::{Path, PathBuf};
use std::process::{Command, Stdio};
use thiserror::Error;
use walkdir::WalkDir;
use zip::CompressionMethod;
use zip::write::{SimpleFileOptions, ZipWriter};

#[derive(Error, Debug)]
pub enum ArchiveError {
    #[error("IO error: {0}")]
    Io(#[from] io::Error),
    #[error("Zip error: {0}")]
    Zip(#[from] zip::result::ZipError),
    #[error("Walk error: {0}")]
    Walk(#[from] walkdir::Error),
    #[error("Source folder has no usable name: {0}")]
    NoFolderName(PathBuf),
    #[error("`{0}` command not found; install it or use the builtin archiver")]
    ToolMissing(String),
    #[error("`{tool}` exited with {status}")]
    ToolFailed { tool: String, status: String },
}

/// A finished archive.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ArchiveSummary {
    pub path: PathBuf,
    /// Size of the archive on disk.
    pub bytes: u64,
}

/// External command used by [`ArchiveStrategy::External`].
pub const ZIP_COMMAND: &str = "zip";

/// Zip `source` into `target` using `strategy`.
///
/// Paths in `exclude` that lie inside `source` (typically the thumbnail
/// directory when artifacts are written into the folder itself) are left out,
/// as is `target`.
pub fn archive_folder(
    source: &Path,
    target: &Path,
    strategy: ArchiveStrategy,
    exclude: &[PathBuf],
) -> Result<ArchiveSummary, ArchiveError> {
    match strategy {
        ArchiveStrategy::Builtin => write_builtin(source, target, exclude)?,
        ArchiveStrategy::External => write_with_tool(ZIP_COMMAND, source, target, exclude)?,
    }
    Ok(ArchiveSummary {
        path: target.to_path_buf(),
        bytes: fs::metadata(target)?.len(),
    })
}

fn folder_base_name(source: &Path) -> Result<String, ArchiveError> {
    source
        .file_name()
        .and_then(|n| n.to_str())
        .map(str::to_string)
        .ok_or_else(|| ArchiveError::NoFolderName(source.to_path_buf()))
}

/// Archive entry name for `relative` (a path inside the source folder).
///
/// Always `/`-separated, whatever the platform separator is.
fn entry_name(base: &str, relative: &Path) -> String {
    let mut name = base.to_string();
    for component in relative.components() {
        name.push('/');
        name.push_str(&component.as_os_str().to_string_lossy());
    }
    name
}

fn write_builtin(source: &Path, target: &Path, exclude: &[PathBuf]) -> Result<(), ArchiveError> {
    let result = write_builtin_inner(source, target, exclude);
    if result.is_err() && target.exists() {
        let _ = fs::remove_file(target);
    }
    result
}

fn write_builtin_inner(
    source: &Path,
    target: &Path,
    exclude: &[PathBuf],
) -> Result<(), ArchiveError> {
    let base = folder_base_name(source)?;
    let mut zip = ZipWriter::new(BufWriter::new(File::create(target)?));

    let file_options =
        SimpleFileOptions::default().compression_method(CompressionMethod::Deflated);
    let dir_options = SimpleFileOptions::default().compression_method(CompressionMethod::Stored);

    // Symlinks are followed, matching what the scanner lists and `zip -r` stores
    let walker = WalkDir::new(source)
        .follow_links(true)
        .sort_by_file_name()
        .into_iter()
        .filter_entry(|e| e.path() != target && !exclude.iter().any(|x| e.path() == x.as_path()));

    for entry in walker {
        let entry = entry?;
        let relative = entry
            .path()
            .strip_prefix(source)
            .map_err(|_| ArchiveError::NoFolderName(entry.path().to_path_buf()))?;
        let name = entry_name(&base, relative);

        if entry.file_type().is_dir() {
            zip.add_directory(format!("{name}/"), dir_options)?;
        } else if entry.file_type().is_file() {
            let size = entry.metadata()?.len();
            zip.start_file(name, file_options.large_file(size >= u32::MAX as u64))?;
            let mut file = File::open(entry.path())?;
            io::copy(&mut file, &mut zip)?;
        } else {
            log::debug!("not archiving special file {}", entry.path().display());
        }
    }

    zip.finish()?;
    Ok(())
}

/// Whether `program` can be launched at all.
pub fn tool_available(program: &str) -> bool {
    Command::new(program)
        .arg("-v")
        .stdin(Stdio::null())
        .stdout(Stdio::null())
        .stderr(Stdio::null())
        .status()
        .is_ok_and(|s| s.success())
}

fn write_with_tool(
    program: &str,
    source: &Path,
    target: &Path,
    exclude: &[PathBuf],
) -> Result<(), ArchiveError> {
    if !tool_available(program) {
        return Err(ArchiveError::ToolMissing(program.to_string()));
    }

    let base = folder_base_name(source)?;
    let parent = source
        .parent()
        .ok_or_else(|| ArchiveError::NoFolderName(source.to_path_buf()))?;

    // `zip` updates an existing archive in place; start fresh instead
    if target.exists() {
        fs::remove_file(target)?;
    }

    let mut command = Command::new(program);
    command
        .current_dir(parent)
        .args([OsStr::new("-r"), OsStr::new("-q")])
        .arg(target)
        .arg(&base);

    let mut patterns = Vec::new();
    for path in exclude.iter().map(PathBuf::as_path).chain([target]) {
        if let Ok(relative) = path.strip_prefix(source) {
            let name = entry_name(&base, relative);
            patterns.push(format!("{name}/*"));
            patterns.push(name);
        }
    }
    if !patterns.is_empty() {
        command.arg("-x").args(&patterns);
    }

    log::debug!("running {:?}", command);
    let status = command.stdin(Stdio::null()).status()?;
    if !status.success() {
        return Err(ArchiveError::ToolFailed {
            tool: program.to_string(),
            status: status.to_string(),
        });
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_helpers::{setup_photo_folder, zip_entry_names};
    use std::io::Read;
    use tempfile::TempDir;

    fn sorted(mut names: Vec<String>) -> Vec<String> {
        names.sort();
        names
    }

    #[test]
    fn entry_name_joins_with_forward_slash() {
        assert_eq!(entry_name("photos", Path::new("")), "photos");
        assert_eq!(entry_name("photos", Path::new("a.jpg")), "photos/a.jpg");
        assert_eq!(
            entry_name("photos", &Path::new("raw").join("c.jpg")),
            "photos/raw/c.jpg"
        );
    }

    #[test]
    fn builtin_archive_contains_every_file() {
        let tmp = TempDir::new().unwrap();
        let folder = setup_photo_folder(tmp.path(), "photos");
        fs::create_dir(folder.join("raw")).unwrap();
        fs::write(folder.join("raw/c.jpg"), b"raw bytes").unwrap();

        let target = tmp.path().join("photos.zip");
        let summary =
            archive_folder(&folder, &target, ArchiveStrategy::Builtin, &[]).unwrap();

        assert_eq!(summary.path, target);
        assert!(summary.bytes > 0);
        assert_eq!(
            sorted(zip_entry_names(&target)),
            vec![
                "photos/",
                "photos/a.JPG",
                "photos/b.png",
                "photos/notes.txt",
                "photos/raw/",
                "photos/raw/c.jpg",
            ]
        );
    }

    #[test]
    fn builtin_archive_compression_methods() {
        let tmp = TempDir::new().unwrap();
        let folder = setup_photo_folder(tmp.path(), "photos");
        let target = tmp.path().join("photos.zip");
        archive_folder(&folder, &target, ArchiveStrategy::Builtin, &[]).unwrap();

        let mut archive = zip::ZipArchive::new(File::open(&target).unwrap()).unwrap();
        {
            let dir = archive.by_name("photos/").unwrap();
            assert!(dir.is_dir());
        }
        let mut notes = archive.by_name("photos/notes.txt").unwrap();
        assert_eq!(notes.compression(), CompressionMethod::Deflated);
        let mut content = String::new();
        notes.read_to_string(&mut content).unwrap();
        assert_eq!(content, "trip notes");
    }

    #[test]
    fn builtin_archive_excludes_generated_artifacts_inside_source() {
        let tmp = TempDir::new().unwrap();
        let folder = setup_photo_folder(tmp.path(), "photos");
        let thumbs = folder.join("thumbnails");
        fs::create_dir(&thumbs).unwrap();
        fs::write(thumbs.join("a.JPG"), b"thumb").unwrap();

        let target = folder.join("photos.zip");
        archive_folder(&folder, &target, ArchiveStrategy::Builtin, &[thumbs]).unwrap();

        let names = zip_entry_names(&target);
        assert!(!names.iter().any(|n| n.contains("thumbnails")), "{names:?}");
        assert!(!names.iter().any(|n| n.ends_with("photos.zip")), "{names:?}");
        assert!(names.contains(&"photos/a.JPG".to_string()));
    }

    #[test]
    fn builtin_archive_overwrites_previous_archive() {
        let tmp = TempDir::new().unwrap();
        let folder = setup_photo_folder(tmp.path(), "photos");
        let target = tmp.path().join("photos.zip");
        fs::write(&target, b"stale, not a zip").unwrap();

        archive_folder(&folder, &target, ArchiveStrategy::Builtin, &[]).unwrap();
        assert_eq!(zip_entry_names(&target).len(), 4);
    }

    #[test]
    fn builtin_archive_missing_source_leaves_no_file() {
        let tmp = TempDir::new().unwrap();
        let target = tmp.path().join("photos.zip");
        let result = archive_folder(
            &tmp.path().join("missing"),
            &target,
            ArchiveStrategy::Builtin,
            &[],
        );

        assert!(matches!(result, Err(ArchiveError::Walk(_))));
        assert!(!target.exists());
    }

    #[test]
    fn builtin_archive_stores_files_over_4gib() {
        let tmp = TempDir::new().unwrap();
        let folder = setup_photo_folder(tmp.path(), "photos");
        let size = (u32::MAX as u64) + 17;
        // Sparse: takes no disk space, reads back as zeros
        File::create(folder.join("clip.mov"))
            .unwrap()
            .set_len(size)
            .unwrap();

        let target = tmp.path().join("photos.zip");
        archive_folder(&folder, &target, ArchiveStrategy::Builtin, &[]).unwrap();

        let mut archive = zip::ZipArchive::new(File::open(&target).unwrap()).unwrap();
        assert_eq!(archive.by_name("photos/clip.mov").unwrap().size(), size);
        assert!(archive.by_name("photos/a.JPG").is_ok());
    }

    #[cfg(unix)]
    #[test]
    fn builtin_archive_follows_symlinked_files() {
        let tmp = TempDir::new().unwrap();
        let folder = setup_photo_folder(tmp.path(), "photos");
        let elsewhere = tmp.path().join("elsewhere.jpg");
        fs::write(&elsewhere, b"linked bytes").unwrap();
        std::os::unix::fs::symlink(&elsewhere, folder.join("linked.jpg")).unwrap();

        let target = tmp.path().join("photos.zip");
        archive_folder(&folder, &target, ArchiveStrategy::Builtin, &[]).unwrap();

        let mut archive = zip::ZipArchive::new(File::open(&target).unwrap()).unwrap();
        let mut linked = archive.by_name("photos/linked.jpg").unwrap();
        let mut content = Vec::new();
        linked.read_to_end(&mut content).unwrap();
        assert_eq!(content, b"linked bytes");
    }

    #[test]
    fn missing_tool_is_reported() {
        let tmp = TempDir::new().unwrap();
        let folder = setup_photo_folder(tmp.path(), "photos");
        let target = tmp.path().join("photos.zip");

        let result = write_with_tool("snapgal-no-such-zip-binary", &folder, &target, &[]);
        assert!(matches!(result, Err(ArchiveError::ToolMissing(t)) if t == "snapgal-no-such-zip-binary"));
        assert!(!target.exists());
    }

    #[test]
    fn external_archive_matches_builtin_layout() {
        if !tool_available(ZIP_COMMAND) {
            eprintln!("skipping: `zip` command not installed");
            return;
        }
        let tmp = TempDir::new().unwrap();
        let folder = setup_photo_folder(tmp.path(), "photos");
        let target = tmp.path().join("photos.zip");

        archive_folder(&folder, &target, ArchiveStrategy::External, &[]).unwrap();

        assert_eq!(
            sorted(zip_entry_names(&target)),
            vec!["photos/", "photos/a.JPG", "photos/b.png", "photos/notes.txt"]
        );
    }
}
