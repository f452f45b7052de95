//! Copy entry documents and static assets into the output directory.
//!
//! Every source keeps its path relative to the project root. Sources that do
//! not exist are reported back and skipped. Directory trees are walked with
//! `jwalk` and all files are copied in parallel.

use std::fs;
use std::path::{Path, PathBuf};

use jwalk::WalkDir;
use rayon::prelude::*;

use super::ExportError;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SourceKind {
    Entry,
    File,
    Dir,
}

impl SourceKind {
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Entry => "entry",
            Self::File => "file",
            Self::Dir => "dir",
        }
    }
}

/// One manifest source and where it lands.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BundleItem {
    pub kind: SourceKind,
    pub source: PathBuf,
    pub target: PathBuf,
}

impl BundleItem {
    fn new(kind: SourceKind, root: &Path, output: &Path, path: &Path) -> Self {
        // Absolute entries (a document outside the root) land at the top level
        let relative = if path.is_absolute() {
            path.file_name().map_or_else(|| path.to_path_buf(), PathBuf::from)
        } else {
            path.to_path_buf()
        };
        Self {
            kind,
            source: root.join(path),
            target: output.join(relative),
        }
    }
}

/// Manifest sources in copy order: entries, files, then directories.
pub fn plan_bundle(
    root: &Path,
    output: &Path,
    entries: &[PathBuf],
    files: &[PathBuf],
    dirs: &[PathBuf],
) -> Vec<BundleItem> {
    let groups = [
        (SourceKind::Entry, entries),
        (SourceKind::File, files),
        (SourceKind::Dir, dirs),
    ];
    groups
        .into_iter()
        .flat_map(|(kind, paths)| {
            paths
                .iter()
                .map(move |path| BundleItem::new(kind, root, output, path))
        })
        .collect()
}

#[derive(Debug, Default)]
pub struct BundleSummary {
    pub copied: usize,
    pub skipped: Vec<BundleItem>,
}

/// Copy every planned source that exists.
pub fn copy_bundle(items: &[BundleItem], output: &Path) -> Result<BundleSummary, ExportError> {
    let mut summary = BundleSummary::default();
    let mut copies: Vec<(PathBuf, PathBuf)> = Vec::new();

    for item in items {
        match item.kind {
            SourceKind::Entry | SourceKind::File if item.source.is_file() => {
                copies.push((item.source.clone(), item.target.clone()));
            }
            SourceKind::Dir if item.source.is_dir() => {
                copies.extend(dir_copies(&item.source, &item.target, output));
            }
            _ => summary.skipped.push(item.clone()),
        }
    }

    copies.par_iter().try_for_each(|(from, to)| copy_file(from, to))?;
    summary.copied = copies.len();
    Ok(summary)
}

/// File pairs under `source`, leaving out the output directory itself.
fn dir_copies(source: &Path, target: &Path, output: &Path) -> Vec<(PathBuf, PathBuf)> {
    WalkDir::new(source)
        .skip_hidden(false)
        .into_iter()
        .filter_map(Result::ok)
        .filter(|e| e.file_type().is_file())
        .map(|e| e.path())
        .filter(|path| !path.starts_with(output))
        .filter_map(|path| {
            let relative = path.strip_prefix(source).ok()?.to_path_buf();
            Some((path, target.join(relative)))
        })
        .collect()
}

fn copy_file(from: &Path, to: &Path) -> Result<(), ExportError> {
    let copy_err = |source| ExportError::Copy {
        from: from.to_path_buf(),
        to: to.to_path_buf(),
        source,
    };
    if let Some(parent) = to.parent() {
        fs::create_dir_all(parent).map_err(copy_err)?;
    }
    fs::copy(from, to).map_err(copy_err)?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    fn site() -> TempDir {
        let dir = TempDir::new().unwrap();
        let root = dir.path();
        fs::write(root.join("guide.html"), "<html></html>").unwrap();
        fs::write(root.join("pagination-fixes.css"), ".page {}").unwrap();
        fs::create_dir_all(root.join("images/board")).unwrap();
        fs::write(root.join("images/logo.png"), "png").unwrap();
        fs::write(root.join("images/board/chair.jpg"), "jpg").unwrap();
        dir
    }

    #[test]
    fn test_plan_keeps_relative_paths() {
        let items = plan_bundle(
            Path::new("/site"),
            Path::new("/site/dist"),
            &["guide.html".into(), "/elsewhere/other.html".into()],
            &["css/print.css".into()],
            &["images".into()],
        );
        assert_eq!(items.len(), 4);
        assert_eq!(items[0].target, PathBuf::from("/site/dist/guide.html"));
        assert_eq!(items[1].source, PathBuf::from("/elsewhere/other.html"));
        assert_eq!(items[1].target, PathBuf::from("/site/dist/other.html"));
        assert_eq!(items[2].kind, SourceKind::File);
        assert_eq!(items[2].target, PathBuf::from("/site/dist/css/print.css"));
        assert_eq!(items[3].kind, SourceKind::Dir);
    }

    #[test]
    fn test_copy_bundle() {
        let dir = site();
        let root = dir.path();
        let output = root.join("dist");
        let items = plan_bundle(
            root,
            &output,
            &["guide.html".into()],
            &["pagination-fixes.css".into(), "_redirects".into()],
            &["images".into(), "archives".into()],
        );

        let summary = copy_bundle(&items, &output).unwrap();
        assert_eq!(summary.copied, 4);
        assert_eq!(summary.skipped.len(), 2);
        assert_eq!(summary.skipped[0].kind, SourceKind::File);
        assert_eq!(summary.skipped[1].kind, SourceKind::Dir);

        assert_eq!(fs::read_to_string(output.join("guide.html")).unwrap(), "<html></html>");
        assert!(output.join("pagination-fixes.css").is_file());
        assert_eq!(fs::read_to_string(output.join("images/board/chair.jpg")).unwrap(), "jpg");
    }

    #[test]
    fn test_dir_copy_skips_output() {
        let dir = site();
        let root = dir.path();
        let output = root.join("dist");
        fs::create_dir_all(&output).unwrap();
        fs::write(output.join("stale.html"), "old").unwrap();

        let items = plan_bundle(root, &output, &[], &[], &[".".into()]);
        let summary = copy_bundle(&items, &output).unwrap();

        assert_eq!(summary.copied, 4);
        assert!(!output.join("dist/stale.html").exists());
        assert!(output.join("images/logo.png").is_file());
    }
}
