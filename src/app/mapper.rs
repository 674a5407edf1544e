use anyhow::{bail, Result};
use pathdiff::diff_paths;
use std::path::{Component, Path, PathBuf};

/// Relativizes `path` against `root`, refusing anything that would have to
/// climb out of the root to get there.
pub fn relative_to_root(root: &Path, path: &Path) -> Result<PathBuf> {
    let relative = match diff_paths(path, root) {
        Some(rel) => rel,
        None => bail!("cannot relativize {} against {}", path.display(), root.display()),
    };
    if relative
        .components()
        .any(|c| matches!(c, Component::ParentDir | Component::RootDir | Component::Prefix(_)))
    {
        bail!("{} is not under {}", path.display(), root.display());
    }
    Ok(relative)
}

/// Maps a path under `source_root` to the same place under `target_root`.
pub fn map_path(source_root: &Path, target_root: &Path, source_path: &Path) -> Result<PathBuf> {
    let relative = relative_to_root(source_root, source_path)?;
    Ok(target_root.join(relative))
}

/// Lexical normalization: drops `.` and resolves `..` without touching the disk.
pub fn normalize(path: &Path) -> PathBuf {
    let mut out = PathBuf::new();
    for component in path.components() {
        match component {
            Component::CurDir => {}
            Component::ParentDir => {
                if !out.pop() {
                    out.push(component);
                }
            }
            other => out.push(other),
        }
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn maps_nested_file_under_target() {
        let mapped = map_path(
            Path::new("/src"),
            Path::new("/dst"),
            Path::new("/src/sub/b.txt"),
        )
        .unwrap();
        assert_eq!(mapped, PathBuf::from("/dst/sub/b.txt"));
    }

    #[test]
    fn trailing_separator_on_root_is_harmless() {
        let mapped = map_path(Path::new("/src/"), Path::new("/dst"), Path::new("/src/a.txt")).unwrap();
        assert_eq!(mapped, PathBuf::from("/dst/a.txt"));
    }

    #[test]
    fn sibling_with_shared_prefix_is_rejected() {
        // "/srcx" starts with the string "/src" but is not inside it.
        assert!(map_path(Path::new("/src"), Path::new("/dst"), Path::new("/srcx/a.txt")).is_err());
        assert!(map_path(Path::new("/src"), Path::new("/dst"), Path::new("/other/a.txt")).is_err());
    }

    #[test]
    fn root_itself_maps_to_target_root() {
        let mapped = map_path(Path::new("/src"), Path::new("/dst"), Path::new("/src")).unwrap();
        assert_eq!(mapped, PathBuf::from("/dst"));
    }

    #[test]
    fn normalize_resolves_dots() {
        assert_eq!(normalize(Path::new("/a/./b/../c")), PathBuf::from("/a/c"));
        assert_eq!(normalize(Path::new("/a/b/")), PathBuf::from("/a/b"));
    }
}
