//! Path manipulation utilities.

use std::path::{Path, PathBuf};

/// Find the project root by looking for marker files.
pub fn find_project_root(start: impl AsRef<Path>) -> Option<PathBuf> {
    let markers = [".ichdl", "Ic_Metadata_Master.json", ".git"];

    let mut current = start.as_ref().to_path_buf();

    loop {
        for marker in &markers {
            if current.join(marker).exists() {
                return Some(current);
            }
        }

        if !current.pop() {
            return None;
        }
    }
}

/// Get the .ichdl config directory.
pub fn config_dir(project_root: impl AsRef<Path>) -> PathBuf {
    project_root.as_ref().join(".ichdl")
}

/// Convert a path to a Unix-style string (forward slashes).
pub fn to_unix_string(path: impl AsRef<Path>) -> String {
    path.as_ref()
        .components()
        .map(|c| c.as_os_str().to_string_lossy().to_string())
        .collect::<Vec<_>>()
        .join("/")
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::tempdir;

    #[test]
    fn test_to_unix_string() {
        let path = Path::new("verilog").join("combinational").join("nand_quad.vtpl");
        assert_eq!(to_unix_string(path), "verilog/combinational/nand_quad.vtpl");
    }

    #[test]
    fn test_find_project_root() {
        let dir = tempdir().unwrap();
        std::fs::create_dir_all(dir.path().join(".ichdl")).unwrap();
        let nested = dir.path().join("a/b");
        std::fs::create_dir_all(&nested).unwrap();

        let root = find_project_root(&nested).unwrap();
        assert_eq!(root, dir.path());
        assert_eq!(config_dir(&root), dir.path().join(".ichdl"));
    }
}
