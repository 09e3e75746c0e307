//! Workspace file model
//!
//! A workspace is a directory of pipelines and block source files. This
//! module provides the file-tree shape the editor renders, the extension to
//! language mapping, and directory scanning for pipelines.

use serde::{Deserialize, Serialize};
use std::fs;
use std::io;
use std::path::Path;

/// Name of the workspace folder holding pipeline definitions
pub const PIPELINES_FOLDER: &str = "pipelines";

/// Name of the config file inside each pipeline folder
pub const PIPELINE_CONFIG_FILE: &str = "metadata.json";

/// Recognized source file extensions
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum FileExtension {
    Py,
    Txt,
    Json,
}

impl FileExtension {
    /// Extension of the given path, when recognized
    pub fn from_path(path: &Path) -> Option<Self> {
        match path.extension()?.to_str()? {
            "py" => Some(FileExtension::Py),
            "txt" => Some(FileExtension::Txt),
            "json" => Some(FileExtension::Json),
            _ => None,
        }
    }

    /// Editor language for syntax highlighting
    pub fn language(&self) -> &'static str {
        match self {
            FileExtension::Py => "python",
            FileExtension::Txt => "text",
            FileExtension::Json => "json",
        }
    }
}

/// One node of the workspace file tree
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FileNode {
    /// File or directory name
    pub name: String,
    /// Path relative to the workspace root
    pub path: String,
    /// Child nodes; empty for files
    #[serde(default)]
    pub children: Vec<FileNode>,
    /// Whether the editor should grey this node out
    #[serde(default)]
    pub disabled: bool,
}

impl FileNode {
    /// Build the tree rooted at a directory
    ///
    /// Entries are sorted by name; hidden entries (leading dot) are skipped.
    pub fn from_dir(root: &Path) -> io::Result<Self> {
        let name = root
            .file_name()
            .map(|n| n.to_string_lossy().into_owned())
            .unwrap_or_default();
        Self::walk(root, &name, name.clone())
    }

    fn walk(dir: &Path, name: &str, path: String) -> io::Result<Self> {
        let mut entries: Vec<_> = fs::read_dir(dir)?
            .collect::<io::Result<Vec<_>>>()?
            .into_iter()
            .map(|entry| entry.file_name().to_string_lossy().into_owned())
            .filter(|entry_name| !entry_name.starts_with('.'))
            .collect();
        entries.sort();

        let mut children = Vec::with_capacity(entries.len());
        for entry_name in entries {
            let entry_path = dir.join(&entry_name);
            let child_path = format!("{path}/{entry_name}");
            if entry_path.is_dir() {
                children.push(Self::walk(&entry_path, &entry_name, child_path)?);
            } else {
                children.push(FileNode {
                    name: entry_name,
                    path: child_path,
                    children: Vec::new(),
                    disabled: false,
                });
            }
        }

        Ok(FileNode {
            name: name.to_string(),
            path,
            children,
            disabled: false,
        })
    }

    /// Resolve a `/`-separated path relative to this node
    pub fn find(&self, relative_path: &str) -> Option<&FileNode> {
        let mut node = self;
        for segment in relative_path.split('/').filter(|s| !s.is_empty()) {
            node = node.children.iter().find(|c| c.name == segment)?;
        }
        Some(node)
    }
}

/// Names of the pipelines present in a workspace, sorted
pub fn list_pipelines(repo_path: &Path) -> io::Result<Vec<String>> {
    let pipelines_dir = repo_path.join(PIPELINES_FOLDER);
    if !pipelines_dir.exists() {
        return Ok(Vec::new());
    }

    let mut names: Vec<String> = fs::read_dir(&pipelines_dir)?
        .collect::<io::Result<Vec<_>>>()?
        .into_iter()
        .filter(|entry| entry.path().is_dir())
        .map(|entry| entry.file_name().to_string_lossy().into_owned())
        .filter(|name| !name.starts_with('.'))
        .collect();
    names.sort();
    Ok(names)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;

    #[test]
    fn test_extension_mapping() {
        assert_eq!(
            FileExtension::from_path(Path::new("loaders/load.py")),
            Some(FileExtension::Py)
        );
        assert_eq!(FileExtension::Py.language(), "python");
        assert_eq!(FileExtension::from_path(Path::new("README.md")), None);
        assert_eq!(FileExtension::from_path(Path::new("Makefile")), None);
    }

    #[test]
    fn test_from_dir_builds_sorted_tree() {
        let dir = tempfile::tempdir().unwrap();
        let root = dir.path();
        fs::create_dir(root.join("data_loaders")).unwrap();
        fs::write(root.join("data_loaders/load.py"), "").unwrap();
        fs::write(root.join("requirements.txt"), "").unwrap();
        fs::write(root.join(".hidden"), "").unwrap();

        let tree = FileNode::from_dir(root).unwrap();
        let names: Vec<&str> = tree.children.iter().map(|c| c.name.as_str()).collect();
        assert_eq!(names, vec!["data_loaders", "requirements.txt"]);

        let loaders = &tree.children[0];
        assert_eq!(loaders.children.len(), 1);
        assert_eq!(loaders.children[0].name, "load.py");
        assert!(loaders.children[0].path.ends_with("data_loaders/load.py"));
    }

    #[test]
    fn test_find_resolves_nested_path() {
        let dir = tempfile::tempdir().unwrap();
        let root = dir.path();
        fs::create_dir_all(root.join("transformers")).unwrap();
        fs::write(root.join("transformers/clean.py"), "").unwrap();

        let tree = FileNode::from_dir(root).unwrap();
        let node = tree.find("transformers/clean.py").unwrap();
        assert_eq!(node.name, "clean.py");
        assert!(node.children.is_empty());

        assert!(tree.find("transformers/missing.py").is_none());
        assert_eq!(tree.find("").unwrap().name, tree.name);
    }

    #[test]
    fn test_list_pipelines() {
        let dir = tempfile::tempdir().unwrap();
        let root = dir.path();
        fs::create_dir_all(root.join("pipelines/etl_demo")).unwrap();
        fs::create_dir_all(root.join("pipelines/ab_test")).unwrap();
        fs::write(root.join("pipelines/stray.txt"), "").unwrap();

        let names = list_pipelines(root).unwrap();
        assert_eq!(names, vec!["ab_test", "etl_demo"]);
    }

    #[test]
    fn test_list_pipelines_missing_folder() {
        let dir = tempfile::tempdir().unwrap();
        assert!(list_pipelines(dir.path()).unwrap().is_empty());
    }
}
