use super::FileSystem;
use anyhow::{anyhow, Result};
use std::collections::{HashMap, HashSet};
use std::path::{Path, PathBuf};
use std::sync::RwLock;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum EntryKind {
    File,
    Directory,
}

#[derive(Debug, Clone)]
struct MockEntry {
    content: Option<String>,
    kind: EntryKind,
}

/// In-memory file system. Relative paths resolve against `root`.
pub struct MockFileSystem {
    files: RwLock<HashMap<PathBuf, MockEntry>>,
    read_only: RwLock<HashSet<PathBuf>>,
    root: PathBuf,
}

impl MockFileSystem {
    pub fn new() -> Self {
        Self::with_root(PathBuf::from("/mock"))
    }

    pub fn with_root(root: PathBuf) -> Self {
        let fs = Self {
            files: RwLock::new(HashMap::new()),
            read_only: RwLock::new(HashSet::new()),
            root,
        };
        let root = fs.root.clone();
        fs.add_dir(root);
        fs
    }

    pub fn add_file(&self, path: impl AsRef<Path>, content: &str) {
        let path = self.normalize_path(path.as_ref());
        let mut files = self.files.write().unwrap();

        if let Some(parent) = path.parent() {
            Self::ensure_parents(&mut files, parent);
        }

        files.insert(
            path,
            MockEntry {
                content: Some(content.to_string()),
                kind: EntryKind::File,
            },
        );
    }

    pub fn add_dir(&self, path: impl AsRef<Path>) {
        let path = self.normalize_path(path.as_ref());
        let mut files = self.files.write().unwrap();
        Self::ensure_parents(&mut files, &path);
    }

    /// Reject writes to `path` and to anything below it.
    pub fn set_read_only(&self, path: impl AsRef<Path>) {
        let path = self.normalize_path(path.as_ref());
        self.read_only.write().unwrap().insert(path);
    }

    pub fn exists(&self, path: &Path) -> bool {
        let path = self.normalize_path(path);
        self.files.read().unwrap().contains_key(&path)
    }

    pub fn is_dir(&self, path: &Path) -> bool {
        let path = self.normalize_path(path);
        self.files
            .read()
            .unwrap()
            .get(&path)
            .map(|e| e.kind == EntryKind::Directory)
            .unwrap_or(false)
    }

    fn normalize_path(&self, path: &Path) -> PathBuf {
        if path.is_absolute() {
            path.to_path_buf()
        } else {
            self.root.join(path)
        }
    }

    fn ensure_parents(files: &mut HashMap<PathBuf, MockEntry>, path: &Path) {
        let mut current = PathBuf::new();
        for component in path.components() {
            current.push(component);
            files.entry(current.clone()).or_insert(MockEntry {
                content: None,
                kind: EntryKind::Directory,
            });
        }
    }

    fn is_read_only(&self, path: &Path) -> bool {
        self.read_only
            .read()
            .unwrap()
            .iter()
            .any(|locked| path.starts_with(locked))
    }
}

impl Default for MockFileSystem {
    fn default() -> Self {
        Self::new()
    }
}

impl FileSystem for MockFileSystem {
    fn read_to_string(&self, path: &Path) -> Result<String> {
        let path = self.normalize_path(path);
        let files = self.files.read().unwrap();
        let entry = files
            .get(&path)
            .ok_or_else(|| anyhow!("File not found: {:?}", path))?;

        entry
            .content
            .clone()
            .ok_or_else(|| anyhow!("Not a file: {:?}", path))
    }

    fn write_string(&self, path: &Path, contents: &str) -> Result<()> {
        let path = self.normalize_path(path);

        if self.is_read_only(&path) {
            return Err(anyhow!("Permission denied: {:?}", path));
        }
        if self.is_dir(&path) {
            return Err(anyhow!("Is a directory: {:?}", path));
        }
        match path.parent() {
            Some(parent) if self.is_dir(parent) => {}
            _ => return Err(anyhow!("Parent directory not found: {:?}", path)),
        }

        self.files.write().unwrap().insert(
            path,
            MockEntry {
                content: Some(contents.to_string()),
                kind: EntryKind::File,
            },
        );
        Ok(())
    }
}
