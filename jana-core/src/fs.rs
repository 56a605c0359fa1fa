use std::collections::{BTreeMap, BTreeSet};
use std::io;
use std::path::{Path, PathBuf};
use std::sync::{Mutex, MutexGuard};

/// The file operations the config reader and report generator need.
pub trait FileSystem: Send + Sync {
    fn exists(&self, path: &Path) -> bool;
    fn read_to_string(&self, path: &Path) -> io::Result<String>;
    fn write(&self, path: &Path, contents: &str) -> io::Result<()>;
    fn create_dir_all(&self, path: &Path) -> io::Result<()>;
}

#[derive(Debug, Clone, Copy, Default)]
pub struct OsFileSystem;

impl FileSystem for OsFileSystem {
    fn exists(&self, path: &Path) -> bool {
        path.exists()
    }

    fn read_to_string(&self, path: &Path) -> io::Result<String> {
        std::fs::read_to_string(path)
    }

    fn write(&self, path: &Path, contents: &str) -> io::Result<()> {
        std::fs::write(path, contents)
    }

    fn create_dir_all(&self, path: &Path) -> io::Result<()> {
        std::fs::create_dir_all(path)
    }
}

/// In-memory filesystem. Writes fail with `NotFound` when the parent
/// directory was never created, like the real thing.
#[derive(Debug, Default)]
pub struct MemoryFileSystem {
    state: Mutex<MemoryState>,
}

#[derive(Debug, Default)]
struct MemoryState {
    files: BTreeMap<PathBuf, String>,
    dirs: BTreeSet<PathBuf>,
}

impl MemoryFileSystem {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_file(self, path: impl Into<PathBuf>, contents: impl Into<String>) -> Self {
        let path = path.into();
        {
            let mut state = self.lock();
            if let Some(parent) = path.parent() {
                state.add_dirs(parent);
            }
            state.files.insert(path, contents.into());
        }
        self
    }

    pub fn file(&self, path: &Path) -> Option<String> {
        self.lock().files.get(path).cloned()
    }

    pub fn is_dir(&self, path: &Path) -> bool {
        self.lock().dirs.contains(path)
    }

    fn lock(&self) -> MutexGuard<'_, MemoryState> {
        self.state
            .lock()
            .unwrap_or_else(|poisoned| poisoned.into_inner())
    }
}

impl MemoryState {
    fn add_dirs(&mut self, path: &Path) {
        for ancestor in path.ancestors() {
            if ancestor.as_os_str().is_empty() {
                continue;
            }
            self.dirs.insert(ancestor.to_path_buf());
        }
    }

    fn parent_exists(&self, path: &Path) -> bool {
        match path.parent() {
            Some(parent) if !parent.as_os_str().is_empty() => self.dirs.contains(parent),
            _ => true,
        }
    }
}

impl FileSystem for MemoryFileSystem {
    fn exists(&self, path: &Path) -> bool {
        let state = self.lock();
        state.files.contains_key(path) || state.dirs.contains(path)
    }

    fn read_to_string(&self, path: &Path) -> io::Result<String> {
        self.lock().files.get(path).cloned().ok_or_else(|| {
            io::Error::new(
                io::ErrorKind::NotFound,
                format!("'{}' does not exist", path.display()),
            )
        })
    }

    fn write(&self, path: &Path, contents: &str) -> io::Result<()> {
        let mut state = self.lock();
        if !state.parent_exists(path) {
            return Err(io::Error::new(
                io::ErrorKind::NotFound,
                format!("parent directory of '{}' does not exist", path.display()),
            ));
        }
        state.files.insert(path.to_path_buf(), contents.to_owned());
        Ok(())
    }

    fn create_dir_all(&self, path: &Path) -> io::Result<()> {
        self.lock().add_dirs(path);
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::{FileSystem, MemoryFileSystem};
    use std::path::Path;

    #[test]
    fn memory_write_requires_parent_directory() {
        let fs = MemoryFileSystem::new();
        let path = Path::new(".jana/logs/validation.log");

        assert!(fs.write(path, "{}").is_err());

        fs.create_dir_all(Path::new(".jana/logs")).expect("mkdir");
        fs.write(path, "{}").expect("write after mkdir");
        assert!(fs.is_dir(Path::new(".jana")));
        assert_eq!(fs.file(path).as_deref(), Some("{}"));
    }

    #[test]
    fn top_level_files_need_no_directory() {
        let fs = MemoryFileSystem::new();
        fs.write(Path::new("config.json"), "{}").expect("write");
        assert!(fs.exists(Path::new("config.json")));
    }
}
