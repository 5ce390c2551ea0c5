use autocoder_core::{AutocoderError, Result};
use std::path::{Component, Path, PathBuf};

/// Directory that file-system tools are confined to.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ProjectRoot {
    root: PathBuf,
}

impl ProjectRoot {
    /// Anchor at `root`, made absolute against the current directory when relative.
    pub fn new(root: impl AsRef<Path>) -> Result<Self> {
        let root = root.as_ref();
        let absolute = if root.is_absolute() {
            root.to_path_buf()
        } else {
            std::env::current_dir()?.join(root)
        };
        Ok(Self { root: normalize(&absolute) })
    }

    pub fn path(&self) -> &Path {
        &self.root
    }

    /// Resolve `relative` lexically against the root.
    ///
    /// Absolute paths are accepted only when they already lie under the root.
    pub fn resolve(&self, relative: &str) -> Result<PathBuf> {
        let candidate = Path::new(relative);
        let joined = if candidate.is_absolute() {
            candidate.to_path_buf()
        } else {
            self.root.join(candidate)
        };
        let resolved = normalize(&joined);

        if !resolved.starts_with(&self.root) {
            return Err(AutocoderError::Tool(format!(
                "Path '{relative}' escapes the project directory"
            )));
        }
        Ok(resolved)
    }

    /// Path of `absolute` relative to the root, `/`-separated.
    pub fn relative(&self, absolute: &Path) -> String {
        absolute
            .strip_prefix(&self.root)
            .unwrap_or(absolute)
            .components()
            .map(|c| c.as_os_str().to_string_lossy())
            .collect::<Vec<_>>()
            .join("/")
    }
}

fn normalize(path: &Path) -> PathBuf {
    let mut out = PathBuf::new();
    for component in path.components() {
        match component {
            Component::CurDir => {}
            Component::ParentDir => {
                out.pop();
            }
            other => out.push(other.as_os_str()),
        }
    }
    out
}
