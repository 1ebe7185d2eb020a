use std::fmt;
use std::path::{Component, Path, PathBuf};

/// A client-supplied file name that is guaranteed to be a single normal
/// path component, so joining it onto a directory never leaves that directory.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct ConfinedName(String);

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ConfinedNameError {
    Empty,
    NotASingleComponent(String),
}

impl fmt::Display for ConfinedNameError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ConfinedNameError::Empty => write!(f, "empty file name"),
            ConfinedNameError::NotASingleComponent(name) => {
                write!(f, "file name is not a single path component: {:?}", name)
            }
        }
    }
}

impl std::error::Error for ConfinedNameError {}

impl ConfinedName {
    pub fn new(name: &str) -> Result<Self, ConfinedNameError> {
        if name.is_empty() {
            return Err(ConfinedNameError::Empty);
        }
        // `\` is a separator on windows only; reject it everywhere.
        if name.contains(['/', '\\', '\0']) {
            return Err(ConfinedNameError::NotASingleComponent(name.to_string()));
        }
        let mut components = Path::new(name).components();
        match (components.next(), components.next()) {
            (Some(Component::Normal(_)), None) => Ok(Self(name.to_string())),
            _ => Err(ConfinedNameError::NotASingleComponent(name.to_string())),
        }
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    pub fn join_onto(&self, base: &Path) -> PathBuf {
        base.join(&self.0)
    }
}

impl fmt::Display for ConfinedName {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// Resolves a `/`-separated relative path below `base`. Every segment has to
/// be a [`ConfinedName`]; empty segments are rejected.
pub fn resolve_relative(base: &Path, relative: &str) -> Result<PathBuf, ConfinedNameError> {
    if relative.is_empty() {
        return Err(ConfinedNameError::Empty);
    }
    let mut path = base.to_path_buf();
    for segment in relative.split('/') {
        let segment = ConfinedName::new(segment)?;
        path = segment.join_onto(&path);
    }
    Ok(path)
}
