use crate::variant::Record;
use derive_more::{Display, Error, From};
use std::path::{Path, PathBuf};
use std::{fs, io};
use tracing::{debug, info, instrument};

/// Trait for types that persist [`Record`]s by name.
pub trait Store {
    /// The reason why a [`Record`] could not be saved or loaded.
    type Error;

    /// Persists a [`Record`] under its name, replacing any previous one.
    fn save(&mut self, record: &Record) -> Result<(), Self::Error>;

    /// Retrieves the [`Record`] saved under a name.
    fn load(&self, name: &str) -> Result<Record, Self::Error>;
}

impl<S: Store + ?Sized> Store for &mut S {
    type Error = S::Error;

    fn save(&mut self, record: &Record) -> Result<(), Self::Error> {
        (**self).save(record)
    }

    fn load(&self, name: &str) -> Result<Record, Self::Error> {
        (**self).load(name)
    }
}

/// The reason why [`Directory`] failed.
#[derive(Debug, Display, Error, From)]
pub enum StoreError {
    #[display(fmt = "`{}` is not a valid variant name", name)]
    #[from(ignore)]
    InvalidName { name: String },

    #[display(fmt = "variant `{}` not found", name)]
    #[from(ignore)]
    NotFound { name: String },

    #[display(fmt = "failed to access the variant store")]
    Io(io::Error),

    #[display(fmt = "failed to decode variant")]
    Decode(ron::de::SpannedError),
}

/// Keeps one RON file per variant in a directory.
#[derive(Debug, Clone, Eq, PartialEq)]
pub struct Directory {
    root: PathBuf,
}

impl Directory {
    const EXTENSION: &'static str = "ron";

    /// A store rooted at `root`, which is created on the first save.
    pub fn new<P: Into<PathBuf>>(root: P) -> Self {
        Directory { root: root.into() }
    }

    /// The directory variants are kept in.
    pub fn root(&self) -> &Path {
        &self.root
    }

    fn path(&self, name: &str) -> Result<PathBuf, StoreError> {
        let invalid = name.trim().is_empty()
            || name.starts_with('.')
            || name.contains(['/', '\\'])
            || name.contains(std::path::MAIN_SEPARATOR);

        if invalid {
            Err(StoreError::InvalidName {
                name: name.to_string(),
            })
        } else {
            Ok(self.root.join(format!("{name}.{}", Self::EXTENSION)))
        }
    }

    /// The names of all saved variants, in lexicographical order.
    #[instrument(level = "trace", skip(self), err)]
    pub fn names(&self) -> Result<Vec<String>, StoreError> {
        let entries = match fs::read_dir(&self.root) {
            Err(e) if e.kind() == io::ErrorKind::NotFound => return Ok(Vec::new()),
            entries => entries?,
        };

        let mut names = Vec::new();
        for entry in entries {
            let path = entry?.path();
            if path.extension().is_some_and(|e| e == Self::EXTENSION) {
                if let Some(stem) = path.file_stem().and_then(|s| s.to_str()) {
                    names.push(stem.to_string());
                }
            }
        }

        names.sort();
        Ok(names)
    }
}

impl Store for Directory {
    type Error = StoreError;

    #[instrument(level = "debug", skip(self, record), err, fields(name = record.name()))]
    fn save(&mut self, record: &Record) -> Result<(), Self::Error> {
        let path = self.path(record.name())?;
        fs::create_dir_all(&self.root)?;
        fs::write(&path, record.to_string())?;

        info!(path = %path.display(), "saved variant");
        Ok(())
    }

    #[instrument(level = "debug", skip(self), err)]
    fn load(&self, name: &str) -> Result<Record, Self::Error> {
        let path = self.path(name)?;
        let text = match fs::read_to_string(&path) {
            Err(e) if e.kind() == io::ErrorKind::NotFound => {
                return Err(StoreError::NotFound {
                    name: name.to_string(),
                })
            }

            text => text?,
        };

        let record: Record = ron::de::from_str(&text)?;
        debug!(path = %path.display(), "loaded variant");
        Ok(record)
    }
}
