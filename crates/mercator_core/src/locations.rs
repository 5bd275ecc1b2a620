use std::path::{Path, PathBuf};

use thiserror::Error;

#[derive(Debug, Error)]
pub enum LocationError {
    #[error("failed to read location file {path}: {source}")]
    Read {
        path: PathBuf,
        source: std::io::Error,
    },
}

/// Ordered list of place names to query, one name per location.
/// Loaded once from the input file and immutable afterwards.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LocationList {
    names: Vec<String>,
}

impl LocationList {
    /// Reads a newline-delimited list of place names. The file handle is
    /// closed before this returns, so no file stays open across network I/O.
    pub fn from_file<P: AsRef<Path>>(path: P) -> Result<LocationList, LocationError> {
        let content = std::fs::read_to_string(&path).map_err(|source| LocationError::Read {
            path: path.as_ref().to_path_buf(),
            source,
        })?;

        Ok(Self::parse(&content))
    }

    /// Every non-empty line becomes one location name, surrounding
    /// whitespace trimmed. Name content is not validated here; a name the
    /// service cannot geocode shows up later as an element without a
    /// duration.
    pub fn parse(text: &str) -> LocationList {
        let names = text
            .lines()
            .map(str::trim)
            .filter(|line| !line.is_empty())
            .map(str::to_owned)
            .collect();

        LocationList { names }
    }

    pub fn from_names<I, S>(names: I) -> LocationList
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        LocationList {
            names: names.into_iter().map(Into::into).collect(),
        }
    }

    pub fn len(&self) -> usize {
        self.names.len()
    }

    pub fn is_empty(&self) -> bool {
        self.names.is_empty()
    }

    pub fn names(&self) -> &[String] {
        &self.names
    }

    pub fn iter(&self) -> impl Iterator<Item = &str> {
        self.names.iter().map(String::as_str)
    }
}
