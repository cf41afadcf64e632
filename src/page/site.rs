use super::{Page, PageError};
use crate::nav::AddressablePath;
use log::*;
use std::{
    fs,
    path::{Path, PathBuf},
};

const MANIFEST_EXTENSION: &str = "yml";

/// Serves page manifests from a site directory, one file per document path.
///
/// `/alerts.html` is read from `<root>/alerts.html.yml`, the root document
/// from `<root>/index.html.yml`, a directory from its own `index.html.yml`.
///
#[derive(Clone, Debug)]
pub struct Site {
    root: PathBuf,
}

impl Site {
    pub fn new<P: AsRef<Path>>(root: P) -> Site {
        Site {
            root: root.as_ref().to_path_buf(),
        }
    }

    pub fn root(&self) -> &Path {
        &self.root
    }

    /// Return the manifest file backing `address`.
    ///
    pub fn manifest_path(&self, address: &AddressablePath) -> PathBuf {
        let mut segments: Vec<&str> = address
            .pathname
            .split('/')
            .filter(|segment| !segment.is_empty() && *segment != "." && *segment != "..")
            .collect();
        let filename = match segments.pop() {
            Some(last) if !address.directory => format!("{}.{}", last, MANIFEST_EXTENSION),
            Some(last) => {
                segments.push(last);
                format!("index.html.{}", MANIFEST_EXTENSION)
            }
            None => format!("index.html.{}", MANIFEST_EXTENSION),
        };
        let mut path = self.root.clone();
        for segment in segments {
            path.push(segment);
        }
        path.push(filename);
        path
    }

    /// Load the page for `address`.
    ///
    pub fn load(&self, address: &AddressablePath) -> Result<Page, PageError> {
        let manifest = self.manifest_path(address);
        debug!("Loading page manifest {}...", manifest.display());
        if !manifest.exists() {
            return Err(PageError::NotFound {
                address: address.to_string(),
                manifest,
            });
        }
        let contents = fs::read_to_string(&manifest).map_err(|e| PageError::ReadFailed {
            manifest: manifest.clone(),
            source: e,
        })?;
        Page::from_yaml(&contents).map_err(|e| PageError::ParseFailed {
            manifest,
            message: e.to_string(),
        })
    }

    /// Load the page for `address`, substituting the built-in "not found"
    /// document when it cannot be loaded.
    ///
    pub fn load_or_not_found(&self, address: &AddressablePath) -> Page {
        match self.load(address) {
            Ok(page) => page,
            Err(e) => {
                error!("{}", e);
                Page::not_found(&address.to_string())
            }
        }
    }
}
