// Copyright (C) 2022 Leandro Lisboa Penz <lpenz@lpenz.org>
// This file is subject to the terms and conditions defined in
// file 'LICENSE', which is part of this source code package.

use std::io;
use std::path::{Path, PathBuf};

use thiserror::Error;

#[derive(Debug, Error)]
pub enum AmalgamateError {
    /// The first flat directory has no bootstrap header.
    #[error("header {name} not found, it is required as an internal dependency (first header: {first})")]
    BootstrapMissing { name: String, first: String },

    #[error("i/o error on {}: {source}", .path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: io::Error,
    },
}

pub type Result<T> = std::result::Result<T, AmalgamateError>;

/// Attaches the path being worked on to an `io::Error`.
pub(crate) trait IoContext<T> {
    fn at(self, path: &Path) -> Result<T>;
}

impl<T> IoContext<T> for io::Result<T> {
    fn at(self, path: &Path) -> Result<T> {
        self.map_err(|source| AmalgamateError::Io {
            path: path.to_path_buf(),
            source,
        })
    }
}
