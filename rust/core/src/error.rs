// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! Error types for blueprint analysis

use thiserror::Error;

/// Result type for blueprint analysis operations
pub type Result<T> = std::result::Result<T, Error>;

/// Errors that can occur during blueprint analysis
#[derive(Error, Debug)]
pub enum Error {
    /// A dimension annotation could not be normalized to a length in
    /// feet. Local to one room/axis: the matcher skips the owning room
    /// instead of aborting the parse.
    #[error("Invalid dimension string: {0:?}")]
    DimensionFormat(String),

    /// The document could not be opened or its first page could not be
    /// read. Caught at the parse entry point and converted into the
    /// error sentinel record.
    #[error("Document extraction failed: {0}")]
    Extraction(String),
}

impl From<lopdf::Error> for Error {
    fn from(err: lopdf::Error) -> Self {
        Error::Extraction(err.to_string())
    }
}

impl From<std::io::Error> for Error {
    fn from(err: std::io::Error) -> Self {
        Error::Extraction(err.to_string())
    }
}
