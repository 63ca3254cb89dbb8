// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

use courier_api::ApiError;
use thiserror::Error;

/// Errors that stop a scenario run.
///
/// A rejected step is not one of these; it is reported and the run goes on.
#[derive(Debug, Error)]
pub enum ScenarioError {
    /// The scenario file could not be read.
    #[error("failed to read {path}: {source}")]
    Io {
        /// The file that was being read.
        path: String,
        /// The underlying I/O error.
        #[source]
        source: std::io::Error,
    },

    /// The scenario is not valid JSON, or a report could not be encoded.
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    /// The initial records are not a valid starting state.
    #[error("initial records are inconsistent: {0}")]
    Records(ApiError),
}
