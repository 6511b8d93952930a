// Copyright (c) AlphaVelocity.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

use thiserror::Error;

/// Typed outcomes callers are expected to match on.
#[derive(Debug, Error)]
pub enum LedgerError {
    /// Filtering (or the raw collection) left nothing to write.
    #[error("No data to export")]
    NothingToExport,

    #[error("{kind} {id} not found")]
    NotFound { kind: &'static str, id: i64 },

    #[error("Unknown service type '{0}', expected Bridal or Mehandi")]
    UnknownService(String),

    #[error("Unknown service filter '{0}', expected All, Bridal or Mehandi")]
    UnknownCategoryFilter(String),

    #[error("CSV error: {0}")]
    Csv(#[from] csv::Error),

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}
