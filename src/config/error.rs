// Copyright 2025 Eric Jingryd (tidynest@proton.me)
//
// Licensed under the Apache License, Version 2.0 (the "License");
// you may not use this file except in compliance with the License.
// You may obtain a copy of the License at
//
//     http://www.apache.org/licenses/LICENSE-2.0
//
// Unless required by applicable law or agreed to in writing, software
// distributed under the License is distributed on an "AS IS" BASIS,
// WITHOUT WARRANTIES OR CONDITIONS OF ANY KIND, either express or implied.
// See the License for the specific language governing permissions and
// limitations under the License.

use std::path::PathBuf;
use thiserror::Error;

use crate::core::EditError;

/// Errors that can occur during configuration management.
#[derive(Debug, Error)]
pub enum ConfigError {
    /// Configuration file does not exist.
    #[error("i3 config file not found at {0}")]
    NotFound(PathBuf),
    /// Configuration file exists but could not be read.
    #[error("Failed to read config file {path}: {source}")]
    ReadFailed {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    /// Failed to create backup file. Nothing was written.
    #[error("Failed to create backup: {0}")]
    BackupFailed(String),
    /// Writing the new content failed. The backup holds the previous content.
    #[error("Failed to write config file: {0}")]
    WriteFailed(String),
    /// The requested edit was rejected before anything was written.
    #[error(transparent)]
    Edit(#[from] EditError),
}
