//! # File Storage
//!
//! This module maps blocks to a folder-per-block layout on the local
//! filesystem. Each block lives in its own directory, whose name is the
//! block's on-disk identity, holding a single pretty-printed JSON record file
//! ([`BLOCK_RECORD_FILE`]).
//!
//! All operations are blocking filesystem calls addressed by explicit paths;
//! nothing here keeps state between calls.
//!
//! # Examples
//!
//! ```rust
//! use lazyblock_core::block::Block;
//! use lazyblock_core::file_storage::{load_block, save_block};
//! use tempfile::TempDir;
//!
//! let temp_dir = TempDir::new().unwrap();
//!
//! let block = Block::new(
//!     "greeting".to_string(),
//!     "問候".to_string(),
//!     "Hello {輸入文字(1)}!".to_string(),
//!     "Bye {輸入文字(2)}!".to_string(),
//!     vec![1, 2],
//! );
//!
//! let location = temp_dir.path().join("greeting");
//! save_block(&block, &location).expect("Failed to save block");
//! let loaded = load_block(&location).expect("Failed to load block");
//! assert_eq!(loaded, block);
//! ```

use std::fs::create_dir_all;
use std::path::{Path, PathBuf};
use std::{fs, io};

use thiserror::Error;
use walkdir::WalkDir;

use crate::block::Block;

/// Name of the record file inside every block folder.
pub const BLOCK_RECORD_FILE: &str = "block.json";

#[derive(Debug, Error)]
pub enum StorageError {
    #[error("no block found at {0}")]
    NotFound(PathBuf),
    #[error("malformed block record at {path}: {source}")]
    Parse {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },
    #[error("invalid block name {name:?}: must be non-empty and contain no path separators")]
    InvalidName { name: String },
    #[error("a block folder already exists at {0}")]
    AlreadyExists(PathBuf),
    #[error("I/O error: {0}")]
    Io(#[from] io::Error),
}

/// Loads the block persisted at `location`.
///
/// # Arguments
///
/// * `location` - The directory backing the block.
///
/// # Returns
///
/// * `Ok(Block)` - If the record file exists and parses.
/// * `StorageError::NotFound` - If the record file is missing.
/// * `StorageError::Parse` - If the record file is not a valid record.
pub fn load_block(location: &Path) -> Result<Block, StorageError> {
    let record_path = location.join(BLOCK_RECORD_FILE);
    if !record_path.is_file() {
        return Err(StorageError::NotFound(record_path));
    }

    let contents = fs::read_to_string(&record_path)?;
    serde_json::from_str(&contents).map_err(|source| StorageError::Parse {
        path: record_path,
        source,
    })
}

/// Saves `block` into the directory at `location`.
///
/// The directory (and any missing parents) is created first, and an existing
/// record file is overwritten, so repeated saves are idempotent.
pub fn save_block(block: &Block, location: &Path) -> Result<(), StorageError> {
    create_dir_all(location)?;

    let record_path = location.join(BLOCK_RECORD_FILE);
    let contents =
        serde_json::to_string_pretty(block).map_err(|source| StorageError::Parse {
            path: record_path.clone(),
            source,
        })?;
    fs::write(record_path, contents)?;
    Ok(())
}

/// Removes the block folder at `location` and everything in it. Deleting a
/// location that does not exist is a no-op, not an error.
pub fn delete_block(location: &Path) -> Result<(), StorageError> {
    if location.exists() {
        fs::remove_dir_all(location)?;
    }
    Ok(())
}

/// Rejects names that cannot serve as a block folder name.
pub fn validate_folder_name(name: &str) -> Result<(), StorageError> {
    if name.is_empty() || name.contains(['/', '\\']) {
        return Err(StorageError::InvalidName {
            name: name.to_string(),
        });
    }
    Ok(())
}

/// Renames the block folder at `location` to `new_name` and rewrites the
/// record's `name` field to match, so the on-disk name and the record's
/// logical name stay synchronized.
///
/// Validation happens before any filesystem mutation. The move and the record
/// rewrite are two separate steps; a crash between them leaves the record's
/// `name` stale relative to the folder name.
///
/// # Returns
///
/// * `Ok(PathBuf)` - The new block folder location.
/// * `StorageError::InvalidName` - If `new_name` is empty or contains a path
///   separator.
/// * `StorageError::NotFound` - If `location` is not an existing directory.
/// * `StorageError::AlreadyExists` - If a sibling folder named `new_name`
///   already exists.
pub fn rename_block_folder(location: &Path, new_name: &str) -> Result<PathBuf, StorageError> {
    validate_folder_name(new_name)?;
    if !location.is_dir() {
        return Err(StorageError::NotFound(location.to_path_buf()));
    }

    let new_location = location.with_file_name(new_name);
    if new_location.exists() {
        return Err(StorageError::AlreadyExists(new_location));
    }

    fs::rename(location, &new_location)?;

    let mut block = load_block(&new_location)?;
    block.name = new_name.to_string();
    save_block(&block, &new_location)?;

    Ok(new_location)
}

/// Lists every block stored directly under `root`, paired with its folder.
///
/// A `root` that does not exist yields an empty list, and a subdirectory with
/// no record file is skipped; both are normal states for a fresh or partially
/// populated folder. A subdirectory whose record file is malformed is a hard
/// error. Order is filesystem enumeration order.
pub fn list_block_entries(root: &Path) -> Result<Vec<(Block, PathBuf)>, StorageError> {
    if !root.exists() {
        return Ok(Vec::new());
    }

    let mut entries = Vec::new();
    for entry in WalkDir::new(root)
        .min_depth(1)
        .max_depth(1)
        .into_iter()
        .filter_map(|e| e.ok())
    {
        if !entry.file_type().is_dir() {
            continue;
        }
        let location = entry.into_path();
        if !location.join(BLOCK_RECORD_FILE).is_file() {
            continue;
        }
        let block = load_block(&location)?;
        entries.push((block, location));
    }
    Ok(entries)
}

/// Convenience projection of [`list_block_entries`] returning only the blocks.
pub fn list_blocks(root: &Path) -> Result<Vec<Block>, StorageError> {
    Ok(list_block_entries(root)?
        .into_iter()
        .map(|(block, _)| block)
        .collect())
}
