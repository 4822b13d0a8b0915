//! # LazyBlock Core
//!
//! This crate provides the core functionality for LazyBlock, a tool for
//! authoring and applying reusable text blocks: named templates with indexed
//! placeholder slots that get filled with user-supplied text to produce an
//! input rendition and an output rendition.
//!
//! # Modules
//!
//! - [`block`] - The block entity, its validation, and its record codec
//! - [`engine`] - Template extraction and rendering
//! - [`parser`] - The placeholder token grammar
//! - [`file_storage`] - Folder-per-block storage on the local filesystem
//!
//! # Examples
//!
//! ```rust
//! use std::collections::HashMap;
//!
//! use lazyblock_core::block::Block;
//! use lazyblock_core::engine::render_block_for_input;
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
//!
//! let loaded = load_block(&location).expect("Failed to load block");
//! let mut values = HashMap::new();
//! values.insert(1, "World".to_string());
//! assert_eq!(render_block_for_input(&loaded, &values), "Hello World!");
//! ```

pub mod block;
pub mod engine;
pub mod file_storage;
pub mod parser;
