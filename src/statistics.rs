//! Per-category bookkeeping of relocated files.

use crate::file_category::Category;
use serde::Serialize;
use std::collections::HashMap;

/// Count and cumulative byte size of the files recorded for one category.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct FileStats {
    pub count: u64,
    pub total_size: u64,
}

/// Aggregates `FileStats` by category.
///
/// Entries are created on first use and never removed.
#[derive(Debug, Clone, Default)]
pub struct Statistics {
    by_category: HashMap<Category, FileStats>,
}

impl Statistics {
    pub fn new() -> Self {
        Self::default()
    }

    /// Records one file of `size_bytes` under `category`.
    ///
    /// # Arguments
    ///
    /// * `category` - The category the file was sorted into
    /// * `size_bytes` - The file's size at its final location
    ///
    /// # Example
    ///
    /// ```
    /// use dirsort::{Category, Statistics};
    ///
    /// let mut stats = Statistics::new();
    /// stats.record(Category::Images, 1024);
    /// stats.record(Category::Images, 2048);
    ///
    /// let images = stats.get(Category::Images).unwrap();
    /// assert_eq!(images.count, 2);
    /// assert_eq!(images.total_size, 3072);
    /// ```
    pub fn record(&mut self, category: Category, size_bytes: u64) {
        let stats = self.by_category.entry(category).or_default();
        stats.count += 1;
        stats.total_size += size_bytes;
    }

    pub fn get(&self, category: Category) -> Option<&FileStats> {
        self.by_category.get(&category)
    }

    /// Iterates over recorded categories in no particular order.
    pub fn iter(&self) -> impl Iterator<Item = (&Category, &FileStats)> {
        self.by_category.iter()
    }

    pub fn is_empty(&self) -> bool {
        self.by_category.is_empty()
    }

    /// Sum of `count` across every category.
    pub fn total_count(&self) -> u64 {
        self.by_category.values().map(|s| s.count).sum()
    }

    /// Sum of `total_size` across every category, in bytes.
    pub fn total_size(&self) -> u64 {
        self.by_category.values().map(|s| s.total_size).sum()
    }
}
