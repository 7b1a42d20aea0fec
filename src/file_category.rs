//! File categorization by extension.
//!
//! This module maps file extensions to broad categories, each of which
//! corresponds to a destination subdirectory of the sorted tree.
//!
//! # Examples
//!
//! ```
//! use dirsort::file_category::{Category, RuleTable};
//!
//! let rules = RuleTable::default();
//! assert_eq!(rules.classify(".JPG"), Category::Images);
//! assert_eq!(rules.classify("pdf"), Category::Documents);
//! assert_eq!(rules.classify(".xyz"), Category::Other);
//! ```

use std::collections::HashMap;
use std::path::Path;

/// Represents a broad file category.
///
/// Every category owns one subdirectory under the source root.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum Category {
    /// Image files (JPG, PNG)
    Images,
    /// Document files (TXT, DOC, DOCX, PDF)
    Documents,
    /// Audio files (MP3, WAV)
    Music,
    /// Video files (MP4, AVI)
    Video,
    /// Archive files (ZIP, RAR)
    Archives,
    /// Anything the rule table does not know
    Other,
}

impl Category {
    /// Returns the directory name for this category.
    ///
    /// # Examples
    ///
    /// ```
    /// use dirsort::file_category::Category;
    ///
    /// assert_eq!(Category::Images.dir_name(), "Images");
    /// assert_eq!(Category::Other.dir_name(), "other");
    /// ```
    pub fn dir_name(&self) -> &'static str {
        match self {
            Category::Images => "Images",
            Category::Documents => "Documents",
            Category::Music => "Music",
            Category::Video => "Video",
            Category::Archives => "Archives",
            Category::Other => "other",
        }
    }

    /// All categories, the fallback included.
    pub fn all() -> &'static [Category] {
        &[
            Category::Images,
            Category::Documents,
            Category::Music,
            Category::Video,
            Category::Archives,
            Category::Other,
        ]
    }
}

impl std::fmt::Display for Category {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.dir_name())
    }
}

/// Maps file extensions to categories.
///
/// The table is fixed at construction; lookups are case-insensitive and
/// accept extensions with or without the leading dot.
#[derive(Debug, Clone)]
pub struct RuleTable {
    extension_map: HashMap<String, Category>,
}

impl RuleTable {
    /// Creates a `RuleTable` with the standard mappings.
    pub fn new() -> Self {
        let mut rules = Self {
            extension_map: HashMap::new(),
        };
        rules.populate_standard_mappings();
        rules
    }

    fn populate_standard_mappings(&mut self) {
        self.add_extension_mapping("jpg", Category::Images);
        self.add_extension_mapping("jpeg", Category::Images);
        self.add_extension_mapping("png", Category::Images);

        self.add_extension_mapping("txt", Category::Documents);
        self.add_extension_mapping("docx", Category::Documents);
        self.add_extension_mapping("doc", Category::Documents);
        self.add_extension_mapping("pdf", Category::Documents);

        self.add_extension_mapping("mp3", Category::Music);
        self.add_extension_mapping("wav", Category::Music);

        self.add_extension_mapping("mp4", Category::Video);
        self.add_extension_mapping("avi", Category::Video);

        self.add_extension_mapping("zip", Category::Archives);
        self.add_extension_mapping("rar", Category::Archives);
    }

    fn add_extension_mapping(&mut self, ext: &str, category: Category) {
        self.extension_map.insert(normalize(ext), category);
    }

    /// Maps a file extension to a category, falling back to `Category::Other`.
    ///
    /// # Examples
    ///
    /// ```
    /// use dirsort::file_category::{Category, RuleTable};
    ///
    /// let rules = RuleTable::default();
    /// assert_eq!(rules.classify(".Mp3"), Category::Music);
    /// assert_eq!(rules.classify(""), Category::Other);
    /// ```
    pub fn classify(&self, ext: &str) -> Category {
        self.extension_map
            .get(&normalize(ext))
            .copied()
            .unwrap_or(Category::Other)
    }

    /// Classifies a file by the extension of its name.
    ///
    /// Files without an extension (including dotfiles such as `.bashrc`)
    /// land in `Category::Other`.
    pub fn classify_path(&self, path: &Path) -> Category {
        match path.extension() {
            Some(ext) => self.classify(&ext.to_string_lossy()),
            None => Category::Other,
        }
    }

    /// Returns true if `name` is exactly the directory name of some category.
    ///
    /// The comparison is case-sensitive, so `images` is not a category folder.
    pub fn is_category_dir(&self, name: &str) -> bool {
        Category::all().iter().any(|c| c.dir_name() == name)
    }
}

impl Default for RuleTable {
    fn default() -> Self {
        Self::new()
    }
}

fn normalize(ext: &str) -> String {
    ext.trim_start_matches('.').to_lowercase()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_category_dir_names() {
        assert_eq!(Category::Images.dir_name(), "Images");
        assert_eq!(Category::Documents.dir_name(), "Documents");
        assert_eq!(Category::Music.dir_name(), "Music");
        assert_eq!(Category::Video.dir_name(), "Video");
        assert_eq!(Category::Archives.dir_name(), "Archives");
        assert_eq!(Category::Other.dir_name(), "other");
    }

    #[test]
    fn test_classify_every_known_extension() {
        let rules = RuleTable::default();
        let expected = [
            (".jpg", Category::Images),
            (".jpeg", Category::Images),
            (".png", Category::Images),
            (".txt", Category::Documents),
            (".docx", Category::Documents),
            (".doc", Category::Documents),
            (".pdf", Category::Documents),
            (".mp3", Category::Music),
            (".wav", Category::Music),
            (".mp4", Category::Video),
            (".avi", Category::Video),
            (".zip", Category::Archives),
            (".rar", Category::Archives),
        ];
        for (ext, category) in expected {
            assert_eq!(rules.classify(ext), category, "extension {}", ext);
            assert_eq!(rules.classify(&ext.to_uppercase()), category);
        }
    }

    #[test]
    fn test_classify_without_leading_dot() {
        let rules = RuleTable::default();
        assert_eq!(rules.classify("png"), Category::Images);
        assert_eq!(rules.classify("ZIP"), Category::Archives);
    }

    #[test]
    fn test_classify_unknown_defaults_to_other() {
        let rules = RuleTable::default();
        assert_eq!(rules.classify(".xyz"), Category::Other);
        assert_eq!(rules.classify(".gif"), Category::Other);
        assert_eq!(rules.classify(""), Category::Other);
    }

    #[test]
    fn test_classify_path() {
        let rules = RuleTable::default();
        assert_eq!(
            rules.classify_path(Path::new("/tmp/Report.PDF")),
            Category::Documents
        );
        assert_eq!(
            rules.classify_path(Path::new("archive.tar.rar")),
            Category::Archives
        );
        assert_eq!(rules.classify_path(Path::new("Makefile")), Category::Other);
        assert_eq!(rules.classify_path(Path::new(".bashrc")), Category::Other);
    }

    #[test]
    fn test_is_category_dir() {
        let rules = RuleTable::default();
        assert!(rules.is_category_dir("Images"));
        assert!(rules.is_category_dir("Archives"));
        assert!(rules.is_category_dir("other"));
        assert!(!rules.is_category_dir("images"));
        assert!(!rules.is_category_dir("Photos"));
    }
}
