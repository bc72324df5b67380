//! Registry of parsed files handed to the generator.

use crate::FileDescriptor;

/// The full set of files produced by one upstream compiler invocation.
///
/// Files are kept in the order the compiler supplied them; the generator
/// processes them strictly in that order.
#[derive(Debug, Clone, Default)]
pub struct Registry {
    files: Vec<FileDescriptor>,
}

impl Registry {
    pub fn new() -> Self {
        Self::default()
    }

    /// Add a parsed file to the registry.
    pub fn add(&mut self, file: FileDescriptor) {
        self.files.push(file);
    }

    /// All registered files, in registration order.
    pub fn files(&self) -> &[FileDescriptor] {
        &self.files
    }

    /// Look up a file by its source name.
    pub fn file(&self, name: &str) -> Option<&FileDescriptor> {
        self.files.iter().find(|f| f.name() == name)
    }

    pub fn len(&self) -> usize {
        self.files.len()
    }

    pub fn is_empty(&self) -> bool {
        self.files.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::GoPackage;

    #[test]
    fn test_lookup_by_name() {
        let mut registry = Registry::new();
        registry.add(FileDescriptor::new(
            "strings.proto",
            GoPackage::new("strings", "pb/strings"),
        ));

        assert_eq!(registry.len(), 1);
        assert!(registry.file("strings.proto").is_some());
        assert!(registry.file("missing.proto").is_none());
    }
}
