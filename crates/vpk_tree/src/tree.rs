//! In-memory index of the files described by a directory tree

use indexmap::{map::Entry, IndexMap};

use crate::{
    error::{EntryLocation, Error, Result},
    types::INLINE_ARCHIVE_INDEX,
};

/// Files of a single path, keyed by file name
pub type FileMap = IndexMap<String, FileEntry>;

/// Paths of a single extension, keyed by directory path
pub type PathMap = IndexMap<String, FileMap>;

/// The whole tree, keyed by extension
pub type ExtensionMap = IndexMap<String, PathMap>;

/// Metadata of a single file stored in a VPK archive
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FileEntry {
    pub(crate) crc32: u32,
    pub(crate) preload: Box<[u8]>,
    pub(crate) archive_index: u16,
    pub(crate) offset: u32,
    pub(crate) length: u32,
    pub(crate) location: EntryLocation,
}

impl FileEntry {
    /// Get the CRC32 checksum of the file's content
    pub fn crc32(&self) -> u32 {
        self.crc32
    }

    /// Get the bytes stored inline in the tree, directly after the record
    pub fn preload(&self) -> &[u8] {
        &self.preload
    }

    /// Get the index of the archive part holding the bulk data
    pub fn archive_index(&self) -> u16 {
        self.archive_index
    }

    /// Whether the bulk data follows the tree in the directory file instead of a numbered part
    pub fn is_inline(&self) -> bool {
        self.archive_index == INLINE_ARCHIVE_INDEX
    }

    /// Get the offset of the bulk data inside its archive part
    pub fn offset(&self) -> u32 {
        self.offset
    }

    /// Get the number of bulk data bytes, not counting the preload bytes
    pub fn length(&self) -> u32 {
        self.length
    }

    /// Get the full size of the file once preload and bulk data are joined
    pub fn size(&self) -> u64 {
        self.preload.len() as u64 + self.length as u64
    }

    pub fn extension(&self) -> &str {
        &self.location.extension
    }

    pub fn path(&self) -> &str {
        &self.location.path
    }

    pub fn filename(&self) -> &str {
        &self.location.filename
    }

    /// Get the (extension, path, filename) triple this entry is stored under
    pub fn location(&self) -> &EntryLocation {
        &self.location
    }

    /// Get the name of the file as it would appear on disk
    ///
    /// A path or extension made of a single space marks the file as living in the root
    /// directory or having no extension.
    ///
    /// # Warnings
    ///
    /// It is dangerous to use this name directly when extracting an archive.
    /// It may contain an absolute path (`/etc/shadow`), or break out of the
    /// current directory (`../runtime`).
    pub fn full_path(&self) -> String {
        let mut name = String::new();
        if !is_blank(&self.location.path) {
            name.push_str(&self.location.path);
            name.push('/');
        }
        name.push_str(&self.location.filename);
        if !is_blank(&self.location.extension) {
            name.push('.');
            name.push_str(&self.location.extension);
        }
        name
    }
}

fn is_blank(component: &str) -> bool {
    component.is_empty() || component == " "
}

/// Index of every file in a directory tree, grouped by extension and then by path
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct DirectoryTree {
    extensions: ExtensionMap,
    len: usize,
}

impl DirectoryTree {
    pub fn new() -> Self {
        Self::default()
    }

    /// Store an entry under its triple, creating the intermediate levels on first use.
    ///
    /// Fails without touching the existing entry if the triple is already taken.
    pub(crate) fn insert(&mut self, entry: FileEntry) -> Result<()> {
        let files = self
            .extensions
            .entry(entry.location.extension.clone())
            .or_default()
            .entry(entry.location.path.clone())
            .or_default();

        match files.entry(entry.location.filename.clone()) {
            Entry::Occupied(_) => Err(Error::DuplicateEntry {
                location: entry.location,
            }),
            Entry::Vacant(slot) => {
                slot.insert(entry);
                self.len += 1;
                Ok(())
            }
        }
    }

    /// Number of files in the tree
    pub fn len(&self) -> usize {
        self.len
    }

    /// Whether the tree contains no files
    pub fn is_empty(&self) -> bool {
        self.len == 0
    }

    /// Returns an iterator over every extension in the tree
    pub fn extensions(&self) -> impl Iterator<Item = &str> {
        self.extensions.keys().map(String::as_str)
    }

    /// Returns an iterator over the paths holding files with the given extension
    pub fn paths<'a>(&'a self, extension: &str) -> impl Iterator<Item = &'a str> + 'a {
        self.extensions
            .get(extension)
            .into_iter()
            .flat_map(|paths| paths.keys().map(String::as_str))
    }

    /// Returns an iterator over the files stored under an extension and path
    pub fn files<'a>(
        &'a self,
        extension: &str,
        path: &str,
    ) -> impl Iterator<Item = &'a FileEntry> + 'a {
        self.extensions
            .get(extension)
            .and_then(|paths| paths.get(path))
            .into_iter()
            .flat_map(|files| files.values())
    }

    /// Look up an entry by its triple
    pub fn get(&self, extension: &str, path: &str, filename: &str) -> Option<&FileEntry> {
        self.extensions.get(extension)?.get(path)?.get(filename)
    }

    /// Look up an entry by the name returned from [`FileEntry::full_path`]
    pub fn by_name(&self, name: &str) -> Option<&FileEntry> {
        let (path, file) = name.rsplit_once('/').unwrap_or((" ", name));
        let (filename, extension) = file.rsplit_once('.').unwrap_or((file, " "));
        self.get(extension, path, filename)
    }

    /// Returns an iterator over all entries, grouped by extension and then by path
    pub fn iter(&self) -> impl Iterator<Item = &FileEntry> {
        self.extensions
            .values()
            .flat_map(|paths| paths.values())
            .flat_map(|files| files.values())
    }

    /// Returns an iterator over the full names of all entries
    pub fn file_names(&self) -> impl Iterator<Item = String> + '_ {
        self.iter().map(FileEntry::full_path)
    }

    /// Unwrap and return the nested maps
    pub fn into_inner(self) -> ExtensionMap {
        self.extensions
    }
}
