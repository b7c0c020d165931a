//! Types for reading VPK directory trees
//!

use binrw::BinRead;
use bon::Builder;
use byteorder::ReadBytesExt;
use std::io::{self, BufRead, BufReader, Cursor, Read, Seek};
use tracing::{debug, instrument, trace, warn};

use crate::{
    error::{EntryLocation, Error, NameToken, Result},
    tree::{DirectoryTree, FileEntry},
    types::{RawFileRecord, VpkHeader, RECORD_SIZE, RECORD_TERMINATOR},
};

/// Options for how the directory tree should be read
#[derive(Debug, Clone, Copy, Default, Builder)]
pub struct TreeReaderOptions {
    /// Fail on file records whose terminator is not `0xFFFF` instead of logging a warning
    #[builder(default)]
    pub strict_terminator: bool,
}

/// Read one null terminated name from the stream.
///
/// `buf` is scratch space reused between calls, the returned name is an independent copy.
/// Returns `None` when the stream is exhausted before the first byte of the name, which marks
/// a clean end of the tree. An empty name is the sentinel closing the current level.
pub fn read_string<R: Read>(
    reader: &mut R,
    buf: &mut Vec<u8>,
    token: NameToken,
) -> Result<Option<String>> {
    buf.clear();

    loop {
        let char = match reader.read_u8() {
            Ok(char) => char,
            Err(e) if e.kind() == io::ErrorKind::UnexpectedEof => {
                if buf.is_empty() {
                    return Ok(None);
                }
                return Err(Error::UnexpectedEof { token });
            }
            Err(source) => return Err(Error::Stream { token, source }),
        };

        if char == b'\0' {
            break;
        }
        buf.push(char);
    }

    let name = std::str::from_utf8(buf).map_err(|source| Error::InvalidName { token, source })?;
    Ok(Some(name.to_owned()))
}

/// Read the fixed record and preload bytes that follow a file name.
pub fn read_file_entry<R: Read>(
    reader: &mut R,
    location: EntryLocation,
    options: &TreeReaderOptions,
) -> Result<FileEntry> {
    let mut raw = [0u8; RECORD_SIZE];
    if let Err(source) = reader.read_exact(&mut raw) {
        return Err(Error::MalformedRecord { location, source });
    }
    let record = RawFileRecord::read(&mut Cursor::new(raw))?;

    if record.terminator != RECORD_TERMINATOR {
        if options.strict_terminator {
            return Err(Error::BadTerminator {
                location,
                found: record.terminator,
            });
        }
        warn!(%location, found = record.terminator, "unexpected file record terminator");
    }

    let mut preload = vec![0u8; record.preload_length as usize];
    if !preload.is_empty() {
        if let Err(source) = reader.read_exact(&mut preload) {
            return Err(Error::MalformedRecord { location, source });
        }
    }

    Ok(FileEntry {
        crc32: record.crc,
        preload: preload.into_boxed_slice(),
        archive_index: record.archive_index,
        offset: record.entry_offset,
        length: record.entry_length,
        location,
    })
}

/// Directory tree decoder
///
/// ```no_run
/// use std::{fs::File, io::{BufReader, Seek, SeekFrom}};
/// use vpk_tree::read::{TreeReader, TreeReaderOptions};
///
/// fn list_tree(mut file: File) -> vpk_tree::error::Result<()> {
///     file.seek(SeekFrom::Start(12))?;
///
///     let reader = TreeReader::new(TreeReaderOptions::builder().strict_terminator(true).build());
///     let tree = reader.read(BufReader::new(file))?;
///
///     for name in tree.file_names() {
///         println!("Filename: {}", name);
///     }
///
///     Ok(())
/// }
/// ```
#[derive(Debug, Clone, Copy, Default)]
pub struct TreeReader {
    options: TreeReaderOptions,
}

impl TreeReader {
    pub fn new(options: TreeReaderOptions) -> Self {
        TreeReader { options }
    }

    /// Decode a whole tree from a stream positioned at its first extension.
    ///
    /// The stream may end without the final sentinels, but only where a new name would start.
    /// Any other failure aborts the decode and no partial tree is returned.
    #[instrument(skip_all, err)]
    pub fn read<R: BufRead>(&self, mut reader: R) -> Result<DirectoryTree> {
        let mut tree = DirectoryTree::new();
        let mut buf = Vec::with_capacity(64);

        'tree: loop {
            let extension = match read_string(&mut reader, &mut buf, NameToken::Extension)? {
                Some(extension) if !extension.is_empty() => extension,
                _ => break 'tree,
            };
            debug!(%extension, "reading extension");

            loop {
                let path = match read_string(&mut reader, &mut buf, NameToken::Path)? {
                    None => break 'tree,
                    Some(path) if path.is_empty() => break,
                    Some(path) => path,
                };
                debug!(%extension, %path, "reading path");

                loop {
                    let filename =
                        match read_string(&mut reader, &mut buf, NameToken::Filename)? {
                            None => break 'tree,
                            Some(filename) if filename.is_empty() => break,
                            Some(filename) => filename,
                        };

                    let location = EntryLocation {
                        extension: extension.clone(),
                        path: path.clone(),
                        filename,
                    };
                    let entry = read_file_entry(&mut reader, location, &self.options)?;
                    trace!(
                        location = %entry.location(),
                        archive = entry.archive_index(),
                        offset = entry.offset(),
                        length = entry.length(),
                        preload = entry.preload().len(),
                        "read file entry"
                    );

                    tree.insert(entry)?;
                }
            }
        }

        debug!(files = tree.len(), "finished reading tree");
        Ok(tree)
    }
}

/// Decode a directory tree with the default options.
pub fn read_tree<R: BufRead>(reader: R) -> Result<DirectoryTree> {
    TreeReader::default().read(reader)
}

/// VPK directory file reader
///
/// Reads the header of a `_dir.vpk` file and indexes its directory tree. The bulk data of the
/// files is left untouched.
///
/// ```no_run
/// use std::io::prelude::*;
///
/// fn list_vpk_contents(reader: impl Read + Seek) -> vpk_tree::error::Result<()> {
///     let vpk = vpk_tree::VpkDirectory::new(reader)?;
///
///     for file in vpk.tree().iter() {
///         println!("Filename: {} ({} bytes)", file.full_path(), file.size());
///     }
///
///     Ok(())
/// }
/// ```
#[derive(Debug, Clone)]
pub struct VpkDirectory {
    header: VpkHeader,
    tree: DirectoryTree,
}

impl VpkDirectory {
    /// Read a VPK directory file collecting the files it describes.
    pub fn new<R: Read + Seek>(reader: R) -> Result<VpkDirectory> {
        Self::with_options(reader, TreeReaderOptions::default())
    }

    /// Read a VPK directory file with explicit tree reading options.
    #[instrument(skip(reader), err)]
    pub fn with_options<R: Read + Seek>(
        mut reader: R,
        options: TreeReaderOptions,
    ) -> Result<VpkDirectory> {
        let header = VpkHeader::read(&mut reader).map_err(|e| match e {
            binrw::Error::BadMagic { .. } => Error::InvalidArchive,
            e => Error::from(e),
        })?;

        if !(1..=2).contains(&header.version) {
            return Err(Error::UnsupportedVersion(header.version));
        }
        debug!(version = header.version, tree_size = header.tree_size, "read header");

        let tree_reader = BufReader::new(reader.take(header.tree_size as u64));
        let tree = TreeReader::new(options).read(tree_reader)?;

        Ok(VpkDirectory { header, tree })
    }

    /// Returns the parsed header
    pub fn header(&self) -> &VpkHeader {
        &self.header
    }

    /// Returns the format version
    pub fn version(&self) -> u32 {
        self.header.version
    }

    /// Returns the decoded directory tree
    pub fn tree(&self) -> &DirectoryTree {
        &self.tree
    }

    /// Number of files described by this directory
    pub fn len(&self) -> usize {
        self.tree.len()
    }

    /// Whether this directory describes no files
    pub fn is_empty(&self) -> bool {
        self.tree.is_empty()
    }

    /// Offset in the directory file where inline bulk data starts
    pub fn data_offset(&self) -> u64 {
        self.header.size() as u64 + self.header.tree_size as u64
    }

    /// Unwrap and return the decoded tree
    pub fn into_tree(self) -> DirectoryTree {
        self.tree
    }
}
