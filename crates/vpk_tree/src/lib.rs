//! This library decodes the directory tree of **VPK** package files used by *Valve's Source engine*.
//!
//! # VPK Directory Format Documentation
//!
//! A VPK archive is split into a directory file (`*_dir.vpk`) and any number of numbered archive
//! parts (`*_000.vpk`, `*_001.vpk`, ...). The directory file holds a header followed by the
//! directory tree, which indexes every file in the archive. This crate decodes that tree into an
//! in-memory index. Reading the bulk data of the files is left to the caller.
//!
//! ## Header
//!
//! | Offset (bytes) | Field                  | Description                                                |
//! |----------------|------------------------|------------------------------------------------------------|
//! | 0x0000         | Signature              | 4 bytes: 0x55AA1234                                        |
//! | 0x0004         | Version                | 4 bytes: 1 or 2                                            |
//! | 0x0008         | Tree Size              | 4 bytes: Size of the directory tree in bytes               |
//! | 0x000C         | File Data Size         | 4 bytes: (v2 only) Size of the inline bulk data            |
//! | 0x0010         | Archive MD5 Size       | 4 bytes: (v2 only) Size of the archive checksum section    |
//! | 0x0014         | Other MD5 Size         | 4 bytes: (v2 only) Size of the other checksum section      |
//! | 0x0018         | Signature Size         | 4 bytes: (v2 only) Size of the signature section           |
//!
//! ## Directory Tree
//!
//! The tree directly follows the header. It is a three level nested list of null terminated
//! strings: extensions, then the paths holding files with that extension, then the names of the
//! files in that path. Each list is closed by an empty string.
//!
//! ```text
//! repeat:
//!   extension            ("" closes the tree)
//!   repeat:
//!     path               ("" closes the extension)
//!     repeat:
//!       filename         ("" closes the path)
//!       file record      (18 bytes)
//!       preload data     (preload length bytes)
//! ```
//!
//! A path or extension consisting of a single space stands for the root directory or for a file
//! without an extension.
//!
//! ### File Record
//!
//! | Offset (bytes) | Field                  | Description                                             |
//! |----------------|------------------------|---------------------------------------------------------|
//! | 0x0000         | CRC32                  | 4 bytes: CRC-32 checksum of the file's content          |
//! | 0x0004         | Preload Length         | 2 bytes: Number of preload bytes after the record       |
//! | 0x0006         | Archive Index          | 2 bytes: Archive part holding the bulk data             |
//! | 0x0008         | Entry Offset           | 4 bytes: Offset of the bulk data in its archive part    |
//! | 0x000C         | Entry Length           | 4 bytes: Size of the bulk data, excluding preload bytes |
//! | 0x0010         | Terminator             | 2 bytes: Always 0xFFFF                                  |
//!
//! - **Archive Index**: `0xFFFF` means the bulk data follows the tree in the directory file itself,
//!   starting at [`read::VpkDirectory::data_offset`].
//!
//! ## Additional Information
//!
//! - **File Extension**: `.vpk`
//! - **Endianness**: Little-endian for all multi-byte integers
//!

pub mod error;
pub mod read;
pub mod tree;
pub mod types;

pub use read::{read_tree, TreeReader, TreeReaderOptions, VpkDirectory};
pub use tree::{DirectoryTree, FileEntry};
