//! Raw binary layouts of a VPK directory file.

use binrw::{BinRead, BinWrite};

/// Value every file record is expected to end with
pub const RECORD_TERMINATOR: u16 = 0xFFFF;

/// Archive index marking bulk data that follows the tree in the directory file itself
pub const INLINE_ARCHIVE_INDEX: u16 = 0xFFFF;

/// Size of a [`RawFileRecord`] on disk
pub const RECORD_SIZE: usize = 18;

/// VPK directory file header
///
/// Defines the header of a `_dir.vpk` file which always starts with the signature `0x55AA1234`,
/// followed by the version and the size of the directory tree. Version 2 files carry the sizes
/// of four more sections that are stored after the bulk data.
/// All data is stored in little endian format
#[derive(BinRead, BinWrite, Debug, Copy, Clone, PartialEq)]
#[brw(little, magic = 0x55AA1234u32)]
pub struct VpkHeader {
    /// Format version, either 1 or 2
    pub version: u32,

    /// The number of bytes taken by the directory tree directly after the header
    pub tree_size: u32,

    /// Section sizes only present in version 2 files
    #[br(if(version == 2))]
    pub extended: Option<VpkHeaderV2>,
}

impl VpkHeader {
    /// Number of bytes the header occupies, including the signature
    pub fn size(&self) -> u32 {
        match self.extended {
            Some(_) => 28,
            None => 12,
        }
    }
}

impl Default for VpkHeader {
    fn default() -> Self {
        Self {
            version: 1,
            tree_size: Default::default(),
            extended: Default::default(),
        }
    }
}

/// Additional header fields for version 2 directory files
#[derive(BinRead, BinWrite, Debug, Default, Copy, Clone, PartialEq)]
#[brw(little)]
pub struct VpkHeaderV2 {
    /// Size of the bulk data stored inline after the tree
    pub file_data_section_size: u32,

    /// Size of the section holding checksums of the archive parts
    pub archive_md5_section_size: u32,

    /// Size of the section holding checksums of the tree and the archive checksums
    pub other_md5_section_size: u32,

    /// Size of the signature section
    pub signature_section_size: u32,
}

/// Fixed 18 byte record that follows every file name in the tree
#[derive(BinRead, BinWrite, Debug, Copy, Clone, PartialEq)]
#[brw(little)]
pub struct RawFileRecord {
    /// A CRC-32 checksum of the file's content
    pub crc: u32,

    /// The number of preload bytes stored right after this record
    pub preload_length: u16,

    /// The archive part holding the bulk data, or [`INLINE_ARCHIVE_INDEX`]
    pub archive_index: u16,

    /// Offset of the bulk data inside its archive part
    pub entry_offset: u32,

    /// Number of bulk data bytes, not counting the preload bytes
    pub entry_length: u32,

    /// Format sanity tag, expected to equal [`RECORD_TERMINATOR`]
    pub terminator: u16,
}

impl Default for RawFileRecord {
    fn default() -> Self {
        Self {
            crc: Default::default(),
            preload_length: Default::default(),
            archive_index: Default::default(),
            entry_offset: Default::default(),
            entry_length: Default::default(),
            terminator: RECORD_TERMINATOR,
        }
    }
}

#[cfg(test)]
mod test {
    use std::io::Cursor;

    use binrw::BinRead;
    use binrw::BinWrite;
    use pretty_assertions::assert_eq;

    use crate::error::Result;
    use crate::types::{RawFileRecord, VpkHeader, VpkHeaderV2, INLINE_ARCHIVE_INDEX};

    #[test]
    fn read_v1_header() -> Result<()> {
        #[rustfmt::skip]
        let mut input = Cursor::new(vec![
            0x34, 0x12, 0xAA, 0x55,
            0x01, 0x00, 0x00, 0x00,
            0x40, 0x00, 0x00, 0x00,
        ]);

        let expected = VpkHeader {
            version: 1,
            tree_size: 64,
            extended: None,
        };

        let header = VpkHeader::read(&mut input)?;
        assert_eq!(header, expected);
        assert_eq!(header.size(), 12);

        Ok(())
    }

    #[test]
    fn read_v2_header() -> Result<()> {
        #[rustfmt::skip]
        let mut input = Cursor::new(vec![
            0x34, 0x12, 0xAA, 0x55,
            0x02, 0x00, 0x00, 0x00,
            0x40, 0x00, 0x00, 0x00,
            0x10, 0x00, 0x00, 0x00,
            0x30, 0x00, 0x00, 0x00,
            0x30, 0x00, 0x00, 0x00,
            0x00, 0x00, 0x00, 0x00,
        ]);

        let expected = VpkHeader {
            version: 2,
            tree_size: 64,
            extended: Some(VpkHeaderV2 {
                file_data_section_size: 16,
                archive_md5_section_size: 48,
                other_md5_section_size: 48,
                signature_section_size: 0,
            }),
        };

        let header = VpkHeader::read(&mut input)?;
        assert_eq!(header, expected);
        assert_eq!(header.size(), 28);

        Ok(())
    }

    #[test]
    fn read_header_with_bad_signature() {
        #[rustfmt::skip]
        let mut input = Cursor::new(vec![
            0x45, 0x45, 0x52, 0x54,
            0x01, 0x00, 0x00, 0x00,
            0x40, 0x00, 0x00, 0x00,
        ]);

        assert!(VpkHeader::read(&mut input).is_err());
    }

    #[test]
    fn read_record() -> Result<()> {
        #[rustfmt::skip]
        let mut input = Cursor::new(vec![
            0x78, 0x56, 0x34, 0x12,
            0x03, 0x00,
            0xFF, 0xFF,
            0x64, 0x00, 0x00, 0x00,
            0x32, 0x00, 0x00, 0x00,
            0xFF, 0xFF,
        ]);

        let expected = RawFileRecord {
            crc: 0x12345678,
            preload_length: 3,
            archive_index: INLINE_ARCHIVE_INDEX,
            entry_offset: 100,
            entry_length: 50,
            ..Default::default()
        };

        assert_eq!(RawFileRecord::read(&mut input)?, expected);
        assert_eq!(input.position(), 18);

        Ok(())
    }

    #[test]
    fn write_record() -> Result<()> {
        #[rustfmt::skip]
        let expected = vec![
            0x00, 0x00, 0x00, 0x00,
            0x00, 0x00,
            0x02, 0x00,
            0x00, 0x10, 0x00, 0x00,
            0x0B, 0x00, 0x00, 0x00,
            0xFF, 0xFF,
        ];

        let record = RawFileRecord {
            archive_index: 2,
            entry_offset: 4096,
            entry_length: 11,
            ..Default::default()
        };

        let mut actual = Vec::new();
        record.write(&mut Cursor::new(&mut actual))?;

        assert_eq!(actual, expected);

        Ok(())
    }
}
