#![allow(dead_code)]

use binrw::{io::NoSeek, BinWrite};
use indexmap::IndexMap;
use vpk_tree::{types::RawFileRecord, DirectoryTree};

/// A file to place in a generated tree
#[derive(Debug, Clone)]
pub struct TestFile {
    pub extension: &'static str,
    pub path: &'static str,
    pub filename: &'static str,
    pub record: RawFileRecord,
    pub preload: Vec<u8>,
}

impl TestFile {
    pub fn new(extension: &'static str, path: &'static str, filename: &'static str) -> Self {
        Self {
            extension,
            path,
            filename,
            record: RawFileRecord::default(),
            preload: Vec::new(),
        }
    }

    pub fn located_at(mut self, archive_index: u16, offset: u32, length: u32) -> Self {
        self.record.archive_index = archive_index;
        self.record.entry_offset = offset;
        self.record.entry_length = length;
        self
    }

    pub fn with_crc(mut self, crc: u32) -> Self {
        self.record.crc = crc;
        self
    }

    pub fn with_preload(mut self, preload: &[u8]) -> Self {
        self.record.preload_length = preload.len() as u16;
        self.preload = preload.to_vec();
        self
    }
}

fn write_name(out: &mut Vec<u8>, name: &str) {
    out.extend_from_slice(name.as_bytes());
    out.push(0);
}

fn write_record(out: &mut Vec<u8>, record: &RawFileRecord, preload: &[u8]) {
    record
        .write(&mut NoSeek::new(&mut *out))
        .expect("writing to a vec should not fail");
    out.extend_from_slice(preload);
}

/// Encode files into tree bytes, grouping them by extension and path in order of first use
pub fn encode_files(files: &[TestFile]) -> Vec<u8> {
    let mut grouped: IndexMap<&str, IndexMap<&str, Vec<&TestFile>>> = IndexMap::new();
    for file in files {
        grouped
            .entry(file.extension)
            .or_default()
            .entry(file.path)
            .or_default()
            .push(file);
    }

    let mut out = Vec::new();
    for (extension, paths) in grouped {
        write_name(&mut out, extension);
        for (path, files) in paths {
            write_name(&mut out, path);
            for file in files {
                write_name(&mut out, file.filename);
                write_record(&mut out, &file.record, &file.preload);
            }
            out.push(0);
        }
        out.push(0);
    }
    out.push(0);
    out
}

/// Canonical encoding of a decoded tree
pub fn encode_tree(tree: &DirectoryTree) -> Vec<u8> {
    let mut out = Vec::new();
    for extension in tree.extensions() {
        write_name(&mut out, extension);
        for path in tree.paths(extension) {
            write_name(&mut out, path);
            for entry in tree.files(extension, path) {
                write_name(&mut out, entry.filename());
                let record = RawFileRecord {
                    crc: entry.crc32(),
                    preload_length: entry.preload().len() as u16,
                    archive_index: entry.archive_index(),
                    entry_offset: entry.offset(),
                    entry_length: entry.length(),
                    ..Default::default()
                };
                write_record(&mut out, &record, entry.preload());
            }
            out.push(0);
        }
        out.push(0);
    }
    out.push(0);
    out
}

/// Wrap tree bytes into a version 1 directory file
pub fn encode_directory(tree: &[u8], inline_data: &[u8]) -> Vec<u8> {
    let mut out = Vec::new();
    out.extend_from_slice(&0x55AA1234u32.to_le_bytes());
    out.extend_from_slice(&1u32.to_le_bytes());
    out.extend_from_slice(&(tree.len() as u32).to_le_bytes());
    out.extend_from_slice(tree);
    out.extend_from_slice(inline_data);
    out
}
