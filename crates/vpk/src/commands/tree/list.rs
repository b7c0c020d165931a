use clap::Args;
use itertools::Itertools;
use miette::Result;
use std::path::PathBuf;
use tracing::info;
use vpk_tree::FileEntry;

#[derive(Args)]
pub struct ListArgs {
    /// An input VPK directory file
    #[arg(short, long, value_name = "FILE")]
    file: PathBuf,

    /// Only list files with this extension
    #[arg(short, long, value_name = "EXT")]
    extension: Option<String>,

    /// Fail on file records with a corrupt terminator
    #[arg(long, default_value_t = false)]
    strict: bool,

    /// Print the archive location of each file
    #[arg(short, long, default_value_t = false)]
    long: bool,
}

impl ListArgs {
    pub fn handle(&self) -> Result<()> {
        let vpk = super::open_directory(&self.file, self.strict)?;
        info!("{} files in {}", vpk.len(), self.file.display());

        let entries = vpk
            .tree()
            .iter()
            .filter(|entry| {
                self.extension
                    .as_deref()
                    .map_or(true, |ext| entry.extension() == ext)
            })
            .sorted_by_key(|entry| entry.full_path());

        for entry in entries {
            if self.long {
                println!("{}  {}", location(entry), entry.full_path());
            } else {
                println!("{}", entry.full_path());
            }
        }

        Ok(())
    }
}

fn location(entry: &FileEntry) -> String {
    let archive = if entry.is_inline() {
        "dir".to_string()
    } else {
        format!("{:03}", entry.archive_index())
    };

    format!(
        "{archive:>5} {:>10} {:>10} {:>6} {:08x}",
        entry.offset(),
        entry.length(),
        entry.preload().len(),
        entry.crc32()
    )
}
