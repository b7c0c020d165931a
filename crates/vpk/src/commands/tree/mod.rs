use std::{fs::File, io::BufReader, path::Path};

use miette::{Context, IntoDiagnostic, Result};
use vpk_tree::{TreeReaderOptions, VpkDirectory};

pub mod info;
pub mod list;

#[derive(clap::Subcommand)]
pub enum TreeCommands {
    /// Print a summary of a VPK directory file
    Info(info::InfoArgs),
    /// List every file described by a VPK directory file
    List(list::ListArgs),
}

impl TreeCommands {
    pub fn handle(&self) -> Result<()> {
        match self {
            TreeCommands::Info(info) => info.handle(),
            TreeCommands::List(list) => list.handle(),
        }
    }
}

fn open_directory(path: &Path, strict: bool) -> Result<VpkDirectory> {
    let f = File::open(path)
        .into_diagnostic()
        .context(format!("path: {}", path.display()))?;

    let options = TreeReaderOptions::builder().strict_terminator(strict).build();
    let vpk = VpkDirectory::with_options(BufReader::new(f), options)
        .context(format!("reading {}", path.display()))?;
    Ok(vpk)
}
