use clap::Args;
use itertools::Itertools;
use miette::Result;
use owo_colors::OwoColorize;
use std::path::PathBuf;

#[derive(Args)]
pub struct InfoArgs {
    /// An input VPK directory file
    #[arg(short, long, value_name = "FILE")]
    file: PathBuf,

    /// Fail on file records with a corrupt terminator
    #[arg(long, default_value_t = false)]
    strict: bool,
}

impl InfoArgs {
    pub fn handle(&self) -> Result<()> {
        let vpk = super::open_directory(&self.file, self.strict)?;
        let header = vpk.header();
        let tree = vpk.tree();

        println!("{}", self.file.display().bold());
        println!("  version      {}", header.version);
        println!("  tree size    {}", header.tree_size);
        println!("  data offset  {}", vpk.data_offset());
        if let Some(extended) = header.extended {
            println!("  data section {}", extended.file_data_section_size);
        }
        println!("  files        {}", tree.len());

        let archives = tree
            .iter()
            .filter(|entry| !entry.is_inline())
            .map(|entry| entry.archive_index())
            .unique()
            .count();
        println!("  archives     {}", archives);

        println!("{}", "extensions".bold());
        for extension in tree.extensions().sorted() {
            let count: usize = tree
                .paths(extension)
                .map(|path| tree.files(extension, path).count())
                .sum();
            println!("  {:<12} {}", extension.cyan(), count);
        }

        Ok(())
    }
}
