pub mod tree;

#[derive(clap::Subcommand)]
pub enum Commands {
    /// Inspect the directory tree of a VPK file
    Tree {
        #[command(subcommand)]
        command: tree::TreeCommands,
    },
}

impl Commands {
    pub fn handle(&self) -> miette::Result<()> {
        match self {
            Commands::Tree { command } => command.handle(),
        }
    }
}
