use clap::Parser;
use clap::Subcommand;

#[derive(Parser, Debug)]
#[command(author="corpus-prep", version, about="Fetch the Canterbury corpus and prepare binary sample data", long_about = None)]
pub struct Arg {
    // optional TOML config file, built-in defaults are used without it
    #[arg(short, long)]
    pub config: Option<String>,

    #[command(subcommand)]
    pub cmd: Option<ArgCommand>,
}

#[derive(Subcommand, Clone, Debug, PartialEq, Eq)]
pub enum ArgCommand {
    /// Download and extract the corpus archive
    Fetch,

    /// Prepare the binary sample file
    Sample,

    /// Run both steps (default)
    All,
}

impl Arg {
    pub fn command_or_default(&self) -> ArgCommand {
        self.cmd.clone().unwrap_or(ArgCommand::All)
    }
}
