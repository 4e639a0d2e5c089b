use std::path::PathBuf;

use awstape_format::Codepage;
use structopt::clap::AppSettings::*;
use structopt::StructOpt;

#[derive(Debug, StructOpt)]
#[structopt(
    name = "awstape",
    about = "Inspect, extract and create AWS virtual tape images.",
    settings = &[SubcommandRequiredElseHelp, DisableHelpSubcommand, VersionlessSubcommands]
)]
pub struct CliOpts {
    #[structopt(short, long, help = "Show verbose output", global = true)]
    pub verbose: bool,

    #[structopt(subcommand)]
    pub cmd: Commands,
}

#[derive(Debug, StructOpt)]
pub enum Commands {
    #[structopt(name = "l", visible_alias = "list", about = "List the blocks of a tape image")]
    List(ListArgs),

    #[structopt(
        name = "x",
        visible_alias = "extract",
        about = "Extract logical records from a tape image"
    )]
    Extract(ExtractArgs),

    #[structopt(
        name = "c",
        visible_alias = "create",
        about = "Create a tape image, one record per file"
    )]
    Create(CreateArgs),

    #[structopt(
        name = "conv",
        visible_alias = "convert",
        about = "Convert a plain file between ASCII and EBCDIC"
    )]
    Convert(ConvertArgs),
}

#[derive(Debug, StructOpt)]
pub struct ListArgs {
    /// Print one JSON object per block
    #[structopt(long)]
    pub json: bool,

    /// Path to the tape image
    #[structopt(name = "tapefile", parse(from_os_str))]
    pub tape: PathBuf,
}

#[derive(Debug, StructOpt)]
pub struct ExtractArgs {
    /// Directory to extract into
    #[structopt(short, long, parse(from_os_str), default_value = ".")]
    pub output: PathBuf,

    /// Convert record data from EBCDIC to ASCII
    #[structopt(long)]
    pub ebcdic: bool,

    /// Path to the tape image
    #[structopt(name = "tapefile", parse(from_os_str))]
    pub tape: PathBuf,
}

#[derive(Debug, StructOpt)]
pub struct CreateArgs {
    /// Largest number of data bytes per block
    #[structopt(short, long, default_value = "32760")]
    pub block_size: u16,

    /// Convert file contents from ASCII to EBCDIC
    #[structopt(long)]
    pub ebcdic: bool,

    /// Overwrite the tape image if it exists
    #[structopt(short, long)]
    pub force: bool,

    /// Path to the tape image
    #[structopt(name = "tapefile", parse(from_os_str))]
    pub tape: PathBuf,

    /// Files to store, each as one record followed by a tape mark
    #[structopt(name = "files", parse(from_os_str), required = true)]
    pub files: Vec<PathBuf>,
}

#[derive(Debug, StructOpt)]
pub struct ConvertArgs {
    /// Either `ascii-to-ebcdic` (`a2e`) or `ebcdic-to-ascii` (`e2a`)
    #[structopt(possible_values = Codepage::available_variants())]
    pub codepage: Codepage,

    #[structopt(parse(from_os_str))]
    pub input: PathBuf,

    #[structopt(parse(from_os_str))]
    pub output: PathBuf,
}
