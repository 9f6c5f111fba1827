use clap::{Arg, Command};

use crate::consts::AUTHOR;

pub const INSPECT_CMD: &str = "inspect";

pub fn create_inspect_cli() -> Command {
    Command::new(INSPECT_CMD)
        .author(AUTHOR)
        .about("List the chromosomes and declared maximum of bigWig files.")
        .arg_required_else_help(true)
        .arg(
            Arg::new("files")
                .value_name("FILES")
                .num_args(1..)
                .required(true)
                .help("bigWig files to inspect"),
        )
}
