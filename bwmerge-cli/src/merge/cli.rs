use clap::{Arg, ArgAction, Command, arg, value_parser};

use crate::consts::AUTHOR;

pub const MERGE_CMD: &str = "merge";

pub fn create_merge_cli() -> Command {
    Command::new(MERGE_CMD)
        .author(AUTHOR)
        .about("Merge two or more bigWig files into a weighted-average bigWig.")
        .arg_required_else_help(true)
        .arg(
            Arg::new("paths")
                .value_name("PATHS")
                .num_args(3..)
                .required(true)
                .help("Input bigWig files followed by the output bigWig path"),
        )
        .arg(arg!(-c --config <config> "A toml file with merge settings"))
        .arg(
            arg!(-z --zoom <zoom> "Number of zoom levels in the output")
                .value_parser(value_parser!(u32)),
        )
        .arg(
            arg!(-p --threads <threads> "Number of threads to merge and write with")
                .value_parser(value_parser!(usize)),
        )
        .arg(
            arg!(-w --window <window> "Positions fetched from each input at a time")
                .value_parser(value_parser!(u32)),
        )
        .arg(
            Arg::new("coalesce")
                .long("coalesce")
                .action(ArgAction::SetTrue)
                .help("Collapse contiguous positions with equal values into one interval"),
        )
        .arg(
            Arg::new("strict-lengths")
                .long("strict-lengths")
                .action(ArgAction::SetTrue)
                .help("Fail when inputs disagree on a chromosome length"),
        )
        .arg(
            Arg::new("uncompressed")
                .long("uncompressed")
                .action(ArgAction::SetTrue)
                .help("Write uncompressed data blocks"),
        )
        .arg(
            Arg::new("dry-run")
                .long("dry-run")
                .action(ArgAction::SetTrue)
                .help("Print the weights and chromosome plan without writing the output"),
        )
}
