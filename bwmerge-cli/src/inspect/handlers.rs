use anyhow::{Context, Result};
use clap::ArgMatches;

use bwmerge_io::inspect_bigwig;

pub fn run_inspect(matches: &ArgMatches) -> Result<()> {
    let files = matches
        .get_many::<String>("files")
        .expect("At least one bigWig file is required.");

    for file in files {
        let info = inspect_bigwig(file).with_context(|| format!("Failed to inspect {}", file))?;

        println!("{}", info.path);
        println!("Max: {}", info.declared_max);
        println!("Chroms:");
        for (i, chrom) in info.chroms.iter().enumerate() {
            println!("\t{}:\t{}\t{}", i, chrom.name, chrom.length);
        }
        println!();
    }

    Ok(())
}
