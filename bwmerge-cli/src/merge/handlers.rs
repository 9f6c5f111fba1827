use std::path::Path;

use anyhow::{Context, Result};
use clap::ArgMatches;
use log::info;

use bwmerge_core::MergeConfig;
use bwmerge_io::{MergePlan, merge_bigwig_files, plan_merge};

/// Build the merge config from the optional config file and the command line flags.
fn get_merge_config(matches: &ArgMatches, progress: bool) -> Result<MergeConfig> {
    let mut config = match matches.get_one::<String>("config") {
        Some(path) => MergeConfig::try_from(Path::new(path))?,
        None => MergeConfig::default(),
    };

    if let Some(zoom) = matches.get_one::<u32>("zoom") {
        config.zoom_levels = *zoom;
    }
    if let Some(threads) = matches.get_one::<usize>("threads") {
        config.threads = *threads;
    }
    if let Some(window) = matches.get_one::<u32>("window") {
        config.window_size = *window;
    }
    if matches.get_flag("coalesce") {
        config.coalesce_runs = true;
    }
    if matches.get_flag("strict-lengths") {
        config.strict_lengths = true;
    }
    if matches.get_flag("uncompressed") {
        config.compress = false;
    }
    config.progress = progress;

    config.validate()?;
    Ok(config)
}

pub fn run_merge(matches: &ArgMatches, progress: bool) -> Result<()> {
    let paths: Vec<&String> = matches
        .get_many::<String>("paths")
        .expect("Input and output paths are required.")
        .collect();

    let (output, inputs) = paths
        .split_last()
        .expect("clap guarantees at least three paths");

    let config = get_merge_config(matches, progress)?;

    if matches.get_flag("dry-run") {
        let plan = plan_merge(inputs, config).context("Failed to plan merge")?;
        print_plan(&plan);
        return Ok(());
    }

    let summary = merge_bigwig_files(inputs, output, config)
        .with_context(|| format!("Failed to merge into {}", output))?;

    info!(
        "Merged {} inputs into {} ({} chromosomes, {} intervals)",
        inputs.len(),
        output,
        summary.chromosomes,
        summary.intervals
    );

    Ok(())
}

fn print_plan(plan: &MergePlan) {
    let maxima: Vec<String> = plan.maxima.iter().map(|m| format!("{:.6}", m)).collect();
    let factors: Vec<String> = plan
        .weights
        .as_slice()
        .iter()
        .map(|w| format!("{:.6}", w))
        .collect();

    println!("Maximums: {}", maxima.join(", "));
    println!("TotalMaximum: {:.6}", plan.maxima.iter().sum::<f64>());
    println!("Factors: {}", factors.join(", "));
    println!();

    for entry in plan.catalog.iter() {
        let present: Vec<String> = (0..plan.catalog.num_inputs())
            .map(|i| format!("file{}={}", i + 1, entry.contains(i)))
            .collect();
        println!("{}\tlength={}\t{}", entry.name, entry.length, present.join(" "));
    }

    for conflict in plan.catalog.conflicts() {
        println!(
            "warning: {} is {} long in file{} but {} long in file{}",
            conflict.chrom,
            conflict.recorded,
            conflict.first_input + 1,
            conflict.reported,
            conflict.input + 1
        );
    }
}
