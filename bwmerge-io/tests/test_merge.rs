use std::path::{Path, PathBuf};

use pretty_assertions::assert_eq;
use rstest::*;

use bwmerge_core::{
    ChromosomeCatalog, MemoryTrack, MergeConfig, MergeError, MergeSession, MergedInterval,
    SignalTrack, TrackWriter,
};
use bwmerge_io::{BigWigTrack, BigWigWriter, inspect_bigwig, merge_bigwig_files, plan_merge};

const EPS: f32 = 1e-5;

/// Write a memory track as a bigWig, one width-1 interval per non-NaN value.
fn write_track(path: &Path, track: &mut MemoryTrack) {
    let catalog = ChromosomeCatalog::from_chrom_lists([track.chroms()]);
    let mut writer = BigWigWriter::new(path, &MergeConfig::default());
    writer.begin(&catalog).unwrap();

    for entry in catalog.iter() {
        let values = track.values(&entry.name, 0, entry.length).unwrap();
        let intervals: Vec<MergedInterval> = values
            .iter()
            .enumerate()
            .filter(|(_, v)| !v.is_nan())
            .map(|(p, v)| MergedInterval::at(p as u32, *v))
            .collect();
        writer.append(&entry.name, &intervals).unwrap();
    }

    writer.finish().unwrap();
}

struct Fixture {
    _tempdir: tempfile::TempDir,
    dir: PathBuf,
    inputs: Vec<PathBuf>,
}

impl Fixture {
    fn output(&self) -> PathBuf {
        self.dir.join("merged.bw")
    }
}

#[fixture]
fn merge_inputs() -> Fixture {
    let tempdir = tempfile::tempdir().unwrap();
    let dir = tempdir.path().to_path_buf();

    // declared maxima come from the data: 4.0 and 6.0
    let mut a = MemoryTrack::new(4.0)
        .with_chrom("chrX", vec![1.0, f32::NAN, 4.0])
        .with_chrom("chr1", vec![2.0, f32::NAN, 1.0, 1.0]);
    let mut b = MemoryTrack::new(6.0).with_chrom("chrX", vec![3.0, 6.0, f32::NAN]);

    let inputs = vec![dir.join("a.bw"), dir.join("b.bw")];
    write_track(&inputs[0], &mut a);
    write_track(&inputs[1], &mut b);

    Fixture {
        _tempdir: tempdir,
        dir,
        inputs,
    }
}

fn assert_values(found: &[f32], expected: &[f32]) {
    assert_eq!(found.len(), expected.len());
    for (f, e) in found.iter().zip(expected) {
        if e.is_nan() {
            assert!(f.is_nan(), "expected no data, found {}", f);
        } else {
            assert!((f - e).abs() < EPS, "{} != {}", f, e);
        }
    }
}

#[rstest]
fn test_inspect_reads_declared_max(merge_inputs: Fixture) {
    let info = inspect_bigwig(&merge_inputs.inputs[1]).unwrap();
    assert_eq!(info.declared_max, 6.0);
    assert_eq!(info.chroms.len(), 1);
    assert_eq!(info.chroms[0].name, "chrX");
    assert_eq!(info.chroms[0].length, 3);
}

#[rstest]
fn test_merge_bigwig_files(merge_inputs: Fixture) {
    let summary =
        merge_bigwig_files(&merge_inputs.inputs, merge_inputs.output(), MergeConfig::default()).unwrap();
    assert_eq!(summary.chromosomes, 2);

    let mut merged = BigWigTrack::open(merge_inputs.output()).unwrap();
    let names: Vec<&str> = merged.chroms().iter().map(|c| c.name.as_str()).collect();
    assert!(names.contains(&"chr1"));
    assert!(names.contains(&"chrX"));

    let chrx = merged.values("chrX", 0, 3).unwrap();
    assert_values(&chrx, &[2.2, 3.6, 1.6]);

    // chr1 is only in the first input
    let chr1 = merged.values("chr1", 0, 4).unwrap();
    assert_values(&chr1, &[0.8, f32::NAN, 0.4, 0.4]);
}

#[rstest]
#[case(false, 2)]
#[case(true, 1)]
fn test_merge_options_keep_values(merge_inputs: Fixture, #[case] coalesce_runs: bool, #[case] threads: usize) {
    let config = MergeConfig {
        coalesce_runs,
        threads,
        window_size: 2,
        ..MergeConfig::default()
    };
    merge_bigwig_files(&merge_inputs.inputs, merge_inputs.output(), config).unwrap();

    let mut merged = BigWigTrack::open(merge_inputs.output()).unwrap();
    assert_values(&merged.values("chr1", 0, 4).unwrap(), &[0.8, f32::NAN, 0.4, 0.4]);
}

#[rstest]
fn test_plan_writes_nothing(merge_inputs: Fixture) {
    let plan = plan_merge(&merge_inputs.inputs, MergeConfig::default()).unwrap();

    assert_eq!(plan.maxima, vec![4.0, 6.0]);
    assert!((plan.weights[0] - 0.4).abs() < 1e-9);
    assert_eq!(plan.catalog.len(), 2);
    assert!(!merge_inputs.output().exists());
}

#[rstest]
fn test_too_few_inputs_leaves_output_untouched(merge_inputs: Fixture) {
    let output = merge_inputs.output();
    std::fs::write(&output, b"keep me").unwrap();

    let result = merge_bigwig_files(&merge_inputs.inputs[..1], &output, MergeConfig::default());

    assert!(matches!(result, Err(MergeError::Configuration(_))));
    assert_eq!(std::fs::read(&output).unwrap(), b"keep me");
}

#[rstest]
fn test_missing_input_is_an_open_error(merge_inputs: Fixture) {
    let inputs = vec![merge_inputs.inputs[0].clone(), merge_inputs.dir.join("missing.bw")];
    let result = merge_bigwig_files(&inputs, merge_inputs.output(), MergeConfig::default());

    match result {
        Err(MergeError::Open { input, .. }) => assert_eq!(input, 1),
        other => panic!("expected an open error, got {:?}", other),
    }
    assert!(!merge_inputs.output().exists());
}

#[rstest]
fn test_each_input_path_is_opened(merge_inputs: Fixture) {
    // same file twice must weigh evenly, a different second file must not
    let same = vec![merge_inputs.inputs[0].clone(), merge_inputs.inputs[0].clone()];
    let plan = plan_merge(&same, MergeConfig::default()).unwrap();
    assert_eq!(plan.weights.as_slice(), &[0.5, 0.5]);

    let plan = plan_merge(&merge_inputs.inputs, MergeConfig::default()).unwrap();
    assert_eq!(plan.catalog.get("chrX").unwrap().num_inputs(), 2);
    assert_eq!(plan.catalog.get("chr1").unwrap().num_inputs(), 1);
}

#[rstest]
#[case(1)]
#[case(2)]
fn test_later_shorter_input_is_merged_up_to_its_own_end(#[case] threads: usize) {
    let tempdir = tempfile::tempdir().unwrap();
    let dir = tempdir.path();

    let mut a = MemoryTrack::new(4.0).with_chrom("chr1", vec![2.0, 2.0, 2.0, 4.0]);
    let mut b = MemoryTrack::new(6.0).with_chrom("chr1", vec![6.0, 6.0]);
    let inputs = vec![dir.join("a.bw"), dir.join("b.bw")];
    write_track(&inputs[0], &mut a);
    write_track(&inputs[1], &mut b);
    assert_eq!(inspect_bigwig(&inputs[1]).unwrap().chroms[0].length, 2);

    let output = dir.join("merged.bw");
    let config = MergeConfig {
        threads,
        window_size: 3,
        ..MergeConfig::default()
    };
    let summary = merge_bigwig_files(&inputs, &output, config).unwrap();
    assert_eq!(summary.intervals, 4);

    let mut merged = BigWigTrack::open(&output).unwrap();
    assert_eq!(merged.chroms()[0].length, 4);
    assert_values(&merged.values("chr1", 0, 4).unwrap(), &[4.4, 4.4, 0.8, 1.6]);
}

#[rstest]
fn test_chrom_without_data_is_left_out_of_the_output_index() {
    let tempdir = tempfile::tempdir().unwrap();
    let output = tempdir.path().join("merged.bw");

    let mut inputs = vec![
        MemoryTrack::new(2.0)
            .with_chrom("chr1", vec![2.0, 1.0])
            .with_chrom("chr2", vec![f32::NAN; 3]),
        MemoryTrack::new(2.0).with_chrom("chr2", vec![f32::NAN; 3]),
    ];
    let mut writer = BigWigWriter::new(&output, &MergeConfig::default());
    let summary = MergeSession::new(&mut inputs, MergeConfig::default())
        .and_then(|session| session.run(&mut writer))
        .unwrap();

    // the catalog holds chr2 but bigtools only indexes chromosomes that received intervals
    assert_eq!(summary.chromosomes, 2);
    assert_eq!(summary.skipped_positions, 3);

    let mut merged = BigWigTrack::open(&output).unwrap();
    let names: Vec<&str> = merged.chroms().iter().map(|c| c.name.as_str()).collect();
    assert_eq!(names, vec!["chr1"]);
    assert!(merged.values("chr2", 0, 3).is_err());
    assert_values(&merged.values("chr1", 0, 2).unwrap(), &[1.0, 0.5]);
}
