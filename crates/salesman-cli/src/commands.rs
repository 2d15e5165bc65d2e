use anyhow::Context;
use log::{info, warn};
use salesman_brute_force::{factorial, solve_with};
use salesman_core::Dataset;

use crate::cli::{Command, InspectArgs, MakesetArgs};
use crate::generate::{clock_seed, PointSampler};

pub fn run(command: Command) -> anyhow::Result<()> {
    match command {
        Command::Makeset(args) => makeset(&args).map(|_| ()),
        Command::Inspect(args) => inspect(&args),
    }
}

/// Samples the points, solves them exactly and writes the dataset.
pub fn makeset(args: &MakesetArgs) -> anyhow::Result<Dataset> {
    let seed = args.seed.unwrap_or_else(clock_seed);
    let n = args.count as usize;
    info!(
        "makeset: {} ({} x {}, {n} points, seed {seed})",
        args.name.display(),
        args.width,
        args.height
    );

    let points = PointSampler::new(args.width, args.height, seed)?.sample_n(n);
    let options = args.search_options();
    info!(
        "making brute force solution ({n} points, {} permutations, {} threads)",
        factorial(n).unwrap_or(u64::MAX),
        options.threads
    );

    let mut decile = 0;
    let solution = solve_with(&points, &options, |progress| {
        if progress.percent / 10 > decile {
            decile = progress.percent / 10;
            info!("[{}%]", progress.percent);
        }
    })?;

    if !solution.exhaustive {
        warn!(
            "search stopped after {} of {} permutations; stored tour is the best seen, not proven optimal",
            solution.steps_evaluated, solution.total_steps
        );
    }
    info!(
        "best distance = {:.6} ({:?} metric)",
        solution.length, options.metric
    );

    let dataset = Dataset::new(points, solution.order)?;
    dataset
        .save(&args.name)
        .with_context(|| format!("failed to write dataset {}", args.name.display()))?;
    info!("wrote {}", args.name.display());
    Ok(dataset)
}

pub fn inspect(args: &InspectArgs) -> anyhow::Result<()> {
    let dataset = Dataset::load(&args.path)
        .with_context(|| format!("failed to read dataset {}", args.path.display()))?;

    if args.json {
        println!("{}", serde_json::to_string_pretty(&dataset.summary(args.metric))?);
        return Ok(());
    }

    let header = dataset.header()?;
    let summary = dataset.summary(args.metric);
    println!("magic            {}", String::from_utf8_lossy(&header.magic));
    println!("version          {}", header.version);
    println!("points           {}", header.point_count);
    println!("point offset     {}", header.point_offset);
    println!("solution offset  {}", header.solution_offset);
    println!("tour length      {:.6} ({:?})", summary.tour_length, args.metric);
    let order: Vec<String> = dataset.solution().iter().map(u32::to_string).collect();
    println!("solution         {}", order.join(" "));
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use salesman_brute_force::solve;
    use salesman_core::TourMetric;
    use std::path::Path;

    fn args(path: &Path, count: u32, seed: u64) -> MakesetArgs {
        MakesetArgs {
            name: path.to_path_buf(),
            width: 200.0,
            height: 100.0,
            count,
            seed: Some(seed),
            threads: 1,
            time_limit: None,
            metric: TourMetric::Closed,
        }
    }

    #[test]
    fn makeset_writes_an_optimal_dataset() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("six.tss");
        let written = makeset(&args(&path, 6, 5)).unwrap();

        let loaded = Dataset::load(&path).unwrap();
        assert_eq!(loaded, written);
        assert_eq!(loaded.points().len(), 6);

        let optimum = solve(loaded.points()).unwrap();
        let stored = TourMetric::Closed.length(loaded.points(), loaded.solution());
        assert_eq!(stored, optimum.length);
    }

    #[test]
    fn makeset_is_reproducible_from_its_seed() {
        let dir = tempfile::tempdir().unwrap();
        let first = dir.path().join("a.tss");
        let second = dir.path().join("b.tss");
        makeset(&args(&first, 5, 99)).unwrap();
        let mut threaded = args(&second, 5, 99);
        threaded.threads = 3;
        makeset(&threaded).unwrap();
        assert_eq!(
            std::fs::read(&first).unwrap(),
            std::fs::read(&second).unwrap()
        );
    }

    #[test]
    fn makeset_reports_unwritable_destinations() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("missing/dir/set.tss");
        let err = makeset(&args(&path, 3, 1)).unwrap_err();
        assert!(err.to_string().contains("failed to write dataset"));
    }

    #[test]
    fn inspect_reads_back_a_written_dataset() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("four.tss");
        makeset(&args(&path, 4, 2)).unwrap();
        for json in [false, true] {
            let inspect_args = InspectArgs {
                path: path.clone(),
                json,
                metric: TourMetric::Closed,
            };
            inspect(&inspect_args).unwrap();
        }
    }

    #[test]
    fn inspect_rejects_foreign_files() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("notes.txt");
        std::fs::write(&path, b"definitely not a dataset file").unwrap();
        let inspect_args = InspectArgs {
            path,
            json: false,
            metric: TourMetric::Closed,
        };
        assert!(inspect(&inspect_args).is_err());
    }
}
