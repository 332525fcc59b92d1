#[macro_use]
extern crate serde_derive;
#[macro_use]
extern crate log;
extern crate docopt;
extern crate env_logger;
extern crate ordinal_difficulty;

use std::path::Path;
use ordinal_difficulty::analysis::AnalysisConfig;
use ordinal_difficulty::measures::MeasureKind;
use ordinal_difficulty::sampling::*;
use ordinal_difficulty::utils::{load_table, store_report, store_samples};
use docopt::Docopt;

const USAGE: &'static str = "
Draw weighted bootstrap samples of an ordinal dataset and analyse the
neighbourhoods of each sample.

The samples are stored into <results-dir>/samples.csv, and the results of
the i-th sample into <results-dir>/sample_<i>/.

Usage: bootstrap [options] [--] <metadata-file> <data-file> <results-dir>
       bootstrap (--help | --version)

Options:
    -w, --weights=<w>       Weights: ones, uniform, inv_class_count or
                            class_balance [default: ones].
    --size=<s>              Sample size: dataset or undersampling
                            [default: dataset].
    -n, --samples=<n>       Number of samples [default: 10].
    --seed=<seed>           PRNG seed.
    -k, --knn=<k>           Number of neighbours for k-NN [default: 5].
    -m, --measure=<m>       Distance measure: hvdm or rank_hvdm [default: hvdm].
    --no-analysis           Only draw the samples.
    -h, --help              Show help.
    --version               Show the version.
";

#[derive(Deserialize)]
struct Args {
    flag_weights: String,
    flag_size: String,
    flag_samples: usize,
    flag_seed: Option<u64>,
    flag_knn: usize,
    flag_measure: String,
    flag_no_analysis: bool,
    arg_metadata_file: String,
    arg_data_file: String,
    arg_results_dir: String,
}


fn main() {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info"))
        .init();

    // Parse args from command line.
    let args: Args = Docopt::new(USAGE)
                            .and_then(|d| d.version(Some(env!("CARGO_PKG_VERSION").to_string()))
                                           .deserialize())
                            .unwrap_or_else(|e| e.exit());

    let weights_mode = WeightsMode::from_name(&args.flag_weights)
                                   .expect("Invalid weights mode");
    let size_mode = SampleSizeMode::from_name(&args.flag_size)
                                   .expect("Invalid sample size mode");
    let mut config = AnalysisConfig::with_k(args.flag_knn)
                                    .expect("Invalid number of neighbours");
    config.measure = MeasureKind::from_name(&args.flag_measure)
                                .expect("Invalid distance measure");

    let table = load_table(&args.arg_metadata_file, &args.arg_data_file)
                          .expect("Failed to load data");

    // Draw samples.
    let seed = match args.flag_seed {
        Some(s) => Some([0, s]),
        None => None,
    };
    let mut sampler = Sampler::new_seeded(table.n_objects(), seed);
    weights_mode.apply(&mut sampler, &table)
                .expect("Failed to set the weights");
    let size = size_mode.size(&table);
    info!("Drawing {} samples of {} objects", args.flag_samples, size);
    let samples = sampler.weighted_random_samples(args.flag_samples, size)
                         .expect("Failed to draw samples");

    let results_dir = Path::new(&args.arg_results_dir);
    std::fs::create_dir_all(results_dir)
            .expect("Failed to create the results directory");
    store_samples(&samples, results_dir.join("samples.csv"))
                 .expect("Failed to store the samples");

    if args.flag_no_analysis {
        return;
    }

    let reports = analyze_samples(&table, &samples, &config)
                                 .expect("Failed to analyse the samples");
    for (i, report) in reports.iter().enumerate() {
        store_report(report, results_dir.join(format!("sample_{}", i + 1)))
                    .expect("Failed to store the results");
    }
    println!("Analysed {} samples", reports.len());
}
