#[macro_use]
extern crate serde_derive;
#[macro_use]
extern crate log;
extern crate docopt;
extern crate env_logger;
extern crate ordinal_difficulty;

use ordinal_difficulty::analysis::*;
use ordinal_difficulty::labeling::DifficultyLabel;
use ordinal_difficulty::measures::MeasureKind;
use ordinal_difficulty::utils::{load_table, store_report};
use docopt::Docopt;

const USAGE: &'static str = "
Label the minority examples of an ordinal dataset by neighbourhood analysis.

One CSV file of labels is written into <results-dir> for each comparison
family (union_vs_union, class_vs_union) and analysis (knn, kernel,
knn_monotonic, kernel_monotonic).

Usage: neighbourhood [options] [--] <metadata-file> <data-file> <results-dir>
       neighbourhood (--help | --version)

Options:
    -k, --knn=<k>           Number of neighbours for k-NN [default: 5].
    -m, --measure=<m>       Distance measure: hvdm or rank_hvdm [default: hvdm].
    --rare-check            Relabel rare examples supported by safe or
                            borderline neighbours as borderline (k-NN only).
    -h, --help              Show help.
    --version               Show the version.
";

#[derive(Deserialize)]
struct Args {
    flag_knn: usize,
    flag_measure: String,
    flag_rare_check: bool,
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

    let mut config = AnalysisConfig::with_k(args.flag_knn)
                                    .expect("Invalid number of neighbours");
    config.measure = MeasureKind::from_name(&args.flag_measure)
                                .expect("Invalid distance measure");
    config.rare_check = args.flag_rare_check;

    let table = load_table(&args.arg_metadata_file, &args.arg_data_file)
                          .expect("Failed to load data");
    info!("Loaded {} objects with {} attributes", table.n_objects(), table.n_attributes());

    let report = analyze_table(&table, &config)
                              .expect("Failed to analyse the dataset");

    store_report(&report, &args.arg_results_dir)
                .expect("Failed to store the results");

    for (name, result) in report.iter() {
        let shares = DifficultyLabel::all()
                                     .iter()
                                     .map(|&l| format!("{} {:.2}", l,
                                                       label_share(result, l).unwrap_or(0.)))
                                     .collect::<Vec<_>>();
        println!("{}: {}", name, shares.join(", "));
    }
}
