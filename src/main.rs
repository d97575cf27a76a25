use clap::Parser;
use geneweave::moc::moc;
use geneweave::uniform::uniform;
use geneweave::Segment;
use std::process;
use tracing::{error, info};

mod reports;

#[derive(Parser, Debug)]
#[command(author, version, about, long_about = None)]
struct Cli {
    /// Seeds to replay, one demo run per seed
    #[arg(
        short,
        long,
        value_delimiter = ',',
        default_value = "4,8,15,16,23,42"
    )]
    seeds: Vec<u64>,

    /// Fraction of right-segment genes preserved from the donor parent
    #[arg(short, long, default_value_t = 0.4)]
    rate: f64,
}

fn main() {
    tracing_subscriber::fmt::init();
    let cli = Cli::parse();

    // Fixed demo parents: the left segment is free-form, the right segment
    // is two permutation subportions of four genes each.
    let p0_left: Segment = vec![1, 13, 18, 22, 12, 5, 7, 25];
    let p1_left: Segment = vec![3, 15, 16, 25, 11, 8, 10, 18];
    let p0_right: Segment = vec![1, 4, 2, 3, 8, 6, 5, 7];
    let p1_right: Segment = vec![3, 2, 1, 4, 6, 7, 8, 5];
    let subportion_starts = [0usize, 4];
    let split = p0_left.len();

    let parent_0: Segment = p0_left.iter().chain(p0_right.iter()).copied().collect();
    let parent_1: Segment = p1_left.iter().chain(p1_right.iter()).copied().collect();

    for (run, &seed) in cli.seeds.iter().enumerate() {
        info!("run {} (seed {})", run, seed);
        let mut rng = fastrand::Rng::with_seed(seed);

        let (left_0, left_1) = uniform(&p0_left, &p1_left, &mut rng).unwrap_or_else(|e| {
            error!("{}", e);
            process::exit(1);
        });

        let (right_0, right_1) = moc(&p0_right, &p1_right, cli.rate, &subportion_starts, &mut rng)
            .unwrap_or_else(|e| {
                error!("{}", e);
                process::exit(1);
            });

        let offspring_0: Segment = left_0.iter().chain(right_0.iter()).copied().collect();
        let offspring_1: Segment = left_1.iter().chain(right_1.iter()).copied().collect();

        reports::print_run(
            seed,
            split,
            [&parent_0, &parent_1],
            [&offspring_0, &offspring_1],
        );
    }
}
