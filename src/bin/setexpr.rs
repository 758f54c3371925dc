//! Command-line driver.
//!
//! Two modes:
//!
//! - **self-test** (default): draw a random target and family from `--seed`,
//!   run the selected strategies and print each one's Pareto front.
//! - **ground truth** (`--no-test`): draw a family and a reference
//!   expression, use its set as the target, run NSGA-II and report whether
//!   a perfect match was found.
//!
//! Run with: `cargo run --release --bin setexpr -- --k 3 --algo all`

use std::process::ExitCode;
use std::time::Duration;

use clap::{Parser, ValueEnum};
use log::error;

use u_setexpr::domain::Bitset;
use u_setexpr::error::Result;
use u_setexpr::exhaustive::{ExhaustiveConfig, ExhaustiveRunner};
use u_setexpr::ga::{NsgaConfig, NsgaRunner, PERFECT_JACCARD_TOLERANCE};
use u_setexpr::generator::{
    generate_family, generate_target, GeneratorConfig, GroundTruthConfig, GroundTruthInstance,
};
use u_setexpr::greedy::{GreedyConfig, GreedyRunner};
use u_setexpr::instance::Instance;
use u_setexpr::objective::{jaccard, Scored};
use u_setexpr::random::create_rng;

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
enum Algo {
    Exhaustiva,
    Greedy,
    Genetico,
    /// Greedy and genetic.
    Both,
    All,
}

impl Algo {
    fn exhaustive(self) -> bool {
        matches!(self, Algo::Exhaustiva | Algo::All)
    }

    fn greedy(self) -> bool {
        matches!(self, Algo::Greedy | Algo::Both | Algo::All)
    }

    fn genetic(self) -> bool {
        matches!(self, Algo::Genetico | Algo::Both | Algo::All)
    }
}

#[derive(Parser, Debug)]
#[command(name = "setexpr")]
#[command(about = "Search for compact set expressions approximating a target set")]
struct Args {
    /// Minimum target size
    #[arg(long = "G")]
    target_size_min: Option<usize>,

    /// Minimum number of base sets
    #[arg(long = "Fmin")]
    family_min: Option<usize>,

    /// Maximum number of base sets
    #[arg(long = "Fmax")]
    family_max: Option<usize>,

    /// Minimum base set size
    #[arg(long = "FsizeMin")]
    set_size_min: Option<usize>,

    /// Maximum base set size
    #[arg(long = "FsizeMax")]
    set_size_max: Option<usize>,

    /// Operation budget
    #[arg(long, default_value_t = 3)]
    k: usize,

    /// Seed of the instance
    #[arg(long, default_value_t = 1030)]
    seed: u64,

    /// Seed of the genetic search (random when omitted or 0)
    #[arg(long = "seed_expr")]
    seed_expr: Option<u64>,

    #[arg(long = "pop_size")]
    pop_size: Option<usize>,

    #[arg(long = "mutation_prob")]
    mutation_prob: Option<f64>,

    #[arg(long = "crossover_prob")]
    crossover_prob: Option<f64>,

    #[arg(long = "tournament_size")]
    tournament_size: Option<usize>,

    #[arg(long = "max_generations")]
    max_generations: Option<usize>,

    /// Genetic search time limit in seconds
    #[arg(long = "time_limit")]
    time_limit: Option<u64>,

    /// Strategies to run in self-test mode
    #[arg(long, value_enum, default_value_t = Algo::All)]
    algo: Algo,

    /// Ground-truth mode instead of self-test
    #[arg(long = "no-test")]
    no_test: bool,

    /// Collapse genetic front members that evaluate to the same set
    #[arg(long = "unique-sets")]
    unique_sets: bool,
}

impl Args {
    fn generator_config(&self) -> GeneratorConfig {
        let defaults = GeneratorConfig::default();
        GeneratorConfig::default()
            .with_target_size_min(self.target_size_min.unwrap_or(defaults.target_size_min))
            .with_family_range(
                self.family_min.unwrap_or(defaults.family_min),
                self.family_max.unwrap_or(defaults.family_max),
            )
            .with_set_size_range(
                self.set_size_min.unwrap_or(defaults.set_size_min),
                self.set_size_max.unwrap_or(defaults.set_size_max),
            )
    }

    fn nsga_config(&self) -> NsgaConfig {
        let mut config = NsgaConfig::default()
            .with_max_ops(self.k)
            .with_unique_sets(self.unique_sets);
        if let Some(n) = self.pop_size {
            config = config.with_population_size(n);
        }
        if let Some(p) = self.mutation_prob {
            config = config.with_mutation_rate(p);
        }
        if let Some(p) = self.crossover_prob {
            config = config.with_crossover_rate(p);
        }
        if let Some(t) = self.tournament_size {
            config = config.with_tournament_size(t);
        }
        if let Some(g) = self.max_generations {
            config = config.with_max_generations(g);
        }
        if let Some(secs) = self.time_limit {
            config = config.with_time_limit_ms(secs.saturating_mul(1000));
        }
        if let Some(seed) = self.seed_expr.filter(|&s| s != 0) {
            config = config.with_seed(seed);
        }
        config
    }
}

fn main() -> ExitCode {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();

    let args = Args::parse();
    let outcome = if args.no_test {
        run_ground_truth(&args)
    } else {
        run_self_test(&args)
    };

    match outcome {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            error!("{e}");
            ExitCode::FAILURE
        }
    }
}

fn run_self_test(args: &Args) -> Result<()> {
    let generator = args.generator_config();
    let target = generate_target(&generator, &mut create_rng(args.seed))?;
    let family = generate_family(&generator, &mut create_rng(args.seed))?;
    let instance =
        Instance::new(family, target).with_universe_size(generator.universe_size)?;

    println!("=== INSTANCE ===");
    println!("seed: {}", args.seed);
    println!("universe_size: {}", generator.universe_size);
    println!("target_size: {}", instance.target().len());
    println!("family_size: {}", instance.family().len());
    println!("k: {}", args.k);
    println!();

    if args.algo.exhaustive() {
        println!("=== EXHAUSTIVE ===");
        let config = ExhaustiveConfig::default().with_max_ops(args.k);
        let result = ExhaustiveRunner::run(&instance, &config)?;
        print_elapsed(result.elapsed);
        print_front(&result.front);
    }

    if args.algo.greedy() {
        println!("=== GREEDY ===");
        let result = GreedyRunner::run(&instance, &GreedyConfig::default().with_max_ops(args.k));
        print_elapsed(result.elapsed);
        print_front(&result.front);
    }

    if args.algo.genetic() {
        println!("=== GENETIC (NSGA-II) ===");
        let config = args.nsga_config();
        print_nsga_config(&config);
        let result = NsgaRunner::run(&instance, &config)?;
        println!("ga_seed: {}", result.seed);
        println!("generations: {}", result.generations);
        println!("stop_reason: {:?}", result.stop_reason);
        print_elapsed(result.elapsed);
        print_front(&result.front);
    }

    print_sets(instance.target(), instance.family());
    Ok(())
}

fn run_ground_truth(args: &Args) -> Result<()> {
    let config = GroundTruthConfig::default()
        .with_generator(args.generator_config())
        .with_max_ops(args.k)
        .with_seed(args.seed);
    let gt = GroundTruthInstance::generate(&config)?;

    println!("=== INSTANCE ===");
    println!("seed: {}", gt.seed);
    println!("universe_size: {}", gt.universe.len());
    println!("family_size: {}", gt.family.len());
    println!("k: {}", args.k);
    println!("reference_expression: {}", gt.reference);
    println!(
        "reference_jaccard: {:.6}",
        jaccard(gt.reference.set(), &gt.target)
    );
    println!("target: {}", gt.target);
    println!();

    let nsga = args.nsga_config();
    let result = NsgaRunner::run(&gt.instance(), &nsga)?;

    println!("=== GENETIC (NSGA-II) ===");
    print_nsga_config(&nsga);
    println!("ga_seed: {}", result.seed);
    println!("generations: {}", result.generations);
    print_elapsed(result.elapsed);
    print_front(&result.front);

    let hit = result
        .front
        .iter()
        .any(|ind| ind.jaccard() >= 1.0 - PERFECT_JACCARD_TOLERANCE);
    println!("HIT_OBJETIVE: {}", if hit { "yes" } else { "no" });
    Ok(())
}

fn print_nsga_config(config: &NsgaConfig) {
    println!(
        "population: {} | time_limit_s: {} | p_mut: {} | p_cross: {} | tournament: {} | max_generations: {}",
        config.population_size,
        config
            .time_limit_ms
            .map_or_else(|| "none".to_string(), |ms| (ms / 1000).to_string()),
        config.mutation_rate,
        config.crossover_rate,
        config.tournament_size,
        config.max_generations
    );
}

fn print_elapsed(elapsed: Duration) {
    println!("elapsed_ms: {}", elapsed.as_millis());
    println!();
}

fn print_front<T: Scored>(front: &[T]) {
    println!("pareto_front: {} solutions", front.len());
    for (i, s) in front.iter().enumerate() {
        println!(
            "{i:>4}  jaccard={:.6}  ops={}  |H|={}  {}",
            s.jaccard(),
            s.n_ops(),
            s.size_h(),
            s.expression()
        );
    }
    println!();
}

fn print_sets(target: &Bitset, family: &[Bitset]) {
    println!("=== SETS ===");
    println!("G: {target}");
    for (i, f) in family.iter().enumerate() {
        println!("F{i}: {f}");
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn parse(args: &[&str]) -> Args {
        Args::parse_from(std::iter::once("setexpr").chain(args.iter().copied()))
    }

    #[test]
    fn test_seed_expr_zero_means_random() {
        assert_eq!(parse(&[]).nsga_config().seed, None);
        assert_eq!(parse(&["--seed_expr", "0"]).nsga_config().seed, None);
        assert_eq!(parse(&["--seed_expr", "17"]).nsga_config().seed, Some(17));
    }

    #[test]
    fn test_ga_flags_reach_config() {
        let config = parse(&[
            "--k",
            "5",
            "--pop_size",
            "50",
            "--time_limit",
            "2",
            "--unique-sets",
        ])
        .nsga_config();
        assert_eq!(config.max_ops, 5);
        assert_eq!(config.population_size, 50);
        assert_eq!(config.time_limit_ms, Some(2000));
        assert!(config.unique_sets);
    }
}
