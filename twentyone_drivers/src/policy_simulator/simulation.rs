use std::num::NonZeroUsize;
use std::thread;

use twentyone::simulation::Simulation;
use twentyone::statistics::SimulationResult;
use twentyone::strategy::{self, Strategy};
use twentyone::{PolicyChoice, SimulationError};
use twentyone_drivers::Config;

/// Runs every configured policy through the same batch schedule and prints
/// one summary per policy.
pub fn simulate_all_policies(config: &Config) -> Result<(), String> {
    let policies = config
        .policy_simulator
        .parsed_policies()
        .map_err(|e| e.to_string())?;

    for policy in policies {
        log::info!("simulating policy {}", policy);
        let result = simulate_policy(config, policy).map_err(|e| e.to_string())?;
        print_summary(policy, &result).map_err(|e| e.to_string())?;
    }

    Ok(())
}

fn simulate_policy(
    config: &Config,
    policy: PolicyChoice,
) -> Result<SimulationResult, SimulationError> {
    match policy {
        PolicyChoice::AlwaysStand => run_threaded(config, || strategy::always_stand),
        PolicyChoice::AlwaysHit => run_threaded(config, || strategy::always_hit),
        PolicyChoice::AlwaysDoubleDown => run_threaded(config, || strategy::always_double_down),
        PolicyChoice::HitUnderSeventeen => run_threaded(config, || strategy::hit_under_seventeen),
        PolicyChoice::DoubleDownOnEleven => run_threaded(config, || strategy::double_down_on_eleven),
        PolicyChoice::SplitWhenPossible => run_threaded(config, || strategy::split_when_possible),
        PolicyChoice::Random => run_threaded(config, strategy::random_policy),
        PolicyChoice::Basic => run_threaded(config, || strategy::basic),
    }
}

/// Splits the batch schedule across worker threads, each playing its share
/// with its own strategy instance, and merges the partial distributions.
/// When a seed is configured every worker derives its own seed from it, so
/// reruns reproduce the merged result exactly.
fn run_threaded<S, F>(config: &Config, make_strategy: F) -> Result<SimulationResult, SimulationError>
where
    S: Strategy + Send + 'static,
    F: Fn() -> S + Send + Clone + 'static,
{
    let number_of_threads = effective_thread_count(config.policy_simulator.number_of_threads);
    let number_of_decks = config.table.number_of_decks;
    let stake = config.table.stake;
    let number_of_batches = config.policy_simulator.number_of_batches;
    let rounds_per_batch = config.policy_simulator.rounds_per_batch;
    let seed = config.policy_simulator.seed;

    let mut workers = Vec::new();
    for worker_index in 0..number_of_threads as u64 {
        let batches =
            batches_for_worker(number_of_batches, number_of_threads as u64, worker_index);
        if batches == 0 {
            continue;
        }
        let make_strategy = make_strategy.clone();
        workers.push(thread::spawn(move || {
            let strategy = make_strategy();
            let mut simulation = match seed {
                Some(seed) => Simulation::with_seed(
                    strategy,
                    number_of_decks,
                    stake,
                    seed.wrapping_add(worker_index),
                ),
                None => Simulation::new(strategy, number_of_decks, stake),
            };
            simulation.play_batches(batches, rounds_per_batch)
        }));
    }

    let mut merged = SimulationResult::new();
    for worker in workers {
        merged += worker.join().expect("simulation worker panicked")?;
    }
    Ok(merged)
}

fn effective_thread_count(configured: usize) -> usize {
    if configured > 0 {
        configured
    } else {
        thread::available_parallelism()
            .map(NonZeroUsize::get)
            .unwrap_or(1)
    }
}

/// Deals `total` batches out to `workers` workers as evenly as possible,
/// earlier workers taking the remainder.
fn batches_for_worker(total: u64, workers: u64, worker_index: u64) -> u64 {
    let base = total / workers;
    if worker_index < total % workers {
        base + 1
    } else {
        base
    }
}

fn print_summary(policy: PolicyChoice, result: &SimulationResult) -> Result<(), SimulationError> {
    let (low, high) = result.confidence_interval_95()?;
    println!("{}", policy);
    println!("Sample Mean: {}", result.expected_winnings()?);
    println!("Sample Variance: {}", result.sample_variance()?);
    println!("Sample Standard Deviation: {}", result.sample_std_deviation()?);
    println!("95% Confidence Interval: ({}, {})", low, high);
    println!(
        "% of Games Profitable (winnings >= 0): {}",
        result.profitable_fraction()?
    );
    match result.range() {
        Some((min, max)) => println!("Range of Winnings: ({}, {})", min, max),
        None => println!("Range of Winnings: none"),
    }
    println!();
    Ok(())
}
