use tracing::{info, warn};
use tracing_subscriber::EnvFilter;
use twelvecoins::{util, Solution};

fn main() -> twelvecoins::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .with_target(false)
        .with_writer(std::io::stderr)
        .init();

    let solution = util::reference_solution().verify();
    println!("{}", solution.to_record());
    if !solution.is_valid() {
        warn!(failures = solution.failures().len(), "reference solution is ambiguous");
        return Ok(());
    }

    let failures = util::test_all(solution.zero_coin(), |oracle| solution.decide(oracle));
    info!(failures = failures.len(), "checked every counterfeit");

    let numbered = solution.numbered()?;
    println!("{}", numbered.to_record());
    let number = solution.encode()?;
    info!(number, "numbered");

    let decoded = Solution::decode_with(number, solution.zero_coin())?;
    let restored = decoded.restore()?.verify();
    println!("{}", restored.to_record());
    info!(round_trip = restored.encode()? == number, "decoded");

    println!("{}", solution.relabel()?.to_record());
    Ok(())
}
