use arrbench::bench::ConsoleSink;
use arrbench::config::BenchConfig;
use arrbench::io::all_formats;
use arrbench::models::Dataset;
use arrbench::sweep::run_sweep;
use arrbench::Result;

fn main() -> Result<()> {
    env_logger::init();

    let config = BenchConfig::default();
    log::info!(
        "Generating {} arrays of {}x{} f64",
        config.keys.len(),
        config.shape[0],
        config.shape[1]
    );
    let dataset = Dataset::generate(&config)?;
    let formats = all_formats(&config)?;

    let mut sink = ConsoleSink;
    run_sweep(&config, &dataset, &formats, &mut sink)?;
    Ok(())
}
