use anyhow::Context;
use dmr_codeplug_gen::cli;
use env_logger::Env;
use log::info;

fn setup_logging(level: &str) {
    let env = Env::default().filter_or("RUST_LOG", match level {
        "essential" => "info",
        "debug" => "debug",
        "trace" => "trace",
        "warn" => "warn",
        "error" => "error",
        _ => "info",
    });
    env_logger::Builder::from_env(env).init();
}

fn main() -> anyhow::Result<()> {
    let args = cli::parse_cli();
    setup_logging(&args.log_level);
    info!(
        "Starting: {} state, {} city, {} country filter(s)",
        args.states.len(),
        args.cities.len(),
        args.countries.len()
    );

    dmr_codeplug_gen::run(args).context("codeplug generation failed")?;

    info!("Done.");
    Ok(())
}
