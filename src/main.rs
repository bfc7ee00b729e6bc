use captcha_ocr::cli::{Args, Command};
use captcha_ocr::config::Config;
use captcha_ocr::{engines, server, solver};
use clap::Parser;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let args = Args::parse();

    // Initialize tracing; logs go to stderr so `solve` output stays clean
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| args.log_level.clone().into()),
        )
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .init();

    let config = Config::from(&args);

    tracing::info!(
        "Starting captcha-ocr-server v{} (engine: {})",
        env!("CARGO_PKG_VERSION"),
        config.engine
    );

    let recognizer = tokio::task::spawn_blocking({
        let config = config.clone();
        move || engines::create(&config)
    })
    .await??;

    match args.command.unwrap_or(Command::Serve) {
        Command::Serve => {
            tracing::info!("Binding to {}:{}", config.host, config.port);
            server::run(config, recognizer).await
        }
        Command::Solve {
            image,
            mode,
            length,
        } => {
            let expected_length = (length > 0).then_some(length);
            let solution = tokio::task::spawn_blocking(move || {
                solver::solve_path(&image, recognizer.as_ref(), mode, expected_length)
            })
            .await??;
            println!("{}", solution.text);
            Ok(())
        }
    }
}
