use clap::Parser;
use photo_describe_lib::{run, Cli, Settings, API_KEY_ENV};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt()
        .with_writer(std::io::stderr)
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "info".into()),
        )
        .init();

    let cli = Cli::parse();
    let settings = Settings::resolve(cli, std::env::var(API_KEY_ENV).ok())?;

    let chat = llmapi::get_llm_chat(settings.llm_client());
    let summary = run(&settings, &chat).await?;

    println!(
        "Wrote {} records to {}",
        summary.records,
        summary.output_path.display()
    );
    Ok(())
}
