use anyhow::Result;
use todo_list_cli::{config, App, CommandLineArgs, UreqTransport};
use tracing_subscriber::EnvFilter;

fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(config::DEFAULT_LOG_FILTER)),
        )
        .with_writer(std::io::stderr)
        .init();

    let args = CommandLineArgs::parse();
    let mut app = App::new(args.base_url(), UreqTransport::new());

    let stdin = std::io::stdin();
    let mut stdout = std::io::stdout();
    app.run(stdin.lock(), &mut stdout)?;
    Ok(())
}
