use cheeper::app::App;
use cheeper::console::{run_command, run_menu};
use cheeper::logger::*;
use cheeper::settings::*;
use tokio::io::BufReader;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    let logger = Logger::new_bootstrap();

    let project_settings = parse_settings(cli.settings.as_deref())?;
    debug!(?project_settings);
    let logger_config = LogConfig {
        filter: project_settings.log.filter.clone(),
    };
    logger.reload_from_config(&logger_config)?;

    let app = App::try_new(&project_settings).await.inspect_err(|e| {
        error!("store unavailable: {e}");
    })?;
    let service = app.graph_service.as_ref();

    let mut stdout = std::io::stdout();
    match cli.command.unwrap_or(Command::Menu) {
        Command::Menu => run_menu(service, BufReader::new(tokio::io::stdin()), &mut stdout).await?,
        command => run_command(service, command, &mut stdout).await?,
    }

    Ok(())
}
