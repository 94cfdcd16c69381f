use crate::cli::parser::{Cli, Commands};
use crate::config::Config;
use crate::errors::AppResult;
use crate::ui::messages::{detail, header, success};

/// Handle the `init` command: write the configuration directory and file.
///
/// The database itself is produced by the correlation pipeline; `init`
/// only records where to find it (`--db` overrides the default path).
pub fn handle(cli: &Cli) -> AppResult<()> {
    let force = matches!(cli.command, Commands::Init { force: true });

    let path = Config::init_all(cli.db.clone(), force)?;
    let cfg = Config::load()?;

    header("Initializing vlbisummary");
    detail("Config file", path.display());
    detail("Database", &cfg.database);
    detail("API", &cfg.api_url);

    success("vlbisummary initialization completed!");
    Ok(())
}
