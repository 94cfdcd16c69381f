use crate::cli::parser::Commands;
use crate::config::Config;
use crate::db::pool::DbPool;
use crate::db::stats;
use crate::errors::AppResult;
use crate::ui::messages::info;

pub fn handle(cmd: &Commands, cfg: &Config) -> AppResult<()> {
    if let Commands::Db { info: show_info } = cmd {
        if !*show_info {
            info("Nothing to do: use --info.");
            return Ok(());
        }

        let pool = DbPool::open_existing(&cfg.database)?;
        stats::print_db_info(&pool, &cfg.database)?;
    }

    Ok(())
}
