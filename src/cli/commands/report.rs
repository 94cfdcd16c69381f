use crate::cli::parser::Commands;
use crate::config::Config;
use crate::core::summary::{StationSummary, SummaryOptions};
use crate::db::pool::DbPool;
use crate::db::queries::{StationQuery, fetch_station_sessions};
use crate::errors::AppResult;
use crate::export::charts::save_summary_charts;
use crate::export::{
    DataFormat, ensure_writable, export_sessions_csv, export_sessions_json, write_report_html,
    write_report_pdf,
};
use crate::ui::messages::{detail, header, info};
use crate::utils::capitalize;
use crate::utils::date::DateRange;
use crate::utils::path::{expand_tilde, resolve_in};
use std::path::PathBuf;

/// Handle the `report` subcommand
pub fn handle(cmd: &Commands, cfg: &Config) -> AppResult<()> {
    if let Commands::Report {
        station,
        start,
        stop,
        out,
        format,
        search,
        reverse,
        save_charts,
        table,
        data,
        force,
    } = cmd
    {
        let station = capitalize(station);
        let range = DateRange::parse(start, stop)?;

        let mut query = StationQuery::new(&station, range);
        query.search = search.clone();
        query.reverse = *reverse;

        let pool = DbPool::open_existing(&cfg.database)?;
        let records = pool.with_conn(|conn| fetch_station_sessions(conn, &query))?;
        info(format!("{} sessions loaded for {station}", records.len()));

        let summary = StationSummary::build(&station, range, &records, &SummaryOptions::from(cfg))?;

        header(summary.title());
        for line in summary.summary_lines() {
            detail("*", line);
        }
        detail("Reported issues", summary.problems.len());

        let out_dir = expand_tilde(&cfg.output_dir);
        let base: PathBuf = match out {
            Some(o) => resolve_in(&out_dir, o),
            None => out_dir.join(format!("{}_report.pdf", station.to_lowercase())),
        };

        if format.wants_pdf() {
            let path = base.with_extension("pdf");
            ensure_writable(&path, *force)?;
            write_report_pdf(&summary, &path, *table)?;
        }

        if format.wants_html() {
            let path = base.with_extension("html");
            ensure_writable(&path, *force)?;
            write_report_html(&summary.to_bundle()?, &path)?;
        }

        if let Some(dir) = save_charts {
            save_summary_charts(&resolve_in(&out_dir, dir), &summary)?;
        }

        if let Some(file) = data {
            let path = resolve_in(&out_dir, file);
            ensure_writable(&path, *force)?;
            match DataFormat::from_path(&path) {
                DataFormat::Csv => export_sessions_csv(&records, &path)?,
                DataFormat::Json => export_sessions_json(&records, &path)?,
            }
        }
    }

    Ok(())
}
