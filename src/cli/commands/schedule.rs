use crate::api::{FileApi, GlovdhClient, StationApi};
use crate::cli::parser::Commands;
use crate::config::Config;
use crate::core::schedule::run_schedule;
use crate::errors::AppResult;
use crate::export::charts::save_chart;
use crate::models::StatKind;
use crate::ui::messages::{detail, header, info, warning};
use crate::utils::date::DateRange;
use crate::utils::path::expand_tilde;
use std::path::PathBuf;

/// Handle the `schedule` subcommand
pub fn handle(cmd: &Commands, cfg: &Config) -> AppResult<()> {
    if let Commands::Schedule {
        station,
        start,
        stop,
        kind,
        out_dir,
        station_json,
        stats_json,
        api_url,
    } = cmd
    {
        let station = station.as_deref().unwrap_or(&cfg.default_station);
        let range = DateRange::parse(start, stop)?;

        let mut kinds: Vec<StatKind> = if kind.is_empty() {
            StatKind::ALL.to_vec()
        } else {
            kind.clone()
        };
        kinds.sort();
        kinds.dedup();

        let api: Box<dyn StationApi> = match station_json {
            Some(path) => {
                info(format!("Using saved API responses from {path}"));
                Box::new(FileApi::new(
                    Some(expand_tilde(path)),
                    stats_json.as_deref().map(expand_tilde),
                ))
            }
            None => {
                let url = api_url.as_deref().unwrap_or(&cfg.api_url);
                Box::new(GlovdhClient::new(url, cfg.api_timeout_secs)?)
            }
        };

        let dir: PathBuf = expand_tilde(out_dir.as_deref().unwrap_or(&cfg.output_dir));

        header(format!("Schedule statistics for {station}"));
        detail("Range", &range);

        let charts = run_schedule(api.as_ref(), station, &range, &kinds)?;
        if charts.is_empty() {
            warning("No charts produced.");
            return Ok(());
        }

        for chart in &charts {
            for line in chart.pie.legend_entries() {
                detail(chart.kind.title(), line);
            }
            save_chart(&dir, &chart.file_name, &chart.pie.render())?;
        }
    }

    Ok(())
}
