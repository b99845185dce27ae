// © 2023-2024 ETH Zurich
//
// This program is free software: you can redistribute it and/or modify
// it under the terms of the GNU General Public License as published by
// the Free Software Foundation, either version 3 of the License, or
// any later version.
// This program is distributed in the hope that it will be useful,
// but WITHOUT ANY WARRANTY; without even the implied warranty of
// MERCHANTABILITY or FITNESS FOR A PARTICULAR PURPOSE. See the
// GNU General Public License for more details.
// You should have received a copy of the GNU General Public License
// along with this program. If not, see <https://www.gnu.org/licenses/>.

use std::fs::{self, File};
use std::path::PathBuf;
use std::time as stdtime;

use anyhow::{anyhow, Context};
use chrono::Datelike;
use clap::Parser;
use model::config::Config;
use model::json_serialisation::SummaryInstance;
use tracing::info;

/// Summarizes the shifts actually worked from a hub report of driven routes and writes them to
/// `<output-dir>/summary_<report>.json`.
#[derive(Parser)]
#[command(author, version, about)]
struct Args {
    /// Tab-separated report: month name, day, ..., courier, departure, arrival.
    report: PathBuf,

    /// Stored configuration; its `summaryShift` buffers are used.
    #[clap(long)]
    config: Option<PathBuf>,

    /// Year of the report dates, the current one if missing.
    #[clap(long)]
    year: Option<i32>,

    #[clap(long, default_value = "output")]
    output_dir: PathBuf,
}

fn main() -> anyhow::Result<()> {
    server::init_logging();
    let args = Args::parse();
    let start_time = stdtime::Instant::now();

    info!("---------- SUMMARY: {} ----------", args.report.display());
    let config = match &args.config {
        Some(path) => Config::from_json_file(path)
            .with_context(|| format!("could not read {}", path.display()))?,
        None => Config::default(),
    };
    config.validate()?;
    let report = fs::read_to_string(&args.report)
        .with_context(|| format!("could not read {}", args.report.display()))?;
    let year = args.year.unwrap_or_else(|| chrono::Local::now().year());

    let instance = SummaryInstance::new(config, &report, year);
    let output = server::summarize_loaded_report(&instance, start_time);

    let file_name = args
        .report
        .file_stem()
        .and_then(|name| name.to_str())
        .ok_or_else(|| anyhow!("invalid report file name {}", args.report.display()))?;
    fs::create_dir_all(&args.output_dir)?;
    let output_path = args.output_dir.join(format!("summary_{}.json", file_name));
    let file = File::create(&output_path)
        .with_context(|| format!("could not create {}", output_path.display()))?;
    serde_json::to_writer_pretty(file, &output)?;
    info!("Output written to {}", output_path.display());
    Ok(())
}
