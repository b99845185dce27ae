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
use std::path::{Path, PathBuf};
use std::time as stdtime;

use anyhow::{anyhow, Context};
use clap::Parser;
use model::base_types::HubId;
use tracing::info;

/// Plans the shifts of one day and writes the result to `<output-dir>/output_<input>.json`.
#[derive(Parser)]
#[command(author, version, about)]
struct Args {
    /// Json input with configuration, routes and rosters.
    input: PathBuf,

    #[clap(long, default_value = "output")]
    output_dir: PathBuf,

    /// Tab-separated route table, replaces the routes of the json input.
    #[clap(long)]
    routes: Option<PathBuf>,

    /// Tab-separated roster of a hub (name, weekly hours), given as HUB=PATH.
    #[clap(long = "roster", value_parser = parse_roster_arg)]
    rosters: Vec<(HubId, PathBuf)>,
}

fn parse_roster_arg(arg: &str) -> Result<(HubId, PathBuf), String> {
    match arg.split_once('=') {
        Some((hub, path)) if !hub.is_empty() && !path.is_empty() => {
            Ok((HubId::from(hub), PathBuf::from(path)))
        }
        _ => Err(format!("expected HUB=PATH, got '{}'", arg)),
    }
}

fn main() -> anyhow::Result<()> {
    server::init_logging();
    let args = Args::parse();
    let start_time = stdtime::Instant::now();

    info!("---------- RUN: {} ----------", args.input.display());
    let input_data: serde_json::Value = serde_json::from_str(
        &fs::read_to_string(&args.input)
            .with_context(|| format!("could not read {}", args.input.display()))?,
    )?;
    let routes_table = args
        .routes
        .as_ref()
        .map(|path| {
            fs::read_to_string(path).with_context(|| format!("could not read {}", path.display()))
        })
        .transpose()?;
    let roster_tables = args
        .rosters
        .iter()
        .map(|(hub, path)| {
            fs::read_to_string(path)
                .map(|table| (hub.clone(), table))
                .with_context(|| format!("could not read {}", path.display()))
        })
        .collect::<anyhow::Result<Vec<_>>>()?;

    let instance = internal::load_instance(input_data, routes_table.as_deref(), &roster_tables)?;
    let output = server::solve_loaded_instance(&instance, start_time);

    let output_path = ensure_output_path(&args.input, &args.output_dir)?;
    let file = File::create(&output_path)
        .with_context(|| format!("could not create {}", output_path.display()))?;
    serde_json::to_writer_pretty(file, &output)?;
    info!("Output written to {}", output_path.display());
    Ok(())
}

fn ensure_output_path(input_path: &Path, output_dir: &Path) -> anyhow::Result<PathBuf> {
    let file_name = input_path
        .file_name()
        .and_then(|name| name.to_str())
        .ok_or_else(|| anyhow!("invalid input file name {}", input_path.display()))?;
    fs::create_dir_all(output_dir)?;
    Ok(output_dir.join(format!("output_{}", file_name)))
}
