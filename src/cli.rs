use std::path::PathBuf;

use clap::builder::{styling::AnsiColor, Styles};
use clap::Parser;

const ABOUT: &str = "Open-Meteo weather TUI";

const LONG_ABOUT: &str = "
TUI for viewing the weather forecast of a single location, sourced from Open-Meteo.

Shows current conditions (with an apparent \"feels like\" temperature), the next hours as a
scrollable carousel and the coming days. The location defaults to Carballo and can be changed in
the configuration file or with the flags below.

Keys: Left/Right scroll the hourly forecast, r refreshes, q quits.
";

const STYLES: Styles = Styles::styled()
    .header(AnsiColor::Yellow.on_default())
    .usage(AnsiColor::Green.on_default())
    .literal(AnsiColor::Green.on_default())
    .placeholder(AnsiColor::Green.on_default());

#[derive(Parser, Debug)]
#[command(version, styles=STYLES, about=ABOUT, long_about = LONG_ABOUT)]
pub struct Args {
    #[arg(long, help = "Configuration file (default: <config dir>/tiempo/config.toml)")]
    pub config: Option<PathBuf>,

    #[arg(long, help = "Location name shown in the headline")]
    pub name: Option<String>,

    #[arg(long, help = "Latitude in decimal degrees")]
    pub latitude: Option<f64>,

    #[arg(long, help = "Longitude in decimal degrees")]
    pub longitude: Option<f64>,

    #[arg(long, help = "Number of hours in the hourly forecast")]
    pub hours: Option<usize>,

    #[arg(long, help = "Number of days in the daily forecast")]
    pub days: Option<usize>,

    #[arg(long, help = "Print a text report once instead of starting the TUI")]
    pub plain: bool,

    #[arg(long, help = "Log file for the TUI (default: <cache dir>/tiempo/tiempo.log)")]
    pub log_file: Option<PathBuf>,
}
