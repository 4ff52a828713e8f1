use std::path::PathBuf;

use clap::Parser;

#[derive(Parser)]
#[command(
    name = "nest",
    about = concat!("nest v", env!("CARGO_PKG_VERSION"), " - your tasks, nested"),
    version
)]
struct Cli {
    /// Keep tasks.json and prefs.toml in a different directory
    #[arg(short = 'C', long = "data-dir")]
    data_dir: Option<PathBuf>,
}

fn main() {
    let cli = Cli::parse();

    if let Err(e) = nest::tui::run(cli.data_dir.as_deref()) {
        eprintln!("error: {}", e);
        std::process::exit(1);
    }
}
