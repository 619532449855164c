mod cli;
mod color;
mod config;
mod data;
mod plot;

use anyhow::Result;

use cli::Args;
use config::RenderConfig;

fn main() -> Result<()> {
    env_logger::init();

    let args = Args::parse_from_env();
    if args.files.is_empty() {
        println!("{}", cli::usage(&cli::program_name(std::env::args_os())));
        return Ok(());
    }

    let config = RenderConfig::default();

    // Everything is loaded before the output file is touched.
    let datasets = data::loader::load_all(&args.files)?;
    let chart = plot::chart::build_chart(&config, datasets);
    plot::render::render(&chart, &config)?;

    Ok(())
}
