pub mod action;
pub mod app;
pub mod background;
pub mod cli;
pub mod components;
pub mod config;
pub mod constants;
pub mod page;
pub mod snow;
pub mod tui;
pub mod utils;

use clap::Parser;
use color_eyre::eyre::Result;

use crate::{
    app::App,
    cli::{Cli, Format},
    page::Page,
    utils::{initialize_logging, initialize_panic_handler},
};

fn print_page(format: Format) -> Result<()> {
    let page = Page::load(&mut rand::thread_rng());
    match format {
        Format::Json => println!("{}", serde_json::to_string_pretty(&page)?),
        Format::Html => print!("{}", page.to_html()),
    }
    Ok(())
}

async fn tokio_main() -> Result<()> {
    initialize_logging()?;

    initialize_panic_handler()?;

    let args = Cli::parse();
    if let Some(format) = args.print {
        return print_page(format);
    }

    let mut app = App::new(args.tick_rate, args.frame_rate, args.assets_dir)?;
    app.run().await?;

    Ok(())
}

#[tokio::main]
async fn main() -> Result<()> {
    if let Err(e) = tokio_main().await {
        eprintln!("{} error: Something went wrong", env!("CARGO_PKG_NAME"));
        Err(e)
    } else {
        Ok(())
    }
}
