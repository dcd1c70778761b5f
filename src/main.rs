//! tocbar - attach the documentation sidebar to a page from the command line.

use anyhow::{Context, Result};
use clap::Parser;
use tocbar::{
    cli::{Cli, Commands},
    config::TocbarConfig,
    log, logger, nav, page,
    session::FileStore,
};

fn main() -> Result<()> {
    let cli = Cli::parse();
    logger::set_quiet(cli.quiet);

    let config = TocbarConfig::load(&cli)?;
    let tree = nav::load_tree(config.nav_source()?)?;
    let store = FileStore::open(&config.session.file)?;

    // Attachment consumed the scroll slot; save it even if the interaction failed.
    let output = run(&cli, &config, tree, &store);
    store
        .save()
        .with_context(|| format!("failed to save session to {}", store.path().display()))?;
    log!("session"; "saved {}", store.path().display());

    println!("{}", output?);
    Ok(())
}

/// Perform one page load and the requested interaction.
fn run(cli: &Cli, config: &TocbarConfig, tree: nav::NavTree, store: &FileStore) -> Result<String> {
    let mut sidebar = page::load(tree, config, cli.command.page(), store);

    match &cli.command {
        Commands::Render { format, .. } => page::render(&sidebar, *format),
        Commands::Resolve { .. } => page::resolve(&sidebar),
        Commands::Click { href, scroll, .. } => page::click(&mut sidebar, href, *scroll),
        Commands::Toggle { href, .. } => page::toggle(&mut sidebar, href),
    }
}
