use super::print::{
    line_width, render_choices, render_entry_list, render_full_entries, render_messages,
};
use super::setup::{Cli, Commands};
use super::shell::run_shell;
use clap::Parser;
use directories::ProjectDirs;
use dispensary::api::CatalogApi;
use dispensary::config::CatalogConfig;
use dispensary::error::{CatalogError, Result};
use dispensary::model::EntryId;
use dispensary::query::Query;
use dispensary::seed::SeedCatalog;
use dispensary::store::memory::InMemoryStore;
use std::path::{Path, PathBuf};
use tracing::debug;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

const CONFIG_DIR_ENV: &str = "DISPENSARY_CONFIG_DIR";

struct AppContext {
    api: CatalogApi<InMemoryStore>,
}

pub fn run() -> Result<()> {
    let cli = Cli::parse();
    init_logging(cli.verbose);

    let mut ctx = init_context(&cli)?;

    match cli.command {
        Some(Commands::List {
            search,
            tags,
            category,
        }) => handle_list(&ctx, search, tags, category),
        Some(Commands::Show { ids }) => handle_show(&ctx, &ids),
        Some(Commands::Tags) => handle_tags(&ctx),
        Some(Commands::Categories) => handle_categories(&ctx),
        Some(Commands::Shell) => handle_shell(&mut ctx),
        None => handle_list(&ctx, None, Vec::new(), None),
    }
}

fn init_logging(verbose: bool) {
    let filter = if verbose {
        EnvFilter::new("debug")
    } else {
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn"))
    };
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::fmt::layer()
                .with_target(false)
                .with_writer(std::io::stderr),
        )
        .with(filter)
        .init();
}

fn config_dir() -> Result<PathBuf> {
    if let Some(dir) = std::env::var_os(CONFIG_DIR_ENV) {
        return Ok(PathBuf::from(dir));
    }
    ProjectDirs::from("com", "dispensary", "dispensary")
        .map(|dirs| dirs.config_dir().to_path_buf())
        .ok_or_else(|| CatalogError::Config("could not determine config dir".to_string()))
}

fn resolve_seed(
    cli_seed: Option<&Path>,
    config: &CatalogConfig,
    config_dir: &Path,
) -> Option<PathBuf> {
    if let Some(path) = cli_seed {
        return Some(path.to_path_buf());
    }
    config.seed_file.as_ref().map(|path| {
        if path.is_relative() {
            config_dir.join(path)
        } else {
            path.clone()
        }
    })
}

fn init_context(cli: &Cli) -> Result<AppContext> {
    let config_dir = config_dir()?;
    let config = CatalogConfig::load(&config_dir)?;

    let seed = match resolve_seed(cli.seed.as_deref(), &config, &config_dir) {
        Some(path) => SeedCatalog::load(&path)?,
        None => SeedCatalog::builtin(),
    };
    debug!(
        config_dir = %config_dir.display(),
        entries = seed.entries.len(),
        "context initialized"
    );

    let defaults = config.form_defaults();
    Ok(AppContext {
        api: CatalogApi::new(seed.into_store(&defaults), defaults),
    })
}

fn handle_list(
    ctx: &AppContext,
    search: Option<String>,
    tags: Vec<String>,
    category: Option<String>,
) -> Result<()> {
    let query = Query {
        search_term: search.unwrap_or_default(),
        selected_tags: tags,
        selected_category: category,
    };
    let result = ctx.api.filter(&query);
    print!("{}", render_entry_list(&result.listed_entries, line_width()));
    print!("{}", render_messages(&result.messages));
    Ok(())
}

fn handle_show(ctx: &AppContext, ids: &[EntryId]) -> Result<()> {
    let result = ctx.api.get_entries(ids)?;
    print!("{}", render_full_entries(&result.listed_entries));
    Ok(())
}

fn handle_tags(ctx: &AppContext) -> Result<()> {
    let result = ctx.api.tags();
    for tag in &result.tags {
        println!("{}", tag);
    }
    Ok(())
}

fn handle_categories(ctx: &AppContext) -> Result<()> {
    let result = ctx.api.list_categories();
    print!("{}", render_choices(&result.categories, &[]));
    Ok(())
}

fn handle_shell(ctx: &mut AppContext) -> Result<()> {
    let stdin = std::io::stdin();
    let mut stdout = std::io::stdout();
    run_shell(&mut ctx.api, stdin.lock(), &mut stdout, line_width())?;
    Ok(())
}
