use clap::{Parser, Subcommand};
use eyre::WrapErr;
use std::path::{Path, PathBuf};
use std::process::ExitCode;
use tracing::info;
use tracing_subscriber::EnvFilter;
use trail_pattern::Uri;
use trail_routing::RouteTable;

/// Inspect route definition files.
#[derive(Parser)]
#[clap(name = "trail", version)]
struct Cli {
    #[clap(subcommand)]
    command: Command,
}

#[derive(Subcommand)]
enum Command {
    /// Compile every route and print its expression
    Check { routes: PathBuf },
    /// Print the first route matching a uri
    Match { routes: PathBuf, uri: String },
    /// Build a uri for a named route
    Build {
        routes: PathBuf,
        name: String,
        /// `key=value` pairs, unknown keys end up in the query string
        #[clap(parse(try_from_str = parse_pair))]
        values: Vec<(String, String)>,
    },
}

fn main() -> eyre::Result<ExitCode> {
    color_eyre::install()?;
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn")),
        )
        .with_writer(std::io::stderr)
        .init();

    match Cli::parse().command {
        Command::Check { routes } => {
            let table = load(&routes)?;
            for named in table.iter() {
                let route = named.route();
                let mode = if route.match_host() { "host" } else { "path" };
                println!("{} ({})", named.name(), mode);
                if !route.prefix().is_empty() && !route.match_host() {
                    println!("  prefix   {}", route.prefix());
                }
                println!("  pattern  {}", route.pattern());
                println!("  template {}", route.generation_template());
            }
            info!(routes = table.len(), "all routes compiled");
        }
        Command::Match { routes, uri } => {
            let table = load(&routes)?;
            let uri = Uri::parse(&uri).wrap_err_with(|| format!("invalid uri {:?}", uri))?;

            let found = match table.resolve(&uri) {
                Some(found) => found,
                None => {
                    eprintln!("no route matches {}", uri);
                    return Ok(ExitCode::from(1));
                }
            };

            println!("{}", found.name);
            let mut params: Vec<_> = found.params.iter().collect();
            params.sort_unstable_by_key(|(name, _)| *name);
            for (name, value) in params {
                println!("  {} = {}", name, value.unwrap_or("~"));
            }
        }
        Command::Build {
            routes,
            name,
            values,
        } => {
            let table = load(&routes)?;
            let uri = table.url_for(&name, values)?;
            println!("{}", uri);
        }
    }

    Ok(ExitCode::SUCCESS)
}

fn load(path: &Path) -> eyre::Result<RouteTable> {
    let definitions = trail_config::load_routes(path)?;
    let table = trail_config::into_table(definitions, None)
        .wrap_err_with(|| format!("in {}", path.display()))?;
    Ok(table)
}

fn parse_pair(s: &str) -> Result<(String, String), String> {
    s.split_once('=')
        .map(|(k, v)| (k.to_string(), v.to_string()))
        .ok_or_else(|| format!("expected key=value, got {:?}", s))
}
