//! `RouteCloak` CLI — offline tooling for obfuscated admin-panel routes.
//!
//! Encodes and decodes route segments, prints the route registry, builds
//! links, and resolves paths exactly as the server would. Works directly on
//! `routecloak-core`; no server is needed.

#![allow(clippy::print_stdout, clippy::print_stderr)]

use std::process::ExitCode;

use anyhow::{Context, Result, bail};
use clap::{Parser, Subcommand};

use routecloak_core::{
    DEFAULT_ROUTE_SECRET, Resolution, RouteKey, RouteRegistry, ScreenTable, SegmentCodec,
    ViewMode, resolve,
};

// ── ANSI color helpers ───────────────────────────────────────────────

const RESET: &str = "\x1b[0m";
const BOLD: &str = "\x1b[1m";
const DIM: &str = "\x1b[2m";
const RED: &str = "\x1b[31m";
const GREEN: &str = "\x1b[32m";

// ── CLI structure ────────────────────────────────────────────────────

#[derive(Parser)]
#[command(
    name = "routecloak",
    version,
    about = "RouteCloak CLI — encode, decode, and resolve obfuscated route segments",
    long_about = None,
    after_help = format!(
        "{DIM}Environment variables:{RESET}\n  \
         ROUTECLOAK_ROUTE_SECRET   Codec passphrase (default: compiled-in secret)\n\n\
         {DIM}Examples:{RESET}\n  \
         routecloak encode continents\n  \
         routecloak routes --json\n  \
         routecloak link encMasters encContinents --edit abc123\n  \
         routecloak resolve /<token>/<token>/new"
    ),
)]
struct Cli {
    /// Passphrase the segment codec derives its keys from.
    #[arg(
        long,
        env = "ROUTECLOAK_ROUTE_SECRET",
        default_value = DEFAULT_ROUTE_SECRET,
        hide_default_value = true,
        hide_env_values = true
    )]
    secret: String,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Encode a plain segment name into a token.
    Encode {
        /// Plain segment name, e.g. `continents`.
        plain: String,
    },
    /// Decode a token back into its plain segment name.
    Decode {
        /// Token taken from a URL path segment.
        token: String,
    },
    /// Print every symbolic route name with its token.
    Routes {
        /// Print as a JSON object.
        #[arg(long, default_value = "false")]
        json: bool,
    },
    /// Build a link from symbolic names.
    Link {
        /// Top-level module symbol, e.g. `encMasters`.
        master: String,
        /// Sub-module symbol, e.g. `encContinents`.
        module: String,
        /// Link to the create form.
        #[arg(long, conflicts_with = "edit")]
        new: bool,
        /// Link to the edit form for this record id.
        #[arg(long)]
        edit: Option<String>,
        /// Prefix the path with `/admin`.
        #[arg(long, default_value = "false")]
        admin: bool,
    },
    /// Resolve a path the way the router does.
    Resolve {
        /// Request path, e.g. `/<token>/<token>/new`.
        path: String,
    },
}

fn main() -> ExitCode {
    let cli = Cli::parse();

    match run(&cli.secret, cli.command) {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            eprintln!("{RED}{BOLD}✗ Error:{RESET} {e:#}");
            ExitCode::FAILURE
        }
    }
}

fn run(secret: &str, cmd: Commands) -> Result<()> {
    let codec = SegmentCodec::new(secret).context("invalid route secret")?;

    match cmd {
        Commands::Encode { plain } => {
            let token = codec
                .encrypt_segment(&plain)
                .with_context(|| format!("cannot encode '{plain}'"))?;
            println!("{token}");
            Ok(())
        }
        Commands::Decode { token } => match codec.decrypt_segment(&token) {
            Some(plain) => {
                println!("{plain}");
                Ok(())
            }
            None => bail!("token is not valid under the current secret"),
        },
        Commands::Routes { json } => cmd_routes(codec, json),
        Commands::Link {
            master,
            module,
            new,
            edit,
            admin,
        } => cmd_link(codec, &master, &module, new, edit, admin),
        Commands::Resolve { path } => cmd_resolve(&codec, &path),
    }
}

fn cmd_routes(codec: SegmentCodec, json: bool) -> Result<()> {
    let registry = RouteRegistry::new(codec.into());
    let map = registry.get_encrypted_route()?;

    if json {
        println!("{}", serde_json::to_string_pretty(map)?);
        return Ok(());
    }

    let width = map.iter().map(|(k, _)| k.len()).max().unwrap_or(0);
    for (symbol, token) in map.iter() {
        println!("{BOLD}{symbol:<width$}{RESET}  {token}");
    }
    Ok(())
}

fn cmd_link(
    codec: SegmentCodec,
    master: &str,
    module: &str,
    new: bool,
    edit: Option<String>,
    admin: bool,
) -> Result<()> {
    let master = route_key(master)?;
    let module = route_key(module)?;
    let mode = match (new, edit) {
        (_, Some(id)) => ViewMode::Edit { id },
        (true, None) => ViewMode::New,
        (false, None) => ViewMode::List,
    };

    let registry = RouteRegistry::new(codec.into());
    let path = if admin {
        registry.admin_link(master, module, &mode)?
    } else {
        registry.link(master, module, &mode)?
    };
    println!("{path}");
    Ok(())
}

fn cmd_resolve(codec: &SegmentCodec, path: &str) -> Result<()> {
    match resolve(codec, &ScreenTable::admin_panel(), path) {
        Resolution::Screen(route) => {
            println!("{GREEN}✓{RESET} {BOLD}{}{RESET}", route.screen);
            println!("  {DIM}master:{RESET} {}", route.path.master);
            println!("  {DIM}module:{RESET} {}", route.path.module);
            println!("  {DIM}mode:{RESET}   {}", route.path.mode.as_str());
            if let Some(id) = route.path.mode.id() {
                println!("  {DIM}id:{RESET}     {id}");
            }
            Ok(())
        }
        Resolution::Redirect { to } => {
            println!("redirect {to}");
            Ok(())
        }
    }
}

fn route_key(symbol: &str) -> Result<RouteKey> {
    RouteKey::from_symbol(symbol).with_context(|| {
        let known: Vec<_> = RouteKey::ALL.iter().map(|k| k.symbol()).collect();
        format!("unknown route symbol '{symbol}' (known: {})", known.join(", "))
    })
}
