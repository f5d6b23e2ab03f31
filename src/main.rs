mod cli;

use std::path::Path;
use std::sync::Arc;

use anyhow::{Context, Result};
use clap::Parser;
use cli::{Cli, Commands};

use fd_av::{FfmpegToolkit, MediaToolkit, ToolRegistry};
use fd_core::config::Config;

fn main() -> Result<()> {
    let cli = Cli::parse();

    // RUST_LOG wins; otherwise pick defaults from the verbose flag.
    let env_filter = std::env::var("RUST_LOG").unwrap_or_else(|_| {
        if cli.verbose {
            "framedeck=trace,fd_server=debug,fd_av=debug,fd_core=debug,tower_http=debug".to_string()
        } else {
            "framedeck=info,fd_server=info,fd_av=info,tower_http=info".to_string()
        }
    });

    tracing_subscriber::fmt()
        .with_env_filter(tracing_subscriber::EnvFilter::new(env_filter))
        .init();

    match cli.command {
        Commands::Serve {
            host,
            port,
            work_root,
        } => {
            let mut config = Config::load_or_default(cli.config.as_deref());
            if let Some(host) = host {
                config.server.host = host;
            }
            if let Some(port) = port {
                config.server.port = port;
            }
            if let Some(root) = work_root {
                config.storage.work_root = root;
            }

            tracing::info!(
                "Starting framedeck on {}:{} (work root {})",
                config.server.host,
                config.server.port,
                config.storage.work_root.display()
            );

            let rt = tokio::runtime::Runtime::new()?;
            rt.block_on(fd_server::start(config))?;
            Ok(())
        }
        Commands::Probe { file, json } => probe_file(&file, cli.config.as_deref(), json),
        Commands::CheckTools => check_tools(cli.config.as_deref()),
        Commands::Validate {
            config: config_path,
        } => {
            let path = config_path.or(cli.config);
            validate_config(path.as_deref())
        }
        Commands::Version => {
            println!("framedeck {}", env!("CARGO_PKG_VERSION"));
            Ok(())
        }
    }
}

fn probe_file(file: &Path, config_path: Option<&Path>, json: bool) -> Result<()> {
    if !file.exists() {
        anyhow::bail!("File does not exist: {}", file.display());
    }

    let config = Config::load_or_default(config_path);
    let tools = Arc::new(ToolRegistry::discover(&config.tools));
    let toolkit = FfmpegToolkit::new(tools);

    let rt = tokio::runtime::Runtime::new()?;
    let probe = rt
        .block_on(toolkit.inspect_full(file))
        .with_context(|| format!("probing {}", file.display()))?;

    if json {
        println!("{}", serde_json::to_string_pretty(&probe)?);
        return Ok(());
    }

    println!("File: {}", file.display());
    let secs = probe.duration_seconds.max(0.0) as u64;
    println!(
        "Duration: {:02}:{:02}:{:02} ({:.3}s)",
        secs / 3600,
        (secs / 60) % 60,
        secs % 60,
        probe.duration_seconds
    );
    if probe.codec.is_empty() {
        println!("Audio: none");
    } else {
        println!(
            "Audio: {} {}ch {} Hz",
            probe.codec, probe.channels, probe.sample_rate
        );
    }
    if probe.bitrate_kbps > 0 {
        println!("Bitrate: {} kbps", probe.bitrate_kbps);
    }

    Ok(())
}

fn check_tools(config_path: Option<&Path>) -> Result<()> {
    println!("Checking external tools...\n");

    let config = Config::load_or_default(config_path);
    let tools = ToolRegistry::discover(&config.tools);

    for tool in tools.check_all() {
        let status = if tool.available { "✓" } else { "✗" };
        print!("{} {}", status, tool.name);

        if let Some(ref version) = tool.version {
            print!(" ({})", version.lines().next().unwrap_or(""));
        }
        if let Some(ref path) = tool.path {
            print!(" - {}", path.display());
        }
        println!();
    }

    println!();
    match tools.ensure_required() {
        Ok(()) => {
            println!("All required tools are available!");
            Ok(())
        }
        Err(e) => {
            println!("Required tools are missing; the server will not start.");
            Err(e.into())
        }
    }
}

fn validate_config(path: Option<&Path>) -> Result<()> {
    let config = match path {
        Some(p) => {
            println!("Validating config: {}", p.display());
            let contents = std::fs::read_to_string(p)
                .with_context(|| format!("reading {}", p.display()))?;
            let config = Config::from_json(&contents)?;
            println!("✓ Configuration is valid");
            config
        }
        None => {
            println!("No config file specified, using defaults");
            Config::default()
        }
    };

    println!("  Server: {}:{}", config.server.host, config.server.port);
    println!("  Work root: {}", config.storage.work_root.display());
    println!("  Tool timeout: {}s", config.tools.timeout_secs);
    println!(
        "  Defaults: fps {} / jpeg {} / pdf {}dpi q{} / audio {}",
        config.defaults.fps,
        config.defaults.jpeg_quality,
        config.defaults.pdf_density,
        config.defaults.pdf_quality,
        config.defaults.audio_format
    );

    for warning in config.validate() {
        println!("  warning: {warning}");
    }

    Ok(())
}
