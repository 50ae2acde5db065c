use std::path::{Path, PathBuf};

use anyhow::Context as _;
use clap::{Args, Parser, Subcommand};
use log::info;

use sitecompiler::{
    CompileServer, CompileService, CompilerConfig, FileSource, HttpSource, PayloadSource,
};

#[derive(Parser, Debug)]
#[command(name = "sitecompiler", version, about = "Compile design-tool pages into HTML and CSS")]
struct Cli {
    /// JSON config file; flags override its values.
    #[arg(long, global = true)]
    config: Option<PathBuf>,

    #[command(subcommand)]
    cmd: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Compile the project once and write the output files.
    Build(BuildArgs),
    /// Listen for `POST /api/make-website` and compile on every request.
    Serve(ServeArgs),
}

#[derive(Args, Debug)]
struct CommonArgs {
    /// Project API endpoint returning the project JSON.
    #[arg(long)]
    url: Option<String>,

    /// HTML template file (defaults to the bundled template).
    #[arg(long)]
    html_template: Option<PathBuf>,

    /// CSS template file (defaults to the bundled template).
    #[arg(long)]
    css_template: Option<PathBuf>,

    /// Output directory.
    #[arg(long)]
    out_dir: Option<PathBuf>,
}

#[derive(Args, Debug)]
struct BuildArgs {
    #[command(flatten)]
    common: CommonArgs,

    /// Read the project JSON from a file instead of the project API.
    #[arg(long, conflicts_with = "url")]
    input: Option<PathBuf>,
}

#[derive(Args, Debug)]
struct ServeArgs {
    #[command(flatten)]
    common: CommonArgs,

    /// Address to listen on.
    #[arg(long)]
    bind: Option<String>,
}

fn load_config(path: Option<&Path>, common: &CommonArgs) -> anyhow::Result<CompilerConfig> {
    let mut config = match path {
        Some(p) => CompilerConfig::from_json_file(p)?,
        None => CompilerConfig::default(),
    };
    if let Some(url) = &common.url {
        config.source_url = url.clone();
    }
    if common.html_template.is_some() {
        config.html_template = common.html_template.clone();
    }
    if common.css_template.is_some() {
        config.css_template = common.css_template.clone();
    }
    if let Some(dir) = &common.out_dir {
        config.output_dir = dir.clone();
    }
    Ok(config)
}

fn build(config: &CompilerConfig, input: Option<PathBuf>) -> anyhow::Result<()> {
    config.validate_output()?;
    let source: Box<dyn PayloadSource> = match input {
        Some(path) => Box::new(FileSource::new(path)),
        None => {
            config.validate_source()?;
            Box::new(HttpSource::new(config)?)
        }
    };
    let mut service = CompileService::new(source, config.dir_sink())
        .with_templates(config.html_template.clone(), config.css_template.clone());

    let site = service.run().context("compile failed")?;
    info!("built page {}", site.page_name);
    println!(
        "{}\n{}",
        config.dir_sink().html_path().display(),
        config.dir_sink().css_path().display()
    );
    Ok(())
}

fn serve(config: &CompilerConfig) -> anyhow::Result<()> {
    let service = sitecompiler::new_service(config)?;
    let server = CompileServer::bind(&config.bind_addr, service)
        .with_context(|| format!("cannot listen on {}", config.bind_addr))?;
    server.serve()?;
    Ok(())
}

fn main() -> anyhow::Result<()> {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();

    let cli = Cli::parse();
    match cli.cmd {
        Command::Build(args) => {
            let config = load_config(cli.config.as_deref(), &args.common)?;
            build(&config, args.input)
        }
        Command::Serve(args) => {
            let mut config = load_config(cli.config.as_deref(), &args.common)?;
            if let Some(bind) = args.bind {
                config.bind_addr = bind;
            }
            serve(&config)
        }
    }
}
