mod ai;
mod generate;
mod store;
#[cfg(test)]
mod test_support;

use std::path::{Path, PathBuf};

use anyhow::{anyhow, bail, Context, Result};
use clap::{Parser, Subcommand};

use memedo_catalog::RenderRequest;
use memedo_core::MemedoConfig;
use memedo_render::CompositionPipeline;

use crate::ai::{HttpSelectionService, HttpSummaryService};
use crate::store::GenerationStore;

/// Config file picked up from the working directory when `--config` is not given.
const DEFAULT_CONFIG_FILE: &str = "memedo.toml";

#[derive(Parser)]
#[command(
    name = "memedo",
    version,
    about = "Memedo: topical memes from a prompt",
    long_about = "Memedo turns a free-text prompt into captioned memes.\nA summary model writes the commentary, a selection model picks templates and captions, and the engine renders them."
)]
struct Cli {
    /// Path to a memedo.toml configuration file
    #[arg(long, global = true)]
    config: Option<PathBuf>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// List the meme templates in the catalog
    Templates {
        /// Print the catalog metadata as JSON
        #[arg(long)]
        json: bool,
    },

    /// Render one template with the given captions
    Render {
        /// Template id
        #[arg(long)]
        template: u32,

        /// Caption as name=value (repeatable)
        #[arg(long = "field", value_parser = parse_field)]
        fields: Vec<(String, String)>,

        /// Captions as a JSON object; --field values override its keys
        #[arg(long)]
        fields_json: Option<String>,
    },

    /// Summarize a prompt, pick templates and render the memes
    Generate {
        /// What happened (e.g. "india new zealand test match")
        #[arg()]
        prompt: String,

        /// Maximum number of memes (default: ai.selection.max_memes)
        #[arg(long)]
        count: Option<usize>,
    },

    /// Show the most recent generations
    History {
        #[arg(long, default_value_t = 10)]
        limit: usize,
    },

    /// Show one generation as JSON
    Show {
        #[arg()]
        id: u64,
    },

    /// Write a default configuration file
    InitConfig {
        #[arg()]
        path: PathBuf,

        /// Overwrite an existing file
        #[arg(long)]
        force: bool,
    },
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("info")),
        )
        .init();

    if let Commands::InitConfig { path, force } = &cli.command {
        return init_config(path, *force);
    }

    let config = load_config(cli.config.as_deref())?;

    match cli.command {
        Commands::Templates { json } => cmd_templates(&config, json),
        Commands::Render {
            template,
            fields,
            fields_json,
        } => cmd_render(&config, template, fields, fields_json.as_deref()),
        Commands::Generate { prompt, count } => cmd_generate(&config, &prompt, count),
        Commands::History { limit } => cmd_history(&config, limit),
        Commands::Show { id } => cmd_show(&config, id),
        Commands::InitConfig { .. } => Ok(()),
    }
}

fn parse_field(raw: &str) -> std::result::Result<(String, String), String> {
    let (name, value) = raw
        .split_once('=')
        .ok_or_else(|| format!("expected name=value, got '{}'", raw))?;
    if name.trim().is_empty() {
        return Err(format!("empty caption name in '{}'", raw));
    }
    Ok((name.trim().to_string(), value.to_string()))
}

/// Load `explicit`, else `memedo.toml` when present, else defaults; then expand `~/` paths.
fn load_config(explicit: Option<&Path>) -> Result<MemedoConfig> {
    let mut config = match explicit {
        Some(path) => MemedoConfig::load_from_file(path)
            .with_context(|| format!("failed to load config: {}", path.display()))?,
        None if Path::new(DEFAULT_CONFIG_FILE).exists() => {
            MemedoConfig::load_from_file(Path::new(DEFAULT_CONFIG_FILE))
                .with_context(|| format!("failed to load config: {}", DEFAULT_CONFIG_FILE))?
        }
        None => MemedoConfig::default(),
    };

    let paths = &mut config.paths;
    paths.template_dir = expand_tilde(&paths.template_dir)?;
    paths.output_dir = expand_tilde(&paths.output_dir)?;
    paths.store_dir = expand_tilde(&paths.store_dir)?;
    if let Some(font) = &paths.font_path {
        paths.font_path = Some(expand_tilde(font)?);
    }
    Ok(config)
}

fn expand_tilde(path: &Path) -> Result<PathBuf> {
    let Some(raw) = path.to_str() else {
        return Ok(path.to_path_buf());
    };
    if raw == "~" || raw.starts_with("~/") {
        let home = dirs::home_dir().ok_or_else(|| anyhow!("failed to resolve home dir"))?;
        if raw == "~" {
            return Ok(home);
        }
        return Ok(home.join(raw.trim_start_matches("~/")));
    }
    Ok(path.to_path_buf())
}

fn init_config(path: &Path, force: bool) -> Result<()> {
    if path.exists() && !force {
        bail!("{} already exists (use --force to overwrite)", path.display());
    }
    MemedoConfig::default()
        .save_to_file(path)
        .with_context(|| format!("failed to write config: {}", path.display()))?;
    println!("✓ Wrote default configuration to {}", path.display());
    Ok(())
}

fn cmd_templates(config: &MemedoConfig, json: bool) -> Result<()> {
    let pipeline = CompositionPipeline::from_config(config)?;
    let infos = pipeline.registry().all();
    if json {
        println!("{}", serde_json::to_string_pretty(&infos)?);
        return Ok(());
    }

    println!("📚 {} meme templates", infos.len());
    for template in pipeline.registry().templates() {
        let fields = template.field_names().collect::<Vec<_>>().join(", ");
        println!(
            "   {:>3}  {:<30} [{}] {}",
            template.id, template.name, template.asset_kind, fields
        );
    }
    Ok(())
}

fn cmd_render(
    config: &MemedoConfig,
    template_id: u32,
    fields: Vec<(String, String)>,
    fields_json: Option<&str>,
) -> Result<()> {
    let pipeline = CompositionPipeline::from_config(config)?;

    let request = match fields_json {
        Some(raw) => {
            let template = pipeline.registry().resolve(template_id)?;
            let mut value: serde_json::Value =
                serde_json::from_str(raw).context("--fields-json is not valid JSON")?;
            let object = value
                .as_object_mut()
                .ok_or_else(|| anyhow!("--fields-json must be a JSON object"))?;
            for (name, text) in fields {
                object.insert(name, serde_json::Value::String(text));
            }
            RenderRequest::from_json(template, &value)?
        }
        None => fields
            .into_iter()
            .fold(RenderRequest::new(template_id), |req, (name, text)| {
                req.with_field(name, text)
            }),
    };

    let artifact = pipeline.generate(&request)?;
    println!("✓ {}", artifact.path.display());
    Ok(())
}

fn cmd_generate(config: &MemedoConfig, prompt: &str, count: Option<usize>) -> Result<()> {
    let max = count.unwrap_or(config.ai.selection.max_memes);
    if max == 0 {
        bail!("--count must be at least 1");
    }

    let pipeline = CompositionPipeline::from_config(config)?;
    let store = GenerationStore::open(&config.paths.store_dir)?;
    let summarizer = HttpSummaryService::from_config(&config.ai.summary)?;
    let selector = HttpSelectionService::from_config(&config.ai.selection)?;

    println!("🍳 Cooking memes for: {}", prompt);
    let record = generate::generate_memes(prompt, &summarizer, &selector, &pipeline, &store, max)?;

    println!("✓ Generation {} produced {} meme(s)", record.id, record.paths.len());
    for path in &record.paths {
        println!("   {}", path.display());
    }
    Ok(())
}

fn cmd_history(config: &MemedoConfig, limit: usize) -> Result<()> {
    let store = GenerationStore::open(&config.paths.store_dir)?;
    let records = store.list_last(limit)?;
    if records.is_empty() {
        println!("No generations yet.");
        return Ok(());
    }
    for record in records {
        println!(
            "{:>5}  {}  {:?}  {} meme(s)  {}",
            record.id,
            record.created_at.format("%Y-%m-%d %H:%M:%S"),
            record.status,
            record.paths.len(),
            record.prompt
        );
    }
    Ok(())
}

fn cmd_show(config: &MemedoConfig, id: u64) -> Result<()> {
    let store = GenerationStore::open(&config.paths.store_dir)?;
    let record = store
        .get(id)?
        .ok_or_else(|| anyhow!("generation {} not found", id))?;
    println!("{}", serde_json::to_string_pretty(&record)?);
    Ok(())
}
