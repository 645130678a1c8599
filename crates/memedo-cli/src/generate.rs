use anyhow::{bail, Context, Result};
use rayon::prelude::*;

use memedo_catalog::RenderRequest;
use memedo_render::{CompositionPipeline, RenderedArtifact};

use crate::ai::{MemeSelection, MemeSelectionService, SummaryService};
use crate::store::{Generation, GenerationStore};

/// Prompts at or below this many characters are rejected.
pub const MIN_PROMPT_CHARS: usize = 3;

/// Run prompt → summary → selection → render and record the outcome.
///
/// Individual renders that fail are logged and skipped. The record is marked
/// failed when the summary or selection call fails or when nothing renders.
pub fn generate_memes(
    prompt: &str,
    summarizer: &dyn SummaryService,
    selector: &dyn MemeSelectionService,
    pipeline: &CompositionPipeline,
    store: &GenerationStore,
    max_memes: usize,
) -> Result<Generation> {
    let prompt = prompt.trim();
    if prompt.chars().count() <= MIN_PROMPT_CHARS {
        bail!("prompt must be longer than {} characters", MIN_PROMPT_CHARS);
    }

    let record = store.create(prompt)?;
    tracing::info!("generation {}: prompt {:?}", record.id, prompt);

    match run(prompt, summarizer, selector, pipeline, max_memes) {
        Ok(artifacts) => {
            let paths = artifacts.into_iter().map(|a| a.path).collect();
            store.update_paths(record.id, paths)
        }
        Err(err) => {
            store.mark_failed(record.id, &format!("{:#}", err))?;
            Err(err.context(format!("generation {} failed", record.id)))
        }
    }
}

fn run(
    prompt: &str,
    summarizer: &dyn SummaryService,
    selector: &dyn MemeSelectionService,
    pipeline: &CompositionPipeline,
    max_memes: usize,
) -> Result<Vec<RenderedArtifact>> {
    let summary = summarizer.summarize(prompt).context("summary failed")?;
    tracing::info!("summary: {}", summary);

    let catalog = pipeline.registry().system_context();
    let selections = selector
        .select(&summary, &catalog, max_memes)
        .context("meme selection failed")?;
    tracing::info!("selected {} memes", selections.len());

    let artifacts = render_selections(pipeline, &selections);
    if artifacts.is_empty() {
        bail!("no meme rendered ({} selected)", selections.len());
    }
    Ok(artifacts)
}

/// Render each selection as an independent request, keeping selection order.
pub fn render_selections(
    pipeline: &CompositionPipeline,
    selections: &[MemeSelection],
) -> Vec<RenderedArtifact> {
    selections
        .par_iter()
        .map(|selection| render_selection(pipeline, selection))
        .collect::<Vec<_>>()
        .into_iter()
        .zip(selections)
        .filter_map(|(result, selection)| match result {
            Ok(artifact) => Some(artifact),
            Err(err) => {
                tracing::warn!(
                    template_id = selection.template_id,
                    "skipping meme: {}",
                    err
                );
                None
            }
        })
        .collect()
}

fn render_selection(
    pipeline: &CompositionPipeline,
    selection: &MemeSelection,
) -> memedo_core::MemedoResult<RenderedArtifact> {
    let template = pipeline.registry().resolve(selection.template_id)?;
    let request = RenderRequest::from_json(template, &selection.caption_input)?;
    pipeline.generate(&request)
}
