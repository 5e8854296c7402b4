//! `skills-matrix` - loads the catalog and reports on the persisted assessment.

use std::error::Error;
use std::sync::Arc;

use skills_matrix::application::AssessmentEngine;
use skills_matrix::config::AppConfig;
use skills_matrix::ports::CatalogSource;

fn main() -> Result<(), Box<dyn Error>> {
    let config = AppConfig::load()?;
    config.validate()?;
    config
        .logging
        .try_init()
        .map_err(|e| e as Box<dyn Error>)?;

    let catalog = config.catalog.source().load_catalog()?;
    let mut engine = AssessmentEngine::new(
        Arc::new(catalog),
        config.storage.build_store(),
        config.engine_settings()?,
    );

    if engine.load().is_none() {
        tracing::info!(key = %config.storage.key, "no assessment in progress");
        return Ok(());
    }
    report(&engine);
    Ok(())
}

fn report(engine: &AssessmentEngine) {
    let state = engine.state();
    let progress = engine.progress();
    tracing::info!(
        name = state.name().unwrap_or("anonymous"),
        role = state.role().map_or("any", |r| r.as_str()),
        mode = ?state.mode(),
        status = ?engine.status(),
        answered = progress.answered,
        total = progress.total,
        percentage = %progress.percentage,
        inferred = progress.inferred_count,
        manual = progress.manual_count,
        elapsed_secs = state.elapsed().map(|d| d.num_seconds()),
        "assessment progress"
    );

    for group in engine.group_progress() {
        tracing::info!(
            group = %group.group_id,
            name = %group.name,
            answered = group.answered,
            total = group.total,
            "group progress"
        );
    }

    if let Some(current) = engine.current_skill() {
        tracing::info!(
            index = current.index,
            skill = %current.entry.skill_id,
            name = %current.entry.name,
            "current skill"
        );
    }
    if let Some(next) = engine.get_next_unanswered_index(0) {
        tracing::info!(index = next, "first unanswered skill");
    }
}
