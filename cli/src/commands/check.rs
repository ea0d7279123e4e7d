//! `stoplist check`: run one save event through the gate against a seeded host.
use std::sync::Arc;

use serde::Serialize;
use stoplist_core::api::{register, AppContext, CliError, SaveEvent, StoplistGate, Verdict};

use crate::commands::cli::CheckArgs;
use crate::commands::settings::print_json;
use crate::http::models::ItemState;

#[derive(Debug, Serialize)]
struct CheckReport {
    verdict: Verdict,
    item: Option<ItemState>,
}

pub fn handle_check(args: CheckArgs, ctx: &AppContext) -> Result<i32, CliError> {
    let raw = std::fs::read_to_string(&args.event)?;
    let event: SaveEvent = serde_json::from_str(&raw)
        .map_err(|e| CliError::Command(format!("invalid save event {}: {e}", args.event)))?;

    let mut cfg = ctx.cfg().clone();
    cfg.content.seed_path = Some(args.content);
    let ctx = ctx.with_config(cfg);

    let services = ctx.build_services()?;
    let gate = Arc::new(StoplistGate::new(
        services.clone(),
        ctx.cfg().moderation.clone(),
    ));
    register(services.hooks.as_ref(), gate.clone());

    let verdict = gate.check_post(&event)?;
    let item = ItemState::load(services.content.as_ref(), verdict.content_id())?;

    print_json(&CheckReport { verdict, item })?;
    Ok(0)
}
