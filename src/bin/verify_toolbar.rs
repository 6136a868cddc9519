use anyhow::{bail, Result};
use scribe::app::action::Action;
use scribe::app::config::EditorConfig;
use scribe::app::generation::GenerationController;
use scribe::app::logging::init_tracing;
use scribe::app::r#loop::run_loop;
use scribe::app::state::{EditorState, PickerSlot};
use scribe::infrastructure::{Reply, ScriptedProvider};
use std::sync::Arc;
use std::time::Duration;
use tokio::sync::mpsc;

#[tokio::main]
async fn main() -> Result<()> {
    let config = EditorConfig::load();
    init_tracing(&config.logging.filter);

    let provider = ScriptedProvider::new([
        Reply::Text("Rust makes systems programming approachable.".to_string()),
        Reply::Unreachable,
    ])
    .with_delay(Duration::from_millis(50));
    let controller = Arc::new(GenerationController::with_policy(
        Arc::new(provider),
        config.generation.settlement,
    ));

    let state = EditorState::new(&config);
    let Some(first_color) = state.foreground.colors().first().cloned() else {
        bail!("foreground picker has no colors");
    };
    let (event_tx, event_rx) = mpsc::channel(16);
    let run = tokio::spawn(run_loop(state, controller.clone(), event_rx));

    println!("Applying {first_color} twice (apply, then clear)...");
    event_tx
        .send(Action::PickColor(PickerSlot::Foreground, first_color.clone()))
        .await?;
    event_tx
        .send(Action::PickColor(PickerSlot::Foreground, first_color))
        .await?;

    println!("Requesting a generation...");
    event_tx
        .send(Action::GenerateRequested("Write one sentence about Rust".to_string()))
        .await?;
    event_tx.send(Action::Quit).await?;

    let state = run.await??;
    println!("Format history:");
    for binding in state.selection.history() {
        match binding.value {
            Some(color) => println!("  {} = {}", binding.command, color),
            None => println!("  {} cleared", binding.command),
        }
    }
    println!("Content: {:?}", state.content);

    println!("Generating while the provider is unreachable...");
    match controller.generate("Write another sentence").await {
        Ok(text) => println!("FAILURE: expected an error, got {text:?}"),
        Err(err) => {
            let stored = controller.error().map(|e| e.message().to_string());
            println!("Error: {err} (stored: {stored:?})");
            if stored.as_deref() == Some(err.message()) && !controller.loading() {
                println!("SUCCESS: error stored and returned, loading cleared");
            }
        }
    }

    Ok(())
}
