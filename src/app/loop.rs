use crate::app::generation::GenerationController;
use crate::app::{action::Action, command::Command, reducer, state::EditorState};

use anyhow::Result;
use std::sync::Arc;
use tokio::sync::mpsc;

/// Drives the editor until `Quit` (or the event channel closing) and
/// returns the final state. Quitting waits for generations this editor
/// started, so their results are never lost.
pub async fn run_loop(
    mut state: EditorState,
    controller: Arc<GenerationController>,
    mut event_rx: mpsc::Receiver<Action>,
) -> Result<EditorState> {
    let (action_tx, mut action_rx) = mpsc::channel(100);
    let mut generation_rx = controller.subscribe();
    let mut events_open = true;

    loop {
        if state.should_quit && state.in_flight == 0 {
            break;
        }

        let action = tokio::select! {
            // User input
            event = event_rx.recv(), if events_open => match event {
                Some(action) => action,
                None => {
                    events_open = false;
                    Action::Quit
                }
            },

            // Async results
            Some(action) = action_rx.recv() => action,

            // Controller state
            Ok(()) = generation_rx.changed() => {
                let loading = generation_rx.borrow_and_update().loading();
                Action::LoadingChanged(loading)
            }
        };

        if let Some(command) = reducer::update(&mut state, action) {
            handle_command(command, controller.clone(), action_tx.clone())?;
        }
    }

    Ok(state)
}

pub(crate) fn handle_command(
    command: Command,
    controller: Arc<GenerationController>,
    tx: mpsc::Sender<Action>,
) -> Result<()> {
    crate::app::features::generation::handle_command(command, controller, tx)
}

#[cfg(test)]
#[path = "loop_tests.rs"]
mod tests;
