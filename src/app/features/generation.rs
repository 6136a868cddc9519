use crate::app::generation::GenerationController;
use crate::app::{action::Action, command::Command};
use anyhow::Result;
use std::sync::Arc;
use tokio::sync::mpsc;

pub fn handle_command(
    command: Command,
    controller: Arc<GenerationController>,
    tx: mpsc::Sender<Action>,
) -> Result<()> {
    match command {
        Command::Generate(prompt) => {
            tokio::spawn(async move {
                let outcome = controller.generate(prompt).await;
                if tx.send(Action::GenerationSettled(outcome)).await.is_err() {
                    tracing::trace!("generation result dropped (editor loop gone)");
                }
            });
        }
    }
    Ok(())
}
