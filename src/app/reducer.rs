use super::{
    action::Action,
    command::Command,
    config::InsertMode,
    state::{EditorState, ErrorState},
};

pub fn update(state: &mut EditorState, action: Action) -> Option<Command> {
    match action {
        // --- Toolbar ---
        Action::PickColor(slot, color) => {
            state.picker_mut(slot).activate(&color);
        }
        Action::GenerateRequested(prompt) => {
            if !state.ai_button().accepts_click() {
                tracing::debug!("generate ignored while a generation is running");
                return None;
            }
            if prompt.trim().is_empty() {
                state.status_message = Some("Write a prompt first".to_string());
                return None;
            }
            state.in_flight += 1;
            state.last_error = None;
            state.status_message = Some("Generating content...".to_string());
            return Some(Command::Generate(prompt));
        }

        // --- Async Results ---
        Action::GenerationSettled(outcome) => {
            state.in_flight = state.in_flight.saturating_sub(1);
            match outcome {
                Ok(text) => {
                    insert_generated(state, &text);
                    state.status_message = Some("Content generated".to_string());
                }
                Err(err) => {
                    state.status_message = None;
                    state.last_error = Some(ErrorState::from_generation(&err));
                }
            }
        }
        Action::LoadingChanged(loading) => {
            state.loading = loading;
        }

        // --- UI ---
        Action::DismissError => {
            state.last_error = None;
        }
        Action::Quit => {
            state.should_quit = true;
        }
    }

    None
}

fn insert_generated(state: &mut EditorState, text: &str) {
    match state.insert_mode {
        InsertMode::Replace => state.content = text.to_string(),
        InsertMode::Append => {
            if !state.content.is_empty() {
                state.content.push('\n');
            }
            state.content.push_str(text);
        }
    }
}
