use super::constants::*;
use super::surface::UiCommand;

/// Mount points the widget renders into, created once at startup.
#[allow(clippy::vec_init_then_push)]
pub fn initial_commands() -> Vec<UiCommand> {
    let mut commands = Vec::new();

    commands.push(UiCommand::Mount {
        control_id: BUTTON_TOGGLE,
        label: "/toggle".to_string(),
    });
    commands.push(UiCommand::Mount {
        control_id: BUTTON_CLOSE,
        label: "/close".to_string(),
    });
    commands.push(UiCommand::Mount {
        control_id: MESSAGE_LIST,
        label: "Chat".to_string(),
    });
    commands.push(UiCommand::Mount {
        control_id: INPUT_MESSAGE,
        label: "Type a message and press Enter".to_string(),
    });
    commands.push(UiCommand::Mount {
        control_id: BUTTON_SEND,
        label: "Enter".to_string(),
    });

    commands
}
