use std::io;

use chatwidget_core::Sender;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct ControlId(u32);

impl ControlId {
    pub const fn new(raw: u32) -> Self {
        Self(raw)
    }

    pub fn raw(self) -> u32 {
        self.0
    }
}

/// Instructions for whatever is drawing the widget.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum UiCommand {
    Mount { control_id: ControlId, label: String },
    SetVisible { visible: bool },
    SetToggleActive { active: bool },
    SetControlEnabled { control_id: ControlId, enabled: bool },
    SetInputText { text: String },
    AppendMessage { text: String, sender: Sender },
    ShowTyping,
    RemoveTyping,
    ScrollToEnd,
    FocusInput,
}

pub trait Surface {
    fn apply(&mut self, command: UiCommand) -> io::Result<()>;

    fn apply_all(&mut self, commands: Vec<UiCommand>) -> io::Result<()> {
        for command in commands {
            self.apply(command)?;
        }
        Ok(())
    }
}
