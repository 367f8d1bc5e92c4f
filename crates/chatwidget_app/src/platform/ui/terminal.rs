use std::io::{self, Write};

use chatwidget_core::Sender;
use crossterm::style::Stylize;
use crossterm::terminal::{Clear, ClearType};
use crossterm::{cursor, queue};
use widget_logging::widget_trace;

use super::constants::*;
use super::surface::{Surface, UiCommand};

const TYPING_TEXT: &str = "bot> ...";

/// Line-oriented surface that prints the transcript to a terminal.
///
/// While the widget is closed nothing is printed; the transcript is kept and
/// replayed when it opens again, the way hidden DOM nodes keep their content.
pub struct TerminalSurface<W: Write> {
    out: W,
    visible: bool,
    transcript: Vec<(String, Sender)>,
    typing: bool,
}

impl<W: Write> TerminalSurface<W> {
    pub fn new(out: W) -> Self {
        Self {
            out,
            visible: false,
            transcript: Vec::new(),
            typing: false,
        }
    }

    #[cfg(test)]
    pub fn into_inner(self) -> W {
        self.out
    }

    fn write_message(&mut self, text: &str, sender: Sender) -> io::Result<()> {
        match sender {
            Sender::User => writeln!(self.out, "{} {}", "you>".yellow().bold(), text),
            Sender::Bot => writeln!(self.out, "{} {}", "bot>".green().bold(), text),
        }
    }

    fn write_typing(&mut self) -> io::Result<()> {
        write!(self.out, "{}", TYPING_TEXT.dim())
    }

    fn clear_typing(&mut self) -> io::Result<()> {
        queue!(
            self.out,
            cursor::MoveToColumn(0),
            Clear(ClearType::CurrentLine)
        )
    }

    fn replay(&mut self) -> io::Result<()> {
        let transcript = std::mem::take(&mut self.transcript);
        for (text, sender) in &transcript {
            self.write_message(text, *sender)?;
        }
        self.transcript = transcript;
        if self.typing {
            self.write_typing()?;
        }
        Ok(())
    }
}

impl<W: Write> Surface for TerminalSurface<W> {
    fn apply(&mut self, command: UiCommand) -> io::Result<()> {
        match command {
            UiCommand::Mount { control_id, label } => {
                widget_trace!("mount control {} ({})", control_id.raw(), label);
                if control_id == MESSAGE_LIST {
                    writeln!(self.out, "{}", format!("== {label} ==").bold())?;
                } else if control_id == INPUT_MESSAGE {
                    writeln!(self.out, "{label}; /toggle, /open, /close and /quit control the widget.")?;
                }
            }
            UiCommand::SetVisible { visible } => {
                if visible == self.visible {
                    return Ok(());
                }
                self.visible = visible;
                if visible {
                    writeln!(self.out, "{}", "[chat opened]".dim())?;
                    self.replay()?;
                } else {
                    if self.typing {
                        self.clear_typing()?;
                    }
                    writeln!(self.out, "{}", "[chat closed]".dim())?;
                }
            }
            UiCommand::SetToggleActive { active } => {
                widget_trace!("toggle active={}", active);
            }
            UiCommand::SetControlEnabled {
                control_id,
                enabled,
            } => {
                widget_trace!("control {} enabled={}", control_id.raw(), enabled);
            }
            UiCommand::SetInputText { text } => {
                // The terminal's own line editor owns the input text.
                widget_trace!("input text now {} chars", text.len());
            }
            UiCommand::AppendMessage { text, sender } => {
                if self.visible {
                    self.write_message(&text, sender)?;
                }
                self.transcript.push((text, sender));
            }
            UiCommand::ShowTyping => {
                self.typing = true;
                if self.visible {
                    self.write_typing()?;
                }
            }
            UiCommand::RemoveTyping => {
                self.typing = false;
                if self.visible {
                    self.clear_typing()?;
                }
            }
            UiCommand::ScrollToEnd | UiCommand::FocusInput => {
                self.out.flush()?;
            }
        }
        Ok(())
    }
}
