use super::surface::ControlId;

pub const MESSAGE_LIST: ControlId = ControlId::new(1001);
pub const INPUT_MESSAGE: ControlId = ControlId::new(1002);
pub const BUTTON_SEND: ControlId = ControlId::new(1003);
pub const BUTTON_TOGGLE: ControlId = ControlId::new(2001);
pub const BUTTON_CLOSE: ControlId = ControlId::new(2002);
