mod central_panel;
mod save_dialog;
mod tools_panel;

pub use central_panel::central_panel;
pub use save_dialog::SaveDialog;
pub use tools_panel::{PALETTE, tools_panel};
