pub mod achievements_panel;
pub mod chat;
pub mod modal;
pub mod scambert_icon;
pub mod unlock_toast;
