pub mod capture;
pub mod clipboard;
pub mod dialogs;
pub mod speech;

pub use capture::ScreenGrabber;
pub use clipboard::SystemClipboard;
pub use dialogs::NativeDialogs;
pub use speech::Narrator;
