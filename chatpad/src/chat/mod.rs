//! Chat threads, export and reply reveal

mod book;
pub mod export;
pub mod reveal;
mod thread;

pub use book::ThreadBook;
pub use export::{ExportError, export_file_name, load_export, save_thread};
pub use reveal::{RecordingSink, RevealFrame, RevealFrames, RevealSink, replay};
pub use thread::{ChatMessage, ChatThread, Sender};
