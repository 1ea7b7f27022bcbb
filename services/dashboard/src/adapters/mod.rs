pub mod client_channel;
pub mod file_store;
pub mod fs_exporter;
pub mod memory_store;
pub mod ui_effects;

pub use client_channel::ClientChannel;
pub use file_store::FileSessionStorage;
pub use fs_exporter::FsExporter;
pub use memory_store::InMemorySessionStorage;
pub use ui_effects::{EffectRecorder, UiEffect};
