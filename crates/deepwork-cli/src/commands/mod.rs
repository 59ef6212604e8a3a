pub mod completions;
pub mod history;
pub mod settings;
pub mod timer;
