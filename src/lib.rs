// Library surface for headless/integration tests and reuse.
// The binary only adds CLI parsing and terminal setup on top of this.
pub mod app;
pub mod app_dirs;
pub mod config;
pub mod difficulty;
pub mod effects;
pub mod logging;
pub mod runtime;
pub mod scheduler;
pub mod session;
pub mod target;
pub mod ui;
