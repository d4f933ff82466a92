//! CLI command implementations.

pub mod devlogs;
pub mod init;
pub mod programs;
pub mod render;
pub mod serve;

pub use devlogs::{list_devlogs, show_devlog};
pub use init::init_project;
pub use programs::{list_programs, list_tags, ProgramOptions};
pub use render::render_file;
pub use serve::serve;
