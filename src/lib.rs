//! Confined directory creation and mount flag translation for building
//! container root file systems.

pub mod config;
pub mod errors;
pub mod logging;
pub mod mkdirs;
pub mod mount_flags;
pub mod paths;
pub mod probe;


pub use errors::{FsError, FsResult};
pub use logging::{Diagnostics, Verbosity};
pub use mkdirs::{mkdirs, TreeBuilder};
pub use mount_flags::{path_mount_flags, translate_flags};
pub use paths::is_under;
