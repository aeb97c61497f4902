//! Product configuration trait for the CLI binary
//!
//! The binary implements this trait to tell the core library who it is
//! (its own package name matters for self-removal) and where its template
//! tree lives.

use std::path::PathBuf;
use std::time::Duration;

/// Configuration trait for the scaffolding product
pub trait ProductConfig: Clone + Send + Sync + 'static {
    /// Package name as published, used for self-removal
    fn name(&self) -> &'static str;

    /// Human-readable display name
    fn display_name(&self) -> &'static str;

    /// Environment variable name for overriding the template directory
    fn template_dir_env(&self) -> &'static str;

    /// Template directory used when neither flag nor environment override it
    fn default_template_dir(&self) -> PathBuf;

    /// Package manager program
    fn package_manager(&self) -> &'static str {
        if cfg!(windows) {
            "npm.cmd"
        } else {
            "npm"
        }
    }

    /// Pause between the self-destruct messages
    fn self_destruct_pause(&self) -> Duration {
        Duration::from_millis(1500)
    }

    /// Resolve the template directory: explicit flag, then environment, then default
    fn template_dir(&self, flag: Option<PathBuf>) -> PathBuf {
        flag.or_else(|| std::env::var_os(self.template_dir_env()).map(PathBuf::from))
            .unwrap_or_else(|| self.default_template_dir())
    }
}
