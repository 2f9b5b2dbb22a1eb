use clap::Parser;
use std::net::SocketAddr;
use std::path::PathBuf;

/// Runtime configuration for the studentdb service.
#[derive(Debug, Clone, Parser)]
#[command(name = "studentdb", version, about = "File-backed student record service")]
pub struct ServerConfig {
    /// Path of the JSON file holding the student collection.
    #[arg(long, default_value = "students.json")]
    pub data_file: PathBuf,

    /// Address to serve the tool endpoints on.
    #[arg(long, default_value = "127.0.0.1:8090")]
    pub bind: SocketAddr,

    /// Reject create_student inputs that fail the hardening checks.
    #[arg(long)]
    pub strict_validation: bool,
}

impl ServerConfig {
    /// Absolute path of the backing store, announced at start-up.
    pub fn resolved_data_file(&self) -> std::io::Result<PathBuf> {
        if self.data_file.is_absolute() {
            Ok(self.data_file.clone())
        } else {
            Ok(std::env::current_dir()?.join(&self.data_file))
        }
    }
}
