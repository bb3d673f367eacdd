// cli.rs - Command-line interface configuration
use std::path::PathBuf;

use clap::Parser;

#[derive(Parser, Debug, Clone)]
#[command(name = "viewer3d-replay")]
#[command(about = "Replay scripted mouse/keyboard input through a 3D camera", long_about = None)]
pub struct Cli {
    /// JSON replay script
    pub script: PathBuf,

    /// Record the view after every event, not only at the end
    #[arg(long = "every-event", default_value = "false")]
    pub every_event: bool,

    /// Pretty-print the JSON report
    #[arg(long, default_value = "false")]
    pub pretty: bool,
}
