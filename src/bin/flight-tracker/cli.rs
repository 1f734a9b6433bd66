use clap::{Parser, command};

// Some defaults; some of which can be overriden via CLI args
const CONFIG_FILE_PATH: &str = "./flight-tracker.json";

#[derive(Parser, Debug)]
#[command(version, about, long_about = None)]
pub struct Cli {
    /// Where to load tracker config (icons, zone, popup attributes)
    #[arg(long = "config", default_value_t = String::from(CONFIG_FILE_PATH))]
    pub config_path: String,

    /// Recorded feed to replay, one JSON tick per line; "-" reads stdin
    #[arg(long = "input", default_value_t = String::from("-"))]
    pub input: String,

    /// Optional file to keep previous snapshots in between runs (MessagePack)
    #[arg(long = "state")]
    pub state_path: Option<String>,

    /// Ignore any stored previous snapshots, as if freshly started
    #[arg(long = "resetState")]
    pub reset_state: bool,

    /// Zone to use for every tick, overriding the feed and the config
    #[arg(long = "zone")]
    pub zone: Option<String>,

    /// Wait pollIntervalMs between ticks, like a live poll
    #[arg(long = "realtime")]
    pub realtime: bool,

    #[arg(long = "loglevel", default_value_t = String::from("info"))]
    pub log_level: String,
}
