use clap::Parser;

#[derive(Parser, Debug)]
#[command(author, version, about, long_about = None)]
pub struct Args {
    /// Recorded landmark session to replay (JSON)
    pub session: String,

    /// Tracker configuration file
    #[arg(long, default_value = "tracker_config.json")]
    pub config: String,

    /// Directory holding the calibration profile
    #[arg(long, default_value = "calibration_data")]
    pub calibration_dir: String,

    /// Print every engine report, not just actions
    #[arg(short, long)]
    pub verbose: bool,
}
