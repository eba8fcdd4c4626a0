//! Window check tool - would a scan right now be accepted?
//!
//! Usage:
//!   cargo run --bin window-check -- --config config/dev.toml

use clap::Parser;
use scangate::infra::Config;
use scangate::io::{Clock, SystemClock};

#[derive(Parser, Debug)]
#[command(name = "window-check", about = "Print the acceptance window and current status")]
struct Args {
    /// Config file path
    #[arg(short, long, default_value = "config/dev.toml")]
    config: String,
}

fn main() {
    let args = Args::parse();
    let config = Config::load_from_path(&args.config);
    let window = config.window();
    let now = SystemClock.now();

    println!("window:  {window}");
    println!("now:     {}", now.format("%H:%M"));
    if window.contains(now) {
        println!("status:  within window - a scan now would complete the habit");
    } else {
        println!("status:  outside window - a scan now would be rejected");
    }
}
