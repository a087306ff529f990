//! Command-line / environment configuration.

use clap::Parser;
use std::path::PathBuf;

#[derive(Parser, Debug, Clone)]
#[command(name = "qcom_viewer", version, about = "Serve the QCOM daily price file over HTTP")]
pub struct Config {
    /// Daily price file (CSV with a header row)
    #[arg(long, env = "QCOM_DATA_FILE", default_value = "qcom.us.txt")]
    pub data_file: PathBuf,

    /// Address to bind
    #[arg(long, env = "QCOM_HOST", default_value = "127.0.0.1")]
    pub host: String,

    #[arg(long, env = "QCOM_PORT", default_value_t = 5000)]
    pub port: u16,
}
