use clap::Parser;
use std::path::PathBuf;
use std::time::Duration;

pub const DEFAULT_API_BASE: &str = "https://open.bigmodel.cn/api/paas/v4";

// CLI argument structure, every flag can also come from the environment
#[derive(Parser, Debug, Clone)]
#[command(name = "genai-relay")]
#[command(about = "Rate-limited relay for image and video generation")]
pub struct Args {
    // Interface to bind
    #[arg(long, env = "HOST", default_value = "0.0.0.0")]
    pub host: String,

    // Port to run the server on
    #[arg(short, long, env = "PORT", default_value_t = 8080)]
    pub port: u16,

    // Vendor API key, there is deliberately no built-in fallback
    #[arg(long, env = "API_KEY", hide_env_values = true)]
    pub api_key: Option<String>,

    // Vendor API base url
    #[arg(long, env = "API_BASE", default_value = DEFAULT_API_BASE)]
    pub api_base: String,

    #[arg(long, env = "IMAGE_MODEL", default_value = "cogview-3-flash")]
    pub image_model: String,

    #[arg(long, env = "IMAGE_SIZE", default_value = "768x1344")]
    pub image_size: String,

    #[arg(long, env = "VIDEO_MODEL", default_value = "cogvideox-flash")]
    pub video_model: String,

    #[arg(long, env = "VIDEO_SIZE", default_value = "1080x1920")]
    pub video_size: String,

    // Video generation: max requests per window
    #[arg(long, env = "VIDEO_RATE_LIMIT", default_value_t = 1)]
    pub video_rate_limit: usize,

    // Video generation: window in seconds
    #[arg(long, env = "VIDEO_RATE_WINDOW", default_value_t = 60)]
    pub video_rate_window: u64,

    // Outbound request timeout in seconds
    #[arg(long, env = "REQUEST_TIMEOUT", default_value_t = 120)]
    pub request_timeout: u64,

    // Directory holding index.html
    #[arg(long, env = "TEMPLATES_DIR", default_value = "templates")]
    pub templates_dir: PathBuf,
}

impl Args {
    pub fn bind_addr(&self) -> String {
        format!("{}:{}", self.host, self.port)
    }

    pub fn video_rate_window(&self) -> Duration {
        Duration::from_secs(self.video_rate_window)
    }

    pub fn request_timeout(&self) -> Duration {
        Duration::from_secs(self.request_timeout)
    }

    // Blank keys count as missing
    pub fn api_key(&self) -> Option<String> {
        self.api_key
            .as_deref()
            .map(str::trim)
            .filter(|key| !key.is_empty())
            .map(str::to_string)
    }
}
