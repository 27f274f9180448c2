use std::path::PathBuf;
use std::sync::Arc;

use crate::config::Args;
use crate::rate_limit::RateLimiter;
use crate::vendor::GenerationApi;

// Fixed vendor parameters for each kind of generation
#[derive(Debug, Clone)]
pub struct GenerationSettings {
    pub image_model: String,
    pub image_size: String,
    pub video_model: String,
    pub video_size: String,
    pub video_quality: String,
    pub video_with_audio: bool,
    pub video_duration: u32,
    pub video_fps: u32,
}

impl GenerationSettings {
    pub fn from_args(args: &Args) -> Self {
        Self {
            image_model: args.image_model.clone(),
            image_size: args.image_size.clone(),
            video_model: args.video_model.clone(),
            video_size: args.video_size.clone(),
            ..Self::default()
        }
    }
}

impl Default for GenerationSettings {
    fn default() -> Self {
        Self {
            image_model: "cogview-3-flash".to_string(),
            image_size: "768x1344".to_string(),
            video_model: "cogvideox-flash".to_string(),
            video_size: "1080x1920".to_string(),
            video_quality: "quality".to_string(),
            video_with_audio: true,
            video_duration: 10,
            video_fps: 30,
        }
    }
}

// app's shared state
pub struct AppState {
    pub api: Arc<dyn GenerationApi>,
    pub video_limiter: Arc<RateLimiter>, // guards /generate-video only
    pub settings: GenerationSettings,
    pub templates_dir: PathBuf,
}

impl AppState {
    pub fn new(
        api: Arc<dyn GenerationApi>,
        video_limiter: Arc<RateLimiter>,
        settings: GenerationSettings,
        templates_dir: PathBuf,
    ) -> Self {
        Self {
            api,
            video_limiter,
            settings,
            templates_dir,
        }
    }
}
