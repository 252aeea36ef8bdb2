//! Application service layer - config, image loading, analysis session

pub mod app;
pub mod config;
pub mod menu_image;
pub mod session;

pub use app::{AnalysisOutcome, AnalysisService};
pub use config::Config;
pub use menu_image::load_menu_image;
pub use session::{AnalysisRequest, AnalysisSession};
