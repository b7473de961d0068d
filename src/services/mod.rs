pub mod generation_service;
pub mod metadata_service;
pub mod model_service;
pub mod repair_service;
pub mod request_service;
pub mod video_service;
