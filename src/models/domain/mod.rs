pub mod question;
pub mod request;
pub mod response;
pub mod roadmap;
pub mod video;

pub use question::{Question, QuestionOption};
pub use request::{Difficulty, GenerationRequest};
pub use response::{GenerationMetadata, GenerationResponse};
pub use roadmap::RoadmapStep;
pub use video::ReferenceVideo;
