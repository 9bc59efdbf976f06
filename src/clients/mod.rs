pub mod expertvoice_client;
pub mod learning_api;

pub use expertvoice_client::{endpoints, ExpertVoiceClient};
pub use learning_api::LearningApi;
