pub mod aggregators;
pub mod config;
pub mod error;
pub mod lookup;
pub mod model;
pub mod output;
pub mod parser;
pub mod stats;
pub mod validate;

pub use aggregators::Report;
pub use config::EngineConfig;
pub use error::{EngineError, EngineResult};
pub use model::{Post, PostRecord, Sentiment, Trend};
