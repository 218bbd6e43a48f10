//! Intent module: utterance normalization and classification
//!
//! Turns a transcribed utterance into one of a closed set of intents:
//! - normalize: fixes common mis-hearings ("sweet" -> "suite")
//! - classify: ordered keyword rule table

mod classifier;
mod normalize;
mod types;

pub use classifier::classify;
pub use normalize::normalize;
pub use types::{FaqTopic, Intent, RoomType};
