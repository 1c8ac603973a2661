pub mod error;
pub mod extract;
pub mod message;
pub mod normalize;
pub mod pair;
pub mod prompt;
pub mod window;

pub use error::{CoreError, Result};
pub use extract::{Extractor, ExtractorConfig};
pub use message::{ChatLog, Fragment, MessageKind, MessageText, RawMessage};
pub use normalize::{normalize, normalize_str};
pub use pair::TrainingPair;
pub use prompt::PromptTemplate;
pub use window::ContextWindow;
