pub mod chat;
pub mod openai;
pub mod traits;

pub use chat::{ChatMessage, ChatReply, FunctionCall, FunctionSpec, Role};
pub use openai::openai::OpenAIProvider;
pub use traits::CompletionProvider;
