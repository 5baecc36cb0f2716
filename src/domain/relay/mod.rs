//! Relay domain: requests, results, catalog and prompt templates.

mod catalog;
mod prompts;
mod request;
mod result;

pub use catalog::{ModelDescriptor, ProviderDescriptor, Tier};
pub use prompts::{code_assist_prompt, code_assist_system_prompt, CODE_ASSIST_TEMPERATURE};
pub use request::{
    clamp_temperature, parse_temperature, ChatRequest, CodeAssistRequest, CodeTask,
    ImageRequest, ImageSize, DEFAULT_TEMPERATURE, MAX_TEMPERATURE, MIN_TEMPERATURE,
};
pub use result::{Completion, NormalizedResult};
