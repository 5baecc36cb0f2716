//! Code-assist prompt templates.
//!
//! One table shared by every adapter. Adapters differ only in how they wrap
//! the resulting prompt for their wire format.

use super::request::CodeTask;

/// Sampling temperature used for all code-assist calls.
pub const CODE_ASSIST_TEMPERATURE: f32 = 0.3;

/// Builds the user prompt for a code-assist task.
pub fn code_assist_prompt(task: CodeTask, language: &str, code: &str) -> String {
    match task {
        CodeTask::Explain => format!(
            "Explain this {language} code in detail:\n\n```{language}\n{code}\n```"
        ),
        CodeTask::Debug => format!(
            "Find and fix bugs in this {language} code:\n\n```{language}\n{code}\n```\n\n\
             Provide the corrected code with explanations."
        ),
        CodeTask::Generate => format!(
            "Generate {language} code for:\n\n{code}\n\nProvide clean, well-commented code."
        ),
        CodeTask::Review => format!(
            "Review this {language} code for quality, security, and best practices:\n\n\
             ```{language}\n{code}\n```"
        ),
    }
}

/// System prompt declaring expertise in `language`.
pub fn code_assist_system_prompt(language: &str) -> String {
    format!(
        "You are an expert {language} developer. \
         Provide clear, accurate, and helpful code assistance."
    )
}
