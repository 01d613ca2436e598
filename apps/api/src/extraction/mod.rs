// JSON extraction from LLM replies: the span-pattern cascade, the tolerant
// repair fallback, and the upload pipeline driving the bounded attempt loop.

pub mod handlers;
pub mod parser;
pub mod pipeline;
pub mod repair;
