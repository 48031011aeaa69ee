// Greetr - greetings in English and Spanish, with chaining
//
// Layout:
// - language: the closed set of supported languages and their message tables
// - greeter: the Greetr state object and its chainable operations
// - sink / document: the two optional collaborators a greeter forwards to
// - config / logging: ambient setup used by the `greetr` binary

pub mod config;
pub mod document;
pub mod error;
pub mod greeter;
pub mod language;
pub mod logging;
pub mod sink;

pub use document::{Element, MemoryDocument, UiInjector};
pub use error::{GreetError, Result};
pub use greeter::{create_greeter, Greetr};
pub use language::Language;
pub use sink::{BufferSink, ConsoleSink, MessageSink, TracingSink};
