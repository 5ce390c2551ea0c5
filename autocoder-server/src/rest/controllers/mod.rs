pub mod completion;

pub use completion::CompletionController;
