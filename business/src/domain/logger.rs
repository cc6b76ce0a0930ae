/// Logging port used by the basket use cases.
///
/// Messages are plain text; adapters decide on format and sink.
pub trait Logger: Send + Sync {
    fn info(&self, message: &str);
    fn warn(&self, message: &str);
    fn error(&self, message: &str);
    fn debug(&self, message: &str);
}
