use core::future::Future;

/// A model that turns retrieved context into an answer.
///
/// This is the boundary to the language-model collaborator. The core assembles a bounded
/// context from the best matching chunks and hands it over; everything past this call
/// (prompting, network I/O, provider quirks) belongs to the implementation.
///
/// # Example
///
/// ```rust
/// use studybuddy_core::AnswerModel;
///
/// struct FirstLine;
///
/// impl AnswerModel for FirstLine {
///     async fn answer(&self, _question: &str, context: &str) -> anyhow::Result<String> {
///         Ok(context.lines().next().unwrap_or_default().to_string())
///     }
/// }
/// ```
pub trait AnswerModel: Send + Sync {
    /// Answers `question` using only `context`.
    fn answer(
        &self,
        question: &str,
        context: &str,
    ) -> impl Future<Output = anyhow::Result<String>> + Send;
}
