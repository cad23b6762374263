/// Receives page-batch progress from the PDF loader.
///
/// Called once per completed batch with the number of pages processed so far and the
/// total page count. Implementations are for feedback only; they cannot influence
/// extraction.
pub trait BatchProgress {
    /// A batch finished; `done` of `total` pages are extracted.
    fn on_batch_progress(&mut self, done: usize, total: usize);
}

impl<F> BatchProgress for F
where
    F: FnMut(usize, usize),
{
    fn on_batch_progress(&mut self, done: usize, total: usize) {
        self(done, total);
    }
}
