use encoding_rs::{Encoding, UTF_8, WINDOWS_1252};
use studybuddy_core::ProcessingError;

/// Decodes a plain-text upload.
///
/// A byte-order mark selects UTF-8 or UTF-16. Without one the bytes are decoded as strict
/// UTF-8, falling back to Latin-1 (windows-1252), which accepts any byte sequence.
///
/// # Errors
/// [`ProcessingError::EmptyText`] if nothing but whitespace remains.
pub fn read_text_bytes(bytes: &[u8]) -> Result<String, ProcessingError> {
    let text = if let Some((encoding, bom_len)) = Encoding::for_bom(bytes) {
        let (decoded, _) = encoding.decode_without_bom_handling(&bytes[bom_len..]);
        decoded.into_owned()
    } else if let Some(decoded) = UTF_8.decode_without_bom_handling_and_without_replacement(bytes)
    {
        decoded.into_owned()
    } else {
        tracing::debug!(len = bytes.len(), "text is not valid UTF-8, decoding as Latin-1");
        let (decoded, _) = WINDOWS_1252.decode_without_bom_handling(bytes);
        decoded.into_owned()
    };

    if text.trim().is_empty() {
        return Err(ProcessingError::EmptyText);
    }
    Ok(text)
}
