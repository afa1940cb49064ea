use crate::error::{Error, Result};
use encoding_rs::{EncoderResult, WINDOWS_1252};

/// Converts between display text and the single-byte encoding of the index
/// and corpus files.
///
/// `decode` is total: every byte sequence has a textual form. `encode` only
/// has to succeed for text made of characters the encoding can represent.
pub trait Codec {
    /// Encodes `text` into single-byte form.
    ///
    /// # Errors
    ///
    /// Returns [`Error::UnsupportedCharacter`] for the first character the
    /// encoding cannot represent.
    fn encode(&self, text: &str) -> Result<Vec<u8>>;

    /// Decodes single-byte text for display.
    fn decode(&self, bytes: &[u8]) -> String;
}

/// Windows-1252 ("extended Latin-1"), the encoding of the Swedish corpus.
///
/// Identical to ISO-8859-1 outside `0x80..=0x9F`, where it carries
/// typographic punctuation such as `€`, `–` and curly quotes. The five
/// unassigned bytes decode to the matching C1 control character.
#[derive(Debug, Clone, Copy, Default)]
pub struct Windows1252;

impl Codec for Windows1252 {
    fn encode(&self, text: &str) -> Result<Vec<u8>> {
        let mut encoder = WINDOWS_1252.new_encoder();
        let mut out = Vec::with_capacity(text.len());
        let mut buf = [0u8; 1024];
        let mut src = text;
        loop {
            let (result, read, written) =
                encoder.encode_from_utf8_without_replacement(src, &mut buf, true);
            out.extend_from_slice(&buf[..written]);
            src = &src[read..];
            match result {
                EncoderResult::InputEmpty => return Ok(out),
                EncoderResult::OutputFull => continue,
                EncoderResult::Unmappable(c) => return Err(Error::UnsupportedCharacter(c)),
            }
        }
    }

    fn decode(&self, bytes: &[u8]) -> String {
        WINDOWS_1252
            .decode_without_bom_handling(bytes)
            .0
            .into_owned()
    }
}
