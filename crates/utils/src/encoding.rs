use base64::{engine::general_purpose::STANDARD, Engine as _};
use encoding_rs::{Encoding, UTF_8};

/// Encodes raw bytes with the standard (padded) base64 alphabet
pub fn to_base64(bytes: &[u8]) -> String {
    STANDARD.encode(bytes)
}

/// Decodes bytes as text, defaulting to UTF-8.
///
/// A leading byte order mark is kept as content rather than used to switch
/// encodings; malformed sequences become U+FFFD.
pub fn decode_text(bytes: &[u8], encoding: Option<&'static Encoding>) -> String {
    let encoding = encoding.unwrap_or(UTF_8);
    let (text, _) = encoding.decode_without_bom_handling(bytes);
    text.into_owned()
}
