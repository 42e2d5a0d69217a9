//! Client-side document IDs, matching the shape Firestore SDKs generate.

use roof_core::StoreError;

const AUTO_ID_ALPHABET: &[u8] = b"ABCDEFGHIJKLMNOPQRSTUVWXYZabcdefghijklmnopqrstuvwxyz0123456789";
const AUTO_ID_LEN: usize = 20;

/// Generate a random 20-character alphanumeric document ID.
///
/// # Errors
///
/// Returns `StoreError::Write` if the OS random source is unavailable.
pub fn generate() -> Result<String, StoreError> {
    // Rejection sampling keeps the distribution uniform over the 62 symbols.
    let limit = u8::MAX - (u8::MAX % 62) - 1;
    let mut id = String::with_capacity(AUTO_ID_LEN);
    let mut buf = [0u8; 32];

    while id.len() < AUTO_ID_LEN {
        getrandom::fill(&mut buf)
            .map_err(|e| StoreError::Write(format!("failed to generate document id: {e}")))?;
        for byte in buf {
            if byte <= limit && id.len() < AUTO_ID_LEN {
                id.push(char::from(AUTO_ID_ALPHABET[usize::from(byte % 62)]));
            }
        }
    }

    Ok(id)
}
