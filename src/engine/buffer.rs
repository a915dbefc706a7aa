// Fri Oct 16 2026 - Alex

/// Borrows each text fragment as bytes. Only the outer `Vec` is allocated;
/// the views cannot outlive `fragments`.
pub fn to_views<S: AsRef<str>>(fragments: &[S]) -> Vec<&[u8]> {
    fragments.iter().map(|f| f.as_ref().as_bytes()).collect()
}
