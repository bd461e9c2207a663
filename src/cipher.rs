//! Chart text de-obfuscation.
//!
//! Songbook exports scramble the chord progression with a fixed block
//! transposition applied in 50-character chunks. The transposition is an
//! involution, so the same routine serves as encoder and decoder.

/// Decode an obfuscated chord progression. Total function, no error
/// outcomes.
///
/// While more than 50 characters remain, the next 50-character block is
/// transposed and consumed. A block followed by fewer than 2 characters is
/// passed through unchanged (the encoder never scrambles a block abutting
/// a too-short tail), as is any final tail of 50 characters or fewer.
pub fn decode(text: &str) -> String {
    let chars: Vec<char> = text.chars().collect();
    let mut out = String::with_capacity(text.len());
    let mut rest = &chars[..];
    while rest.len() > 50 {
        let (block, tail) = rest.split_at(50);
        if tail.len() < 2 {
            out.extend(block);
        } else {
            out.push_str(&transpose_block(block));
        }
        rest = tail;
    }
    out.extend(rest);
    out
}

/// Apply the fixed 50-character block transposition.
///
/// The block is split by position into seven segments
/// `A=[0,5) B=[5,10) C=[10,24) D=[24,26) E=[26,40) F=[40,45) G=[45,50)`
/// and reassembled as `rev(G) B rev(E) D rev(C) F rev(A)`. Applying the
/// transposition twice reproduces the input block.
fn transpose_block(block: &[char]) -> String {
    debug_assert_eq!(block.len(), 50);
    let forward = |chars: &[char]| chars.iter().collect::<String>();
    let reversed = |chars: &[char]| chars.iter().rev().collect::<String>();

    let mut out = String::with_capacity(50);
    out.push_str(&reversed(&block[45..50]));
    out.push_str(&forward(&block[5..10]));
    out.push_str(&reversed(&block[26..40]));
    out.push_str(&forward(&block[24..26]));
    out.push_str(&reversed(&block[10..24]));
    out.push_str(&forward(&block[40..45]));
    out.push_str(&reversed(&block[0..5]));
    out
}
