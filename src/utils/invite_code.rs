use rand::Rng;

/// Alphabet for league invite codes. Skips 0/O/1/I/L so codes survive
/// being read out loud.
const ALPHABET: &[u8] = b"ABCDEFGHJKMNPQRSTUVWXYZ23456789";

pub const CODE_LENGTH: usize = 8;

pub fn generate_invite_code() -> String {
    let mut rng = rand::thread_rng();
    (0..CODE_LENGTH)
        .map(|_| {
            let idx = rng.gen_range(0..ALPHABET.len());
            ALPHABET[idx] as char
        })
        .collect()
}
