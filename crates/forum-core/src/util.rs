use getrandom::fill;

pub fn random_bytes(len: usize) -> Vec<u8> {
    let mut out = vec![0u8; len];
    fill(&mut out).expect("Failed to generate random bytes");
    out
}

pub fn hex_encode(bytes: &[u8]) -> String {
    const LUT: &[u8; 16] = b"0123456789abcdef";
    let mut out = String::with_capacity(bytes.len() * 2);
    for b in bytes {
        out.push(LUT[(b >> 4) as usize] as char);
        out.push(LUT[(b & 0x0f) as usize] as char);
    }
    out
}

/// Generate a UUIDv4 string without pulling in an additional dependency.
/// Format: 8-4-4-4-12 hex characters.
pub fn uuid_v4() -> String {
    let mut b = random_bytes(16);

    // Set version = 4.
    b[6] = (b[6] & 0x0f) | 0x40;
    // Set variant = RFC4122.
    b[8] = (b[8] & 0x3f) | 0x80;

    const LUT: &[u8; 16] = b"0123456789abcdef";
    let mut out = String::with_capacity(36);

    for (i, byte) in b.iter().enumerate() {
        if i == 4 || i == 6 || i == 8 || i == 10 {
            out.push('-');
        }
        out.push(LUT[(byte >> 4) as usize] as char);
        out.push(LUT[(byte & 0x0f) as usize] as char);
    }

    out
}

const SEED_LEN: usize = 12;
const SEED_ALPHABET: &[u8; 62] =
    b"ABCDEFGHIJKLMNOPQRSTUVWXYZabcdefghijklmnopqrstuvwxyz0123456789";

/// 12-character token seed drawn uniformly from the alphanumeric alphabet.
pub fn random_seed() -> String {
    let mut out = String::with_capacity(SEED_LEN);
    while out.len() < SEED_LEN {
        for byte in random_bytes(SEED_LEN) {
            // 248 = 4 * 62; bytes above that are rejected so the modulo
            // stays uniform over the alphabet.
            if (byte as usize) < SEED_ALPHABET.len() * 4 {
                out.push(SEED_ALPHABET[byte as usize % SEED_ALPHABET.len()] as char);
                if out.len() == SEED_LEN {
                    break;
                }
            }
        }
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn hex_encodes_nibbles_in_order() {
        assert_eq!(hex_encode(&[]), "");
        assert_eq!(hex_encode(&[0x00, 0xff, 0x1a]), "00ff1a");
    }

    #[test]
    fn uuid_has_v4_shape() {
        let id = uuid_v4();
        assert_eq!(id.len(), 36);

        let bytes = id.as_bytes();
        assert_eq!(bytes[8], b'-');
        assert_eq!(bytes[13], b'-');
        assert_eq!(bytes[18], b'-');
        assert_eq!(bytes[23], b'-');
        assert_eq!(bytes[14], b'4');
    }

    #[test]
    fn seed_is_twelve_alphanumerics() {
        let seed = random_seed();
        assert_eq!(seed.len(), 12);
        assert!(seed.chars().all(|c| c.is_ascii_alphanumeric()));
    }

    #[test]
    fn seeds_differ_between_draws() {
        assert_ne!(random_seed(), random_seed());
    }
}
