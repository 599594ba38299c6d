//! Stable short hashes for class, variable and animation names.
//!
//! MurmurHash2 (32-bit, seed 1) over the low byte of each UTF-16 code unit,
//! rendered in base 36. Identical input must produce identical names across
//! runs and platforms: every shipped class name depends on it.

const SEED: u32 = 1;
const M: u32 = 0x5bd1_e995;

/// Hash a string into a short base-36 token.
pub fn hash(input: &str) -> String {
    to_base36(murmurhash2(input, SEED))
}

fn murmurhash2(input: &str, seed: u32) -> u32 {
    let bytes: Vec<u32> = input.encode_utf16().map(|unit| u32::from(unit & 0xff)).collect();
    let mut len = bytes.len();
    let mut h = seed ^ (len as u32);
    let mut i = 0;

    while len >= 4 {
        let mut k = bytes[i] | (bytes[i + 1] << 8) | (bytes[i + 2] << 16) | (bytes[i + 3] << 24);
        k = k.wrapping_mul(M);
        k ^= k >> 24;
        k = k.wrapping_mul(M);
        h = h.wrapping_mul(M) ^ k;
        len -= 4;
        i += 4;
    }

    if len == 3 {
        h ^= bytes[i + 2] << 16;
    }
    if len >= 2 {
        h ^= bytes[i + 1] << 8;
    }
    if len >= 1 {
        h ^= bytes[i];
        h = h.wrapping_mul(M);
    }

    h ^= h >> 13;
    h = h.wrapping_mul(M);
    h ^= h >> 15;
    h
}

fn to_base36(mut n: u32) -> String {
    const DIGITS: &[u8; 36] = b"0123456789abcdefghijklmnopqrstuvwxyz";
    if n == 0 {
        return "0".to_string();
    }
    let mut out = Vec::new();
    while n > 0 {
        out.push(DIGITS[(n % 36) as usize]);
        n /= 36;
    }
    out.reverse();
    String::from_utf8(out).unwrap_or_default()
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn test_known_class_hashes() {
        assert_eq!(hash("<>background-colorrednull"), "rkmrrc");
        assert_eq!(hash("<>colorbluenull"), "ju2f9n");
    }

    #[test]
    fn test_hash_is_deterministic() {
        assert_eq!(hash("abc"), hash("abc"));
        assert_ne!(hash("abc"), hash("abd"));
    }

    #[test]
    fn test_tail_lengths() {
        // Exercise the 1, 2 and 3 byte tails.
        let hashes: Vec<String> = ["a", "ab", "abc", "abcd", "abcde"]
            .iter()
            .map(|s| hash(s))
            .collect();
        for (i, a) in hashes.iter().enumerate() {
            for b in &hashes[i + 1..] {
                assert_ne!(a, b);
            }
        }
    }

    #[test]
    fn test_base36() {
        assert_eq!(to_base36(0), "0");
        assert_eq!(to_base36(35), "z");
        assert_eq!(to_base36(36), "10");
    }
}
