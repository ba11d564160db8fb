use {
    super::{SLOT_COUNT, Slot},
    crc::{CRC_16_XMODEM, Crc},
};

/// CRC16 (XMODEM variant) used by cluster-aware clients to map keys to slots.
static CRC16: Crc<u16> = Crc::<u16>::new(&CRC_16_XMODEM);

/// Returns the hash slot a key is assigned to.
///
/// When the key holds a hash tag, i.e. a non-empty section between the first
/// `{` and the next `}`, only the tag is hashed. This way related keys can be
/// forced into the same slot.
pub fn key_slot<K: AsRef<[u8]>>(key: K) -> Slot {
    CRC16.checksum(hash_tag(key.as_ref())) % SLOT_COUNT
}

fn hash_tag(key: &[u8]) -> &[u8] {
    let Some(open) = key.iter().position(|b| *b == b'{') else {
        return key;
    };
    match key[open + 1..].iter().position(|b| *b == b'}') {
        Some(len) if len > 0 => &key[open + 1..open + 1 + len],
        _ => key,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn sanity_checks() {
        // Output must stay compatible with cluster servers.
        assert_eq!(key_slot("123456789"), 0x31C3);
        assert_eq!(key_slot("foo"), 12182);
        assert_eq!(key_slot(b"foo"), key_slot("foo".to_string()));

        for i in 0..1000 {
            assert!(key_slot(format!("key:{i}")) < SLOT_COUNT);
        }
    }

    #[test]
    fn hash_tags() {
        assert_eq!(key_slot("{user1000}.following"), key_slot("user1000"));
        assert_eq!(
            key_slot("{user1000}.following"),
            key_slot("{user1000}.followers")
        );

        // Empty tag: the whole key is hashed.
        assert_eq!(hash_tag(b"foo{}{bar}"), b"foo{}{bar}");
        // Only the first tag counts.
        assert_eq!(hash_tag(b"foo{{bar}}zap"), b"{bar");
        assert_eq!(hash_tag(b"foo{bar}{zap}"), b"bar");
        // Unterminated tag.
        assert_eq!(hash_tag(b"foo{bar"), b"foo{bar");
    }
}
