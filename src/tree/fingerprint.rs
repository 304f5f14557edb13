//! Structural fingerprints
//!
//! A blake3 digest over the preorder shape: presence markers, keys and
//! cached heights. Two trees with equal fingerprints have the same shape,
//! keys and heights. Diagnostic flags are not part of the digest.

use std::hash::{Hash, Hasher};

use super::node::Link;

/// Adapts `std::hash::Hash` output into a blake3 stream.
struct DigestWriter(blake3::Hasher);

impl Hasher for DigestWriter {
    fn write(&mut self, bytes: &[u8]) {
        self.0.update(bytes);
    }

    fn finish(&self) -> u64 {
        let digest = self.0.finalize();
        let mut head = [0u8; 8];
        head.copy_from_slice(&digest.as_bytes()[..8]);
        u64::from_le_bytes(head)
    }
}

pub(crate) fn fingerprint<K: Hash>(link: &Link<K>) -> blake3::Hash {
    let mut writer = DigestWriter(blake3::Hasher::new());
    feed(link, &mut writer);
    writer.0.finalize()
}

fn feed<K: Hash>(link: &Link<K>, writer: &mut DigestWriter) {
    match link {
        None => writer.write_u8(0),
        Some(node) => {
            writer.write_u8(1);
            node.key.hash(writer);
            writer.write_u64(node.height as u64);
            feed(&node.left, writer);
            feed(&node.right, writer);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::tree::node::Node;

    #[test]
    fn test_shape_sensitive() {
        // Same keys, different shapes
        let mut a = Node::leaf(2);
        a.left = Some(Node::leaf(1));
        a.refresh_height();

        let mut b = Node::leaf(1);
        b.right = Some(Node::leaf(2));
        b.refresh_height();

        assert_ne!(fingerprint(&Some(a.clone())), fingerprint(&Some(b)));
        assert_eq!(fingerprint(&Some(a.clone())), fingerprint(&Some(a)));
    }

    #[test]
    fn test_flags_ignored() {
        let plain = Node::leaf(5);
        let mut flagged = Node::leaf(5);
        flagged.rotated = true;
        assert_eq!(fingerprint(&Some(plain)), fingerprint(&Some(flagged)));
    }
}
