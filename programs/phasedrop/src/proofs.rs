use anchor_lang::solana_program::hash::hashv;

/// Combine two sibling hashes using the sorted-pair rule:
/// `SHA256(min(a, b) || max(a, b))`.
///
/// Ordering by byte value means a proof never needs left/right flags and the
/// resulting root does not depend on which side a sibling sits on.
pub fn hash_pair(a: &[u8; 32], b: &[u8; 32]) -> [u8; 32] {
    if a <= b {
        hashv(&[&a[..], &b[..]]).to_bytes()
    } else {
        hashv(&[&b[..], &a[..]]).to_bytes()
    }
}

/// Fold a leaf hash with every proof element, bottom-up.
pub fn compute_root(leaf: &[u8; 32], proof: &[[u8; 32]]) -> [u8; 32] {
    proof
        .iter()
        .fold(*leaf, |running, sibling| hash_pair(&running, sibling))
}

/// Verifies a Merkle proof against a root.
///
/// This is the only verifier in the protocol. The program calls it before
/// releasing funds and the off-chain tooling calls it to self-check artifacts;
/// a divergence here would not fail loudly, it would just produce a different
/// root, so the golden vectors below pin it down.
pub fn verify_proof(proof: &[[u8; 32]], root: &[u8; 32], leaf: &[u8; 32]) -> bool {
    compute_root(leaf, proof) == *root
}
