use anchor_lang::solana_program::hash::hashv;
use phasedrop::hash_pair;
use rs_merkle::Hasher;

/// Merkle tree hasher that reproduces the on-chain verifier exactly.
///
/// ## Hashing Scheme
///
/// - **Leaf nodes**: `SHA256(phase || claimant || amount_le)`, see `ClaimLeaf::to_hash`.
///   No prefix byte is applied; the leaf encoding is fixed at 41 bytes and the
///   on-chain program hashes the same preimage.
/// - **Internal nodes**: `SHA256(min(a, b) || max(a, b))`. Siblings are ordered by
///   byte value so proofs carry no position bits.
/// - **Unpaired nodes**: a node without a sibling is promoted to the next level
///   unchanged and contributes no proof element.
///
/// `rs_merkle` calls `concat_and_hash` with `right == None` for the last node of
/// an odd-width layer, which is where promotion happens.
#[derive(Clone, Debug)]
pub struct PhaseHasher;

impl Hasher for PhaseHasher {
    type Hash = [u8; 32];

    fn hash(data: &[u8]) -> [u8; 32] {
        hashv(&[data]).to_bytes()
    }

    fn concat_and_hash(left: &Self::Hash, right: Option<&Self::Hash>) -> Self::Hash {
        match right {
            Some(right) => hash_pair(left, right),
            None => *left,
        }
    }
}
