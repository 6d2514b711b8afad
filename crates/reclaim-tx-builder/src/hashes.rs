//! BIP 340 tagged hashes.
//!
//! All tagged hashes computed by this crate go through [`tagged_engine`] so that the leaf hash,
//! the key tweak and the signature hash share one construction.

use std::fmt;

use bitcoin::hashes::{sha256, Hash, HashEngine};

/// The domains used to separate tagged hashes.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TaggedHashDomain {
    /// Hash of a single tapscript leaf.
    TapLeaf,

    /// Hash of two sorted child nodes of the script tree.
    TapBranch,

    /// Tweak applied to an internal key.
    TapTweak,

    /// Taproot signature hash.
    TapSighash,
}

impl TaggedHashDomain {
    /// The tag string hashed into the engine midstate.
    pub const fn as_str(&self) -> &'static str {
        match self {
            TaggedHashDomain::TapLeaf => "TapLeaf",
            TaggedHashDomain::TapBranch => "TapBranch",
            TaggedHashDomain::TapTweak => "TapTweak",
            TaggedHashDomain::TapSighash => "TapSighash",
        }
    }
}

impl fmt::Display for TaggedHashDomain {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Creates a SHA256 engine primed with `SHA256(tag) || SHA256(tag)` for the given `domain`.
pub fn tagged_engine(domain: TaggedHashDomain) -> sha256::HashEngine {
    let tag = sha256::Hash::hash(domain.as_str().as_bytes());

    let mut engine = sha256::Hash::engine();
    engine.input(tag.as_byte_array());
    engine.input(tag.as_byte_array());

    engine
}

/// Computes `SHA256(SHA256(tag) || SHA256(tag) || data)`.
pub fn tagged_hash(domain: TaggedHashDomain, data: &[u8]) -> [u8; 32] {
    let mut engine = tagged_engine(domain);
    engine.input(data);

    finalize(engine)
}

/// Finalizes an engine obtained from [`tagged_engine`].
pub fn finalize(engine: sha256::HashEngine) -> [u8; 32] {
    sha256::Hash::from_engine(engine).to_byte_array()
}
