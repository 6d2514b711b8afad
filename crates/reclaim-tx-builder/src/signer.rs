//! Signs the reclaim input with the depositor's key.
//!
//! The depositor address is a key-path-only taproot address (BIP 86), so the key committed to in
//! the reclaim leaf is the depositor's key tweaked with the tagged hash of its own x-only
//! serialization and no merkle root.

use bitcoin::{hashes::Hash, TapSighash};
use secp256k1::{
    schnorr::Signature, Keypair, Message, Scalar, Secp256k1, SecretKey, Signing, Verification,
    XOnlyPublicKey,
};
use tracing::debug;

use crate::{
    errors::{CryptoError, ReclaimTxBuilderResult},
    hashes::{tagged_hash, TaggedHashDomain},
};

/// A tweaked keypair, held only for the duration of signing one transaction.
#[derive(Debug)]
pub struct TweakedSigner {
    keypair: Keypair,
}

impl TweakedSigner {
    /// Tweaks `secret_key` the way a BIP 86 address derives its output key.
    ///
    /// # Errors
    ///
    /// If the tweak is not a valid scalar or tweaking yields the point at infinity.
    pub fn new<C: Signing + Verification>(
        secp: &Secp256k1<C>,
        secret_key: &SecretKey,
    ) -> ReclaimTxBuilderResult<Self> {
        let keypair = Keypair::from_secret_key(secp, secret_key);
        let (internal_key, _) = keypair.x_only_public_key();

        let tweak = tagged_hash(TaggedHashDomain::TapTweak, &internal_key.serialize());
        let tweak = Scalar::from_be_bytes(tweak).map_err(|_e| CryptoError::InvalidTweak)?;

        let keypair = keypair
            .add_xonly_tweak(secp, &tweak)
            .map_err(|_e| CryptoError::InvalidTweak)?;

        Ok(Self { keypair })
    }

    /// The tweaked x-only public key, i.e., the output key of the depositor address.
    pub fn x_only_public_key(&self) -> XOnlyPublicKey {
        self.keypair.x_only_public_key().0
    }

    /// Produces a BIP 340 signature over `sighash`.
    ///
    /// No auxiliary randomness is used so the same transaction always gets the same signature.
    pub fn sign<C: Signing>(&self, secp: &Secp256k1<C>, sighash: &TapSighash) -> Signature {
        let message = Message::from_digest(sighash.to_byte_array());
        let signature = secp.sign_schnorr_no_aux_rand(&message, &self.keypair);

        debug!(%sighash, pubkey = %self.x_only_public_key(), "signed sighash");

        signature
    }
}

#[cfg(test)]
mod tests {
    use bitcoin::{
        hex::{Case, DisplayHex, FromHex},
        key::TapTweak,
    };
    use strata_test_utils::reclaim::{
        generate_keypairs, test_secret_key, TEST_DEPOSITOR_KEY, TEST_RECLAIM_SIGHASH,
    };

    use super::*;

    #[test]
    fn test_tweaked_key_is_depositor_key() {
        let secp = Secp256k1::new();
        let signer = TweakedSigner::new(&secp, &test_secret_key()).unwrap();

        assert_eq!(
            signer.x_only_public_key().to_string(),
            TEST_DEPOSITOR_KEY,
            "tweaked key should be the program of the depositor address"
        );
    }

    #[test]
    fn test_tweak_matches_rust_bitcoin() {
        let secp = Secp256k1::new();
        let (_, secret_keys) = generate_keypairs(8);

        for secret_key in secret_keys {
            let signer = TweakedSigner::new(&secp, &secret_key).unwrap();
            let expected = Keypair::from_secret_key(&secp, &secret_key)
                .tap_tweak(&secp, None)
                .to_inner();

            assert_eq!(
                signer.x_only_public_key(),
                expected.x_only_public_key().0,
                "tweak should agree with rust-bitcoin for keys of either parity"
            );
        }
    }

    #[test]
    fn test_sign_reclaim_sighash() {
        let secp = Secp256k1::new();
        let sighash =
            TapSighash::from_byte_array(<[u8; 32]>::from_hex(TEST_RECLAIM_SIGHASH).unwrap());

        let signer = TweakedSigner::new(&secp, &test_secret_key()).unwrap();
        let pubkey = signer.x_only_public_key();
        let signature = signer.sign(&secp, &sighash);

        assert_eq!(
            signature.serialize().as_slice().to_hex_string(Case::Lower),
            concat!(
                "ad222c0162b5e305860fbf49884f10582efd0c36b632fb1bcf45a271c0f0ed44",
                "b58e47b6b41b87453cf88707356af625a4d59d27a65493dc0c2607f76f1272cd"
            )
        );
        assert!(secp
            .verify_schnorr(
                &signature,
                &Message::from_digest(sighash.to_byte_array()),
                &pubkey
            )
            .is_ok());
    }

    #[test]
    fn test_signing_is_deterministic() {
        let secp = Secp256k1::new();
        let sighash = TapSighash::from_byte_array([42u8; 32]);

        let first = TweakedSigner::new(&secp, &test_secret_key())
            .unwrap()
            .sign(&secp, &sighash);
        let second = TweakedSigner::new(&secp, &test_secret_key())
            .unwrap()
            .sign(&secp, &sighash);

        assert_eq!(first, second);
    }
}
