//! Classical ECDH key shares over the NIST prime-order curves.
//!
//! Offers are SEC1 uncompressed points (`0x04 ‖ X ‖ Y`); the shared secret is
//! the x-coordinate of `d·P`, left-padded to the field width. The private
//! scalar is drawn uniformly from `[1, order)` and wiped when the share is
//! finished or dropped.

use elliptic_curve::ecdh::diffie_hellman;
use elliptic_curve::sec1::{EncodedPoint, FromEncodedPoint, ModulusSize, ToEncodedPoint};
use elliptic_curve::{AffinePoint, CurveArithmetic, FieldBytes, FieldBytesSize, PublicKey, SecretKey};
use rand::{CryptoRng, RngCore};
use zeroize::{Zeroize, Zeroizing};

use tlskex_api::{Error, Result, SharedSecret};
use tlskex_params::CurveId;

use crate::serialize;

const SEC1_UNCOMPRESSED: u8 = 0x04;

/// Private scalar for one of the supported curves.
enum EcPrivateKey {
    P224(SecretKey<p224::NistP224>),
    P256(SecretKey<p256::NistP256>),
    P384(SecretKey<p384::NistP384>),
    P521(SecretKey<p521::NistP521>),
}

pub struct EcKeyShare {
    curve: CurveId,
    group_id: u16,
    private_key: Option<EcPrivateKey>,
}

fn generate<C, R>(rng: &mut R) -> Result<(SecretKey<C>, Vec<u8>)>
where
    C: CurveArithmetic,
    AffinePoint<C>: FromEncodedPoint<C> + ToEncodedPoint<C>,
    FieldBytesSize<C>: ModulusSize,
    R: CryptoRng + RngCore,
{
    // Rejection-sample the scalar: from_bytes refuses zero and anything at
    // or above the order, so looping gives a uniform draw from [1, order).
    let mut bytes = FieldBytes::<C>::default();
    let private_key = loop {
        rng.try_fill_bytes(bytes.as_mut_slice())
            .map_err(|_| Error::RandomGeneration { context: "EC private scalar" })?;
        if let Ok(key) = SecretKey::<C>::from_bytes(&bytes) {
            break key;
        }
    };
    bytes.as_mut_slice().zeroize();
    let offer = private_key
        .public_key()
        .to_encoded_point(false)
        .as_bytes()
        .to_vec();
    Ok((private_key, offer))
}

fn agree<C>(private_key: &SecretKey<C>, peer_key: &[u8]) -> Result<SharedSecret>
where
    C: CurveArithmetic,
    AffinePoint<C>: FromEncodedPoint<C> + ToEncodedPoint<C>,
    FieldBytesSize<C>: ModulusSize,
{
    let point = EncodedPoint::<C>::from_bytes(peer_key)
        .map_err(|_| Error::BadPeerKey { context: "EC peer point" })?;
    let peer_public = Option::<PublicKey<C>>::from(PublicKey::<C>::from_encoded_point(&point))
        .ok_or(Error::BadPeerKey { context: "EC peer point" })?;
    let shared = diffie_hellman(private_key.to_nonzero_scalar(), peer_public.as_affine());
    Ok(SharedSecret::new(shared.raw_secret_bytes().as_slice().to_vec()))
}

impl EcKeyShare {
    pub(crate) fn new(curve: CurveId, group_id: u16) -> Self {
        EcKeyShare { curve, group_id, private_key: None }
    }

    pub fn group_id(&self) -> u16 {
        self.group_id
    }

    pub fn curve(&self) -> CurveId {
        self.curve
    }

    pub fn offer<R: CryptoRng + RngCore>(&mut self, rng: &mut R) -> Result<Vec<u8>> {
        if self.private_key.is_some() {
            return Err(Error::InvalidState { context: "offer on a share that already holds a key" });
        }
        let (private_key, offer) = match self.curve {
            CurveId::Secp224r1 => {
                let (key, offer) = generate::<p224::NistP224, _>(rng)?;
                (EcPrivateKey::P224(key), offer)
            }
            CurveId::Secp256r1 => {
                let (key, offer) = generate::<p256::NistP256, _>(rng)?;
                (EcPrivateKey::P256(key), offer)
            }
            CurveId::Secp384r1 => {
                let (key, offer) = generate::<p384::NistP384, _>(rng)?;
                (EcPrivateKey::P384(key), offer)
            }
            CurveId::Secp521r1 => {
                let (key, offer) = generate::<p521::NistP521, _>(rng)?;
                (EcPrivateKey::P521(key), offer)
            }
        };
        self.private_key = Some(private_key);
        Ok(offer)
    }

    pub fn finish(&mut self, peer_key: &[u8]) -> Result<SharedSecret> {
        let private_key = self
            .private_key
            .as_ref()
            .ok_or(Error::InvalidState { context: "finish before offer or deserialize" })?;

        // Only the uncompressed form is accepted, even where the compressed
        // form would parse.
        if peer_key.first() != Some(&SEC1_UNCOMPRESSED) {
            return Err(Error::BadPeerKey { context: "EC peer point" });
        }

        let secret = match private_key {
            EcPrivateKey::P224(key) => agree(key, peer_key),
            EcPrivateKey::P256(key) => agree(key, peer_key),
            EcPrivateKey::P384(key) => agree(key, peer_key),
            EcPrivateKey::P521(key) => agree(key, peer_key),
        }?;
        self.private_key = None;
        Ok(secret)
    }

    pub fn serialize(&self) -> Result<Vec<u8>> {
        let private_key = self
            .private_key
            .as_ref()
            .ok_or(Error::InvalidState { context: "serialize before offer" })?;

        // The fixed-width scalar encoding pads to the order width, so the
        // envelope length says nothing about the scalar's magnitude.
        let scalar: Zeroizing<Vec<u8>> = match private_key {
            EcPrivateKey::P224(key) => Zeroizing::new(key.to_bytes().as_slice().to_vec()),
            EcPrivateKey::P256(key) => Zeroizing::new(key.to_bytes().as_slice().to_vec()),
            EcPrivateKey::P384(key) => Zeroizing::new(key.to_bytes().as_slice().to_vec()),
            EcPrivateKey::P521(key) => Zeroizing::new(key.to_bytes().as_slice().to_vec()),
        };
        serialize::encode_envelope(self.group_id, &scalar)
    }

    pub fn deserialize(&mut self, input: &[u8]) -> Result<()> {
        if self.private_key.is_some() {
            return Err(Error::InvalidState { context: "deserialize on a share that already holds a key" });
        }
        let scalar = serialize::decode_private_key(input)?;
        if scalar.len() != self.curve.field_bytes() {
            return Err(Error::Serialization { context: "EC private key width" });
        }
        let bad_scalar = Error::Serialization { context: "EC private key scalar" };
        let private_key = match self.curve {
            CurveId::Secp224r1 => {
                EcPrivateKey::P224(SecretKey::from_slice(&scalar).map_err(|_| bad_scalar)?)
            }
            CurveId::Secp256r1 => {
                EcPrivateKey::P256(SecretKey::from_slice(&scalar).map_err(|_| bad_scalar)?)
            }
            CurveId::Secp384r1 => {
                EcPrivateKey::P384(SecretKey::from_slice(&scalar).map_err(|_| bad_scalar)?)
            }
            CurveId::Secp521r1 => {
                EcPrivateKey::P521(SecretKey::from_slice(&scalar).map_err(|_| bad_scalar)?)
            }
        };
        self.private_key = Some(private_key);
        Ok(())
    }
}
