//! The serialized key-share envelope used for session caching.
//!
//! Layout: an ASN.1 INTEGER holding the group id, followed by an ASN.1
//! OCTET STRING holding the private key bytes. The two elements are a plain
//! stream, not wrapped in a SEQUENCE.

use der::asn1::OctetString;
use der::{Decode, Encode, Reader, SliceReader};
use zeroize::Zeroizing;

use tlskex_api::{Error, Result};

pub(crate) fn encode_envelope(group_id: u16, private_key: &[u8]) -> Result<Vec<u8>> {
    let mut out = group_id
        .to_der()
        .map_err(|_| Error::Serialization { context: "group id" })?;
    let key = OctetString::new(private_key)
        .map_err(|_| Error::Serialization { context: "private key octet string" })?;
    let key_der = key
        .to_der()
        .map_err(|_| Error::Serialization { context: "private key octet string" })?;
    out.extend_from_slice(&key_der);
    Ok(out)
}

/// Splits the envelope into the group id and the backend-specific remainder.
/// The INTEGER must fit a u16; anything larger is rejected.
pub(crate) fn split_envelope(input: &[u8]) -> Result<(u16, &[u8])> {
    let mut reader =
        SliceReader::new(input).map_err(|_| Error::Serialization { context: "envelope" })?;
    let group_id =
        u16::decode(&mut reader).map_err(|_| Error::Serialization { context: "envelope group id" })?;
    let consumed = usize::try_from(reader.position())
        .map_err(|_| Error::Serialization { context: "envelope group id" })?;
    Ok((group_id, &input[consumed..]))
}

/// Decodes the OCTET STRING private-key element. Trailing bytes after the
/// element are an error.
pub(crate) fn decode_private_key(input: &[u8]) -> Result<Zeroizing<Vec<u8>>> {
    let key = OctetString::from_der(input)
        .map_err(|_| Error::Serialization { context: "envelope private key" })?;
    Ok(Zeroizing::new(key.as_bytes().to_vec()))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn envelope_round_trips() {
        let encoded = encode_envelope(0x2F3A, &[0xAB; 32]).unwrap();
        let (group_id, rest) = split_envelope(&encoded).unwrap();
        assert_eq!(group_id, 0x2F3A);
        let key = decode_private_key(rest).unwrap();
        assert_eq!(&key[..], &[0xAB; 32]);
    }

    #[test]
    fn group_id_wider_than_u16_is_rejected() {
        let encoded = 0x1_0000u32.to_der().unwrap();
        assert!(split_envelope(&encoded).is_err());
    }

    #[test]
    fn trailing_garbage_after_private_key_is_rejected() {
        let mut encoded = encode_envelope(29, &[0x11; 32]).unwrap();
        encoded.push(0x00);
        let (_, rest) = split_envelope(&encoded).unwrap();
        assert!(decode_private_key(rest).is_err());
    }
}
