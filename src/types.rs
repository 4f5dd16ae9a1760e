//! Fixed-width value types shared by the channel engine, the escrow gateway
//! and the signature layer.

use core::fmt::Debug;

use rand::{distributions::Standard, prelude::Distribution};
use serde::Serialize;
use uint::construct_uint;

macro_rules! impl_hex_debug {
    ($T:ident) => {
        impl Debug for $T {
            fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
                f.write_str("0x")?;
                for b in self.as_ref() {
                    f.write_fmt(format_args!("{:02x}", b))?;
                }
                Ok(())
            }
        }
    };
}

macro_rules! bytesN {
    ( $T:ident, $N:literal ) => {
        #[derive(PartialEq, Eq, PartialOrd, Ord, Hash, Copy, Clone)]
        pub struct $T(pub [u8; $N]);

        impl Serialize for $T {
            fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
            where
                S: serde::Serializer,
            {
                serializer.serialize_bytes(&self.0)
            }
        }

        impl Distribution<$T> for Standard {
            fn sample<R: rand::Rng + ?Sized>(&self, rng: &mut R) -> $T {
                $T(rng.gen())
            }
        }

        impl Default for $T {
            fn default() -> Self {
                Self([0; $N])
            }
        }

        impl AsRef<[u8]> for $T {
            fn as_ref(&self) -> &[u8] {
                &self.0
            }
        }

        impl_hex_debug!($T);
    };
}

bytesN!(Hash, 32);
bytesN!(Address, 20);
bytesN!(Signature, 65);

impl Signature {
    pub fn new(rs: &[u8; 64], v: u8) -> Self {
        let mut sig: Signature = Signature([0; 65]);
        sig.0[..64].copy_from_slice(rs);
        sig.0[64] = v;
        sig
    }
}

// Amounts use a 256-bit unsigned integer so the settlement message can encode
// them in a single 32 byte slot, the width the signing wallets expect.
construct_uint! {
    pub struct U256(4);
}

impl U256 {
    /// Big-endian 32 byte representation, as used in the settlement message.
    pub fn to_be_bytes32(&self) -> [u8; 32] {
        let mut bytes = [0u8; 32];
        self.to_big_endian(&mut bytes);
        bytes
    }
}

impl Serialize for U256 {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: serde::Serializer,
    {
        serializer.serialize_bytes(&self.to_be_bytes32())
    }
}

impl Distribution<U256> for Standard {
    fn sample<R: rand::Rng + ?Sized>(&self, rng: &mut R) -> U256 {
        let buf: [u8; 32] = rng.gen();
        U256::from_big_endian(&buf)
    }
}

/// Maximum length of a [ChannelId] in bytes.
pub const MAX_CHANNEL_ID_LEN: usize = 32;

/// Opaque channel identifier of 1 to 32 bytes.
///
/// Stored inline so records and keys stay `Copy`. Only the first `len` bytes
/// of the buffer are meaningful, the rest is always zero, so the derived
/// equality and hashing agree with comparing the byte slices.
#[derive(PartialEq, Eq, PartialOrd, Ord, Hash, Copy, Clone)]
pub struct ChannelId {
    len: u8,
    bytes: [u8; MAX_CHANNEL_ID_LEN],
}

/// Returned when constructing a [ChannelId] from a slice that is empty or
/// longer than [MAX_CHANNEL_ID_LEN].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ChannelIdLengthError(pub usize);

impl ChannelId {
    pub fn as_bytes(&self) -> &[u8] {
        &self.bytes[..self.len as usize]
    }

    pub fn len(&self) -> usize {
        self.len as usize
    }

    /// Always false, a [ChannelId] holds at least one byte.
    pub fn is_empty(&self) -> bool {
        self.len == 0
    }
}

impl TryFrom<&[u8]> for ChannelId {
    type Error = ChannelIdLengthError;

    fn try_from(value: &[u8]) -> Result<Self, Self::Error> {
        if value.is_empty() || value.len() > MAX_CHANNEL_ID_LEN {
            return Err(ChannelIdLengthError(value.len()));
        }
        let mut bytes = [0u8; MAX_CHANNEL_ID_LEN];
        bytes[..value.len()].copy_from_slice(value);
        Ok(Self {
            len: value.len() as u8,
            bytes,
        })
    }
}

impl AsRef<[u8]> for ChannelId {
    fn as_ref(&self) -> &[u8] {
        self.as_bytes()
    }
}

impl_hex_debug!(ChannelId);

impl Serialize for ChannelId {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: serde::Serializer,
    {
        serializer.serialize_bytes(self.as_bytes())
    }
}
