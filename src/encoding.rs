//! Packed canonical encoding used to build the messages parties sign.
//!
//! Values are written field by field into a [Writer], without padding or
//! length prefixes. Fixed-width types are written in big-endian order, byte
//! strings as-is. This is only unambiguous when at most one field has a
//! variable width, which callers must ensure by hashing variable-width fields
//! down to a digest before encoding.
//!
//! Only the subset of the serde data model needed for flat structs of bytes
//! and integers is supported. Everything else is rejected with
//! [Error::TypeNotRepresentable] instead of silently picking a representation.

use core::fmt::Display;

use serde::{
    ser::{self, Impossible, SerializeStruct, SerializeTuple},
    Serialize,
};
use sha3::{Digest, Keccak256};
use thiserror::Error;

use crate::types::Hash;

/// Represents all possible errors that can happen during encoding.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum Error {
    /// The value contains a type with no canonical packed representation, for
    /// example floats, strings, enums or maps.
    #[error("type is not representable in packed encoding: {0}")]
    TypeNotRepresentable(&'static str),
    #[error("{0}")]
    Custom(String),
}

impl ser::Error for Error {
    fn custom<T>(msg: T) -> Self
    where
        T: Display,
    {
        Error::Custom(msg.to_string())
    }
}

pub type Result<T> = core::result::Result<T, Error>;

/// Sink for encoded bytes.
pub trait Writer {
    fn write(&mut self, bytes: &[u8]);
}

impl Writer for Vec<u8> {
    fn write(&mut self, bytes: &[u8]) {
        self.extend_from_slice(bytes);
    }
}

#[derive(Default)]
pub struct Keccak256Writer {
    hasher: Keccak256,
}

impl Writer for Keccak256Writer {
    fn write(&mut self, bytes: &[u8]) {
        self.hasher.update(bytes);
    }
}

impl Keccak256Writer {
    pub fn finalize(self) -> Hash {
        Hash(self.hasher.finalize().into())
    }
}

pub struct Serializer<'w, W: Writer> {
    writer: &'w mut W,
}

impl<'w, W: Writer> Serializer<'w, W> {
    pub fn new(writer: &'w mut W) -> Self {
        Self { writer }
    }
}

/// Encode `value` into `writer`.
pub fn to_writer<T, W>(value: &T, writer: &mut W) -> Result<()>
where
    T: Serialize + ?Sized,
    W: Writer,
{
    value.serialize(&mut Serializer::new(writer))
}

/// Encode `value` into a fresh byte vector.
pub fn to_bytes<T>(value: &T) -> Result<Vec<u8>>
where
    T: Serialize + ?Sized,
{
    let mut buf = Vec::new();
    to_writer(value, &mut buf)?;
    Ok(buf)
}

/// Keccak-256 of the packed encoding of `value`.
pub fn to_hash<T>(value: &T) -> Result<Hash>
where
    T: Serialize + ?Sized,
{
    let mut writer = Keccak256Writer::default();
    to_writer(value, &mut writer)?;
    Ok(writer.finalize())
}

macro_rules! not_representable {
    ($($method:ident($($ty:ty),*) => $name:literal;)*) => {
        $(
            fn $method(self, $(_: $ty),*) -> Result<()> {
                Err(Error::TypeNotRepresentable($name))
            }
        )*
    };
}

impl<'a, 'w, W: Writer> ser::Serializer for &'a mut Serializer<'w, W> {
    type Ok = ();
    type Error = Error;

    type SerializeSeq = Impossible<(), Error>;
    type SerializeTuple = Self;
    type SerializeTupleStruct = Impossible<(), Error>;
    type SerializeTupleVariant = Impossible<(), Error>;
    type SerializeMap = Impossible<(), Error>;
    type SerializeStruct = Self;
    type SerializeStructVariant = Impossible<(), Error>;

    fn serialize_bool(self, v: bool) -> Result<()> {
        self.writer.write(&[v as u8]);
        Ok(())
    }

    fn serialize_u8(self, v: u8) -> Result<()> {
        self.writer.write(&[v]);
        Ok(())
    }

    fn serialize_u16(self, v: u16) -> Result<()> {
        self.writer.write(&v.to_be_bytes());
        Ok(())
    }

    fn serialize_u32(self, v: u32) -> Result<()> {
        self.writer.write(&v.to_be_bytes());
        Ok(())
    }

    fn serialize_u64(self, v: u64) -> Result<()> {
        self.writer.write(&v.to_be_bytes());
        Ok(())
    }

    fn serialize_u128(self, v: u128) -> Result<()> {
        self.writer.write(&v.to_be_bytes());
        Ok(())
    }

    fn serialize_bytes(self, v: &[u8]) -> Result<()> {
        self.writer.write(v);
        Ok(())
    }

    fn serialize_newtype_struct<T>(self, _name: &'static str, value: &T) -> Result<()>
    where
        T: Serialize + ?Sized,
    {
        value.serialize(self)
    }

    fn serialize_tuple(self, _len: usize) -> Result<Self::SerializeTuple> {
        Ok(self)
    }

    fn serialize_struct(self, _name: &'static str, _len: usize) -> Result<Self::SerializeStruct> {
        Ok(self)
    }

    not_representable! {
        serialize_i8(i8) => "i8";
        serialize_i16(i16) => "i16";
        serialize_i32(i32) => "i32";
        serialize_i64(i64) => "i64";
        serialize_f32(f32) => "f32";
        serialize_f64(f64) => "f64";
        serialize_char(char) => "char";
        serialize_str(&str) => "str";
        serialize_none() => "option";
        serialize_unit() => "unit";
        serialize_unit_struct(&'static str) => "unit struct";
        serialize_unit_variant(&'static str, u32, &'static str) => "enum";
    }

    fn serialize_some<T>(self, _value: &T) -> Result<()>
    where
        T: Serialize + ?Sized,
    {
        Err(Error::TypeNotRepresentable("option"))
    }

    fn serialize_newtype_variant<T>(
        self,
        _name: &'static str,
        _variant_index: u32,
        _variant: &'static str,
        _value: &T,
    ) -> Result<()>
    where
        T: Serialize + ?Sized,
    {
        Err(Error::TypeNotRepresentable("enum"))
    }

    fn serialize_seq(self, _len: Option<usize>) -> Result<Self::SerializeSeq> {
        Err(Error::TypeNotRepresentable("sequence"))
    }

    fn serialize_tuple_struct(
        self,
        _name: &'static str,
        _len: usize,
    ) -> Result<Self::SerializeTupleStruct> {
        Err(Error::TypeNotRepresentable("tuple struct"))
    }

    fn serialize_tuple_variant(
        self,
        _name: &'static str,
        _variant_index: u32,
        _variant: &'static str,
        _len: usize,
    ) -> Result<Self::SerializeTupleVariant> {
        Err(Error::TypeNotRepresentable("enum"))
    }

    fn serialize_map(self, _len: Option<usize>) -> Result<Self::SerializeMap> {
        Err(Error::TypeNotRepresentable("map"))
    }

    fn serialize_struct_variant(
        self,
        _name: &'static str,
        _variant_index: u32,
        _variant: &'static str,
        _len: usize,
    ) -> Result<Self::SerializeStructVariant> {
        Err(Error::TypeNotRepresentable("enum"))
    }
}

impl<'a, 'w, W: Writer> SerializeTuple for &'a mut Serializer<'w, W> {
    type Ok = ();
    type Error = Error;

    fn serialize_element<T>(&mut self, value: &T) -> Result<()>
    where
        T: Serialize + ?Sized,
    {
        value.serialize(&mut **self)
    }

    fn end(self) -> Result<()> {
        Ok(())
    }
}

impl<'a, 'w, W: Writer> SerializeStruct for &'a mut Serializer<'w, W> {
    type Ok = ();
    type Error = Error;

    fn serialize_field<T>(&mut self, _key: &'static str, value: &T) -> Result<()>
    where
        T: Serialize + ?Sized,
    {
        value.serialize(&mut **self)
    }

    fn end(self) -> Result<()> {
        Ok(())
    }
}
