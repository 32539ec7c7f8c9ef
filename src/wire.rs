//! Bit-exact wire format.
//!
//! ```text
//! integer word   F iiiiiiiiiiiiiii      F = terms follow, i = 15-bit two's complement
//! term word      nnnnnnnn L ooooooo     n = numerator, L = last term, o = denominator - 128
//! ```
//!
//! Words are written big-endian. A value is `2 + 2 * terms` bytes. The term
//! count is never stored: the reader scans for the `L` bit, or stops after
//! [`MAX_TERMS`] words.
//!
//! The flag occupies bit 15, which a native `i16` would use as its sign. The
//! integer is therefore never read by casting the word; bits 14..0 are masked
//! out and sign-extended from bit 14.

use std::io::{self, Cursor, Read, Write};
use std::ops::Deref;

use byteorder::{BigEndian, ByteOrder, ReadBytesExt, WriteBytesExt};

use crate::error::{Error, Result};
use crate::term::{Term, Terms, MAX_TERMS};
use crate::value::EncodedValue;

/// Bit 15 of the integer word: at least one term follows.
pub const TERMS_FLAG: u16 = 0x8000;

/// Bits 14..0 of the integer word.
pub const INTEGER_MASK: u16 = 0x7FFF;

const INTEGER_SIGN: u16 = 0x4000;

/// Bit 7 of a term's low byte: this is the final term.
pub const LAST_TERM: u8 = 0x80;

/// Bits 6..0 of a term's low byte.
pub const OFFSET_MASK: u8 = 0x7F;

/// Longest possible encoding in bytes.
pub const MAX_PACKED_LEN: usize = 2 + 2 * MAX_TERMS;

/// An encoded value on the stack. Dereferences to its bytes.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Packed {
    bytes: [u8; MAX_PACKED_LEN],
    len: usize,
}

impl Packed {
    /// The encoded bytes.
    pub fn as_bytes(&self) -> &[u8] {
        &self.bytes[..self.len]
    }
}

impl Deref for Packed {
    type Target = [u8];

    fn deref(&self) -> &[u8] {
        self.as_bytes()
    }
}

impl AsRef<[u8]> for Packed {
    fn as_ref(&self) -> &[u8] {
        self.as_bytes()
    }
}

/// The integer word of `value`.
pub fn integer_word(value: &EncodedValue) -> u16 {
    let bits = value.integer_part() as u16 & INTEGER_MASK;
    if value.has_fractional_terms() {
        bits | TERMS_FLAG
    } else {
        bits
    }
}

/// The wire word for `term`.
pub fn term_word(term: &Term, last: bool) -> u16 {
    let low = if last {
        term.offset() | LAST_TERM
    } else {
        term.offset()
    };
    u16::from_be_bytes([term.numerator(), low])
}

/// All words of `value` in wire order, the marker set on the final term.
pub fn words(value: &EncodedValue) -> impl Iterator<Item = u16> + '_ {
    let last = value.term_count().saturating_sub(1);
    std::iter::once(integer_word(value)).chain(
        value
            .terms()
            .iter()
            .enumerate()
            .map(move |(i, term)| term_word(term, i == last)),
    )
}

fn decode_integer(word: u16) -> Result<i16> {
    let bits = word & INTEGER_MASK;
    let integer = if bits & INTEGER_SIGN != 0 {
        (bits | TERMS_FLAG) as i16
    } else {
        bits as i16
    };
    crate::value::check_integer(integer as i64)
}

fn decode_words<F>(head: u16, mut next_word: F) -> Result<EncodedValue>
where
    F: FnMut() -> Result<u16>,
{
    let integer = decode_integer(head)?;
    let mut terms = Terms::new();
    if head & TERMS_FLAG != 0 {
        for index in 0..MAX_TERMS {
            let [numerator, low] = next_word()?.to_be_bytes();
            let term =
                Term::from_wire(numerator, low & OFFSET_MASK).ok_or(Error::MalformedTerm { index })?;
            terms.push(term)?;
            if low & LAST_TERM != 0 {
                break;
            }
        }
    }
    Ok(EncodedValue::from_parts(integer, terms))
}

/// Pack `value` into its wire bytes.
pub fn pack(value: &EncodedValue) -> Packed {
    let mut bytes = [0u8; MAX_PACKED_LEN];
    for (i, word) in words(value).enumerate() {
        BigEndian::write_u16(&mut bytes[2 * i..], word);
    }
    Packed {
        bytes,
        len: value.encoded_len(),
    }
}

/// Unpack one value from the front of `data`.
///
/// Returns the value and the number of bytes consumed; trailing bytes are
/// left for the caller.
///
/// # Errors
/// - `Error::Truncated` if `data` ends inside the value.
/// - `Error::MalformedTerm` for a zero numerator.
/// - `Error::OutOfRange` for the excluded integer pattern `0x4000`.
pub fn unpack(data: &[u8]) -> Result<(EncodedValue, usize)> {
    let mut cursor = Cursor::new(data);
    match read_from(&mut cursor) {
        Ok(value) => Ok((value, cursor.position() as usize)),
        Err(Error::Truncated { need, .. }) => Err(Error::Truncated {
            need,
            have: data.len(),
        }),
        Err(e) => Err(e),
    }
}

/// Write one value to `writer`.
pub fn write_to<W: Write>(writer: &mut W, value: &EncodedValue) -> Result<()> {
    for word in words(value) {
        writer.write_u16::<BigEndian>(word)?;
    }
    Ok(())
}

/// Read one value from `reader`.
pub fn read_from<R: Read>(reader: &mut R) -> Result<EncodedValue> {
    let mut consumed = 0usize;
    let mut next_word = |reader: &mut R| match reader.read_u16::<BigEndian>() {
        Ok(word) => {
            consumed += 2;
            Ok(word)
        }
        Err(e) if e.kind() == io::ErrorKind::UnexpectedEof => Err(Error::Truncated {
            need: consumed + 2,
            have: consumed,
        }),
        Err(e) => Err(Error::Io(e)),
    };
    let head = next_word(reader)?;
    decode_words(head, || next_word(reader))
}

/// Write a sequence of values back to back.
pub fn write_all<W: Write>(writer: &mut W, values: &[EncodedValue]) -> Result<()> {
    for value in values {
        write_to(writer, value)?;
    }
    Ok(())
}

/// Read back-to-back values until `reader` is exhausted.
pub fn read_all<R: Read>(reader: &mut R) -> Result<Vec<EncodedValue>> {
    let mut data = Vec::new();
    reader.read_to_end(&mut data)?;
    let mut values = Vec::new();
    let mut rest = &data[..];
    while !rest.is_empty() {
        let (value, used) = unpack(rest)?;
        values.push(value);
        rest = &rest[used..];
    }
    Ok(values)
}
