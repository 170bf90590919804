//! # Open Sound Control Module
//!
//! Encoding and decoding of OSC 1.0 messages. Only the argument types needed to command servo
//! boards (`i`, `f` and `s`) are supported. Bundles are not supported.
//!
//! A message is laid out as:
//! - The address pattern as a null terminated string, padded to a multiple of 4 bytes
//! - The type tag string (`,` followed by one tag per argument), padded the same way
//! - Each argument, big endian, strings padded to a multiple of 4 bytes

// ------------------------------------------------------------------------------------------------
// IMPORTS
// ------------------------------------------------------------------------------------------------

use byteorder::{BigEndian, ReadBytesExt, WriteBytesExt};
use std::io::{Cursor, Read};

// ------------------------------------------------------------------------------------------------
// CONSTANTS
// ------------------------------------------------------------------------------------------------

/// Address prefix of the PWM duty cycle output on the servo board.
pub const PWM_DUTY_ADDR_PREFIX: &str = "/output/pwm/duty/";

// ------------------------------------------------------------------------------------------------
// STRUCTS
// ------------------------------------------------------------------------------------------------

/// A single OSC message.
#[derive(Debug, Clone, PartialEq)]
pub struct OscMessage {
    /// The address pattern of the message, which must begin with `/`
    pub addr: String,

    /// The arguments carried by the message
    pub args: Vec<OscArg>,
}

// ------------------------------------------------------------------------------------------------
// ENUMS
// ------------------------------------------------------------------------------------------------

/// An argument of an OSC message.
#[derive(Debug, Clone, PartialEq)]
pub enum OscArg {
    Int(i32),
    Float(f32),
    Str(String),
}

#[derive(thiserror::Error, Debug)]
pub enum OscError {
    #[error("OSC addresses must start with '/', found {0:?}")]
    InvalidAddress(String),

    #[error("OSC strings cannot contain null bytes")]
    NullInString,

    #[error("The packet ended before the message was complete")]
    Truncated,

    #[error("The type tag string must begin with ','")]
    MissingTypeTags,

    #[error("Unsupported OSC type tag '{0}'")]
    UnsupportedType(char),

    #[error("OSC string is not valid UTF-8")]
    InvalidUtf8,

    #[error("Could not write the message: {0}")]
    WriteError(std::io::Error),
}

// ------------------------------------------------------------------------------------------------
// IMPLS
// ------------------------------------------------------------------------------------------------

impl OscMessage {
    /// Create a new message.
    pub fn new(addr: &str, args: Vec<OscArg>) -> Self {
        Self {
            addr: addr.into(),
            args,
        }
    }

    /// Message setting the PWM duty cycle (as a percentage) of the given board channel.
    pub fn pwm_duty(channel: u8, duty_percent: f32) -> Self {
        Self::new(
            &format!("{}{}", PWM_DUTY_ADDR_PREFIX, channel),
            vec![OscArg::Float(duty_percent)],
        )
    }

    /// If this is a PWM duty message return the channel and the duty cycle.
    pub fn as_pwm_duty(&self) -> Option<(u8, f32)> {
        let channel = self.addr.strip_prefix(PWM_DUTY_ADDR_PREFIX)?.parse().ok()?;

        match self.args.as_slice() {
            [OscArg::Float(d)] => Some((channel, *d)),
            _ => None,
        }
    }

    /// Encode the message into a packet ready to be sent.
    pub fn encode(&self) -> Result<Vec<u8>, OscError> {
        if !self.addr.starts_with('/') {
            return Err(OscError::InvalidAddress(self.addr.clone()));
        }

        let mut buf = Vec::new();

        write_str(&mut buf, &self.addr)?;

        let mut tags = String::from(",");
        for arg in self.args.iter() {
            tags.push(arg.tag());
        }
        write_str(&mut buf, &tags)?;

        for arg in self.args.iter() {
            match arg {
                OscArg::Int(i) => buf.write_i32::<BigEndian>(*i),
                OscArg::Float(f) => buf.write_f32::<BigEndian>(*f),
                OscArg::Str(s) => {
                    write_str(&mut buf, s)?;
                    Ok(())
                }
            }
            .map_err(OscError::WriteError)?;
        }

        Ok(buf)
    }

    /// Decode a message from a received packet.
    pub fn decode(packet: &[u8]) -> Result<Self, OscError> {
        let mut cursor = Cursor::new(packet);

        let addr = read_str(&mut cursor)?;
        if !addr.starts_with('/') {
            return Err(OscError::InvalidAddress(addr));
        }

        let tags = read_str(&mut cursor)?;
        let mut tags = tags.chars();
        if tags.next() != Some(',') {
            return Err(OscError::MissingTypeTags);
        }

        let mut args = Vec::new();
        for tag in tags {
            let arg = match tag {
                'i' => OscArg::Int(
                    cursor
                        .read_i32::<BigEndian>()
                        .map_err(|_| OscError::Truncated)?,
                ),
                'f' => OscArg::Float(
                    cursor
                        .read_f32::<BigEndian>()
                        .map_err(|_| OscError::Truncated)?,
                ),
                's' => OscArg::Str(read_str(&mut cursor)?),
                t => return Err(OscError::UnsupportedType(t)),
            };
            args.push(arg);
        }

        Ok(Self { addr, args })
    }
}

impl OscArg {
    /// The type tag character of this argument.
    pub fn tag(&self) -> char {
        match self {
            OscArg::Int(_) => 'i',
            OscArg::Float(_) => 'f',
            OscArg::Str(_) => 's',
        }
    }
}

// ------------------------------------------------------------------------------------------------
// PRIVATE FUNCTIONS
// ------------------------------------------------------------------------------------------------

/// Number of null bytes required after a string of `len` bytes. At least one null is always
/// written.
fn pad_len(len: usize) -> usize {
    4 - (len % 4)
}

fn write_str(buf: &mut Vec<u8>, s: &str) -> Result<(), OscError> {
    if s.contains('\0') {
        return Err(OscError::NullInString);
    }

    buf.extend_from_slice(s.as_bytes());
    buf.extend(std::iter::repeat(0u8).take(pad_len(s.len())));

    Ok(())
}

fn read_str(cursor: &mut Cursor<&[u8]>) -> Result<String, OscError> {
    let start = cursor.position() as usize;
    let data = &cursor.get_ref()[start..];

    let len = data
        .iter()
        .position(|b| *b == 0)
        .ok_or(OscError::Truncated)?;

    let s = std::str::from_utf8(&data[..len])
        .map_err(|_| OscError::InvalidUtf8)?
        .to_string();

    // Skip the string and its padding
    let mut skip = vec![0u8; len + pad_len(len)];
    cursor
        .read_exact(&mut skip)
        .map_err(|_| OscError::Truncated)?;

    Ok(s)
}

// ------------------------------------------------------------------------------------------------
// TESTS
// ------------------------------------------------------------------------------------------------

#[cfg(test)]
mod test {
    use super::*;

    #[test]
    fn test_encode_pwm_duty() -> Result<(), OscError> {
        let packet = OscMessage::pwm_duty(1, 3.0).encode()?;

        // "/output/pwm/duty/1" is 18 bytes, padded to 20
        let mut expected = b"/output/pwm/duty/1\0\0".to_vec();
        expected.extend_from_slice(b",f\0\0");
        expected.extend_from_slice(&3.0f32.to_be_bytes());

        assert_eq!(packet, expected);
        assert_eq!(packet.len() % 4, 0);

        Ok(())
    }

    #[test]
    fn test_padding_on_aligned_string() -> Result<(), OscError> {
        // A 4 byte address still needs a full word of nulls
        let packet = OscMessage::new("/abc", vec![]).encode()?;

        assert_eq!(packet, b"/abc\0\0\0\0,\0\0\0".to_vec());

        Ok(())
    }

    #[test]
    fn test_decode() -> Result<(), OscError> {
        let msg = OscMessage::new(
            "/output/pwm/duty/12",
            vec![OscArg::Float(8.5), OscArg::Int(-3), OscArg::Str("hexapod".into())],
        );

        let decoded = OscMessage::decode(&msg.encode()?)?;

        assert_eq!(decoded, msg);

        let duty = OscMessage::decode(&OscMessage::pwm_duty(12, 8.5).encode()?)?;
        assert_eq!(duty.as_pwm_duty(), Some((12, 8.5)));

        Ok(())
    }

    #[test]
    fn test_decode_errors() {
        assert!(matches!(OscMessage::decode(b"/abc"), Err(OscError::Truncated)));
        assert!(matches!(
            OscMessage::decode(b"abc\0,\0\0\0"),
            Err(OscError::InvalidAddress(_))
        ));
        assert!(matches!(
            OscMessage::decode(b"/abc\0\0\0\0,b\0\0"),
            Err(OscError::UnsupportedType('b'))
        ));
        assert!(matches!(
            OscMessage::decode(b"/abc\0\0\0\0,f\0\0\0\0"),
            Err(OscError::Truncated)
        ));
    }

    #[test]
    fn test_invalid_address() {
        assert!(matches!(
            OscMessage::new("output", vec![]).encode(),
            Err(OscError::InvalidAddress(_))
        ));

        let bad_channel = OscMessage::new("/output/pwm/duty/x", vec![OscArg::Float(1.0)]);
        assert_eq!(bad_channel.as_pwm_duty(), None);
    }
}
