//! Key-masked bit encoding.
//!
//! Each message bit is written onto its own qubit with `X`, then hidden
//! behind a Hadamard wherever the key bit is set. Reading the register back
//! gives the message bit where the key is `0` and a fair coin where it is
//! `1`. This is a toy encoding and offers no secrecy.

use tracing::{debug, instrument};

use qcr_ir::{Circuit, ClbitId, QubitId};

use crate::error::{ProtocolError, ProtocolResult};

/// Message used by the encoding demo.
pub const DEMO_MESSAGE: [u8; 4] = [0, 1, 1, 0];

/// Key used by the encoding demo.
pub const DEMO_KEY: [u8; 4] = [1, 0, 1, 1];

/// Builds bit-encoding circuits.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BitEncodingBuilder {
    message: Vec<u8>,
    key: Vec<u8>,
}

impl Default for BitEncodingBuilder {
    fn default() -> Self {
        Self::new(DEMO_MESSAGE, DEMO_KEY)
    }
}

impl BitEncodingBuilder {
    /// Builder for a message and key given as 0/1 values.
    pub fn new(message: impl Into<Vec<u8>>, key: impl Into<Vec<u8>>) -> Self {
        Self {
            message: message.into(),
            key: key.into(),
        }
    }

    /// Builder for a message and key given as strings like `"0110"`.
    pub fn from_strs(message: &str, key: &str) -> ProtocolResult<Self> {
        Ok(Self::new(parse_bits(message)?, parse_bits(key)?))
    }

    /// The message bits.
    pub fn message(&self) -> &[u8] {
        &self.message
    }

    /// The key bits.
    pub fn key(&self) -> &[u8] {
        &self.key
    }

    fn check(&self) -> ProtocolResult<()> {
        if self.message.is_empty() {
            return Err(ProtocolError::InvalidArgument(
                "message must contain at least one bit".into(),
            ));
        }
        if self.message.len() != self.key.len() {
            return Err(ProtocolError::InvalidArgument(format!(
                "message has {} bits but key has {}",
                self.message.len(),
                self.key.len()
            )));
        }
        if u32::try_from(self.message.len()).is_err() {
            return Err(ProtocolError::InvalidArgument(format!(
                "message of {} bits does not fit a register",
                self.message.len()
            )));
        }
        for (what, bits) in [("message", &self.message), ("key", &self.key)] {
            if let Some((i, b)) = bits.iter().enumerate().find(|(_, b)| **b > 1) {
                return Err(ProtocolError::InvalidArgument(format!(
                    "{what} bit {i} is {b}, expected 0 or 1"
                )));
            }
        }
        Ok(())
    }

    /// Assemble the circuit.
    ///
    /// Qubit `i` carries message bit `i` and is measured into clbit `i`.
    #[instrument(level = "debug", skip(self), fields(bits = self.message.len()))]
    pub fn build(&self) -> ProtocolResult<Circuit> {
        self.check()?;

        let width = self.message.len() as u32;
        let mut circuit = Circuit::with_size("bit_encoding", width, width);

        for (i, (&m, &k)) in (0..width).zip(self.message.iter().zip(&self.key)) {
            let q = QubitId(i);
            if m == 1 {
                circuit.x(q)?;
            }
            if k == 1 {
                circuit.h(q)?;
            }
        }
        for i in 0..width {
            circuit.measure(QubitId(i), ClbitId(i))?;
        }

        debug!(instructions = circuit.len(), "built bit encoding");
        Ok(circuit)
    }

    /// Expected outcome in bitstring order (highest clbit first).
    ///
    /// Positions masked by the key are shown as `?`.
    pub fn predicted_bits(&self) -> String {
        self.message
            .iter()
            .zip(&self.key)
            .rev()
            .map(|(&m, &k)| match (k, m) {
                (1, _) => '?',
                (_, 1) => '1',
                _ => '0',
            })
            .collect()
    }
}

/// Parse a string of `0` and `1` characters.
///
/// Surrounding whitespace is ignored. The first character is bit 0.
pub fn parse_bits(s: &str) -> ProtocolResult<Vec<u8>> {
    s.trim()
        .chars()
        .enumerate()
        .map(|(i, c)| match c {
            '0' => Ok(0),
            '1' => Ok(1),
            other => Err(ProtocolError::InvalidArgument(format!(
                "invalid bit '{other}' at position {i} in \"{s}\""
            ))),
        })
        .collect()
}

/// Build a bit-encoding circuit for `message` masked by `key`.
pub fn bit_encoding(message: &[u8], key: &[u8]) -> ProtocolResult<Circuit> {
    BitEncodingBuilder::new(message, key).build()
}
