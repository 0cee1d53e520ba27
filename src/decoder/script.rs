//! Script decompiler
//!
//! Splits an output script into opcode/data chunks. It knows nothing about
//! Angor payloads; callers check the chunk layout.

use super::error::ScriptError;
use bitcoin::opcodes::Opcode;
use bitcoin::script::{Instruction, Script};
use std::fmt;

/// One opcode or data push of a decompiled script
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ScriptChunk {
    Op(Opcode),
    Push(Vec<u8>),
}

impl ScriptChunk {
    /// Pushed bytes, or an empty slice for a bare opcode
    pub fn data(&self) -> &[u8] {
        match self {
            Self::Op(_) => &[],
            Self::Push(bytes) => bytes,
        }
    }

    pub fn is_op(&self, opcode: Opcode) -> bool {
        matches!(self, Self::Op(op) if *op == opcode)
    }
}

/// ASM form: opcode name or hex of the pushed bytes
impl fmt::Display for ScriptChunk {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Op(op) => write!(f, "{}", op),
            Self::Push(bytes) => write!(f, "{}", hex::encode(bytes)),
        }
    }
}

/// Decompile a script into chunks
pub fn decompile(script: &Script) -> Result<Vec<ScriptChunk>, ScriptError> {
    script
        .instructions()
        .map(|instruction| match instruction {
            Ok(Instruction::Op(op)) => Ok(ScriptChunk::Op(op)),
            Ok(Instruction::PushBytes(bytes)) => Ok(ScriptChunk::Push(bytes.as_bytes().to_vec())),
            Err(e) => Err(ScriptError::Unparsable(e.to_string())),
        })
        .collect()
}

/// Decompile a script and require one of the given chunk counts
pub fn decompile_expecting(
    script: &Script,
    expected_counts: &[usize],
) -> Result<Vec<ScriptChunk>, ScriptError> {
    let chunks = decompile(script)?;

    if !expected_counts.contains(&chunks.len()) {
        let expected = expected_counts
            .iter()
            .map(|count| count.to_string())
            .collect::<Vec<_>>()
            .join(" or ");
        return Err(ScriptError::WrongChunkCount {
            expected,
            found: chunks.len(),
        });
    }

    Ok(chunks)
}

/// Space separated ASM rendering of a chunk list
pub fn to_asm(chunks: &[ScriptChunk]) -> String {
    chunks
        .iter()
        .map(ToString::to_string)
        .collect::<Vec<_>>()
        .join(" ")
}
