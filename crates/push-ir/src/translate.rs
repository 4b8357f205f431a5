//! Genome to program translation.
//!
//! An instruction with block arity n opens a block right after itself and
//! leaves n - 1 sibling blocks pending. A `Close` gene ends the innermost open
//! block; if that block's instruction still has pending siblings, the next
//! one opens immediately. Closes with no open block are ignored, and at the
//! end of the genome every open and pending block is closed, empty if need be.

use crate::genome::{Gene, Genome};
use push_core::{Code, CodeBlock, Program};

/// A block under construction
struct Frame {
    items: Vec<Code>,
    /// Sibling blocks still owed after this one closes
    pending: usize,
}

impl Frame {
    fn new(pending: usize) -> Self {
        Self {
            items: Vec::new(),
            pending,
        }
    }
}

struct Builder {
    frames: Vec<Frame>,
}

impl Builder {
    fn new() -> Self {
        Self {
            frames: vec![Frame::new(0)],
        }
    }

    fn current(&mut self) -> &mut Frame {
        let last = self.frames.len() - 1;
        &mut self.frames[last]
    }

    /// Close the innermost open block. Returns false at the top level.
    fn close(&mut self) -> bool {
        // The root frame is never closed
        if self.frames.len() < 2 {
            return false;
        }
        let Some(frame) = self.frames.pop() else {
            return false;
        };
        self.current()
            .items
            .push(Code::Block(CodeBlock::with_items(frame.items)));
        // Open the next sibling block the instruction is still owed
        if frame.pending > 0 {
            self.frames.push(Frame::new(frame.pending - 1));
        }
        true
    }

    fn finish(mut self) -> Program {
        while self.close() {}
        let root = self.frames.pop().map(|f| f.items).unwrap_or_default();
        CodeBlock::with_items(root)
    }
}

/// Translate a flat genome into a nested program
pub fn translate(genome: &Genome) -> Program {
    let mut builder = Builder::new();
    for gene in genome {
        match gene {
            Gene::Literal(value) => builder.current().items.push(Code::Literal(value.clone())),
            Gene::Instruction(instruction) => {
                builder
                    .current()
                    .items
                    .push(Code::Instruction(instruction.clone()));
                let blocks = instruction.code_blocks();
                if blocks > 0 {
                    builder.frames.push(Frame::new(blocks - 1));
                }
            }
            Gene::Close => {
                builder.close();
            }
        }
    }
    builder.finish()
}
