//! Structural repair of a rendered document.
//!
//! Runs in five phases, each over the block list:
//!
//! 1. **Demote** headings deeper than [`MAX_HEADING_DEPTH`] to bold text
//! 2. **Balance** container tags with a stack (orphans dropped, out-of-order closes resolved)
//! 3. **Prune** field wrappers that hold nothing
//! 4. **Space** block-level containers with exactly one blank line
//! 5. **Collapse** runs of 4+ blank lines to 2
//!
//! The output is a fixed point: `repair(repair(d)) == repair(d)`.

use crate::config::MAX_HEADING_DEPTH;
use crate::document::{Block, RenderedDocument};
use crate::render::{
    ACCORDION, ACCORDION_GROUP, CODE_GROUP, EXPANDABLE, PARAM_FIELD, RESPONSE_FIELD, WARNING,
};
use tracing::debug;

/// Containers that get blank-line spacing.
const BLOCK_CONTAINERS: &[&str] = &[ACCORDION_GROUP, ACCORDION, CODE_GROUP, EXPANDABLE, WARNING];

/// Wrappers dropped when empty.
const FIELD_WRAPPERS: &[&str] = &[PARAM_FIELD, RESPONSE_FIELD];

/// Closing tag kept even when nothing opened it.
const KEEP_ORPHAN_CLOSE: &str = CODE_GROUP;

pub fn repair(doc: RenderedDocument) -> RenderedDocument {
    let blocks = demote_headings(doc.blocks);
    let blocks = balance(blocks);
    let blocks = prune_empty_fields(blocks);
    let blocks = space_containers(blocks);
    let blocks = collapse_blanks(blocks);
    RenderedDocument { blocks }
}

fn demote_headings(blocks: Vec<Block>) -> Vec<Block> {
    blocks
        .into_iter()
        .map(|block| match block {
            Block::Heading { level, text } if level > MAX_HEADING_DEPTH => {
                Block::Text(format!("**{}**", text))
            }
            other => other,
        })
        .collect()
}

fn balance(blocks: Vec<Block>) -> Vec<Block> {
    let mut out = Vec::with_capacity(blocks.len());
    let mut stack: Vec<String> = Vec::new();

    for block in blocks {
        match block {
            Block::Open(tag) => {
                stack.push(tag.name.clone());
                out.push(Block::Open(tag));
            }
            Block::Close(name) => match stack.iter().rposition(|open| *open == name) {
                Some(pos) => {
                    // Out-of-order close: everything above it ends here too.
                    for inner in stack.drain(pos + 1..).rev() {
                        debug!(closing = %name, unclosed = %inner, "closing element left open");
                        out.push(Block::Close(inner));
                    }
                    stack.pop();
                    out.push(Block::Close(name));
                }
                None if name == KEEP_ORPHAN_CLOSE => out.push(Block::Close(name)),
                None => debug!(element = %name, "dropping orphaned closing tag"),
            },
            other => out.push(other),
        }
    }

    for name in stack.into_iter().rev() {
        debug!(element = %name, "closing element still open at end of document");
        out.push(Block::Close(name));
    }
    out
}

fn prune_empty_fields(blocks: Vec<Block>) -> Vec<Block> {
    let mut out: Vec<Block> = Vec::with_capacity(blocks.len());
    for block in blocks {
        if let Block::Close(name) = &block {
            if FIELD_WRAPPERS.contains(&name.as_str()) {
                let opened_at = out.iter().rposition(|b| !b.is_blank());
                if let Some(pos) = opened_at {
                    if matches!(&out[pos], Block::Open(tag) if tag.name == *name) {
                        out.truncate(pos);
                        continue;
                    }
                }
            }
        }
        out.push(block);
    }
    out
}

fn space_containers(blocks: Vec<Block>) -> Vec<Block> {
    let mut out: Vec<Block> = Vec::with_capacity(blocks.len());
    let mut blank_after = false;

    for block in blocks {
        if block.is_blank() {
            if !blank_after {
                out.push(block);
            }
            continue;
        }

        let opens_container =
            matches!(&block, Block::Open(tag) if BLOCK_CONTAINERS.contains(&tag.name.as_str()));
        if opens_container || blank_after {
            while out.last().is_some_and(Block::is_blank) {
                out.pop();
            }
            if !out.is_empty() {
                out.push(Block::Blank);
            }
        }

        blank_after =
            matches!(&block, Block::Close(name) if BLOCK_CONTAINERS.contains(&name.as_str()));
        out.push(block);
    }
    out
}

fn collapse_blanks(blocks: Vec<Block>) -> Vec<Block> {
    let mut out = Vec::with_capacity(blocks.len());
    let mut run = Vec::new();
    for block in blocks {
        if block.is_blank() {
            run.push(block);
            continue;
        }
        if run.len() >= 4 {
            run.truncate(2);
        }
        out.append(&mut run);
        out.push(block);
    }
    if run.len() >= 4 {
        run.truncate(2);
    }
    out.append(&mut run);
    out
}
