//! Block tree construction and content scoring.
//!
//! The document is walked into a flat, document-ordered list of text blocks.
//! Each block knows its semantic kind, nesting depth, and link density.
//! Scores are credited up the ancestor chain so the container holding the
//! most article-like text wins, rather than a single high-scoring paragraph.

use ego_tree::NodeId;
use rustc_hash::FxHashMap;
use scraper::{ElementRef, Html, Selector, node::Node};
use std::cmp::Ordering;

use crate::extractor::model::normalize_whitespace;

/// Elements whose subtrees are never scored.
const DISCARD_TAGS: &[&str] = &[
    "script", "style", "nav", "header", "footer", "form", "aside", "noscript", "iframe", "svg",
    "button", "select", "option", "template", "head",
];

/// Elements treated as inline: their text belongs to the enclosing block.
const INLINE_TAGS: &[&str] = &[
    "a", "abbr", "b", "bdi", "bdo", "br", "cite", "code", "data", "dfn", "em", "i", "kbd", "mark",
    "q", "s", "samp", "small", "span", "strong", "sub", "sup", "time", "u", "var", "wbr",
];

const PARAGRAPH_TAGS: &[&str] = &["p", "pre", "blockquote"];
const LIST_ITEM_TAGS: &[&str] = &["li", "dt", "dd"];
const HEADING_TAGS: &[&str] = &["h1", "h2", "h3", "h4", "h5", "h6"];

/// Containers whose descendants get the nested penalty.
const LIST_TABLE_TAGS: &[&str] = &["ul", "ol", "dl", "table"];

/// Semantic kind of a text block.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BlockTag {
    Heading,
    Paragraph,
    ListItem,
    Other,
}

/// One text-bearing node of the parsed document. Blocks are built fresh per
/// extraction call and discarded with it.
#[derive(Debug, Clone)]
pub struct Block {
    pub tag: BlockTag,
    pub text: String,
    pub depth: usize,
    pub link_density: f64,
    pub score: f64,
    node_id: NodeId,
}

/// Tunable extraction heuristics. Defaults are calibrated for typical
/// article pages; tests may tighten or loosen them.
#[derive(Debug, Clone)]
pub struct ExtractorConfig {
    /// Blocks shorter than this never become container candidates.
    pub min_block_chars: usize,
    /// Minimum cumulative container score for extraction to succeed.
    pub min_candidate_score: f64,
    /// Assembled text shorter than this is treated as no content.
    pub min_content_chars: usize,
    /// Blocks above this link density are dropped from the assembled text.
    pub max_link_density: f64,
    /// Multiplier for `<p>`-like blocks.
    pub paragraph_bonus: f64,
    /// Multiplier for heading blocks (low: headings rarely carry body text).
    pub heading_weight: f64,
    /// Multiplier for blocks nested inside list or table structures.
    pub nested_penalty: f64,
    /// Share of a block's score credited to its grandparent.
    pub ancestor_decay: f64,
}

impl Default for ExtractorConfig {
    fn default() -> Self {
        Self {
            min_block_chars: 25,
            min_candidate_score: 20.0,
            min_content_chars: 200,
            max_link_density: 0.5,
            paragraph_bonus: 1.25,
            heading_weight: 0.3,
            nested_penalty: 0.5,
            ancestor_decay: 0.5,
        }
    }
}

/// Walk the document into blocks, in document order. Discarded subtrees are
/// pruned outright and contribute nothing.
pub fn collect_blocks(document: &Html, config: &ExtractorConfig) -> Vec<Block> {
    let mut blocks = Vec::new();
    walk(document.root_element(), 0, false, config, &mut blocks);
    blocks
}

fn walk(
    element: ElementRef<'_>,
    depth: usize,
    in_list_or_table: bool,
    config: &ExtractorConfig,
    blocks: &mut Vec<Block>,
) {
    let name = element.value().name();
    if DISCARD_TAGS.contains(&name) {
        return;
    }

    let mut raw = String::new();
    let mut anchor_chars = 0usize;
    collect_inline_text(&element, false, &mut raw, &mut anchor_chars);
    let text = normalize_whitespace(&raw);
    if !text.is_empty() {
        let raw_chars = raw.chars().filter(|c| !c.is_whitespace()).count();
        let link_density = if raw_chars == 0 {
            0.0
        } else {
            (anchor_chars as f64 / raw_chars as f64).min(1.0)
        };
        let tag = classify(name);
        let score = block_score(tag, text.chars().count(), link_density, in_list_or_table, config);
        blocks.push(Block {
            tag,
            text,
            depth,
            link_density,
            score,
            node_id: element.id(),
        });
    }

    let nested = in_list_or_table || LIST_TABLE_TAGS.contains(&name);
    for child in element.children() {
        if let Some(child_el) = ElementRef::wrap(child)
            && !INLINE_TAGS.contains(&child_el.value().name())
        {
            walk(child_el, depth + 1, nested, config, blocks);
        }
    }
}

/// Gather the text belonging to one block: direct text nodes plus inline
/// descendants, stopping at nested block-level elements.
fn collect_inline_text(
    element: &ElementRef<'_>,
    in_anchor: bool,
    out: &mut String,
    anchor_chars: &mut usize,
) {
    for child in element.children() {
        match child.value() {
            Node::Text(text) => {
                out.push_str(text);
                if in_anchor {
                    *anchor_chars += text.chars().filter(|c| !c.is_whitespace()).count();
                }
            }
            Node::Element(_) => {
                if let Some(child_el) = ElementRef::wrap(child) {
                    let name = child_el.value().name();
                    if DISCARD_TAGS.contains(&name) || !INLINE_TAGS.contains(&name) {
                        continue;
                    }
                    collect_inline_text(&child_el, in_anchor || name == "a", out, anchor_chars);
                }
            }
            _ => {}
        }
    }
}

fn classify(name: &str) -> BlockTag {
    if HEADING_TAGS.contains(&name) {
        BlockTag::Heading
    } else if PARAGRAPH_TAGS.contains(&name) {
        BlockTag::Paragraph
    } else if LIST_ITEM_TAGS.contains(&name) {
        BlockTag::ListItem
    } else {
        BlockTag::Other
    }
}

fn block_score(
    tag: BlockTag,
    chars: usize,
    link_density: f64,
    nested: bool,
    config: &ExtractorConfig,
) -> f64 {
    let base = chars as f64 * (1.0 - link_density);
    let weight = match tag {
        BlockTag::Paragraph => config.paragraph_bonus,
        BlockTag::Heading => config.heading_weight,
        BlockTag::ListItem | BlockTag::Other => 1.0,
    };
    let penalty = if nested { config.nested_penalty } else { 1.0 };
    base * weight * penalty
}

#[derive(Debug)]
struct Candidate {
    score: f64,
    depth: usize,
    order: usize,
}

/// Pick the element whose descendants carry the most content weight. Each
/// body block credits its parent in full and its grandparent at a decayed
/// share, so tight article containers out-score the page root.
pub fn select_content_root(
    document: &Html,
    blocks: &[Block],
    config: &ExtractorConfig,
) -> Option<NodeId> {
    let mut candidates: FxHashMap<NodeId, Candidate> = FxHashMap::default();

    for (order, block) in blocks.iter().enumerate() {
        if block.tag == BlockTag::Heading
            || block.score <= 0.0
            || block.text.chars().count() < config.min_block_chars
        {
            continue;
        }
        let Some(node) = document.tree.get(block.node_id) else {
            continue;
        };
        if let Some(parent) = node.parent()
            && parent.value().is_element()
        {
            credit(
                &mut candidates,
                parent.id(),
                block.score,
                block.depth.saturating_sub(1),
                order,
            );
            if let Some(grandparent) = parent.parent()
                && grandparent.value().is_element()
            {
                credit(
                    &mut candidates,
                    grandparent.id(),
                    block.score * config.ancestor_decay,
                    block.depth.saturating_sub(2),
                    order,
                );
            }
        }
    }

    let (node_id, best) = candidates.into_iter().max_by(|(_, a), (_, b)| {
        a.score
            .partial_cmp(&b.score)
            .unwrap_or(Ordering::Equal)
            // ties: prefer the tighter (deeper) container, then the earlier one
            .then_with(|| a.depth.cmp(&b.depth))
            .then_with(|| b.order.cmp(&a.order))
    })?;

    (best.score >= config.min_candidate_score).then_some(node_id)
}

fn credit(
    candidates: &mut FxHashMap<NodeId, Candidate>,
    id: NodeId,
    score: f64,
    depth: usize,
    order: usize,
) {
    let entry = candidates.entry(id).or_insert(Candidate {
        score: 0.0,
        depth,
        order,
    });
    entry.score += score;
}

/// Concatenate the body blocks inside the selected container, in document
/// order, skipping link-heavy blocks.
pub fn assemble_text(
    document: &Html,
    blocks: &[Block],
    root_id: NodeId,
    config: &ExtractorConfig,
) -> String {
    let parts: Vec<&str> = blocks
        .iter()
        .filter(|b| b.tag != BlockTag::Heading)
        .filter(|b| b.link_density <= config.max_link_density)
        .filter(|b| is_within(document, b.node_id, root_id))
        .map(|b| b.text.as_str())
        .collect();
    parts.join(" ")
}

/// First heading encountered before or within the selected subtree.
pub fn title_candidate(document: &Html, blocks: &[Block], root_id: NodeId) -> Option<String> {
    let subtree_end = blocks
        .iter()
        .rposition(|b| is_within(document, b.node_id, root_id))?;
    blocks[..=subtree_end]
        .iter()
        .find(|b| b.tag == BlockTag::Heading)
        .map(|b| b.text.clone())
}

/// Metadata fallback for the title: `og:title`, then `<title>`.
pub fn document_title(document: &Html) -> Option<String> {
    let og = Selector::parse("meta[property='og:title']").ok()?;
    if let Some(element) = document.select(&og).next()
        && let Some(content) = element.value().attr("content")
    {
        let content = content.trim();
        if !content.is_empty() {
            return Some(content.to_string());
        }
    }

    let title = Selector::parse("title").ok()?;
    document
        .select(&title)
        .next()
        .map(|el| normalize_whitespace(&el.text().collect::<String>()))
        .filter(|t| !t.is_empty())
}

fn is_within(document: &Html, node_id: NodeId, root_id: NodeId) -> bool {
    if node_id == root_id {
        return true;
    }
    let Some(node) = document.tree.get(node_id) else {
        return false;
    };
    node.ancestors().any(|a| a.id() == root_id)
}
