//! Table-of-contents outline
//!
//! Parts contain sections, sections contain chapters, and so on down to
//! sub-articles, which own paragraphs. Nodes live in an arena and own their
//! children; parent links and paragraph membership are derived indexes kept
//! alongside, so there are no back-references between nodes.

use crate::{CatechismError, Result};
use std::collections::HashMap;

/// Handle to a node in an [`Outline`]
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct NodeId(usize);

/// Nesting level of an outline node
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub enum Level {
    Part,
    Section,
    Chapter,
    Article,
    SubArticle,
}

impl Level {
    /// Level directly below this one
    pub fn child(self) -> Option<Level> {
        match self {
            Self::Part => Some(Self::Section),
            Self::Section => Some(Self::Chapter),
            Self::Chapter => Some(Self::Article),
            Self::Article => Some(Self::SubArticle),
            Self::SubArticle => None,
        }
    }

    pub fn as_str(self) -> &'static str {
        match self {
            Self::Part => "part",
            Self::Section => "section",
            Self::Chapter => "chapter",
            Self::Article => "article",
            Self::SubArticle => "sub-article",
        }
    }
}

#[derive(Debug, Clone)]
pub struct OutlineNode {
    pub level: Level,
    pub title: String,
    pub children: Vec<NodeId>,
}

#[derive(Debug, Clone, Default)]
pub struct Outline {
    nodes: Vec<OutlineNode>,
    parts: Vec<NodeId>,
    parents: HashMap<NodeId, NodeId>,
    paragraph_owner: HashMap<u32, NodeId>,
    paragraphs: HashMap<NodeId, Vec<u32>>,
}

impl Outline {
    pub fn new() -> Self {
        Self::default()
    }

    /// Adds a top-level part
    pub fn add_part(&mut self, title: impl Into<String>) -> NodeId {
        let id = self.push(Level::Part, title.into());
        self.parts.push(id);
        id
    }

    /// Adds a node one level below `parent`
    pub fn add_child(&mut self, parent: NodeId, title: impl Into<String>) -> Result<NodeId> {
        let parent_level = self.get(parent)?.level;
        let level = parent_level.child().ok_or_else(|| {
            CatechismError::Outline(format!("a {} cannot have children", parent_level.as_str()))
        })?;

        let id = self.push(level, title.into());
        self.nodes[parent.0].children.push(id);
        self.parents.insert(id, parent);
        Ok(id)
    }

    pub fn node(&self, id: NodeId) -> Option<&OutlineNode> {
        self.nodes.get(id.0)
    }

    pub fn parts(&self) -> &[NodeId] {
        &self.parts
    }

    pub fn children(&self, id: NodeId) -> &[NodeId] {
        self.node(id).map(|n| n.children.as_slice()).unwrap_or(&[])
    }

    pub fn parent(&self, id: NodeId) -> Option<NodeId> {
        self.parents.get(&id).copied()
    }

    /// Ancestors of `id`, nearest first
    pub fn ancestors(&self, id: NodeId) -> Vec<NodeId> {
        let mut chain = Vec::new();
        let mut current = id;
        while let Some(parent) = self.parent(current) {
            chain.push(parent);
            current = parent;
        }
        chain
    }

    /// Records that `number` belongs to the given sub-article
    pub fn attach_paragraph(&mut self, sub_article: NodeId, number: u32) -> Result<()> {
        let level = self.get(sub_article)?.level;
        if level != Level::SubArticle {
            return Err(CatechismError::Outline(format!(
                "paragraphs attach to sub-articles, not a {}",
                level.as_str()
            )));
        }

        if let Some(owner) = self.paragraph_owner.get(&number) {
            if *owner == sub_article {
                return Ok(());
            }
            return Err(CatechismError::Outline(format!(
                "paragraph {} already belongs to another sub-article",
                number
            )));
        }

        self.paragraph_owner.insert(number, sub_article);
        self.paragraphs.entry(sub_article).or_default().push(number);
        Ok(())
    }

    pub fn paragraphs_of(&self, id: NodeId) -> &[u32] {
        self.paragraphs.get(&id).map(Vec::as_slice).unwrap_or(&[])
    }

    pub fn sub_article_of(&self, number: u32) -> Option<NodeId> {
        self.paragraph_owner.get(&number).copied()
    }

    /// Titles from the top-level part down to `id`
    pub fn breadcrumb(&self, id: NodeId) -> Vec<&str> {
        self.ancestors(id)
            .into_iter()
            .rev()
            .chain(std::iter::once(id))
            .filter_map(|n| self.node(n))
            .map(|n| n.title.as_str())
            .collect()
    }

    pub fn len(&self) -> usize {
        self.nodes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.nodes.is_empty()
    }

    fn push(&mut self, level: Level, title: String) -> NodeId {
        let id = NodeId(self.nodes.len());
        self.nodes.push(OutlineNode {
            level,
            title,
            children: Vec::new(),
        });
        id
    }

    fn get(&self, id: NodeId) -> Result<&OutlineNode> {
        self.node(id)
            .ok_or_else(|| CatechismError::Outline(format!("unknown node {}", id.0)))
    }
}
