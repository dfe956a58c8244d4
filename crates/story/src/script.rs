use derive_more::Constructor;
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use storyloom_layout::{
    check_length, ConfigError, LayeredLayout, LayoutConfig, LayoutGraph, Point, RootOrder, Vec2,
};
use tracing::debug;

/// Role of a node in a branching script
#[derive(Debug, PartialEq, Eq, Copy, Clone, Serialize, Deserialize, Default)]
pub enum NodeKind {
    /// Entry point of the script
    Start,
    #[default]
    Dialogue,
    Choice,
    Monologue,
    End,
}

#[derive(Debug, PartialEq, Clone, Serialize, Deserialize, Constructor)]
pub struct Choice {
    pub text: String,
    pub target_id: Option<String>,
}

/// A dialogue tree node
///
/// Outgoing links are implicit: `next_id` first, then the target of each
/// choice in order.
#[derive(Debug, PartialEq, Clone, Serialize, Deserialize, Default)]
#[serde(default)]
pub struct ScriptNode {
    pub id: String,
    pub kind: NodeKind,
    pub speaker: String,
    pub text: String,
    pub scene: Option<String>,
    pub art: Option<String>,
    pub expression: Option<String>,
    pub next_id: Option<String>,
    pub choices: Vec<Choice>,
    pub position: Point,
}

impl ScriptNode {
    pub fn new(id: impl Into<String>, kind: NodeKind) -> Self {
        Self {
            id: id.into(),
            kind,
            ..Default::default()
        }
    }

    pub fn with_next(mut self, next_id: impl Into<String>) -> Self {
        self.next_id = Some(next_id.into());
        self
    }

    pub fn with_choice(mut self, text: impl Into<String>, target_id: impl Into<String>) -> Self {
        self.choices
            .push(Choice::new(text.into(), Some(target_id.into())));
        self
    }

    pub fn at(mut self, x: f32, y: f32) -> Self {
        self.position = Point::new(x, y);
        self
    }

    /// Targets of the node's outgoing links
    pub fn links(&self) -> impl Iterator<Item = &str> {
        self.next_id
            .as_deref()
            .into_iter()
            .chain(self.choices.iter().filter_map(|c| c.target_id.as_deref()))
    }
}

/// Side of a node an edge is anchored to
#[derive(Debug, PartialEq, Eq, Copy, Clone, Serialize, Deserialize, Default)]
pub enum Side {
    Left,
    #[default]
    Right,
    Top,
    Bottom,
}

/// A drawn connection between two script nodes
#[derive(Debug, PartialEq, Clone, Serialize, Deserialize)]
pub struct ScriptEdge {
    pub source: String,
    pub target: String,
    #[serde(default)]
    pub source_side: Side,
    #[serde(default = "enter_left")]
    pub target_side: Side,
    #[serde(default)]
    pub label: Option<String>,
}

fn enter_left() -> Side {
    Side::Left
}

impl ScriptEdge {
    pub fn new(source: impl Into<String>, target: impl Into<String>) -> Self {
        Self {
            source: source.into(),
            target: target.into(),
            source_side: Side::Right,
            target_side: Side::Left,
            label: None,
        }
    }

    /// The same edge leaving its source on the right and entering its
    /// target on the left
    pub fn left_to_right(self) -> Self {
        Self {
            source_side: Side::Right,
            target_side: Side::Left,
            ..self
        }
    }
}

/// Optional rows shown on every script node
#[derive(Debug, PartialEq, Eq, Copy, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct VisibleFields {
    pub scene: bool,
    pub art: bool,
    pub expression: bool,
}

impl Default for VisibleFields {
    fn default() -> Self {
        Self {
            scene: true,
            art: false,
            expression: false,
        }
    }
}

/// Dimensions used to measure script nodes
#[derive(Debug, PartialEq, Copy, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct ScriptMetrics {
    pub width: f32,
    pub header: f32,
    /// Height of each visible optional row
    pub field: f32,
    pub text: f32,
    pub choice_row: f32,
    pub padding: f32,
}

impl Default for ScriptMetrics {
    fn default() -> Self {
        Self {
            width: 280.0,
            header: 36.0,
            field: 28.0,
            text: 64.0,
            choice_row: 30.0,
            padding: 16.0,
        }
    }
}

impl ScriptMetrics {
    /// Size of a node given which optional rows are shown
    pub fn measure(&self, node: &ScriptNode, visible: &VisibleFields) -> Vec2 {
        let fields = [visible.scene, visible.art, visible.expression]
            .into_iter()
            .filter(|&shown| shown)
            .count();

        let height = self.header
            + fields as f32 * self.field
            + self.text
            + node.choices.len() as f32 * self.choice_row
            + self.padding;

        Vec2::new(self.width, height)
    }

    /// Every row height and the width must be finite and non-negative
    pub fn validate(&self) -> Result<(), ConfigError> {
        check_length("metrics.width", self.width)?;
        check_length("metrics.header", self.header)?;
        check_length("metrics.field", self.field)?;
        check_length("metrics.text", self.text)?;
        check_length("metrics.choice_row", self.choice_row)?;
        check_length("metrics.padding", self.padding)
    }
}

#[derive(Debug, PartialEq, Clone, Serialize, Deserialize, Default)]
#[serde(default)]
pub struct ScriptDocument {
    pub nodes: Vec<ScriptNode>,
    pub edges: Vec<ScriptEdge>,
    pub visible: VisibleFields,
}

impl ScriptDocument {
    /// The node the script starts from, if any
    pub fn start_node(&self) -> Option<&ScriptNode> {
        self.nodes.iter().find(|n| n.kind == NodeKind::Start)
    }

    /// Replace positions and edges with an arrangement
    ///
    /// Nodes missing from the arrangement keep their position.
    pub fn with_arrangement(mut self, arrangement: ScriptArrangement) -> Self {
        for node in &mut self.nodes {
            if let Some(&position) = arrangement.positions.get(&node.id) {
                node.position = position;
            }
        }
        if !arrangement.positions.is_empty() {
            self.edges = arrangement.edges;
        }
        self
    }
}

/// Result of laying out a script
#[derive(Debug, PartialEq, Clone, Default)]
pub struct ScriptArrangement {
    pub positions: HashMap<String, Point>,
    /// Edges anchored left to right
    pub edges: Vec<ScriptEdge>,
    /// Node ids of each column, top to bottom
    pub layers: Vec<Vec<String>>,
    pub crossings: usize,
}

/// Lay out a script left to right
///
/// The start node always heads the first column, the other entry points
/// follow in their current top to bottom order. Node ids must be unique:
/// nodes sharing an id are laid out once and receive the same position.
pub fn arrange_script(
    document: &ScriptDocument,
    config: &LayoutConfig,
    metrics: &ScriptMetrics,
) -> ScriptArrangement {
    if document.nodes.is_empty() {
        return ScriptArrangement::default();
    }

    let graph = LayoutGraph::from_edges(
        document.nodes.iter().map(|n| n.id.as_str()),
        document
            .nodes
            .iter()
            .flat_map(|n| n.links().map(move |target| (n.id.as_str(), target))),
    );

    let mut order =
        RootOrder::new().with_ranks(document.nodes.iter().map(|n| (n.id.as_str(), n.position.y)));
    if let Some(start) = document.start_node() {
        order = order.pinned(start.id.as_str());
    }

    let sizes: HashMap<&str, Vec2> = document
        .nodes
        .iter()
        .map(|n| (n.id.as_str(), metrics.measure(n, &document.visible)))
        .collect();

    let engine = LayeredLayout::new(*config);
    let layers = engine.compute_layers(graph, &order);
    let positions = engine.compute_positions(&layers, &sizes);

    debug!("Arranged {} script nodes in {} columns", positions.len(), layers.len());

    ScriptArrangement {
        positions: positions
            .into_iter()
            .map(|(id, position)| (id.to_owned(), position))
            .collect(),
        edges: document
            .edges
            .iter()
            .cloned()
            .map(ScriptEdge::left_to_right)
            .collect(),
        layers: layers
            .nodes()
            .into_iter()
            .map(|layer| layer.into_iter().map(str::to_owned).collect())
            .collect(),
        crossings: layers.crossings,
    }
}
