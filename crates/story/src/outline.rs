use derive_more::Constructor;
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use storyloom_layout::{LayeredLayout, LayoutConfig, LayoutGraph, Point, RootOrder, Vec2};
use tracing::debug;

/// Size every outline card is drawn with
pub const CARD_SIZE: Vec2 = Vec2::new(240.0, 140.0);

/// A free-form card on the outline board
#[derive(Debug, PartialEq, Clone, Serialize, Deserialize, Default)]
#[serde(default)]
pub struct OutlineCard {
    pub id: String,
    pub title: String,
    pub body: String,
    pub position: Point,
}

impl OutlineCard {
    pub fn new(id: impl Into<String>, title: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            title: title.into(),
            ..Default::default()
        }
    }

    pub fn at(mut self, x: f32, y: f32) -> Self {
        self.position = Point::new(x, y);
        self
    }
}

#[derive(Debug, PartialEq, Eq, Clone, Serialize, Deserialize, Constructor)]
pub struct OutlineLink {
    pub source: String,
    pub target: String,
    #[serde(default)]
    pub label: Option<String>,
}

#[derive(Debug, PartialEq, Clone, Serialize, Deserialize, Default)]
#[serde(default)]
pub struct OutlineDocument {
    pub cards: Vec<OutlineCard>,
    pub links: Vec<OutlineLink>,
}

impl OutlineDocument {
    pub fn link(mut self, source: impl Into<String>, target: impl Into<String>) -> Self {
        self.links
            .push(OutlineLink::new(source.into(), target.into(), None));
        self
    }

    /// Move cards to their arranged positions
    ///
    /// Cards missing from the arrangement keep their position.
    pub fn with_arrangement(mut self, arrangement: &OutlineArrangement) -> Self {
        for card in &mut self.cards {
            if let Some(&position) = arrangement.positions.get(&card.id) {
                card.position = position;
            }
        }
        self
    }
}

/// Result of laying out an outline board
#[derive(Debug, PartialEq, Clone, Default)]
pub struct OutlineArrangement {
    pub positions: HashMap<String, Point>,
    /// Card ids of each column, top to bottom
    pub layers: Vec<Vec<String>>,
    pub crossings: usize,
}

/// Lay out an outline board left to right
///
/// Entry cards keep their current top to bottom order in the first column.
/// Card ids must be unique, cards sharing an id receive the same position.
pub fn arrange_outline(
    document: &OutlineDocument,
    config: &LayoutConfig,
    card_size: Vec2,
) -> OutlineArrangement {
    if document.cards.is_empty() {
        return OutlineArrangement::default();
    }

    let graph = LayoutGraph::from_edges(
        document.cards.iter().map(|c| c.id.as_str()),
        document
            .links
            .iter()
            .map(|l| (l.source.as_str(), l.target.as_str())),
    );
    let order =
        RootOrder::new().with_ranks(document.cards.iter().map(|c| (c.id.as_str(), c.position.y)));

    let engine = LayeredLayout::new(*config);
    let layers = engine.compute_layers(graph, &order);
    let positions = engine.compute_positions(&layers, &|_: &str| card_size);

    debug!("Arranged {} outline cards in {} columns", positions.len(), layers.len());

    OutlineArrangement {
        positions: positions
            .into_iter()
            .map(|(id, position)| (id.to_owned(), position))
            .collect(),
        layers: layers
            .nodes()
            .into_iter()
            .map(|layer| layer.into_iter().map(str::to_owned).collect())
            .collect(),
        crossings: layers.crossings,
    }
}
