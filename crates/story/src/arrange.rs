use crate::outline::{arrange_outline, OutlineDocument, CARD_SIZE};
use crate::script::{arrange_script, ScriptDocument, ScriptMetrics};
use enum_dispatch::enum_dispatch;
use serde::{Deserialize, Serialize};
use std::path::Path;
use storyloom_layout::{check_length, read_ron, ConfigError, LayoutConfig, Vec2};

/// Everything the two boards need to be laid out
#[derive(Debug, PartialEq, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct ArrangeSettings {
    pub script: LayoutConfig,
    pub outline: LayoutConfig,
    pub metrics: ScriptMetrics,
    pub card_size: Vec2,
}

impl Default for ArrangeSettings {
    fn default() -> Self {
        Self {
            script: LayoutConfig::script(),
            outline: LayoutConfig::outline(),
            metrics: ScriptMetrics::default(),
            card_size: CARD_SIZE,
        }
    }
}

impl ArrangeSettings {
    /// Load settings from a RON file, missing fields take their default
    pub fn load(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let settings: Self = read_ron(path)?;
        settings.validate()?;
        Ok(settings)
    }

    /// Check spacings and node sizes, none of them may be negative
    pub fn validate(&self) -> Result<(), ConfigError> {
        self.script.validate()?;
        self.outline.validate()?;
        self.metrics.validate()?;
        check_length("card_size.x", self.card_size.x)?;
        check_length("card_size.y", self.card_size.y)
    }
}

/// What a layout run changed
#[derive(Debug, PartialEq, Eq, Clone, Copy, Default)]
pub struct ArrangeSummary {
    pub nodes: usize,
    pub layers: usize,
    pub crossings: usize,
}

/// A board that can be laid out automatically
///
/// The whole result is committed at once: either every node moves or, for
/// an empty board, nothing changes.
#[enum_dispatch]
pub trait Arrange {
    fn arrange(&mut self, settings: &ArrangeSettings) -> ArrangeSummary;
}

impl Arrange for ScriptDocument {
    fn arrange(&mut self, settings: &ArrangeSettings) -> ArrangeSummary {
        let arrangement = arrange_script(self, &settings.script, &settings.metrics);
        let summary = ArrangeSummary {
            nodes: arrangement.positions.len(),
            layers: arrangement.layers.len(),
            crossings: arrangement.crossings,
        };
        *self = std::mem::take(self).with_arrangement(arrangement);
        summary
    }
}

impl Arrange for OutlineDocument {
    fn arrange(&mut self, settings: &ArrangeSettings) -> ArrangeSummary {
        let arrangement = arrange_outline(self, &settings.outline, settings.card_size);
        let summary = ArrangeSummary {
            nodes: arrangement.positions.len(),
            layers: arrangement.layers.len(),
            crossings: arrangement.crossings,
        };
        *self = std::mem::take(self).with_arrangement(&arrangement);
        summary
    }
}

/// Either kind of board
#[enum_dispatch(Arrange)]
#[derive(Debug, PartialEq, Clone, Serialize, Deserialize)]
pub enum Document {
    Script(ScriptDocument),
    Outline(OutlineDocument),
}
