//! Tool modes and the gesture-driven input router.

use crate::gesture::Gesture;
use crate::shapes::ShapeKind;
use kurbo::Point;
use serde::{Deserialize, Serialize};

/// Available tools.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum ToolKind {
    #[default]
    Pen,
    Circle,
    Rectangle,
    Square,
    Oval,
    Triangle,
    Star,
}

impl ToolKind {
    pub const ALL: [ToolKind; 7] = [
        ToolKind::Pen,
        ToolKind::Circle,
        ToolKind::Rectangle,
        ToolKind::Square,
        ToolKind::Oval,
        ToolKind::Triangle,
        ToolKind::Star,
    ];

    /// The shape this tool drags out, or `None` for the pen.
    pub fn shape_kind(self) -> Option<ShapeKind> {
        match self {
            ToolKind::Pen => None,
            ToolKind::Circle => Some(ShapeKind::Circle),
            ToolKind::Rectangle => Some(ShapeKind::Rectangle),
            ToolKind::Square => Some(ShapeKind::Square),
            ToolKind::Oval => Some(ShapeKind::Oval),
            ToolKind::Triangle => Some(ShapeKind::Triangle),
            ToolKind::Star => Some(ShapeKind::Star),
        }
    }

    pub fn name(self) -> &'static str {
        self.shape_kind().map_or("pen", ShapeKind::name)
    }

    pub fn from_name(name: &str) -> Option<Self> {
        let name = name.trim();
        Self::ALL
            .into_iter()
            .find(|tool| tool.name().eq_ignore_ascii_case(name))
    }
}

impl From<ShapeKind> for ToolKind {
    fn from(kind: ShapeKind) -> Self {
        match kind {
            ShapeKind::Circle => ToolKind::Circle,
            ShapeKind::Rectangle => ToolKind::Rectangle,
            ShapeKind::Square => ToolKind::Square,
            ShapeKind::Oval => ToolKind::Oval,
            ShapeKind::Triangle => ToolKind::Triangle,
            ShapeKind::Star => ToolKind::Star,
        }
    }
}

/// State of a tool interaction.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub enum ToolState {
    /// Waiting for a point gesture.
    #[default]
    Idle,
    /// Drawing a freehand stroke.
    StrokeActive {
        start: Point,
        current: Point,
    },
    /// Dragging out a shape from a fixed anchor.
    ShapeActive {
        kind: ShapeKind,
        anchor: Point,
        current: Point,
    },
}

/// What the board should do in response to a routed gesture.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub enum ToolAction {
    #[default]
    None,
    BeginStroke(Point),
    ExtendStroke(Point),
    FinishStroke,
    BeginShape { kind: ShapeKind, anchor: Point },
    UpdateShape(Point),
    CommitShape,
}

/// Manages the current tool and routes stable gestures into actions.
///
/// The manager never touches pixels. It only tracks the interaction state
/// and tells the caller what to do.
#[derive(Debug, Clone, Default)]
pub struct ToolManager {
    current_tool: ToolKind,
    state: ToolState,
}

impl ToolManager {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn current_tool(&self) -> ToolKind {
        self.current_tool
    }

    pub fn state(&self) -> ToolState {
        self.state
    }

    /// Check if a tool interaction is active.
    pub fn is_active(&self) -> bool {
        !matches!(self.state, ToolState::Idle)
    }

    /// Route one stable gesture at the given cursor position.
    ///
    /// Only the point gesture draws. Any other gesture, including loss of
    /// the hand, finishes whatever is in progress.
    pub fn route(&mut self, gesture: Gesture, cursor: Point) -> ToolAction {
        if !gesture.is_point() {
            return self.finish();
        }

        match &mut self.state {
            ToolState::Idle => {}
            ToolState::StrokeActive { current, .. } => {
                *current = cursor;
                return ToolAction::ExtendStroke(cursor);
            }
            ToolState::ShapeActive { current, .. } => {
                *current = cursor;
                return ToolAction::UpdateShape(cursor);
            }
        }
        self.begin(cursor)
    }

    fn begin(&mut self, point: Point) -> ToolAction {
        match self.current_tool.shape_kind() {
            None => {
                self.state = ToolState::StrokeActive {
                    start: point,
                    current: point,
                };
                ToolAction::BeginStroke(point)
            }
            Some(kind) => {
                self.state = ToolState::ShapeActive {
                    kind,
                    anchor: point,
                    current: point,
                };
                ToolAction::BeginShape {
                    kind,
                    anchor: point,
                }
            }
        }
    }

    /// End the current interaction and return to idle.
    pub fn finish(&mut self) -> ToolAction {
        let action = match self.state {
            ToolState::Idle => ToolAction::None,
            ToolState::StrokeActive { .. } => ToolAction::FinishStroke,
            ToolState::ShapeActive { .. } => ToolAction::CommitShape,
        };
        self.state = ToolState::Idle;
        action
    }

    /// Switch tools. An interaction in progress is finished first and the
    /// finishing action is returned.
    pub fn set_tool(&mut self, tool: ToolKind) -> ToolAction {
        let action = self.finish();
        self.current_tool = tool;
        action
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn p(x: f64, y: f64) -> Point {
        Point::new(x, y)
    }

    #[test]
    fn test_tool_selection() {
        let mut tm = ToolManager::new();
        assert_eq!(tm.current_tool(), ToolKind::Pen);
        assert_eq!(tm.set_tool(ToolKind::Star), ToolAction::None);
        assert_eq!(tm.current_tool(), ToolKind::Star);
    }

    #[test]
    fn test_pen_interaction() {
        let mut tm = ToolManager::new();
        assert_eq!(tm.route(Gesture::Palm, p(1.0, 1.0)), ToolAction::None);
        assert!(!tm.is_active());

        assert_eq!(tm.route(Gesture::Point, p(1.0, 1.0)), ToolAction::BeginStroke(p(1.0, 1.0)));
        assert!(tm.is_active());
        assert_eq!(tm.route(Gesture::Point, p(2.0, 3.0)), ToolAction::ExtendStroke(p(2.0, 3.0)));
        assert_eq!(
            tm.state(),
            ToolState::StrokeActive {
                start: p(1.0, 1.0),
                current: p(2.0, 3.0)
            }
        );
        assert_eq!(tm.route(Gesture::Fist, p(9.0, 9.0)), ToolAction::FinishStroke);
        assert!(!tm.is_active());
    }

    #[test]
    fn test_shape_interaction() {
        let mut tm = ToolManager::new();
        tm.set_tool(ToolKind::Rectangle);

        assert_eq!(
            tm.route(Gesture::Point, p(10.0, 10.0)),
            ToolAction::BeginShape {
                kind: ShapeKind::Rectangle,
                anchor: p(10.0, 10.0)
            }
        );
        assert_eq!(tm.route(Gesture::Point, p(50.0, 30.0)), ToolAction::UpdateShape(p(50.0, 30.0)));
        assert_eq!(tm.route(Gesture::Peace, p(50.0, 30.0)), ToolAction::CommitShape);
        assert_eq!(tm.state(), ToolState::Idle);
    }

    #[test]
    fn test_tracking_loss_finalizes() {
        let mut tm = ToolManager::new();
        tm.route(Gesture::Point, p(0.0, 0.0));
        assert_eq!(tm.route(Gesture::None, p(0.0, 0.0)), ToolAction::FinishStroke);

        tm.set_tool(ToolKind::Circle);
        tm.route(Gesture::Point, p(0.0, 0.0));
        assert_eq!(tm.route(Gesture::None, p(0.0, 0.0)), ToolAction::CommitShape);
    }

    #[test]
    fn test_tool_change_finishes_active_action() {
        let mut tm = ToolManager::new();
        tm.route(Gesture::Point, p(0.0, 0.0));
        assert_eq!(tm.set_tool(ToolKind::Oval), ToolAction::FinishStroke);
        assert!(!tm.is_active());

        // The next point gesture starts with the new tool.
        assert!(matches!(
            tm.route(Gesture::Point, p(5.0, 5.0)),
            ToolAction::BeginShape {
                kind: ShapeKind::Oval,
                ..
            }
        ));
    }

    #[test]
    fn test_tool_names() {
        assert_eq!(ToolKind::Pen.name(), "pen");
        assert_eq!(ToolKind::from_name("Triangle"), Some(ToolKind::Triangle));
        assert_eq!(ToolKind::from_name("laser"), None);
        for kind in ShapeKind::ALL {
            assert_eq!(ToolKind::from(kind).shape_kind(), Some(kind));
        }
    }
}
