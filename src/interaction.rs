//! Pointer and keyboard handling per interaction mode.
//!
//! Events arrive in scene coordinates (plus raw screen coordinates for panning). The state
//! kept between events (pending connect source, drag, pan, rubber band) lives in
//! [`InteractionState`] inside the scene and is dropped whenever the mode changes.

use crate::error::ParseModeError;
use crate::model::{EdgeKey, Rect, Shape, Vec2};
use crate::scene::Scene;
use crate::shell::{Notice, Shell};
use log::debug;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Mode {
    #[default]
    Move,
    Draw,
    Connect,
    Edit,
    Delete,
}

impl Mode {
    pub const ALL: [Mode; 5] = [Mode::Move, Mode::Draw, Mode::Connect, Mode::Edit, Mode::Delete];

    pub fn as_str(self) -> &'static str {
        match self {
            Mode::Move => "move",
            Mode::Draw => "draw",
            Mode::Connect => "connect",
            Mode::Edit => "edit",
            Mode::Delete => "delete",
        }
    }
}

impl fmt::Display for Mode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Mode {
    type Err = ParseModeError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "move" => Ok(Mode::Move),
            "draw" => Ok(Mode::Draw),
            "connect" | "edge" => Ok(Mode::Connect),
            "edit" => Ok(Mode::Edit),
            "delete" => Ok(Mode::Delete),
            _ => Err(ParseModeError(s.to_string())),
        }
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum PointerKind {
    Press,
    Move,
    Release,
    DoubleClick,
}

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum PointerButton {
    #[default]
    Primary,
    Middle,
}

#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
pub struct PointerEvent {
    pub kind: PointerKind,
    #[serde(default)]
    pub button: PointerButton,
    /// Scene coordinates.
    pub pos: Vec2,
    /// Screen coordinates; only panning reads them.
    #[serde(default)]
    pub screen: Vec2,
    /// Selection modifier (ctrl/shift) held.
    #[serde(default)]
    pub additive: bool,
}

impl PointerEvent {
    pub fn new(kind: PointerKind, pos: Vec2) -> Self {
        PointerEvent {
            kind,
            button: PointerButton::Primary,
            pos,
            screen: pos,
            additive: false,
        }
    }
    pub fn press(pos: Vec2) -> Self {
        Self::new(PointerKind::Press, pos)
    }
    pub fn moved(pos: Vec2) -> Self {
        Self::new(PointerKind::Move, pos)
    }
    pub fn release(pos: Vec2) -> Self {
        Self::new(PointerKind::Release, pos)
    }
    pub fn double_click(pos: Vec2) -> Self {
        Self::new(PointerKind::DoubleClick, pos)
    }
    pub fn with_button(mut self, button: PointerButton) -> Self {
        self.button = button;
        self
    }
    pub fn with_screen(mut self, screen: Vec2) -> Self {
        self.screen = screen;
        self
    }
    pub fn additive(mut self, additive: bool) -> Self {
        self.additive = additive;
        self
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum KeyCommand {
    DeleteSelected,
    SelectAll,
    ClearSelection,
}

/// Dashed line from the pending connect source to the pointer.
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
pub struct PreviewLine {
    pub from: Vec2,
    pub to: Vec2,
}

#[derive(Clone, Debug, PartialEq)]
pub(crate) struct DragState {
    anchor: Vec2,
    origins: Vec<(u32, Vec2)>,
}

#[derive(Clone, Copy, Debug, PartialEq)]
pub(crate) struct RubberBand {
    origin: Vec2,
    current: Vec2,
    additive: bool,
}

#[derive(Clone, Debug, Default, PartialEq)]
pub(crate) struct InteractionState {
    mode: Mode,
    pending_source: Option<u32>,
    preview: Option<PreviewLine>,
    drag: Option<DragState>,
    pan_from: Option<Vec2>,
    band: Option<RubberBand>,
    hover: Option<Shape>,
}

impl InteractionState {
    fn cancel_connect(&mut self) {
        self.pending_source = None;
        self.preview = None;
    }

    /// Drop transient state but keep the mode.
    pub(crate) fn reset(&mut self) {
        *self = InteractionState {
            mode: self.mode,
            ..InteractionState::default()
        };
    }

    /// Forget every reference to a deleted node.
    pub(crate) fn forget_node(&mut self, id: u32) {
        if self.pending_source == Some(id) {
            self.cancel_connect();
        }
        if let Some(drag) = self.drag.as_mut() {
            drag.origins.retain(|(n, _)| *n != id);
        }
        if self.hover == Some(Shape::Node(id)) {
            self.hover = None;
        }
    }
}

impl Scene {
    pub fn mode(&self) -> Mode {
        self.interaction.mode
    }

    /// Switch mode; any pending connect source, preview line, drag or rubber band is dropped.
    pub fn set_mode(&mut self, mode: Mode) {
        debug!("mode {} -> {}", self.interaction.mode, mode);
        self.interaction.reset();
        self.interaction.mode = mode;
    }

    pub fn pending_source(&self) -> Option<u32> {
        self.interaction.pending_source
    }
    pub fn preview_line(&self) -> Option<PreviewLine> {
        self.interaction.preview
    }
    pub fn hovered(&self) -> Option<Shape> {
        self.interaction.hover
    }
    pub fn is_dragging(&self) -> bool {
        self.interaction.drag.is_some()
    }
    pub fn is_panning(&self) -> bool {
        self.interaction.pan_from.is_some()
    }
    /// Current rubber-band rectangle while one is being dragged out.
    pub fn rubber_band(&self) -> Option<Rect> {
        self.interaction
            .band
            .map(|b| Rect::from_corners(b.origin, b.current))
    }

    pub fn handle_pointer(&mut self, event: &PointerEvent, shell: &mut dyn Shell) {
        match (event.button, event.kind) {
            (PointerButton::Middle, PointerKind::Press) => {
                self.interaction.pan_from = Some(event.screen);
            }
            (PointerButton::Middle, PointerKind::Release) => {
                self.interaction.pan_from = None;
            }
            (_, PointerKind::Move) => self.pointer_moved(event),
            (PointerButton::Primary, PointerKind::Press) => self.pointer_pressed(event, shell),
            (PointerButton::Primary, PointerKind::Release) => self.pointer_released(event),
            (_, PointerKind::DoubleClick) => match self.pick(event.pos) {
                Some(Shape::Node(id)) => self.edit_label(id, shell),
                Some(Shape::Edge(key)) => self.edit_weight(key, shell),
                None => {}
            },
        }
    }

    pub fn handle_key(&mut self, command: KeyCommand) {
        match command {
            KeyCommand::DeleteSelected => {
                let n = self.delete_selected();
                debug!("deleted {} selected shapes", n);
            }
            KeyCommand::SelectAll => self.select_all(),
            KeyCommand::ClearSelection => self.clear_selection(),
        }
    }

    fn pointer_pressed(&mut self, event: &PointerEvent, shell: &mut dyn Shell) {
        let pos = event.pos;
        let hit = self.pick(pos);

        if !self.bounds().contains(pos) {
            match hit {
                None => self.clear_selection(),
                Some(shape) => self.press_select(shape, event),
            }
            return;
        }

        match self.interaction.mode {
            Mode::Draw => {
                if hit.and_then(|s| s.as_node()).is_none() {
                    self.create_node(pos, None, None);
                }
            }
            Mode::Connect => match hit {
                Some(Shape::Node(id)) => match self.interaction.pending_source {
                    None => {
                        let from = self.graph().node(id).map(|n| n.position).unwrap_or(pos);
                        self.interaction.pending_source = Some(id);
                        self.interaction.preview = Some(PreviewLine { from, to: pos });
                        debug!("connect: source {}", id);
                    }
                    Some(source) => {
                        self.interaction.cancel_connect();
                        self.connect(source, id, shell);
                    }
                },
                _ => {
                    if self.interaction.pending_source.is_some() {
                        debug!("connect: aborted");
                    }
                    self.interaction.cancel_connect();
                }
            },
            Mode::Delete => match hit {
                Some(Shape::Node(id)) => {
                    self.delete_node(id);
                }
                Some(Shape::Edge(key)) => {
                    self.delete_edge(key);
                }
                None => {}
            },
            Mode::Edit => match hit {
                Some(Shape::Node(id)) => self.edit_label(id, shell),
                Some(Shape::Edge(key)) => self.edit_weight(key, shell),
                None => {}
            },
            Mode::Move => {
                if hit.is_none() {
                    if !event.additive {
                        self.clear_selection();
                    }
                    self.interaction.band = Some(RubberBand {
                        origin: pos,
                        current: pos,
                        additive: event.additive,
                    });
                }
            }
        }

        match hit {
            Some(shape) => self.press_select(shape, event),
            None if self.interaction.mode != Mode::Move => self.clear_selection(),
            None => {}
        }
    }

    /// Selection and drag start for a press that landed on `shape`, if it still exists.
    fn press_select(&mut self, shape: Shape, event: &PointerEvent) {
        if event.additive {
            if self.is_selected(shape) {
                self.deselect(shape);
                return;
            }
            self.select(shape, true);
        } else if !self.is_selected(shape) {
            self.select(shape, false);
        }
        if let Shape::Node(id) = shape {
            if !self.is_selected(shape) {
                return;
            }
            // Every selected node follows the drag.
            let mut origins: Vec<(u32, Vec2)> = self
                .selected_nodes()
                .into_iter()
                .filter_map(|n| self.graph().node(n).map(|node| (n, node.position)))
                .collect();
            if origins.is_empty() {
                if let Some(node) = self.graph().node(id) {
                    origins.push((id, node.position));
                }
            }
            self.interaction.drag = Some(DragState {
                anchor: event.pos,
                origins,
            });
        }
    }

    fn pointer_moved(&mut self, event: &PointerEvent) {
        if let Some(last) = self.interaction.pan_from {
            self.pan_by(event.screen - last);
            self.interaction.pan_from = Some(event.screen);
            return;
        }
        if let Some(preview) = self.interaction.preview.as_mut() {
            preview.to = event.pos;
        }
        if let Some(band) = self.interaction.band.as_mut() {
            band.current = event.pos;
        }
        let dragging = match self.interaction.drag.clone() {
            Some(drag) => {
                let delta = event.pos - drag.anchor;
                for (id, origin) in drag.origins {
                    self.move_node(id, origin + delta);
                }
                true
            }
            None => false,
        };
        // The preview starts wherever the pending source is now.
        let source_pos = self
            .interaction
            .pending_source
            .and_then(|id| self.graph().node(id))
            .map(|n| n.position);
        if let (Some(preview), Some(from)) = (self.interaction.preview.as_mut(), source_pos) {
            preview.from = from;
        }
        if !dragging {
            self.interaction.hover = self.pick(event.pos);
        }
    }

    fn pointer_released(&mut self, event: &PointerEvent) {
        self.interaction.drag = None;
        if let Some(mut band) = self.interaction.band.take() {
            band.current = event.pos;
            let rect = Rect::from_corners(band.origin, band.current);
            let n = self.select_in_rect(rect, band.additive);
            debug!("rubber band selected {} nodes", n);
        }
    }

    fn connect(&mut self, source: u32, dest: u32, shell: &mut dyn Shell) {
        if !self.graph().contains_node(source) || !self.graph().contains_node(dest) {
            debug!("connect: endpoint vanished ({} -> {})", source, dest);
            return;
        }
        if self.graph().contains_edge(source, dest) {
            shell.notify(Notice::info(
                "Edge exists",
                "An edge in this direction already exists.",
            ));
            return;
        }
        let initial = self.config().default_weight.clone();
        let Some(weight) = shell.prompt_weight(&initial) else {
            debug!("connect: weight prompt cancelled");
            return;
        };
        if let Err(err) = self.create_edge(source, dest, weight) {
            shell.notify(Notice::warning("Cannot create edge", err.to_string()));
        }
    }

    fn edit_label(&mut self, id: u32, shell: &mut dyn Shell) {
        let Some(current) = self.graph().node(id).map(|n| n.label.clone()) else {
            return;
        };
        if let Some(label) = shell.prompt_label(&current) {
            self.set_node_label(id, label);
        }
    }

    fn edit_weight(&mut self, key: EdgeKey, shell: &mut dyn Shell) {
        let Some(current) = self.graph().edge(key).map(|e| e.weight.clone()) else {
            return;
        };
        if let Some(weight) = shell.prompt_weight(&current) {
            self.set_edge_weight(key, weight);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn mode_names_round_trip() {
        for m in Mode::ALL {
            assert_eq!(m.to_string().parse::<Mode>(), Ok(m));
        }
        assert_eq!("edge".parse::<Mode>(), Ok(Mode::Connect));
        assert_eq!(" Draw ".parse::<Mode>(), Ok(Mode::Draw));
        assert!("paint".parse::<Mode>().is_err());
        assert_eq!(serde_json::to_string(&Mode::Connect).ok().as_deref(), Some("\"connect\""));
    }

    #[test]
    fn reset_keeps_mode() {
        let mut st = InteractionState {
            mode: Mode::Connect,
            pending_source: Some(3),
            ..InteractionState::default()
        };
        st.reset();
        assert_eq!(st.mode, Mode::Connect);
        assert_eq!(st.pending_source, None);
    }

    #[test]
    fn pointer_event_json_defaults() {
        let e: PointerEvent =
            serde_json::from_str(r#"{"kind":"press","pos":{"x":1.0,"y":2.0}}"#).expect("event");
        assert_eq!(e.button, PointerButton::Primary);
        assert!(!e.additive);
    }
}
