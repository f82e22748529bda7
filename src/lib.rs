pub mod model;
pub mod error;
pub mod config;
pub mod geometry {
    pub mod intersect;
    pub mod math;
    pub mod path;
    pub mod shape;
    pub mod tolerance;
}
pub mod graph;
pub mod matrix;
pub mod document;
pub mod notify;
pub mod shell;
pub mod scene;
pub mod interaction;

pub use config::SceneConfig;
pub use document::{Document, EdgeRecord, LoadReport, NodeRecord};
pub use error::{ConfigError, DocumentError, GraphError, ParseModeError};
pub use geometry::path::{EdgeCurve, EdgePath};
pub use geometry::shape::NodeGeometry;
pub use graph::{Graph, RemovedNode};
pub use interaction::{KeyCommand, Mode, PointerButton, PointerEvent, PointerKind, PreviewLine};
pub use matrix::{AdjacencyMatrix, MatrixExport, WeightStats};
pub use model::{Background, Edge, EdgeKey, ImageSize, Node, Rect, Shape, Vec2};
pub use notify::{GraphChanged, SubscriptionId};
pub use scene::{Neighbor, NodeInfo, Scene, ShapeGeometry, ViewTransform};
pub use shell::{Notice, NoticeLevel, Shell};
