#![warn(clippy::all, rust_2018_idioms)]

pub mod app;
pub mod command;
pub mod config;
pub mod coords;
pub mod document;
pub mod error;
pub mod export;
pub mod input;
pub mod panels;
pub mod renderer;
pub mod state;
pub mod stroke;
pub mod surface;
pub mod tools;

pub use app::PaintApp;
pub use command::{Command, SnapshotHistory};
pub use config::PaintConfig;
pub use coords::{SurfaceLayout, map_to_surface};
pub use document::Document;
pub use error::PaintError;
pub use export::ExportFormat;
pub use input::{InputEvent, InputLocation};
pub use renderer::Renderer;
pub use state::{EditorContext, EditorState};
pub use surface::{Snapshot, StrokeStyle, Surface};
pub use tools::{Tool, ToolBox, ToolKind, ToolSettings};
