//! Frame-pacing core: sample history, graph layout, sweep geometry and webcam picker logic.

pub mod config;
pub mod display;
pub mod driver;
pub mod error;
pub mod frame_loop;
pub mod graph;
pub mod history;
pub mod sweep;
pub mod webcam;

pub use config::{DemoConfig, HISTORY_DURATION};
pub use display::{Color, DrawCmd, Frame};
pub use driver::FrameDriver;
pub use error::{ConfigError, PickerError};
pub use frame_loop::{FrameLoop, SyntheticClock, Tick};
pub use graph::GraphRenderer;
pub use history::{FrameHistory, HistoryStats, Sample};
pub use sweep::Sweep;
pub use webcam::{DeviceInfo, DeviceKind, PickerParams, Selection, StreamConstraints};

// Re-export kurbo geometry so downstream crates don't need a direct dependency
pub use kurbo::{Line, Point, Rect};
