pub mod camera;
pub mod color;
pub mod gpu_context;
pub mod quad_pipeline;
pub mod vertex;

pub use camera::{CameraUniform, ScreenCamera};
pub use color::{clear_color, srgb_to_linear};
pub use gpu_context::{GpuContext, GpuError};
pub use quad_pipeline::{QuadBatch, QuadPipeline};
pub use vertex::QuadVertex;
