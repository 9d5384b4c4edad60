use glam::Mat4;

#[repr(C)]
#[derive(Copy, Clone, Debug, bytemuck::Pod, bytemuck::Zeroable)]
pub struct CameraUniform {
    pub view_proj: [[f32; 4]; 4],
}

/// Screen-space projection: `(0, 0)` is the top-left corner of the window,
/// `(width, height)` the bottom-right, both in logical pixels.
pub struct ScreenCamera {
    pub viewport: (f32, f32),
}

impl ScreenCamera {
    pub fn new(logical_width: f32, logical_height: f32) -> Self {
        Self {
            viewport: (logical_width, logical_height),
        }
    }

    pub fn projection(&self) -> Mat4 {
        Mat4::orthographic_rh(0.0, self.viewport.0, self.viewport.1, 0.0, -1.0, 1.0)
    }

    pub fn build_uniform(&self) -> CameraUniform {
        CameraUniform {
            view_proj: self.projection().to_cols_array_2d(),
        }
    }
}
