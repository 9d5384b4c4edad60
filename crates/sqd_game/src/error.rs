use sqd_platform::PlatformError;
use sqd_render::GpuError;

use crate::config::ConfigError;

#[derive(Debug, thiserror::Error)]
pub enum DemoError {
    #[error(transparent)]
    Platform(#[from] PlatformError),

    #[error(transparent)]
    Gpu(#[from] GpuError),

    #[error(transparent)]
    Config(#[from] ConfigError),
}

impl DemoError {
    /// Process exit code: `2` when the windowing/graphics stack is unusable,
    /// `1` for everything else.
    pub fn exit_code(&self) -> i32 {
        match self {
            Self::Platform(_) | Self::Gpu(_) => 2,
            Self::Config(_) => 1,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn graphics_failures_exit_with_two() {
        assert_eq!(DemoError::Gpu(GpuError::NoAdapter).exit_code(), 2);
    }

    #[test]
    fn config_failures_exit_with_one() {
        let err = DemoError::from(ConfigError::Invalid("width must be > 0".to_string()));
        assert_eq!(err.exit_code(), 1);
        assert!(err.to_string().contains("width must be > 0"));
    }
}
