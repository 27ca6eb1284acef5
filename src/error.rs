//! Error types for cosmic-field.
//!
//! The simulation itself cannot fail. Errors only come from the edges:
//! loading configuration, creating the host window and GPU presenter, and
//! exporting frames.

use std::fmt;

/// Errors that can occur while loading or validating a [`crate::FieldConfig`].
#[derive(Debug)]
pub enum ConfigError {
    /// Failed to read the configuration file.
    Io(std::io::Error),
    /// The file is not valid configuration JSON.
    Parse(serde_json::Error),
    /// A value is out of its allowed range.
    Invalid(String),
}

impl fmt::Display for ConfigError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ConfigError::Io(e) => write!(f, "Failed to read config file: {}", e),
            ConfigError::Parse(e) => write!(f, "Failed to parse config: {}", e),
            ConfigError::Invalid(msg) => write!(f, "Invalid config: {}", msg),
        }
    }
}

impl std::error::Error for ConfigError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            ConfigError::Io(e) => Some(e),
            ConfigError::Parse(e) => Some(e),
            ConfigError::Invalid(_) => None,
        }
    }
}

impl From<std::io::Error> for ConfigError {
    fn from(e: std::io::Error) -> Self {
        ConfigError::Io(e)
    }
}

impl From<serde_json::Error> for ConfigError {
    fn from(e: serde_json::Error) -> Self {
        ConfigError::Parse(e)
    }
}

/// Errors that can occur while bringing up the host window and presenter.
#[derive(Debug)]
pub enum HostError {
    /// Failed to create event loop.
    EventLoop(winit::error::EventLoopError),
    /// Failed to create window.
    Window(winit::error::OsError),
    /// Failed to create a surface for presenting.
    SurfaceCreation(wgpu::CreateSurfaceError),
    /// No compatible GPU adapter found.
    NoAdapter,
    /// Failed to create GPU device.
    DeviceCreation(wgpu::RequestDeviceError),
}

impl fmt::Display for HostError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            HostError::EventLoop(e) => write!(f, "Failed to create event loop: {}", e),
            HostError::Window(e) => write!(f, "Failed to create window: {}", e),
            HostError::SurfaceCreation(e) => write!(f, "Failed to create GPU surface: {}", e),
            HostError::NoAdapter => write!(f, "No compatible GPU adapter found. Ensure your system has a GPU with WebGPU/Vulkan/Metal/DX12 support."),
            HostError::DeviceCreation(e) => write!(f, "Failed to create GPU device: {}", e),
        }
    }
}

impl std::error::Error for HostError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            HostError::EventLoop(e) => Some(e),
            HostError::Window(e) => Some(e),
            HostError::SurfaceCreation(e) => Some(e),
            HostError::DeviceCreation(e) => Some(e),
            HostError::NoAdapter => None,
        }
    }
}

impl From<winit::error::EventLoopError> for HostError {
    fn from(e: winit::error::EventLoopError) -> Self {
        HostError::EventLoop(e)
    }
}

impl From<winit::error::OsError> for HostError {
    fn from(e: winit::error::OsError) -> Self {
        HostError::Window(e)
    }
}

impl From<wgpu::CreateSurfaceError> for HostError {
    fn from(e: wgpu::CreateSurfaceError) -> Self {
        HostError::SurfaceCreation(e)
    }
}

impl From<wgpu::RequestDeviceError> for HostError {
    fn from(e: wgpu::RequestDeviceError) -> Self {
        HostError::DeviceCreation(e)
    }
}

/// Errors that can occur when exporting a frame to an image file.
#[derive(Debug)]
pub enum ExportError {
    /// The raster has zero width or height.
    EmptyRaster,
    /// Failed to encode or write the image.
    Image(image::ImageError),
}

impl fmt::Display for ExportError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ExportError::EmptyRaster => write!(f, "Cannot export an empty raster"),
            ExportError::Image(e) => write!(f, "Failed to write image: {}", e),
        }
    }
}

impl std::error::Error for ExportError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            ExportError::Image(e) => Some(e),
            ExportError::EmptyRaster => None,
        }
    }
}

impl From<image::ImageError> for ExportError {
    fn from(e: image::ImageError) -> Self {
        ExportError::Image(e)
    }
}

/// Top-level error for running the field binary.
#[derive(Debug)]
pub enum FieldError {
    Config(ConfigError),
    Host(HostError),
    Export(ExportError),
}

impl fmt::Display for FieldError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            FieldError::Config(e) => write!(f, "{}", e),
            FieldError::Host(e) => write!(f, "Host error: {}", e),
            FieldError::Export(e) => write!(f, "Export error: {}", e),
        }
    }
}

impl std::error::Error for FieldError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            FieldError::Config(e) => Some(e),
            FieldError::Host(e) => Some(e),
            FieldError::Export(e) => Some(e),
        }
    }
}

impl From<ConfigError> for FieldError {
    fn from(e: ConfigError) -> Self {
        FieldError::Config(e)
    }
}

impl From<HostError> for FieldError {
    fn from(e: HostError) -> Self {
        FieldError::Host(e)
    }
}

impl From<ExportError> for FieldError {
    fn from(e: ExportError) -> Self {
        FieldError::Export(e)
    }
}
