//! Error types surfaced by the viewer.
//!
//! Geometry loading has its own error in the geometry module. A file that
//! fails to load is logged and skipped, so it never reaches [`AppError`].

use thiserror::Error;

/// Failures while bringing up the GPU.
#[derive(Debug, Error)]
pub enum GpuError {
    #[error("failed to create surface: {0}")]
    Surface(#[from] wgpu::CreateSurfaceError),
    #[error("no suitable GPU adapter: {0}")]
    Adapter(#[from] wgpu::RequestAdapterError),
    #[error("failed to create device: {0}")]
    Device(#[from] wgpu::RequestDeviceError),
    /// The adapter can present to the window but lists no texture format.
    #[error("surface reports no supported formats")]
    NoSurfaceFormat,
}

/// Reasons [`run`](crate::run) gives up.
#[derive(Debug, Error)]
pub enum AppError {
    /// Every configured model failed to load. Holds the number attempted.
    #[error("none of the {0} model file(s) could be loaded")]
    NoModels(usize),
    #[error(transparent)]
    Gpu(#[from] GpuError),
    #[error(transparent)]
    EventLoop(#[from] winit::error::EventLoopError),
    #[error("failed to create window: {0}")]
    Window(#[from] winit::error::OsError),
    /// A surface failure that reconfiguring cannot recover from.
    #[error("cannot render to surface: {0}")]
    Surface(#[from] wgpu::SurfaceError),
}
