//! wgpu device and window surface.
//!
//! [`GpuContext`] is created once the window exists and is passed by
//! reference to the render pass. Its fields are public so passes can talk to
//! wgpu directly.
//!
//! ```no_run
//! use std::sync::Arc;
//!
//! use shadelab::{GpuContext, GpuError};
//! use winit::window::Window;
//!
//! fn on_resumed(window: Arc<Window>) -> Result<GpuContext, GpuError> {
//!     let mut gpu = GpuContext::new(window)?;
//!     // Follow the window on resize; zero sizes are skipped.
//!     gpu.resize(1280, 720);
//!     assert_eq!((gpu.width(), gpu.height()), (1280, 720));
//!     Ok(gpu)
//! }
//! ```

use std::sync::Arc;

use winit::window::Window;

use crate::error::GpuError;

pub struct GpuContext {
    /// Window surface, owning its `Arc<Window>`.
    pub surface: wgpu::Surface<'static>,
    pub device: wgpu::Device,
    pub queue: wgpu::Queue,
    /// Current surface setup. `width` and `height` track the window.
    pub config: wgpu::SurfaceConfiguration,
}

impl GpuContext {
    /// Picks an adapter able to present to `window` and configures the
    /// surface with an sRGB format and vsync.
    pub fn new(window: Arc<Window>) -> Result<Self, GpuError> {
        let size = window.inner_size();

        let instance = wgpu::Instance::new(&wgpu::InstanceDescriptor {
            backends: wgpu::Backends::PRIMARY,
            ..Default::default()
        });

        let surface = instance.create_surface(window)?;

        let adapter = pollster::block_on(instance.request_adapter(&wgpu::RequestAdapterOptions {
            power_preference: wgpu::PowerPreference::default(),
            compatible_surface: Some(&surface),
            force_fallback_adapter: false,
        }))?;
        let info = adapter.get_info();
        log::info!("using {} ({:?})", info.name, info.backend);

        let (device, queue) = pollster::block_on(adapter.request_device(&wgpu::DeviceDescriptor {
            label: Some("Shadelab Device"),
            required_features: wgpu::Features::empty(),
            required_limits: wgpu::Limits::default(),
            memory_hints: Default::default(),
            trace: Default::default(),
            experimental_features: Default::default(),
        }))?;

        let surface_caps = surface.get_capabilities(&adapter);
        let surface_format = surface_caps
            .formats
            .iter()
            .find(|f| f.is_srgb())
            .or_else(|| surface_caps.formats.first())
            .copied()
            .ok_or(GpuError::NoSurfaceFormat)?;
        let alpha_mode = surface_caps
            .alpha_modes
            .first()
            .copied()
            .unwrap_or(wgpu::CompositeAlphaMode::Auto);

        let config = wgpu::SurfaceConfiguration {
            usage: wgpu::TextureUsages::RENDER_ATTACHMENT,
            format: surface_format,
            width: size.width.max(1),
            height: size.height.max(1),
            present_mode: wgpu::PresentMode::Fifo,
            alpha_mode,
            view_formats: vec![],
            desired_maximum_frame_latency: 2,
        };
        surface.configure(&device, &config);

        Ok(Self {
            surface,
            device,
            queue,
            config,
        })
    }

    /// Reconfigures the surface. Zero sizes, as reported while minimised,
    /// are ignored.
    pub fn resize(&mut self, width: u32, height: u32) {
        if width > 0 && height > 0 {
            self.config.width = width;
            self.config.height = height;
            self.surface.configure(&self.device, &self.config);
        }
    }

    pub fn width(&self) -> u32 {
        self.config.width
    }

    pub fn height(&self) -> u32 {
        self.config.height
    }
}
