use anyhow::{Context, Result};
use log::{debug, info, warn};
use wgpu::SurfaceError;
use winit::dpi::PhysicalSize;
use winit::window::Window;

/// GPU initialisation parameters.
#[derive(Debug, Clone)]
pub struct GpuInit {
    /// Prefer an sRGB surface format when available.
    pub prefer_srgb: bool,

    /// Falls back to FIFO when the surface does not offer it.
    pub present_mode: wgpu::PresentMode,

    /// Defaults to the low-power adapter.
    pub power_preference: wgpu::PowerPreference,

    pub required_limits: wgpu::Limits,

    /// Hint only; support depends on platform/backend.
    pub frame_latency: u32,
}

impl Default for GpuInit {
    fn default() -> Self {
        Self {
            prefer_srgb: true,
            present_mode: wgpu::PresentMode::Fifo,
            power_preference: wgpu::PowerPreference::LowPower,
            required_limits: wgpu::Limits::downlevel_defaults(),
            frame_latency: 2,
        }
    }
}

impl GpuInit {
    pub fn with_present_mode(mut self, mode: wgpu::PresentMode) -> Self {
        self.present_mode = mode;
        self
    }

    pub fn with_srgb(mut self, prefer: bool) -> Self {
        self.prefer_srgb = prefer;
        self
    }

    pub fn with_power_preference(mut self, preference: wgpu::PowerPreference) -> Self {
        self.power_preference = preference;
        self
    }

    pub fn with_limits(mut self, limits: wgpu::Limits) -> Self {
        self.required_limits = limits;
        self
    }
}

/// Device, queue and the window's configured surface.
///
/// The surface borrows the window for `'w`; the runtime keeps both in one
/// self-referencing entry so the window always outlives it.
pub struct Gpu<'w> {
    surface: wgpu::Surface<'w>,
    device: wgpu::Device,
    queue: wgpu::Queue,
    config: wgpu::SurfaceConfiguration,

    /// Drawable size in physical pixels; zero while minimised.
    size: PhysicalSize<u32>,
}

/// One acquired surface texture with its view and encoder.
///
/// Holding it blocks acquisition of the next frame; submit promptly.
pub struct GpuFrame {
    pub surface_texture: wgpu::SurfaceTexture,
    pub view: wgpu::TextureView,
    pub encoder: wgpu::CommandEncoder,
}

/// What the runtime should do after a surface error.
#[derive(Debug, Copy, Clone, Eq, PartialEq)]
pub enum SurfaceErrorAction {
    /// Surface was reconfigured; the canvas must be redrawn.
    Reconfigured,
    /// Transient; drop this frame and redraw on the next one.
    SkipFrame,
    /// Unrecoverable (out of memory).
    Fatal,
}

impl<'w> Gpu<'w> {
    pub async fn new(window: &'w Window, init: GpuInit) -> Result<Self> {
        let size = window.inner_size();
        anyhow::ensure!(size.width > 0 && size.height > 0, "window has zero size");

        let instance = wgpu::Instance::new(&wgpu::InstanceDescriptor {
            backends: wgpu::Backends::all(),
            ..Default::default()
        });

        let surface = instance
            .create_surface(window)
            .context("failed to create wgpu surface")?;

        let adapter = instance
            .request_adapter(&wgpu::RequestAdapterOptions {
                power_preference: init.power_preference,
                compatible_surface: Some(&surface),
                force_fallback_adapter: false,
            })
            .await
            .context("failed to find a suitable GPU adapter")?;

        let info = adapter.get_info();
        info!("gpu: {} ({:?}, {:?})", info.name, info.backend, info.device_type);

        let (device, queue) = adapter
            .request_device(&wgpu::DeviceDescriptor {
                label: Some("quill device"),
                required_features: wgpu::Features::empty(),
                required_limits: init.required_limits.clone(),
                experimental_features: wgpu::ExperimentalFeatures::disabled(),
                memory_hints: wgpu::MemoryHints::MemoryUsage,
                trace: wgpu::Trace::Off,
            })
            .await
            .context("failed to create wgpu device/queue")?;

        let caps = surface.get_capabilities(&adapter);
        let config = surface_config(&caps, size, &init)
            .context("surface reports no supported formats")?;
        debug!(
            "gpu: surface {:?} {}x{} {:?}",
            config.format, config.width, config.height, config.present_mode
        );

        surface.configure(&device, &config);

        Ok(Gpu {
            surface,
            device,
            queue,
            config,
            size,
        })
    }

    pub fn surface_format(&self) -> wgpu::TextureFormat {
        self.config.format
    }

    pub fn size(&self) -> PhysicalSize<u32> {
        self.size
    }

    /// `false` while the window has a zero-sized drawable.
    pub fn is_drawable(&self) -> bool {
        self.size.width > 0 && self.size.height > 0
    }

    pub fn device(&self) -> &wgpu::Device {
        &self.device
    }

    pub fn queue(&self) -> &wgpu::Queue {
        &self.queue
    }

    /// Reconfigures the surface; a zero size is recorded and configuration deferred.
    pub fn resize(&mut self, new_size: PhysicalSize<u32>) {
        self.size = new_size;
        if !self.is_drawable() {
            return;
        }
        self.config.width = new_size.width;
        self.config.height = new_size.height;
        self.surface.configure(&self.device, &self.config);
    }

    pub fn begin_frame(&self) -> std::result::Result<GpuFrame, SurfaceError> {
        let surface_texture = self.surface.get_current_texture()?;
        let view = surface_texture
            .texture
            .create_view(&wgpu::TextureViewDescriptor::default());
        let encoder = self
            .device
            .create_command_encoder(&wgpu::CommandEncoderDescriptor {
                label: Some("quill canvas encoder"),
            });

        Ok(GpuFrame {
            surface_texture,
            view,
            encoder,
        })
    }

    /// Submits the frame's commands and presents it.
    pub fn submit(&self, frame: GpuFrame) {
        let GpuFrame { surface_texture, view, encoder } = frame;
        self.queue.submit(std::iter::once(encoder.finish()));
        drop(view);
        surface_texture.present();
    }

    pub fn handle_surface_error(&mut self, err: SurfaceError) -> SurfaceErrorAction {
        match err {
            SurfaceError::Lost | SurfaceError::Outdated => {
                warn!("gpu: surface {err:?}; reconfiguring");
                if self.is_drawable() {
                    self.surface.configure(&self.device, &self.config);
                }
                SurfaceErrorAction::Reconfigured
            }
            SurfaceError::OutOfMemory => SurfaceErrorAction::Fatal,
            SurfaceError::Timeout | SurfaceError::Other => {
                warn!("gpu: surface {err:?}; skipping frame");
                SurfaceErrorAction::SkipFrame
            }
        }
    }
}

/// Surface configuration for `size` from the surface's capabilities.
///
/// `None` when the surface offers no format at all.
fn surface_config(
    caps: &wgpu::SurfaceCapabilities,
    size: PhysicalSize<u32>,
    init: &GpuInit,
) -> Option<wgpu::SurfaceConfiguration> {
    let format = choose_surface_format(&caps.formats, init.prefer_srgb)?;

    let present_mode = if caps.present_modes.contains(&init.present_mode) {
        init.present_mode
    } else {
        warn!("gpu: present mode {:?} unsupported; using Fifo", init.present_mode);
        wgpu::PresentMode::Fifo
    };

    // Premultiplied output is preferred; the polygon pipeline blends premultiplied colour.
    let alpha_mode = [wgpu::CompositeAlphaMode::PreMultiplied, wgpu::CompositeAlphaMode::Opaque]
        .into_iter()
        .find(|m| caps.alpha_modes.contains(m))
        .or_else(|| caps.alpha_modes.first().copied())
        .unwrap_or(wgpu::CompositeAlphaMode::Auto);

    Some(wgpu::SurfaceConfiguration {
        usage: wgpu::TextureUsages::RENDER_ATTACHMENT,
        format,
        width: size.width,
        height: size.height,
        present_mode,
        alpha_mode,
        view_formats: vec![],
        desired_maximum_frame_latency: init.frame_latency,
    })
}

fn choose_surface_format(
    formats: &[wgpu::TextureFormat],
    prefer_srgb: bool,
) -> Option<wgpu::TextureFormat> {
    let first = formats.first().copied()?;
    if prefer_srgb {
        if let Some(srgb) = formats.iter().copied().find(|f| f.is_srgb()) {
            return Some(srgb);
        }
    }
    Some(first)
}

#[cfg(test)]
mod tests {
    use super::*;
    use wgpu::{CompositeAlphaMode, PresentMode, TextureFormat};

    fn caps(formats: Vec<TextureFormat>, present_modes: Vec<PresentMode>) -> wgpu::SurfaceCapabilities {
        let mut caps = wgpu::SurfaceCapabilities::default();
        caps.formats = formats;
        caps.present_modes = present_modes;
        caps.alpha_modes = vec![CompositeAlphaMode::Opaque];
        caps
    }

    #[test]
    fn srgb_format_preferred_when_offered() {
        let formats = [TextureFormat::Bgra8Unorm, TextureFormat::Bgra8UnormSrgb];
        assert_eq!(choose_surface_format(&formats, true), Some(TextureFormat::Bgra8UnormSrgb));
        assert_eq!(choose_surface_format(&formats, false), Some(TextureFormat::Bgra8Unorm));
        assert_eq!(choose_surface_format(&[], true), None);
    }

    #[test]
    fn unsupported_present_mode_falls_back_to_fifo() {
        let caps = caps(vec![TextureFormat::Rgba8Unorm], vec![PresentMode::Fifo]);
        let init = GpuInit::default().with_present_mode(PresentMode::Mailbox);

        let config = surface_config(&caps, PhysicalSize::new(640, 360), &init);
        let config = config.expect("format available");
        assert_eq!(config.present_mode, PresentMode::Fifo);
        assert_eq!((config.width, config.height), (640, 360));
        assert_eq!(config.alpha_mode, CompositeAlphaMode::Opaque);
    }

    #[test]
    fn no_formats_means_no_config() {
        let caps = caps(vec![], vec![PresentMode::Fifo]);
        assert!(surface_config(&caps, PhysicalSize::new(1, 1), &GpuInit::default()).is_none());
    }
}
