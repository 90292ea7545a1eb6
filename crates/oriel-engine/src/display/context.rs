use anyhow::{Context, Result};
use winit::dpi::PhysicalSize;
use winit::window::Window;

use super::settings::{self, DisplaySettings, GrantedSettings};

/// Graphics context bound to a window.
///
/// This type is the low-level display side of the bootstrap:
/// - creates and stores Adapter/Device/Queue
/// - creates and configures the Surface (swapchain)
/// - resolves requested display settings and allocates the matching
///   depth/stencil and multisample attachments
pub struct DisplayContext<'w> {
    /// Surface bound to the window.
    ///
    /// Surface lifetime is tied to the window; architecture must ensure the
    /// window outlives the `DisplayContext` instance.
    surface: wgpu::Surface<'w>,

    /// Selected adapter.
    adapter: wgpu::Adapter,

    /// Logical device.
    device: wgpu::Device,

    /// Command queue.
    queue: wgpu::Queue,

    /// Active surface configuration.
    config: wgpu::SurfaceConfiguration,

    /// Current drawable size in physical pixels.
    size: PhysicalSize<u32>,

    /// Resolved depth/stencil format, `None` when neither was requested.
    depth_format: Option<wgpu::TextureFormat>,

    /// Resolved multisample count (1 = no antialiasing).
    sample_count: u32,

    /// Depth/stencil attachment view, sized to the surface.
    depth_view: Option<wgpu::TextureView>,

    /// Multisampled color target, present when `sample_count > 1`.
    multisample_view: Option<wgpu::TextureView>,

    /// Settings actually obtained after resolution.
    granted: GrantedSettings,
}

impl<'w> DisplayContext<'w> {
    /// Creates a display context bound to a window.
    ///
    /// Adapter/device acquisition is asynchronous under wgpu. The requested
    /// `settings` are resolved against adapter capabilities here; anything
    /// unsupported is downgraded, not rejected.
    pub async fn new(window: &'w Window, settings: DisplaySettings) -> Result<Self> {
        let size = window.inner_size();
        anyhow::ensure!(size.width > 0 && size.height > 0, "window has zero size");

        // Use all backends to allow wgpu to select the optimal platform backend.
        let instance = wgpu::Instance::new(&wgpu::InstanceDescriptor {
            backends: wgpu::Backends::all(),
            ..Default::default()
        });

        // Surface lifetime is tied to `window` via `'w`.
        let surface = instance
            .create_surface(window)
            .context("failed to create wgpu surface")?;

        let adapter = instance
            .request_adapter(&wgpu::RequestAdapterOptions {
                power_preference: wgpu::PowerPreference::HighPerformance,
                compatible_surface: Some(&surface),
                force_fallback_adapter: false,
            })
            .await
            .context("failed to find a suitable GPU adapter")?;

        let (device, queue) = adapter
            .request_device(&wgpu::DeviceDescriptor {
                label: Some("oriel-engine device"),
                required_features: wgpu::Features::empty(),
                required_limits: wgpu::Limits::default(),
                experimental_features: wgpu::ExperimentalFeatures::disabled(),
                memory_hints: wgpu::MemoryHints::Performance,
                trace: wgpu::Trace::Off,
            })
            .await
            .context("failed to create wgpu device/queue")?;

        let surface_caps = surface.get_capabilities(&adapter);
        let format =
            choose_surface_format(&surface_caps).context("no supported surface formats")?;

        let alpha_mode = surface_caps
            .alpha_modes
            .first()
            .copied()
            .unwrap_or(wgpu::CompositeAlphaMode::Auto);

        let config = wgpu::SurfaceConfiguration {
            usage: wgpu::TextureUsages::RENDER_ATTACHMENT,
            format,
            width: size.width.max(1),
            height: size.height.max(1),
            // FIFO is broadly supported and appropriate for a bootstrap surface.
            present_mode: wgpu::PresentMode::Fifo,
            alpha_mode,
            view_formats: vec![],
            desired_maximum_frame_latency: 2,
        };

        surface.configure(&device, &config);

        // Resolve the settings request against what this adapter can do.
        let depth_format = settings::depth_stencil_format(settings);

        let color_flags = adapter.get_texture_format_features(format).flags;
        let depth_flags = depth_format.map(|f| adapter.get_texture_format_features(f).flags);

        let sample_count = settings::downgrade_samples(settings.antialiasing, |count| {
            color_flags.sample_count_supported(count)
                && depth_flags.is_none_or(|flags| flags.sample_count_supported(count))
        });

        let granted = GrantedSettings::from_resolved(depth_format, sample_count);
        if granted.antialiasing != settings.antialiasing
            || granted.depth_bits != settings.depth_bits
            || granted.stencil_bits != settings.stencil_bits
        {
            log::debug!(
                "display settings adjusted: requested depth={} stencil={} antialiasing={}, \
                 granted depth={} stencil={} antialiasing={}",
                settings.depth_bits,
                settings.stencil_bits,
                settings.antialiasing,
                granted.depth_bits,
                granted.stencil_bits,
                granted.antialiasing,
            );
        }

        let (depth_view, multisample_view) =
            create_attachments(&device, &config, depth_format, sample_count);

        Ok(DisplayContext {
            surface,
            adapter,
            device,
            queue,
            config,
            size,
            depth_format,
            sample_count,
            depth_view,
            multisample_view,
            granted,
        })
    }

    /// Returns the settings actually obtained for this context.
    pub fn granted(&self) -> GrantedSettings {
        self.granted
    }

    /// Returns the active surface format.
    pub fn surface_format(&self) -> wgpu::TextureFormat {
        self.config.format
    }

    /// Returns the current drawable size (physical pixels).
    pub fn size(&self) -> PhysicalSize<u32> {
        self.size
    }

    /// Returns a reference to the logical device.
    pub fn device(&self) -> &wgpu::Device {
        &self.device
    }

    /// Returns a reference to the command queue.
    pub fn queue(&self) -> &wgpu::Queue {
        &self.queue
    }

    /// Returns information about the selected adapter.
    pub fn adapter_info(&self) -> wgpu::AdapterInfo {
        self.adapter.get_info()
    }

    /// Returns the depth/stencil attachment view, if one was requested.
    pub fn depth_stencil_view(&self) -> Option<&wgpu::TextureView> {
        self.depth_view.as_ref()
    }

    /// Returns the multisampled color target, if antialiasing is active.
    pub fn multisample_view(&self) -> Option<&wgpu::TextureView> {
        self.multisample_view.as_ref()
    }

    /// Reconfigures the surface after a resize.
    ///
    /// wgpu does not support configuring a surface with a 0x0 size; in that
    /// case, only internal state is updated and configuration is deferred.
    /// Attachments are recreated to match the new surface extent.
    pub fn resize(&mut self, new_size: PhysicalSize<u32>) {
        if new_size.width == 0 || new_size.height == 0 {
            self.size = new_size;
            return;
        }

        self.size = new_size;
        self.config.width = new_size.width;
        self.config.height = new_size.height;
        self.surface.configure(&self.device, &self.config);

        let (depth_view, multisample_view) =
            create_attachments(&self.device, &self.config, self.depth_format, self.sample_count);
        self.depth_view = depth_view;
        self.multisample_view = multisample_view;
    }
}

/// Allocates the depth/stencil and multisample attachments for a surface
/// configuration.
///
/// The multisample target shares the surface format; the depth attachment
/// must carry the same sample count as the color target it pairs with.
fn create_attachments(
    device: &wgpu::Device,
    config: &wgpu::SurfaceConfiguration,
    depth_format: Option<wgpu::TextureFormat>,
    sample_count: u32,
) -> (Option<wgpu::TextureView>, Option<wgpu::TextureView>) {
    let extent = wgpu::Extent3d {
        width: config.width,
        height: config.height,
        depth_or_array_layers: 1,
    };

    let depth_view = depth_format.map(|format| {
        device
            .create_texture(&wgpu::TextureDescriptor {
                label: Some("oriel depth/stencil attachment"),
                size: extent,
                mip_level_count: 1,
                sample_count,
                dimension: wgpu::TextureDimension::D2,
                format,
                usage: wgpu::TextureUsages::RENDER_ATTACHMENT,
                view_formats: &[],
            })
            .create_view(&wgpu::TextureViewDescriptor::default())
    });

    let multisample_view = (sample_count > 1).then(|| {
        device
            .create_texture(&wgpu::TextureDescriptor {
                label: Some("oriel multisample target"),
                size: extent,
                mip_level_count: 1,
                sample_count,
                dimension: wgpu::TextureDimension::D2,
                format: config.format,
                usage: wgpu::TextureUsages::RENDER_ATTACHMENT,
                view_formats: &[],
            })
            .create_view(&wgpu::TextureViewDescriptor::default())
    });

    (depth_view, multisample_view)
}

fn choose_surface_format(caps: &wgpu::SurfaceCapabilities) -> Option<wgpu::TextureFormat> {
    if caps.formats.is_empty() {
        return None;
    }

    // sRGB is the correct default for on-screen output when available.
    let preferred = [
        wgpu::TextureFormat::Bgra8UnormSrgb,
        wgpu::TextureFormat::Rgba8UnormSrgb,
    ];
    for f in preferred {
        if caps.formats.contains(&f) {
            return Some(f);
        }
    }

    Some(caps.formats[0])
}
