use wgpu;
use image;
use log::{error, info};

/// Texture array holding every material layer the scene samples from.
pub struct Texture {
    pub texture: wgpu::Texture,
    pub bind_group: wgpu::BindGroup,
    pub bind_group_layout: wgpu::BindGroupLayout,
}

impl Texture {
    /// Loads one image per array layer. All images must share dimensions.
    pub fn load_array(
        device: &wgpu::Device,
        queue: &wgpu::Queue,
        paths: &[&str],
    ) -> Result<Self, Box<dyn std::error::Error>> {
        if paths.is_empty() {
            error!("No texture paths provided");
            return Err("No texture paths provided".into());
        }
        let mut images = Vec::new();
        for path in paths {
            let img = image::open(path)?.to_rgba8();
            images.push(img);
        }
        let dimensions = images[0].dimensions();
        for (i, img) in images.iter().enumerate() {
            if img.dimensions() != dimensions {
                error!(
                    "Texture {} has different dimensions: expected {:?}, got {:?}",
                    paths[i], dimensions, img.dimensions()
                );
                return Err("All textures must have the same dimensions".into());
            }
        }
        info!(
            "[texture] Loaded {} layers at {}x{}",
            images.len(), dimensions.0, dimensions.1
        );
        let layers: Vec<&[u8]> = images.iter().map(|img| img.as_raw().as_slice()).collect();
        Ok(Self::from_layers(device, queue, dimensions, &layers))
    }

    /// Solid-color stand-in layers for when the asset files are missing.
    pub fn fallback_array(device: &wgpu::Device, queue: &wgpu::Queue, colors: &[[u8; 4]]) -> Self {
        let layers: Vec<Vec<u8>> = colors
            .iter()
            .map(|c| c.iter().copied().cycle().take(4 * 4).collect())
            .collect();
        let slices: Vec<&[u8]> = layers.iter().map(|l| l.as_slice()).collect();
        Self::from_layers(device, queue, (2, 2), &slices)
    }

    fn from_layers(
        device: &wgpu::Device,
        queue: &wgpu::Queue,
        dimensions: (u32, u32),
        layers: &[&[u8]],
    ) -> Self {
        let texture_size = wgpu::Extent3d {
            width: dimensions.0,
            height: dimensions.1,
            depth_or_array_layers: layers.len() as u32,
        };
        let texture = device.create_texture(&wgpu::TextureDescriptor {
            size: texture_size,
            mip_level_count: 1,
            sample_count: 1,
            dimension: wgpu::TextureDimension::D2,
            format: wgpu::TextureFormat::Rgba8UnormSrgb,
            usage: wgpu::TextureUsages::TEXTURE_BINDING | wgpu::TextureUsages::COPY_DST,
            label: Some("Scene Texture Array"),
            view_formats: &[],
        });
        for (i, data) in layers.iter().enumerate() {
            queue.write_texture(
                wgpu::ImageCopyTexture {
                    texture: &texture,
                    mip_level: 0,
                    origin: wgpu::Origin3d { x: 0, y: 0, z: i as u32 },
                    aspect: wgpu::TextureAspect::All,
                },
                data,
                wgpu::ImageDataLayout {
                    offset: 0,
                    bytes_per_row: Some(4 * dimensions.0),
                    rows_per_image: Some(dimensions.1),
                },
                wgpu::Extent3d {
                    width: dimensions.0,
                    height: dimensions.1,
                    depth_or_array_layers: 1,
                },
            );
        }
        let texture_view = texture.create_view(&wgpu::TextureViewDescriptor {
            dimension: Some(wgpu::TextureViewDimension::D2Array),
            ..Default::default()
        });
        let texture_sampler = device.create_sampler(&wgpu::SamplerDescriptor {
            address_mode_u: wgpu::AddressMode::Repeat,
            address_mode_v: wgpu::AddressMode::Repeat,
            address_mode_w: wgpu::AddressMode::Repeat,
            mag_filter: wgpu::FilterMode::Linear,
            min_filter: wgpu::FilterMode::Linear,
            mipmap_filter: wgpu::FilterMode::Nearest,
            ..Default::default()
        });
        let bind_group_layout = device.create_bind_group_layout(&wgpu::BindGroupLayoutDescriptor {
            label: Some("Texture Array Bind Group Layout"),
            entries: &[
                wgpu::BindGroupLayoutEntry {
                    binding: 0,
                    visibility: wgpu::ShaderStages::FRAGMENT,
                    ty: wgpu::BindingType::Texture {
                        sample_type: wgpu::TextureSampleType::Float { filterable: true },
                        view_dimension: wgpu::TextureViewDimension::D2Array,
                        multisampled: false,
                    },
                    count: None,
                },
                wgpu::BindGroupLayoutEntry {
                    binding: 1,
                    visibility: wgpu::ShaderStages::FRAGMENT,
                    ty: wgpu::BindingType::Sampler(wgpu::SamplerBindingType::Filtering),
                    count: None,
                },
            ],
        });
        let bind_group = device.create_bind_group(&wgpu::BindGroupDescriptor {
            label: Some("Texture Array Bind Group"),
            layout: &bind_group_layout,
            entries: &[
                wgpu::BindGroupEntry {
                    binding: 0,
                    resource: wgpu::BindingResource::TextureView(&texture_view),
                },
                wgpu::BindGroupEntry {
                    binding: 1,
                    resource: wgpu::BindingResource::Sampler(&texture_sampler),
                },
            ],
        });
        Self {
            texture,
            bind_group,
            bind_group_layout,
        }
    }
}
