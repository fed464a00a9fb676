//! wgpu rendering adapter.
//!
//! Geometry synthesis knows nothing about the GPU. This module turns a
//! [`TerrainModel`] into vertex/index buffers plus one uniform per mesh (world matrix,
//! color, shading parameters) and keeps those uniforms in sync every frame, so hover
//! highlighting and marker spin reach the renderer. Pipelines and draw calls belong to
//! the embedding renderer; [`TerrainBuffers::draw_order`] hands out meshes opaque first,
//! then transparent.

use wgpu::util::DeviceExt;

use crate::data_structures::{
    mesh::{Geometry, Shading, Topology},
    terrain::TerrainModel,
};

#[repr(C)]
#[derive(Copy, Clone, Debug, PartialEq, bytemuck::Pod, bytemuck::Zeroable)]
pub struct MeshVertex {
    pub position: [f32; 3],
    pub normal: [f32; 3],
}

impl MeshVertex {
    pub fn desc() -> wgpu::VertexBufferLayout<'static> {
        use std::mem;
        wgpu::VertexBufferLayout {
            array_stride: mem::size_of::<MeshVertex>() as wgpu::BufferAddress,
            step_mode: wgpu::VertexStepMode::Vertex,
            attributes: &[
                wgpu::VertexAttribute {
                    offset: 0,
                    shader_location: 0,
                    format: wgpu::VertexFormat::Float32x3,
                },
                wgpu::VertexAttribute {
                    offset: mem::size_of::<[f32; 3]>() as wgpu::BufferAddress,
                    shader_location: 1,
                    format: wgpu::VertexFormat::Float32x3,
                },
            ],
        }
    }
}

/**
 * Per-mesh uniform as stored on the GPU.
 *
 * `params` packs shininess, an unlit flag (1.0 for basic shading) and two padding
 * floats to keep the struct 16-byte aligned.
 */
#[repr(C)]
#[derive(Copy, Clone, Debug, PartialEq, bytemuck::Pod, bytemuck::Zeroable)]
pub struct MeshUniform {
    pub model: [[f32; 4]; 4],
    pub color: [f32; 4],
    pub params: [f32; 4],
}

impl MeshUniform {
    pub fn new(model: &TerrainModel, idx: usize) -> Self {
        let material = &model.meshes()[idx].material;
        let unlit = match material.shading {
            Shading::Phong => 0.0,
            Shading::Basic => 1.0,
        };
        Self {
            model: model.world_transform(idx).to_matrix().into(),
            color: material.color.to_rgba(material.opacity),
            params: [material.shininess, unlit, 0.0, 0.0],
        }
    }
}

pub fn vertices(geometry: &Geometry) -> Vec<MeshVertex> {
    geometry
        .positions
        .iter()
        .zip(&geometry.normals)
        .map(|(position, normal)| MeshVertex {
            position: (*position).into(),
            normal: (*normal).into(),
        })
        .collect()
}

/// Index list for the GPU. Line loops become closed line strips.
pub fn indices(geometry: &Geometry, topology: Topology) -> Vec<u32> {
    let mut indices = geometry.indices.clone();
    if topology == Topology::LineLoop {
        if let Some(&first) = indices.first() {
            indices.push(first);
        }
    }
    indices
}

pub fn primitive_topology(topology: Topology) -> wgpu::PrimitiveTopology {
    match topology {
        Topology::Triangles => wgpu::PrimitiveTopology::TriangleList,
        Topology::LineLoop => wgpu::PrimitiveTopology::LineStrip,
    }
}

pub fn mesh_bind_group_layout(device: &wgpu::Device) -> wgpu::BindGroupLayout {
    device.create_bind_group_layout(&wgpu::BindGroupLayoutDescriptor {
        entries: &[wgpu::BindGroupLayoutEntry {
            binding: 0,
            visibility: wgpu::ShaderStages::VERTEX | wgpu::ShaderStages::FRAGMENT,
            ty: wgpu::BindingType::Buffer {
                ty: wgpu::BufferBindingType::Uniform,
                has_dynamic_offset: false,
                min_binding_size: None,
            },
            count: None,
        }],
        label: Some("mesh_bind_group_layout"),
    })
}

#[derive(Debug)]
pub struct GpuMesh {
    pub vertex_buffer: wgpu::Buffer,
    pub index_buffer: wgpu::Buffer,
    pub uniform_buffer: wgpu::Buffer,
    pub bind_group: wgpu::BindGroup,
    pub num_elements: u32,
    pub topology: wgpu::PrimitiveTopology,
    pub double_sided: bool,
    pub transparent: bool,
}

#[derive(Debug)]
pub struct TerrainBuffers {
    pub layout: wgpu::BindGroupLayout,
    pub meshes: Vec<GpuMesh>,
}

impl TerrainBuffers {
    pub fn new(device: &wgpu::Device, model: &TerrainModel) -> Self {
        let layout = mesh_bind_group_layout(device);
        let meshes = model
            .meshes()
            .iter()
            .enumerate()
            .map(|(idx, mesh)| {
                let label = format!("{:?}", mesh.source);
                let vertex_buffer = device.create_buffer_init(&wgpu::util::BufferInitDescriptor {
                    label: Some(&format!("{} Vertex Buffer", label)),
                    contents: bytemuck::cast_slice(&vertices(&mesh.geometry)),
                    usage: wgpu::BufferUsages::VERTEX,
                });
                let index_data = indices(&mesh.geometry, mesh.topology);
                let index_buffer = device.create_buffer_init(&wgpu::util::BufferInitDescriptor {
                    label: Some(&format!("{} Index Buffer", label)),
                    contents: bytemuck::cast_slice(&index_data),
                    usage: wgpu::BufferUsages::INDEX,
                });
                let uniform_buffer = device.create_buffer_init(&wgpu::util::BufferInitDescriptor {
                    label: Some(&format!("{} Uniform Buffer", label)),
                    contents: bytemuck::cast_slice(&[MeshUniform::new(model, idx)]),
                    usage: wgpu::BufferUsages::UNIFORM | wgpu::BufferUsages::COPY_DST,
                });
                let bind_group = device.create_bind_group(&wgpu::BindGroupDescriptor {
                    layout: &layout,
                    entries: &[wgpu::BindGroupEntry {
                        binding: 0,
                        resource: uniform_buffer.as_entire_binding(),
                    }],
                    label: Some(&format!("{} Bind Group", label)),
                });
                GpuMesh {
                    vertex_buffer,
                    index_buffer,
                    uniform_buffer,
                    bind_group,
                    num_elements: index_data.len() as u32,
                    topology: primitive_topology(mesh.topology),
                    double_sided: mesh.material.double_sided,
                    transparent: mesh.material.is_transparent(),
                }
            })
            .collect();
        log::info!("Uploaded {} terrain meshes", model.meshes().len());
        Self { layout, meshes }
    }

    /// Re-writes every mesh uniform from the model's current colors and transforms.
    pub fn write_to_buffers(&self, queue: &wgpu::Queue, model: &TerrainModel) {
        for (idx, gpu_mesh) in self.meshes.iter().enumerate() {
            queue.write_buffer(
                &gpu_mesh.uniform_buffer,
                0,
                bytemuck::cast_slice(&[MeshUniform::new(model, idx)]),
            );
        }
    }

    /// Opaque meshes first, then transparent ones, skipping empty meshes.
    pub fn draw_order(&self) -> impl Iterator<Item = &GpuMesh> {
        let opaque = self.meshes.iter().filter(|m| !m.transparent);
        let transparent = self.meshes.iter().filter(|m| m.transparent);
        opaque.chain(transparent).filter(|m| m.num_elements > 0)
    }
}
