//! Per-instance data handed to the renderer each frame.
//!
//! The animation driver is the only writer; the rendering collaborator
//! only reads. Ordinary track heads and the featured head live in separate
//! buffers so the renderer can give the featured one its own material and
//! scale without per-instance branching.

use glam::{DVec3, Vec3};

/// GPU-facing transform of one moving track head.
#[repr(C)]
#[derive(Debug, Copy, Clone, PartialEq, bytemuck::Pod, bytemuck::Zeroable)]
pub struct InstanceRaw {
    /// World-space position.
    pub position: [f32; 3],
    /// Uniform scale.
    pub scale: f32,
}

impl InstanceRaw {
    /// Instance at a local-frame position.
    #[must_use]
    pub fn new(position: DVec3, scale: f32) -> Self {
        Self {
            position: position.as_vec3().to_array(),
            scale,
        }
    }

    /// Position as a vector.
    #[must_use]
    pub fn position(&self) -> Vec3 {
        Vec3::from_array(self.position)
    }
}

/// The featured track head and the track it belongs to.
#[derive(Debug, Copy, Clone, PartialEq)]
pub struct FeaturedInstance {
    /// Featured track id.
    pub track_id: u32,
    /// Its transform.
    pub instance: InstanceRaw,
}

/// Normal and featured instance buffers, rewritten every frame.
#[derive(Debug, Default, Clone)]
pub struct InstanceBuffers {
    normal: Vec<InstanceRaw>,
    normal_ids: Vec<u32>,
    featured: Option<FeaturedInstance>,
}

impl InstanceBuffers {
    /// Buffers with room for `capacity` tracks.
    #[must_use]
    pub fn with_capacity(capacity: usize) -> Self {
        Self {
            normal: Vec::with_capacity(capacity),
            normal_ids: Vec::with_capacity(capacity),
            featured: None,
        }
    }

    /// Drop last frame's contents, keeping the allocations.
    pub(crate) fn clear(&mut self) {
        self.normal.clear();
        self.normal_ids.clear();
        self.featured = None;
    }

    pub(crate) fn push_normal(&mut self, track_id: u32, instance: InstanceRaw) {
        self.normal.push(instance);
        self.normal_ids.push(track_id);
    }

    pub(crate) fn set_featured(&mut self, track_id: u32, instance: InstanceRaw) {
        self.featured = Some(FeaturedInstance { track_id, instance });
    }

    /// Instances of every non-featured track.
    #[must_use]
    pub fn normal(&self) -> &[InstanceRaw] {
        &self.normal
    }

    /// Track id of each entry in [`normal`](Self::normal), slot for slot.
    #[must_use]
    pub fn normal_ids(&self) -> &[u32] {
        &self.normal_ids
    }

    /// The featured instance, if a featured track is set and was drawn.
    #[must_use]
    pub fn featured(&self) -> Option<&FeaturedInstance> {
        self.featured.as_ref()
    }

    /// Featured buffer as a zero- or one-element slice.
    #[must_use]
    pub fn featured_slice(&self) -> &[InstanceRaw] {
        match &self.featured {
            Some(f) => std::slice::from_ref(&f.instance),
            None => &[],
        }
    }

    /// Raw bytes of the normal buffer for upload.
    #[must_use]
    pub fn normal_bytes(&self) -> &[u8] {
        bytemuck::cast_slice(&self.normal)
    }

    /// Raw bytes of the featured buffer for upload.
    #[must_use]
    pub fn featured_bytes(&self) -> &[u8] {
        bytemuck::cast_slice(self.featured_slice())
    }

    /// Total instances across both buffers.
    #[must_use]
    pub fn len(&self) -> usize {
        self.normal.len() + usize::from(self.featured.is_some())
    }

    /// Whether both buffers are empty.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}
