use glam::Vec3;

/// RGB colour in 0.0–1.0.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Color {
    pub r: f32,
    pub g: f32,
    pub b: f32,
}

impl Color {
    pub const WHITE: Self = Self { r: 1.0, g: 1.0, b: 1.0 };

    pub fn new(r: f32, g: f32, b: f32) -> Self {
        Self { r, g, b }
    }

    /// From a packed `0xRRGGBB` value.
    pub fn from_hex(hex: u32) -> Self {
        let channel = |shift: u32| ((hex >> shift) & 0xff) as f32 / 255.0;
        Self::new(channel(16), channel(8), channel(0))
    }
}

impl Default for Color {
    fn default() -> Self {
        Self::WHITE
    }
}

/// Shape primitive understood by the host renderer.
#[derive(Debug, Clone, PartialEq)]
pub enum Shape {
    Sphere { radius: f32 },
    /// Flat annulus in the local XY plane (normal +Z).
    Ring { inner_radius: f32, outer_radius: f32 },
    /// Open polyline in world space (orbit traces).
    Path { points: Vec<Vec3> },
}

impl Shape {
    /// Numeric tag written into the render buffer.
    pub fn kind(&self) -> f32 {
        match self {
            Shape::Sphere { .. } => 0.0,
            Shape::Ring { .. } => 1.0,
            Shape::Path { .. } => 2.0,
        }
    }
}

/// Renderable description attached to an entity.
#[derive(Debug, Clone, PartialEq)]
pub struct MeshComponent {
    pub shape: Shape,
    pub color: Color,
    /// Glow multiplier (0.0 = lit normally).
    pub emissive: f32,
    pub opacity: f32,
}

impl MeshComponent {
    pub fn new(shape: Shape, color: Color) -> Self {
        Self {
            shape,
            color,
            emissive: 0.0,
            opacity: 1.0,
        }
    }

    pub fn sphere(radius: f32, color: Color) -> Self {
        Self::new(Shape::Sphere { radius }, color)
    }

    pub fn ring(inner_radius: f32, outer_radius: f32, color: Color) -> Self {
        Self::new(Shape::Ring { inner_radius, outer_radius }, color)
    }

    pub fn path(points: Vec<Vec3>, color: Color) -> Self {
        Self::new(Shape::Path { points }, color)
    }

    pub fn with_emissive(mut self, emissive: f32) -> Self {
        self.emissive = emissive;
        self
    }

    pub fn with_opacity(mut self, opacity: f32) -> Self {
        self.opacity = opacity;
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn from_hex_unpacks_channels() {
        let c = Color::from_hex(0xff8000);
        assert_eq!(c.r, 1.0);
        assert!((c.g - 128.0 / 255.0).abs() < 1e-6);
        assert_eq!(c.b, 0.0);
    }

    #[test]
    fn builders_set_fields() {
        let m = MeshComponent::sphere(2.5, Color::WHITE).with_emissive(1.0).with_opacity(0.5);
        assert_eq!(m.shape, Shape::Sphere { radius: 2.5 });
        assert_eq!(m.emissive, 1.0);
        assert_eq!(m.opacity, 0.5);
    }
}
