use crate::core::error::GenerationError;
use crate::core::result::GenerationResult;
use image::RgbaImage;

pub type Vec3 = [f32; 3];

pub const OBJECT_POSITION: Vec3 = [0.0, 0.5, -1.0];
pub const POINT_LIGHT_POSITION: Vec3 = [10.0, 10.0, 10.0];
pub const PLACEHOLDER_COLOR: &str = "hotpink";

#[derive(Clone, Copy, Debug, PartialEq)]
pub enum Light {
    Ambient,
    Point { position: Vec3 },
}

#[derive(Clone, Copy, Debug, PartialEq)]
pub struct BoxGeometry {
    pub width: f32,
    pub height: f32,
    pub depth: f32,
}

impl BoxGeometry {
    pub const UNIT: Self = Self {
        width: 1.0,
        height: 1.0,
        depth: 1.0,
    };
    // thin slab so the photo reads as a framed panel
    pub const PANEL: Self = Self {
        width: 1.0,
        height: 1.0,
        depth: 0.05,
    };
}

#[derive(Clone, Debug, PartialEq)]
pub enum SceneObject {
    Placeholder {
        position: Vec3,
        geometry: BoxGeometry,
        color: &'static str,
    },
    TexturedPanel {
        position: Vec3,
        geometry: BoxGeometry,
        texture: GenerationResult,
        transparent: bool,
    },
}

impl SceneObject {
    pub fn for_result(generated: Option<&GenerationResult>) -> Self {
        match generated {
            Some(result) => Self::TexturedPanel {
                position: OBJECT_POSITION,
                geometry: BoxGeometry::PANEL,
                texture: result.clone(),
                transparent: true,
            },
            None => Self::Placeholder {
                position: OBJECT_POSITION,
                geometry: BoxGeometry::UNIT,
                color: PLACEHOLDER_COLOR,
            },
        }
    }

    pub fn is_placeholder(&self) -> bool {
        matches!(self, Self::Placeholder { .. })
    }

    /// Pixels for the panel's material; `None` for the placeholder.
    pub fn load_texture(&self) -> Option<Result<RgbaImage, GenerationError>> {
        match self {
            Self::TexturedPanel { texture, .. } => Some(texture.decode_texture()),
            Self::Placeholder { .. } => None,
        }
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum CameraRig {
    /// Scene mounted in an AR session; the key remounts it when a new image lands.
    ArSession { session_key: u64 },
    Orbit,
}

#[derive(Clone, Debug, PartialEq)]
pub struct SceneState {
    pub lights: [Light; 2],
    pub object: SceneObject,
    pub camera: CameraRig,
    pub show_ar_button: bool,
}

impl SceneState {
    pub fn derive(generated: Option<&GenerationResult>, ar_supported: bool, render_key: u64) -> Self {
        let camera = if ar_supported {
            CameraRig::ArSession {
                session_key: render_key,
            }
        } else {
            CameraRig::Orbit
        };

        Self {
            lights: [
                Light::Ambient,
                Light::Point {
                    position: POINT_LIGHT_POSITION,
                },
            ],
            object: SceneObject::for_result(generated),
            camera,
            show_ar_button: ar_supported,
        }
    }
}
