#[cfg(not(any(test, feature = "std")))]
use micromath::F32Ext;
use nalgebra::{Rotation3, Vector2, Vector3};

use hal::display::Point;

use crate::types::Orientation;

pub const MIN_ZOOM: f32 = 0.0;
/// Together with `CAMERA_DEPTH` keeps the perspective divisor of a unit sized model positive
pub const MAX_ZOOM: f32 = 200.0;
pub const CAMERA_DEPTH: f32 = 4.0;
pub const SCREEN_CENTER: Point = Point::new(120, 67);

/// Wireframe in object space, vertices within [-1, 1]³.
pub struct Model<const V: usize, const E: usize> {
    pub vertices: [[f32; 3]; V],
    pub edges: [(usize, usize); E],
}

#[rustfmt::skip]
pub const CUBE: Model<8, 12> = Model {
    vertices: [
        [-1.0, -1.0, -1.0], [1.0, -1.0, -1.0], [1.0, 1.0, -1.0], [-1.0, 1.0, -1.0],
        [-1.0, -1.0, 1.0], [1.0, -1.0, 1.0], [1.0, 1.0, 1.0], [-1.0, 1.0, 1.0],
    ],
    edges: [
        (0, 1), (1, 2), (2, 3), (3, 0),
        (4, 5), (5, 6), (6, 7), (7, 4),
        (0, 4), (1, 5), (2, 6), (3, 7),
    ],
};

#[derive(Copy, Clone, Debug, PartialEq)]
pub struct Zoom(f32);

impl Default for Zoom {
    fn default() -> Self {
        Self(90.0)
    }
}

impl Zoom {
    pub fn new(scale: f32) -> Self {
        Self(scale.clamp(MIN_ZOOM, MAX_ZOOM))
    }

    pub fn scale(&self) -> f32 {
        self.0
    }

    pub fn set(&mut self, scale: f32) {
        *self = Self::new(scale)
    }

    pub fn zoom_in(&mut self, step: f32) {
        self.set(self.0 + step)
    }

    pub fn zoom_out(&mut self, step: f32) {
        self.set(self.0 - step)
    }
}

/// Rotates by pitch about X, then by roll about Y, then perspective divides onto the screen.
#[derive(Copy, Clone, Debug)]
pub struct Projection {
    rotation: Rotation3<f32>,
    zoom: f32,
}

impl Projection {
    pub fn new(orientation: &Orientation, zoom: Zoom) -> Self {
        let pitch = Rotation3::from_axis_angle(&Vector3::x_axis(), orientation.pitch);
        let roll = Rotation3::from_axis_angle(&Vector3::y_axis(), -orientation.roll);
        Self { rotation: roll * pitch, zoom: zoom.scale() }
    }

    /// Screen position before rounding
    pub fn transform(&self, vertex: &[f32; 3]) -> Vector2<f32> {
        let v = self.rotation * Vector3::from(*vertex);
        let inv = 1.0 / (v.z + CAMERA_DEPTH);
        Vector2::new(
            v.x * self.zoom * inv + SCREEN_CENTER.x as f32,
            v.y * self.zoom * inv + SCREEN_CENTER.y as f32,
        )
    }

    pub fn project(&self, vertex: &[f32; 3]) -> Point {
        let v = self.transform(vertex);
        Point::new(v.x.round() as i32, v.y.round() as i32)
    }

    pub fn project_model<const V: usize, const E: usize>(&self, model: &Model<V, E>) -> [Point; V] {
        let mut points = [Point::default(); V];
        for (point, vertex) in points.iter_mut().zip(model.vertices.iter()) {
            *point = self.project(vertex);
        }
        points
    }
}

mod test {
    #[test]
    fn test_flat_projection() {
        use hal::display::Point;
        use pretty_assertions::assert_eq;

        use super::{Projection, Zoom, CUBE};
        use crate::types::{Orientation, SensorSample};

        let orientation = Orientation::from(&SensorSample::new([0.0, 0.0, 1.0], [0.0; 3]));
        let points = Projection::new(&orientation, Zoom::new(90.0)).project_model(&CUBE);
        let expected = [
            Point::new(90, 37),
            Point::new(150, 37),
            Point::new(150, 97),
            Point::new(90, 97),
            Point::new(102, 49),
            Point::new(138, 49),
            Point::new(138, 85),
            Point::new(102, 85),
        ];
        assert_eq!(expected, points);
    }

    #[test]
    fn test_rotation_order() {
        use super::{Projection, Zoom, CAMERA_DEPTH, CUBE, SCREEN_CENTER};
        use crate::types::Orientation;

        let (pitch, roll) = (0.7f32, -1.2f32);
        let zoom = 150.0;
        let projection = Projection::new(&Orientation::new(pitch, roll), Zoom::new(zoom));
        for vertex in CUBE.vertices.iter() {
            let [x, y, z] = *vertex;
            let y1 = y * pitch.cos() - z * pitch.sin();
            let z1 = y * pitch.sin() + z * pitch.cos();
            let x2 = x * roll.cos() - z1 * roll.sin();
            let z2 = x * roll.sin() + z1 * roll.cos();
            let inv = 1.0 / (z2 + CAMERA_DEPTH);
            let expected_x = x2 * zoom * inv + SCREEN_CENTER.x as f32;
            let expected_y = y1 * zoom * inv + SCREEN_CENTER.y as f32;
            let actual = projection.transform(vertex);
            assert!((actual.x - expected_x).abs() < 1e-3);
            assert!((actual.y - expected_y).abs() < 1e-3);
        }
    }

    #[test]
    fn test_projection_is_pure() {
        use super::{Projection, Zoom, CUBE};
        use crate::types::Orientation;

        let orientation = Orientation::new(-2.5, 0.4);
        let first = Projection::new(&orientation, Zoom::new(200.0)).project_model(&CUBE);
        let second = Projection::new(&orientation, Zoom::new(200.0)).project_model(&CUBE);
        assert_eq!(first, second);
    }

    #[test]
    fn test_divisor_stays_positive() {
        use nalgebra::Vector3;

        use super::{Projection, Zoom, CAMERA_DEPTH, CUBE};
        use crate::types::Orientation;

        for i in -16..=16 {
            for j in -16..=16 {
                let orientation = Orientation::new(i as f32 * 0.196, j as f32 * 0.196);
                let projection = Projection::new(&orientation, Zoom::new(200.0));
                for vertex in CUBE.vertices.iter() {
                    let rotated = projection.rotation * Vector3::from(*vertex);
                    assert!(rotated.z + CAMERA_DEPTH > 2.0);
                }
            }
        }
    }

    #[test]
    fn test_zoom_clamped() {
        use super::{Zoom, MAX_ZOOM, MIN_ZOOM};

        let mut zoom = Zoom::default();
        assert_eq!(zoom.scale(), 90.0);
        for _ in 0..100 {
            zoom.zoom_in(2.0);
            assert!(zoom.scale() <= MAX_ZOOM);
        }
        assert_eq!(zoom.scale(), MAX_ZOOM);
        for _ in 0..150 {
            zoom.zoom_out(2.0);
            assert!(zoom.scale() >= MIN_ZOOM);
        }
        assert_eq!(zoom.scale(), MIN_ZOOM);
        assert_eq!(Zoom::new(1000.0).scale(), MAX_ZOOM);
        assert_eq!(Zoom::new(-5.0).scale(), MIN_ZOOM);
    }
}
