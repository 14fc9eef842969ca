//! Oriented bounding boxes and the separating axis test

use crate::foundation::math::{utils, Mat4, Vec3};

/// Oriented bounding box in world space
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Obb {
    /// Box center
    pub center: Vec3,
    /// Unit axes of the box
    pub axes: [Vec3; 3],
    /// Half of the box size along each axis
    pub half_extents: [f32; 3],
}

impl Default for Obb {
    fn default() -> Self {
        Self {
            center: Vec3::zeros(),
            axes: [Vec3::x(), Vec3::y(), Vec3::z()],
            half_extents: [0.0; 3],
        }
    }
}

impl Obb {
    /// Center at the origin, axes along the world basis
    pub fn reset(&mut self) {
        *self = Self::default();
    }

    /// Box obtained by transforming the unit cube centered at the origin
    ///
    /// Each transformed basis vector is normalized to give an axis and half
    /// its length becomes the half-extent, so non-uniform scale is kept. A
    /// basis vector collapsed to zero keeps its world axis with a zero
    /// half-extent.
    pub fn from_matrix(transformation: &Mat4) -> Self {
        let mut obb = Self::default();
        obb.center = utils::transform_point(transformation, obb.center);
        for (axis, half_extent) in obb.axes.iter_mut().zip(obb.half_extents.iter_mut()) {
            let transformed = utils::transform_vector(transformation, *axis);
            let length = transformed.norm();
            if length > 0.0 {
                *axis = transformed / length;
            }
            *half_extent = 0.5 * length;
        }
        obb
    }
}

/// Separating axis test between two boxes
///
/// Checks the three face axes of each box and the nine edge cross products
/// (Ericson, Real-Time Collision Detection, 4.4.1). Touching boxes overlap.
/// Near-parallel edge pairs are not special-cased.
pub fn test_overlap(a: &Obb, b: &Obb) -> bool {
    let mut r = [[0.0_f32; 3]; 3];
    let mut abs_r = [[0.0_f32; 3]; 3];
    for i in 0..3 {
        for j in 0..3 {
            r[i][j] = a.axes[i].dot(&b.axes[j]);
            abs_r[i][j] = r[i][j].abs();
        }
    }

    // Translation in the frame of a
    let offset = b.center - a.center;
    let t = [offset.dot(&a.axes[0]), offset.dot(&a.axes[1]), offset.dot(&a.axes[2])];
    let ea = &a.half_extents;
    let eb = &b.half_extents;

    for i in 0..3 {
        let ra = ea[i];
        let rb = eb[0] * abs_r[i][0] + eb[1] * abs_r[i][1] + eb[2] * abs_r[i][2];
        if t[i].abs() > ra + rb {
            return false;
        }
    }

    for i in 0..3 {
        let ra = ea[0] * abs_r[0][i] + ea[1] * abs_r[1][i] + ea[2] * abs_r[2][i];
        let rb = eb[i];
        if (t[0] * r[0][i] + t[1] * r[1][i] + t[2] * r[2][i]).abs() > ra + rb {
            return false;
        }
    }

    // a0 x b0..b2
    for j in 0..3 {
        let (j1, j2) = ((j + 1) % 3, (j + 2) % 3);
        let ra = ea[1] * abs_r[2][j] + ea[2] * abs_r[1][j];
        let rb = eb[j1] * abs_r[0][j2] + eb[j2] * abs_r[0][j1];
        if (t[2] * r[1][j] - t[1] * r[2][j]).abs() > ra + rb {
            return false;
        }
    }

    // a1 x b0..b2
    for j in 0..3 {
        let (j1, j2) = ((j + 1) % 3, (j + 2) % 3);
        let ra = ea[0] * abs_r[2][j] + ea[2] * abs_r[0][j];
        let rb = eb[j1] * abs_r[1][j2] + eb[j2] * abs_r[1][j1];
        if (t[0] * r[2][j] - t[2] * r[0][j]).abs() > ra + rb {
            return false;
        }
    }

    // a2 x b0..b2
    for j in 0..3 {
        let (j1, j2) = ((j + 1) % 3, (j + 2) % 3);
        let ra = ea[0] * abs_r[1][j] + ea[1] * abs_r[0][j];
        let rb = eb[j1] * abs_r[2][j2] + eb[j2] * abs_r[2][j1];
        if (t[1] * r[0][j] - t[0] * r[1][j]).abs() > ra + rb {
            return false;
        }
    }

    true
}
