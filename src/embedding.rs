use glam::DVec3;
#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

use crate::Matrix3x2;

/// Describes how an orbital plane is placed into a 3D scene.
///
/// Positions in the orbital plane have the focus at the origin and
/// periapsis on the +X axis. An embedding turns them into scene
/// coordinates through a [`Matrix3x2`].
///
/// # Example
/// ```
/// use glam::{DVec2, DVec3};
/// use halferth_orbits::Embedding;
///
/// let upright = Embedding::Upright.matrix();
/// assert_eq!(upright.dot_vec(DVec2::new(1.0, 2.0)), DVec3::new(2.0, 1.0, 0.0));
/// ```
#[derive(Clone, Copy, Debug, Default, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[cfg_attr(feature = "serde", serde(tag = "kind", rename_all = "snake_case"))]
pub enum Embedding {
    /// The orbital plane is the XY plane: `(x, y) -> (x, y, 0)`.
    ///
    /// This is how a flat 2D plot shows an orbit.
    #[default]
    Flat,

    /// The orbital plane is the XY plane with the axes swapped:
    /// `(x, y) -> (y, x, 0)`.
    ///
    /// Periapsis points up the +Y axis, as in a scene where the
    /// planet's pole is vertical and the moons orbit around it.
    Upright,

    /// The orbital plane is tilted with the planet's axis.
    ///
    /// The plane starts as the YZ plane, `(x, y) -> (0, x, y)`, and is then
    /// rotated about +Z by `-axial_tilt`:
    /// `(x, y) -> (x sin t, x cos t, y)`.
    Tilted {
        /// The axial tilt, in radians.
        axial_tilt: f64,
    },

    /// A planet's orbit around its sun, lying in the XZ plane with
    /// periapsis along -X: `(x, y) -> (-x, 0, y)`.
    Heliocentric,

    /// Any other placement.
    Custom {
        /// The matrix mapping orbital-plane coordinates into the scene.
        matrix: Matrix3x2,
    },
}

impl Embedding {
    /// Creates a tilted embedding from an axial tilt given in degrees.
    ///
    /// # Example
    /// ```
    /// use halferth_orbits::Embedding;
    ///
    /// assert_eq!(
    ///     Embedding::tilted_degrees(90.0),
    ///     Embedding::Tilted { axial_tilt: std::f64::consts::FRAC_PI_2 },
    /// );
    /// ```
    pub fn tilted_degrees(axial_tilt: f64) -> Self {
        Self::Tilted {
            axial_tilt: axial_tilt.to_radians(),
        }
    }

    /// Gets the transformation matrix for this embedding.
    pub fn matrix(&self) -> Matrix3x2 {
        match *self {
            Embedding::Flat => Matrix3x2::from_cols(DVec3::X, DVec3::Y),
            Embedding::Upright => Matrix3x2::from_cols(DVec3::Y, DVec3::X),
            Embedding::Tilted { axial_tilt } => {
                let (s, c) = axial_tilt.sin_cos();
                Matrix3x2::from_cols(DVec3::new(s, c, 0.0), DVec3::Z)
            }
            Embedding::Heliocentric => Matrix3x2::from_cols(DVec3::NEG_X, DVec3::Z),
            Embedding::Custom { matrix } => matrix,
        }
    }
}

impl From<Embedding> for Matrix3x2 {
    fn from(embedding: Embedding) -> Self {
        embedding.matrix()
    }
}
