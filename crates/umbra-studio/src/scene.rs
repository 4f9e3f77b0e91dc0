use glam::{Mat4, Vec2};
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use umbra_engine::coords::Color;
use umbra_engine::hull::ShadowHull;
use umbra_engine::light::Light;
use umbra_engine::render::TextureId;
use umbra_engine::Result;

/// World units visible vertically.
pub const VIEW_HEIGHT: f32 = 100.0;

const FIXED_LIGHTS: [Vec2; 8] = [
    Vec2::new(-74.0, 42.0),
    Vec2::new(74.0, 42.0),
    Vec2::new(-74.0, -42.0),
    Vec2::new(74.0, -42.0),
    Vec2::new(-15.0, 0.0),
    Vec2::new(15.0, 0.0),
    Vec2::new(0.0, 15.0),
    Vec2::new(0.0, -15.0),
];

/// Radians per frame.
const HULL_SPIN: f32 = 0.05;

pub struct Scene {
    pub lights: Vec<Light>,
    pub hulls: Vec<ShadowHull>,
    half_extents: Vec2,
}

impl Scene {
    pub fn generate(
        texture: TextureId,
        aspect: f32,
        seed: u64,
        random_lights: usize,
        hull_count: usize,
    ) -> Result<Self> {
        let mut rng = StdRng::seed_from_u64(seed);
        let half_extents = Vec2::new(VIEW_HEIGHT * 0.5 * aspect, VIEW_HEIGHT * 0.5);

        let mut lights: Vec<Light> = FIXED_LIGHTS
            .iter()
            .map(|&p| {
                Light::new(texture)
                    .with_position(p)
                    .with_range(15.0)
                    .with_intensity(0.65)
            })
            .collect();

        for _ in 0..random_lights {
            let color = Color::rgb(rng.gen_range(0.2..1.0), rng.gen_range(0.2..1.0), rng.gen_range(0.2..1.0));
            lights.push(
                Light::new(texture)
                    .with_position(random_point(&mut rng, half_extents))
                    .with_range(rng.gen_range(20.0..60.0))
                    .with_intensity(rng.gen_range(0.5..1.5))
                    .with_color(color),
            );
        }

        let mut hulls = Vec::with_capacity(hull_count);
        for _ in 0..hull_count {
            let hull = ShadowHull::rectangle(2.0, 1.0)?
                .with_position(random_point(&mut rng, half_extents))
                .with_rotation(rng.gen_range(0.0..std::f32::consts::TAU))
                .with_scale(Vec2::splat(rng.gen_range(1.0..2.0)));
            hulls.push(hull);
        }

        Ok(Self { lights, hulls, half_extents })
    }

    pub fn view_projection(&self) -> Mat4 {
        let h = self.half_extents;
        Mat4::orthographic_rh(-h.x, h.x, -h.y, h.y, -1.0, 1.0)
    }

    /// Spins every hull, alternating direction.
    pub fn advance(&mut self) {
        for (i, hull) in self.hulls.iter_mut().enumerate() {
            let dir = if i % 2 == 0 { 1.0 } else { -1.0 };
            hull.set_rotation(hull.rotation() + HULL_SPIN * dir);
        }
    }
}

fn random_point(rng: &mut StdRng, half_extents: Vec2) -> Vec2 {
    Vec2::new(
        rng.gen_range(-half_extents.x..half_extents.x),
        rng.gen_range(-half_extents.y..half_extents.y),
    )
}
