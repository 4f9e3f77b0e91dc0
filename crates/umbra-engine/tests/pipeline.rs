//! Whole-frame runs through the software rasterizer.

use std::cell::Cell;

use glam::{Mat4, Vec2};
use umbra_engine::coords::{Color, Viewport};
use umbra_engine::hull::ShadowHull;
use umbra_engine::light::{Light, LightTexture};
use umbra_engine::render::{
    BlendTechnique, LightmapCompositor, LightmapPass, PassScheduler, PassView, Rasterizer, TextureId,
};
use umbra_engine::software::SoftwareRasterizer;
use umbra_engine::{LightmapConfig, ResolutionScale};

const SIZE: u32 = 64;

/// World `[-32, 32]²` over the whole 64×64 device.
fn full_view() -> PassView {
    PassView::new(
        Viewport::from_size(SIZE, SIZE),
        Mat4::orthographic_rh(-32.0, 32.0, -32.0, 32.0, -1.0, 1.0),
    )
}

fn setup(config: LightmapConfig) -> (SoftwareRasterizer, LightmapCompositor, TextureId) {
    let mut r = SoftwareRasterizer::new(SIZE, SIZE);
    let texture = r.upload_texture(&LightTexture::point(128)).unwrap();
    let mut compositor = LightmapCompositor::new(&mut r, config, SIZE, SIZE).unwrap();
    compositor.set_view(full_view());
    (r, compositor, texture)
}

fn lightmap_pixel(r: &SoftwareRasterizer, c: &LightmapCompositor, x: u32, y: u32) -> Color {
    r.surface(c.lightmap_target()).unwrap().pixel(x, y)
}

fn square(size: f32, x: f32) -> ShadowHull {
    ShadowHull::rectangle(size, size)
        .unwrap()
        .with_position(Vec2::new(x, 0.0))
}

// ── shadows ───────────────────────────────────────────────────────────────

#[test]
fn only_hulls_in_range_cast_shadows() {
    let (mut r, mut c, tex) = setup(LightmapConfig::default());
    let light = Light::new(tex).with_range(10.0);
    let hulls = [square(4.0, 5.0), square(4.0, 20.0)];

    let stats = c.prepare(&mut r, &[light], &hulls).unwrap();
    assert_eq!(stats.lights_drawn, 1);
    assert_eq!(stats.hulls_gathered, 1);

    // world (8.5, -0.5) sits behind the near hull, (-5.5, -0.5) in the open
    assert_eq!(lightmap_pixel(&r, &c, 40, 32).r, 0.0);
    assert!(lightmap_pixel(&r, &c, 26, 32).r > 0.2);
    assert_eq!(lightmap_pixel(&r, &c, 40, 32).a, 1.0);
}

#[test]
fn hull_outside_second_light_does_not_shadow_it() {
    let hull = square(4.0, -14.0);
    let a = |tex| Light::new(tex).with_position(Vec2::new(-20.0, 0.0)).with_range(16.0);
    let b = |tex| Light::new(tex).with_position(Vec2::new(10.0, 0.0)).with_range(20.0);

    // world (-5.5, -0.5): in A's shadow, inside B's cone
    let (mut r, mut c, tex) = setup(LightmapConfig::default());
    c.prepare(&mut r, &[a(tex)], std::slice::from_ref(&hull)).unwrap();
    assert_eq!(lightmap_pixel(&r, &c, 26, 32).r, 0.0);

    let (mut r, mut c, tex) = setup(LightmapConfig::default());
    let stats = c.prepare(&mut r, &[a(tex), b(tex)], &[hull]).unwrap();
    assert_eq!(stats.lights_drawn, 2);
    assert_eq!(stats.hulls_gathered, 1);
    assert!(lightmap_pixel(&r, &c, 26, 32).r > 0.1);
}

#[test]
fn lights_beyond_view_are_culled() {
    let (mut r, mut c, tex) = setup(LightmapConfig::default());
    let lights = [
        Light::new(tex).with_range(5.0),
        Light::new(tex).with_position(Vec2::new(100.0, 0.0)).with_range(5.0),
        Light::new(tex).with_range(5.0).with_on(false),
    ];
    let stats = c.prepare(&mut r, &lights, &[]).unwrap();
    assert_eq!(stats.lights_drawn, 1);
    assert_eq!(stats.lights_culled, 2);
}

// ── ambient / composite ───────────────────────────────────────────────────

fn composited(blend: BlendTechnique) -> Color {
    let config = LightmapConfig {
        ambient: Color::gray(0.2),
        ..LightmapConfig::default()
    };
    let (mut r, mut c, _) = setup(config);
    c.prepare(&mut r, &[], &[]).unwrap();
    r.back_buffer_mut().fill(Color::gray(0.5));
    c.composite(&mut r, blend).unwrap();
    r.back_buffer().pixel(10, 50)
}

#[test]
fn blend_choice_changes_the_destination() {
    let multiplied = composited(BlendTechnique::Multiply);
    let added = composited(BlendTechnique::Add);
    assert!((multiplied.r - 0.1).abs() < 1e-5, "{multiplied:?}");
    assert!((added.r - 0.7).abs() < 1e-5, "{added:?}");
}

#[test]
fn quarter_scale_lightmap_still_lights_the_center() {
    let config = LightmapConfig {
        resolution_scale: ResolutionScale::Fourth,
        ..LightmapConfig::default()
    };
    let (mut r, mut c, tex) = setup(config);
    assert_eq!(c.lightmap_size(), (16, 16));

    c.prepare(&mut r, &[Light::new(tex).with_range(30.0)], &[]).unwrap();
    assert!(lightmap_pixel(&r, &c, 8, 8).r > 0.8);

    r.back_buffer_mut().fill(Color::WHITE);
    c.composite(&mut r, BlendTechnique::Multiply).unwrap();
    assert!(r.back_buffer().pixel(32, 32).r > 0.8);
    assert!(r.back_buffer().pixel(0, 0).r < 0.1);
}

#[test]
fn debug_wireframe_outlines_light_bounds() {
    let (mut r, mut c, tex) = setup(LightmapConfig::default());
    c.set_debug_wireframe(true);
    c.prepare(&mut r, &[Light::new(tex).with_range(10.0)], &[]).unwrap();
    assert_eq!(lightmap_pixel(&r, &c, 22, 32), Color::WHITE);
}

// ── split passes ──────────────────────────────────────────────────────────

#[test]
fn split_passes_keep_each_others_lighting() {
    let (mut r, mut c, tex) = setup(LightmapConfig::default());
    let half = Mat4::orthographic_rh(-16.0, 16.0, -32.0, 32.0, -1.0, 1.0);
    let completed = Cell::new(0);
    let done = &completed;

    let passes = [
        LightmapPass::new(Viewport::new(0, 0, 32, 64), half),
        LightmapPass::new(Viewport::new(32, 0, 32, 64), half),
    ]
    .map(move |p| p.on_complete(move |_| done.set(done.get() + 1)));

    let mut scheduler = PassScheduler::new();
    let stats = scheduler
        .run_frame(&mut r, &mut c, passes, &[Light::new(tex).with_range(10.0)], &[])
        .unwrap();

    assert_eq!(stats.passes, 2);
    assert_eq!(stats.lights.lights_drawn, 2);
    assert_eq!(completed.get(), 2);
    assert_eq!(scheduler.frame_index(), 1);

    assert!(lightmap_pixel(&r, &c, 16, 32).r > 0.8);
    assert!(lightmap_pixel(&r, &c, 48, 32).r > 0.8);
    assert_eq!(lightmap_pixel(&r, &c, 31, 2).r, 0.0);
}

#[test]
fn resize_reallocates_targets() {
    let (mut r, mut c, tex) = setup(LightmapConfig::default());
    let before = c.lightmap_target();
    c.on_resize(&mut r, 32, 32).unwrap();
    assert_ne!(c.lightmap_target(), before);
    assert!(r.surface(before).is_err());
    assert_eq!(r.target_size(c.lightmap_target()).unwrap(), (32, 32));

    c.set_view(PassView::new(
        Viewport::from_size(32, 32),
        Mat4::orthographic_rh(-16.0, 16.0, -16.0, 16.0, -1.0, 1.0),
    ));
    c.prepare(&mut r, &[Light::new(tex).with_range(8.0)], &[]).unwrap();
    assert!(lightmap_pixel(&r, &c, 16, 16).r > 0.8);
}
