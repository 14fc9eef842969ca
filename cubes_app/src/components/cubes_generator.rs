//! Generates layers of cubes as children of its object, used for load testing

use scene_engine::prelude::*;

const CUBE_SPACE: f32 = 2.0;

/// Mesh of every other generated child
pub const DIAMOND: &str = "models/diamond.obj";

/// Spawns `layers` square rings of children above and below its object
///
/// Layer `n` sits at height `±(n + 1) * 2` and spans a `(2n + 3)²` grid.
/// Children alternate between diamonds at half scale and unit cubes.
#[derive(Debug, Clone)]
pub struct CubesGenerator {
    layers: u32,
}

impl CubesGenerator {
    /// Generator for `layers` layers
    pub fn new(layers: u32) -> Self {
        Self { layers }
    }

    /// Number of children the generator creates
    pub fn cube_count(&self) -> usize {
        (0..self.layers)
            .map(|layer| {
                let side = 2 * layer as usize + 3;
                2 * side * side
            })
            .sum()
    }

    fn add_cube(ctx: &mut Context<'_>, position: Vec3, mesh: &str, scale: f32) -> Result<(), SceneError> {
        let parent = ctx.game_object();
        let cube = ctx.create_object(parent)?;
        if let Some(transform) = ctx.scene.transform_mut(cube) {
            transform.set_scale(Vec3::new(scale, scale, scale));
            transform.set_position(position);
        }
        ctx.add_component(cube, Model::new(mesh))?;
        Ok(())
    }

    fn generate(&self, ctx: &mut Context<'_>) -> Result<(), SceneError> {
        let mut cube = false;
        for layer in 0..self.layers {
            let distance = (layer + 1) as f32 * CUBE_SPACE;
            let half = 1 + layer as i32;
            for i in -half..=half {
                for j in -half..=half {
                    let (mesh, scale) = if cube { (Primitives::CUBE, 1.0) } else { (DIAMOND, 0.5) };
                    let (x, z) = (i as f32 * CUBE_SPACE, j as f32 * CUBE_SPACE);
                    Self::add_cube(ctx, Vec3::new(x, distance, z), mesh, scale)?;
                    Self::add_cube(ctx, Vec3::new(x, -distance, z), mesh, scale)?;
                    cube = !cube;
                }
            }
        }
        Ok(())
    }
}

impl Component for CubesGenerator {
    fn start(&mut self, ctx: &mut Context<'_>) {
        match self.generate(ctx) {
            Ok(()) => log::info!("Generated {} cubes", self.cube_count()),
            Err(e) => log::error!("Cube generation failed: {}", e),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_generates_two_mirrored_layers() {
        let mut engine = Engine::headless(EngineConfig::default()).unwrap();
        let mut ctx = engine.context();
        let root = ctx.scene.root();
        let holder = ctx.create_object(root).unwrap();
        ctx.add_component(holder, CubesGenerator::new(2)).unwrap();

        // 9 + 25 positions per side
        assert_eq!(CubesGenerator::new(2).cube_count(), 68);
        let children = ctx.scene.children(holder).to_vec();
        assert_eq!(children.len(), 68);

        let first = ctx.scene.transform(children[0]).unwrap();
        assert_eq!(first.position(), Vec3::new(-2.0, 2.0, -2.0));
        assert_eq!(first.scale(), Vec3::new(0.5, 0.5, 0.5));
        let mirrored = ctx.scene.transform(children[1]).unwrap();
        assert_eq!(mirrored.position(), Vec3::new(-2.0, -2.0, -2.0));

        let cube = ctx.scene.get_component::<Model>(children[2]).unwrap();
        assert_eq!(cube.mesh_name(), Primitives::CUBE);
    }
}
