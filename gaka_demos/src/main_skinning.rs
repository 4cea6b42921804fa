//! Skeletal animation demo
//!
//! A copper cylinder skinned to three bones; the tip bone swings between 0°
//! and 90° about +Z.

use gaka_demos::launch;
use gaka_demos::scenes::SkinningDemo;

fn main() -> Result<(), Box<dyn std::error::Error>> {
    launch(&mut SkinningDemo::new(), "config/skinning_demo.toml", "Gaka Skinning Demo")?;
    Ok(())
}
