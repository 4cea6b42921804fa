//! Metallic-roughness demo
//!
//! A purple cube resting on a grey floor, lit by three point lights.

use gaka_demos::launch;
use gaka_demos::scenes::PbrDemo;

fn main() -> Result<(), Box<dyn std::error::Error>> {
    launch(&mut PbrDemo::default(), "config/pbr_demo.toml", "Gaka PBR Demo")?;
    Ok(())
}
