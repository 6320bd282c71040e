//! Foundation materials

use serde::{Deserialize, Serialize};

/// Material of a foundation body
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
pub enum Material {
    #[default]
    Concrete,
    ReinforcedConcrete,
    Brick,
}

impl Material {
    /// Density in kg/m³
    pub fn density(&self) -> f32 {
        match self {
            Material::Concrete => 2400.0,
            Material::ReinforcedConcrete => 2500.0,
            Material::Brick => 1800.0,
        }
    }

    /// Compressive strength in Pa
    pub fn strength(&self) -> f32 {
        match self {
            Material::Concrete => 20e6,
            Material::ReinforcedConcrete => 30e6,
            Material::Brick => 10e6,
        }
    }

    /// Get display name
    pub fn display_name(&self) -> &'static str {
        match self {
            Material::Concrete => "Concrete",
            Material::ReinforcedConcrete => "Reinforced concrete",
            Material::Brick => "Brick",
        }
    }

    /// All materials for UI
    pub fn all() -> &'static [Material] {
        &[
            Material::Concrete,
            Material::ReinforcedConcrete,
            Material::Brick,
        ]
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_reinforced_is_strongest() {
        let strongest = Material::all()
            .iter()
            .max_by(|a, b| a.strength().total_cmp(&b.strength()))
            .unwrap();
        assert_eq!(*strongest, Material::ReinforcedConcrete);
        assert_eq!(Material::default(), Material::Concrete);
    }
}
