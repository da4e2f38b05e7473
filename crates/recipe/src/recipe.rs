//! Recipe records and their defaults, in the shape the JSON form uses.

use serde::{Deserialize, Serialize};

use crate::types::{
    FermentationPhase, Glass, HopForm, HopUse, MiscUnit, MiscUse, RecipeType, YeastForm,
    YeastType, YeastUnit,
};

/// Carbonation assumed when a recipe does not say otherwise, in volumes of CO2.
pub const DEFAULT_CARBONATION: f64 = 2.4;

/// A complete beer recipe.
///
/// Collections keep the order the brewer entered them in.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct Recipe {
    pub name: String,
    pub description: String,
    #[serde(rename = "type")]
    pub recipe_type: RecipeType,
    /// Liters.
    pub batch_size: u32,
    /// Liters.
    pub boil_size: u32,
    pub serving_size_ml: u32,
    /// Index into the 2021 BJCP style guide ordering.
    pub style: u8,
    pub glass: Glass,
    pub fermentables: Vec<Fermentable>,
    pub hops: Vec<Hop>,
    pub miscs: Vec<Misc>,
    pub yeasts: Vec<Yeast>,
    pub mash_steps: Vec<MashStep>,
    pub water: WaterProfile,
    /// Volumes of CO2, one decimal place.
    pub carbonation: f64,
    pub fermentation_steps: Vec<FermentationStep>,
}

impl Default for Recipe {
    fn default() -> Self {
        Self {
            name: "New Recipe".into(),
            description: String::new(),
            recipe_type: RecipeType::AllGrain,
            batch_size: 20,
            boil_size: 25,
            serving_size_ml: 355,
            style: 0,
            glass: Glass::Pint,
            fermentables: Vec::new(),
            hops: Vec::new(),
            miscs: Vec::new(),
            yeasts: Vec::new(),
            mash_steps: Vec::new(),
            water: WaterProfile::default(),
            carbonation: DEFAULT_CARBONATION,
            fermentation_steps: vec![FermentationStep::default()],
        }
    }
}

impl Recipe {
    /// Extract recipes skip the mash entirely.
    pub fn has_mash(&self) -> bool {
        self.recipe_type != RecipeType::Extract
    }

    /// `true` when the schedule is exactly the single default primary step.
    pub fn has_default_schedule(&self) -> bool {
        matches!(self.fermentation_steps.as_slice(), [only] if *only == FermentationStep::default())
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct Fermentable {
    pub name: String,
    pub grams: u32,
    /// Extract yield, 0-100 percent.
    pub percent_yield: u8,
    /// Color in degrees EBC.
    pub ebc: u32,
}

impl Default for Fermentable {
    fn default() -> Self {
        Self {
            name: "New Fermentable".into(),
            grams: 1000,
            percent_yield: 75,
            ebc: 3,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct Hop {
    pub name: String,
    pub grams: u32,
    /// Alpha acid percentage, one decimal place.
    pub aa: f64,
    #[serde(rename = "use")]
    pub usage: HopUse,
    /// Minutes, or days for dry hop additions.
    pub time: u32,
    pub form: HopForm,
}

impl Default for Hop {
    fn default() -> Self {
        Self {
            name: "New Hop".into(),
            grams: 28,
            aa: 5.0,
            usage: HopUse::Boil,
            time: 60,
            form: HopForm::Pellet,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct Misc {
    pub name: String,
    /// Minutes for boil and mash additions, days otherwise.
    pub time: u32,
    #[serde(rename = "use")]
    pub usage: MiscUse,
    pub amount: u32,
    pub units: MiscUnit,
}

impl Default for Misc {
    fn default() -> Self {
        Self {
            name: "New Misc".into(),
            time: 60,
            usage: MiscUse::Boil,
            amount: 1,
            units: MiscUnit::Grams,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct Yeast {
    pub name: String,
    pub amount: u32,
    pub units: YeastUnit,
    #[serde(rename = "type")]
    pub yeast_type: YeastType,
    pub form: YeastForm,
    /// Expected apparent attenuation, percent.
    pub attenuation: u8,
}

impl Default for Yeast {
    fn default() -> Self {
        Self {
            name: "New Yeast".into(),
            amount: 1,
            units: YeastUnit::Packets,
            yeast_type: YeastType::Ale,
            form: YeastForm::Dry,
            attenuation: 75,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct MashStep {
    pub name: String,
    /// Liters of strike water per kilogram of grain.
    pub water_grain_ratio: f64,
    /// Whole degrees Celsius.
    pub temperature: u8,
    /// Minutes.
    pub duration: u32,
    /// Minutes.
    pub ramp_time: u32,
}

impl Default for MashStep {
    fn default() -> Self {
        Self {
            name: "Saccharification".into(),
            water_grain_ratio: 3.0,
            temperature: 68,
            duration: 60,
            ramp_time: 0,
        }
    }
}

/// Target water chemistry in ppm.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct WaterProfile {
    pub ca: u32,
    pub mg: u32,
    pub na: u32,
    pub cl: u32,
    pub so4: u32,
    pub hco3: u32,
}

impl WaterProfile {
    /// `true` when no mineral target is set.
    pub fn is_empty(&self) -> bool {
        *self == WaterProfile::default()
    }

    /// Minerals in wire order: Ca, Mg, Na, Cl, SO4, HCO3.
    pub fn to_array(&self) -> [u32; 6] {
        [self.ca, self.mg, self.na, self.cl, self.so4, self.hco3]
    }

    pub fn from_array([ca, mg, na, cl, so4, hco3]: [u32; 6]) -> Self {
        Self { ca, mg, na, cl, so4, hco3 }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct FermentationStep {
    #[serde(rename = "type")]
    pub phase: FermentationPhase,
    /// Degrees Celsius.
    pub temperature: u8,
    /// Days.
    pub duration: u8,
}

impl Default for FermentationStep {
    fn default() -> Self {
        Self {
            phase: FermentationPhase::Primary,
            temperature: 20,
            duration: 14,
        }
    }
}
