#![allow(dead_code)]

use malt::recipe::{
    Fermentable, FermentationPhase, FermentationStep, Hop, HopUse, MashStep, Recipe, WaterProfile,
    Yeast,
};

/// Recipe without name or trailing section, so offsets are easy to count:
/// version, two header bytes, two empty strings, packed sizes, two counts.
pub const BARE_HEADER_LEN: usize = 8;

pub fn bare() -> Recipe {
    Recipe {
        name: String::new(),
        ..Recipe::default()
    }
}

pub fn hop(time: u32, grams: u32) -> Hop {
    Hop {
        name: String::new(),
        time,
        grams,
        ..Hop::default()
    }
}

/// Four fermentables, three hops, one yeast, two mash steps, a water profile
/// and a non-default fermentation step.
pub fn fat_tire() -> Recipe {
    Recipe {
        name: "Fat Tire Clone".into(),
        description: "BYO Dec 2010".into(),
        batch_size: 20,
        boil_size: 26,
        style: 57,
        fermentables: vec![
            fermentable("Pale Ale", 4536, 80, 8),
            fermentable("Munich Light", 454, 80, 14),
            fermentable("Victory", 227, 72, 73),
            fermentable("Crystal 80L", 173, 74, 212),
        ],
        hops: vec![
            Hop {
                name: "Target".into(),
                grams: 11,
                aa: 11.0,
                time: 60,
                ..Hop::default()
            },
            Hop {
                name: "Willamette".into(),
                grams: 14,
                aa: 5.0,
                time: 10,
                ..Hop::default()
            },
            Hop {
                name: "East Kent Goldings".into(),
                grams: 14,
                aa: 5.0,
                usage: HopUse::Aroma,
                time: 0,
                ..Hop::default()
            },
        ],
        yeasts: vec![Yeast {
            name: "California Ale V Yeast WLP051".into(),
            attenuation: 72,
            ..Yeast::default()
        }],
        mash_steps: vec![
            MashStep {
                name: "Single Infusion".into(),
                water_grain_ratio: 3.1,
                temperature: 68,
                duration: 40,
                ramp_time: 0,
            },
            MashStep {
                name: "Mash Out".into(),
                water_grain_ratio: 3.1,
                temperature: 77,
                duration: 10,
                ramp_time: 0,
            },
        ],
        water: WaterProfile {
            ca: 15,
            mg: 3,
            na: 8,
            cl: 12,
            so4: 3,
            hco3: 52,
        },
        fermentation_steps: vec![FermentationStep {
            phase: FermentationPhase::Primary,
            temperature: 19,
            duration: 10,
        }],
        ..Recipe::default()
    }
}

fn fermentable(name: &str, grams: u32, percent_yield: u8, ebc: u32) -> Fermentable {
    Fermentable {
        name: name.into(),
        grams,
        percent_yield,
        ebc,
    }
}
