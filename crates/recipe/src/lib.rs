//! Beer recipe record used by the malt URL format.
//!
//! The record mirrors the JSON shape used by the recipe editor. Every closed
//! enumeration carries its wire index, and [`presets`] holds the fixed tables
//! that map small bit-width codes to domain values.
//!
//! # Example
//!
//! ```
//! use malt_recipe::{Hop, HopUse, Recipe};
//!
//! let mut recipe = Recipe::default();
//! recipe.hops.push(Hop {
//!     name: "Citra".into(),
//!     usage: HopUse::DryHop,
//!     time: 3,
//!     ..Hop::default()
//! });
//! assert_eq!(recipe.hops[0].grams, 28);
//! assert_eq!(HopUse::DryHop.index(), 1);
//! ```

mod recipe;
mod types;

pub mod presets;

pub use recipe::{
    Fermentable, FermentationStep, Hop, MashStep, Misc, Recipe, WaterProfile, Yeast,
    DEFAULT_CARBONATION,
};
pub use types::{
    FermentationPhase, Glass, HopForm, HopUse, MiscUnit, MiscUse, RecipeType, YeastForm,
    YeastType, YeastUnit,
};
