use malt_buffers::Writer;
use malt_recipe::presets::{
    celsius_to_fahrenheit, preset_code, WeightUnit, HOP_TIME_CUSTOM, MASH_DURATIONS,
    MASH_RAMP_TIMES, MASH_TEMPS_F, MASH_TEMP_LITERAL, MISC_TIMES, SERVING_SIZES_ML,
};
use malt_recipe::{Fermentable, FermentationStep, Hop, MashStep, Misc, Recipe, Yeast};
use tracing::{trace, warn};

use super::{
    is_small_batch, EncodeError, HopCarry, FORMAT_VERSION, MASH_DURATION_CUSTOM,
    MASH_RAMP_CUSTOM, MAX_FERMENTABLES, MAX_FERMENTATION_STEPS, MAX_HOPS, MAX_MASH_STEPS,
    MAX_MISCS, MAX_YEASTS, MISC_TIME_CUSTOM, RATIO_OFFSET_TENTHS, SERVING_CUSTOM,
};

/// Writes a [`Recipe`] in the binary layout described in [`super`].
pub struct RecipeEncoder {
    pub writer: Writer,
}

impl Default for RecipeEncoder {
    fn default() -> Self {
        Self::new()
    }
}

impl RecipeEncoder {
    pub fn new() -> Self {
        Self {
            writer: Writer::new(),
        }
    }

    /// Encodes `recipe`. Every count and packed field is range-checked; on
    /// error nothing is left pending in the writer.
    pub fn encode(&mut self, recipe: &Recipe) -> Result<Vec<u8>, EncodeError> {
        self.writer.reset();
        match self.write_recipe(recipe) {
            Ok(()) => Ok(self.writer.flush()),
            Err(err) => {
                self.writer.reset();
                Err(err)
            }
        }
    }

    fn write_recipe(&mut self, recipe: &Recipe) -> Result<(), EncodeError> {
        let fermentables = count("fermentables", recipe.fermentables.len(), MAX_FERMENTABLES)?;
        let miscs = count("miscs", recipe.miscs.len(), MAX_MISCS)?;
        let hops = count("hops", recipe.hops.len(), MAX_HOPS)?;
        let yeasts = count("yeasts", recipe.yeasts.len(), MAX_YEASTS)?;

        self.writer.u8(FORMAT_VERSION);
        self.write_header(recipe)?;

        self.writer.u8(fermentables << 4 | miscs);
        self.writer.u8(hops << 3 | yeasts);
        let mark = self.writer.len();

        for fermentable in &recipe.fermentables {
            self.write_fermentable(fermentable)?;
        }
        let mut carry = HopCarry::default();
        for hop in &recipe.hops {
            self.write_hop(hop, &mut carry)?;
        }
        for misc in &recipe.miscs {
            self.write_misc(misc);
        }
        for yeast in &recipe.yeasts {
            self.write_yeast(yeast);
        }
        trace!(bytes = self.writer.len() - mark, "wrote ingredients");

        if recipe.has_mash() {
            self.write_mash(recipe)?;
        } else if !recipe.mash_steps.is_empty() || !recipe.water.is_empty() {
            warn!(
                steps = recipe.mash_steps.len(),
                "extract recipe carries mash data; dropping it"
            );
        }

        self.write_fermentation(recipe)
    }

    fn write_header(&mut self, recipe: &Recipe) -> Result<(), EncodeError> {
        let serving =
            preset_code(&SERVING_SIZES_ML, &recipe.serving_size_ml).unwrap_or(SERVING_CUSTOM);
        let style = bounded("style", recipe.style as u32, 0x7f)? as u8;
        let small = is_small_batch(recipe.batch_size, recipe.boil_size);

        self.writer
            .u8(recipe.glass.index() << 5 | serving << 2 | recipe.recipe_type.index());
        self.writer.u8((small as u8) << 7 | style);
        self.writer.var_str(&recipe.name);
        self.writer.var_str(&recipe.description);

        if small {
            let delta = recipe.boil_size - recipe.batch_size;
            self.writer.u8((recipe.batch_size << 3 | delta) as u8);
        } else {
            self.writer.var_uint(recipe.batch_size);
            self.writer.var_uint(recipe.boil_size);
        }

        if serving == SERVING_CUSTOM {
            self.writer.var_uint(recipe.serving_size_ml);
        }
        Ok(())
    }

    fn write_fermentable(&mut self, fermentable: &Fermentable) -> Result<(), EncodeError> {
        let (unit, amount) = WeightUnit::pick(fermentable.grams);
        let percent_yield = bounded("fermentable yield", fermentable.percent_yield as u32, 0x7f)?;
        let name = fermentable.name.as_bytes();
        let name_len = bounded("fermentable name length", name.len() as u32, 0x7f)?;

        self.writer
            .u16((unit.index() as u16) << 14 | (percent_yield as u16) << 7 | name_len as u16);
        self.writer.var_uint(amount);
        self.writer.var_uint(fermentable.ebc);
        self.writer.buf(name);
        Ok(())
    }

    fn write_hop(&mut self, hop: &Hop, carry: &mut HopCarry) -> Result<(), EncodeError> {
        let aa = tenths("hop alpha acid", hop.aa, u32::MAX)?;
        let time = carry.time_code(hop.time);
        let weight = carry.weight_differs(hop.grams);

        self.writer.u8(
            time << 5 | (weight as u8) << 4 | hop.form.index() << 2 | hop.usage.index(),
        );
        if time == HOP_TIME_CUSTOM {
            self.writer.var_uint(hop.time);
        }
        if weight {
            self.writer.var_uint(hop.grams);
        }
        self.writer.var_uint(aa);
        self.writer.var_str(&hop.name);
        trace!(
            time = hop.time,
            unit = time_unit(hop.usage.time_in_days()),
            carried = !weight,
            "hop"
        );

        carry.advance(hop.time, hop.grams);
        Ok(())
    }

    fn write_misc(&mut self, misc: &Misc) {
        let time = preset_code(&MISC_TIMES, &misc.time).unwrap_or(MISC_TIME_CUSTOM);
        self.writer
            .u8(time << 6 | misc.usage.index() << 3 | misc.units.index());
        if time == MISC_TIME_CUSTOM {
            self.writer.var_uint(misc.time);
        }
        self.writer.var_uint(misc.amount);
        self.writer.var_str(&misc.name);
        trace!(
            time = misc.time,
            unit = time_unit(misc.usage.time_in_days()),
            "misc"
        );
    }

    fn write_yeast(&mut self, yeast: &Yeast) {
        let has_amount = yeast.amount != 1;
        self.writer.u8(
            (has_amount as u8) << 7
                | yeast.yeast_type.index() << 4
                | yeast.units.index() << 2
                | yeast.form.index(),
        );
        if has_amount {
            self.writer.var_uint(yeast.amount);
        }
        self.writer.u8(yeast.attenuation);
        self.writer.var_str(&yeast.name);
    }

    fn write_mash(&mut self, recipe: &Recipe) -> Result<(), EncodeError> {
        let steps = count("mash steps", recipe.mash_steps.len(), MAX_MASH_STEPS)?;
        let has_water = !recipe.water.is_empty();

        self.writer.u8((has_water as u8) << 7 | steps);
        for step in &recipe.mash_steps {
            self.write_mash_step(step)?;
        }
        if has_water {
            for ppm in recipe.water.to_array() {
                self.writer.var_uint(ppm);
            }
        }
        Ok(())
    }

    fn write_mash_step(&mut self, step: &MashStep) -> Result<(), EncodeError> {
        let fahrenheit = bounded(
            "mash temperature",
            celsius_to_fahrenheit(step.temperature) as u32,
            0xff,
        )? as u8;
        let temp = preset_code(&MASH_TEMPS_F, &fahrenheit).unwrap_or(MASH_TEMP_LITERAL);
        let duration = preset_code(&MASH_DURATIONS, &step.duration).unwrap_or(MASH_DURATION_CUSTOM);
        let ratio = tenths(
            "water:grain ratio",
            step.water_grain_ratio,
            RATIO_OFFSET_TENTHS + 0x1f,
        )?;
        let ratio = ratio
            .checked_sub(RATIO_OFFSET_TENTHS)
            .ok_or(EncodeError::OutOfRange {
                field: "water:grain ratio",
                value: step.water_grain_ratio,
            })?;
        let ramp = preset_code(&MASH_RAMP_TIMES, &step.ramp_time).unwrap_or(MASH_RAMP_CUSTOM);

        self.writer.u16(
            (temp as u16) << 10 | (duration as u16) << 7 | (ratio as u16) << 2 | ramp as u16,
        );
        if temp == MASH_TEMP_LITERAL {
            self.writer.u8(fahrenheit);
        }
        if duration == MASH_DURATION_CUSTOM {
            self.writer.var_uint(step.duration);
        }
        if ramp == MASH_RAMP_CUSTOM {
            self.writer.var_uint(step.ramp_time);
        }
        self.writer.var_str(&step.name);
        Ok(())
    }

    /// Writes the trailing section unless carbonation and schedule are both
    /// the defaults the decoder substitutes.
    fn write_fermentation(&mut self, recipe: &Recipe) -> Result<(), EncodeError> {
        let carbonation = tenths("carbonation", recipe.carbonation, 0x1f)?;
        if carbonation == 24 && recipe.has_default_schedule() {
            return Ok(());
        }

        let steps = count(
            "fermentation steps",
            recipe.fermentation_steps.len(),
            MAX_FERMENTATION_STEPS,
        )?;
        self.writer.u8((carbonation as u8) << 3 | steps);
        for step in &recipe.fermentation_steps {
            self.write_fermentation_step(step)?;
        }
        Ok(())
    }

    fn write_fermentation_step(&mut self, step: &FermentationStep) -> Result<(), EncodeError> {
        let temperature = bounded("fermentation temperature", step.temperature as u32, 0x3f)?;
        self.writer.u8(step.phase.index() << 6 | temperature as u8);
        self.writer.u8(step.duration);
        Ok(())
    }
}

fn count(collection: &'static str, len: usize, max: usize) -> Result<u8, EncodeError> {
    if len > max {
        return Err(EncodeError::TooMany {
            collection,
            len,
            max,
        });
    }
    Ok(len as u8)
}

fn bounded(field: &'static str, value: u32, max: u32) -> Result<u32, EncodeError> {
    if value > max {
        return Err(EncodeError::OutOfRange {
            field,
            value: value as f64,
        });
    }
    Ok(value)
}

/// `value` in whole tenths, rounded to nearest.
fn tenths(field: &'static str, value: f64, max: u32) -> Result<u32, EncodeError> {
    let scaled = (value * 10.0).round();
    if !(0.0..=max as f64).contains(&scaled) {
        return Err(EncodeError::OutOfRange { field, value });
    }
    Ok(scaled as u32)
}

fn time_unit(in_days: bool) -> &'static str {
    if in_days {
        "d"
    } else {
        "min"
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use malt_recipe::{FermentationPhase, Glass, HopForm, HopUse, MiscUse, RecipeType};

    fn bare() -> Recipe {
        Recipe {
            name: String::new(),
            ..Recipe::default()
        }
    }

    #[test]
    fn addition_time_units() {
        assert_eq!(time_unit(HopUse::DryHop.time_in_days()), "d");
        assert_eq!(time_unit(HopUse::Boil.time_in_days()), "min");
        assert_eq!(time_unit(MiscUse::Bottling.time_in_days()), "d");
        assert_eq!(time_unit(MiscUse::Mash.time_in_days()), "min");
    }

    #[test]
    fn header_packs_glass_serving_and_type() {
        let recipe = Recipe {
            glass: Glass::Tulip,
            serving_size_ml: 500,
            recipe_type: RecipeType::PartialMash,
            style: 57,
            ..bare()
        };
        let data = RecipeEncoder::new().encode(&recipe).unwrap();
        assert_eq!(data[0], FORMAT_VERSION);
        assert_eq!(data[1], 0b010_101_01);
        assert_eq!(data[2], 0b1_0111001);
    }

    #[test]
    fn custom_serving_size_follows_sizes() {
        let recipe = Recipe {
            serving_size_ml: 250,
            ..bare()
        };
        let data = RecipeEncoder::new().encode(&recipe).unwrap();
        assert_eq!((data[1] >> 2) & 0b111, SERVING_CUSTOM);
        // version, h1, h2, name, description, packed sizes, then 250 as varuint
        assert_eq!(data[5], 20 << 3 | 5);
        assert_eq!(&data[6..8], &[0xfa, 0x01]);
    }

    #[test]
    fn fermentable_field_layout() {
        let recipe = Recipe {
            fermentables: vec![Fermentable {
                name: "Victory".into(),
                grams: 227,
                percent_yield: 72,
                ebc: 73,
            }],
            ..bare()
        };
        let data = RecipeEncoder::new().encode(&recipe).unwrap();
        // version, h1, h2, name, description, sizes, counts x2
        let body = &data[8..];
        let field = u16::from_be_bytes([body[0], body[1]]);
        assert_eq!(field >> 14, WeightUnit::Ounces.index() as u16);
        assert_eq!((field >> 7) & 0x7f, 72);
        assert_eq!(field & 0x7f, 7);
        assert_eq!(body[2], 8);
        assert_eq!(body[3], 73);
        assert_eq!(&body[4..11], b"Victory");
    }

    #[test]
    fn hop_header_bits() {
        let recipe = Recipe {
            hops: vec![Hop {
                name: "Citra".into(),
                grams: 50,
                aa: 12.5,
                usage: HopUse::DryHop,
                time: 3,
                form: HopForm::Leaf,
            }],
            ..bare()
        };
        let data = RecipeEncoder::new().encode(&recipe).unwrap();
        let body = &data[8..];
        assert_eq!(body[0], 0b111_1_01_01);
        assert_eq!(body[1], 3);
        assert_eq!(body[2], 50);
        assert_eq!(body[3], 125);
        assert_eq!(body[4], 5);
        assert_eq!(&body[5..10], b"Citra");
    }

    #[test]
    fn yeast_amount_is_omitted_when_one() {
        let mut recipe = bare();
        recipe.yeasts.push(Yeast::default());
        let data = RecipeEncoder::new().encode(&recipe).unwrap();
        let body = &data[8..];
        assert_eq!(body[0], 0);
        assert_eq!(body[1], 75);
    }

    #[test]
    fn mash_step_literal_temperature() {
        let mut recipe = bare();
        recipe.mash_steps.push(MashStep {
            name: String::new(),
            temperature: 57,
            duration: 90,
            water_grain_ratio: 1.6,
            ramp_time: 10,
        });
        let data = RecipeEncoder::new().encode(&recipe).unwrap();
        let body = &data[8..];
        assert_eq!(body[0], 1);
        let field = u16::from_be_bytes([body[1], body[2]]);
        assert_eq!(field >> 10, MASH_TEMP_LITERAL as u16);
        assert_eq!((field >> 7) & 0b111, MASH_DURATION_CUSTOM as u16);
        assert_eq!((field >> 2) & 0x1f, 0);
        assert_eq!(field & 0b11, MASH_RAMP_CUSTOM as u16);
        assert_eq!(body[3], 135);
        assert_eq!(body[4], 90);
        assert_eq!(body[5], 10);
    }

    #[test]
    fn counts_are_rejected_not_wrapped() {
        let recipe = Recipe {
            yeasts: vec![Yeast::default(); 8],
            ..bare()
        };
        assert_eq!(
            RecipeEncoder::new().encode(&recipe),
            Err(EncodeError::TooMany {
                collection: "yeasts",
                len: 8,
                max: 7
            })
        );

        let recipe = Recipe {
            mash_steps: vec![MashStep::default(); 128],
            ..bare()
        };
        assert!(matches!(
            RecipeEncoder::new().encode(&recipe),
            Err(EncodeError::TooMany { collection: "mash steps", .. })
        ));
    }

    #[test]
    fn packed_scalars_are_range_checked() {
        let too_wet = Recipe {
            mash_steps: vec![MashStep {
                water_grain_ratio: 5.0,
                ..MashStep::default()
            }],
            ..bare()
        };
        assert!(matches!(
            encode(&too_wet),
            Err(EncodeError::OutOfRange { field: "water:grain ratio", .. })
        ));

        let too_dry = Recipe {
            mash_steps: vec![MashStep {
                water_grain_ratio: 1.2,
                ..MashStep::default()
            }],
            ..bare()
        };
        assert!(encode(&too_dry).is_err());

        let fizzy = Recipe {
            carbonation: 3.5,
            ..bare()
        };
        assert!(matches!(
            encode(&fizzy),
            Err(EncodeError::OutOfRange { field: "carbonation", .. })
        ));

        let hot = Recipe {
            fermentation_steps: vec![FermentationStep {
                phase: FermentationPhase::Primary,
                temperature: 64,
                duration: 7,
            }],
            ..bare()
        };
        assert!(encode(&hot).is_err());

        let long_name = Recipe {
            fermentables: vec![Fermentable {
                name: "x".repeat(128),
                ..Fermentable::default()
            }],
            ..bare()
        };
        assert!(encode(&long_name).is_err());
    }

    #[test]
    fn failed_encode_leaves_writer_clean() {
        let mut encoder = RecipeEncoder::new();
        let bad = Recipe {
            carbonation: -1.0,
            ..bare()
        };
        assert!(encoder.encode(&bad).is_err());
        let good = encoder.encode(&bare()).unwrap();
        assert_eq!(good, RecipeEncoder::new().encode(&bare()).unwrap());
    }

    fn encode(recipe: &Recipe) -> Result<Vec<u8>, EncodeError> {
        RecipeEncoder::new().encode(recipe)
    }
}
