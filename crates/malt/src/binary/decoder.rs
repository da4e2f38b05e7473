use malt_buffers::Reader;
use malt_recipe::presets::{
    fahrenheit_to_celsius, preset_value, WeightUnit, HOP_TIMES, HOP_TIME_PREVIOUS, MASH_DURATIONS,
    MASH_RAMP_TIMES, MASH_TEMPS_F, MISC_TIMES, SERVING_SIZES_ML,
};
use malt_recipe::{
    Fermentable, FermentationPhase, FermentationStep, Glass, Hop, HopForm, HopUse, MashStep,
    Misc, MiscUnit, MiscUse, Recipe, RecipeType, WaterProfile, Yeast, YeastForm, YeastType,
    YeastUnit, DEFAULT_CARBONATION,
};
use tracing::trace;

use super::{DecodeError, HopCarry, FORMAT_VERSION, RATIO_OFFSET_TENTHS};

/// Reads a [`Recipe`] back from the binary layout described in [`super`].
///
/// Decoding is strict: reserved enum indices, a foreign version byte and bytes
/// left over after the last section are all errors.
pub struct RecipeDecoder<'a> {
    pub reader: Reader<'a>,
}

impl<'a> RecipeDecoder<'a> {
    pub fn new(data: &'a [u8]) -> Self {
        Self {
            reader: Reader::new(data),
        }
    }

    pub fn decode(mut self) -> Result<Recipe, DecodeError> {
        let version = self.reader.try_u8()?;
        if version != FORMAT_VERSION {
            return Err(DecodeError::UnsupportedVersion(version));
        }

        let mut recipe = self.read_header()?;

        let counts = self.reader.try_u8()?;
        let (fermentables, miscs) = (counts >> 4, counts & 0x0f);
        let counts = self.reader.try_u8()?;
        let (hops, yeasts) = (counts >> 3, counts & 0x07);

        recipe.fermentables = (0..fermentables)
            .map(|_| self.read_fermentable())
            .collect::<Result<_, _>>()?;
        let mut carry = HopCarry::default();
        recipe.hops = (0..hops)
            .map(|_| self.read_hop(&mut carry))
            .collect::<Result<_, _>>()?;
        recipe.miscs = (0..miscs)
            .map(|_| self.read_misc())
            .collect::<Result<_, _>>()?;
        recipe.yeasts = (0..yeasts)
            .map(|_| self.read_yeast())
            .collect::<Result<_, _>>()?;
        trace!(offset = self.reader.x, "read ingredients");

        if recipe.has_mash() {
            self.read_mash(&mut recipe)?;
        }

        if self.reader.is_empty() {
            recipe.carbonation = DEFAULT_CARBONATION;
            recipe.fermentation_steps = vec![FermentationStep::default()];
        } else {
            self.read_fermentation(&mut recipe)?;
        }

        match self.reader.size() {
            0 => Ok(recipe),
            n => Err(DecodeError::TrailingBytes(n)),
        }
    }

    fn read_header(&mut self) -> Result<Recipe, DecodeError> {
        let h1 = self.reader.try_u8()?;
        let glass = wire("glass", h1 >> 5, Glass::from_index)?;
        let serving = (h1 >> 2) & 0b111;
        let recipe_type = wire("recipe type", h1 & 0b11, RecipeType::from_index)?;

        let h2 = self.reader.try_u8()?;
        let small = h2 & 0x80 != 0;
        let style = h2 & 0x7f;

        let name = self.reader.try_var_str()?.to_owned();
        let description = self.reader.try_var_str()?.to_owned();

        let (batch_size, boil_size) = if small {
            let packed = self.reader.try_u8()? as u32;
            (packed >> 3, (packed >> 3) + (packed & 0b111))
        } else {
            (self.reader.try_var_uint()?, self.reader.try_var_uint()?)
        };

        let serving_size_ml = match preset_value(&SERVING_SIZES_ML, serving) {
            Some(ml) => ml,
            None => self.reader.try_var_uint()?,
        };

        Ok(Recipe {
            name,
            description,
            recipe_type,
            batch_size,
            boil_size,
            serving_size_ml,
            style,
            glass,
            fermentables: Vec::new(),
            hops: Vec::new(),
            miscs: Vec::new(),
            yeasts: Vec::new(),
            mash_steps: Vec::new(),
            water: WaterProfile::default(),
            carbonation: DEFAULT_CARBONATION,
            fermentation_steps: Vec::new(),
        })
    }

    fn read_fermentable(&mut self) -> Result<Fermentable, DecodeError> {
        let field = self.reader.try_u16()?;
        let unit = wire("weight unit", (field >> 14) as u8, WeightUnit::from_index)?;
        let percent_yield = ((field >> 7) & 0x7f) as u8;
        let name_len = (field & 0x7f) as usize;

        let amount = self.reader.try_var_uint()?;
        let ebc = self.reader.try_var_uint()?;
        let name = self.reader.try_utf8(name_len)?.to_owned();

        Ok(Fermentable {
            name,
            grams: unit.to_grams(amount),
            percent_yield,
            ebc,
        })
    }

    fn read_hop(&mut self, carry: &mut HopCarry) -> Result<Hop, DecodeError> {
        let head = self.reader.try_u8()?;
        let time_code = head >> 5;
        let has_weight = head & 0x10 != 0;
        let form = wire("hop form", (head >> 2) & 0b11, HopForm::from_index)?;
        let usage = wire("hop use", head & 0b11, HopUse::from_index)?;

        let time = match preset_value(&HOP_TIMES, time_code) {
            Some(time) => time,
            None if time_code == HOP_TIME_PREVIOUS => carry.previous_time,
            None => self.reader.try_var_uint()?,
        };
        let grams = if has_weight {
            self.reader.try_var_uint()?
        } else {
            carry.previous_grams
        };
        let aa = self.reader.try_var_uint()? as f64 / 10.0;
        let name = self.reader.try_var_str()?.to_owned();

        carry.advance(time, grams);
        Ok(Hop {
            name,
            grams,
            aa,
            usage,
            time,
            form,
        })
    }

    fn read_misc(&mut self) -> Result<Misc, DecodeError> {
        let head = self.reader.try_u8()?;
        let usage = wire("misc use", (head >> 3) & 0b111, MiscUse::from_index)?;
        let units = wire("misc unit", head & 0b111, MiscUnit::from_index)?;

        let time = match preset_value(&MISC_TIMES, head >> 6) {
            Some(time) => time,
            None => self.reader.try_var_uint()?,
        };
        let amount = self.reader.try_var_uint()?;
        let name = self.reader.try_var_str()?.to_owned();

        Ok(Misc {
            name,
            time,
            usage,
            amount,
            units,
        })
    }

    fn read_yeast(&mut self) -> Result<Yeast, DecodeError> {
        let head = self.reader.try_u8()?;
        let yeast_type = wire("yeast type", (head >> 4) & 0b111, YeastType::from_index)?;
        let units = wire("yeast unit", (head >> 2) & 0b11, YeastUnit::from_index)?;
        let form = wire("yeast form", head & 0b1, YeastForm::from_index)?;

        let amount = if head & 0x80 != 0 {
            self.reader.try_var_uint()?
        } else {
            1
        };
        let attenuation = self.reader.try_u8()?;
        let name = self.reader.try_var_str()?.to_owned();

        Ok(Yeast {
            name,
            amount,
            units,
            yeast_type,
            form,
            attenuation,
        })
    }

    fn read_mash(&mut self, recipe: &mut Recipe) -> Result<(), DecodeError> {
        let head = self.reader.try_u8()?;
        let steps = head & 0x7f;

        recipe.mash_steps = (0..steps)
            .map(|_| self.read_mash_step())
            .collect::<Result<_, _>>()?;
        if head & 0x80 != 0 {
            let mut ppm = [0u32; 6];
            for value in &mut ppm {
                *value = self.reader.try_var_uint()?;
            }
            recipe.water = WaterProfile::from_array(ppm);
        }
        Ok(())
    }

    fn read_mash_step(&mut self) -> Result<MashStep, DecodeError> {
        let field = self.reader.try_u16()?;
        let temp = (field >> 10) as u8;
        let duration = ((field >> 7) & 0b111) as u8;
        let ratio = ((field >> 2) & 0x1f) as u32;
        let ramp = (field & 0b11) as u8;

        let fahrenheit = match preset_value(&MASH_TEMPS_F, temp) {
            Some(f) => f,
            None => self.reader.try_u8()?,
        };
        let duration = match preset_value(&MASH_DURATIONS, duration) {
            Some(minutes) => minutes,
            None => self.reader.try_var_uint()?,
        };
        let ramp_time = match preset_value(&MASH_RAMP_TIMES, ramp) {
            Some(minutes) => minutes,
            None => self.reader.try_var_uint()?,
        };
        let name = self.reader.try_var_str()?.to_owned();

        Ok(MashStep {
            name,
            water_grain_ratio: (ratio + RATIO_OFFSET_TENTHS) as f64 / 10.0,
            temperature: fahrenheit_to_celsius(fahrenheit),
            duration,
            ramp_time,
        })
    }

    fn read_fermentation(&mut self, recipe: &mut Recipe) -> Result<(), DecodeError> {
        let head = self.reader.try_u8()?;
        recipe.carbonation = (head >> 3) as f64 / 10.0;

        let steps = head & 0b111;
        recipe.fermentation_steps = Vec::with_capacity(steps as usize);
        for _ in 0..steps {
            let packed = self.reader.try_u8()?;
            let phase = wire("fermentation phase", packed >> 6, FermentationPhase::from_index)?;
            let duration = self.reader.try_u8()?;
            recipe.fermentation_steps.push(FermentationStep {
                phase,
                temperature: packed & 0x3f,
                duration,
            });
        }
        Ok(())
    }
}

fn wire<T>(field: &'static str, index: u8, lookup: fn(u8) -> Option<T>) -> Result<T, DecodeError> {
    lookup(index).ok_or(DecodeError::InvalidEnum { field, index })
}
