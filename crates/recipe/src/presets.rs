//! Fixed preset tables.
//!
//! A preset table maps a small code to a literal value. Codes past the end of
//! a table mean "the value follows as a literal", which callers express as
//! `None` from the `*_code` lookups.

/// Serving sizes in milliliters. Code 7 is a custom size.
pub const SERVING_SIZES_ML: [u32; 7] = [300, 330, 355, 375, 473, 500, 568];

/// Hop addition times. Code 6 repeats the previous hop's time, code 7 is custom.
pub const HOP_TIMES: [u32; 6] = [60, 20, 15, 10, 5, 0];
pub const HOP_TIME_PREVIOUS: u8 = 6;
pub const HOP_TIME_CUSTOM: u8 = 7;

/// Misc addition times. Code 3 is custom.
pub const MISC_TIMES: [u32; 3] = [5, 10, 15];

/// Mash step durations in minutes. Code 7 is custom.
pub const MASH_DURATIONS: [u32; 7] = [5, 10, 15, 20, 30, 45, 60];

/// Mash step ramp times in minutes. Code 3 is custom.
pub const MASH_RAMP_TIMES: [u32; 3] = [0, 15, 20];

/// Characteristic mash temperatures in Fahrenheit, ascending: acid and protein
/// rests, saccharification, mash out and boiling. Code 63 is a literal byte.
pub const MASH_TEMPS_F: [u8; 63] = [
    95, 96, 97, 98, 99, 100, 101, 102, 103, 104, 105, 106, 107, 108, 109, 110, 111, 112, 113, 114,
    115, 116, 117, 118, 119, 120, 121, 122, 123, 124, 125, 126, 127, 128, 129, 130, 142, 143, 144,
    145, 146, 147, 148, 149, 150, 151, 152, 153, 154, 155, 156, 157, 158, 159, 160, 161, 162, 167,
    168, 169, 170, 171, 212,
];
pub const MASH_TEMP_LITERAL: u8 = 63;

/// Default hop time and weight that seed the carry-over state.
pub const HOP_SEED_TIME: u32 = 60;
pub const HOP_SEED_GRAMS: u32 = 28;

/// Unit a fermentable weight is stored in on the wire.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum WeightUnit {
    Grams = 0,
    Kilograms = 1,
    Ounces = 2,
    Pounds = 3,
}

impl WeightUnit {
    pub const fn index(self) -> u8 {
        self as u8
    }

    pub const fn from_index(index: u8) -> Option<Self> {
        match index {
            0 => Some(WeightUnit::Grams),
            1 => Some(WeightUnit::Kilograms),
            2 => Some(WeightUnit::Ounces),
            3 => Some(WeightUnit::Pounds),
            _ => None,
        }
    }

    pub const fn grams_per_unit(self) -> f64 {
        match self {
            WeightUnit::Grams => 1.0,
            WeightUnit::Kilograms => 1000.0,
            WeightUnit::Ounces => 28.3495,
            WeightUnit::Pounds => 453.592,
        }
    }

    /// Picks the coarsest unit that holds `grams` as a whole number, trying
    /// kilograms, then pounds, then ounces, falling back to grams.
    ///
    /// Returns the unit and the weight expressed in it.
    pub fn pick(grams: u32) -> (WeightUnit, u32) {
        for unit in [WeightUnit::Kilograms, WeightUnit::Pounds, WeightUnit::Ounces] {
            let amount = (grams as f64 / unit.grams_per_unit()).round();
            if (amount * unit.grams_per_unit()).round() == grams as f64 {
                return (unit, amount as u32);
            }
        }
        (WeightUnit::Grams, grams)
    }

    /// Converts an amount in this unit back to whole grams.
    pub fn to_grams(self, amount: u32) -> u32 {
        (amount as f64 * self.grams_per_unit()).round() as u32
    }
}

/// Code of `value` in `table`, if it is one of the presets.
pub fn preset_code<T: PartialEq>(table: &[T], value: &T) -> Option<u8> {
    table.iter().position(|v| v == value).map(|i| i as u8)
}

/// Value for `code` in `table`, or `None` for the literal/custom codes.
pub fn preset_value<T: Copy>(table: &[T], code: u8) -> Option<T> {
    table.get(code as usize).copied()
}

/// Whole Celsius to whole Fahrenheit, rounded to nearest.
pub fn celsius_to_fahrenheit(celsius: u8) -> u16 {
    (celsius as f64 * 9.0 / 5.0 + 32.0).round() as u16
}

/// Whole Fahrenheit to whole Celsius, rounded to nearest and clamped at 0.
///
/// Exact inverse of [`celsius_to_fahrenheit`] for every whole Celsius value.
pub fn fahrenheit_to_celsius(fahrenheit: u8) -> u8 {
    ((fahrenheit as f64 - 32.0) * 5.0 / 9.0).round().clamp(0.0, 255.0) as u8
}
