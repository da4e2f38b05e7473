//! Closed enumerations. The declaration order of each enum is its wire index.

use serde::{Deserialize, Serialize};

macro_rules! wire_enum {
    (
        $(#[$meta:meta])*
        $name:ident {
            $( $(#[$vmeta:meta])* $variant:ident = $index:literal => $label:literal ),+ $(,)?
        }
    ) => {
        $(#[$meta])*
        #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
        pub enum $name {
            $(
                $(#[$vmeta])*
                #[serde(rename = $label)]
                $variant,
            )+
        }

        impl $name {
            /// Every value, in wire order.
            pub const ALL: &'static [$name] = &[$($name::$variant),+];

            /// The wire index of this value.
            pub const fn index(self) -> u8 {
                match self {
                    $($name::$variant => $index),+
                }
            }

            /// Looks up a value by wire index. Reserved indices yield `None`.
            pub const fn from_index(index: u8) -> Option<Self> {
                match index {
                    $($index => Some($name::$variant),)+
                    _ => None,
                }
            }

            /// The spelling used in the JSON form of a recipe.
            pub const fn as_str(self) -> &'static str {
                match self {
                    $($name::$variant => $label),+
                }
            }
        }

        impl std::fmt::Display for $name {
            fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
                f.write_str(self.as_str())
            }
        }
    };
}

wire_enum! {
    /// How the recipe gets its fermentable sugar.
    RecipeType {
        #[default]
        AllGrain = 0 => "all grain",
        PartialMash = 1 => "partial mash",
        Extract = 2 => "extract",
    }
}

wire_enum! {
    /// Glass the beer is pictured in.
    Glass {
        #[default]
        Pint = 0 => "pint",
        Weizen = 1 => "weizen",
        Tulip = 2 => "tulip",
        Pilsner = 3 => "pilsner",
        Jar = 4 => "jar",
    }
}

wire_enum! {
    HopUse {
        #[default]
        Boil = 0 => "boil",
        DryHop = 1 => "dry hop",
        Mash = 2 => "mash",
        Aroma = 3 => "aroma",
    }
}

wire_enum! {
    HopForm {
        #[default]
        Pellet = 0 => "pellet",
        Leaf = 1 => "leaf",
        Plug = 2 => "plug",
    }
}

wire_enum! {
    MiscUse {
        #[default]
        Boil = 0 => "boil",
        Mash = 1 => "mash",
        Sparge = 2 => "sparge",
        Primary = 3 => "primary",
        Secondary = 4 => "secondary",
        Bottling = 5 => "bottling",
    }
}

wire_enum! {
    MiscUnit {
        #[default]
        Grams = 0 => "g",
        Milliliters = 1 => "ml",
        Each = 2 => "each",
        Teaspoons = 3 => "tsp",
        Tablespoons = 4 => "tbsp",
        MilligramsPerLiter = 5 => "mg/l",
    }
}

wire_enum! {
    YeastType {
        #[default]
        Ale = 0 => "ale",
        Lager = 1 => "lager",
        Cider = 2 => "cider",
        Wine = 3 => "wine",
        Other = 4 => "other",
    }
}

wire_enum! {
    YeastUnit {
        #[default]
        Packets = 0 => "pkt",
        Grams = 1 => "g",
        Milliliters = 2 => "ml",
    }
}

wire_enum! {
    YeastForm {
        #[default]
        Dry = 0 => "dry",
        Liquid = 1 => "liquid",
    }
}

wire_enum! {
    FermentationPhase {
        #[default]
        Primary = 0 => "primary",
        Secondary = 1 => "secondary",
        Tertiary = 2 => "tertiary",
        Aging = 3 => "aging",
    }
}

impl HopUse {
    /// Dry hop additions are timed in days, everything else in minutes.
    pub const fn time_in_days(self) -> bool {
        matches!(self, HopUse::DryHop)
    }
}

impl MiscUse {
    /// Only boil and mash additions are timed in minutes; the rest use days.
    pub const fn time_in_days(self) -> bool {
        !matches!(self, MiscUse::Boil | MiscUse::Mash)
    }
}
