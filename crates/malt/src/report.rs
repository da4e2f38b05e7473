//! Byte sizes of one recipe at every stage, against plain JSON baselines.

use std::fmt;

use malt_recipe::Recipe;

use crate::binary::encode_binary;
use crate::compression::{deflate, DICTIONARY};
use crate::transport::to_text;
use crate::Error;

const LEVEL: u32 = 9;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SizeReport {
    /// Minified JSON.
    pub json: usize,
    pub json_deflate: usize,
    pub json_dict_deflate: usize,
    pub binary: usize,
    pub binary_deflate: usize,
    pub binary_dict_deflate: usize,
    /// Final link text, same as `crush(recipe)?.len()`.
    pub url: usize,
}

impl SizeReport {
    pub fn measure(recipe: &Recipe) -> Result<Self, Error> {
        let json = serde_json::to_vec(recipe)?;
        let binary = encode_binary(recipe)?;
        let binary_dict_deflate = deflate(&binary, LEVEL, Some(DICTIONARY))?;

        Ok(Self {
            json: json.len(),
            json_deflate: deflate(&json, LEVEL, None)?.len(),
            json_dict_deflate: deflate(&json, LEVEL, Some(DICTIONARY))?.len(),
            binary: binary.len(),
            binary_deflate: deflate(&binary, LEVEL, None)?.len(),
            binary_dict_deflate: binary_dict_deflate.len(),
            url: to_text(&binary_dict_deflate).len(),
        })
    }

    fn rows(&self) -> [(&'static str, usize); 7] {
        [
            ("json", self.json),
            ("json + deflate", self.json_deflate),
            ("json + dict deflate", self.json_dict_deflate),
            ("binary", self.binary),
            ("binary + deflate", self.binary_deflate),
            ("binary + dict deflate", self.binary_dict_deflate),
            ("url", self.url),
        ]
    }
}

impl fmt::Display for SizeReport {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for (label, bytes) in self.rows() {
            let ratio = self.json as f64 / bytes.max(1) as f64;
            writeln!(f, "{label:<22}{bytes:>6} B {ratio:>6.1}x")?;
        }
        Ok(())
    }
}
