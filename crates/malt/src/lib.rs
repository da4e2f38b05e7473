//! Beer recipes as compact, URL-safe strings.
//!
//! A recipe goes through three stages on its way into a link:
//!
//! 1. [`binary`]: a bit-packed layout built on enum indices, preset tables,
//!    hop carry-over and varuints.
//! 2. [`compression`]: raw DEFLATE seeded with a dictionary of brewing terms.
//! 3. [`transport`]: base64 with the URL-safe alphabet and no padding.
//!
//! [`crush`] and [`load`] run the whole pipeline.
//!
//! # Example
//!
//! ```
//! use malt::{crush, load, Recipe};
//!
//! let recipe = Recipe {
//!     name: "Session IPA".into(),
//!     ..Recipe::default()
//! };
//! let link = crush(&recipe).unwrap();
//! assert!(!link.contains(['+', '/', '=']));
//! assert_eq!(load(&link).unwrap(), recipe);
//! ```

pub mod binary;
pub mod cli;
pub mod compression;
pub mod crush;
pub mod report;
pub mod transport;

mod error;

pub use crush::{crush, crush_with, load, load_with, CrushOptions};
pub use error::Error;
pub use malt_recipe as recipe;
pub use malt_recipe::Recipe;
pub use report::SizeReport;
