//! types
//!
//! The combinator library. Every function here returns a [`Type`] whose name
//! and description are composed from its children.
//!
//! # Modules
//!
//! - [`primitives`] - `boolean`, `number`, sized integers, ranges
//! - [`strings`] - `string`, `bytes`, `date`
//! - [`choice`] - `enumeration`, `maybe`, `either`
//! - [`aggregate`] - `structure`, `array`, `vector`, `pair`, `map`
//! - [`function`] - `function` contracts and currying
//!
//! # Example
//!
//! ```
//! use typeshape::{check, types, Value};
//!
//! let weapon = types::enumeration(["Sword", "Axe", "Bow"]).named("Weapon");
//! let player = types::structure([
//!     ("atk", types::number()),
//!     ("wpn", weapon),
//!     ("bag", types::array(types::string())),
//! ])
//! .named("Player");
//!
//! let p = Value::object([
//!     ("atk", Value::from(12)),
//!     ("wpn", Value::from("Axe")),
//!     ("bag", Value::array(["rope", "torch"])),
//! ]);
//! assert!(check(&player, &p).is_ok());
//! ```
//!
//! [`Type`]: crate::core::descriptor::Type

pub mod aggregate;
pub mod choice;
pub mod function;
pub mod primitives;
pub mod strings;

pub use aggregate::{array, map, pair, structure, vector};
pub use choice::{either, enumeration, maybe};
pub use function::{function, Param, PartialApplication};
pub use primitives::{
    between, boolean, int, int16, int32, int8, int_between, number, uint, uint16, uint32, uint8,
};
pub use strings::{bytes, date, string};
