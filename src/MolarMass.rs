/// Static table of IUPAC 1995 atomic weights, hydrogen to uranium, shared read-only by the
/// whole process.
pub mod atomic_weights;
/// The formula parser: a chemical formula such as "Mg(OH)2" or "K4(ON(SO3)2)2" is turned into
/// the number of atoms of every element. Nested groups with multipliers are supported,
/// symbols are not checked against the periodic table at this stage.
pub mod formula_parser;
/// Molar mass of a formula, reagent mass from moles and moles from reagent mass; validation
/// of element symbols; per-element breakdown of the molar mass.
pub mod mass_calculator;
/// Calculation requests as a user issues them (molar mass only, reagent mass, moles from
/// mass) with mol/mmol conversion and text/table reports.
pub mod calculation;
/// mol and mmol
pub mod units;

pub use formula_parser::{ElementCounts, FormulaError, parse_formula};
pub use mass_calculator::{CalculationError, MassCalculator};
