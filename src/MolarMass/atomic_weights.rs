//! # Atomic Weights Module
//!
//! ## Aim
//! Static table of standard atomic weights (g/mol) for hydrogen through uranium,
//! as published in "Atomic Weights of the Elements 1995" by IUPAC.
//!
//! ## Main Data Structures
//! - `Element`: symbol and atomic mass pair
//! - `ELEMENTS`: the fixed list of elements in atomic-number order
//! - `AtomicWeightTable`: read-only lookup over a list of elements; the IUPAC 1995
//!   table is built once per process and shared by reference
//!
//! ## Usage
//! ```rust
//! use molmass_calc::MolarMass::atomic_weights::AtomicWeightTable;
//! let table = AtomicWeightTable::iupac_1995();
//! assert_eq!(table.atomic_mass("O"), Some(16.00));
//! assert!(!table.contains("Zz"));
//! ```
use std::collections::HashMap;
use std::sync::OnceLock;

/// element symbol and its standard atomic weight
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Element {
    pub symbol: &'static str,
    pub atomic_mass: f64,
}

/// Atomic Weights of the Elements 1995 (IUPAC), H to U
pub const ELEMENTS: &[Element] = &[
    Element {
        symbol: "H",
        atomic_mass: 1.008,
    },
    Element {
        symbol: "He",
        atomic_mass: 4.003,
    },
    Element {
        symbol: "Li",
        atomic_mass: 6.941,
    },
    Element {
        symbol: "Be",
        atomic_mass: 9.012,
    },
    Element {
        symbol: "B",
        atomic_mass: 10.81,
    },
    Element {
        symbol: "C",
        atomic_mass: 12.01,
    },
    Element {
        symbol: "N",
        atomic_mass: 14.01,
    },
    Element {
        symbol: "O",
        atomic_mass: 16.00,
    },
    Element {
        symbol: "F",
        atomic_mass: 19.00,
    },
    Element {
        symbol: "Ne",
        atomic_mass: 20.18,
    },
    Element {
        symbol: "Na",
        atomic_mass: 22.99,
    },
    Element {
        symbol: "Mg",
        atomic_mass: 24.31,
    },
    Element {
        symbol: "Al",
        atomic_mass: 26.98,
    },
    Element {
        symbol: "Si",
        atomic_mass: 28.09,
    },
    Element {
        symbol: "P",
        atomic_mass: 30.97,
    },
    Element {
        symbol: "S",
        atomic_mass: 32.07,
    },
    Element {
        symbol: "Cl",
        atomic_mass: 35.45,
    },
    Element {
        symbol: "Ar",
        atomic_mass: 39.95,
    },
    Element {
        symbol: "K",
        atomic_mass: 39.10,
    },
    Element {
        symbol: "Ca",
        atomic_mass: 40.08,
    },
    Element {
        symbol: "Sc",
        atomic_mass: 44.96,
    },
    Element {
        symbol: "Ti",
        atomic_mass: 47.87,
    },
    Element {
        symbol: "V",
        atomic_mass: 50.94,
    },
    Element {
        symbol: "Cr",
        atomic_mass: 52.00,
    },
    Element {
        symbol: "Mn",
        atomic_mass: 54.94,
    },
    Element {
        symbol: "Fe",
        atomic_mass: 55.85,
    },
    Element {
        symbol: "Co",
        atomic_mass: 58.93,
    },
    Element {
        symbol: "Ni",
        atomic_mass: 58.69,
    },
    Element {
        symbol: "Cu",
        atomic_mass: 63.55,
    },
    Element {
        symbol: "Zn",
        atomic_mass: 65.39,
    },
    Element {
        symbol: "Ga",
        atomic_mass: 69.72,
    },
    Element {
        symbol: "Ge",
        atomic_mass: 72.61,
    },
    Element {
        symbol: "As",
        atomic_mass: 74.92,
    },
    Element {
        symbol: "Se",
        atomic_mass: 78.96,
    },
    Element {
        symbol: "Br",
        atomic_mass: 79.90,
    },
    Element {
        symbol: "Kr",
        atomic_mass: 83.80,
    },
    Element {
        symbol: "Rb",
        atomic_mass: 85.47,
    },
    Element {
        symbol: "Sr",
        atomic_mass: 87.62,
    },
    Element {
        symbol: "Y",
        atomic_mass: 88.91,
    },
    Element {
        symbol: "Zr",
        atomic_mass: 91.22,
    },
    Element {
        symbol: "Nb",
        atomic_mass: 92.91,
    },
    Element {
        symbol: "Mo",
        atomic_mass: 95.94,
    },
    Element {
        symbol: "Tc",
        atomic_mass: 98.00,
    },
    Element {
        symbol: "Ru",
        atomic_mass: 101.1,
    },
    Element {
        symbol: "Rh",
        atomic_mass: 102.9,
    },
    Element {
        symbol: "Pd",
        atomic_mass: 106.4,
    },
    Element {
        symbol: "Ag",
        atomic_mass: 107.9,
    },
    Element {
        symbol: "Cd",
        atomic_mass: 112.4,
    },
    Element {
        symbol: "In",
        atomic_mass: 114.8,
    },
    Element {
        symbol: "Sn",
        atomic_mass: 118.7,
    },
    Element {
        symbol: "Sb",
        atomic_mass: 121.8,
    },
    Element {
        symbol: "Te",
        atomic_mass: 127.6,
    },
    Element {
        symbol: "I",
        atomic_mass: 126.9,
    },
    Element {
        symbol: "Xe",
        atomic_mass: 131.3,
    },
    Element {
        symbol: "Cs",
        atomic_mass: 132.9,
    },
    Element {
        symbol: "Ba",
        atomic_mass: 137.3,
    },
    Element {
        symbol: "La",
        atomic_mass: 138.9,
    },
    Element {
        symbol: "Ce",
        atomic_mass: 140.1,
    },
    Element {
        symbol: "Pr",
        atomic_mass: 140.9,
    },
    Element {
        symbol: "Nd",
        atomic_mass: 144.2,
    },
    Element {
        symbol: "Pm",
        atomic_mass: 145.00,
    },
    Element {
        symbol: "Sm",
        atomic_mass: 150.4,
    },
    Element {
        symbol: "Eu",
        atomic_mass: 152.0,
    },
    Element {
        symbol: "Gd",
        atomic_mass: 157.3,
    },
    Element {
        symbol: "Tb",
        atomic_mass: 158.9,
    },
    Element {
        symbol: "Dy",
        atomic_mass: 162.5,
    },
    Element {
        symbol: "Ho",
        atomic_mass: 164.9,
    },
    Element {
        symbol: "Er",
        atomic_mass: 167.3,
    },
    Element {
        symbol: "Tm",
        atomic_mass: 168.9,
    },
    Element {
        symbol: "Yb",
        atomic_mass: 173.00,
    },
    Element {
        symbol: "Lu",
        atomic_mass: 175.00,
    },
    Element {
        symbol: "Hf",
        atomic_mass: 178.5,
    },
    Element {
        symbol: "Ta",
        atomic_mass: 180.9,
    },
    Element {
        symbol: "W",
        atomic_mass: 183.8,
    },
    Element {
        symbol: "Re",
        atomic_mass: 186.2,
    },
    Element {
        symbol: "Os",
        atomic_mass: 190.2,
    },
    Element {
        symbol: "Ir",
        atomic_mass: 192.2,
    },
    Element {
        symbol: "Pt",
        atomic_mass: 195.1,
    },
    Element {
        symbol: "Au",
        atomic_mass: 197.00,
    },
    Element {
        symbol: "Hg",
        atomic_mass: 200.6,
    },
    Element {
        symbol: "Tl",
        atomic_mass: 204.4,
    },
    Element {
        symbol: "Pb",
        atomic_mass: 207.2,
    },
    Element {
        symbol: "Bi",
        atomic_mass: 209.0,
    },
    Element {
        symbol: "Po",
        atomic_mass: 209.00,
    },
    Element {
        symbol: "At",
        atomic_mass: 210.00,
    },
    Element {
        symbol: "Rn",
        atomic_mass: 222.00,
    },
    Element {
        symbol: "Fr",
        atomic_mass: 223.00,
    },
    Element {
        symbol: "Ra",
        atomic_mass: 226.00,
    },
    Element {
        symbol: "Ac",
        atomic_mass: 227.00,
    },
    Element {
        symbol: "Th",
        atomic_mass: 232.0,
    },
    Element {
        symbol: "Pa",
        atomic_mass: 231.0,
    },
    Element {
        symbol: "U",
        atomic_mass: 238.0,
    },
];

/// Immutable symbol -> atomic mass lookup.
#[derive(Debug, Clone)]
pub struct AtomicWeightTable {
    elements: &'static [Element],
    index: HashMap<&'static str, usize>,
}

static IUPAC_1995: OnceLock<AtomicWeightTable> = OnceLock::new();

impl AtomicWeightTable {
    /// Builds a table over an arbitrary element list. Later duplicates of a symbol
    /// shadow earlier ones.
    pub fn from_elements(elements: &'static [Element]) -> Self {
        let index = elements
            .iter()
            .enumerate()
            .map(|(i, element)| (element.symbol, i))
            .collect();
        Self { elements, index }
    }

    /// Process-wide IUPAC 1995 table, constructed on first use.
    pub fn iupac_1995() -> &'static AtomicWeightTable {
        IUPAC_1995.get_or_init(|| Self::from_elements(ELEMENTS))
    }

    pub fn atomic_mass(&self, symbol: &str) -> Option<f64> {
        self.index
            .get(symbol)
            .map(|&i| self.elements[i].atomic_mass)
    }

    pub fn contains(&self, symbol: &str) -> bool {
        self.index.contains_key(symbol)
    }

    pub fn len(&self) -> usize {
        self.index.len()
    }

    pub fn is_empty(&self) -> bool {
        self.index.is_empty()
    }

    /// elements in table order
    pub fn iter(&self) -> impl Iterator<Item = &Element> {
        self.elements.iter()
    }
}
