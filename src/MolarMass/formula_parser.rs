//! # Formula Parser Module
//!
//! ## Aim
//! Turns a chemical formula such as `Mg(OH)2` or `Ca3(PO4)2` into element counts.
//! The parser knows nothing about the periodic table: any uppercase letter, optionally
//! followed by one lowercase letter, is accepted as a candidate symbol, so `Zz3` parses
//! to `{"Zz": 3}`. Checking symbols against atomic weights is done later by
//! `MassCalculator::validate_elements`.
//!
//! ## Grammar
//! ```text
//! formula  := term*
//! term     := symbol digits? | "(" formula ")" digits?
//! symbol   := [A-Z] [a-z]?
//! ```
//! Groups nest to any depth. A missing subscript means 1, and so does a literal `0`
//! (subscripts are floored to 1). Everything else (spaces, brackets, dots, charges,
//! a leading digit, a lone lowercase letter) rejects the whole formula.
//!
//! ## Logic
//! Single left-to-right pass without backtracking. Counts of the current nesting level
//! live in one `ElementCounts`; `(` saves it on a stack together with the position of the
//! bracket and starts an empty one, `)` reads the group multiplier, pops the saved counts
//! and merges the group into them.
use log::debug;
use std::fmt;
use std::iter::{Enumerate, Peekable};
use std::str::Chars;
use thiserror::Error;

/// structural errors of a formula; positions are character offsets
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum FormulaError {
    #[error("invalid character '{character}' at position {position}")]
    InvalidCharacter { character: char, position: usize },
    #[error("unbalanced parenthesis at position {position}")]
    UnbalancedParenthesis { position: usize },
    #[error("subscript too large at position {position}")]
    SubscriptOverflow { position: usize },
}

/// Element symbol -> number of atoms, in order of first appearance.
///
/// Equality ignores order: `{"H": 2, "O": 1}` equals `{"O": 1, "H": 2}`.
#[derive(Debug, Clone, Default)]
pub struct ElementCounts {
    entries: Vec<(String, usize)>,
}

impl ElementCounts {
    pub fn new() -> Self {
        Self::default()
    }

    /// Adds `count` atoms of `symbol`, appending the symbol if it is new.
    /// Returns `None` if the total would overflow or `count` is 0.
    pub(crate) fn add(&mut self, symbol: &str, count: usize) -> Option<()> {
        if count == 0 {
            return None;
        }
        match self.entries.iter_mut().find(|(s, _)| s == symbol) {
            Some((_, total)) => *total = total.checked_add(count)?,
            None => self.entries.push((symbol.to_string(), count)),
        }
        Some(())
    }

    pub fn get(&self, symbol: &str) -> Option<usize> {
        self.entries
            .iter()
            .find(|(s, _)| s == symbol)
            .map(|(_, count)| *count)
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, usize)> {
        self.entries.iter().map(|(s, c)| (s.as_str(), *c))
    }

    pub fn symbols(&self) -> impl Iterator<Item = &str> {
        self.entries.iter().map(|(s, _)| s.as_str())
    }

    /// total number of atoms in the formula unit
    pub fn total_atoms(&self) -> usize {
        self.entries.iter().map(|(_, c)| c).sum()
    }
}

impl PartialEq for ElementCounts {
    fn eq(&self, other: &Self) -> bool {
        self.len() == other.len() && self.iter().all(|(s, c)| other.get(s) == Some(c))
    }
}

impl Eq for ElementCounts {}

impl ElementCounts {
    /// Builds counts from `(symbol, count)` pairs, merging repeated symbols.
    ///
    /// A count of 0 is taken as 1, the same way the parser reads `O0`. A total that does
    /// not fit in `usize` gives `SubscriptOverflow` at the index of the offending pair.
    pub fn try_from_pairs<S, I>(pairs: I) -> Result<Self, FormulaError>
    where
        S: AsRef<str>,
        I: IntoIterator<Item = (S, usize)>,
    {
        let mut counts = ElementCounts::new();
        for (position, (symbol, count)) in pairs.into_iter().enumerate() {
            counts
                .add(symbol.as_ref(), count.max(1))
                .ok_or(FormulaError::SubscriptOverflow { position })?;
        }
        Ok(counts)
    }
}

impl<S: AsRef<str>, const N: usize> TryFrom<[(S, usize); N]> for ElementCounts {
    type Error = FormulaError;

    fn try_from(pairs: [(S, usize); N]) -> Result<Self, Self::Error> {
        Self::try_from_pairs(pairs)
    }
}

/// Flat formula, e.g. `Mg(OH)2` is displayed as `MgO2H2`.
impl fmt::Display for ElementCounts {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for (symbol, count) in self.iter() {
            if count == 1 {
                write!(f, "{}", symbol)?;
            } else {
                write!(f, "{}{}", symbol, count)?;
            }
        }
        Ok(())
    }
}

/// counts of an enclosing level, saved while a group is open
struct Frame {
    saved: ElementCounts,
    position: usize,
}

struct FormulaScanner<'a> {
    chars: Peekable<Enumerate<Chars<'a>>>,
    current: ElementCounts,
    stack: Vec<Frame>,
}

impl<'a> FormulaScanner<'a> {
    fn new(formula: &'a str) -> Self {
        Self {
            chars: formula.chars().enumerate().peekable(),
            current: ElementCounts::new(),
            stack: Vec::new(),
        }
    }

    fn run(mut self) -> Result<ElementCounts, FormulaError> {
        while let Some((position, c)) = self.chars.next() {
            match c {
                'A'..='Z' => self.element(c, position)?,
                '(' => self.open_group(position),
                ')' => self.close_group(position)?,
                character => {
                    return Err(FormulaError::InvalidCharacter {
                        character,
                        position,
                    });
                }
            }
        }
        // report the innermost group that was never closed
        if let Some(frame) = self.stack.last() {
            return Err(FormulaError::UnbalancedParenthesis {
                position: frame.position,
            });
        }
        Ok(self.current)
    }

    fn element(&mut self, first: char, position: usize) -> Result<(), FormulaError> {
        let mut symbol = String::from(first);
        if let Some((_, second)) = self.chars.next_if(|&(_, c)| c.is_ascii_lowercase()) {
            symbol.push(second);
        }
        let count = self.subscript()?;
        self.current
            .add(&symbol, count)
            .ok_or(FormulaError::SubscriptOverflow { position })
    }

    fn open_group(&mut self, position: usize) {
        let saved = std::mem::take(&mut self.current);
        self.stack.push(Frame { saved, position });
    }

    fn close_group(&mut self, position: usize) -> Result<(), FormulaError> {
        if self.stack.is_empty() {
            return Err(FormulaError::UnbalancedParenthesis { position });
        }
        let multiplier = self.subscript()?;
        let Frame { saved, .. } = self
            .stack
            .pop()
            .ok_or(FormulaError::UnbalancedParenthesis { position })?;
        let group = std::mem::replace(&mut self.current, saved);
        for (symbol, count) in group.iter() {
            count
                .checked_mul(multiplier)
                .and_then(|atoms| self.current.add(symbol, atoms))
                .ok_or(FormulaError::SubscriptOverflow { position })?;
        }
        Ok(())
    }

    /// Maximal run of decimal digits; absent or zero gives 1.
    fn subscript(&mut self) -> Result<usize, FormulaError> {
        let mut num: usize = 0;
        while let Some((position, digit)) = self.chars.next_if(|&(_, c)| c.is_ascii_digit()) {
            num = num
                .checked_mul(10)
                .and_then(|n| n.checked_add((digit as u8 - b'0') as usize))
                .ok_or(FormulaError::SubscriptOverflow { position })?;
        }
        Ok(num.max(1))
    }
}

/// Parses a chemical formula into element counts.
///
/// An empty string gives empty counts, not an error; callers that need a compound
/// must reject empty counts themselves.
///
/// # Example
/// ```rust
/// use molmass_calc::MolarMass::formula_parser::{ElementCounts, parse_formula};
/// let counts = parse_formula("Mg(OH)2").unwrap();
/// assert_eq!(counts, ElementCounts::try_from([("Mg", 1), ("O", 2), ("H", 2)]).unwrap());
/// ```
pub fn parse_formula(formula: &str) -> Result<ElementCounts, FormulaError> {
    let result = FormulaScanner::new(formula).run();
    match &result {
        Ok(counts) => debug!("parsed formula '{}' into {:?}", formula, counts),
        Err(e) => debug!("failed to parse formula '{}': {}", formula, e),
    }
    result
}
