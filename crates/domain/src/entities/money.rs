//! Coin purse - three independent denominations.
//!
//! Denominations never convert into one another; 100 silver stays 100 silver.

use std::fmt;

use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct Money {
    /// Gold crowns
    pub gc: i32,
    /// Silver shillings
    pub ss: i32,
    /// Brass pennies
    pub bp: i32,
}

impl Money {
    pub fn new(gc: i32, ss: i32, bp: i32) -> Self {
        Self { gc, ss, bp }
    }

    pub fn get(&self, denomination: Denomination) -> i32 {
        match denomination {
            Denomination::Gold => self.gc,
            Denomination::Silver => self.ss,
            Denomination::Brass => self.bp,
        }
    }

    pub fn with(mut self, denomination: Denomination, value: i32) -> Self {
        match denomination {
            Denomination::Gold => self.gc = value,
            Denomination::Silver => self.ss = value,
            Denomination::Brass => self.bp = value,
        }
        self
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Denomination {
    #[serde(rename = "gc")]
    Gold,
    #[serde(rename = "ss")]
    Silver,
    #[serde(rename = "bp")]
    Brass,
}

impl Denomination {
    pub const ALL: [Denomination; 3] = [Self::Gold, Self::Silver, Self::Brass];

    pub fn abbreviation(&self) -> &'static str {
        match self {
            Self::Gold => "GC",
            Self::Silver => "SS",
            Self::Brass => "BP",
        }
    }
}

impl fmt::Display for Denomination {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.abbreviation())
    }
}
