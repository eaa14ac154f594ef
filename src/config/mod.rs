/*!
Configuration of a [context](crate::context).

All configuration for a planning run is set before the run and carried by the
context.
*/

use crate::state::rank::{ConjunctOrder, MostConstrained, Shuffled};

/// A configuration option, with a name and the range of permitted values.
#[derive(Clone, Copy, Debug)]
pub struct ConfigOption<T> {
    /// The name of the option, as the CLI knows it.
    pub name: &'static str,

    /// The least permitted value.
    pub min: T,

    /// The greatest permitted value.
    pub max: T,

    /// The value in force.
    pub value: T,
}

impl<T: Copy> ConfigOption<T> {
    /// The bounds of the option.
    pub fn min_max(&self) -> (T, T) {
        (self.min, self.max)
    }
}

/// The conjunct-ordering heuristic applied before each instantiation
/// dispatch.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum Selection {
    /// Order by estimated branching factor, smallest first.
    #[default]
    MostConstrained,

    /// Shuffle, seeded by [Config::shuffle_seed].
    ///
    /// The substitutions found are the same as under any other order; the
    /// work done to find them, typically, is not.
    Shuffled,
}

/// The primary configuration structure.
#[derive(Clone, Debug)]
pub struct Config {
    /// The deepest iteration of the iterative-deepening driver.
    pub max_depth: ConfigOption<u32>,

    /// A cooperative bound on node expansions, checked at search loop
    /// boundaries. Zero for no bound.
    pub step_limit: ConfigOption<u64>,

    /// The conjunct-ordering heuristic.
    pub selection: Selection,

    /// The seed for the shuffled heuristic.
    pub shuffle_seed: ConfigOption<u64>,
}

impl Default for Config {
    fn default() -> Self {
        Config {
            max_depth: ConfigOption {
                name: "max_depth",
                min: 1,
                max: u32::MAX,
                value: 100,
            },

            step_limit: ConfigOption {
                name: "step_limit",
                min: 0,
                max: u64::MAX,
                value: 0,
            },

            selection: Selection::MostConstrained,

            shuffle_seed: ConfigOption {
                name: "shuffle_seed",
                min: 0,
                max: u64::MAX,
                value: 0,
            },
        }
    }
}

impl Config {
    /// The conjunct order the configuration selects.
    pub fn conjunct_order(&self) -> Box<dyn ConjunctOrder> {
        match self.selection {
            Selection::MostConstrained => Box::new(MostConstrained),
            Selection::Shuffled => Box::new(Shuffled::new(self.shuffle_seed.value)),
        }
    }
}
