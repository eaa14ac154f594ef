/*!
Miscellaneous items related to [logging](log).

Calls to the log macro are made throughout the library.
These are intended to provide useful information for extending the library
and/or fixing issues.

Note, no log implementation is provided.
For more details, see [log].
*/

/// Targets to be used within a [log]! macro.
pub mod targets {
    /// Logs related to the [builder](crate::builder)
    pub const PARSE: &str = "parse";

    /// Logs related to the [instantiator](crate::state::instantiate)
    pub const INSTANTIATE: &str = "instantiate";

    /// Logs related to [conjunct ordering](crate::state::rank)
    pub const RANK: &str = "rank";

    /// Logs related to [effect application](crate::state::apply)
    pub const STATE: &str = "state";

    /// Logs related to [iterative deepening](crate::procedures::deepening)
    pub const DEEPENING: &str = "deepening";

    /// Logs related to the [breadth-first driver](crate::procedures::breadth)
    pub const BREADTH: &str = "breadth";

    /// Logs related to the [verifier](crate::procedures::verify)
    pub const VERIFY: &str = "verify";
}
