pub(crate) mod migrate;
pub(crate) mod reanalyze;

#[cfg(feature = "server")]
pub(crate) mod serve;

#[cfg(feature = "github")]
pub(crate) mod sync;
