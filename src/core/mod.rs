//! Core model and generation machinery.

/// Fixed IPA alphabet, boundary sentinels, and symbol segmentation.
pub mod alphabet;

/// Word lists parsed from pronunciation dictionaries.
pub mod corpus;

/// External dictionary collaborators, specified at their interface.
pub mod dict;

/// Random-walk word generation over a loaded profile.
pub mod generate;

/// Transition-table training, normalization, and tabular persistence.
pub mod model;

/// Atomic file writes for cached profile resources.
pub(crate) mod persist;

/// Profile store — lazy build, caching, and retrieval per language.
pub mod profile;
