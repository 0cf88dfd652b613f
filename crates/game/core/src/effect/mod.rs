//! Declarative effects and their provenance.
//!
//! Reference data attaches [`Effect`]s to traits, class features, choice
//! options and talents. The aggregator wraps each one in an
//! [`AttributedEffect`] that remembers where it came from and whether it
//! still waits on a player choice.

mod kinds;
mod source;

pub use kinds::{Effect, EffectKind, Stat, Target};
pub use source::{AttributedEffect, ChoiceKey, ChoiceKeyError, EffectSource, SourceKind};
