//! Latest-wins folds over the two append-only desk logs.
//!
//! Both folds share the same robustness contract: blank lines, malformed
//! JSON, and records of the wrong shape are skipped silently, and a log
//! that cannot be opened or read contributes an empty result instead of
//! failing the run. Dropping is intentional — robustness over completeness.

pub mod intent;
pub mod regime;
