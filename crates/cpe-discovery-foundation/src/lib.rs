// Copyright (c) Contributors to the cpe-discovery project.
// SPDX-License-Identifier: Apache-2.0
// https://github.com/example/cpe-discovery

//! Primitives shared by every other crate in the workspace: the lowercase
//! lexicons that back vendor extraction, the normalizer/tokenizer, generic
//! string similarity (Levenshtein, Jaccard), and the version model used by
//! both the asset parser and the scoring engine.
//!
//! Nothing in this crate talks to the network or holds process-wide state;
//! everything here is a pure function over its arguments.

pub mod lexicon;
pub mod normalize;
pub mod similarity;
pub mod version;

pub use lexicon::{is_known_vendor, is_non_vendor_word, strip_corporate_suffix};
pub use normalize::{
    VersionExtraction,
    extract_version,
    is_version_shaped,
    normalize,
    normalize_version_preserving,
    tokenize,
};
pub use similarity::{jaccard, levenshtein_distance, levenshtein_ratio};
pub use version::ComparableVersion;
