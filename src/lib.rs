//! Simlish — pronounceable pseudo-word generation from IPA dictionaries.
//!
//! Learns a variable-order Markov model of phoneme transitions from a real
//! language's pronunciation dictionary, then samples novel symbol sequences
//! from it. Generated words imitate the source language's phonotactics but
//! are guaranteed never to reproduce a dictionary word.

pub mod core;
