//! Rule parsing and matching engine.
//!
//! ## How the parts work together
//!
//! ```text
//! rule file ── parser::parse_lines ──▶ Vec<Rule>   (once per load)
//!   │             - clean lines (comments, directives, scopes)
//!   │             - split options / trigger / replacement
//!   │             - unescape, reject no-op rules
//!   │
//!   └─ trigger::EndChars::scan ──▶ end-char set   (caller side)
//!
//! token + has_end_char ── matcher::scan ──▶ Match  (once per token)
//!                            - first match in file order wins
//!                            - exact / prefix / suffix categories
//!                            - case::preserve_case for prefix hits
//! ```
//!
//! Both halves are pure functions over their inputs. The only state that
//! survives a call is the caller-owned [`Cursor`](crate::Cursor).
//!
//! ## Responsibilities by module
//!
//! - `parser.rs`: the line-oriented DSL, escaping and validation.
//! - `matcher.rs`: the linear first-match-wins scan.
//! - `case.rs`: capitalization transfer for prefix replacements.
//! - `trigger.rs`: the `#Hotstring EndChars` directive and splitting a typed
//!   token from its end char.
//! - `metrics.rs`: opt-in timing for a single match.
//!
//! ## Debugging
//!
//! The engine logs through `tracing`: `debug` for load summaries, `trace` for
//! individual rule hits.

#[path = "engine/case.rs"]
mod case;
#[path = "engine/matcher.rs"]
mod matcher;
#[path = "engine/metrics.rs"]
mod metrics;
#[path = "engine/parser.rs"]
mod parser;
#[path = "engine/trigger.rs"]
mod trigger;


pub use case::preserve_case;
pub(crate) use matcher::scan;
pub use metrics::MatchStats;
pub(crate) use parser::parse_lines;
pub use trigger::EndChars;
